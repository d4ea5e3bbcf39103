use super::fields::{Content, ImageFile, ImageMime, QuestionType, SearchText, Title, UuidList, VariableType};
use crate::api::models::VariableValue;
use crate::object_schema;
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

/// Messages of the minimum-size rules on `correctAnswers` and `variants`.
pub const CORRECT_ANSWER_REQUIRED: &str = "At least one correct answer is required";
pub const VARIANT_REQUIRED: &str = "Variant array length should be greater than 0";

/// Inputs that address an existing record.
pub trait Identified {
    fn id(&self) -> Uuid;
}

macro_rules! identified {
    ($($ty:ident),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> Uuid {
                self.id
            }
        })*
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct SearchQuery {
    pub search: SearchText,
}

object_schema!(SearchQuery { search: "search" });

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct TagCreate {
    #[validate(length(min = 3, max = 150))]
    pub title: Title,
}

object_schema!(TagCreate { title: "title" });

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct TagUpdate {
    pub id: Uuid,
    #[validate(length(min = 3, max = 150))]
    pub title: Title,
}

object_schema!(TagUpdate { id: "id", title: "title" });

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct EquationCreate {
    #[validate(length(min = 3, max = 150))]
    pub title: Title,
    #[validate(length(min = 3, max = 2048))]
    pub description: Option<Content>,
    #[validate(length(min = 3, max = 2048))]
    pub content: Content,
    pub tags: UuidList,
}

object_schema!(EquationCreate {
    title: "title",
    description: "description",
    content: "content",
    tags: "tags",
});

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct EquationUpdate {
    pub id: Uuid,
    #[validate(length(min = 3, max = 150))]
    pub title: Title,
    #[validate(length(min = 3, max = 2048))]
    pub description: Option<Content>,
    #[validate(length(min = 3, max = 2048))]
    pub content: Content,
    pub tags: UuidList,
}

object_schema!(EquationUpdate {
    id: "id",
    title: "title",
    description: "description",
    content: "content",
    tags: "tags",
});

/// New image upload; sent as multipart form data.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ImageCreate {
    pub image_type: ImageMime,
    #[validate(length(min = 3, max = 150))]
    pub title: Title,
    #[validate(length(min = 3, max = 2048))]
    pub description: Option<Content>,
    pub image: ImageFile,
    pub tags: UuidList,
}

object_schema!(ImageCreate {
    image_type: "imageType",
    title: "title",
    description: "description",
    image: "image",
    tags: "tags",
});

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImageUpdate {
    pub id: Uuid,
    #[validate(length(min = 3, max = 150))]
    pub title: Title,
    #[validate(length(min = 3, max = 2048))]
    pub description: Option<Content>,
    pub tags: UuidList,
}

object_schema!(ImageUpdate {
    id: "id",
    title: "title",
    description: "description",
    tags: "tags",
});

/// Variable declared by a concept or problem.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VariableInput {
    #[validate(length(min = 3, max = 150))]
    pub name: Title,
    pub typ: VariableType,
    pub nullable: bool,
    pub default_value: Option<String>,
}

object_schema!(VariableInput {
    name: "name",
    typ: "typ",
    nullable: "nullable",
    default_value: "defaultValue",
});

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConceptCreate {
    #[validate(length(min = 3, max = 150))]
    pub title: Title,
    #[validate(length(min = 3, max = 2048))]
    pub description: Option<Content>,
    #[validate(length(min = 3, max = 2048))]
    pub content: Content,
    pub tags: UuidList,
    pub equations: UuidList,
    pub images: UuidList,
    pub concepts: UuidList,
    #[validate(nested)]
    pub variables: Option<Vec<VariableInput>>,
}

object_schema!(ConceptCreate {
    title: "title",
    description: "description",
    content: "content",
    tags: "tags",
    equations: "equations",
    images: "images",
    concepts: "concepts",
    variables: "variables",
});

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConceptUpdate {
    pub id: Uuid,
    #[validate(length(min = 3, max = 150))]
    pub title: Title,
    #[validate(length(min = 3, max = 2048))]
    pub description: Option<Content>,
    #[validate(length(min = 3, max = 2048))]
    pub content: Content,
    pub tags: UuidList,
    pub equations: UuidList,
    pub images: UuidList,
    pub concepts: UuidList,
    #[validate(nested)]
    pub variables: Option<Vec<VariableInput>>,
}

object_schema!(ConceptUpdate {
    id: "id",
    title: "title",
    description: "description",
    content: "content",
    tags: "tags",
    equations: "equations",
    images: "images",
    concepts: "concepts",
    variables: "variables",
});

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct AnswerCreate {
    #[validate(length(min = 3, max = 2048))]
    pub answer: Content,
    #[validate(length(min = 3, max = 2048))]
    pub explanation: Option<Content>,
}

object_schema!(AnswerCreate {
    answer: "answer",
    explanation: "explanation",
});

/// Answer inside a variant edit; `id` is absent for answers added in the edit.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct AnswerUpdate {
    pub id: Option<Uuid>,
    #[validate(length(min = 3, max = 2048))]
    pub answer: Content,
    #[validate(length(min = 3, max = 2048))]
    pub explanation: Option<Content>,
}

object_schema!(AnswerUpdate {
    id: "id",
    answer: "answer",
    explanation: "explanation",
});

/// Variant embedded in a new problem.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VariantCreate {
    #[validate(length(min = 1, message = "At least one correct answer is required"), nested)]
    pub correct_answers: Vec<AnswerCreate>,
    #[validate(nested)]
    pub incorrect_answers: Vec<AnswerCreate>,
    #[validate(nested)]
    pub variable_values: Vec<VariableValue>,
}

object_schema!(VariantCreate {
    correct_answers: "correctAnswers",
    incorrect_answers: "incorrectAnswers",
    variable_values: "variableValues",
});

/// Variant inside a problem edit; `id` is absent for variants added in the edit.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VariantPatch {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, message = "At least one correct answer is required"), nested)]
    pub correct_answers: Vec<AnswerUpdate>,
    #[validate(nested)]
    pub incorrect_answers: Vec<AnswerUpdate>,
    #[validate(nested)]
    pub variable_values: Vec<VariableValue>,
}

object_schema!(VariantPatch {
    id: "id",
    correct_answers: "correctAnswers",
    incorrect_answers: "incorrectAnswers",
    variable_values: "variableValues",
});

/// Standalone variant added to an existing problem.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewVariant {
    pub problem_id: Uuid,
    #[validate(length(min = 1, message = "At least one correct answer is required"), nested)]
    pub correct_answers: Vec<AnswerCreate>,
    #[validate(nested)]
    pub incorrect_answers: Vec<AnswerCreate>,
    #[validate(nested)]
    pub variable_values: Vec<VariableValue>,
}

object_schema!(NewVariant {
    problem_id: "problemId",
    correct_answers: "correctAnswers",
    incorrect_answers: "incorrectAnswers",
    variable_values: "variableValues",
});

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VariantUpdate {
    pub id: Uuid,
    #[validate(length(min = 1, message = "At least one correct answer is required"), nested)]
    pub correct_answers: Vec<AnswerUpdate>,
    #[validate(nested)]
    pub incorrect_answers: Vec<AnswerUpdate>,
    #[validate(nested)]
    pub variable_values: Vec<VariableValue>,
}

object_schema!(VariantUpdate {
    id: "id",
    correct_answers: "correctAnswers",
    incorrect_answers: "incorrectAnswers",
    variable_values: "variableValues",
});

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProblemCreate {
    #[validate(length(min = 3, max = 2048))]
    pub problem_statement: Content,
    #[validate(length(min = 3, max = 2048))]
    pub hint: Option<Content>,
    pub question_type: QuestionType,
    pub tags: UuidList,
    pub equations: UuidList,
    pub images: UuidList,
    pub concepts: UuidList,
    pub problems: UuidList,
    #[validate(nested)]
    pub variables: Option<Vec<VariableInput>>,
    #[validate(length(min = 1, message = "Variant array length should be greater than 0"), nested)]
    pub variants: Vec<VariantCreate>,
    #[validate(length(min = 3, max = 2048))]
    pub explanation: Option<Content>,
}

object_schema!(ProblemCreate {
    problem_statement: "problemStatement",
    hint: "hint",
    question_type: "questionType",
    tags: "tags",
    equations: "equations",
    images: "images",
    concepts: "concepts",
    problems: "problems",
    variables: "variables",
    variants: "variants",
    explanation: "explanation",
});

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProblemUpdate {
    pub id: Uuid,
    #[validate(length(min = 3, max = 2048))]
    pub problem_statement: Content,
    #[validate(length(min = 3, max = 2048))]
    pub hint: Option<Content>,
    pub question_type: QuestionType,
    pub tags: UuidList,
    pub equations: UuidList,
    pub images: UuidList,
    pub concepts: UuidList,
    pub problems: UuidList,
    #[validate(nested)]
    pub variables: Option<Vec<VariableInput>>,
    #[validate(length(min = 1, message = "Variant array length should be greater than 0"), nested)]
    pub variants: Vec<VariantPatch>,
    #[validate(length(min = 3, max = 2048))]
    pub explanation: Option<Content>,
}

object_schema!(ProblemUpdate {
    id: "id",
    problem_statement: "problemStatement",
    hint: "hint",
    question_type: "questionType",
    tags: "tags",
    equations: "equations",
    images: "images",
    concepts: "concepts",
    problems: "problems",
    variables: "variables",
    variants: "variants",
    explanation: "explanation",
});

identified!(
    TagUpdate,
    EquationUpdate,
    ImageUpdate,
    ConceptUpdate,
    VariantUpdate,
    ProblemUpdate,
);
