//! Records returned by the backend.
//!
//! These are only ever built through the schema capability, so they derive
//! `Serialize` (for output and round trips) but not `Deserialize`. Field
//! rules are `validator` attributes, checked after the shape.

use crate::object_schema;
use crate::schema::fields::{Content, ImageType, Title, VariableType};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct Tag {
    pub id: Uuid,
    pub title: String,
}

object_schema!(Tag { id: "id", title: "title" });

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Equation {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub tags: Vec<Tag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

object_schema!(Equation {
    id: "id",
    title: "title",
    description: "description",
    content: "content",
    tags: "tags",
    created_at: "createdAt",
    updated_at: "updatedAt",
});

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image_hash: String,
    pub file_location: String,
    pub image_type: ImageType,
    pub tags: Vec<Tag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

object_schema!(Image {
    id: "id",
    title: "title",
    description: "description",
    image_hash: "imageHash",
    file_location: "fileLocation",
    image_type: "imageType",
    tags: "tags",
    created_at: "createdAt",
    updated_at: "updatedAt",
});

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct Answer {
    pub id: Uuid,
    #[validate(length(min = 3, max = 2048))]
    pub answer: Content,
    #[validate(length(min = 3, max = 2048))]
    pub explanation: Option<Content>,
}

object_schema!(Answer {
    id: "id",
    answer: "answer",
    explanation: "explanation",
});

/// Template variable of a concept or problem.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct Variable {
    #[validate(range(min = 1, max = 9999))]
    pub id: i64,
    #[validate(length(min = 3, max = 150))]
    pub name: Title,
    pub typ: VariableType,
    pub nullable: bool,
    pub default_value: Option<String>,
}

object_schema!(Variable {
    id: "id",
    name: "name",
    typ: "typ",
    nullable: "nullable",
    default_value: "default_value",
});

/// Value bound to a variable by one variant.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct VariableValue {
    #[validate(length(min = 3, max = 150))]
    pub name: Title,
    pub value: String,
}

object_schema!(VariableValue {
    name: "name",
    value: "value",
});

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: Uuid,
    #[validate(nested)]
    pub correct_answers: Vec<Answer>,
    #[validate(nested)]
    pub incorrect_answers: Vec<Answer>,
    #[validate(nested)]
    pub variable_values: Vec<VariableValue>,
}

object_schema!(Variant {
    id: "id",
    correct_answers: "correctAnswers",
    incorrect_answers: "incorrectAnswers",
    variable_values: "variableValues",
});

/// Concept as listed by search.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConceptShort {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<Tag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

object_schema!(ConceptShort {
    id: "id",
    title: "title",
    description: "description",
    tags: "tags",
    created_at: "createdAt",
    updated_at: "updatedAt",
});

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub equations: Vec<Equation>,
    pub tags: Vec<Tag>,
    pub images: Vec<Image>,
    pub concepts: Vec<ConceptShort>,
    #[validate(nested)]
    pub variables: Vec<Variable>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

object_schema!(Concept {
    id: "id",
    title: "title",
    description: "description",
    content: "content",
    equations: "equations",
    tags: "tags",
    images: "images",
    concepts: "concepts",
    variables: "variables",
    created_at: "createdAt",
    updated_at: "updatedAt",
});

/// Problem as listed by search.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProblemShort {
    pub id: Uuid,
    pub problem_statement: String,
    pub question_type: String,
    pub tags: Vec<Tag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

object_schema!(ProblemShort {
    id: "id",
    problem_statement: "problemStatement",
    question_type: "questionType",
    tags: "tags",
    created_at: "createdAt",
    updated_at: "updatedAt",
});

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: Uuid,
    pub problem_statement: String,
    pub hint: Option<String>,
    pub question_type: String,
    pub tags: Vec<Tag>,
    pub equations: Vec<Equation>,
    pub images: Vec<Image>,
    pub concepts: Vec<ConceptShort>,
    pub problems: Vec<ProblemShort>,
    #[validate(nested)]
    pub variables: Vec<Variable>,
    #[validate(length(min = 1, message = "Variant array length should be greater than 0"), nested)]
    pub variants: Vec<Variant>,
    pub explanation: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

object_schema!(Problem {
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
    created_at: "createdAt",
    updated_at: "updatedAt",
});
