use crate::Result;
use crate::api::models::{
    Concept, ConceptShort, Equation, Image, Problem, ProblemShort, Tag, Variant,
};
use crate::api::transport::{FormPart, PartValue, RequestBody};
use crate::error::{CustomError, ErrorKind};
use crate::schema::Schema;
use crate::schema::inputs::{
    ConceptCreate, ConceptUpdate, EquationCreate, EquationUpdate, Identified, ImageCreate,
    ImageUpdate, NewVariant, ProblemCreate, ProblemUpdate, TagCreate, TagUpdate, VariantUpdate,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// The backend resources the client can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Tag,
    Equation,
    Image,
    Concept,
    Problem,
    Variant,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Tag,
        ResourceKind::Equation,
        ResourceKind::Image,
        ResourceKind::Concept,
        ResourceKind::Problem,
        ResourceKind::Variant,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Tag => "Tag",
            ResourceKind::Equation => "Equation",
            ResourceKind::Image => "Image",
            ResourceKind::Concept => "Concept",
            ResourceKind::Problem => "Problem",
            ResourceKind::Variant => "Variant",
        }
    }

    /// Path segment under the API base URL.
    pub fn segment(&self) -> &'static str {
        match self {
            ResourceKind::Tag => "tags",
            ResourceKind::Equation => "equations",
            ResourceKind::Image => "images",
            ResourceKind::Concept => "concepts",
            ResourceKind::Problem => "problems",
            ResourceKind::Variant => "variants",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a validated input travels to the server.
pub trait RequestPayload {
    fn to_body(&self) -> Result<RequestBody>;
}

fn json_body<T: Serialize>(input: &T) -> Result<RequestBody> {
    serde_json::to_value(input)
        .map(RequestBody::Json)
        .map_err(|e| CustomError::from_error(ErrorKind::Generic, e))
}

macro_rules! json_payload {
    ($($ty:ty),* $(,)?) => {
        $(impl RequestPayload for $ty {
            fn to_body(&self) -> Result<RequestBody> {
                json_body(self)
            }
        })*
    };
}

json_payload!(
    TagCreate,
    TagUpdate,
    EquationCreate,
    EquationUpdate,
    ImageUpdate,
    ConceptCreate,
    ConceptUpdate,
    ProblemCreate,
    ProblemUpdate,
    NewVariant,
    VariantUpdate,
);

impl RequestPayload for ImageCreate {
    fn to_body(&self) -> Result<RequestBody> {
        let mut parts = vec![
            FormPart::text("imageType", self.image_type.as_str()),
            FormPart::text("title", self.title.as_str()),
        ];
        if let Some(description) = &self.description {
            parts.push(FormPart::text("description", description.as_str()));
        }
        if !self.tags.is_empty() {
            let ids: Vec<String> = self.tags.ids().iter().map(|id| id.to_string()).collect();
            parts.push(FormPart::text("tags", ids.join(",")));
        }
        parts.push(FormPart {
            name: "image".to_string(),
            value: PartValue::File {
                file_name: self.image.file_name.clone(),
                content_type: self.image.content_type.as_str().to_string(),
                bytes: self.image.bytes.clone(),
            },
        });
        Ok(RequestBody::Multipart(parts))
    }
}

/// Static description of one backend resource.
///
/// [`crate::api::client::ResourceClient`] runs the same pipeline for every
/// implementor; only the types and names differ.
pub trait Resource: Send + Sync + 'static {
    const KIND: ResourceKind;
    /// Query parameter carrying the search text.
    const SEARCH_PARAM: &'static str = "search";

    type Model: Schema + Validate + Serialize + Send;
    type Summary: Schema + Validate + Serialize + Send;
    type Create: Schema + Validate + RequestPayload + Send;
    type Update: Schema + Validate + RequestPayload + Identified + Send;
}

pub struct Tags;
pub struct Equations;
pub struct Images;
pub struct Concepts;
pub struct Problems;
pub struct Variants;

impl Resource for Tags {
    const KIND: ResourceKind = ResourceKind::Tag;
    const SEARCH_PARAM: &'static str = "tagName";
    type Model = Tag;
    type Summary = Tag;
    type Create = TagCreate;
    type Update = TagUpdate;
}

impl Resource for Equations {
    const KIND: ResourceKind = ResourceKind::Equation;
    type Model = Equation;
    type Summary = Equation;
    type Create = EquationCreate;
    type Update = EquationUpdate;
}

impl Resource for Images {
    const KIND: ResourceKind = ResourceKind::Image;
    type Model = Image;
    type Summary = Image;
    type Create = ImageCreate;
    type Update = ImageUpdate;
}

impl Resource for Concepts {
    const KIND: ResourceKind = ResourceKind::Concept;
    type Model = Concept;
    type Summary = ConceptShort;
    type Create = ConceptCreate;
    type Update = ConceptUpdate;
}

impl Resource for Problems {
    const KIND: ResourceKind = ResourceKind::Problem;
    type Model = Problem;
    type Summary = ProblemShort;
    type Create = ProblemCreate;
    type Update = ProblemUpdate;
}

impl Resource for Variants {
    const KIND: ResourceKind = ResourceKind::Variant;
    type Model = Variant;
    type Summary = Variant;
    type Create = NewVariant;
    type Update = VariantUpdate;
}
