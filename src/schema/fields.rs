use super::{Node, Schema, UUID_MESSAGE, parse_hyphenated_uuid};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;
use validator::ValidateLength;

pub const MAX_UPLOAD_BYTES: usize = 3 * 1024 * 1024;

fn trimmed(node: Node<'_>) -> Option<String> {
    node.str("Should be string").map(|text| text.trim().to_string())
}

/// Trimmed title. Records bound it with `length(min = 3, max = 150)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Schema for Title {
    fn parse(node: Node<'_>) -> Option<Self> {
        trimmed(node).map(Title)
    }
}

impl ValidateLength<u64> for Title {
    fn length(&self) -> Option<u64> {
        Some(self.0.chars().count() as u64)
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed long text (content, descriptions, answers, hints), bounded at 2048 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Content(String);

impl Content {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Schema for Content {
    fn parse(node: Node<'_>) -> Option<Self> {
        trimmed(node).map(Content)
    }
}

impl ValidateLength<u64> for Content {
    fn length(&self) -> Option<u64> {
        Some(self.0.chars().count() as u64)
    }
}

/// Trimmed search text; may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchText(String);

impl SearchText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Schema for SearchText {
    fn parse(node: Node<'_>) -> Option<Self> {
        trimmed(node).map(SearchText)
    }
}

/// Related entity ids.
///
/// Forms send a comma separated string, API callers may send an array.
/// Missing, `null`, `""` and `[]` all mean no ids; an empty list goes
/// out as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UuidList(Vec<Uuid>);

impl UuidList {
    pub fn ids(&self) -> &[Uuid] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Uuid>> for UuidList {
    fn from(ids: Vec<Uuid>) -> Self {
        UuidList(ids)
    }
}

impl Schema for UuidList {
    fn parse(node: Node<'_>) -> Option<Self> {
        let parts: Vec<&str> = match node.value() {
            None | Some(Value::Null) => return Some(UuidList::default()),
            Some(Value::String(text)) if text.trim().is_empty() => {
                return Some(UuidList::default());
            }
            Some(Value::String(text)) => text.split(',').map(str::trim).collect(),
            Some(Value::Array(items)) => {
                let strings: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
                match strings {
                    Some(strings) => strings,
                    None => return node.fail(UUID_MESSAGE),
                }
            }
            _ => return node.fail("Should be string"),
        };

        let ids: Option<Vec<Uuid>> = parts.into_iter().map(parse_hyphenated_uuid).collect();
        match ids {
            Some(ids) => Some(UuidList(ids)),
            None => node.fail(UUID_MESSAGE),
        }
    }
}

impl Serialize for UuidList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.is_empty() {
            serializer.serialize_none()
        } else {
            self.0.serialize(serializer)
        }
    }
}

/// Stored image format as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageType {
    Png,
    Jpeg,
    Svg,
}

impl Schema for ImageType {
    fn parse(node: Node<'_>) -> Option<Self> {
        node.literal("image type must be Png, Jpg or Svg")
    }
}

/// Upload content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageMime {
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/svg+xml")]
    Svg,
}

impl ImageMime {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMime::Png => "image/png",
            ImageMime::Jpeg => "image/jpeg",
            ImageMime::Svg => "image/svg+xml",
        }
    }
}

impl Schema for ImageMime {
    fn parse(node: Node<'_>) -> Option<Self> {
        node.literal("image type must be image/png, image/jpeg or image/svg+xml")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "MCQ")]
    Mcq,
    #[serde(rename = "MCA")]
    Mca,
    Binary,
    FillBlank,
    Matching,
}

impl Schema for QuestionType {
    fn parse(node: Node<'_>) -> Option<Self> {
        node.literal("problem type must be MCQ, MCA, Binary, FillBlank or Matching")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    Image,
    Equation,
    Concept,
    Problem,
    #[serde(alias = "text")]
    String,
}

impl Schema for VariableType {
    fn parse(node: Node<'_>) -> Option<Self> {
        node.literal("variable type must be image, equation, concept, problem or string")
    }
}

/// An uploaded image: `{fileName, contentType, data}` with base64 `data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: ImageMime,
    pub bytes: Vec<u8>,
}

impl Schema for ImageFile {
    fn parse(node: Node<'_>) -> Option<Self> {
        if !matches!(node.value(), Some(Value::Object(_))) {
            return node.fail("Please select an image file.");
        }
        let mut object = node.object()?;

        let file_name: Option<String> = object.field("fileName");
        let content_type = match object.get("contentType") {
            Some(value @ Value::String(_)) => ImageMime::deserialize(value).ok(),
            _ => None,
        };
        if content_type.is_none() {
            object.issue("contentType", "Please select a JPEG, PNG or SVG file.");
        }

        let bytes = match object.get("data").and_then(Value::as_str) {
            Some(encoded) => match STANDARD.decode(encoded.trim()) {
                Ok(bytes) if bytes.len() > MAX_UPLOAD_BYTES => {
                    object.issue("data", "Please select a file smaller than 3 MB.");
                    None
                }
                Ok(bytes) => Some(bytes),
                Err(_) => {
                    object.issue("data", "File content should be base64 encoded");
                    None
                }
            },
            None => {
                object.issue("data", "Please select an image file.");
                None
            }
        };

        Some(ImageFile {
            file_name: file_name?,
            content_type: content_type?,
            bytes: bytes?,
        })
    }
}
