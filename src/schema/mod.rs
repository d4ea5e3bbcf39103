//! Schema capability
//!
//! Turns untrusted JSON into typed records. Unlike plain deserialization it
//! keeps going after the first failure and records every [`Issue`] with the
//! dotted path of the offending field, so forms can show per-field errors.
//!
//! Records implement [`Schema`]; most do it through [`object_schema!`].
//! Field rules (lengths, ranges, minimum list sizes) live on the records as
//! `validator` attributes and run once the shape is right, see [`rules`].

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Input field schemas (titles, content, id lists, ...)
pub mod fields;

/// Create/update/search payload schemas
pub mod inputs;

/// `validator` errors rendered into the issue map
pub mod rules;

/// Field path → issue messages, the flattened form of [`Issues`].
pub type IssueMap = BTreeMap<String, Vec<String>>;

pub const UUID_MESSAGE: &str = "The UUID is badly formatted.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Issues {
    entries: Vec<Issue>,
}

impl Issues {
    pub fn push(&mut self, path: &str, message: impl Into<String>) {
        self.entries.push(Issue {
            path: path.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Split into root messages (empty path) and the nested field map.
    pub fn flatten(self) -> (Vec<String>, IssueMap) {
        let mut root = Vec::new();
        let mut nested = IssueMap::new();
        for issue in self.entries {
            if issue.path.is_empty() {
                root.push(issue.message);
            } else {
                nested.entry(issue.path).or_default().push(issue.message);
            }
        }
        (root, nested)
    }
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// A position in the document being validated.
///
/// `value` is `None` when the field is missing altogether.
pub struct Node<'a> {
    value: Option<&'a Value>,
    path: String,
    issues: &'a mut Issues,
}

impl<'a> Node<'a> {
    pub fn root(value: &'a Value, issues: &'a mut Issues) -> Self {
        Self {
            value: Some(value),
            path: String::new(),
            issues,
        }
    }

    pub fn value(&self) -> Option<&'a Value> {
        self.value
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Missing or `null`
    pub fn is_absent(&self) -> bool {
        matches!(self.value, None | Some(Value::Null))
    }

    /// Record an issue at this node without consuming it.
    pub fn issue(&mut self, message: impl Into<String>) {
        self.issues.push(&self.path, message);
    }

    /// Record an issue at this node and give up on it.
    pub fn fail<T>(mut self, message: impl Into<String>) -> Option<T> {
        self.issue(message);
        None
    }

    pub fn parse<T: Schema>(self) -> Option<T> {
        T::parse(self)
    }

    pub fn str(self, message: &str) -> Option<&'a str> {
        match self.value {
            Some(Value::String(text)) => Some(text.as_str()),
            _ => self.fail(message),
        }
    }

    pub fn object(self) -> Option<Object<'a>> {
        match self.value {
            Some(Value::Object(map)) => Some(Object {
                map,
                path: self.path,
                issues: self.issues,
            }),
            _ => self.fail("Should be an object"),
        }
    }

    /// Parse every element; the result is `None` if any element failed.
    pub fn array<T: Schema>(self, message: &str) -> Option<Vec<T>> {
        let items = match self.value {
            Some(Value::Array(items)) => items,
            _ => return self.fail(message),
        };

        let Node { path, issues, .. } = self;
        let mut parsed = Vec::with_capacity(items.len());
        let mut complete = true;
        for (index, item) in items.iter().enumerate() {
            let child = Node {
                value: Some(item),
                path: join(&path, &index.to_string()),
                issues: &mut *issues,
            };
            match T::parse(child) {
                Some(value) => parsed.push(value),
                None => complete = false,
            }
        }
        complete.then_some(parsed)
    }

    /// String literal mapped through serde, e.g. `"Png"` into an enum variant.
    pub fn literal<T: DeserializeOwned>(self, message: &str) -> Option<T> {
        let parsed = match self.value {
            Some(value @ Value::String(_)) => T::deserialize(value).ok(),
            _ => None,
        };
        match parsed {
            Some(value) => Some(value),
            None => self.fail(message),
        }
    }
}

/// Field access on a JSON object node.
pub struct Object<'a> {
    map: &'a Map<String, Value>,
    path: String,
    issues: &'a mut Issues,
}

impl<'a> Object<'a> {
    /// Raw value of a key, without recording anything.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key)
    }

    pub fn field<T: Schema>(&mut self, key: &str) -> Option<T> {
        T::parse(self.node(key))
    }

    pub fn node(&mut self, key: &str) -> Node<'_> {
        Node {
            value: self.map.get(key),
            path: join(&self.path, key),
            issues: &mut *self.issues,
        }
    }

    pub fn issue(&mut self, key: &str, message: impl Into<String>) {
        let path = join(&self.path, key);
        self.issues.push(&path, message);
    }
}

/// A type that can be read out of untrusted JSON.
pub trait Schema: Sized {
    /// Returns `None` after recording at least one issue.
    fn parse(node: Node<'_>) -> Option<Self>;
}

impl Schema for String {
    fn parse(node: Node<'_>) -> Option<Self> {
        node.str("Should be string").map(str::to_string)
    }
}

impl Schema for bool {
    fn parse(node: Node<'_>) -> Option<Self> {
        match node.value() {
            Some(Value::Bool(flag)) => Some(*flag),
            _ => node.fail("Should be boolean"),
        }
    }
}

impl Schema for i64 {
    fn parse(node: Node<'_>) -> Option<Self> {
        match node.value().and_then(Value::as_i64) {
            Some(number) => Some(number),
            None => node.fail("Should be number"),
        }
    }
}

impl Schema for Uuid {
    fn parse(node: Node<'_>) -> Option<Self> {
        let text = node.value().and_then(Value::as_str);
        match text.and_then(parse_hyphenated_uuid) {
            Some(id) => Some(id),
            None => node.fail(UUID_MESSAGE),
        }
    }
}

impl Schema for DateTime<Utc> {
    fn parse(node: Node<'_>) -> Option<Self> {
        let text = node.value().and_then(Value::as_str);
        match text.and_then(|t| DateTime::parse_from_rfc3339(t).ok()) {
            Some(at) => Some(at.with_timezone(&Utc)),
            None => node.fail("Should be an RFC 3339 timestamp string"),
        }
    }
}

/// Nullish: a missing field or `null` reads as `None`.
impl<T: Schema> Schema for Option<T> {
    fn parse(node: Node<'_>) -> Option<Self> {
        if node.is_absent() {
            Some(None)
        } else {
            T::parse(node).map(Some)
        }
    }
}

impl<T: Schema> Schema for Vec<T> {
    fn parse(node: Node<'_>) -> Option<Self> {
        node.array("Should be an array")
    }
}

/// Only the canonical 8-4-4-4-12 form is accepted.
pub fn parse_hyphenated_uuid(text: &str) -> Option<Uuid> {
    if text.len() != 36 {
        return None;
    }
    Uuid::parse_str(text).ok()
}

/// Implement [`Schema`] for a plain struct by reading each field from its JSON key.
///
/// Every field is read before any failure is returned, so one pass reports
/// all issues of the object.
#[macro_export]
macro_rules! object_schema {
    ($ty:ident { $($field:ident : $key:literal),* $(,)? }) => {
        impl $crate::schema::Schema for $ty {
            fn parse(node: $crate::schema::Node<'_>) -> Option<Self> {
                let mut object = node.object()?;
                $(let $field = object.field($key);)*
                Some($ty { $($field: $field?,)* })
            }
        }
    };
}
