//! Validation adapter
//!
//! Runs the schema capability over untrusted JSON, then the `validator`
//! rules of the parsed record, and converts the outcome into the crate
//! `Result`. Issues are flattened to `{dotted.path: [messages]}` and carried
//! in the error's `extra`; root issues become its `messages`.

use crate::Result;
use crate::error::CustomError;
use crate::schema::{IssueMap, Issues, Node, Schema, rules};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

pub const UUID_SCHEMA_ERROR: &str = "UuidSchemaError";

/// Validate a single value against `T`.
pub fn validate_schema<T: Schema + Validate>(data: &Value) -> Result<T> {
    let mut issues = Issues::default();
    let parsed = T::parse(Node::root(data, &mut issues));
    let output = finish(parsed, issues)?;
    output
        .validate()
        .map_err(|errors| CustomError::validation(rules::issue_map(&errors)))?;
    Ok(output)
}

/// Validate an array of `T`; issue paths start with the element index.
pub fn validate_schema_array<T: Schema + Validate>(data: &Value) -> Result<Vec<T>> {
    let mut issues = Issues::default();
    let parsed = Node::root(data, &mut issues).array::<T>("Should be an array");
    let items = finish(parsed, issues)?;

    let mut broken = IssueMap::new();
    for (index, item) in items.iter().enumerate() {
        if let Err(errors) = item.validate() {
            rules::collect_into(&errors, &index.to_string(), &mut broken);
        }
    }
    if broken.is_empty() {
        Ok(items)
    } else {
        Err(CustomError::validation(broken))
    }
}

fn finish<T>(parsed: Option<T>, issues: Issues) -> Result<T> {
    match parsed {
        Some(output) if issues.is_empty() => Ok(output),
        _ => {
            let (root, nested) = issues.flatten();
            Err(CustomError::validation_with(nested, root))
        }
    }
}

/// Validate an identifier before it is put into a URL.
pub fn validate_uuid(data: &Value, message: &str) -> Result<Uuid> {
    let mut issues = Issues::default();
    match <Uuid as Schema>::parse(Node::root(data, &mut issues)) {
        Some(id) => Ok(id),
        None => {
            let (mut root, _) = issues.flatten();
            if root.is_empty() {
                root.push("Invalid uuid".to_string());
            }
            let mut map = IssueMap::new();
            map.insert("id".to_string(), root);
            Err(CustomError::validation_with(map, vec![message.to_string()])
                .with_name(UUID_SCHEMA_ERROR))
        }
    }
}

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(CustomError::generic("URL cannot be empty"));
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CustomError::generic(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        )));
    }

    Ok(())
}
