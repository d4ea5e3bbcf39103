//! Field rules checked with `validator` once a record has the right shape.
//!
//! `#[validate(length(..))]` and `#[validate(range(..))]` without a message
//! are rendered into the form messages below; rules that carry their own
//! message keep it. Field names are reported with their camelCase JSON keys.

use super::IssueMap;
use serde_json::Value;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Flatten `errors` into dotted paths below `prefix`.
pub fn collect_into(errors: &ValidationErrors, prefix: &str, out: &mut IssueMap) {
    for (field, kind) in errors.errors() {
        let path = join(prefix, &camel_case(field));
        match kind {
            ValidationErrorsKind::Field(list) => {
                let messages = out.entry(path).or_default();
                for error in list {
                    messages.extend(describe(error));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_into(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_into(inner, &join(&path, &index.to_string()), out);
                }
            }
        }
    }
}

pub fn issue_map(errors: &ValidationErrors) -> IssueMap {
    let mut out = IssueMap::new();
    collect_into(errors, "", &mut out);
    out
}

/// Messages for one failed rule.
pub fn describe(error: &ValidationError) -> Vec<String> {
    if let Some(message) = &error.message {
        return vec![message.to_string()];
    }

    let number = |key: &str| error.params.get(key).and_then(Value::as_f64);
    let (min, max) = (number("min"), number("max"));
    let mut messages = Vec::new();

    match &*error.code {
        "length" => {
            let count = error
                .params
                .get("value")
                .and_then(Value::as_str)
                .map(|text| text.chars().count() as f64);
            if count == Some(0.0) {
                messages.push("Should not be empty".to_string());
            }
            if let Some(min) = min.filter(|min| count.is_none_or(|c| c < *min)) {
                messages.push(format!(
                    "Number of characters should be more than {}",
                    min - 1.0
                ));
            }
            if let Some(max) = max.filter(|max| count.is_none_or(|c| c > *max)) {
                messages.push(format!(
                    "Number of characters should be less than {}",
                    max + 1.0
                ));
            }
        }
        "range" => {
            let value = error.params.get("value").and_then(Value::as_f64);
            if let Some(min) = min.filter(|min| value.is_none_or(|v| v < *min)) {
                messages.push(format!("Number should be greater than {}", min - 1.0));
            }
            if let Some(max) = max.filter(|max| value.is_none_or(|v| v > *max)) {
                messages.push(format!("Number should be less than {}", max + 1.0));
            }
        }
        _ => {}
    }

    if messages.is_empty() {
        messages.push(format!("Failed rule: {}", error.code));
    }
    messages
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

// Rust field names to JSON keys: `correct_answers` -> `correctAnswers`.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn error(code: &'static str, params: Value) -> ValidationError {
        let mut error = ValidationError::new(code);
        if let Value::Object(params) = params {
            for (key, value) in params {
                error.add_param(key.into(), &value);
            }
        }
        error
    }

    #[test]
    fn test_camel_case_keys() {
        assert_eq!(camel_case("correct_answers"), "correctAnswers");
        assert_eq!(camel_case("title"), "title");
        assert_eq!(camel_case("problem_statement"), "problemStatement");
    }

    #[test]
    fn test_empty_text_reports_every_rule() {
        let messages = describe(&error("length", json!({ "min": 3, "max": 150, "value": "" })));
        assert_eq!(
            messages,
            [
                "Should not be empty",
                "Number of characters should be more than 2"
            ]
        );
    }

    #[test]
    fn test_long_text() {
        let long = "x".repeat(151);
        let messages = describe(&error("length", json!({ "min": 3, "max": 150, "value": long })));
        assert_eq!(messages, ["Number of characters should be less than 151"]);
    }

    #[test]
    fn test_range_sides() {
        let low = describe(&error("range", json!({ "min": 1, "max": 9999, "value": 0 })));
        assert_eq!(low, ["Number should be greater than 0"]);
        let high = describe(&error("range", json!({ "min": 1, "max": 9999, "value": 10000 })));
        assert_eq!(high, ["Number should be less than 10000"]);
    }

    #[test]
    fn test_explicit_message_wins() {
        let mut custom = ValidationError::new("length");
        custom.message = Some("At least one correct answer is required".into());
        assert_eq!(describe(&custom), ["At least one correct answer is required"]);
    }

    #[test]
    fn test_nested_paths() {
        let mut inner = ValidationErrors::new();
        inner.add("correct_answers", error("length", json!({ "min": 1 })));
        let mut errors = ValidationErrors::new();
        errors
            .errors_mut()
            .insert("variants".into(), ValidationErrorsKind::List([(0, Box::new(inner))].into()));

        let map = issue_map(&errors);
        assert_eq!(
            map["variants.0.correctAnswers"],
            ["Number of characters should be more than 0"]
        );
    }
}
