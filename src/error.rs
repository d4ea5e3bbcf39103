use crate::api::resources::ResourceKind;
use crate::schema::IssueMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Message used when a [`CustomError`] is built without any message.
pub const DEFAULT_ERR_MESSAGE: &str = "Default Err message";

/// Shared handle to the lower-level failure behind a [`CustomError`].
pub type Cause = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Closed set of error categories. Downstream code can match on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    Generic,
    Validation,
    Fetch,
    JsonDeserialize,
    Api,
    /// Superseded by [`ErrorKind::ApiModel`] for response bodies; still raised
    /// when a server error payload cannot be read.
    Parse,
    ApiModel,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 7] = [
        ErrorKind::Generic,
        ErrorKind::Validation,
        ErrorKind::Fetch,
        ErrorKind::JsonDeserialize,
        ErrorKind::Api,
        ErrorKind::Parse,
        ErrorKind::ApiModel,
    ];

    /// Wire discriminant
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Generic => "generic",
            ErrorKind::Validation => "validation",
            ErrorKind::Fetch => "fetch",
            ErrorKind::JsonDeserialize => "json-deserialize",
            ErrorKind::Api => "api",
            ErrorKind::Parse => "parse",
            ErrorKind::ApiModel => "api-model",
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorKind::Generic => "Generic Error",
            ErrorKind::Validation => "Validation Error",
            ErrorKind::Fetch => "Fetch Error",
            ErrorKind::JsonDeserialize => "Json Deserialize Error",
            ErrorKind::Api => "Api Error",
            ErrorKind::Parse => "Parse Error",
            ErrorKind::ApiModel => "Api Model Error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single error type of the pipeline.
///
/// Every constructor keeps `messages` non-empty and `message == messages[0]`.
/// `extra` maps dotted field paths to issue lists for validation-like kinds
/// and holds structured server context for API kinds.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct CustomError {
    kind: ErrorKind,
    message: String,
    messages: Vec<String>,
    extra: Map<String, Value>,
    #[source]
    cause: Option<Cause>,
    name: Option<String>,
    resource: Option<ResourceKind>,
}

/// The error body the backend sends with HTTP status >= 400.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub http_code: u16,
    pub error_code: i64,
    pub title: String,
    pub error: String,
    pub href: String,
}

/// Serialized form of a [`CustomError`], as exchanged with other services.
#[derive(Debug, Serialize, Deserialize)]
struct ErrorWire {
    success: bool,
    #[serde(rename = "type")]
    kind: ErrorKind,
    message: String,
    messages: Vec<String>,
    extra: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cause: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

/// Why a payload could not be read as a serialized [`CustomError`].
#[derive(Debug, Error)]
pub enum WirePayloadError {
    #[error("error payload has the wrong shape: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("error payload must carry `success: false`")]
    SuccessFlag,
    #[error("error payload must carry at least one message")]
    NoMessages,
}

/// A cause that arrived over the wire and only exists as JSON.
#[derive(Debug)]
pub struct RemoteCause(pub Value);

impl fmt::Display for RemoteCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(text) => f.write_str(text),
            other => write!(f, "{}", other),
        }
    }
}

impl std::error::Error for RemoteCause {}

impl CustomError {
    /// Base constructor. Missing or empty `messages` become `["Default Err message"]`.
    pub fn new(
        kind: ErrorKind,
        extra: Option<Map<String, Value>>,
        messages: Option<Vec<String>>,
    ) -> Self {
        let messages = messages
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_ERR_MESSAGE.to_string()]);
        Self::build(kind, extra.unwrap_or_default(), messages)
    }

    fn build(kind: ErrorKind, extra: Map<String, Value>, mut messages: Vec<String>) -> Self {
        if messages.is_empty() {
            messages.push(kind.default_message().to_string());
        }
        Self {
            kind,
            message: messages[0].clone(),
            messages,
            extra,
            cause: None,
            name: None,
            resource: None,
        }
    }

    /// Derive a typed error from a lower-level failure, keeping it as the cause.
    pub fn from_error<E>(kind: ErrorKind, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let mut built = Self::build(kind, Map::new(), vec![error.to_string()]);
        built.name = Some(short_type_name::<E>().to_string());
        built.cause = Some(Arc::new(error));
        built
    }

    /// Copy every field of another taxonomy error.
    pub fn from_self(other: &CustomError) -> Self {
        other.clone()
    }

    pub fn generic(message: impl Into<String>) -> Self {
        Self::build(ErrorKind::Generic, Map::new(), vec![message.into()])
    }

    /// Caller input failed our own schema.
    pub fn validation(issues: IssueMap) -> Self {
        Self::build(ErrorKind::Validation, issues_to_extra(issues), Vec::new())
    }

    pub fn validation_with(issues: IssueMap, messages: Vec<String>) -> Self {
        Self::build(ErrorKind::Validation, issues_to_extra(issues), messages)
    }

    pub fn fetch<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::from_error(ErrorKind::Fetch, error)
    }

    pub fn json_deserialize<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::from_error(ErrorKind::JsonDeserialize, error)
    }

    /// Build the error for a response with status >= 400.
    ///
    /// A backend error body becomes [`ErrorKind::Api`] with `messages[0]` set to
    /// its `error` field. Anything else is read through [`CustomError::parse_error`].
    pub fn api(status: u16, body: &Value) -> Self {
        match ApiErrorBody::deserialize(body) {
            Ok(api) => {
                let mut extra = match body {
                    Value::Object(map) => map.clone(),
                    _ => Map::new(),
                };
                extra.insert("status".to_string(), Value::from(status));
                Self::build(ErrorKind::Api, extra, vec![api.error])
            }
            Err(_) => Self::parse_error(body).with_extra("status", Value::from(status)),
        }
    }

    pub fn parse(messages: Vec<String>) -> Self {
        Self::build(ErrorKind::Parse, Map::new(), messages)
    }

    pub fn api_model(issues: IssueMap, message: impl Into<String>) -> Self {
        Self::build(
            ErrorKind::ApiModel,
            issues_to_extra(issues),
            vec![message.into()],
        )
    }

    /// Re-tag a validation failure of server output as schema drift.
    pub fn api_model_from_validation(error: CustomError, message: impl Into<String>) -> Self {
        let mut promoted = Self::build(ErrorKind::ApiModel, error.extra, vec![message.into()]);
        promoted.resource = error.resource;
        promoted
    }

    /// Interpret a decoded JSON value as a serialized taxonomy error.
    ///
    /// Never fails: a payload that does not match the wire schema yields an
    /// [`ErrorKind::Parse`] error carrying the payload and the mismatch.
    ///
    /// The wire `message` is not trusted on its own: the result's `message`
    /// is always `messages[0]`, so a payload whose two fields disagree is
    /// normalized to its `messages` list.
    pub fn parse_error(raw: &Value) -> Self {
        match Self::read_wire(raw) {
            Ok(error) => error,
            Err(mismatch) => {
                let mut extra = Map::new();
                extra.insert("payload".to_string(), raw.clone());
                let mut error = Self::build(
                    ErrorKind::Parse,
                    extra,
                    vec!["Error payload did not match the error schema".to_string()],
                );
                error.cause = Some(Arc::new(mismatch));
                error
            }
        }
    }

    fn read_wire(raw: &Value) -> Result<Self, WirePayloadError> {
        let wire = ErrorWire::deserialize(raw)?;
        if wire.success {
            return Err(WirePayloadError::SuccessFlag);
        }
        if wire.messages.is_empty() {
            return Err(WirePayloadError::NoMessages);
        }

        let mut error = Self::build(wire.kind, wire.extra, wire.messages);
        error.name = wire.name;
        error.cause = wire
            .cause
            .filter(|c| !c.is_null())
            .map(|c| Arc::new(RemoteCause(c)) as Cause);
        Ok(error)
    }

    /// Serialize into the wire shape accepted by [`CustomError::parse_error`].
    pub fn to_wire(&self) -> Value {
        let wire = ErrorWire {
            success: false,
            kind: self.kind,
            message: self.message.clone(),
            messages: self.messages.clone(),
            extra: self.extra.clone(),
            cause: self.cause.as_ref().map(|c| Value::String(c.to_string())),
            name: self.name.clone(),
        };
        serde_json::to_value(wire).unwrap_or(Value::Null)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_resource(mut self, resource: ResourceKind) -> Self {
        self.resource = Some(resource);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn resource(&self) -> Option<ResourceKind> {
        self.resource
    }

    /// HTTP status of the response that produced this error, if any.
    pub fn status(&self) -> Option<u16> {
        self.extra
            .get("status")
            .and_then(Value::as_u64)
            .and_then(|s| u16::try_from(s).ok())
    }

    /// Entries of `extra` that are lists of issue strings, keyed by field path.
    pub fn field_errors(&self) -> IssueMap {
        self.extra
            .iter()
            .filter_map(|(path, value)| {
                let list = value.as_array()?;
                let issues: Vec<String> = list
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect();
                (!issues.is_empty() && issues.len() == list.len())
                    .then(|| (path.clone(), issues))
            })
            .collect()
    }

    /// Client and server disagree on a data shape.
    pub fn is_schema_drift(&self) -> bool {
        matches!(self.kind, ErrorKind::ApiModel | ErrorKind::Parse)
    }
}

impl Serialize for CustomError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

fn issues_to_extra(issues: IssueMap) -> Map<String, Value> {
    issues
        .into_iter()
        .map(|(path, list)| {
            let values = list.into_iter().map(Value::String).collect();
            (path, Value::Array(values))
        })
        .collect()
}

fn short_type_name<E>() -> &'static str {
    let full = std::any::type_name::<E>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl CustomError {
    pub fn severity(&self) -> ErrorSeverity {
        match self.kind {
            ErrorKind::ApiModel | ErrorKind::Parse => ErrorSeverity::Critical,
            ErrorKind::Fetch | ErrorKind::JsonDeserialize => ErrorSeverity::High,
            ErrorKind::Api => match self.status() {
                Some(status) if status >= 500 => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            ErrorKind::Generic => ErrorSeverity::Medium,
            ErrorKind::Validation => ErrorSeverity::Low,
        }
    }

    pub fn display_friendly(&self) -> String {
        match (self.kind, self.resource) {
            (ErrorKind::Validation, Some(resource)) => {
                format!("Invalid {} input: {}", resource.label(), self.message)
            }
            (ErrorKind::ApiModel, _) => {
                format!("Server response out of sync with client: {}", self.message)
            }
            (ErrorKind::Fetch, _) => format!("Could not reach the API: {}", self.message),
            (ErrorKind::Api, _) => match self.status() {
                Some(status) => format!("API error {}: {}", status, self.message),
                None => format!("API error: {}", self.message),
            },
            _ => self.message.clone(),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self.kind {
            ErrorKind::Fetch => {
                Some("Check that the API host and port in your profile are reachable".to_string())
            }
            ErrorKind::ApiModel | ErrorKind::Parse => Some(
                "Client and server schemas differ; deploy matching versions and report this"
                    .to_string(),
            ),
            ErrorKind::Api if self.status() == Some(401) || self.status() == Some(403) => {
                Some("Set CMS_API_KEY or pass --api-key".to_string())
            }
            ErrorKind::Validation if !self.field_errors().is_empty() => {
                Some("Fix the fields listed above and try again".to_string())
            }
            _ => None,
        }
    }
}

/// Failure shape handed to form handlers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormError {
    Validation {
        messages: Vec<String>,
        data: IssueMap,
    },
    Generic {
        messages: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFailure {
    pub http_code: u16,
    pub error: FormError,
}

impl CustomError {
    pub fn into_form_failure(self) -> FormFailure {
        let http_code = match self.kind {
            ErrorKind::Validation => 400,
            ErrorKind::Api => self.status().unwrap_or(500),
            ErrorKind::ApiModel | ErrorKind::Parse => 502,
            _ => 500,
        };
        let error = match self.kind {
            ErrorKind::Validation => FormError::Validation {
                data: self.field_errors(),
                messages: self.messages,
            },
            _ => FormError::Generic {
                messages: self.messages,
            },
        };
        FormFailure { http_code, error }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration save failed: {message}")]
    ConfigSaveFailed { message: String },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
    #[error("Unknown configuration key '{key}'")]
    UnknownKey { key: String },
    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

impl From<StorageError> for CustomError {
    fn from(error: StorageError) -> Self {
        CustomError::from_error(ErrorKind::Generic, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io;

    #[test]
    fn test_new_defaults_messages() {
        let err = CustomError::new(ErrorKind::Generic, None, None);
        assert_eq!(err.messages(), ["Default Err message"]);
        assert_eq!(err.message(), "Default Err message");

        let err = CustomError::new(ErrorKind::Generic, None, Some(Vec::new()));
        assert_eq!(err.messages(), ["Default Err message"]);
    }

    #[test]
    fn test_kind_constructors_keep_messages_non_empty() {
        let err = CustomError::validation(IssueMap::new());
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.messages(), ["Validation Error"]);

        let err = CustomError::parse(Vec::new());
        assert_eq!(err.message(), "Parse Error");
    }

    #[test]
    fn test_error_kind_wire_names() {
        let names: Vec<String> = ErrorKind::ALL
            .iter()
            .map(|k| serde_json::to_value(k).unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            [
                "generic",
                "validation",
                "fetch",
                "json-deserialize",
                "api",
                "parse",
                "api-model"
            ]
        );
        for kind in ErrorKind::ALL {
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
        }
    }

    #[test]
    fn test_from_error_keeps_cause() {
        let io_err = io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused");
        let err = CustomError::from_error(ErrorKind::Fetch, io_err);

        assert_eq!(err.kind(), ErrorKind::Fetch);
        assert_eq!(err.messages(), ["connection refused"]);
        assert_eq!(err.name(), Some("Error"));
        let cause = err.cause().and_then(|c| c.downcast_ref::<io::Error>());
        assert_eq!(
            cause.map(|c| c.kind()),
            Some(io::ErrorKind::ConnectionRefused)
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_from_self_copies_all_fields() {
        let mut issues = IssueMap::new();
        issues.insert("title".to_string(), vec!["Should be string".to_string()]);
        let original = CustomError::validation(issues)
            .with_name("TagCreateSchemaError")
            .with_resource(ResourceKind::Tag);

        let copy = CustomError::from_self(&original);
        assert_eq!(copy.kind(), original.kind());
        assert_eq!(copy.messages(), original.messages());
        assert_eq!(copy.extra(), original.extra());
        assert_eq!(copy.name(), Some("TagCreateSchemaError"));
        assert_eq!(copy.resource(), Some(ResourceKind::Tag));
    }

    #[test]
    fn test_api_error_from_backend_body() {
        let body = json!({
            "httpCode": 404,
            "errorCode": 1,
            "title": "t",
            "error": "not found",
            "href": ""
        });
        let err = CustomError::api(404, &body);

        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.messages()[0], "not found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.extra().get("title"), Some(&json!("t")));
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_api_error_falls_back_to_wire_error() {
        let body = json!({
            "success": false,
            "type": "validation",
            "message": "Tag create schema error",
            "messages": ["Tag create schema error"],
            "extra": { "title": ["Should be string"] }
        });
        let err = CustomError::api(400, &body);
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.field_errors()["title"], ["Should be string"]);
    }

    #[test]
    fn test_parse_error_round_trips_wire_shape() {
        let mut issues = IssueMap::new();
        issues.insert("id".to_string(), vec!["The UUID is badly formatted.".to_string()]);
        let err = CustomError::validation_with(issues, vec!["Invalid id:uuid".to_string()])
            .with_name("UuidSchemaError");

        let parsed = CustomError::parse_error(&err.to_wire());
        assert_eq!(parsed.kind(), ErrorKind::Validation);
        assert_eq!(parsed.messages(), err.messages());
        assert_eq!(parsed.extra(), err.extra());
        assert_eq!(parsed.name(), Some("UuidSchemaError"));
    }

    #[test]
    fn test_parse_error_is_total() {
        let inputs = [
            Value::Null,
            json!(42),
            json!("oops"),
            json!([1, 2, 3]),
            json!({}),
            json!({"success": true, "type": "api", "message": "m", "messages": ["m"], "extra": {}}),
            json!({"success": false, "type": "teapot", "message": "m", "messages": ["m"], "extra": {}}),
            json!({"success": false, "type": "api", "message": "m", "messages": [], "extra": {}}),
            json!({"success": false, "type": "api", "message": "m", "messages": ["m"], "extra": []}),
        ];
        for input in inputs {
            let err = CustomError::parse_error(&input);
            assert_eq!(err.kind(), ErrorKind::Parse, "input: {}", input);
            assert_eq!(err.extra().get("payload"), Some(&input));
            assert!(err.cause().is_some());
        }

        let ok = json!({
            "success": false,
            "type": "fetch",
            "message": "boom",
            "messages": ["boom", "again"],
            "extra": {},
            "cause": "socket closed"
        });
        let err = CustomError::parse_error(&ok);
        assert_eq!(err.kind(), ErrorKind::Fetch);
        assert_eq!(err.messages(), ["boom", "again"]);
        assert_eq!(err.cause().map(|c| c.to_string()), Some("socket closed".to_string()));
    }

    #[test]
    fn test_parse_error_normalizes_message_to_first_entry() {
        let wire = json!({
            "success": false,
            "type": "api",
            "message": "stale summary",
            "messages": ["Tag not found", "Check the id"],
            "extra": {}
        });
        let err = CustomError::parse_error(&wire);
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.message(), "Tag not found");
        assert_eq!(err.messages(), ["Tag not found", "Check the id"]);
    }

    #[test]
    fn test_api_model_promotion_keeps_issues() {
        let mut issues = IssueMap::new();
        issues.insert("id".to_string(), vec!["The UUID is badly formatted.".to_string()]);
        let validation = CustomError::validation(issues).with_resource(ResourceKind::Tag);

        let promoted = CustomError::api_model_from_validation(validation, "Tag model out of sync");
        assert_eq!(promoted.kind(), ErrorKind::ApiModel);
        assert_eq!(promoted.messages(), ["Tag model out of sync"]);
        assert_eq!(promoted.field_errors()["id"], ["The UUID is badly formatted."]);
        assert_eq!(promoted.resource(), Some(ResourceKind::Tag));
        assert!(promoted.is_schema_drift());
        assert_eq!(promoted.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_severity_and_hints() {
        let err = CustomError::fetch(io::Error::other("down"));
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.troubleshooting_hint().is_some());

        let err = CustomError::api(503, &json!({"httpCode": 503, "errorCode": 9, "title": "", "error": "busy", "href": ""}));
        assert_eq!(err.severity(), ErrorSeverity::High);

        let err = CustomError::generic("plain");
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.troubleshooting_hint().is_none());
        assert_eq!(err.display_friendly(), "plain");
        assert_eq!(format!("{}", err), "generic: plain");
    }

    #[test]
    fn test_form_failure_shapes() {
        let mut issues = IssueMap::new();
        issues.insert("title".to_string(), vec!["Should not be empty".to_string()]);
        let failure = CustomError::validation(issues).into_form_failure();
        assert_eq!(failure.http_code, 400);
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({
                "httpCode": 400,
                "error": {
                    "type": "VALIDATION",
                    "messages": ["Validation Error"],
                    "data": { "title": ["Should not be empty"] }
                }
            })
        );

        let failure = CustomError::api_model(IssueMap::new(), "Tag model out of sync").into_form_failure();
        assert_eq!(failure.http_code, 502);
        assert!(matches!(failure.error, FormError::Generic { .. }));
    }

    #[test]
    fn test_storage_error_converts_to_generic() {
        let err: CustomError = StorageError::ConfigDirNotFound.into();
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.message(), "Configuration directory not found");
        assert_eq!(err.name(), Some("StorageError"));
    }
}
