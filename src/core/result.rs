use crate::api::resources::ResourceKind;
use crate::error::{CustomError, ErrorKind};
use log::{error, warn};

/// Extra combinators for `Result<T, CustomError>`.
///
/// Everything else (`is_ok`, `unwrap_or_else`, `?`, ...) is plain `Result`.
pub trait ResultExt<T> {
    /// Kind of the error, `None` on success.
    fn err_kind(&self) -> Option<ErrorKind>;

    fn is_err_kind(&self, kind: ErrorKind) -> bool;

    /// Tag the error with the resource it concerns.
    fn with_resource(self, resource: ResourceKind) -> Self;

    /// Promote a validation failure of server output to `ApiModel`.
    ///
    /// Other kinds pass through untouched.
    fn into_api_model(self, message: impl Into<String>) -> Self;

    /// Log a failure without consuming it.
    fn log_err(self, context: &str) -> Self;
}

impl<T> ResultExt<T> for Result<T, CustomError> {
    fn err_kind(&self) -> Option<ErrorKind> {
        self.as_ref().err().map(CustomError::kind)
    }

    fn is_err_kind(&self, kind: ErrorKind) -> bool {
        self.err_kind() == Some(kind)
    }

    fn with_resource(self, resource: ResourceKind) -> Self {
        self.map_err(|e| e.with_resource(resource))
    }

    fn into_api_model(self, message: impl Into<String>) -> Self {
        self.map_err(|e| match e.kind() {
            ErrorKind::Validation => {
                let promoted = CustomError::api_model_from_validation(e, message);
                error!(
                    "Schema drift: {} {:?}",
                    promoted.message(),
                    promoted.field_errors()
                );
                promoted
            }
            _ => e,
        })
    }

    fn log_err(self, context: &str) -> Self {
        if let Err(e) = &self {
            if e.is_schema_drift() {
                error!("{}: {}", context, e);
            } else {
                warn!("{}: {}", context, e);
            }
        }
        self
    }
}
