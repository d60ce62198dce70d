use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, TrellisError>;

#[derive(Debug, Error)]
pub enum TrellisError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("parse failed: {0}")]
    Parse(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub operation: String,
    pub trace_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl TrellisError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "INVALID_URL",
            Self::Parse(_) => "PARSE_FAILED",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn to_payload(&self, operation: impl Into<String>) -> ErrorPayload {
        ErrorPayload {
            code: self.code().to_string(),
            message: self.to_string(),
            operation: operation.into(),
            trace_id: Uuid::new_v4().to_string(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable_per_variant() {
        assert_eq!(
            TrellisError::InvalidUrl("x".to_string()).code(),
            "INVALID_URL"
        );
        assert_eq!(TrellisError::Parse("x".to_string()).code(), "PARSE_FAILED");
        assert_eq!(
            TrellisError::Validation("x".to_string()).code(),
            "VALIDATION_FAILED"
        );
    }

    #[test]
    fn to_payload_carries_operation_and_trace_id() {
        let payload = TrellisError::Parse("bad document".to_string()).to_payload("aggregate");
        assert_eq!(payload.code, "PARSE_FAILED");
        assert_eq!(payload.operation, "aggregate");
        assert!(!payload.trace_id.is_empty());
        assert!(payload.message.contains("bad document"));
    }
}
