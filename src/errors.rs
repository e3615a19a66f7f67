use axum::response::IntoResponse;
use thiserror::Error;

use crate::domain::response::envelope::{EnvelopeError, ResponseEnvelope};

// Application error codes carried in the `error_code` field of the envelope
pub const ERR_INTERNAL: u32 = 0;
pub const ERR_VALIDATION: u32 = 300;
pub const ERR_NOT_FOUND: u32 = 301;
pub const ERR_BODY_PARSING: u32 = 302;

/// One captured failure, immutable once attached to an envelope.
///
/// `field` ties the error to an input field for client-side form display;
/// unnamed errors surface under the `general` bucket. `status` participates
/// in the envelope's status derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub field: Option<String>,
    pub code: u32,
    pub status: u16,
    pub message: String,
}

impl ErrorRecord {
    pub fn general(code: u32, status: u16, message: impl Into<String>) -> Self {
        Self {
            field: None,
            code,
            status,
            message: message.into(),
        }
    }

    pub fn for_field(field: impl Into<String>, code: u32, status: u16, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            code,
            status,
            message: message.into(),
        }
    }

    /// Wraps an unexpected failure so the client still receives a valid
    /// envelope instead of a bare 500 body.
    pub fn internal(error: impl std::fmt::Display) -> Self {
        Self::general(ERR_INTERNAL, 500, error.to_string())
    }
}

impl From<anyhow::Error> for ErrorRecord {
    fn from(error: anyhow::Error) -> Self {
        ErrorRecord::internal(error)
    }
}

/// Fans a validator report out into one record per failed field.
pub fn validation_records(errors: &validator::ValidationErrors) -> Vec<ErrorRecord> {
    let mut records = Vec::new();
    for (field, failures) in errors.field_errors() {
        for failure in failures.iter() {
            let message = failure
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("validation failed: {}", failure.code));
            records.push(ErrorRecord::for_field(
                field.to_string(),
                ERR_VALIDATION,
                422,
                message,
            ));
        }
    }
    records
}

#[allow(dead_code)]
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Body parsing error: {0}")]
    BodyParsingError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed")]
    Validation(#[from] validator::ValidationErrors),
}

/// Helper for mapping any unknown error into internal error
pub fn internal_error<E: ToString>(err: E) -> AppError {
    AppError::InternalServerError(err.to_string())
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::InternalServerError(error.to_string())
    }
}

impl From<EnvelopeError> for AppError {
    fn from(error: EnvelopeError) -> Self {
        AppError::InternalServerError(error.to_string())
    }
}

impl AppError {
    /// Envelope-ready records for this error; validation failures keep their
    /// per-field identity, everything else lands in the general bucket.
    pub fn records(&self) -> Vec<ErrorRecord> {
        match self {
            AppError::InternalServerError(_) => {
                vec![ErrorRecord::general(ERR_INTERNAL, 500, self.to_string())]
            }
            AppError::BodyParsingError(_) => {
                vec![ErrorRecord::general(ERR_BODY_PARSING, 400, self.to_string())]
            }
            AppError::NotFound(_) => {
                vec![ErrorRecord::general(ERR_NOT_FOUND, 404, self.to_string())]
            }
            AppError::Validation(errors) => validation_records(errors),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        ResponseEnvelope::new()
            .with_errors(self.records())
            .into_response()
    }
}
