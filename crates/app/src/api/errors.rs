//! Storefront API errors.

use indexmap::IndexMap;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Field name mapped to the validation messages reported for it, in response order.
pub type FieldErrors = IndexMap<String, Vec<String>>;

/// Message used when a validation response carries no message of its own.
const DEFAULT_VALIDATION_MESSAGE: &str = "The given data was invalid.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication required")]
    Unauthenticated { message: Option<String> },

    #[error("access forbidden")]
    Forbidden { message: Option<String> },

    #[error("resource not found")]
    NotFound { message: Option<String> },

    #[error("validation failed: {message}")]
    Validation {
        status: u16,
        message: String,
        errors: FieldErrors,
    },

    #[error("server responded with status {status}")]
    Server {
        status: u16,
        status_text: Option<String>,
        message: Option<String>,
    },

    #[error("transport error")]
    Transport(#[source] reqwest::Error),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,

    #[serde(default)]
    errors: Option<Value>,
}

impl ApiError {
    /// Classify a non-success response from its status and raw body. Bodies that are not
    /// JSON are treated as empty.
    #[must_use]
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let body: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = body.message.filter(|message| !message.trim().is_empty());
        let errors = body.errors.as_ref().map(field_errors).unwrap_or_default();

        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthenticated { message },
            StatusCode::FORBIDDEN => Self::Forbidden { message },
            StatusCode::NOT_FOUND => Self::NotFound { message },
            status
                if status == StatusCode::UNPROCESSABLE_ENTITY
                    || (status.is_client_error() && !errors.is_empty()) =>
            {
                Self::Validation {
                    status: status.as_u16(),
                    message: message.unwrap_or_else(|| DEFAULT_VALIDATION_MESSAGE.to_string()),
                    errors,
                }
            }
            status => Self::Server {
                status: status.as_u16(),
                status_text: status.canonical_reason().map(str::to_string),
                message,
            },
        }
    }

    /// HTTP status of the failed response, when there was one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthenticated { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::Validation { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::Transport(error) => error.status().map(|status| status.as_u16()),
            Self::MalformedResponse(_) => None,
        }
    }

    /// Whether re-authenticating could resolve this error.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthenticated { .. } | Self::Forbidden { .. })
    }

    /// Message supplied by the server in the error body.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthenticated { message }
            | Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::Server { message, .. } => message.as_deref(),
            Self::Validation { message, .. } => Some(message),
            Self::Transport(_) | Self::MalformedResponse(_) => None,
        }
    }

    /// Validation messages reported for a single field.
    #[must_use]
    pub fn field_errors(&self, field: &str) -> &[String] {
        match self {
            Self::Validation { errors, .. } => errors.get(field).map(Vec::as_slice).unwrap_or_default(),
            _ => &[],
        }
    }

    /// Every validation message, field by field.
    #[must_use]
    pub fn validation_details(&self) -> Vec<&str> {
        match self {
            Self::Validation { errors, .. } => errors
                .values()
                .flatten()
                .map(String::as_str)
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::MalformedResponse(error.to_string())
        } else {
            Self::Transport(error)
        }
    }
}

fn field_errors(errors: &Value) -> FieldErrors {
    let Value::Object(fields) = errors else {
        return FieldErrors::new();
    };

    fields
        .iter()
        .map(|(field, messages)| {
            let messages = match messages {
                Value::String(message) => vec![message.clone()],
                Value::Array(messages) => messages
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
                _ => Vec::new(),
            };

            (field.clone(), messages)
        })
        .filter(|(_, messages)| !messages.is_empty())
        .collect()
}
