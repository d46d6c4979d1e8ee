//! Error taxonomy for API calls
//!
//! Every failure surfaced to the UI can be rendered as the uniform payload
//! `{success: false, error: {message, code, details?}}` the backend uses.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::validation::ValidationErrors;

/// Generic message shown when the backend did not provide one
pub const GENERIC_ERROR_MESSAGE: &str = "Une erreur est survenue";

/// Fallback message for failed sign-in attempts
pub const LOGIN_ERROR_MESSAGE: &str = "Erreur de connexion";

/// Inner part of the backend error envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Backend error envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub success: bool,
    pub error: ErrorBody,
}

impl ErrorPayload {
    pub fn new(message: impl Into<String>, code: u16) -> Self {
        Self {
            success: false,
            error: ErrorBody {
                message: message.into(),
                code,
                details: None,
            },
        }
    }

    /// Parse a response body as an error envelope, if it is one
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str::<Self>(body)
            .ok()
            .filter(|payload| !payload.success)
    }
}

/// Errors returned by the API client
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Backend answered with its error envelope
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        code: u16,
        details: Option<serde_json::Value>,
    },

    /// Non-success status without a recognisable error envelope
    #[error("request failed with status {status}")]
    Http { status: u16 },

    /// The bearer token was rejected
    #[error("session expired")]
    Unauthorized,

    /// The request never produced a response
    #[error("network error: {0}")]
    Network(String),

    /// A success response could not be decoded
    #[error("invalid response: {0}")]
    Decode(String),

    /// Input rejected before any request was sent
    #[error("invalid input")]
    Validation(ValidationErrors),

    /// Client-side token storage failed
    #[error("storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// Build an error from a non-success response
    pub fn from_response(status: u16, body: &str) -> Self {
        match ErrorPayload::parse(body) {
            Some(payload) => ApiError::Api {
                status,
                message: payload.error.message,
                code: payload.error.code,
                details: payload.error.details,
            },
            None if status == 401 => ApiError::Unauthorized,
            None => ApiError::Http { status },
        }
    }

    /// HTTP status, when the error came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } | ApiError::Http { status } => Some(*status),
            ApiError::Unauthorized => Some(401),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Failures worth one more attempt: lost connections and 5xx answers
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Network(_) => true,
            _ => self.status().is_some_and(|s| s >= 500),
        }
    }

    /// Message provided by the backend, if any
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Api { message, .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// Message for a toast, falling back to `fallback`
    pub fn user_message_or(&self, fallback: &str) -> String {
        self.backend_message().unwrap_or(fallback).to_string()
    }

    /// Message for a toast, falling back to the generic message
    pub fn user_message(&self) -> String {
        self.user_message_or(GENERIC_ERROR_MESSAGE)
    }

    /// Render as the uniform error envelope
    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            ApiError::Api {
                message,
                code,
                details,
                ..
            } => ErrorPayload {
                success: false,
                error: ErrorBody {
                    message: message.clone(),
                    code: *code,
                    details: details.clone(),
                },
            },
            ApiError::Validation(errors) => ErrorPayload {
                success: false,
                error: ErrorBody {
                    message: GENERIC_ERROR_MESSAGE.to_string(),
                    code: 400,
                    details: serde_json::to_value(errors).ok(),
                },
            },
            other => ErrorPayload::new(other.to_string(), other.status().unwrap_or(0)),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_response_parses_envelope() {
        let body = json!({
            "success": false,
            "error": {
                "message": "Identifiants invalides",
                "code": 401,
                "details": { "detail": "No active account" }
            }
        })
        .to_string();

        let err = ApiError::from_response(401, &body);
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message(), "Identifiants invalides");
        match err {
            ApiError::Api { details, .. } => assert!(details.is_some()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_from_response_without_envelope() {
        assert_eq!(
            ApiError::from_response(500, "<html>oops</html>"),
            ApiError::Http { status: 500 }
        );
        assert_eq!(ApiError::from_response(401, ""), ApiError::Unauthorized);
    }

    #[test]
    fn test_success_true_is_not_an_error_envelope() {
        let body = json!({ "success": true, "error": { "message": "x", "code": 200 } });
        assert!(ErrorPayload::parse(&body.to_string()).is_none());
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ApiError::Network("connection refused".into());
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(err.user_message_or(LOGIN_ERROR_MESSAGE), LOGIN_ERROR_MESSAGE);

        let blank = ApiError::Api {
            status: 400,
            message: "  ".into(),
            code: 400,
            details: None,
        };
        assert_eq!(blank.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_transient_classification() {
        assert!(ApiError::Network("reset".into()).is_transient());
        assert!(ApiError::Http { status: 503 }.is_transient());
        assert!(!ApiError::Http { status: 404 }.is_transient());
        assert!(!ApiError::Unauthorized.is_transient());
        assert!(!ApiError::Decode("bad".into()).is_transient());
    }

    #[test]
    fn test_to_payload_shape() {
        let payload = ApiError::Http { status: 502 }.to_payload();
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["error"]["code"], json!(502));
        assert!(value["error"].get("details").is_none());
    }
}
