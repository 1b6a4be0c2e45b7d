//! HTTP error mapping.
//!
//! Every engine/codec failure becomes a caller-visible JSON error envelope.
//! Caller faults (bad input, failed verification, too few shares, a
//! cryptographic mismatch) map to 400; unexpected primitive faults map to
//! 500 and are logged as system errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use recrypt_core::Error as CoreError;

use crate::protocol::ErrorResponse;

/// Wrapper that carries a core error across the handler boundary.
#[derive(Debug)]
pub struct ApiError(pub CoreError);

impl ApiError {
    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self.0 {
            CoreError::Encryption(_) | CoreError::Primitive(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Primitive failure while handling request");
        } else {
            tracing::debug!(error = %self.0, "Rejected request");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// Unwrap a required request field or fail with a 400.
pub fn require(name: &str, field: Option<String>) -> Result<String, ApiError> {
    field.ok_or_else(|| ApiError(CoreError::Input(format!("missing field `{name}`"))))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_faults_map_to_400() {
        let cases = [
            CoreError::Input("bad hex".to_string()),
            CoreError::KeyFragVerification,
            CoreError::CapsuleFragVerification,
            CoreError::InsufficientShares {
                supplied: 1,
                required: 2,
            },
            CoreError::Decryption("mismatch".to_string()),
        ];
        for err in cases {
            assert_eq!(ApiError(err).status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_primitive_faults_map_to_500() {
        let err = ApiError(CoreError::Primitive("boom".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let err = ApiError(CoreError::Encryption("boom".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_require_reports_the_field_name() {
        let err = require("capsule", None).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.0.to_string().contains("missing field `capsule`"));
    }

    #[test]
    fn test_require_passes_present_fields_through() {
        let value = require("capsule", Some("abcd".to_string())).unwrap();
        assert_eq!(value, "abcd");
    }
}
