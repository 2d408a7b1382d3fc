//! # Binding Error Types
//!
//! Defines the errors the binding pipeline can surface and their HTTP
//! response conversions. Leverages thiserror for structured error handling
//! and Axum's IntoResponse for HTTP conversion.
//!
//! Two failure kinds are client-facing and must stay distinguishable
//! downstream: an invalid/missing parameter value (bad input, 400) and a
//! lookup miss (404). Everything else is a configuration or programmer
//! error surfaced as 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::repository::RepositoryError;

/// Errors raised while binding route parameters or reading bound models.
#[derive(Debug, Error)]
pub enum BindingError {
    /// The raw parameter value was empty. Named after the entity the
    /// parameter should have resolved to.
    #[error("The id for {entity} is not valid")]
    InvalidArgument { entity: String },

    /// The lookup matched no entity. Carries the raw id from the path,
    /// never the filter.
    #[error("Could not find {entity} with id {id}")]
    NotFound { entity: String, id: String },

    /// Persistence-layer failure, including a missing repository for a
    /// parameter key. Propagated unmodified.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The request carried no route model store; the binding middleware was
    /// not applied to this route.
    #[error("route model store missing from request; was the binding middleware applied?")]
    StoreUnavailable,

    /// A handler asked for a parameter the middleware never resolved.
    #[error("no route model bound for parameter '{param}'")]
    ModelNotBound { param: String },

    /// The stored entity does not deserialize into the requested type.
    #[error("route model for parameter '{param}' does not match the requested type")]
    ModelType { param: String },
}

impl BindingError {
    /// Create an InvalidArgument error naming the target entity type.
    pub fn invalid_argument(entity: impl Into<String>) -> Self {
        Self::InvalidArgument {
            entity: entity.into(),
        }
    }

    /// Create a NotFound error embedding the raw id from the path.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

impl IntoResponse for BindingError {
    fn into_response(self) -> Response {
        let (status_code, error_code) = match &self {
            BindingError::InvalidArgument { .. } => (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT"),

            BindingError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),

            BindingError::Repository(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "REPOSITORY_ERROR")
            }

            BindingError::StoreUnavailable => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORE_UNAVAILABLE")
            }

            BindingError::ModelNotBound { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "MODEL_NOT_BOUND")
            }

            BindingError::ModelType { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "MODEL_TYPE_MISMATCH")
            }
        };

        let error_response = json!({
            "error": {
                "code": error_code,
                "message": self.to_string()
            }
        });

        (status_code, Json(error_response)).into_response()
    }
}

/// Result type alias for binding operations.
pub type BindingResult<T> = Result<T, BindingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_message_names_the_entity() {
        let err = BindingError::invalid_argument("User");
        assert_eq!(err.to_string(), "The id for User is not valid");
    }

    #[test]
    fn not_found_message_embeds_the_raw_id() {
        let err = BindingError::not_found("Post", "1; DROP TABLE posts;--");
        assert_eq!(
            err.to_string(),
            "Could not find Post with id 1; DROP TABLE posts;--"
        );
    }

    #[test]
    fn status_codes_distinguish_client_errors_from_configuration_errors() {
        let invalid = BindingError::invalid_argument("User").into_response();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let missing = BindingError::not_found("User", "x").into_response();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let unknown =
            BindingError::from(RepositoryError::unknown_repository("team")).into_response();
        assert_eq!(unknown.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
