//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nutrition_planner_shared::{ErrorDetail, ErrorResponse, PlanError};
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid {field}: {message}")]
    InvalidField { field: String, message: String },

    /// Profile lacks the data needed to compute a BMR
    #[error("Profile incomplete: missing {}", .missing.join(", "))]
    IncompleteProfile { missing: Vec<String> },

    /// Profile is complete but its values give no usable BMR
    #[error("{0}")]
    UnusableProfile(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl From<PlanError> for ApiError {
    fn from(err: PlanError) -> Self {
        match err {
            PlanError::InsufficientProfile { missing } => ApiError::IncompleteProfile { missing },
            err @ PlanError::UnusableProfile { .. } => ApiError::UnusableProfile(err.to_string()),
            PlanError::InvalidGoal(msg) => ApiError::Validation(msg),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field = errors.field_errors().keys().next().map(|f| f.to_string());
        match field {
            Some(field) => ApiError::InvalidField {
                message: format!("{} is out of range", field),
                field,
            },
            None => ApiError::Validation(errors.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut field = None;
        let mut details = None;

        let (status, code, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            ApiError::InvalidField { field: name, message } => {
                field = Some(name.clone());
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message.clone())
            }
            ApiError::IncompleteProfile { missing } => {
                details = Some(serde_json::json!({ "missing_fields": missing }));
                (StatusCode::BAD_REQUEST, "PROFILE_INCOMPLETE", self.to_string())
            }
            ApiError::UnusableProfile(msg) => {
                (StatusCode::BAD_REQUEST, "PROFILE_UNUSABLE", msg.clone())
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::Database(err) => {
                error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
                details,
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_validation_error_status() {
        let error = ApiError::Validation("Invalid input".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_status() {
        let error = ApiError::NotFound("No active nutrition goal".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unauthorized_error_status() {
        let error = ApiError::Unauthorized("Invalid token".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_insufficient_profile_lists_missing_fields() {
        let error: ApiError = PlanError::insufficient(&["height", "sex"]).into();
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "PROFILE_INCOMPLETE");
        assert_eq!(
            body["error"]["details"]["missing_fields"],
            serde_json::json!(["height", "sex"])
        );
    }

    #[tokio::test]
    async fn test_unusable_profile_has_own_code() {
        let error: ApiError = PlanError::UnusableProfile {
            age: 150,
            weight_lbs: 50.0,
            height: "1'0\"".to_string(),
        }
        .into();
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "PROFILE_UNUSABLE");
        assert!(body["error"]["message"].as_str().unwrap().contains("age 150"));
        assert!(body["error"]["details"].is_null());
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let error = ApiError::Internal(anyhow::anyhow!("connection reset by peer"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "An internal error occurred");
    }

    #[test]
    fn test_invalid_goal_maps_to_validation() {
        let error: ApiError = PlanError::InvalidGoal("bad rate".to_string()).into();
        assert!(matches!(error, ApiError::Validation(msg) if msg == "bad rate"));
    }
}
