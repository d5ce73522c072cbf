use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::table_client::TableError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing required fields: {0:?}")]
    MissingFields(Vec<&'static str>),

    #[error("missing required fields")]
    MissingCredentials,

    #[error("user with this email already exists")]
    EmailTaken,

    #[error("user not found")]
    UserNotFound,

    #[error("incorrect password")]
    IncorrectPassword,

    /// The remote table answered with a status the endpoint treats as failure.
    #[error("remote table error (status {status}): {message}")]
    Remote { status: u16, message: &'static str },

    #[error("remote table unreachable: {0}")]
    Table(#[from] TableError),

    #[error("unexpected record shape: {0}")]
    MalformedRecord(#[from] serde_json::Error),
}

impl AppError {
    pub fn remote(status: u16, message: &'static str) -> Self {
        AppError::Remote { status, message }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingFields(fields) => {
                let body = Json(json!({
                    "error": "missing required fields",
                    "fields": fields,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::MissingCredentials => (StatusCode::BAD_REQUEST, "missing required fields"),
            AppError::EmailTaken => (StatusCode::CONFLICT, "user with this email already exists"),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "user not found"),
            AppError::IncorrectPassword => (StatusCode::UNAUTHORIZED, "incorrect password"),
            AppError::Remote { status, message } => {
                tracing::warn!(status, "remote table failure: {message}");
                (
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                    *message,
                )
            }
            AppError::Table(e) => {
                tracing::error!("Remote table error: {e}");
                (StatusCode::BAD_GATEWAY, "remote store unavailable")
            }
            AppError::MalformedRecord(e) => {
                tracing::error!("Malformed remote record: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "unexpected response from the database",
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_missing_fields_lists_names() {
        let (status, body) = render(AppError::MissingFields(vec!["email", "username"])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "missing required fields");
        assert_eq!(body["fields"], json!(["email", "username"]));
    }

    #[tokio::test]
    async fn test_missing_credentials_has_no_field_list() {
        let (status, body) = render(AppError::MissingCredentials).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.get("fields").is_none());
    }

    #[tokio::test]
    async fn test_remote_keeps_remote_status() {
        let (status, body) = render(AppError::remote(503, "failed to create user")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, json!({"error": "failed to create user"}));
    }

    #[tokio::test]
    async fn test_remote_with_invalid_status_falls_back_to_bad_gateway() {
        let (status, _) = render(AppError::remote(42, "failed to delete user")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
