use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepoError;
use crate::domain::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),
    #[error("Unprocessable: {0}")]
    Unprocessable(String),
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "bad request",
            AppError::NotFound(_) => "resource not found",
            AppError::MethodNotAllowed(_) => "method not allowed",
            AppError::Unprocessable(_) => "unprocessable",
            AppError::Unavailable(_) => "service unavailable",
            AppError::Internal(_) => "internal server error",
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { .. } => AppError::NotFound(err.to_string()),
            RepoError::ForeignKey(_) => AppError::Unprocessable(err.to_string()),
            RepoError::Database(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::Unprocessable(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => AppError::Unprocessable(e.body_text()),
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::NotFound(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::Internal(detail) => {
                tracing::error!("{}", detail);
                json!({
                    "success": false,
                    "error": status.as_u16(),
                    "message": self.message(),
                })
            }
            AppError::BadRequest(detail)
            | AppError::NotFound(detail)
            | AppError::MethodNotAllowed(detail)
            | AppError::Unprocessable(detail)
            | AppError::Unavailable(detail) => {
                tracing::debug!(status = status.as_u16(), "{}", detail);
                json!({
                    "success": false,
                    "error": status.as_u16(),
                    "message": self.message(),
                    "detail": detail,
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_envelope() {
        let (status, body) = body_json(AppError::from(RepoError::NotFound {
            entity: "club",
            id: 7,
        }))
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 404);
        assert_eq!(body["message"], "resource not found");
        assert_eq!(body["detail"], "club 7 not found");
    }

    #[tokio::test]
    async fn test_foreign_key_is_unprocessable() {
        let (status, body) = body_json(AppError::from(RepoError::ForeignKey(
            "FOREIGN KEY constraint failed".to_string(),
        )))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], 422);
        assert_eq!(body["message"], "unprocessable");
    }

    #[tokio::test]
    async fn test_internal_hides_detail() {
        let (status, body) = body_json(AppError::Internal("disk I/O error".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "internal server error");
        assert!(body.get("detail").is_none());
    }

    #[tokio::test]
    async fn test_method_not_allowed_envelope() {
        let (status, body) =
            body_json(AppError::MethodNotAllowed("PUT /clubs/1".to_string())).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], 405);
        assert_eq!(body["message"], "method not allowed");
        assert_eq!(body["detail"], "PUT /clubs/1");
    }

    #[tokio::test]
    async fn test_blank_name_is_unprocessable() {
        let (status, _) =
            body_json(AppError::from(DomainError::BlankName { entity: "player" })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
