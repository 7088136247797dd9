use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::schema::{ValidationErrors, VALIDATION_FAILED};
use crate::users::dto::{MessageResponse, ValidationResponse};
use crate::users::store::StoreError;

pub const DUPLICATE_EMAIL: &str = "Sorry. That email already exists.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Sorry. That email already exists.")]
    DuplicateEmail,

    #[error("User {0} does not exist")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound(id.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::DuplicateEmail => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate(_) => ApiError::DuplicateEmail,
            StoreError::Missing(id) => ApiError::not_found(id),
            StoreError::Database(e) => ApiError::Internal(e.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Validation(v) => (
                status,
                Json(ValidationResponse {
                    message: VALIDATION_FAILED.to_string(),
                    errors: v.errors,
                }),
            )
                .into_response(),
            ApiError::DuplicateEmail => {
                (status, Json(MessageResponse::new(DUPLICATE_EMAIL))).into_response()
            }
            ApiError::NotFound(id) => (
                status,
                Json(MessageResponse::new(format!("User {id} does not exist"))),
            )
                .into_response(),
            ApiError::Internal(e) => {
                tracing::error!(error = ?e, "request failed");
                (status, Json(MessageResponse::new("Internal Server Error"))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_names_the_id() {
        let (status, body) = body_json(ApiError::not_found(999)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "User 999 does not exist");
    }

    #[tokio::test]
    async fn validation_lists_fields() {
        let mut errors = ValidationErrors::default();
        errors.add("username", "'username' is a required property");
        let (status, body) = body_json(errors.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], VALIDATION_FAILED);
        assert_eq!(body["errors"]["username"], "'username' is a required property");
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let (status, body) =
            body_json(ApiError::Internal(anyhow::anyhow!("connection refused"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal Server Error");
    }

    #[test]
    fn store_errors_map_to_api_errors() {
        assert!(matches!(
            ApiError::from(StoreError::Duplicate("a@b.c".into())),
            ApiError::DuplicateEmail
        ));
        assert!(matches!(
            ApiError::from(StoreError::Missing(4)),
            ApiError::NotFound(id) if id == "4"
        ));
        assert_eq!(
            ApiError::from(StoreError::Database(sqlx::Error::PoolTimedOut)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
