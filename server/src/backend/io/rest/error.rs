use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;

use crate::backend::domain::DomainError;

/// Domain failure rendered as `{ "error": ..., "code": ... }`
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Validation(_) | DomainError::InvalidDate(_) => StatusCode::BAD_REQUEST,
            DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match &self.0 {
            DomainError::NotFound { .. } => "NOT_FOUND",
            DomainError::Validation(_) => "INVALID_INPUT",
            DomainError::InvalidDate(_) => "INVALID_DATE",
            DomainError::Storage(_) => "INTERNAL_ERROR",
        }
    }
}

/// JSON body extractor whose rejections (malformed JSON, wrong field types
/// such as a fractional `recurAmount`) render as `INVALID_INPUT`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(DomainError::validation(rejection.body_text()))
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = match &self.0 {
            // Storage details stay in the logs
            DomainError::Storage(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        let body = ErrorResponse {
            error,
            code: self.code().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::TimeError;

    async fn body_of(err: DomainError) -> (StatusCode, ErrorResponse) {
        let response = ApiError::from(err).into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_error_mapping() {
        let (status, body) = body_of(DomainError::not_found("Chore", "chore::1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "NOT_FOUND");
        assert_eq!(body.error, "Chore not found: chore::1");

        let (status, body) = body_of(DomainError::validation("Plant name cannot be empty")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "INVALID_INPUT");

        let (status, body) =
            body_of(TimeError::InvalidDateFormat("31/12/2024".to_string()).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "INVALID_DATE");
        assert_eq!(body.error, "Invalid date format: 31/12/2024");
    }

    #[tokio::test]
    async fn test_storage_errors_are_redacted() {
        let (status, body) = body_of(anyhow::anyhow!("disk I/O error at /var/db").into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "INTERNAL_ERROR");
        assert!(!body.error.contains("/var/db"));
    }
}
