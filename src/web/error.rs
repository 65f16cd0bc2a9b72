use crate::error::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

pub struct ApiError(Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, label) = match &self.0 {
            Error::Validation(_) => (StatusCode::BAD_REQUEST, "Bad Request"),
            Error::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            Error::Forbidden(_) => (StatusCode::FORBIDDEN, "Forbidden"),
            Error::NotFound { .. } => (StatusCode::NOT_FOUND, "Not Found"),
            Error::Duplicate { .. } => (StatusCode::CONFLICT, "Conflict"),
            Error::SlugExhausted { .. } | Error::Database(_) | Error::Pool(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };

        let message = if status.is_server_error() {
            tracing::error!("request failed: {:?}", self.0);
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        let body = serde_json::json!({
            "error": label,
            "message": message,
        });
        (status, Json(body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
