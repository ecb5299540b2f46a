use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use tracing::error;

/// JSON error response: `{"error": <title>, "message": <detail>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, message: Option<String>) -> Self {
        Self { status, title, message }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let status = StatusCode::from_u16(e.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let title = match &e {
            ServiceError::NotFound(_) => "Not Found",
            ServiceError::InvalidArgument(_) => "Invalid Argument",
            ServiceError::Validation(_) => "Validation Error",
            _ if status.is_client_error() => "Validation Error",
            _ => {
                error!(err = %e, "product store failure");
                "Internal Server Error"
            }
        };
        Self::new(status, title, Some(e.to_string()))
    }
}

impl JsonApiError {
    fn rejected(message: String) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(message))
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self { Self::rejected(r.body_text()) }
}

impl From<PathRejection> for JsonApiError {
    fn from(r: PathRejection) -> Self { Self::rejected(r.body_text()) }
}

impl From<QueryRejection> for JsonApiError {
    fn from(r: QueryRejection) -> Self { Self::rejected(r.body_text()) }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.title.to_string(), message: self.message };
        (self.status, Json(body)).into_response()
    }
}
