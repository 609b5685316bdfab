use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Body shape for every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}

/// Per-request failures, mapped to status codes by the `ResponseError` impl.
/// Startup failures are not represented here; they abort the process before
/// the server binds.
#[derive(Debug, Error)]
pub enum ApiError {
    /// JSON body did not match the request shape.
    #[error("{0}")]
    MalformedRequest(String),

    /// A field failed its domain check; carries the first violation.
    #[error("{0}")]
    DomainViolation(String),

    /// The predictor call (or its blocking dispatch) failed.
    #[error("Prediction error: {0}")]
    Prediction(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest(_) | ApiError::DomainViolation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Prediction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorDetail {
            detail: self.to_string(),
        })
    }
}
