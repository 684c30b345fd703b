//! Error-to-response mapping for the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use shelter_core::ServiceError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// JSON body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failure raised by a request handler.
#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    /// The blocking store task did not complete.
    Worker(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Service(ServiceError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Service(ServiceError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Service(ServiceError::Repo(_)) | Self::Worker(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(ServiceError::Unavailable(_)) => {
                write!(f, "Brak połączenia z bazą danych")
            }
            Self::Service(ServiceError::Repo(_)) => write!(f, "Błąd bazy danych"),
            Self::Service(err) => write!(f, "{err}"),
            Self::Worker(_) => write!(f, "Błąd wewnętrzny serwera"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            Self::Worker(_) => None,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
