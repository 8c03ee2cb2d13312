use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tocsea_core::recommend::{ErrorResponse, ValidationError};

use crate::ai::ProviderError;

/// Errors surfaced by the HTTP API. Each maps to a status code and an
/// `{"error": ...}` body carrying the message verbatim.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    InvalidBody(String),

    #[error("{0}")]
    Provider(#[from] ProviderError),

    #[error("{0}")]
    Internal(String),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Error::Provider(_) => StatusCode::BAD_GATEWAY,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{status}: {self}");
        } else {
            log::warn!("{status}: {self}");
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
