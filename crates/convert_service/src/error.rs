use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use html2go_core::ConversionError;
use thiserror::Error;

use crate::dto::ConversionResponse;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Invalid request format")]
    InvalidRequestFormat(#[source] serde_json::Error),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotImplemented(String),

    #[error("HTML to Go conversion error: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Error encoding response: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("File not found")]
    AssetNotFound(String),

    #[error("Unable to find index.html file")]
    AssetsUnavailable,

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::InvalidRequestFormat(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            AppError::Conversion(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::AssetNotFound(_) => StatusCode::NOT_FOUND,
            AppError::AssetsUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!(status = %status_code, error = %self, "request failed");
        } else {
            tracing::debug!(status = %status_code, error = %self, "request rejected");
        }
        HttpResponse::build(status_code).json(ConversionResponse::failure(self.to_string()))
    }
}
