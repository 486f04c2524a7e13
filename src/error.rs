use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ValidationErrors;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("reqwest error")]
    ReqwestError(#[from] reqwest::Error),
    #[error("api responded with status {0}")]
    StatusError(reqwest::StatusCode),
    #[error("{message}")]
    ApiError {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("validation error")]
    ValidationError(ValidationErrors),
    #[error("token {0:?} cannot be stored in a cookie")]
    InvalidTokenError(String),
    #[error("token store is read-only")]
    ReadOnlyStoreError,
    #[error("configuration error: {0}")]
    ConfigError(String),
    #[error("template error")]
    TemplateError(#[from] minijinja::Error),
    #[error("io operation error")]
    IoError(#[from] std::io::Error),
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        let status = match &self {
            PortalError::ReqwestError(_)
            | PortalError::StatusError(_)
            | PortalError::ApiError { .. }
            | PortalError::InvalidTokenError(_) => StatusCode::BAD_GATEWAY,
            PortalError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PortalError::ReadOnlyStoreError
            | PortalError::ConfigError(_)
            | PortalError::TemplateError(_)
            | PortalError::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
