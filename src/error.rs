//! Error types for Authpad

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::TokenError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("please provide your credentials")]
    MissingCredentials,

    #[error("user with email <{0}> already exist")]
    UserAlreadyExists(String),

    #[error("user with email <{0}> not found")]
    UserNotFound(String),

    #[error("invalid password")]
    InvalidPassword,

    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] TokenError),

    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Signing secret not set. Export {0} or set auth.jwt_secret in authpad.toml")]
    MissingSecret(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config file not found. Run 'authpad init' first.")]
    ConfigNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// HTTP status for this error when it reaches a handler boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingCredentials | Error::UserAlreadyExists(_) => StatusCode::BAD_REQUEST,
            Error::UserNotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidPassword | Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the error is an expected client outcome rather than a server fault
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            Error::Unauthorized(_) => "Unauthorized".to_string(),
            e if e.is_client_error() => e.to_string(),
            e => {
                tracing::error!("Request failed: {}", e);
                "internal server error".to_string()
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
