//! API route handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use super::server::SharedState;
use crate::auth::{Claims, Credentials, UserInfo};
use crate::error::{Error, Result};

// Request/Response types

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
    pub user: UserInfo,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<UserInfo>,
}

/// The validated session as echoed to the client
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionPayload {
    pub subject_identity: String,
    pub expires_at: i64,
}

impl From<Claims> for SessionPayload {
    fn from(claims: Claims) -> Self {
        Self {
            subject_identity: claims.subject_identity,
            expires_at: claims.expires_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProtectedResponse {
    pub message: String,
    pub payload: SessionPayload,
}

/// Unparseable bodies are reported the same way as absent fields
fn require_credentials(
    body: std::result::Result<Json<Credentials>, JsonRejection>,
) -> Result<(String, String)> {
    let credentials = match body {
        Ok(Json(credentials)) => credentials,
        Err(rejection) => {
            tracing::debug!("Rejected request body: {}", rejection);
            Credentials::default()
        }
    };

    credentials.into_parts().ok_or(Error::MissingCredentials)
}

// Health check

pub async fn health() -> impl IntoResponse {
    Json(MessageResponse::new("Server working!"))
}

// Account routes

pub async fn signup(
    State(state): State<SharedState>,
    body: std::result::Result<Json<Credentials>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let (email, password) = require_credentials(body)?;
    let user = state.auth.signup(&email, &password).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "user created".to_string(),
            user: user.into(),
        }),
    ))
}

pub async fn login(
    State(state): State<SharedState>,
    jar: CookieJar,
    body: std::result::Result<Json<Credentials>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let (email, password) = require_credentials(body)?;
    let session = state.auth.login(&email, &password).await?;

    let jar = jar.add(state.cookies.session_cookie(session.token));
    Ok((
        jar,
        Json(MessageResponse::new(format!("{} logged in", session.email))),
    ))
}

/// Debug listing of every stored account
pub async fn list_users(State(state): State<SharedState>) -> impl IntoResponse {
    let users = state
        .auth
        .store()
        .list()
        .await
        .into_iter()
        .map(UserInfo::from)
        .collect();

    Json(UsersResponse { users })
}

// Session routes

pub async fn protected(Extension(claims): Extension<Claims>) -> impl IntoResponse {
    Json(ProtectedResponse {
        message: format!("welcome {}", claims.subject_identity),
        payload: claims.into(),
    })
}
