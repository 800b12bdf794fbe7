//! Authentication middleware and extractors

use crate::api::SharedState;
use crate::auth::{Claims, TokenError};
use crate::error::{Error, Result};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

/// Find the session token in the request: an `Authorization: Bearer` header
/// first, then the session cookie.
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string());
    if bearer.is_some() {
        return bearer;
    }

    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|cookie| cookie.value().to_string())
}

/// Extract and validate the session claims from a request
pub fn extract_claims_from_request(state: &SharedState, req: &Request) -> Result<Claims> {
    let token = extract_token(req.headers(), state.cookies.name()).ok_or_else(|| {
        tracing::debug!("No session token on {}", req.uri().path());
        Error::Unauthorized(TokenError::Invalid)
    })?;

    state.auth.authenticate(&token).map_err(|e| {
        match e {
            TokenError::Expired => tracing::warn!("Rejected expired token on {}", req.uri().path()),
            TokenError::Invalid => tracing::warn!("Rejected invalid token on {}", req.uri().path()),
        }
        Error::Unauthorized(e)
    })
}

/// Middleware for requiring a valid session. The validated [`Claims`] are
/// placed in the request extensions for the handler.
pub async fn require_auth(
    State(state): State<SharedState>,
    mut req: Request,
    next: Next,
) -> std::result::Result<Response, Error> {
    let claims = extract_claims_from_request(&state, &req)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
