//! JWT token handling

use crate::config::SecretKey;
use crate::error::Result;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default session lifetime (15 minutes)
pub const DEFAULT_SESSION_TTL_SECS: u64 = 900;

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Email of the authenticated user
    #[serde(rename = "email")]
    pub subject_identity: String,
    /// Expiration time, unix seconds
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl Claims {
    pub fn new(subject_identity: impl Into<String>, ttl_secs: u64, now: i64) -> Self {
        Self {
            subject_identity: subject_identity.into(),
            expires_at: now.saturating_add(i64::try_from(ttl_secs).unwrap_or(i64::MAX)),
        }
    }

    /// A token is live while `expires_at` is strictly in the future
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at <= now
    }

    /// Check if token is expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(chrono::Utc::now().timestamp())
    }
}

/// Why a token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Bad signature, wrong key, wrong algorithm, or a malformed token
    #[error("invalid token")]
    Invalid,
    /// Signature checks out but the token is past `exp`
    #[error("token expired")]
    Expired,
}

/// Issues and validates HS256-signed session tokens.
///
/// Tokens are stateless: validity depends only on the signature and `exp`.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &SecretKey) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against our own clock with exact-second precision
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.expose().as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.expose().as_bytes()),
            validation,
        }
    }

    /// Create a token for `identity` valid for `ttl_secs` from now
    pub fn issue(&self, identity: &str, ttl_secs: u64) -> Result<String> {
        self.issue_at(identity, ttl_secs, chrono::Utc::now().timestamp())
    }

    /// Create a token as if the current time were `now`
    pub fn issue_at(&self, identity: &str, ttl_secs: u64, now: i64) -> Result<String> {
        let claims = Claims::new(identity, ttl_secs, now);
        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Validate and decode a token
    pub fn validate(&self, token: &str) -> std::result::Result<Claims, TokenError> {
        self.validate_at(token, chrono::Utc::now().timestamp())
    }

    /// Validate a token against the clock value `now`
    pub fn validate_at(&self, token: &str, now: i64) -> std::result::Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                TokenError::Invalid
            })?;

        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}
