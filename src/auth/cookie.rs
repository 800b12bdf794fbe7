//! Session cookie policy

use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default session cookie name
pub const DEFAULT_COOKIE_NAME: &str = "token";

/// Deployment mode, which decides the cookie security flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    /// Cookie readable from scripts and sent over plain HTTP, for local testing
    #[default]
    Development,
    /// `HttpOnly` and `Secure` set
    Production,
}

impl DeploymentMode {
    pub fn is_production(&self) -> bool {
        matches!(self, DeploymentMode::Production)
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentMode::Development => write!(f, "development"),
            DeploymentMode::Production => write!(f, "production"),
        }
    }
}

impl FromStr for DeploymentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(DeploymentMode::Development),
            "production" | "prod" => Ok(DeploymentMode::Production),
            other => Err(format!("unknown deployment mode '{}'", other)),
        }
    }
}

/// Builds the session cookie that carries a signed token
#[derive(Debug, Clone)]
pub struct SessionCookiePolicy {
    name: String,
    mode: DeploymentMode,
    ttl_secs: u64,
}

impl SessionCookiePolicy {
    pub fn new(name: impl Into<String>, mode: DeploymentMode, ttl_secs: u64) -> Self {
        Self {
            name: name.into(),
            mode,
            ttl_secs,
        }
    }

    /// Cookie name the token is stored under
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> DeploymentMode {
        self.mode
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Session cookie for `token`: `Path=/`, `Max-Age` of the session TTL,
    /// `SameSite=Strict`, and `HttpOnly`/`Secure` only in production.
    pub fn session_cookie(&self, token: impl Into<String>) -> Cookie<'static> {
        let max_age = time::Duration::seconds(i64::try_from(self.ttl_secs).unwrap_or(i64::MAX));
        Cookie::build((self.name.clone(), token.into()))
            .path("/")
            .max_age(max_age)
            .http_only(self.mode.is_production())
            .same_site(SameSite::Strict)
            .secure(self.mode.is_production())
            .build()
    }
}
