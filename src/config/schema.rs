//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::auth::cookie::{DeploymentMode, DEFAULT_COOKIE_NAME};
use crate::auth::jwt::DEFAULT_SESSION_TTL_SECS;
use crate::auth::password::{MAX_COST, MIN_COST, MIN_PRODUCTION_COST};
use crate::error::{Error, Result};

/// Environment variable holding the token signing secret
pub const SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable selecting the deployment mode
pub const MODE_ENV: &str = "AUTHPAD_MODE";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

/// Server configuration for the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Authentication and session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub mode: DeploymentMode,

    /// Session token and cookie lifetime
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,

    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Bcrypt cost. Falls back to a per-mode default when unset.
    #[serde(default)]
    pub bcrypt_cost: Option<u32>,

    /// Signing secret, usually `"${JWT_SECRET}"`
    #[serde(default, skip_serializing)]
    pub jwt_secret: Option<SecretKey>,

    /// Mount the unauthenticated `GET /users` debug listing
    #[serde(default = "default_expose_user_listing")]
    pub expose_user_listing: bool,
}

fn default_session_ttl() -> u64 {
    DEFAULT_SESSION_TTL_SECS
}

fn default_cookie_name() -> String {
    DEFAULT_COOKIE_NAME.to_string()
}

fn default_expose_user_listing() -> bool {
    true
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: DeploymentMode::default(),
            session_ttl_secs: default_session_ttl(),
            cookie_name: default_cookie_name(),
            bcrypt_cost: None,
            jwt_secret: None,
            expose_user_listing: default_expose_user_listing(),
        }
    }
}

impl AuthConfig {
    /// Bcrypt cost to use: the configured value, or 4 in development and
    /// bcrypt's default in production.
    pub fn effective_bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.unwrap_or(match self.mode {
            DeploymentMode::Development => MIN_COST,
            DeploymentMode::Production => bcrypt::DEFAULT_COST,
        })
    }
}

/// Token signing secret. Never printed or serialized.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The raw secret, for key derivation only
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

impl Config {
    /// The signing secret, or `MissingSecret` if it is absent or blank
    pub fn secret(&self) -> Result<&SecretKey> {
        self.auth
            .jwt_secret
            .as_ref()
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| Error::MissingSecret(SECRET_ENV.to_string()))
    }

    /// Check everything the server needs before it starts
    pub fn validate(&self) -> Result<()> {
        self.secret()?;

        let cost = self.auth.effective_bcrypt_cost();
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(Error::Config(format!(
                "bcrypt_cost must be between {} and {}, got {}",
                MIN_COST, MAX_COST, cost
            )));
        }

        if self.auth.mode.is_production() && cost < MIN_PRODUCTION_COST {
            return Err(Error::Config(format!(
                "bcrypt_cost {} is too low for production (minimum {})",
                cost, MIN_PRODUCTION_COST
            )));
        }

        if self.auth.session_ttl_secs == 0 {
            return Err(Error::Config(
                "session_ttl_secs must be greater than zero".to_string(),
            ));
        }

        if self.auth.cookie_name.trim().is_empty() {
            return Err(Error::Config("cookie_name must not be empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret() -> Config {
        let mut config = Config::default();
        config.auth.jwt_secret = Some(SecretKey::new("s3cret"));
        config
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.session_ttl_secs, 900);
        assert_eq!(config.auth.cookie_name, "token");
        assert_eq!(config.auth.mode, DeploymentMode::Development);
        assert_eq!(config.auth.effective_bcrypt_cost(), 4);
    }

    #[test]
    fn test_missing_secret_fails() {
        let config = Config::default();
        assert!(matches!(config.validate(), Err(Error::MissingSecret(_))));

        let mut blank = Config::default();
        blank.auth.jwt_secret = Some(SecretKey::new("   "));
        assert!(matches!(blank.validate(), Err(Error::MissingSecret(_))));
    }

    #[test]
    fn test_production_cost_floor() {
        let mut config = config_with_secret();
        config.auth.mode = DeploymentMode::Production;
        assert_eq!(config.auth.effective_bcrypt_cost(), bcrypt::DEFAULT_COST);
        assert!(config.validate().is_ok());

        config.auth.bcrypt_cost = Some(4);
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_cost_range() {
        let mut config = config_with_secret();
        config.auth.bcrypt_cost = Some(3);
        assert!(config.validate().is_err());
        config.auth.bcrypt_cost = Some(32);
        assert!(config.validate().is_err());
        config.auth.bcrypt_cost = Some(8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut config = config_with_secret();
        config.auth.session_ttl_secs = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_secret_redacted_and_not_serialized() {
        let config = config_with_secret();
        assert!(!format!("{:?}", config).contains("s3cret"));

        let toml = toml::to_string(&config).unwrap();
        assert!(!toml.contains("s3cret"));
        assert!(!toml.contains("jwt_secret"));
    }
}
