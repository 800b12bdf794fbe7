//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::{Config, SecretKey, MODE_ENV, SECRET_ENV};

pub const CONFIG_FILENAME: &str = "authpad.toml";

/// Load configuration from authpad.toml
pub fn load_config() -> Result<Config> {
    let config_path = find_config_file()?;
    load_config_from_path(&config_path)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    parse_config(&content)
}

/// Parse configuration text after interpolating environment variables
pub fn parse_config(content: &str) -> Result<Config> {
    let content = interpolate_env_vars(content);
    let mut config: Config = toml::from_str(&content)?;

    // An unset "${JWT_SECRET}" interpolates to an empty string
    if config.auth.jwt_secret.as_ref().is_some_and(SecretKey::is_empty) {
        config.auth.jwt_secret = None;
    }

    Ok(config)
}

/// Resolve the configuration the server runs with: the given file, else
/// authpad.toml found upward from the current directory, else defaults.
/// Environment overrides are applied last.
pub fn resolve_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => load_config_from_path(path)?,
        None => match load_config() {
            Ok(config) => config,
            Err(Error::ConfigNotFound) => {
                tracing::debug!("No {} found, using defaults", CONFIG_FILENAME);
                Config::default()
            }
            Err(e) => return Err(e),
        },
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Apply `JWT_SECRET` and `AUTHPAD_MODE` from the environment
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Ok(secret) = env::var(SECRET_ENV) {
        if !secret.trim().is_empty() {
            config.auth.jwt_secret = Some(SecretKey::new(secret));
        }
    }

    if let Ok(mode) = env::var(MODE_ENV) {
        config.auth.mode = mode
            .parse()
            .map_err(|e| Error::Config(format!("{}: {}", MODE_ENV, e)))?;
    }

    Ok(())
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Result<PathBuf> {
    let mut current = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(Error::ConfigNotFound);
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // This regex is a compile-time constant, panicking is acceptable here
    // as it indicates a programming error in the codebase, not a runtime issue
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# Authpad Configuration

[server]
host = "0.0.0.0"
port = 3000

[auth]
# "development" sends the session cookie without HttpOnly/Secure so it can be
# inspected over plain HTTP. Use "production" for any real deployment.
mode = "development"

# Session token and cookie lifetime in seconds
session_ttl_secs = 900

cookie_name = "token"

# Bcrypt cost. Defaults to 4 in development and 12 in production.
# Production mode refuses anything below 10.
# bcrypt_cost = 12

# Token signing secret. Keep it out of this file.
jwt_secret = "${JWT_SECRET}"

# Unauthenticated GET /users listing, for debugging only
expose_user_listing = true
"#
}
