//! CLI command implementations

use anyhow::{bail, Result};
use dialoguer::{theme::ColorfulTheme, Password};
use rand::{distr::Alphanumeric, Rng};
use std::fs;
use std::path::Path;

use crate::auth::password::{MAX_COST, MIN_COST};
use crate::auth::{DeploymentMode, PasswordHasher, TokenService};
use crate::cli::{
    error, format_status, info, print_token_table, success, warn, OutputFormat, TokenAction,
    TokenReport,
};
use crate::config::{self, loader::CONFIG_FILENAME, Config, SECRET_ENV};

/// Length of the secrets generated by `init`
const GENERATED_SECRET_LEN: usize = 48;

/// Initialize a new authpad.toml configuration file
pub async fn init(force: bool) -> Result<()> {
    let config_path = Path::new(CONFIG_FILENAME);

    if config_path.exists() && !force {
        warn(&format!("{} already exists (use --force to overwrite)", CONFIG_FILENAME));
        return Ok(());
    }

    fs::write(config_path, config::loader::default_config_content())?;
    success(&format!("Created {}", CONFIG_FILENAME));

    info("Export a signing secret before running 'authpad serve':");
    println!("  export {}={}", SECRET_ENV, generate_secret());

    Ok(())
}

/// Start the HTTP API server
pub async fn serve(
    config_path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
    mode: Option<DeploymentMode>,
) -> Result<()> {
    let mut config = load_config(config_path)?;

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(mode) = mode {
        config.auth.mode = mode;
    }

    info(&format!(
        "Starting server at http://{}:{}",
        config.server.host, config.server.port
    ));

    if let Err(e) = crate::api::run_server(config).await {
        error(&format!("Server failed: {}", e));
        return Err(e.into());
    }
    Ok(())
}

/// Prompt for a password and print its bcrypt hash
pub async fn hash_password(config_path: Option<&Path>, cost: Option<u32>) -> Result<()> {
    let config = load_config(config_path)?;
    let cost = cost.unwrap_or_else(|| config.auth.effective_bcrypt_cost());
    if !(MIN_COST..=MAX_COST).contains(&cost) {
        bail!("cost must be between {} and {}", MIN_COST, MAX_COST);
    }

    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    let hash = PasswordHasher::new(cost).hash_blocking(password).await?;
    println!("{}", hash);
    Ok(())
}

/// Token management commands
pub async fn token(config_path: Option<&Path>, action: TokenAction) -> Result<()> {
    let config = load_config(config_path)?;
    let tokens = TokenService::new(config.secret()?);

    match action {
        TokenAction::Issue { email, ttl } => {
            if email.is_empty() {
                bail!("email must not be empty");
            }
            let ttl = ttl.unwrap_or(config.auth.session_ttl_secs);
            let token = tokens.issue(&email, ttl)?;
            println!("{}", token);
        }
        TokenAction::Inspect { token, format } => {
            let report = TokenReport::from_outcome(&tokens.validate(&token));
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&report)?),
                OutputFormat::Table => {
                    print_token_table(&report);
                    info(&format!("Token is {}", format_status(&report.status)));
                }
            }
        }
    }

    Ok(())
}

/// Random alphanumeric secret suitable for HS256 signing
pub fn generate_secret() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_SECRET_LEN)
        .map(char::from)
        .collect()
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    Ok(config::resolve_config(path)?)
}
