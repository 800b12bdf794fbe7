//! CLI interface for Authpad

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::auth::DeploymentMode;

#[derive(Parser)]
#[command(name = "authpad")]
#[command(author = "Krakaw")]
#[command(version)]
#[command(about = "Minimal cookie-session authentication service", long_about = None)]
pub struct Cli {
    /// Path to authpad.toml (searched upward from the current directory by default)
    #[arg(short, long, global = true, env = "AUTHPAD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default authpad.toml and print a fresh signing secret
    Init {
        /// Overwrite an existing authpad.toml
        #[arg(short, long)]
        force: bool,
    },

    /// Start the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Deployment mode, controls the session cookie security flags
        #[arg(short, long, value_enum)]
        mode: Option<DeploymentMode>,
    },

    /// Prompt for a password and print its bcrypt hash
    HashPassword {
        /// Bcrypt cost (defaults to the configured cost)
        #[arg(long)]
        cost: Option<u32>,
    },

    /// Issue or inspect session tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Subcommand)]
pub enum TokenAction {
    /// Sign a session token for an email
    Issue {
        /// Identity to put in the token
        #[arg(short, long)]
        email: String,

        /// Lifetime in seconds (defaults to the configured session TTL)
        #[arg(short, long)]
        ttl: Option<u64>,
    },

    /// Validate a token and show its claims
    Inspect {
        /// The token to check
        token: String,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
