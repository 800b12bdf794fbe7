use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use authpad::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "authpad=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Init { force } => cli::commands::init(force).await,
        Commands::Serve { host, port, mode } => {
            cli::commands::serve(config_path, host, port, mode).await
        }
        Commands::HashPassword { cost } => cli::commands::hash_password(config_path, cost).await,
        Commands::Token { action } => cli::commands::token(config_path, action).await,
    }
}
