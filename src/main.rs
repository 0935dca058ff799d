//! MX5-R2 Keyboard Backlight CLI
//!
//! A command-line interface and D-Bus daemon for the Eurocom MX5-R2
//! three-region keyboard backlight.

use clap::Parser;
use tracing::info;

// CLI definitions
mod cli;
use cli::{Cli, Commands};

// Command handlers
mod commands;
use commands::Context;

use mx5kbleds::{BackendOptions, DriverConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config
    let config_path = cli.config.unwrap_or_else(DriverConfig::default_path);
    info!("Loading config from {:?}", config_path);
    let config = DriverConfig::load(&config_path)?;

    // Create printer config if monitoring is enabled
    let printer = commands::create_printer_config(cli.monitor, cli.hex, cli.filter.as_deref())?;

    let ctx = Context {
        config,
        backend: BackendOptions {
            dry_run: cli.dry_run,
            printer,
        },
    };

    match cli.command {
        // === Query Commands ===
        Commands::Probe => {
            commands::query::probe(&ctx)?;
        }
        Commands::Modes => {
            commands::query::modes()?;
        }
        #[cfg(feature = "dbus")]
        Commands::Get { attr } => {
            commands::query::get(&ctx, &attr).await?;
        }
        #[cfg(feature = "dbus")]
        Commands::Status => {
            commands::query::status(&ctx).await?;
        }

        // === Set Commands ===
        #[cfg(feature = "dbus")]
        Commands::Set { attr, value } => {
            commands::set::set(&ctx, &attr, &value).await?;
        }

        // === Hosts ===
        #[cfg(feature = "dbus")]
        Commands::Serve => {
            commands::utility::serve(&ctx).await?;
        }
        Commands::Shell => {
            commands::utility::shell(&ctx)?;
        }
        Commands::InitConfig { force } => {
            commands::utility::init_config(&ctx, &config_path, force)?;
        }
    }

    Ok(())
}
