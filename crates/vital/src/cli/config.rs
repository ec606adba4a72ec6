//! The `vital config` command for configuration management.

use clap::{Args, Subcommand};
use vital_core::Config;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,

    /// Show config file path
    Path,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show endpoint, model and whether an API key was found
    Status,
}

/// Execute the config command.
pub async fn execute(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = Config::load()?;
            let toml = config.to_toml()?;
            println!("{}", toml);
        }

        ConfigCommand::Path => {
            let path = Config::default_path();
            println!("{}", path.display());
        }

        ConfigCommand::Init { force } => {
            let path = Config::default_path();

            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at: {}\nUse --force to overwrite.",
                    path.display()
                );
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let config = Config::default();
            let toml = config.to_toml()?;
            std::fs::write(&path, toml)?;

            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }

        ConfigCommand::Status => {
            let config = Config::load()?;
            println!("{}", serde_json::to_string_pretty(&status_json(&config))?);
        }
    }

    Ok(())
}

/// Endpoint, model and key presence. Never includes the key itself.
fn status_json(config: &Config) -> serde_json::Value {
    let key_status = if config.api.resolved_api_key().is_some() {
        "✅ Loaded"
    } else {
        "❌ Not Found"
    };
    serde_json::json!({
        "API Endpoint": config.api.endpoint,
        "Model": config.api.model,
        "API Key Status": key_status,
    })
}
