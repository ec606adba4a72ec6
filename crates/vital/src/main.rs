//! Vital CLI - medical image analysis powered by a hosted vision model.
//!
//! Uploads an X-ray, CT, MRI or ultrasound image to a vision-capable language
//! model along with a clinical-analysis prompt and prints the returned report.
//!
//! # Usage
//!
//! ```bash
//! # Analyse an image
//! vital analyze chest-xray.jpg
//!
//! # Machine-readable output
//! vital analyze knee.png --format json --output report.json
//!
//! # Check endpoint, model and whether a key was found
//! vital config status
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Vital - medical image analysis powered by a hosted vision model.
#[derive(Parser, Debug)]
#[command(name = "vital")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyse a medical image and print the report
    Analyze(cli::analyze::AnalyzeArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),

    /// How to use Vital, supported image types and important notes
    Guide,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = match vital_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `vital config path`."
            );
            vital_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Vital v{}", vital_core::VERSION);

    match cli.command {
        Commands::Analyze(args) => cli::analyze::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
        Commands::Guide => {
            cli::guide::print_guide();
            Ok(())
        }
    }
}
