//! The `vital analyze` command.

mod display;
pub mod types;

pub use types::OutputFormat;

use clap::Args;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Duration;
use vital_core::{Config, OutputWriter, Vital};

/// Arguments for the `analyze` command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Medical image to analyse (JPG, JPEG or PNG)
    #[arg(required = true)]
    pub image: PathBuf,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Vision model identifier (overrides config)
    #[arg(long)]
    pub model: Option<String>,

    /// Chat completions endpoint URL (overrides config)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// API key (overrides config and TOGETHER_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Reveal the analysis word by word
    #[arg(long)]
    pub typing: bool,

    /// Delay between words for --typing, in milliseconds
    #[arg(long, default_value = "25")]
    pub typing_delay_ms: u64,

    /// Do not show the progress spinner
    #[arg(long)]
    pub no_spinner: bool,
}

/// Execute the analyze command.
pub async fn execute(args: AnalyzeArgs, mut config: Config) -> anyhow::Result<()> {
    if !args.image.exists() {
        anyhow::bail!(
            "❌ Please upload a medical image file before generating analysis.\n\n  \
             Image not found: {:?}\n  Hint: Pass the path to an X-ray, CT, MRI or ultrasound image.",
            args.image
        );
    }

    apply_overrides(&mut config, &args);
    config.validate()?;
    let api_key = args
        .api_key
        .clone()
        .or_else(|| config.api.resolved_api_key());
    let vital = Vital::with_api_key(config, api_key);

    tracing::info!(
        model = %vital.config().api.model,
        "Analyzing {:?}",
        args.image
    );

    let spinner = display::create_spinner(!args.no_spinner);
    let report = vital.analyze_file(&args.image).await;
    spinner.finish_and_clear();
    let report = report?;

    if let Some(ref output_path) = args.output {
        let file = File::create(output_path)?;
        let mut writer = OutputWriter::new(BufWriter::new(file), args.format.into(), args.pretty);
        writer.write(&report)?;
        writer.flush()?;
        tracing::info!("Report written to {:?}", output_path);
    } else {
        match args.format {
            OutputFormat::Text => {
                let delay = args
                    .typing
                    .then(|| Duration::from_millis(args.typing_delay_ms));
                display::print_report(&report, delay).await?;
            }
            OutputFormat::Json | OutputFormat::Jsonl => {
                let mut writer =
                    OutputWriter::new(std::io::stdout().lock(), args.format.into(), args.pretty);
                writer.write(&report)?;
                writer.flush()?;
            }
        }
    }

    if !report.is_success() {
        anyhow::bail!("Analysis of {:?} failed", args.image);
    }
    Ok(())
}

fn apply_overrides(config: &mut Config, args: &AnalyzeArgs) {
    if let Some(ref model) = args.model {
        config.api.model = model.clone();
    }
    if let Some(ref endpoint) = args.endpoint {
        config.api.endpoint = endpoint.clone();
    }
}
