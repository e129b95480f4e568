//! `contract-review`: read a contract's plain text, print its analysis as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use pipeline::{AppConfig, Analyzer, ConfiguredRecognizer};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "contract-review",
    about = "Review a service contract for missing clauses and risks",
    version
)]
struct Cli {
    /// Contract text file; reads stdin when omitted
    path: Option<PathBuf>,

    /// JSON configuration file [default: $CONTRACT_REVIEW_CONFIG, else built-in tables]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    json_logs: bool,

    /// Pretty-print the analysis
    #[arg(long)]
    pretty: bool,
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let config = AppConfig::load(cli.config.as_deref())?;
    let recognizer = ConfiguredRecognizer::from_config(&config.recognizer)?;
    let analyzer = Analyzer::new(config, recognizer).context("Failed to build analyzer")?;

    let bytes = match &cli.path {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let analysis = analyzer.analyze_bytes(&bytes).await?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&analysis)?
    } else {
        serde_json::to_string(&analysis)?
    };
    println!("{}", output);

    Ok(())
}
