//! VK4 Inspect - Decode and summarise Keyence VK4 files.
//!
//! This binary loads a single file, decodes every section and prints the
//! result as text or JSON.

use clap::Parser;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vk4_reader::{
    config::{Config, OutputFormat},
    DocumentSummary, LocalFileReader, Vk4Reader,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    run(config).await
}

async fn run(config: Config) -> ExitCode {
    let source = match LocalFileReader::open(&config.path).await {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let reader = match Vk4Reader::open_with_limit(&source, config.max_file_size).await {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("Error: {}: {}", config.path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let summary = DocumentSummary::from_document(reader.document());

    match config.format {
        OutputFormat::Summary => {
            println!("{}", reader.identifier());
            println!("{}", summary);
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: failed to serialize summary: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing subscriber.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "vk4_reader=debug"
    } else {
        "vk4_reader=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
