//! Cipherprint - Main Entry Point

use std::path::PathBuf;

use anyhow::Result;
use cipherprint::{commands, init_logging, AppConfig, OutputFormat};
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "cipherprint", version, about = "Statistical fingerprints of block-cipher ciphertext")]
struct Cli {
    /// Config file (defaults to ./cipherprint.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the feature vector of a ciphertext
    Extract {
        /// Ciphertext, or `-` to read stdin
        text: String,
        /// Include features outside the model schema
        #[arg(long)]
        extended: bool,
        /// Override the configured output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Predict the cipher behind one ciphertext, or one per stdin line with `-`
    Classify {
        text: String,
    },
    /// List feature names in model order
    Schema,
    /// Print features of random plaintexts as a labelled baseline
    Sample {
        #[arg(long, default_value_t = 10)]
        count: usize,
        /// XOR every text with the configured constant
        #[arg(long)]
        xor: bool,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    init_logging(&config.log);

    info!("=== Cipherprint v{} ===", env!("CARGO_PKG_VERSION"));

    let mut out = std::io::stdout();
    match cli.command {
        Command::Extract {
            text,
            extended,
            format,
        } => {
            let text = commands::read_input(&text)?;
            commands::extract(
                &mut out,
                &text,
                extended,
                format.unwrap_or(config.output),
                &config.corpus,
            )?;
        }
        Command::Classify { text } => {
            let texts = if text == "-" {
                commands::split_lines(&commands::read_input(&text)?)
            } else {
                vec![text]
            };
            commands::classify(&mut out, texts, &config.inference).await?;
        }
        Command::Schema => commands::schema(&mut out)?,
        Command::Sample {
            count,
            xor,
            seed,
            format,
        } => {
            commands::sample(
                &mut out,
                count,
                xor,
                seed,
                format.unwrap_or(config.output),
                &config.corpus,
            )?;
        }
    }

    Ok(())
}
