//! # pressdown CLI
//!
//! Command-line interface for converting WordPress exports to markdown.

mod commands;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pressdown_core::SaveImages;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pressdown")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (defaults to pressdown.yml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default pressdown.yml
    Init {
        /// Target directory (defaults to current directory)
        path: Option<PathBuf>,
    },

    /// Convert an export into markdown files
    Convert {
        #[command(flatten)]
        overrides: ConfigOverrides,
    },

    /// Dump converted posts as JSON for inspection
    Inspect {
        #[command(flatten)]
        overrides: ConfigOverrides,

        /// Output format
        #[arg(long, value_enum, default_value_t = InspectFormat::Json)]
        format: InspectFormat,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON
        #[arg(long)]
        pretty: bool,
    },
}

/// Flags that take precedence over the config file
#[derive(Args, Debug, Default)]
pub struct ConfigOverrides {
    /// WordPress export file
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output directory
    #[arg(long = "out-dir")]
    pub out_dir: Option<PathBuf>,

    /// Which images to record
    #[arg(long, value_enum)]
    pub save_images: Option<ImageMode>,

    /// IANA timezone for publish dates
    #[arg(long)]
    pub timezone: Option<String>,

    /// Frontmatter fields (comma separated, `key` or `key:alias`)
    #[arg(long, value_delimiter = ',')]
    pub frontmatter_fields: Vec<String>,

    /// Skip draft posts
    #[arg(long)]
    pub skip_drafts: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ImageMode {
    All,
    Attached,
    Scraped,
    None,
}

impl From<ImageMode> for SaveImages {
    fn from(mode: ImageMode) -> Self {
        match mode {
            ImageMode::All => SaveImages::All,
            ImageMode::Attached => SaveImages::Attached,
            ImageMode::Scraped => SaveImages::Scraped,
            ImageMode::None => SaveImages::None,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
pub enum InspectFormat {
    Json,
    Jsonl,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Init { path } => commands::init_project(path.as_deref()),
        Commands::Convert { overrides } => {
            commands::convert_export(cli.config.as_deref(), &overrides).await
        }
        Commands::Inspect {
            overrides,
            format,
            output,
            pretty,
        } => {
            commands::inspect_export(
                cli.config.as_deref(),
                &overrides,
                format,
                output.as_deref(),
                pretty,
            )
            .await
        }
    }
}
