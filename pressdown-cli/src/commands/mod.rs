//! CLI command implementations.

pub mod convert;
pub mod init;
pub mod inspect;

pub use convert::convert_export;
pub use init::init_project;
pub use inspect::inspect_export;

use crate::ConfigOverrides;
use anyhow::{Context, Result};
use pressdown_core::{Config, Conversion, ExportBuilder};
use std::path::Path;

const DEFAULT_CONFIG_FILE: &str = "pressdown.yml";

/// Load the config file (explicit, or `pressdown.yml` when present) and apply
/// command-line overrides on top.
pub fn load_config(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Config> {
    let mut config = match config_path {
        Some(path) => {
            tracing::info!("Loading config from {:?}", path);
            Config::from_file(path).context("Failed to load configuration")?
        }
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            tracing::info!("Loading config from {}", DEFAULT_CONFIG_FILE);
            Config::from_file(DEFAULT_CONFIG_FILE).context("Failed to load configuration")?
        }
        None => Config::default(),
    };

    if let Some(input) = &overrides.input {
        config.input = input.clone();
    }
    if let Some(output) = &overrides.out_dir {
        config.output = output.clone();
    }
    if let Some(mode) = overrides.save_images {
        config.save_images = mode.into();
    }
    if let Some(timezone) = &overrides.timezone {
        config.timezone = timezone.clone();
    }
    if !overrides.frontmatter_fields.is_empty() {
        config.frontmatter_fields = overrides.frontmatter_fields.clone();
    }
    if overrides.skip_drafts {
        config.include_drafts = false;
    }

    Ok(config)
}

/// Read the export and run the conversion pipeline
pub async fn build_conversion(config: Config) -> Result<(ExportBuilder, Conversion)> {
    let builder = ExportBuilder::new(config).context("Invalid configuration")?;

    let input = builder.config().input_path();
    tracing::info!("Reading export {:?}", input);
    let export = tokio::fs::read_to_string(&input)
        .await
        .with_context(|| format!("Failed to read export {:?}", input))?;

    let conversion = builder.build(&export).context("Failed to convert export")?;
    Ok((builder, conversion))
}
