//! Convert command implementation.

use super::{build_conversion, load_config};
use crate::ConfigOverrides;
use anyhow::{Context, Result};
use pressdown_core::{output_path, render_post};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Manifest of image URLs per written post, relative to the output root
const IMAGE_MANIFEST: &str = "images.json";

/// Convert the export and write one markdown file per post
pub async fn convert_export(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<()> {
    let config = load_config(config_path, overrides)?;
    let (builder, conversion) = build_conversion(config).await?;
    let config = builder.config();

    let output_dir = config.output_dir();
    fs::create_dir_all(&output_dir).context("Failed to create output directory")?;

    let options = config.write_options();
    let mut manifest: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut written = 0;
    let mut skipped = 0;

    for post in &conversion.posts {
        if post.is_draft && !config.include_drafts {
            tracing::debug!("Skipping draft {}", post.id);
            skipped += 1;
            continue;
        }

        let relative = output_path(post, &options);
        let path = output_dir.join(&relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        let document = render_post(post)
            .with_context(|| format!("Failed to render post {}", post.id))?;
        fs::write(&path, document).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::debug!("Wrote {:?}", relative);
        written += 1;

        if !post.image_urls.is_empty() {
            manifest.insert(
                relative.to_string_lossy().replace('\\', "/"),
                post.image_urls.clone(),
            );
        }
    }

    let manifest_path = output_dir.join(IMAGE_MANIFEST);
    let json = serde_json::to_string_pretty(&manifest)?;
    fs::write(&manifest_path, json)
        .with_context(|| format!("Failed to write {:?}", manifest_path))?;

    tracing::info!(
        "Wrote {} posts to {:?} ({} drafts skipped)",
        written,
        output_dir,
        skipped
    );
    println!("✓ Converted {} posts into {:?}", written, output_dir);
    Ok(())
}
