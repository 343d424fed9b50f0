//! Dump converted posts as JSON/JSONL.

use super::{build_conversion, load_config};
use crate::{ConfigOverrides, InspectFormat};
use anyhow::{Context, Result};
use pressdown_core::{output_path, Post};
use serde::Serialize;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;

#[derive(Serialize)]
struct PostRecord<'a> {
    path: String,
    #[serde(flatten)]
    post: &'a Post,
}

/// Convert the export and write one record per post
pub async fn inspect_export(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
    format: InspectFormat,
    output: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let config = load_config(config_path, overrides)?;
    let (builder, conversion) = build_conversion(config).await?;
    let options = builder.config().write_options();

    let records: Vec<PostRecord> = conversion
        .posts
        .iter()
        .map(|post| PostRecord {
            path: output_path(post, &options)
                .to_string_lossy()
                .replace('\\', "/"),
            post,
        })
        .collect();

    let writer: Box<dyn Write> = if let Some(path) = output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file {:?}", path))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(stdout())
    };
    write_records(writer, &records, format, pretty)?;

    Ok(())
}

fn write_records(
    mut writer: Box<dyn Write>,
    records: &[PostRecord],
    format: InspectFormat,
    pretty: bool,
) -> Result<()> {
    match format {
        InspectFormat::Jsonl => {
            for rec in records {
                writeln!(writer, "{}", serde_json::to_string(rec)?)?;
            }
        }
        InspectFormat::Json => {
            let json = if pretty {
                serde_json::to_string_pretty(records)?
            } else {
                serde_json::to_string(records)?
            };
            writer.write_all(json.as_bytes())?;
        }
    }
    writer.flush()?;
    Ok(())
}
