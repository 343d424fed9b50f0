//! Configuration parsing and management.

use crate::frontmatter::FieldSpec;
use crate::render::WriteOptions;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Could not find a frontmatter getter named \"{0}\"")]
    UnknownField(String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// Which image sources feed the image associator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveImages {
    /// Only cover images, via the thumbnail fallback
    None,
    /// Attachment records
    Attached,
    /// `<img>` tags in post bodies
    Scraped,
    #[default]
    All,
}

impl SaveImages {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(SaveImages::None),
            "attached" => Some(SaveImages::Attached),
            "scraped" => Some(SaveImages::Scraped),
            "all" => Some(SaveImages::All),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SaveImages::None => "none",
            SaveImages::Attached => "attached",
            SaveImages::Scraped => "scraped",
            SaveImages::All => "all",
        }
    }

    pub fn includes_attached(&self) -> bool {
        matches!(self, SaveImages::Attached | SaveImages::All)
    }

    pub fn includes_scraped(&self) -> bool {
        matches!(self, SaveImages::Scraped | SaveImages::All)
    }
}

/// Main configuration struct matching the pressdown.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// WordPress export file
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Directory the converted posts are written to
    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default)]
    pub save_images: SaveImages,

    /// IANA zone used when reading publish dates
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Ordered `key` or `key:alias` field specs
    #[serde(default = "default_frontmatter_fields")]
    pub frontmatter_fields: Vec<String>,

    /// Write `slug/index.md` instead of `slug.md`
    #[serde(default = "default_true")]
    pub post_folders: bool,

    /// Prefix output names with the publish date
    #[serde(default)]
    pub prefix_date: bool,

    #[serde(default = "default_true")]
    pub include_drafts: bool,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    pub(crate) config_path: Option<PathBuf>,
}

fn default_input() -> PathBuf {
    PathBuf::from("export.xml")
}

fn default_output() -> PathBuf {
    PathBuf::from("output")
}

fn default_timezone() -> String {
    String::from("utc")
}

fn default_frontmatter_fields() -> Vec<String> {
    ["title", "date", "categories", "tags", "coverImage", "draft"]
        .iter()
        .map(|f| f.to_string())
        .collect()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            save_images: SaveImages::default(),
            timezone: default_timezone(),
            frontmatter_fields: default_frontmatter_fields(),
            post_folders: true,
            prefix_date: false,
            include_drafts: true,
            config_path: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse configuration from YAML text. An empty document yields defaults.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Get the export file, resolved relative to config file
    pub fn input_path(&self) -> PathBuf {
        self.resolve_path(&self.input)
    }

    /// Get the output directory, resolved relative to config file
    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.output)
    }

    /// Parse the configured field specs, failing on the first unknown key
    pub fn field_specs(&self) -> Result<Vec<FieldSpec>, ConfigError> {
        self.frontmatter_fields
            .iter()
            .map(|spec| FieldSpec::parse(spec))
            .collect()
    }

    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        parse_timezone(&self.timezone)
    }

    /// Check everything that can fail before any post is processed
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.field_specs()?;
        self.timezone()?;
        Ok(())
    }

    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            post_folders: self.post_folders,
            prefix_date: self.prefix_date,
        }
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(config_path) = &self.config_path {
            if let Some(parent) = config_path.parent() {
                parent.join(path)
            } else {
                path.to_path_buf()
            }
        } else {
            path.to_path_buf()
        }
    }
}

/// Parse an IANA zone name; "utc" is accepted in any case
pub fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    let name = name.trim();
    if name.eq_ignore_ascii_case("utc") {
        return Ok(Tz::UTC);
    }
    name.parse::<Tz>()
        .map_err(|_| ConfigError::UnknownTimezone(name.to_string()))
}
