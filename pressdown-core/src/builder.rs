//! Export conversion - orchestrates classification, post building, image
//! association and frontmatter.

use crate::{
    associate::associate_images,
    authors::build_author_lookup,
    classify::classify_post_types,
    config::{Config, ConfigError},
    frontmatter::{FieldSpec, FrontmatterBuilder},
    images::collect_images,
    models::{AuthorLookup, Post},
    post::PostBuilder,
    translate::{ContentTranslator, HtmlPassthrough, TranslateError},
    xml::{XmlError, XmlNode},
};
use chrono_tz::Tz;
use pressdown_types::RawNode;
use thiserror::Error;

/// The export contains data the pipeline cannot make sense of
#[derive(Error, Debug)]
pub enum DataError {
    #[error(
        "Unable to determine absolute URL from scraped image URL '{image}' and post link URL '{link}'"
    )]
    UnresolvableImageUrl { image: String, link: String },

    #[error("Invalid post id {value:?}")]
    InvalidPostId { value: String },

    #[error("Export has no <channel> element")]
    MissingChannel,
}

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("XML error: {0}")]
    Xml(#[from] XmlError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Content translation error: {0}")]
    Translate(#[from] TranslateError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result of converting one export
#[derive(Debug)]
pub struct Conversion {
    pub posts: Vec<Post>,
    pub authors: AuthorLookup,
}

/// Main export converter
pub struct ExportBuilder {
    config: Config,
    fields: Vec<FieldSpec>,
    timezone: Tz,
    translator: Box<dyn ContentTranslator>,
}

impl ExportBuilder {
    /// Validates the frontmatter fields and timezone up front, so a bad
    /// configuration fails before any post is processed.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let fields = config.field_specs()?;
        let timezone = config.timezone()?;
        Ok(Self {
            config,
            fields,
            timezone,
            translator: Box::new(HtmlPassthrough),
        })
    }

    pub fn with_translator(mut self, translator: impl ContentTranslator + 'static) -> Self {
        self.translator = Box::new(translator);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert export XML text
    pub fn build(&self, export: &str) -> Result<Conversion, BuildError> {
        let root = XmlNode::parse(export)?;
        self.build_from_root(&root)
    }

    /// Convert an already parsed export tree
    pub fn build_from_root<N: RawNode>(&self, root: &N) -> Result<Conversion, BuildError> {
        let channel = root.child("channel").ok_or(DataError::MissingChannel)?;

        let authors = build_author_lookup(channel);

        let items = channel.children("item");
        tracing::debug!("Export has {} items", items.len());

        let post_types = classify_post_types(&items);

        let post_builder =
            PostBuilder::new(self.translator.as_ref(), self.timezone).with_items(&items);
        let mut posts = post_builder.collect_posts(&items, &post_types)?;

        let images = collect_images(&items, &post_types, self.config.save_images)?;
        associate_images(&images, &mut posts);

        FrontmatterBuilder::new(&self.fields, &authors).populate(&mut posts);

        tracing::info!("Converted {} posts", posts.len());
        Ok(Conversion { posts, authors })
    }
}
