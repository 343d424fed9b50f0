//! # pressdown-core
//!
//! Core library for the pressdown WordPress export converter.
//!
//! This crate turns a parsed WordPress export into normalized posts: it
//! classifies post types, builds post records, collects and associates
//! images (including cover images), and computes each post's frontmatter.

pub mod associate;
pub mod authors;
pub mod builder;
pub mod classify;
pub mod config;
pub mod filename;
pub mod frontmatter;
pub mod images;
pub mod models;
pub mod post;
pub mod render;
pub mod translate;
pub mod xml;

pub use builder::{BuildError, Conversion, DataError, ExportBuilder};
pub use config::{Config, ConfigError, SaveImages};
pub use frontmatter::{FieldKind, FieldSpec, FrontmatterBuilder};
pub use models::{AuthorInfo, AuthorLookup, FieldValue, Frontmatter, Image, Post};
pub use render::{output_path, render_post, WriteOptions};
pub use translate::{ContentTranslator, HtmlPassthrough, TranslateError};
pub use xml::XmlNode;
