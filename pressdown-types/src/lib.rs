//! Shared types for pressdown
//!
//! This crate provides the identifiers used across the pressdown crates and
//! the [`RawNode`] capability trait that any export tree must satisfy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier as it appears in the export (e.g. an attachment's `wp:post_id`
/// referenced by a `_thumbnail_id` meta value). Compared verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExternalId(pub String);

impl ExternalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ExternalId {
    fn from(id: &str) -> Self {
        ExternalId(id.to_string())
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Numeric post identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl PostId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Parse a textual id, tolerating surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok().map(PostId)
    }
}

impl From<u64> for PostId {
    fn from(id: u64) -> Self {
        PostId(id)
    }
}

impl From<PostId> for u64 {
    fn from(id: PostId) -> Self {
        id.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only view of one element of a parsed export.
///
/// Tags are matched by local name, so `wp:post_id` is looked up as
/// `post_id` and `content:encoded` as `encoded`.
pub trait RawNode {
    /// First child element with the given tag.
    fn child(&self, tag: &str) -> Option<&Self>;

    /// All child elements with the given tag, in document order.
    fn children(&self, tag: &str) -> Vec<&Self>;

    /// Text of the `index`-th child with the given tag, if that child exists.
    fn optional_child_value(&self, tag: &str, index: usize) -> Option<&str>;

    /// Value of an attribute on this element.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Text of the first child with the given tag.
    fn child_value(&self, tag: &str) -> Option<&str> {
        self.optional_child_value(tag, 0)
    }
}
