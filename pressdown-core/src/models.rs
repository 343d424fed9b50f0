//! Content model structs for posts, images, authors and frontmatter.

use chrono::DateTime;
use chrono_tz::Tz;
use pressdown_types::{ExternalId, PostId};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// A single exported post, page or custom post type entry
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Numeric `wp:post_id`
    pub id: PostId,

    /// Post type tag ("post", "page", or a custom type)
    #[serde(rename = "type")]
    pub post_type: String,

    /// Decoded `wp:post_name`
    pub slug: String,

    /// Publication date in the configured zone
    #[serde(serialize_with = "serialize_date")]
    pub date: Option<DateTime<Tz>>,

    pub is_draft: bool,

    /// Translated body content
    pub content: String,

    /// Attachment id named by the `_thumbnail_id` meta value
    pub cover_image_id: Option<ExternalId>,

    /// Filename derived from the cover image URL
    pub cover_image: Option<String>,

    /// Source URL backing `cover_image`
    pub cover_image_url: Option<String>,

    /// Image URLs in first-seen order
    pub image_urls: Vec<String>,

    pub frontmatter: Frontmatter,

    /// Raw fields read by the frontmatter extractors
    #[serde(skip)]
    pub source: PostSource,
}

impl Post {
    /// Append an image URL unless it is already present.
    ///
    /// Returns true when the URL was added.
    pub fn add_image_url(&mut self, url: &str) -> bool {
        if self.image_urls.iter().any(|u| u == url) {
            return false;
        }
        self.image_urls.push(url.to_string());
        true
    }
}

fn serialize_date<S: Serializer>(date: &Option<DateTime<Tz>>, s: S) -> Result<S::Ok, S::Error> {
    match date {
        Some(d) => s.serialize_some(&d.to_rfc3339()),
        None => s.serialize_none(),
    }
}

/// Untranslated values captured from the export item
#[derive(Debug, Clone, Default)]
pub struct PostSource {
    pub title: Option<String>,

    /// `dc:creator` username
    pub creator: Option<String>,

    /// `excerpt:encoded`, as found
    pub excerpt: Option<String>,

    /// Post permalink
    pub link: Option<String>,

    /// `<category>` nodes (categories and tags share the element)
    pub terms: Vec<Term>,
}

/// A `<category domain=".." nicename="..">` reference
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Term {
    pub domain: Option<String>,
    pub nicename: Option<String>,
}

/// Candidate image discovered in the export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Attachment id; scraped images have none
    pub id: Option<ExternalId>,

    /// Owning post, when the source names one
    pub post_id: Option<PostId>,

    /// Absolute image URL
    pub url: String,

    /// Set only by the cover-only fallback
    pub original_url: Option<String>,
}

/// Author record from `<wp:author>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorInfo {
    pub username: String,
    pub display_name: String,
}

impl AuthorInfo {
    pub fn new(username: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            display_name: display_name.into(),
        }
    }
}

/// Map from author login to author record
#[derive(Debug, Clone, Default)]
pub struct AuthorLookup {
    authors: HashMap<String, AuthorInfo>,
}

impl AuthorLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, info: AuthorInfo) {
        self.authors.insert(info.username.clone(), info);
    }

    pub fn get(&self, username: &str) -> Option<&AuthorInfo> {
        self.authors.get(username)
    }

    /// Author info for a username, using the username as display name when
    /// no richer record exists.
    pub fn resolve(&self, username: &str) -> AuthorInfo {
        let display_name = self
            .get(username)
            .map(|a| a.display_name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(username);
        AuthorInfo::new(username, display_name)
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}

/// A value produced by a frontmatter extractor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(u64),
    Flag(bool),
    List(Vec<String>),
    Author(AuthorInfo),
}

/// Exported metadata, kept in configured field order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    entries: Vec<(String, FieldValue)>,
}

impl Frontmatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Frontmatter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
