//! Building normalized posts from export items.

use crate::builder::{BuildError, DataError};
use crate::filename::filename_from_url;
use crate::models::{Frontmatter, Post, PostSource, Term};
use crate::translate::ContentTranslator;
use chrono::DateTime;
use chrono_tz::Tz;
use percent_encoding::percent_decode_str;
use pressdown_types::{ExternalId, PostId, RawNode};
use thiserror::Error;

/// Why an eager cover lookup could not complete
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoverLookupError {
    #[error("no sibling items available")]
    MissingContext,

    #[error("sibling item {0} has no post_type or post_id")]
    MalformedItem(usize),

    #[error("attachment {0} has no attachment_url")]
    MissingUrl(ExternalId),
}

/// Converts raw items into [`Post`]s
pub struct PostBuilder<'a, N: RawNode> {
    items: Option<&'a [&'a N]>,
    translator: &'a dyn ContentTranslator,
    timezone: Tz,
}

impl<'a, N: RawNode> PostBuilder<'a, N> {
    pub fn new(translator: &'a dyn ContentTranslator, timezone: Tz) -> Self {
        Self {
            items: None,
            translator,
            timezone,
        }
    }

    /// Sibling items searched when resolving cover images
    pub fn with_items(mut self, items: &'a [&'a N]) -> Self {
        self.items = Some(items);
        self
    }

    /// Build every exportable post, grouped by type in the given order
    pub fn collect_posts(&self, items: &[&N], post_types: &[String]) -> Result<Vec<Post>, BuildError> {
        let mut posts = Vec::new();

        for post_type in post_types {
            let mut posts_for_type = Vec::new();
            for item in items_of_type(items, post_type) {
                if should_export(item, post_type) {
                    posts_for_type.push(self.build(item)?);
                }
            }

            if !posts_for_type.is_empty() {
                match post_type.as_str() {
                    "post" => tracing::info!("{} normal posts found.", posts_for_type.len()),
                    "page" => tracing::info!("{} pages found.", posts_for_type.len()),
                    other => tracing::info!(
                        "{} custom \"{}\" posts found.",
                        posts_for_type.len(),
                        other
                    ),
                }
            }

            posts.extend(posts_for_type);
        }

        Ok(posts)
    }

    /// Build a single post from an already filtered item
    pub fn build(&self, item: &N) -> Result<Post, BuildError> {
        let raw_id = item.child_value("post_id").unwrap_or_default();
        let id = PostId::parse(raw_id).ok_or_else(|| DataError::InvalidPostId {
            value: raw_id.to_string(),
        })?;

        let cover_image_id = post_meta_value(item, "_thumbnail_id").map(ExternalId::from);
        let (cover_image, cover_image_url) = match &cover_image_id {
            Some(cover_id) => match self.resolve_cover(cover_id) {
                Ok(Some(url)) => (Some(filename_from_url(&url)), Some(url)),
                Ok(None) => (None, None),
                Err(err) => {
                    tracing::warn!("Could not process cover image for post {}: {}", id, err);
                    (None, None)
                }
            },
            None => (None, None),
        };

        let content = self
            .translator
            .translate(item.child_value("encoded").unwrap_or_default())?;

        let post = Post {
            id,
            post_type: item.child_value("post_type").unwrap_or_default().to_string(),
            slug: decode_component(item.child_value("post_name").unwrap_or_default()),
            date: parse_post_date(item.child_value("pubDate"), self.timezone),
            is_draft: item.child_value("status") == Some("draft"),
            content,
            cover_image_id,
            cover_image,
            cover_image_url,
            image_urls: Vec::new(),
            frontmatter: Frontmatter::new(),
            source: post_source(item),
        };

        tracing::debug!("Built {} {} ({})", post.post_type, post.id, post.slug);
        Ok(post)
    }

    fn resolve_cover(&self, cover_id: &ExternalId) -> Result<Option<String>, CoverLookupError> {
        let items = self.items.ok_or(CoverLookupError::MissingContext)?;
        match find_attachment(items, cover_id)? {
            Some(attachment) => attachment
                .child_value("attachment_url")
                .map(|url| Some(url.to_string()))
                .ok_or_else(|| CoverLookupError::MissingUrl(cover_id.clone())),
            None => Ok(None),
        }
    }
}

/// Items whose `post_type` equals the given type
pub fn items_of_type<'n, N: RawNode>(items: &[&'n N], post_type: &str) -> Vec<&'n N> {
    items
        .iter()
        .copied()
        .filter(|item| item.child_value("post_type") == Some(post_type))
        .collect()
}

/// Trashed items and the default "sample-page" are not exported
pub fn should_export<N: RawNode>(item: &N, post_type: &str) -> bool {
    if item.child_value("status") == Some("trash") {
        return false;
    }
    !(post_type == "page" && item.child_value("post_name") == Some("sample-page"))
}

/// Find the attachment item with the given id
///
/// Fails when an item lacks the fields needed to compare it.
pub fn find_attachment<'n, N: RawNode>(
    items: &[&'n N],
    id: &ExternalId,
) -> Result<Option<&'n N>, CoverLookupError> {
    for (index, item) in items.iter().enumerate() {
        let (Some(post_type), Some(post_id)) =
            (item.child_value("post_type"), item.child_value("post_id"))
        else {
            return Err(CoverLookupError::MalformedItem(index));
        };
        if post_type == "attachment" && post_id == id.as_str() {
            return Ok(Some(*item));
        }
    }
    Ok(None)
}

/// Value of the `<wp:postmeta>` entry with the given key
pub fn post_meta_value<'n, N: RawNode>(item: &'n N, key: &str) -> Option<&'n str> {
    item.children("postmeta")
        .into_iter()
        .find(|meta| meta.child_value("meta_key") == Some(key))
        .and_then(|meta| meta.child_value("meta_value"))
}

/// RFC 2822 publish date in the given zone; None when missing or invalid
pub fn parse_post_date(raw: Option<&str>, timezone: Tz) -> Option<DateTime<Tz>> {
    let raw = raw?.trim();
    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|date| date.with_timezone(&timezone))
}

/// Percent-decode a URL component such as a post name or term nicename
pub fn decode_component(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

fn post_source<N: RawNode>(item: &N) -> PostSource {
    PostSource {
        title: item.child_value("title").map(str::to_string),
        creator: item.child_value("creator").map(str::to_string),
        excerpt: item.optional_child_value("encoded", 1).map(str::to_string),
        link: item.child_value("link").map(str::to_string),
        terms: item
            .children("category")
            .into_iter()
            .map(|category| Term {
                domain: category.attribute("domain").map(str::to_string),
                nicename: category.attribute("nicename").map(str::to_string),
            })
            .collect(),
    }
}
