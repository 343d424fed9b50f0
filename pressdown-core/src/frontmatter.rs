//! Frontmatter field registry and extraction.

use crate::config::ConfigError;
use crate::models::{AuthorLookup, FieldValue, Frontmatter, Post};
use crate::post::decode_component;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Invalid YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

static LINE_BREAKS_REGEX: OnceLock<Regex> = OnceLock::new();

fn line_breaks_regex() -> &'static Regex {
    LINE_BREAKS_REGEX.get_or_init(|| Regex::new(r"[\r\n]+").unwrap())
}

/// Every supported frontmatter field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Author,
    Categories,
    CoverImage,
    Date,
    Draft,
    Excerpt,
    Id,
    Slug,
    Tags,
    Title,
    Type,
}

impl FieldKind {
    pub const ALL: [FieldKind; 11] = [
        FieldKind::Author,
        FieldKind::Categories,
        FieldKind::CoverImage,
        FieldKind::Date,
        FieldKind::Draft,
        FieldKind::Excerpt,
        FieldKind::Id,
        FieldKind::Slug,
        FieldKind::Tags,
        FieldKind::Title,
        FieldKind::Type,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    /// Name used in `frontmatter_fields`
    pub fn key(&self) -> &'static str {
        match self {
            FieldKind::Author => "author",
            FieldKind::Categories => "categories",
            FieldKind::CoverImage => "coverImage",
            FieldKind::Date => "date",
            FieldKind::Draft => "draft",
            FieldKind::Excerpt => "excerpt",
            FieldKind::Id => "id",
            FieldKind::Slug => "slug",
            FieldKind::Tags => "tags",
            FieldKind::Title => "title",
            FieldKind::Type => "type",
        }
    }

    /// Compute this field for a post; None means the field is omitted
    pub fn extract(&self, post: &Post, authors: &AuthorLookup) -> Option<FieldValue> {
        match self {
            FieldKind::Author => author(post, authors),
            FieldKind::Categories => Some(FieldValue::List(categories(post))),
            FieldKind::CoverImage => post.cover_image.clone().map(FieldValue::Text),
            FieldKind::Date => post
                .date
                .as_ref()
                .map(|d| FieldValue::Text(d.format("%Y-%m-%d").to_string())),
            FieldKind::Draft => post.is_draft.then_some(FieldValue::Flag(true)),
            FieldKind::Excerpt => excerpt(post).map(FieldValue::Text),
            FieldKind::Id => Some(FieldValue::Integer(post.id.as_u64())),
            FieldKind::Slug => Some(FieldValue::Text(post.slug.clone())),
            FieldKind::Tags => Some(FieldValue::List(tags(post))),
            FieldKind::Title => post.source.title.clone().map(FieldValue::Text),
            FieldKind::Type => Some(FieldValue::Text(post.post_type.clone())),
        }
    }
}

/// One configured field: `key` or `key:alias`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub alias: Option<String>,
}

impl FieldSpec {
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        let mut parts = spec.trim().split(':');
        let key = parts.next().unwrap_or_default();
        let alias = parts
            .next()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        let kind = FieldKind::from_key(key).ok_or_else(|| ConfigError::UnknownField(key.to_string()))?;
        Ok(Self { kind, alias })
    }

    /// Output key: the alias when given, else the field name
    pub fn key(&self) -> &str {
        self.alias.as_deref().unwrap_or(self.kind.key())
    }
}

/// Fills `Post::frontmatter` from the configured field specs
pub struct FrontmatterBuilder<'a> {
    fields: &'a [FieldSpec],
    authors: &'a AuthorLookup,
}

impl<'a> FrontmatterBuilder<'a> {
    pub fn new(fields: &'a [FieldSpec], authors: &'a AuthorLookup) -> Self {
        Self { fields, authors }
    }

    pub fn populate(&self, posts: &mut [Post]) {
        for post in posts.iter_mut() {
            post.frontmatter = self.compute(post);
        }
    }

    pub fn compute(&self, post: &Post) -> Frontmatter {
        let mut frontmatter = Frontmatter::new();
        for field in self.fields {
            if let Some(value) = field.kind.extract(post, self.authors) {
                frontmatter.insert(field.key(), value);
            }
        }
        frontmatter
    }
}

/// Serialize frontmatter as a YAML document body (no `---` fences)
pub fn to_yaml(frontmatter: &Frontmatter) -> Result<String, FrontmatterError> {
    Ok(serde_yaml::to_string(frontmatter)?)
}

fn author(post: &Post, authors: &AuthorLookup) -> Option<FieldValue> {
    let username = post.source.creator.as_deref().filter(|u| !u.is_empty())?;
    Some(FieldValue::Author(authors.resolve(username)))
}

/// Decoded category names, excluding "uncategorized"
fn categories(post: &Post) -> Vec<String> {
    term_names(post, |domain, nicename| {
        domain == "category" && nicename != "uncategorized"
    })
}

/// Decoded tag names (tags are `<category domain="post_tag">` nodes)
fn tags(post: &Post) -> Vec<String> {
    term_names(post, |domain, _| domain == "post_tag")
}

fn term_names(post: &Post, keep: impl Fn(&str, &str) -> bool) -> Vec<String> {
    post.source
        .terms
        .iter()
        .filter_map(|term| {
            let domain = term.domain.as_deref()?;
            let nicename = term.nicename.as_deref()?;
            keep(domain, nicename).then(|| decode_component(nicename))
        })
        .collect()
}

/// Raw excerpt with line breaks collapsed; not decoded
fn excerpt(post: &Post) -> Option<String> {
    let raw = post.source.excerpt.as_deref().filter(|e| !e.is_empty())?;
    Some(line_breaks_regex().replace_all(raw, " ").into_owned())
}
