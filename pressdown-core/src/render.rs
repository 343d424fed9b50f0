//! Rendering finished posts to markdown documents.

use crate::filename::sanitize_component;
use crate::frontmatter::{to_yaml, FrontmatterError};
use crate::models::Post;
use std::path::PathBuf;

/// Output layout options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// `slug/index.md` instead of `slug.md`
    pub post_folders: bool,
    /// Prefix names with `YYYY-MM-DD-`
    pub prefix_date: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            post_folders: true,
            prefix_date: false,
        }
    }
}

/// Render a post as a markdown document with a YAML frontmatter block.
/// Posts without frontmatter render as bare content.
pub fn render_post(post: &Post) -> Result<String, FrontmatterError> {
    let mut out = String::new();

    if !post.frontmatter.is_empty() {
        out.push_str("---\n");
        out.push_str(&to_yaml(&post.frontmatter)?);
        out.push_str("---\n\n");
    }

    out.push_str(post.content.trim_end());
    out.push('\n');
    Ok(out)
}

/// Relative output path for a post. Non-`post` types get a `<type>/` prefix;
/// the name becomes `<name>/index.md` or `<name>.md`.
pub fn output_path(post: &Post, options: &WriteOptions) -> PathBuf {
    let mut name = sanitize_component(&post.slug);
    if name.is_empty() {
        name = post.id.to_string();
    }
    if options.prefix_date {
        if let Some(date) = &post.date {
            name = format!("{}-{}", date.format("%Y-%m-%d"), name);
        }
    }

    let mut path = PathBuf::new();
    if post.post_type != "post" {
        path.push(sanitize_component(&post.post_type));
    }
    if options.post_folders {
        path.push(name);
        path.push("index.md");
    } else {
        path.push(format!("{}.md", name));
    }
    path
}
