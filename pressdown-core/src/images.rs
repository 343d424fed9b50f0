//! Image discovery from attachments, post bodies and cover references.

use crate::builder::DataError;
use crate::config::SaveImages;
use crate::models::Image;
use crate::post::{find_attachment, items_of_type, post_meta_value};
use pressdown_types::{ExternalId, PostId, RawNode};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

static IMAGE_EXTENSION_REGEX: OnceLock<Regex> = OnceLock::new();
static IMG_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
static ABSOLUTE_URL_REGEX: OnceLock<Regex> = OnceLock::new();

fn image_extension_regex() -> &'static Regex {
    IMAGE_EXTENSION_REGEX.get_or_init(|| Regex::new(r"(?i)\.(gif|jpe?g|png|webp)(\?|$)").unwrap())
}

fn img_tag_regex() -> &'static Regex {
    // `src` must follow whitespace so data-src and friends are ignored
    IMG_TAG_REGEX.get_or_init(|| Regex::new(r#"(?i)<img\s(?:[^>]*?\s)?src="([^"]+)"[^>]*>"#).unwrap())
}

fn absolute_url_regex() -> &'static Regex {
    ABSOLUTE_URL_REGEX.get_or_init(|| Regex::new(r"(?i)^https?://").unwrap())
}

/// Collect candidate images for the configured mode
pub fn collect_images<N: RawNode>(
    items: &[&N],
    post_types: &[String],
    mode: SaveImages,
) -> Result<Vec<Image>, DataError> {
    let mut images = Vec::new();
    if mode.includes_attached() {
        images.extend(collect_attached_images(items));
    }
    if mode.includes_scraped() {
        images.extend(collect_scraped_images(items, post_types)?);
    }
    if mode == SaveImages::None {
        images.extend(collect_cover_images(items));
    }
    Ok(images)
}

/// Attachments whose URL looks like an image file
pub fn collect_attached_images<N: RawNode>(items: &[&N]) -> Vec<Image> {
    let images: Vec<Image> = items_of_type(items, "attachment")
        .into_iter()
        .filter_map(|attachment| {
            let url = attachment.child_value("attachment_url")?;
            if !image_extension_regex().is_match(url) {
                return None;
            }
            Some(Image {
                id: attachment.child_value("post_id").map(ExternalId::from),
                // Unattached uploads carry a parent of 0
                post_id: attachment
                    .optional_child_value("post_parent", 0)
                    .and_then(PostId::parse)
                    .filter(|id| id.as_u64() != 0),
                url: url.to_string(),
                original_url: None,
            })
        })
        .collect();

    tracing::info!("{} attached images found.", images.len());
    images
}

/// `<img src>` URLs found in the raw body of every classified item
pub fn collect_scraped_images<N: RawNode>(
    items: &[&N],
    post_types: &[String],
) -> Result<Vec<Image>, DataError> {
    let mut images = Vec::new();

    for post_type in post_types {
        for item in items_of_type(items, post_type) {
            let post_id = item.child_value("post_id").and_then(PostId::parse);
            let body = item.child_value("encoded").unwrap_or_default();
            let link = item.child_value("link").unwrap_or_default();

            for scraped in scrape_image_urls(body) {
                images.push(Image {
                    id: None,
                    post_id,
                    url: resolve_image_url(scraped, link)?,
                    original_url: None,
                });
            }
        }
    }

    tracing::info!("{} images scraped from post body content.", images.len());
    Ok(images)
}

/// Cover images only, used when general image collection is off
pub fn collect_cover_images<N: RawNode>(items: &[&N]) -> Vec<Image> {
    let mut images = Vec::new();

    for item in items {
        let Some(cover_id) = post_meta_value(*item, "_thumbnail_id").map(ExternalId::from) else {
            continue;
        };
        let attachment = match find_attachment(items, &cover_id) {
            Ok(Some(attachment)) => attachment,
            Ok(None) => continue,
            Err(err) => {
                tracing::warn!("Skipping cover image {}: {}", cover_id, err);
                continue;
            }
        };
        if let Some(url) = attachment.child_value("attachment_url") {
            images.push(Image {
                id: Some(cover_id),
                post_id: item.child_value("post_id").and_then(PostId::parse),
                url: url.to_string(),
                original_url: Some(url.to_string()),
            });
        }
    }

    tracing::info!("{} cover images found.", images.len());
    images
}

/// `src` values of `<img>` tags, in document order
pub fn scrape_image_urls(body: &str) -> Vec<&str> {
    img_tag_regex()
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

pub fn is_absolute_url(url: &str) -> bool {
    absolute_url_regex().is_match(url)
}

/// Resolve a scraped URL against the owning post's permalink
pub fn resolve_image_url(scraped: &str, link: &str) -> Result<String, DataError> {
    if is_absolute_url(scraped) {
        return Ok(scraped.to_string());
    }

    let unresolvable = || DataError::UnresolvableImageUrl {
        image: scraped.to_string(),
        link: link.to_string(),
    };
    if !is_absolute_url(link) {
        return Err(unresolvable());
    }

    let base = Url::parse(link).map_err(|_| unresolvable())?;
    let resolved = base.join(scraped).map_err(|_| unresolvable())?;
    Ok(resolved.to_string())
}
