//! Merging collected images into their posts.

use crate::filename::filename_from_url;
use crate::models::{Image, Post};

/// Attach every image to the posts it belongs to
///
/// An image belongs to a post when the post owns it, or when it is the
/// post's cover image and no cover has been resolved yet. The first cover
/// match wins; `image_urls` stays free of duplicates.
pub fn associate_images(images: &[Image], posts: &mut [Post]) {
    let mut attached = 0usize;

    for image in images {
        for post in posts.iter_mut() {
            let owned = image.post_id == Some(post.id);

            let is_cover = post.cover_image.is_none()
                && image.id.is_some()
                && image.id == post.cover_image_id;
            if is_cover {
                post.cover_image = Some(filename_from_url(&image.url));
                post.cover_image_url = Some(
                    image
                        .original_url
                        .clone()
                        .unwrap_or_else(|| image.url.clone()),
                );
            }

            if (owned || is_cover) && post.add_image_url(&image.url) {
                attached += 1;
            }
        }
    }

    tracing::debug!("Attached {} image URLs to {} posts", attached, posts.len());
}
