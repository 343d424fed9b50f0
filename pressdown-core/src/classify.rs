//! Post type discovery.

use pressdown_types::RawNode;

/// Internal WordPress types that never become posts
pub const EXCLUDED_POST_TYPES: [&str; 12] = [
    "attachment",
    "revision",
    "nav_menu_item",
    "custom_css",
    "customize_changeset",
    "oembed_cache",
    "user_request",
    "wp_block",
    "wp_global_styles",
    "wp_navigation",
    "wp_template",
    "wp_template_part",
];

/// Deduplicated post types found in the export: "post", then "page", then
/// the remaining types in the order they were first encountered.
pub fn classify_post_types<N: RawNode>(items: &[&N]) -> Vec<String> {
    let mut post_types: Vec<String> = Vec::new();

    for item in items {
        let Some(post_type) = item.child_value("post_type") else {
            continue;
        };
        if EXCLUDED_POST_TYPES.contains(&post_type) {
            continue;
        }
        if !post_types.iter().any(|t| t == post_type) {
            post_types.push(post_type.to_string());
        }
    }

    prioritize_post_type(&mut post_types, "page");
    prioritize_post_type(&mut post_types, "post");

    tracing::debug!("Post types to process: {:?}", post_types);
    post_types
}

fn prioritize_post_type(post_types: &mut Vec<String>, post_type: &str) {
    if let Some(index) = post_types.iter().position(|t| t == post_type) {
        let found = post_types.remove(index);
        post_types.insert(0, found);
    }
}
