//! Filesystem-safe names derived from URLs and slugs.

use percent_encoding::percent_decode_str;
use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;
use url::Url;

static HYPHEN_RUNS: OnceLock<Regex> = OnceLock::new();

fn hyphen_runs() -> &'static Regex {
    HYPHEN_RUNS.get_or_init(|| Regex::new(r"-+").unwrap())
}

/// Derive a filename from an image URL
///
/// Takes the last path segment (query and fragment dropped), percent-decodes
/// it and sanitizes the result. Never fails; falls back to `image`.
///
/// # Examples
///
/// ```
/// use pressdown_core::filename::filename_from_url;
///
/// assert_eq!(
///     filename_from_url("https://example.com/uploads/2024/03/photo.jpg?w=300"),
///     "photo.jpg"
/// );
/// assert_eq!(filename_from_url("https://example.com/"), "image");
/// ```
pub fn filename_from_url(url: &str) -> String {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or(url).to_string(),
    };

    let segment = path.rsplit('/').find(|s| !s.is_empty()).unwrap_or_default();
    let decoded = percent_decode_str(segment).decode_utf8_lossy();

    let name = sanitize_component(&decoded);
    if name.is_empty() {
        "image".to_string()
    } else {
        name
    }
}

/// Make a single path component safe to write
///
/// Rules:
/// - Keep letters (including unicode), digits, `.`, `-` and `_`
/// - Replace everything else with hyphens
/// - Collapse multiple hyphens, drop a hyphen before a dot
/// - Trim leading/trailing hyphens and dots
pub fn sanitize_component(input: &str) -> String {
    let replaced = input
        .graphemes(true)
        .map(|g| {
            let keep = g
                .chars()
                .next()
                .map(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '_'))
                .unwrap_or(false);
            if keep {
                g
            } else {
                "-"
            }
        })
        .collect::<String>();

    let collapsed = hyphen_runs().replace_all(&replaced, "-");
    collapsed
        .replace("-.", ".")
        .trim_matches(|c| c == '-' || c == '.')
        .to_string()
}
