//! Author records from `<wp:author>` elements.

use crate::models::{AuthorInfo, AuthorLookup};
use pressdown_types::RawNode;

/// Build the username → author map from the channel's author list
pub fn build_author_lookup<N: RawNode>(channel: &N) -> AuthorLookup {
    let mut authors = AuthorLookup::new();
    let nodes = channel.children("author");
    tracing::info!("Found {} author nodes", nodes.len());

    for node in nodes {
        let Some(login) = node.child_value("author_login").filter(|l| !l.is_empty()) else {
            tracing::warn!("Skipping author without a login");
            continue;
        };
        let display_name = node
            .child_value("author_display_name")
            .filter(|name| !name.is_empty())
            .unwrap_or(login);

        tracing::debug!("Author: {} ({})", login, display_name);
        authors.insert(AuthorInfo::new(login, display_name));
    }

    authors
}
