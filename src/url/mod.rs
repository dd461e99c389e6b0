//! URL handling module for Spider-Harvest
//!
//! This module decides which discovered hrefs stay inside the crawl scope and
//! turns relative hrefs into URLs anchored at the current page's base path.
//!
//! Scope is textual: an absolute link survives only when it starts with the
//! exact base path string of the page it was found on.

mod base;
mod resolve;

// Re-export main functions
pub use base::{base_path, start_scope, walk_up};
pub use resolve::{collapse_slashes, is_uri_reference, resolve_link};

/// Resolves every raw href of a page, dropping rejected ones
///
/// Order is preserved and duplicates are kept.
///
/// # Examples
///
/// ```
/// use spider_harvest::url::resolve_all;
///
/// let raw = vec!["/a".to_string(), "mailto:c@d.com".to_string(), "/a".to_string()];
/// let kept = resolve_all(&raw, "http://x.test/");
/// assert_eq!(kept, vec!["http://x.test/a", "http://x.test/a"]);
/// ```
pub fn resolve_all(raw_links: &[String], base: &str) -> Vec<String> {
    raw_links
        .iter()
        .filter_map(|raw| {
            let resolved = resolve_link(raw, base);
            if resolved.is_none() {
                tracing::trace!("Rejected link {:?} against base {}", raw, base);
            }
            resolved
        })
        .collect()
}
