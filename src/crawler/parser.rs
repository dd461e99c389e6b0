//! HTML scanning for links and metadata
//!
//! Links are pulled out with one lenient pattern rather than a DOM walk: any
//! `<a ... href="..." ...>...</a>` on a single line counts, with either quote
//! character and in any letter case. Markup the pattern cannot see (anchors
//! broken across lines, unquoted hrefs) is simply missed.
//!
//! The page title is the one place a real HTML parser is used.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a.*?href=["'](?P<url>.*?)["'].*?>(?P<name>.*?)</a>"#)
        .expect("Failed to compile anchor regex - this is a bug")
});

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("title").expect("Failed to parse title selector - this is a bug")
});

/// Extracts the raw href of every anchor, in document order
///
/// Values are returned exactly as written: no trimming, no entity decoding,
/// no filtering of `mailto:` or `javascript:` links.
///
/// # Example
///
/// ```
/// use spider_harvest::crawler::extract_links;
///
/// let html = r#"<A HREF='/a'>A</A> <a class="x" href="mailto:c@d.com">mail</a>"#;
/// assert_eq!(extract_links(html), vec!["/a", "mailto:c@d.com"]);
/// ```
pub fn extract_links(html: &str) -> Vec<String> {
    ANCHOR_RE
        .captures_iter(html)
        .filter_map(|caps| caps.name("url"))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Extracts the page title from the HTML document
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_double_quoted() {
        let html = r#"<html><body><a href="/page">Link</a></body></html>"#;
        assert_eq!(extract_links(html), vec!["/page"]);
    }

    #[test]
    fn test_extract_single_quoted() {
        let html = "<a href='other.html'>Other</a>";
        assert_eq!(extract_links(html), vec!["other.html"]);
    }

    #[test]
    fn test_case_insensitive_tag_and_attribute() {
        let html = r#"<A HREF="/UP">Up</A>"#;
        assert_eq!(extract_links(html), vec!["/UP"]);
    }

    #[test]
    fn test_attributes_before_and_after_href() {
        let html = r#"<a class="nav" id="n1" href="/x" target="_blank" rel="nofollow">X</a>"#;
        assert_eq!(extract_links(html), vec!["/x"]);
    }

    #[test]
    fn test_document_order_and_duplicates() {
        let html = r#"
            <a href="/b">B</a>
            <a href="/a">A</a><a href="/b">B again</a>
        "#;
        assert_eq!(extract_links(html), vec!["/b", "/a", "/b"]);
    }

    #[test]
    fn test_non_http_schemes_are_captured() {
        let html = r#"<a href="mailto:c@d.com">Mail</a><a href="javascript:void(0)">JS</a>"#;
        assert_eq!(extract_links(html), vec!["mailto:c@d.com", "javascript:void(0)"]);
    }

    #[test]
    fn test_href_not_decoded() {
        let html = r#"<a href="/s?a=1&amp;b=2">S</a>"#;
        assert_eq!(extract_links(html), vec!["/s?a=1&amp;b=2"]);
    }

    #[test]
    fn test_empty_href_is_captured() {
        let html = r#"<a href="">Empty</a>"#;
        assert_eq!(extract_links(html), vec![""]);
    }

    #[test]
    fn test_anchor_without_closing_tag_missed() {
        let html = r#"<a href="/open">never closed"#;
        assert!(extract_links(html).is_empty());
    }

    #[test]
    fn test_anchor_split_across_lines_missed() {
        let html = "<a\nhref=\"/split\">Split</a>";
        assert!(extract_links(html).is_empty());
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        let html = r#"<a name="top">Top</a>"#;
        assert!(extract_links(html).is_empty());
    }

    #[test]
    fn test_extract_title() {
        let html = r#"<html><head><title>  Test Page  </title></head><body></body></html>"#;
        assert_eq!(extract_title(html), Some("Test Page".to_string()));
    }

    #[test]
    fn test_no_title() {
        let html = r#"<html><head></head><body></body></html>"#;
        assert_eq!(extract_title(html), None);
    }
}
