use crate::url::base::walk_up;
use std::sync::LazyLock;
use url::{ParseError, Url};

/// Parent-directory segment counted and stripped during relative resolution
const PARENT_SEGMENT: &str = "../";

/// Base used only to check that a relative reference can be parsed
static SCRATCH_BASE: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("http://localhost/").expect("Failed to parse scratch base URL - this is a bug")
});

/// How a raw href parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reference {
    /// Has a scheme
    Absolute,
    /// Parses as a reference relative to some base
    Relative,
    /// The URL parser rejected it outright
    Malformed,
}

fn classify(raw: &str) -> Reference {
    match Url::parse(raw) {
        Ok(_) => Reference::Absolute,
        Err(ParseError::RelativeUrlWithoutBase) => {
            if SCRATCH_BASE.join(raw).is_ok() {
                Reference::Relative
            } else {
                Reference::Malformed
            }
        }
        Err(_) => Reference::Malformed,
    }
}

/// Returns true if the string parses as an absolute URL or a relative reference
pub fn is_uri_reference(candidate: &str) -> bool {
    classify(candidate) != Reference::Malformed
}

/// Resolves a raw href against the current page's base path
///
/// # Rules
///
/// | Raw href | Outcome |
/// |----------|---------|
/// | empty | rejected |
/// | absolute, starts with `base` | kept verbatim |
/// | absolute, anything else | rejected |
/// | relative | relative resolution |
/// | unparseable, starts with `base` | rejected |
/// | unparseable, anything else | relative resolution |
///
/// Relative resolution rejects any href holding a `:` unless it also holds
/// `http:` (so `mailto:`, `javascript:` and `https:` are all dropped). Each
/// `../` walks the base path up one directory; the `../` segments are then
/// removed and the remainder appended to the base. Doubled slashes after the
/// scheme separator are collapsed once, so `///` becomes `//`.
///
/// The colon filter only applies to relative hrefs. An absolute href under
/// `base` is kept verbatim even when its path holds `mailto:` or
/// `javascript:` (`http://a.com/b/c/javascript:x`).
///
/// # Examples
///
/// ```
/// use spider_harvest::url::resolve_link;
///
/// let base = "http://a.com/b/c/";
/// assert_eq!(resolve_link("../x", base).as_deref(), Some("http://a.com/b/x"));
/// assert_eq!(resolve_link("page.html", base).as_deref(), Some("http://a.com/b/c/page.html"));
/// assert_eq!(resolve_link("http://other.com/", base), None);
/// assert_eq!(resolve_link("mailto:me@a.com", base), None);
/// ```
pub fn resolve_link(raw: &str, base: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }

    match classify(raw) {
        Reference::Absolute => raw.starts_with(base).then(|| raw.to_string()),
        Reference::Relative => resolve_relative(raw, base),
        Reference::Malformed => {
            if raw.starts_with(base) {
                None
            } else {
                resolve_relative(raw, base)
            }
        }
    }
}

fn resolve_relative(raw: &str, base: &str) -> Option<String> {
    if raw.contains(':') && !raw.contains("http:") {
        return None;
    }

    let levels = raw.matches(PARENT_SEGMENT).count();
    let mut joined = walk_up(base, levels);
    if !joined.ends_with('/') {
        joined.push('/');
    }
    joined.push_str(&raw.replace(PARENT_SEGMENT, ""));

    let resolved = collapse_slashes(&joined);
    is_uri_reference(&resolved).then_some(resolved)
}

/// Collapses `//` into `/` once, leaving the `://` scheme separator alone
pub fn collapse_slashes(joined: &str) -> String {
    match joined.find("://") {
        Some(index) => {
            let (head, tail) = joined.split_at(index + 3);
            format!("{}{}", head, tail.replace("//", "/"))
        }
        None => joined.replace("//", "/"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://a.com/b/c/";

    #[test]
    fn test_empty_href_rejected() {
        assert_eq!(resolve_link("", BASE), None);
    }

    #[test]
    fn test_plain_relative_appended_to_base() {
        assert_eq!(
            resolve_link("page.html", BASE).as_deref(),
            Some("http://a.com/b/c/page.html")
        );
        assert_eq!(
            resolve_link("sub/page.html", BASE).as_deref(),
            Some("http://a.com/b/c/sub/page.html")
        );
    }

    #[test]
    fn test_root_relative_collapses_leading_slash() {
        assert_eq!(
            resolve_link("/a", "http://x.test/").as_deref(),
            Some("http://x.test/a")
        );
        assert_eq!(
            resolve_link("/a", BASE).as_deref(),
            Some("http://a.com/b/c/a")
        );
    }

    #[test]
    fn test_no_parent_segments_is_concatenation() {
        let cases = [
            ("x", "http://a.com/", "http://a.com/x"),
            ("x/y", "http://a.com/p/", "http://a.com/p/x/y"),
            ("/x", "http://a.com/p/", "http://a.com/p/x"),
            ("x//y", "http://a.com/p/", "http://a.com/p/x/y"),
            ("x?q=1#top", "http://a.com/p/", "http://a.com/p/x?q=1#top"),
        ];
        for (raw, base, expected) in cases {
            assert_eq!(resolve_link(raw, base).as_deref(), Some(expected), "{}", raw);
        }
    }

    #[test]
    fn test_triple_slash_collapses_once() {
        assert_eq!(
            resolve_link("//x", "http://a.com/p/").as_deref(),
            Some("http://a.com/p//x")
        );
    }

    #[test]
    fn test_parent_segment_walks_up_once() {
        assert_eq!(
            resolve_link("../x", BASE).as_deref(),
            Some("http://a.com/b/x")
        );
    }

    #[test]
    fn test_multiple_parent_segments() {
        assert_eq!(
            resolve_link("../../x", BASE).as_deref(),
            Some("http://a.com/x")
        );
    }

    #[test]
    fn test_parent_segments_stop_at_host_root() {
        assert_eq!(
            resolve_link("../../../../x", BASE).as_deref(),
            Some("http://a.com/x")
        );
        assert_eq!(
            resolve_link("../b", "http://x.test/").as_deref(),
            Some("http://x.test/b")
        );
    }

    #[test]
    fn test_inner_parent_segments_are_counted_and_stripped() {
        assert_eq!(
            resolve_link("d/../e", BASE).as_deref(),
            Some("http://a.com/b/d/e")
        );
    }

    #[test]
    fn test_absolute_inside_scope_kept_verbatim() {
        let raw = format!("{}page.html", BASE);
        assert_eq!(resolve_link(&raw, BASE), Some(raw.clone()));
    }

    #[test]
    fn test_absolute_equal_to_base_kept() {
        assert_eq!(resolve_link(BASE, BASE).as_deref(), Some(BASE));
    }

    #[test]
    fn test_absolute_other_host_rejected() {
        assert_eq!(resolve_link("http://other.com/b/c/page.html", BASE), None);
    }

    #[test]
    fn test_absolute_same_host_outside_directory_rejected() {
        assert_eq!(resolve_link("http://a.com/b/other.html", BASE), None);
    }

    #[test]
    fn test_non_http_schemes_rejected() {
        for raw in [
            "mailto:c@d.com",
            "javascript:void(0)",
            "javascript:location='/x'",
            "tel:+123",
            "ftp://a.com/b/c/file",
        ] {
            assert_eq!(resolve_link(raw, BASE), None, "{}", raw);
        }
    }

    #[test]
    fn test_absolute_in_scope_keeps_scheme_like_path() {
        assert_eq!(
            resolve_link("http://a.com/b/c/javascript:x", BASE).as_deref(),
            Some("http://a.com/b/c/javascript:x")
        );
        assert_eq!(
            resolve_link("http://a.com/b/c/mailto:c@d.com", BASE).as_deref(),
            Some("http://a.com/b/c/mailto:c@d.com")
        );
    }

    #[test]
    fn test_https_links_out_of_scope_rejected() {
        // Only `http:` is exempt from the colon filter
        assert_eq!(resolve_link("https://other.com/x", BASE), None);
        assert_eq!(resolve_link("https:x", BASE), None);
    }

    #[test]
    fn test_relative_with_embedded_http_kept() {
        assert_eq!(
            resolve_link("go?to=http://x.com", BASE).as_deref(),
            Some("http://a.com/b/c/go?to=http:/x.com")
        );
    }

    #[test]
    fn test_malformed_under_base_rejected() {
        let raw = "http://a.com:99999/b/c/x";
        assert_eq!(resolve_link(raw, "http://a.com:99999/b/c/"), None);
    }

    #[test]
    fn test_malformed_outside_base_resolved_relatively() {
        assert_eq!(
            resolve_link("http://a.com:99999/x", BASE).as_deref(),
            Some("http://a.com/b/c/http:/a.com:99999/x")
        );
    }

    #[test]
    fn test_collapse_slashes_keeps_scheme_separator() {
        assert_eq!(collapse_slashes("http://a.com//x"), "http://a.com/x");
        assert_eq!(collapse_slashes("http://a.com///x"), "http://a.com//x");
        assert_eq!(collapse_slashes("a//b"), "a/b");
    }

    #[test]
    fn test_is_uri_reference() {
        assert!(is_uri_reference("http://a.com/x"));
        assert!(is_uri_reference("x/y.html"));
        assert!(!is_uri_reference("http://[::1"));
    }
}
