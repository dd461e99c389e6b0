/// Returns the scope of a crawl's starting page
///
/// The starting page is its own scope: the URL is used verbatim with a
/// trailing slash appended when missing. Pages discovered later get a
/// directory scope from [`base_path`] instead.
///
/// # Examples
///
/// ```
/// use spider_harvest::url::start_scope;
///
/// assert_eq!(start_scope("http://a.com/docs"), "http://a.com/docs/");
/// assert_eq!(start_scope("http://a.com/docs/"), "http://a.com/docs/");
/// ```
pub fn start_scope(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}

/// Computes the directory base path of a URL
///
/// One trailing slash is dropped, then everything after the last `/` is cut
/// off. The result never climbs above the authority root: asking for the
/// parent of `http://host/` yields `http://host/` again. A string without any
/// `/` is returned unchanged.
///
/// # Examples
///
/// ```
/// use spider_harvest::url::base_path;
///
/// assert_eq!(base_path("http://a.com/b/page.html"), "http://a.com/b/");
/// assert_eq!(base_path("http://a.com/b/c/"), "http://a.com/b/");
/// assert_eq!(base_path("http://a.com/"), "http://a.com/");
/// assert_eq!(base_path("page"), "page");
/// ```
pub fn base_path(url: &str) -> String {
    let trimmed = url.strip_suffix('/').unwrap_or(url);

    let Some(index) = trimmed.rfind('/') else {
        return url.to_string();
    };

    let parent = &trimmed[..=index];

    // "scheme://" alone is not a directory; stay at the host root
    if parent.ends_with("//") {
        return start_scope(trimmed);
    }

    parent.to_string()
}

/// Walks a base path up `levels` directories
pub fn walk_up(base: &str, levels: usize) -> String {
    (0..levels).fold(base.to_string(), |current, _| base_path(&current))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_scope_appends_slash() {
        assert_eq!(start_scope("http://x.test"), "http://x.test/");
        assert_eq!(
            start_scope("http://x.test/index.html"),
            "http://x.test/index.html/"
        );
    }

    #[test]
    fn test_start_scope_keeps_existing_slash() {
        assert_eq!(start_scope("http://x.test/"), "http://x.test/");
    }

    #[test]
    fn test_base_path_of_file() {
        assert_eq!(base_path("http://a.com/b/c/page.html"), "http://a.com/b/c/");
    }

    #[test]
    fn test_base_path_of_directory_is_parent() {
        assert_eq!(base_path("http://a.com/b/c/"), "http://a.com/b/");
    }

    #[test]
    fn test_base_path_always_ends_with_slash() {
        for url in [
            "http://a.com/b/c/",
            "http://a.com/b/c",
            "http://a.com/",
            "http://a.com",
            "http://a.com/x?q=1",
        ] {
            assert!(base_path(url).ends_with('/'), "no trailing slash for {}", url);
        }
    }

    #[test]
    fn test_base_path_clamps_at_host_root() {
        assert_eq!(base_path("http://a.com/"), "http://a.com/");
        assert_eq!(base_path("http://a.com"), "http://a.com/");
        assert_eq!(base_path("http://a.com/page"), "http://a.com/");
    }

    #[test]
    fn test_base_path_without_slash_is_unchanged() {
        assert_eq!(base_path("page"), "page");
        assert_eq!(base_path("page/"), "page/");
    }

    #[test]
    fn test_walk_up() {
        assert_eq!(walk_up("http://a.com/b/c/", 0), "http://a.com/b/c/");
        assert_eq!(walk_up("http://a.com/b/c/", 1), "http://a.com/b/");
        assert_eq!(walk_up("http://a.com/b/c/", 2), "http://a.com/");
        assert_eq!(walk_up("http://a.com/b/c/", 5), "http://a.com/");
    }
}
