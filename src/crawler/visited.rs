//! Visited-URL bookkeeping for one recursive crawl
//!
//! The set remembers insertion order because it doubles as the crawl result:
//! URLs come back in the order the depth-first walk first reached them.

use std::collections::HashSet;

/// Ordered set of URLs already reached by a crawl
///
/// Owned by a single `crawl_all` call; never shared between calls.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl VisitedSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `url` has already been reached
    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    /// Records `url`; returns false if it was already present
    pub fn insert(&mut self, url: &str) -> bool {
        if !self.seen.insert(url.to_string()) {
            return false;
        }
        self.order.push(url.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Consumes the set, returning URLs in first-visit order
    pub fn into_urls(self) -> Vec<String> {
        self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_visit_order() {
        let mut visited = VisitedSet::new();
        assert!(visited.insert("http://x.test/b"));
        assert!(visited.insert("http://x.test/a"));
        assert!(!visited.insert("http://x.test/b"));

        assert_eq!(visited.len(), 2);
        assert_eq!(
            visited.into_urls(),
            vec!["http://x.test/b", "http://x.test/a"]
        );
    }

    #[test]
    fn test_contains() {
        let mut visited = VisitedSet::new();
        assert!(visited.is_empty());
        visited.insert("http://x.test/");
        assert!(visited.contains("http://x.test/"));
        assert!(!visited.contains("http://x.test"));
    }
}
