//! Address matching for fetched pages
//!
//! Finds `local-part@domain` strings whose domain is on a small whitelist of
//! mail providers. This is not general email validation: the local part is
//! limited to letters, digits, `.`, `_` and `-`, and nothing outside the
//! whitelist is ever reported.

use crate::config::validate_domain_string;
use crate::{ConfigError, ConfigResult};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Mail-provider domains matched when no whitelist is configured
pub const DEFAULT_DOMAINS: &[&str] = &["yahoo.com", "yahoo.com.vn", "gmail.com", "hotmail.com"];

/// Characters allowed in the local part
const LOCAL_PART: &str = "[a-z0-9._-]+";

/// Maximal runs that look like an address; used to cut text into candidates
static CANDIDATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[a-z0-9._-]+@[a-z0-9.-]+")
        .expect("Failed to compile candidate regex - this is a bug")
});

/// What the `^` and `$` anchors of the whitelist pattern bind to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorMode {
    /// Each line (surrounding whitespace ignored) must be exactly one address
    #[default]
    Line,
    /// Each address-like token in the text is matched on its own
    Token,
    /// The whole text must be exactly one address (a single final `\n` is allowed)
    Text,
}

impl FromStr for AnchorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "token" => Ok(Self::Token),
            "text" => Ok(Self::Text),
            other => Err(format!(
                "unknown anchor mode '{}', expected line, token or text",
                other
            )),
        }
    }
}

impl fmt::Display for AnchorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Line => "line",
            Self::Token => "token",
            Self::Text => "text",
        };
        f.write_str(name)
    }
}

/// Matches whitelisted addresses in page text
#[derive(Debug, Clone)]
pub struct EmailMatcher {
    pattern: Regex,
    mode: AnchorMode,
}

impl EmailMatcher {
    /// Builds a matcher for the given domain whitelist
    ///
    /// Domains are matched literally and case-insensitively. The list must
    /// not be empty and every entry must be a plain domain name such as
    /// `gmail.com`; anything else is rejected with [`ConfigError`].
    ///
    /// # Examples
    ///
    /// ```
    /// use spider_harvest::email::{AnchorMode, EmailMatcher};
    ///
    /// let matcher = EmailMatcher::new(&["gmail.com"], AnchorMode::Token).unwrap();
    /// let found = matcher.extract_emails("write to Foo@Gmail.com or bar@example.com");
    /// assert_eq!(found, vec!["foo@gmail.com"]);
    /// ```
    pub fn new<S: AsRef<str>>(domains: &[S], mode: AnchorMode) -> ConfigResult<Self> {
        if domains.is_empty() {
            return Err(ConfigError::Validation(
                "email domain whitelist cannot be empty".to_string(),
            ));
        }
        for domain in domains {
            validate_domain_string(domain.as_ref())?;
        }

        let alternatives = domains
            .iter()
            .map(|domain| regex::escape(domain.as_ref()))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = Regex::new(&format!("(?i)^{}@(?:{})$", LOCAL_PART, alternatives))?;

        Ok(Self { pattern, mode })
    }

    /// The anchoring mode this matcher was built with
    pub fn mode(&self) -> AnchorMode {
        self.mode
    }

    /// Returns true if `candidate` is exactly one whitelisted address
    pub fn is_match(&self, candidate: &str) -> bool {
        self.pattern.is_match(candidate)
    }

    /// Extracts the whitelisted addresses found in `text`
    ///
    /// Matches are lower-cased and deduplicated; the first occurrence decides
    /// the position in the result.
    pub fn extract_emails(&self, text: &str) -> Vec<String> {
        let candidates: Box<dyn Iterator<Item = &str> + '_> = match self.mode {
            AnchorMode::Line => Box::new(text.lines().map(str::trim)),
            AnchorMode::Token => Box::new(
                CANDIDATE_RE
                    .find_iter(text)
                    .map(|m| m.as_str().trim_end_matches('.')),
            ),
            AnchorMode::Text => Box::new(std::iter::once(
                text.strip_suffix('\n').unwrap_or(text),
            )),
        };

        let mut seen = HashSet::new();
        let mut found = Vec::new();

        for candidate in candidates.filter(|c| self.is_match(c)) {
            let normalized = candidate.to_lowercase();
            if seen.insert(normalized.clone()) {
                found.push(normalized);
            }
        }

        found
    }
}

impl Default for EmailMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_DOMAINS, AnchorMode::default())
            .expect("Failed to compile default email pattern - this is a bug")
    }
}
