//! Referral link validation and normalization

use once_cell::sync::Lazy;
use regex_lite::Regex;
use std::fmt;

/// Matches a t.me profile link anywhere in free-form text. The scheme and
/// host are case-insensitive; the handle keeps its original case.
static LINK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?t\.me/([A-Za-z0-9_]{5,})").expect("link pattern is valid")
});

/// A referral link in canonical `t.me/<handle>` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalLink(String);

impl CanonicalLink {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extract a canonical link from arbitrary text. Returns `None` when no
/// handle of at least 5 word characters is present.
pub fn normalize_link(text: &str) -> Option<CanonicalLink> {
    let captures = LINK_PATTERN.captures(text)?;
    let handle = captures.get(1)?.as_str();
    Some(CanonicalLink(format!("t.me/{}", handle)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_plain_handle() {
        let link = normalize_link("t.me/username").unwrap();
        assert_eq!(link.as_str(), "t.me/username");
    }

    #[test]
    fn strips_scheme_and_lowercases_host_only() {
        let link = normalize_link("https://T.me/Alice_01").unwrap();
        assert_eq!(link.as_str(), "t.me/Alice_01");
    }

    #[test]
    fn accepts_http_scheme() {
        let link = normalize_link("http://t.me/some_user").unwrap();
        assert_eq!(link.as_str(), "t.me/some_user");
    }

    #[test]
    fn finds_link_embedded_in_text() {
        let link = normalize_link("here is my friend: t.me/friend_99 thanks").unwrap();
        assert_eq!(link.as_str(), "t.me/friend_99");
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = normalize_link("HTTPS://t.me/handle_ok").unwrap();
        let second = normalize_link(first.as_str()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_short_handles() {
        assert!(normalize_link("t.me/abcd").is_none());
    }

    #[test]
    fn rejects_unrelated_text() {
        assert!(normalize_link("hello there").is_none());
        assert!(normalize_link("https://example.com/user_name").is_none());
        assert!(normalize_link("").is_none());
    }
}
