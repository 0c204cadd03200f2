//! Ordered URL shape tables shared by the platform extractors.
//!
//! Each platform owns a list of [`Rule`]s. A URL is tested against them in
//! order and the first pattern that matches decides the content type; its
//! `extract` function then pulls the identifier out with plain string
//! splitting. Patterns only prove the shape. Extraction is best-effort and
//! may come back empty.

use regex::Regex;
use url::Url;

use super::types::ContentType;

/// Characters that end an identifier segment.
const SEGMENT_END: [char; 4] = ['/', '?', '&', '#'];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Identifiers {
    pub id: String,
    pub username: Option<String>,
}

impl Identifiers {
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        let username = username.into();
        if !username.is_empty() {
            self.username = Some(username);
        }
        self
    }
}

pub(crate) type Extract = fn(&str) -> Identifiers;

pub(crate) struct Rule {
    pub shape: &'static str,
    pub pattern: Regex,
    pub content_type: ContentType,
    pub extract: Extract,
}

impl Rule {
    pub fn new(
        shape: &'static str,
        pattern: &str,
        content_type: ContentType,
        extract: Extract,
    ) -> Self {
        Self {
            shape,
            pattern: Regex::new(pattern).unwrap(),
            content_type,
            extract,
        }
    }
}

pub(crate) fn first_match<'a>(rules: &'a [Rule], url: &str) -> Option<&'a Rule> {
    rules.iter().find(|rule| rule.pattern.is_match(url))
}

/// Text following the first `marker`, up to the next separator.
pub(crate) fn segment_after(url: &str, marker: &str) -> String {
    url.split_once(marker)
        .and_then(|(_, rest)| rest.split(SEGMENT_END).next())
        .unwrap_or_default()
        .to_string()
}

/// The `n`-th path segment (0-based) after `marker`.
pub(crate) fn nth_segment_after(url: &str, marker: &str, n: usize) -> String {
    url.split_once(marker)
        .map(|(_, rest)| rest.split(['?', '#']).next().unwrap_or_default())
        .and_then(|path| path.split('/').nth(n))
        .unwrap_or_default()
        .to_string()
}

/// Value of query parameter `key`: raw `?key=`/`&key=` splitting first,
/// then a parsed query (tolerating a missing scheme).
pub(crate) fn query_value(url: &str, key: &str) -> String {
    for sep in ['?', '&'] {
        let value = segment_after(url, &format!("{}{}=", sep, key));
        if !value.is_empty() {
            return value;
        }
    }

    Url::parse(url)
        .or_else(|_| Url::parse(&format!("https://{}", url)))
        .ok()
        .and_then(|parsed| {
            parsed
                .query_pairs()
                .find(|(k, _)| k == key)
                .map(|(_, value)| value.into_owned())
        })
        .unwrap_or_default()
}
