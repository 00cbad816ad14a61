use core::fmt;

/// A user supplied search phrase with surrounding whitespace removed.
///
/// Parsing never fails: an empty query is still sent to the search API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn parse(s: impl AsRef<str>) -> Self {
        Self(s.as_ref().trim().to_string())
    }

    /// The phrase as submitted to the search API, e.g. `lofi hip hop youtube`.
    pub fn with_suffix(&self, suffix: &str) -> String {
        format!("{} {}", self.0, suffix)
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for SearchQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
