/// First hit returned by the search API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
}

impl SearchResult {
    pub fn new(title: impl Into<String>, link: impl AsRef<str>) -> Self {
        Self {
            title: title.into(),
            link: link.as_ref().trim().to_string(),
        }
    }
}
