mod download_outcome;
mod search_query;
mod search_result;

pub use download_outcome::DownloadOutcome;
pub use search_query::SearchQuery;
pub use search_result::SearchResult;
