use async_trait::async_trait;
use reqwest::StatusCode;

use crate::{
    domain::{SearchQuery, SearchResult},
    error::error_chain_fmt,
};

mod google;

pub use google::GoogleSearchClient;

/// Maps a free-text query to a single candidate media link.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, query: &SearchQuery) -> Result<SearchResult, ResolveError>;
}

#[derive(thiserror::Error)]
pub enum ResolveError {
    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("search API responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("search returned no results")]
    NoResults,
    #[error("first search result has no `{0}` field")]
    MissingField(&'static str),
}

impl std::fmt::Debug for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
