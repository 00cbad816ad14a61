use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::{
    acquirer::Acquirer,
    domain::{SearchQuery, SearchResult},
    error::FetchError,
    resolver::Resolver,
};

/// Result of a successful fetch as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedAudio {
    /// Title of the search hit the query resolved to.
    pub title: String,
    /// Stream URL from the downloaded media's metadata.
    pub audio_url: String,
}

/// Resolves a query to a link, then downloads and transcodes that link.
#[derive(Clone)]
pub struct AudioFetcher {
    resolver: Arc<dyn Resolver>,
    acquirer: Arc<dyn Acquirer>,
}

impl AudioFetcher {
    pub fn new(resolver: Arc<dyn Resolver>, acquirer: Arc<dyn Acquirer>) -> Self {
        Self { resolver, acquirer }
    }

    #[instrument(name = "Fetching audio", skip(self))]
    pub async fn fetch(&self, raw_query: &str) -> Result<FetchedAudio, FetchError> {
        let query = SearchQuery::parse(raw_query);
        info!("Resolving query '{}'", query);

        let SearchResult { title, link } =
            self.resolver.resolve(&query).await.map_err(|e| {
                error!("Search failed: {:?}", e);
                FetchError::from(e)
            })?;

        let outcome = self.acquirer.acquire(&link).await.map_err(|e| {
            error!("Download failed: {:?}", e);
            FetchError::from(e)
        })?;

        if let Some(path) = &outcome.file_path {
            info!("Saved '{}' to {}", title, path.display());
        }

        Ok(FetchedAudio {
            title,
            audio_url: outcome.audio_url,
        })
    }
}
