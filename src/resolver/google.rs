use async_trait::async_trait;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{error, info, instrument};

use super::{ResolveError, Resolver};
use crate::{
    configuration::SearchSettings,
    domain::{SearchQuery, SearchResult},
};

/// Client for the Google Programmable Search (custom search) JSON API.
#[derive(Clone)]
pub struct GoogleSearchClient {
    http_client: Client,
    base_url: Url,
    api_key: SecretString,
    search_engine_id: String,
    query_suffix: String,
}

impl TryFrom<SearchSettings> for GoogleSearchClient {
    type Error = reqwest::Error;

    fn try_from(
        SearchSettings {
            base_url,
            api_key,
            search_engine_id,
            query_suffix,
        }: SearchSettings,
    ) -> Result<Self, Self::Error> {
        let http_client = Client::builder().build()?;
        Ok(Self {
            http_client,
            base_url,
            api_key,
            search_engine_id,
            query_suffix,
        })
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    title: Option<String>,
    link: Option<String>,
}

#[async_trait]
impl Resolver for GoogleSearchClient {
    #[instrument(name = "Resolving query", skip(self), fields(query = %query))]
    async fn resolve(&self, query: &SearchQuery) -> Result<SearchResult, ResolveError> {
        let response = self
            .http_client
            .get(self.base_url.clone())
            .query(&[
                ("key", self.api_key.expose_secret()),
                ("cx", self.search_engine_id.as_str()),
                ("q", query.with_suffix(&self.query_suffix).as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Search API request failed with status: {}", status);
            error!("Response body: {}", body);
            return Err(ResolveError::Status { status, body });
        }

        let SearchResponse { items } = response.json().await?;
        let first = items.into_iter().next().ok_or(ResolveError::NoResults)?;
        let link = first.link.ok_or(ResolveError::MissingField("link"))?;
        let title = first.title.ok_or(ResolveError::MissingField("title"))?;
        let result = SearchResult::new(title, link);

        info!("Found '{}' at {}", result.title, result.link);
        Ok(result)
    }
}
