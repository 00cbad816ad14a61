use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    error::FetchError,
    fetcher::{AudioFetcher, FetchedAudio},
};

#[derive(Deserialize)]
pub struct DownloadRequest {
    query: String,
}

/// Response body of `POST /download`. Always sent with `200 OK`.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope {
    Success { title: String, audio_url: String },
    Failure { error: FetchError },
}

impl From<Result<FetchedAudio, FetchError>> for Envelope {
    fn from(result: Result<FetchedAudio, FetchError>) -> Self {
        match result {
            Ok(FetchedAudio { title, audio_url }) => Envelope::Success { title, audio_url },
            Err(error) => Envelope::Failure { error },
        }
    }
}

#[instrument(name = "Downloading audio for a query", skip_all, fields(query = %body.query))]
pub async fn download(
    State(fetcher): State<AudioFetcher>,
    Json(body): Json<DownloadRequest>,
) -> Json<Envelope> {
    info!("Received query '{}'", body.query);
    Json(fetcher.fetch(&body.query).await.into())
}
