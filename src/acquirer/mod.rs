use async_trait::async_trait;
use std::process::ExitStatus;

use crate::{domain::DownloadOutcome, error::error_chain_fmt};

mod ytdlp;

pub use ytdlp::YtDlp;

/// Fetches a media link and leaves a transcoded audio file behind.
#[async_trait]
pub trait Acquirer: Send + Sync {
    async fn acquire(&self, link: &str) -> Result<DownloadOutcome, AcquireError>;
}

#[derive(thiserror::Error)]
pub enum AcquireError {
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("downloader exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
    #[error("could not read downloader metadata: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("downloader metadata has no stream url")]
    MissingStreamUrl,
}

impl std::fmt::Debug for AcquireError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
