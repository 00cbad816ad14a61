use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    /// Title reported by the downloaded media's metadata.
    pub title: String,
    /// Stream URL taken from the media metadata. This is the remote source stream,
    /// not the transcoded file written to disk.
    pub audio_url: String,
    /// Where the transcoded file is expected to land, when the downloader reports it.
    pub file_path: Option<PathBuf>,
}
