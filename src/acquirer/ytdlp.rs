use async_trait::async_trait;
use serde::Deserialize;
use std::{path::PathBuf, process::Stdio};
use tokio::process::Command;
use tracing::{debug, error, info, instrument};

use super::{AcquireError, Acquirer};
use crate::{configuration::AcquisitionSettings, domain::DownloadOutcome};

/// Runs the `yt-dlp` program, which downloads the best audio stream and hands it
/// to ffmpeg for transcoding.
#[derive(Debug, Clone)]
pub struct YtDlp {
    settings: AcquisitionSettings,
}

impl From<AcquisitionSettings> for YtDlp {
    fn from(settings: AcquisitionSettings) -> Self {
        Self { settings }
    }
}

/// Subset of the info JSON printed by `--dump-json`.
#[derive(Deserialize)]
struct MediaInfo {
    title: Option<String>,
    url: Option<String>,
    filename: Option<String>,
    #[serde(rename = "_filename")]
    legacy_filename: Option<String>,
}

impl YtDlp {
    fn command(&self, link: &str) -> Command {
        let AcquisitionSettings {
            program,
            format,
            audio_codec,
            audio_quality,
            output_template,
            output_dir,
            quiet,
        } = &self.settings;

        let mut command = Command::new(program);
        command
            .args(["--format", format.as_str()])
            .arg("--paths")
            .arg(output_dir)
            .args(["--output", output_template.as_str()])
            .arg("--extract-audio")
            .args(["--audio-format", audio_codec.as_str()])
            .args(["--audio-quality", audio_quality.as_str()])
            // Print the info JSON and still download.
            .args(["--dump-json", "--no-simulate"]);
        if *quiet {
            command.args(["--quiet", "--no-warnings"]);
        }
        command
            .arg("--")
            .arg(link)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }

    fn parse_outcome(&self, stdout: &[u8]) -> Result<DownloadOutcome, AcquireError> {
        let stdout = String::from_utf8_lossy(stdout);
        // Playlists print one object per entry; only the first one is reported.
        let line = stdout
            .lines()
            .find(|line| !line.trim().is_empty())
            .unwrap_or_default();
        let info: MediaInfo = serde_json::from_str(line)?;

        let audio_url = info
            .url
            .filter(|url| !url.is_empty())
            .ok_or(AcquireError::MissingStreamUrl)?;
        let file_path = info
            .filename
            .or(info.legacy_filename)
            .map(|name| PathBuf::from(name).with_extension(&self.settings.audio_codec));

        Ok(DownloadOutcome {
            title: info.title.unwrap_or_default(),
            audio_url,
            file_path,
        })
    }
}

#[async_trait]
impl Acquirer for YtDlp {
    #[instrument(name = "Acquiring audio", skip(self))]
    async fn acquire(&self, link: &str) -> Result<DownloadOutcome, AcquireError> {
        info!("Downloading audio from {}", link);
        let output = self
            .command(link)
            .output()
            .await
            .map_err(|source| AcquireError::Spawn {
                program: self.settings.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("Downloader failed with {}: {}", output.status, stderr);
            return Err(AcquireError::Failed {
                status: output.status,
                stderr,
            });
        }

        let outcome = self.parse_outcome(&output.stdout)?;
        debug!("Transcoded file: {:?}", outcome.file_path);
        info!("Downloaded '{}'", outcome.title);
        Ok(outcome)
    }
}
