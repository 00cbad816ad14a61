use config::{Config, ConfigError};
use reqwest::Url;
use secrecy::SecretString;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::path::PathBuf;
use tokio::net::TcpListener;

/// Legacy variable names read by earlier deployments of the service.
const LEGACY_API_KEY_VAR: &str = "KEY";
const LEGACY_SEARCH_ENGINE_VAR: &str = "cx";

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    #[serde(rename = "application")]
    pub application_cfg: ApplicationSettings,
    #[serde(rename = "search")]
    pub search_cfg: SearchSettings,
    #[serde(rename = "acquisition")]
    pub acquisition_cfg: AcquisitionSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let base_path = std::env::current_dir().map_err(|e| {
            ConfigError::Message(format!("Failed to determine the current directory: {e}"))
        })?;
        let configuration_directory = base_path.join("configuration");

        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .map_err(ConfigError::Message)?;

        let environment_filename = format!("{}.yml", environment.as_str());

        Config::builder()
            .add_source(config::File::from(configuration_directory.join("base.yml")))
            .add_source(config::File::from(
                configuration_directory.join(environment_filename),
            ))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("search.api_key", std::env::var(LEGACY_API_KEY_VAR).ok())?
            .set_override_option(
                "search.search_engine_id",
                std::env::var(LEGACY_SEARCH_ENGINE_VAR).ok(),
            )?
            .build()?
            .try_deserialize()
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
    pub async fn listener(&self) -> Result<TcpListener, std::io::Error> {
        TcpListener::bind(self.address()).await
    }
}

/// Web search API used to turn a free-text query into a media link.
#[derive(Deserialize, Debug, Clone)]
pub struct SearchSettings {
    #[serde(deserialize_with = "url_format::deserialize")]
    pub base_url: Url,
    pub api_key: SecretString,
    /// The `cx` parameter of the custom search API.
    pub search_engine_id: String,
    /// Appended to every query to steer results towards video pages.
    pub query_suffix: String,
}

/// Options handed to the external media downloader.
#[derive(Deserialize, Debug, Clone)]
pub struct AcquisitionSettings {
    pub program: String,
    pub format: String,
    pub audio_codec: String,
    pub audio_quality: String,
    pub output_template: String,
    pub output_dir: PathBuf,
    pub quiet: bool,
}

impl Default for AcquisitionSettings {
    fn default() -> Self {
        Self {
            program: "yt-dlp".into(),
            format: "bestaudio/best".into(),
            audio_codec: "mp3".into(),
            audio_quality: "192".into(),
            output_template: "%(title)s.%(ext)s".into(),
            output_dir: PathBuf::from("."),
            quiet: true,
        }
    }
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "{} is not a supported environment. Use 'local' or 'production'.",
                other
            )),
        }
    }
}

mod url_format {
    use reqwest::Url;
    use serde::{Deserialize, Deserializer, de::Error};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Url, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Url::parse(&s).map_err(D::Error::custom)
    }
}
