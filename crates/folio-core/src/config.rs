//! Viewer configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use folio_client::{routes, ViewerClient};

use crate::error::CoreError;
use crate::Result;

/// Environment variable naming a JSON config file
pub const CONFIG_ENV: &str = "FOLIO_CONFIG";
/// Environment variable overriding the server URL
pub const SERVER_URL_ENV: &str = "FOLIO_SERVER_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the local filings server
    pub server_url: String,
    /// Route of the palette table
    pub palettes_path: String,
    /// Route of the text colour map
    pub text_colors_path: String,
    /// Request timeout; requests wait indefinitely when unset
    pub request_timeout_secs: Option<u64>,
    /// Menu entry applied once palettes are loaded
    pub default_palette: Option<String>,
}

impl Config {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            palettes_path: routes::PALETTES.to_string(),
            text_colors_path: routes::TEXT_COLORS.to_string(),
            request_timeout_secs: None,
            default_palette: None,
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Config(format!("{}: {}", path.display(), e)))?;
        let config = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Config file named by `FOLIO_CONFIG` (or defaults), then the
    /// `FOLIO_SERVER_URL` override
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Self::from_file(path)?,
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            if !url.is_empty() {
                config.server_url = url;
            }
        }

        Ok(config)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn client(&self) -> Result<ViewerClient> {
        Ok(ViewerClient::new(&self.server_url, self.request_timeout())?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("http://127.0.0.1:8080/")
    }
}
