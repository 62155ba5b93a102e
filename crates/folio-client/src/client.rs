//! Filings server client

use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use folio_cards::FilingListing;
use folio_theme::{PaletteTable, TextColors};

use crate::error::ClientError;
use crate::Result;

/// Server routes, relative to the base URL
pub mod routes {
    pub const LISTING: &str = "getLoc";
    pub const LOOKIN_FOLDERS: &str = "getLookinFolders";
    pub const PICK_FOLDER: &str = "selectLookinFolders";
    pub const CHANGE_FOLDERS: &str = "changeLookinFolders";
    pub const PALETTES: &str = "locals/updatable/all_pals_sorted.json";
    pub const TEXT_COLORS: &str = "locals/updatable/txt_colors.json";
}

#[derive(Debug, Clone)]
pub struct ViewerClient {
    client: reqwest::Client,
    base: Url,
}

impl ViewerClient {
    /// Client for the server at `base`; without a timeout requests wait
    /// for as long as the server takes
    pub fn new(base: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base: base_url(base)?,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn endpoint(&self, route: &str) -> Result<Url> {
        Ok(self.base.join(route)?)
    }

    async fn get_text(&self, route: &str) -> Result<String> {
        let url = self.endpoint(route)?;
        tracing::debug!(url = %url, "GET");

        let resp = self.client.get(url).send().await?;
        read_body(resp).await
    }

    async fn get_json<T: DeserializeOwned>(&self, route: &str) -> Result<T> {
        let body = self.get_text(route).await?;
        decode(&body)
    }

    /// Rescan the look-in folders and return the filings found
    pub async fn list_filings(&self) -> Result<FilingListing> {
        self.get_json(routes::LISTING).await
    }

    pub async fn lookin_folders(&self) -> Result<Vec<String>> {
        self.get_json(routes::LOOKIN_FOLDERS).await
    }

    /// Ask the server to show its native directory picker; an empty string
    /// means the picker was cancelled
    pub async fn pick_folder(&self) -> Result<String> {
        self.get_text(routes::PICK_FOLDER).await
    }

    /// Replace the server's look-in folders; true when the set changed
    pub async fn change_lookin_folders(&self, paths: &[String]) -> Result<bool> {
        let url = self.endpoint(routes::CHANGE_FOLDERS)?;
        tracing::debug!(url = %url, count = paths.len(), "POST");

        let resp = self.client.post(url).json(paths).send().await?;
        let body = read_body(resp).await?;
        decode(&body)
    }

    /// Palette table at `route`, normally [`routes::PALETTES`]
    pub async fn palettes(&self, route: &str) -> Result<PaletteTable> {
        self.get_json(route).await
    }

    /// Text colour map at `route`, normally [`routes::TEXT_COLORS`]
    pub async fn text_colors(&self, route: &str) -> Result<TextColors> {
        self.get_json(route).await
    }
}

async fn read_body(resp: reqwest::Response) -> Result<String> {
    let status = resp.status();
    if !status.is_success() {
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        return Err(ClientError::Status(status.as_u16(), reason));
    }
    Ok(resp.text().await?)
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    Ok(serde_json::from_str(body.trim())?)
}

/// Parse the base URL so relative routes resolve below its path
fn base_url(base: &str) -> Result<Url> {
    let mut url = Url::parse(base.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
