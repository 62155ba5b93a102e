//! Application state management
use folio_core::{Config, CoreError, Picked, Result, Viewer, ViewerClient};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Notifications pushed to the frontend when background work completes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "kebab-case")]
pub enum Event {
    CardsRefreshed { count: usize },
    RefreshFailed { error: String },
    ThemeLoaded { palettes: usize },
    FoldersLoaded { paths: Vec<String> },
    FolderPicked { path: String, outcome: Picked },
    FoldersSaved { changed: bool },
    RequestFailed { request: String, error: String },
}

/// Thread-safe application state wrapper
#[derive(Clone)]
pub struct AppState {
    viewer: Arc<RwLock<Option<Viewer>>>,
    client: ViewerClient,
    events: UnboundedSender<String>,
}

impl AppState {
    pub fn new(config: Config, events: UnboundedSender<String>) -> Result<Self> {
        let client = config.client()?;
        let viewer = Viewer::new(config);

        Ok(Self {
            viewer: Arc::new(RwLock::new(Some(viewer))),
            client,
            events,
        })
    }

    pub fn with_viewer<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Viewer) -> Result<T>,
    {
        let guard = self.viewer.read();
        match guard.as_ref() {
            Some(viewer) => f(viewer),
            None => Err(CoreError::NotInitialized),
        }
    }

    pub fn with_viewer_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Viewer) -> Result<T>,
    {
        let mut guard = self.viewer.write();
        match guard.as_mut() {
            Some(viewer) => f(viewer),
            None => Err(CoreError::NotInitialized),
        }
    }

    pub fn client(&self) -> &ViewerClient {
        &self.client
    }

    /// Queue a line for the frontend; dropped once the output side is gone
    pub fn send_line(&self, line: String) {
        if self.events.send(line).is_err() {
            tracing::debug!("Output closed; dropping line");
        }
    }

    pub fn emit(&self, event: Event) {
        match serde_json::to_string(&event) {
            Ok(line) => self.send_line(line),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize event"),
        }
    }

    /// Tear down the viewer; late background results are discarded
    pub fn shutdown(&self) {
        *self.viewer.write() = None;
        tracing::info!("Viewer shut down");
    }
}
