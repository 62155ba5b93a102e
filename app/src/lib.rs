//! Folio - Local filings viewer
//!
//! The frontend drives the viewer over stdin/stdout: one JSON request per
//! line in, one reply per line out, interleaved with event lines when
//! background requests to the filings server complete.

pub mod commands;
pub mod state;

use folio_core::Config;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use state::AppState;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Load what the page needs from the server: theme, folders and cards
pub fn initialize(state: &AppState) -> folio_core::Result<()> {
    commands::theme::spawn_load_theme(state);
    commands::folders::spawn_load_folders(state, None);
    commands::cards::spawn_refresh(state)?;
    Ok(())
}

pub async fn run() -> anyhow::Result<()> {
    folio_core::init_logging();

    let config = Config::load()?;
    tracing::info!(server = %config.server_url, "Starting Folio viewer");

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let state = AppState::new(config, tx)?;
    initialize(&state)?;

    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(line) = rx.recv().await {
            stdout.write_all(line.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
        Ok::<_, std::io::Error>(())
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let reply = commands::handle_line(&state, &line);
        state.send_line(reply);
    }

    // Background tasks hold senders too; give pending lines a moment to drain
    state.shutdown();
    drop(state);
    finish_writer(writer, SHUTDOWN_GRACE).await;

    tracing::info!("Folio viewer stopped");
    Ok(())
}

/// Wait for the output writer to drain; true when it finished cleanly
async fn finish_writer(writer: JoinHandle<std::io::Result<()>>, grace: Duration) -> bool {
    match tokio::time::timeout(grace, writer).await {
        Ok(Ok(Ok(()))) => true,
        Ok(Ok(Err(e))) => {
            tracing::error!(error = %e, "Output writer failed");
            false
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Output writer task aborted");
            false
        }
        Err(_) => {
            tracing::warn!("Output writer still busy at exit");
            false
        }
    }
}


#[cfg(test)]
pub(crate) mod test_support {
    use folio_core::{Config, FilingListing, PaletteTable, TextColors};
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    use crate::state::AppState;

    /// Nothing listens here, so every server request fails fast
    const UNREACHABLE: &str = "http://127.0.0.1:9/";

    const LISTING: &str = r#"{
        "acme_2020": {
            "card-header": "Acme Corp",
            "dataAttrs": ["1234", "10-K", "FY", "2020", "2020-12-31", "Yes", "2021-02-20", "acme-20201231.htm"]
        },
        "acme_2019": {
            "card-header": "Acme Corp",
            "dataAttrs": ["1234", "10-K", "FY", "2019", "2019-12-31", "Yes", "2020-02-18", "acme-20191231.htm"]
        },
        "beta_2020": {
            "card-header": "Beta Inc",
            "dataAttrs": ["5678", "10-Q", "Q2", "2020", "2020-06-30", "No", "2020-08-01", "beta-20200630.htm"]
        }
    }"#;

    const PALETTES: &str = r##"{
        "ocean": ["Ocean", [["--main-color", "#003f5c"]]],
        "desert": ["Desert", [["--main-color", "#c2b280"]]]
    }"##;

    pub(crate) fn state() -> (AppState, UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let state = AppState::new(Config::new(UNREACHABLE), tx).unwrap();
        (state, rx)
    }

    pub(crate) fn load_listing(state: &AppState) {
        let listing: FilingListing = serde_json::from_str(LISTING).unwrap();
        state
            .with_viewer_mut(|viewer| {
                let ticket = viewer.begin_refresh();
                assert!(viewer.finish_refresh(ticket, &listing));
                Ok(())
            })
            .unwrap();
    }

    pub(crate) fn load_theme(state: &AppState) {
        let palettes: PaletteTable = serde_json::from_str(PALETTES).unwrap();
        let colors: TextColors = serde_json::from_str(r##"{"white": "#ffffff"}"##).unwrap();
        state
            .with_viewer_mut(|viewer| viewer.load_theme(palettes, colors))
            .unwrap();
    }

    pub(crate) fn card_id(state: &AppState, route: &str) -> String {
        state
            .with_viewer(|viewer| Ok(viewer.card(route)?.id.clone()))
            .unwrap()
    }
}
