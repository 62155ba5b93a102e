//! Look-in folder commands
use serde::Serialize;
use tokio::task::JoinHandle;

use folio_core::{CoreError, DialogSession, FolderOption, Viewer};

use super::CommandResult;
use crate::state::{AppState, Event};

#[derive(Debug, Serialize)]
pub struct FoldersInfo {
    pub open: bool,
    pub options: Vec<FolderOption>,
}

impl From<&Viewer> for FoldersInfo {
    fn from(viewer: &Viewer) -> Self {
        Self {
            open: viewer.folders().is_open(),
            options: viewer.folders().options().to_vec(),
        }
    }
}

/// Fetch the server's folder list into the dialog
///
/// With a session, the list only lands if that cancelled dialog was not
/// reopened in the meantime.
pub(crate) fn spawn_load_folders(
    state: &AppState,
    cancelled: Option<DialogSession>,
) -> JoinHandle<()> {
    let state = state.clone();

    tokio::spawn(async move {
        let paths = match state.client().lookin_folders().await {
            Ok(paths) => paths,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load look-in folders");
                state.emit(Event::RequestFailed {
                    request: "lookin_folders".to_string(),
                    error: e.to_string(),
                });
                return;
            }
        };

        let applied = state.with_viewer_mut(|viewer| {
            Ok(match cancelled {
                Some(session) => viewer.reset_folders(session, paths.clone()),
                None => {
                    viewer.load_folders(paths.clone());
                    true
                }
            })
        });

        match applied {
            Ok(true) => state.emit(Event::FoldersLoaded { paths }),
            Ok(false) => tracing::debug!("Folder dialog reopened; keeping its list"),
            Err(e) => tracing::debug!(error = %e, "Dropping folder list"),
        }
    })
}

pub(crate) fn spawn_pick_folder(state: &AppState) -> JoinHandle<()> {
    let state = state.clone();

    tokio::spawn(async move {
        let path = match state.client().pick_folder().await {
            Ok(path) => path,
            Err(e) => {
                state.emit(Event::RequestFailed {
                    request: "pick_folder".to_string(),
                    error: e.to_string(),
                });
                return;
            }
        };

        // The dialog may have been closed while the picker was up
        match state.with_viewer_mut(|viewer| Ok(viewer.pick_folder(&path))) {
            Ok(outcome) => state.emit(Event::FolderPicked { path, outcome }),
            Err(e) => tracing::debug!(error = %e, "Dropping picked folder"),
        }
    })
}

pub(crate) fn spawn_save_folders(state: &AppState, paths: Vec<String>) -> JoinHandle<()> {
    let state = state.clone();

    tokio::spawn(async move {
        match state.client().change_lookin_folders(&paths).await {
            Ok(changed) => {
                if state
                    .with_viewer_mut(|viewer| {
                        viewer.folders_saved(changed);
                        Ok(())
                    })
                    .is_ok()
                {
                    state.emit(Event::FoldersSaved { changed });
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save look-in folders");
                state.emit(Event::RequestFailed {
                    request: "change_lookin_folders".to_string(),
                    error: e.to_string(),
                });
            }
        }
    })
}

pub fn open_folder_dialog(state: &AppState) -> CommandResult<FoldersInfo> {
    match state.with_viewer_mut(|viewer| {
        viewer.open_folder_dialog();
        Ok(FoldersInfo::from(&*viewer))
    }) {
        Ok(info) => CommandResult::ok(info),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Show the server's directory picker; the answer arrives as an event
pub fn pick_folder(state: &AppState) -> CommandResult<()> {
    match state.with_viewer(|viewer| {
        if viewer.folders().is_open() {
            Ok(())
        } else {
            Err(CoreError::DialogClosed)
        }
    }) {
        Ok(()) => {
            spawn_pick_folder(state);
            CommandResult::ok(())
        }
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn remove_folders(
    state: &AppState,
    selected: Option<Vec<String>>,
    selected_only: bool,
) -> CommandResult<FoldersInfo> {
    match state.with_viewer_mut(|viewer| {
        if let Some(paths) = &selected {
            viewer.select_folders(paths);
        }
        viewer.remove_folders(selected_only);
        Ok(FoldersInfo::from(&*viewer))
    }) {
        Ok(info) => CommandResult::ok(info),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Close without saving; the server's list replaces local edits when it arrives
pub fn cancel_folder_dialog(state: &AppState) -> CommandResult<()> {
    match state.with_viewer_mut(|viewer| Ok(viewer.cancel_folder_dialog())) {
        Ok(session) => {
            spawn_load_folders(state, Some(session));
            CommandResult::ok(())
        }
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Close the dialog and post the list; returns the paths sent
pub fn save_folders(state: &AppState) -> CommandResult<Vec<String>> {
    match state.with_viewer_mut(|viewer| Ok(viewer.save_folders())) {
        Ok(paths) => {
            spawn_save_folders(state, paths.clone());
            CommandResult::ok(paths)
        }
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn get_folders(state: &AppState) -> CommandResult<FoldersInfo> {
    match state.with_viewer(|viewer| Ok(FoldersInfo::from(viewer))) {
        Ok(info) => CommandResult::ok(info),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::state;

    fn seed(state: &AppState) {
        state
            .with_viewer_mut(|viewer| {
                viewer.load_folders(vec!["/data/a".to_string(), "/data/b".to_string()]);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_open_and_remove_selected() {
        let (state, _rx) = state();
        seed(&state);

        assert!(open_folder_dialog(&state).data.unwrap().open);

        let info = remove_folders(&state, Some(vec!["/data/a".to_string()]), true)
            .data
            .unwrap();
        let paths: Vec<&str> = info.options.iter().map(|o| o.path.as_str()).collect();
        assert_eq!(paths, vec!["/data/b"]);

        let info = remove_folders(&state, None, false).data.unwrap();
        assert!(info.options.is_empty());
    }

    #[test]
    fn test_pick_requires_open_dialog() {
        let (state, _rx) = state();
        assert!(!pick_folder(&state).success);
    }

    #[tokio::test]
    async fn test_save_closes_dialog_and_reports_failure() {
        let (state, mut rx) = state();
        seed(&state);
        open_folder_dialog(&state);

        let paths = state.with_viewer_mut(|viewer| Ok(viewer.save_folders())).unwrap();
        assert_eq!(paths, vec!["/data/a", "/data/b"]);
        assert!(!get_folders(&state).data.unwrap().open);

        spawn_save_folders(&state, paths).await.unwrap();
        assert!(rx.recv().await.unwrap().contains("request-failed"));
        assert_eq!(
            state.with_viewer(|viewer| Ok(viewer.refresh_indicator())).unwrap(),
            folio_core::RefreshIndicator::Idle
        );
    }

    #[tokio::test]
    async fn test_cancel_closes_immediately() {
        let (state, _rx) = state();
        seed(&state);
        open_folder_dialog(&state);

        assert!(cancel_folder_dialog(&state).success);
        let info = get_folders(&state).data.unwrap();
        assert!(!info.open);
        assert_eq!(info.options.len(), 2);
    }

    #[tokio::test]
    async fn test_reopened_dialog_survives_late_folder_list() {
        let (state, _rx) = state();
        seed(&state);
        open_folder_dialog(&state);
        let session = state
            .with_viewer_mut(|viewer| Ok(viewer.cancel_folder_dialog()))
            .unwrap();

        open_folder_dialog(&state);
        remove_folders(&state, None, false);

        let applied = state
            .with_viewer_mut(|viewer| Ok(viewer.reset_folders(session, vec!["/data/a".to_string()])))
            .unwrap();
        assert!(!applied);
        let info = get_folders(&state).data.unwrap();
        assert!(info.open);
        assert!(info.options.is_empty());

        // Against the unreachable server the reload fails without touching the dialog
        spawn_load_folders(&state, Some(session)).await.unwrap();
        assert!(get_folders(&state).data.unwrap().open);
    }
}
