use std::path::Path;

use panel_logging::{panel_debug, panel_info, panel_warn};

use crate::response::{parse_import_reply, upload_reply_error, url_import_reply_error};
use crate::{
    Effect, Msg, PanelState, TransferFailure, UploadOutcome, UploadProgress, UrlImportOutcome,
    NOT_A_ZIP_ERROR, UPLOAD_CONNECTION_ERROR, UPLOAD_FAILED_ERROR, URL_IMPORT_CONNECTION_ERROR,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PanelState, msg: Msg) -> (PanelState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileChosen(path) => {
            if !state.is_idle() {
                panel_debug!("Ignoring file {:?}: a transfer is already active", path);
                return (state, Vec::new());
            }
            if !is_zip(&path) {
                state.set_error(NOT_A_ZIP_ERROR);
                return (state, Vec::new());
            }
            state.clear_error();
            let id = state.begin_upload();
            panel_info!("Upload {} queued for {:?}", id, path);
            vec![Effect::StartUpload { id, path }]
        }
        Msg::ToggleUrlMode => {
            // Switching modes mid-transfer is rejected; the form would race the widget.
            if state.is_idle() {
                let visible = !state.type_url();
                state.set_type_url(visible);
            }
            Vec::new()
        }
        Msg::CancelUrlMode => {
            state.set_type_url(false);
            Vec::new()
        }
        Msg::ImportUrlChanged(url) => {
            if !state.is_importing_from_url() {
                state.set_import_url(url);
            }
            Vec::new()
        }
        Msg::ConfirmImportUrl => {
            if !state.can_submit_url() {
                return (state, Vec::new());
            }
            state.clear_error();
            let id = state.begin_url_import();
            let url = state.import_url().to_string();
            panel_info!("URL import {} requested url_len={}", id, url.len());
            vec![Effect::ImportFromUrl { id, url }]
        }
        Msg::CancelUploadClicked => cancel_upload(&mut state),
        Msg::CloseClicked => {
            let mut effects = cancel_upload(&mut state);
            effects.push(Effect::NotifyCancel);
            effects
        }
        Msg::DismissError => {
            state.clear_error();
            Vec::new()
        }
        Msg::UploadSending { id } => {
            if state.active_upload() == Some(id) {
                state.set_type_url(false);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::UploadProgress {
            id,
            percent,
            bytes_sent,
            total_bytes,
        } => {
            if state.active_upload() == Some(id) {
                state.set_progress(UploadProgress {
                    percent: percent.clamp(0.0, 100.0),
                    bytes_sent,
                    total_bytes,
                });
            }
            Vec::new()
        }
        Msg::UploadReset { id } => {
            match state.active_upload() {
                Some(active) if active != id => {}
                Some(_) => {
                    state.finish_transfer();
                    state.reset_progress();
                }
                None => state.reset_progress(),
            }
            Vec::new()
        }
        Msg::UploadCompleted { id, outcome } => {
            if state.active_upload() != Some(id) {
                panel_debug!("Ignoring completion of stale upload {}", id);
                return (state, Vec::new());
            }
            state.finish_transfer();
            match outcome {
                UploadOutcome::Success { body } => match parse_import_reply(&body) {
                    Ok(_) => {
                        panel_info!("Upload {} accepted by server", id);
                        vec![Effect::NotifyImported]
                    }
                    Err(err) => {
                        panel_warn!("Upload {} returned unusable reply: {:?}", id, err);
                        state.set_error(upload_reply_error(&body, &err));
                        Vec::new()
                    }
                },
                UploadOutcome::Failed(failure) => {
                    panel_warn!("Upload {} failed: {:?}", id, failure);
                    match failure {
                        TransferFailure::Network => state.set_error(UPLOAD_CONNECTION_ERROR),
                        TransferFailure::Status(_) | TransferFailure::Other => {
                            state.set_error(UPLOAD_FAILED_ERROR)
                        }
                        TransferFailure::Cancelled => {}
                    }
                    Vec::new()
                }
            }
        }
        Msg::UrlImportCompleted { id, outcome } => {
            if state.active_url_import() != Some(id) {
                panel_debug!("Ignoring completion of stale URL import {}", id);
                return (state, Vec::new());
            }
            let effects = match outcome {
                UrlImportOutcome::Responded { body } => match parse_import_reply(&body) {
                    Ok(_) => {
                        panel_info!("URL import {} accepted by server", id);
                        vec![Effect::NotifyImported]
                    }
                    Err(err) => {
                        panel_warn!("URL import {} rejected: {:?}", id, err);
                        state.set_error(url_import_reply_error(&body, &err));
                        Vec::new()
                    }
                },
                UrlImportOutcome::Failed => {
                    panel_warn!("URL import {} could not reach the server", id);
                    state.set_error(URL_IMPORT_CONNECTION_ERROR);
                    Vec::new()
                }
            };
            state.finish_transfer();
            effects
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn cancel_upload(state: &mut PanelState) -> Vec<Effect> {
    match state.active_upload() {
        Some(id) => {
            panel_info!("Upload {} cancelled by user", id);
            state.finish_transfer();
            vec![Effect::CancelUpload { id }]
        }
        None => Vec::new(),
    }
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}
