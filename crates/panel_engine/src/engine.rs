use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use panel_logging::{panel_error, panel_info, panel_warn};
use tokio_util::sync::CancellationToken;

use crate::client::{ChannelProgressSink, ImportClient, ReqwestImportClient};
use crate::{EngineEvent, EngineSettings, FailureKind, TransferError, TransferId, UploadRequest};

enum EngineCommand {
    Upload {
        id: TransferId,
        request: UploadRequest,
    },
    ImportUrl {
        id: TransferId,
        url: String,
    },
    CancelUpload {
        id: TransferId,
    },
}

/// The single upload slot: id of the file in flight and how to abort it.
type ActiveUpload = Arc<Mutex<Option<(TransferId, CancellationToken)>>>;

pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: EngineSettings) -> Self {
        Self::with_client(Arc::new(ReqwestImportClient::new(settings)))
    }

    pub fn with_client(client: Arc<dyn ImportClient>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    panel_error!("Failed to start transfer runtime: {}", err);
                    return;
                }
            };
            let active: ActiveUpload = Arc::new(Mutex::new(None));
            while let Ok(command) = cmd_rx.recv() {
                handle_command(&runtime, client.clone(), &active, command, &event_tx);
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn upload(&self, id: TransferId, request: UploadRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Upload { id, request });
    }

    pub fn import_url(&self, id: TransferId, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::ImportUrl {
            id,
            url: url.into(),
        });
    }

    /// Aborts the upload `id` if it is still in flight and empties the queue.
    pub fn cancel_upload(&self, id: TransferId) {
        let _ = self.cmd_tx.send(EngineCommand::CancelUpload { id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    client: Arc<dyn ImportClient>,
    active: &ActiveUpload,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Upload { id, request } => {
            let cancel = CancellationToken::new();
            {
                let mut slot = lock_slot(active);
                if let Some((busy_id, _)) = slot.as_ref() {
                    panel_warn!("Upload {} rejected: upload {} still in flight", id, busy_id);
                    let _ = event_tx.send(EngineEvent::UploadCompleted {
                        id,
                        result: Err(TransferError::new(
                            FailureKind::Busy,
                            format!("upload {busy_id} still in flight"),
                        )),
                    });
                    return;
                }
                *slot = Some((id, cancel.clone()));
            }

            let active = active.clone();
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let sink = ChannelProgressSink::new(event_tx.clone());
                let result = client.upload(id, &request, &sink, &cancel).await;
                release_slot(&active, id);
                let cancelled = matches!(&result, Err(err) if err.kind == FailureKind::Cancelled);
                let _ = event_tx.send(EngineEvent::UploadCompleted { id, result });
                if cancelled {
                    let _ = event_tx.send(EngineEvent::QueueReset { id });
                }
            });
        }
        EngineCommand::ImportUrl { id, url } => {
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let result = client.import_url(id, &url).await;
                let _ = event_tx.send(EngineEvent::UrlImportCompleted { id, result });
            });
        }
        EngineCommand::CancelUpload { id } => {
            let mut slot = lock_slot(active);
            match slot.take() {
                Some((active_id, cancel)) if active_id == id => {
                    // The slot is free from here on; the aborted task only reports back.
                    panel_info!("Cancelling upload {}", id);
                    cancel.cancel();
                }
                other => {
                    *slot = other;
                    // Nothing in flight: the queue is already empty.
                    let _ = event_tx.send(EngineEvent::QueueReset { id });
                }
            }
        }
    }
}

fn lock_slot(
    active: &ActiveUpload,
) -> std::sync::MutexGuard<'_, Option<(TransferId, CancellationToken)>> {
    active.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn release_slot(active: &ActiveUpload, id: TransferId) {
    let mut slot = lock_slot(active);
    if matches!(slot.as_ref(), Some((active_id, _)) if *active_id == id) {
        *slot = None;
    }
}
