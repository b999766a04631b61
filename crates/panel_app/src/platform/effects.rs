use panel_core::{Effect, Msg, TransferFailure, UploadOutcome, UrlImportOutcome};
use panel_engine::{EngineEvent, EngineHandle, EngineSettings, FailureKind, UploadRequest};
use panel_logging::{panel_info, panel_warn};

/// What the panel reports back to whoever embedded it.
pub trait ParentCallbacks {
    fn on_imported(&mut self);
    fn on_cancel(&mut self);
}

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            engine: EngineHandle::new(settings),
        }
    }

    pub fn run(&self, effects: Vec<Effect>, parent: &mut dyn ParentCallbacks) {
        for effect in effects {
            match effect {
                Effect::StartUpload { id, path } => {
                    panel_info!("StartUpload id={} path={:?}", id, path);
                    self.engine.upload(id, UploadRequest::new(path));
                }
                Effect::ImportFromUrl { id, url } => {
                    panel_info!("ImportFromUrl id={} url_len={}", id, url.len());
                    self.engine.import_url(id, url);
                }
                Effect::CancelUpload { id } => self.engine.cancel_upload(id),
                Effect::NotifyImported => parent.on_imported(),
                Effect::NotifyCancel => parent.on_cancel(),
            }
        }
    }

    /// Drains pending engine events as panel messages.
    pub fn poll(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(map_event)
            .collect()
    }
}

pub fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadSending { id } => Msg::UploadSending { id },
        EngineEvent::UploadProgress(progress) => Msg::UploadProgress {
            id: progress.id,
            percent: progress.percent,
            bytes_sent: progress.bytes_sent,
            total_bytes: progress.total_bytes,
        },
        EngineEvent::QueueReset { id } => Msg::UploadReset { id },
        EngineEvent::UploadCompleted { id, result } => {
            let outcome = match result {
                Ok(reply) => UploadOutcome::Success { body: reply.body },
                Err(err) => {
                    panel_warn!("Upload {} failed: {}", id, err);
                    UploadOutcome::Failed(map_failure(&err.kind))
                }
            };
            Msg::UploadCompleted { id, outcome }
        }
        EngineEvent::UrlImportCompleted { id, result } => {
            let outcome = match result {
                Ok(reply) => UrlImportOutcome::Responded { body: reply.body },
                Err(err) => {
                    panel_warn!("URL import {} failed: {}", id, err);
                    UrlImportOutcome::Failed
                }
            };
            Msg::UrlImportCompleted { id, outcome }
        }
    }
}

fn map_failure(kind: &FailureKind) -> TransferFailure {
    match kind {
        FailureKind::Network | FailureKind::Timeout => TransferFailure::Network,
        FailureKind::HttpStatus(code) => TransferFailure::Status(*code),
        FailureKind::Cancelled => TransferFailure::Cancelled,
        FailureKind::InvalidEndpoint | FailureKind::FileRead | FailureKind::Busy => {
            TransferFailure::Other
        }
    }
}
