use std::path::PathBuf;

use crate::TransferId;

/// Work requested by `update` for the host to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartUpload { id: TransferId, path: PathBuf },
    ImportFromUrl { id: TransferId, url: String },
    CancelUpload { id: TransferId },
    /// Parent callback: an import was accepted by the server.
    NotifyImported,
    /// Parent callback: the user dismissed the panel.
    NotifyCancel,
}
