use std::path::PathBuf;

use crate::TransferId;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked a file with the upload button or dropped one on the panel.
    FileChosen(PathBuf),
    /// User clicked "Import From URL".
    ToggleUrlMode,
    /// User closed the URL entry form.
    CancelUrlMode,
    /// User edited the URL input box.
    ImportUrlChanged(String),
    /// User clicked "Import" in the URL form.
    ConfirmImportUrl,
    /// User clicked "Cancel Upload".
    CancelUploadClicked,
    /// User clicked the panel close button.
    CloseClicked,
    /// User dismissed the error message.
    DismissError,
    /// Engine started sending the upload request.
    UploadSending { id: TransferId },
    /// Engine progress for the upload.
    UploadProgress {
        id: TransferId,
        percent: f64,
        bytes_sent: u64,
        total_bytes: u64,
    },
    /// Engine dropped the queued file.
    UploadReset { id: TransferId },
    /// Engine finished the upload request, successfully or not.
    UploadCompleted {
        id: TransferId,
        outcome: UploadOutcome,
    },
    /// Engine finished the URL import request.
    UrlImportCompleted {
        id: TransferId,
        outcome: UrlImportOutcome,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The server answered with a success status; `body` is the raw response.
    Success { body: String },
    Failed(TransferFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlImportOutcome {
    Responded { body: String },
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferFailure {
    /// Connection lost or never established.
    Network,
    /// Server answered with a non-success status.
    Status(u16),
    /// The transfer was aborted on request.
    Cancelled,
    /// Anything else that ended the transfer early.
    Other,
}
