use std::fmt;
use std::path::PathBuf;

pub type TransferId = u64;

/// A file to push to the import endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub path: PathBuf,
    /// Task name; a timestamped default is filled in before sending when absent.
    pub name: Option<String>,
}

impl UploadRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            name: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UploadProgress {
    pub id: TransferId,
    pub percent: f64,
    pub bytes_sent: u64,
    pub total_bytes: u64,
}

/// Raw answer of the import endpoint to a request it accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerReply {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    UploadSending { id: TransferId },
    UploadProgress(UploadProgress),
    UploadCompleted {
        id: TransferId,
        result: Result<ServerReply, TransferError>,
    },
    /// The upload queue was emptied after a cancellation.
    QueueReset { id: TransferId },
    UrlImportCompleted {
        id: TransferId,
        result: Result<ServerReply, TransferError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct TransferError {
    pub kind: FailureKind,
    pub message: String,
}

impl TransferError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    FileRead,
    HttpStatus(u16),
    Timeout,
    Cancelled,
    Busy,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::FileRead => write!(f, "cannot read file"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Cancelled => write!(f, "cancelled"),
            FailureKind::Busy => write!(f, "another upload is in progress"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
