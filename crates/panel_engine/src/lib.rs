//! Import panel engine: transfer IO and effect execution.
mod client;
mod engine;
mod naming;
mod settings;
mod types;

pub use client::{ChannelProgressSink, ImportClient, ProgressSink, ReqwestImportClient};
pub use engine::EngineHandle;
pub use naming::{default_task_name, iso_timestamp_now};
pub use settings::{CsrfToken, EngineSettings};
pub use types::{
    EngineEvent, FailureKind, ServerReply, TransferError, TransferId, UploadProgress,
    UploadRequest,
};
