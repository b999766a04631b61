//! Import panel core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod response;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{Msg, TransferFailure, UploadOutcome, UrlImportOutcome};
pub use response::{is_truthy_id, ReplyError};
pub use state::{PanelState, Transfer, TransferId, UploadProgress};
pub use update::update;
pub use view_model::{
    format_bytes, PanelViewModel, HELP_TEXT, MIN_IMPORT_URL_LEN, PANEL_TITLE,
};

/// Shown when the upload connection drops mid-transfer.
pub const UPLOAD_CONNECTION_ERROR: &str =
    "Cannot upload file. Check your internet connection and try again.";
/// Shown when the server rejects an upload with a non-success status.
pub const UPLOAD_FAILED_ERROR: &str =
    "An error occured while uploading the file. Please try again.";
/// Shown when the URL import request cannot reach the server.
pub const URL_IMPORT_CONNECTION_ERROR: &str =
    "Cannot import from URL. Check your internet connection.";
/// Shown when a dropped or picked file is not a zip archive.
pub const NOT_A_ZIP_ERROR: &str = "Only .zip files can be imported.";
