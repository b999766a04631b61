use crate::view_model::{PanelViewModel, MIN_IMPORT_URL_LEN};

pub type TransferId = u64;

/// The single transfer slot. Only one transfer may be active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transfer {
    #[default]
    Idle,
    Uploading { id: TransferId },
    ImportingFromUrl { id: TransferId },
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UploadProgress {
    pub percent: f64,
    pub bytes_sent: u64,
    pub total_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelState {
    error: String,
    type_url: bool,
    transfer: Transfer,
    progress: UploadProgress,
    import_url: String,
    next_transfer_id: TransferId,
    dirty: bool,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> PanelViewModel {
        PanelViewModel::from_state(self)
    }

    /// Returns whether the view changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn type_url(&self) -> bool {
        self.type_url
    }

    pub fn transfer(&self) -> Transfer {
        self.transfer
    }

    pub fn progress(&self) -> UploadProgress {
        self.progress
    }

    pub fn import_url(&self) -> &str {
        &self.import_url
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.transfer, Transfer::Uploading { .. })
    }

    pub fn is_importing_from_url(&self) -> bool {
        matches!(self.transfer, Transfer::ImportingFromUrl { .. })
    }

    pub fn is_idle(&self) -> bool {
        self.transfer == Transfer::Idle
    }

    pub fn can_submit_url(&self) -> bool {
        self.is_idle() && self.import_url.chars().count() >= MIN_IMPORT_URL_LEN
    }

    pub(crate) fn active_upload(&self) -> Option<TransferId> {
        match self.transfer {
            Transfer::Uploading { id } => Some(id),
            _ => None,
        }
    }

    pub(crate) fn active_url_import(&self) -> Option<TransferId> {
        match self.transfer {
            Transfer::ImportingFromUrl { id } => Some(id),
            _ => None,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error = message.into();
        self.dirty = true;
    }

    pub(crate) fn clear_error(&mut self) {
        if !self.error.is_empty() {
            self.error.clear();
            self.dirty = true;
        }
    }

    pub(crate) fn set_type_url(&mut self, visible: bool) {
        if self.type_url != visible {
            self.type_url = visible;
            self.dirty = true;
        }
    }

    pub(crate) fn set_import_url(&mut self, url: String) {
        if self.import_url != url {
            self.import_url = url;
            self.dirty = true;
        }
    }

    /// Claims the transfer slot for an upload. Caller checks `is_idle` first.
    pub(crate) fn begin_upload(&mut self) -> TransferId {
        let id = self.allocate_id();
        self.transfer = Transfer::Uploading { id };
        self.progress = UploadProgress::default();
        self.type_url = false;
        self.dirty = true;
        id
    }

    /// Claims the transfer slot for a URL import. Caller checks `is_idle` first.
    pub(crate) fn begin_url_import(&mut self) -> TransferId {
        let id = self.allocate_id();
        self.transfer = Transfer::ImportingFromUrl { id };
        self.dirty = true;
        id
    }

    pub(crate) fn finish_transfer(&mut self) {
        if self.transfer != Transfer::Idle {
            self.transfer = Transfer::Idle;
            self.dirty = true;
        }
    }

    pub(crate) fn set_progress(&mut self, progress: UploadProgress) {
        self.progress = progress;
        self.dirty = true;
    }

    pub(crate) fn reset_progress(&mut self) {
        if self.progress != UploadProgress::default() {
            self.progress = UploadProgress::default();
            self.dirty = true;
        }
    }

    fn allocate_id(&mut self) -> TransferId {
        self.next_transfer_id += 1;
        self.next_transfer_id
    }
}
