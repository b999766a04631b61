use crate::PanelState;

pub const PANEL_TITLE: &str = "Import Existing Assets";
pub const HELP_TEXT: &str = "You can import .zip files that have been exported from existing \
tasks via Download Assets -> All Assets.";
/// Shortest URL the submit control accepts.
pub const MIN_IMPORT_URL_LEN: usize = 4;

/// Everything a renderer needs to draw the panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelViewModel {
    pub error: Option<String>,
    pub show_url_form: bool,
    pub import_url: String,
    pub uploading: bool,
    pub importing_from_url: bool,
    pub progress_percent: f64,
    pub bytes_sent: u64,
    pub total_bytes: u64,
    pub progress_label: String,
    pub upload_enabled: bool,
    pub url_toggle_enabled: bool,
    pub url_input_enabled: bool,
    pub url_submit_enabled: bool,
    pub cancel_upload_visible: bool,
}

impl PanelViewModel {
    pub(crate) fn from_state(state: &PanelState) -> Self {
        let progress = state.progress();
        let uploading = state.is_uploading();
        let progress_label = if uploading {
            format!(
                "{:.0}% ({} of {})",
                progress.percent.floor(),
                format_bytes(progress.bytes_sent),
                format_bytes(progress.total_bytes)
            )
        } else {
            String::new()
        };

        Self {
            error: (!state.error().is_empty()).then(|| state.error().to_string()),
            show_url_form: state.type_url(),
            import_url: state.import_url().to_string(),
            uploading,
            importing_from_url: state.is_importing_from_url(),
            progress_percent: if uploading { progress.percent } else { 0.0 },
            bytes_sent: progress.bytes_sent,
            total_bytes: progress.total_bytes,
            progress_label,
            upload_enabled: state.is_idle(),
            url_toggle_enabled: state.is_idle(),
            url_input_enabled: !state.is_importing_from_url(),
            url_submit_enabled: state.can_submit_url(),
            cancel_upload_visible: uploading,
        }
    }
}

/// Formats a byte count with binary units, e.g. `1.5 MB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::format_bytes;

    #[test]
    fn formats_bytes_with_units() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
    }
}
