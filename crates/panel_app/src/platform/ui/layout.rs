use ratatui::layout::{Constraint, Layout, Rect};

/// Screen regions of the panel, top to bottom.
pub struct PanelAreas {
    pub error: Rect,
    pub help: Rect,
    pub buttons: Rect,
    pub url_form: Rect,
    pub progress: Rect,
    pub footer: Rect,
}

pub fn split(area: Rect, show_error: bool, show_url_form: bool, uploading: bool) -> PanelAreas {
    let rows = Layout::vertical([
        Constraint::Length(if show_error { 3 } else { 0 }),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(if show_url_form { 3 } else { 0 }),
        Constraint::Length(if uploading { 3 } else { 0 }),
        Constraint::Min(1),
    ])
    .split(area);

    PanelAreas {
        error: rows[0],
        help: rows[1],
        buttons: rows[2],
        url_form: rows[3],
        progress: rows[4],
        footer: rows[5],
    }
}
