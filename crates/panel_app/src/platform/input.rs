use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use panel_core::{Msg, PanelViewModel};
use url::Url;

use super::ui::constants::*;

/// What a terminal event asks the host to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Dispatch(Msg),
    /// Open the file dialog behind the upload button.
    PickFile,
    None,
}

pub fn map_key(view: &PanelViewModel, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Dispatch(Msg::CloseClicked),
            KeyCode::Char(KEY_UPLOAD) if view.upload_enabled => Action::PickFile,
            _ => Action::None,
        };
    }

    if view.show_url_form {
        return match key.code {
            KeyCode::Esc => Action::Dispatch(Msg::CancelUrlMode),
            KeyCode::Enter => Action::Dispatch(Msg::ConfirmImportUrl),
            KeyCode::Backspace => {
                let mut url = view.import_url.clone();
                url.pop();
                Action::Dispatch(Msg::ImportUrlChanged(url))
            }
            KeyCode::Char(c) => {
                let mut url = view.import_url.clone();
                url.push(c);
                Action::Dispatch(Msg::ImportUrlChanged(url))
            }
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Char(KEY_UPLOAD) if view.upload_enabled => Action::PickFile,
        KeyCode::Char(KEY_IMPORT_URL) => Action::Dispatch(Msg::ToggleUrlMode),
        KeyCode::Char(KEY_CANCEL_UPLOAD) => Action::Dispatch(Msg::CancelUploadClicked),
        KeyCode::Char(KEY_DISMISS_ERROR) => Action::Dispatch(Msg::DismissError),
        KeyCode::Char(KEY_CLOSE) | KeyCode::Esc => Action::Dispatch(Msg::CloseClicked),
        _ => Action::None,
    }
}

/// Pasted text is URL input inside the form and a dropped file anywhere else.
pub fn map_paste(view: &PanelViewModel, text: &str) -> Action {
    if view.show_url_form {
        let mut url = view.import_url.clone();
        url.push_str(text.trim_end_matches(&['\r', '\n'][..]));
        return Action::Dispatch(Msg::ImportUrlChanged(url));
    }
    match dropped_path(text) {
        Some(path) => Action::Dispatch(Msg::FileChosen(path)),
        None => Action::None,
    }
}

/// Terminals deliver drops as quoted, backslash-escaped or `file://` paths.
fn dropped_path(text: &str) -> Option<PathBuf> {
    let trimmed = text.trim().trim_matches(&['\'', '"'][..]);
    if trimmed.starts_with("file://") {
        return Url::parse(trimmed).ok()?.to_file_path().ok();
    }
    let unescaped = trimmed.replace("\\ ", " ");
    (!unescaped.is_empty()).then(|| PathBuf::from(unescaped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_core::{update, PanelState};
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn url_form_view(url: &str) -> PanelViewModel {
        let (state, _) = update(PanelState::new(), Msg::ToggleUrlMode);
        let (state, _) = update(state, Msg::ImportUrlChanged(url.to_string()));
        state.view()
    }

    #[test]
    fn hotkeys_map_to_panel_messages() {
        let view = PanelState::new().view();

        assert_eq!(map_key(&view, key(KeyCode::Char('u'))), Action::PickFile);
        assert_eq!(
            map_key(&view, key(KeyCode::Char('i'))),
            Action::Dispatch(Msg::ToggleUrlMode)
        );
        assert_eq!(
            map_key(&view, key(KeyCode::Char('q'))),
            Action::Dispatch(Msg::CloseClicked)
        );
        assert_eq!(
            map_key(&view, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Dispatch(Msg::CloseClicked)
        );
    }

    #[test]
    fn upload_key_is_inert_while_busy() {
        let (state, _) = update(PanelState::new(), Msg::FileChosen(PathBuf::from("a.zip")));

        assert_eq!(map_key(&state.view(), key(KeyCode::Char('u'))), Action::None);
    }

    #[test]
    fn url_form_captures_typing() {
        let view = url_form_view("http");

        assert_eq!(
            map_key(&view, key(KeyCode::Char('s'))),
            Action::Dispatch(Msg::ImportUrlChanged("https".to_string()))
        );
        assert_eq!(
            map_key(&view, key(KeyCode::Backspace)),
            Action::Dispatch(Msg::ImportUrlChanged("htt".to_string()))
        );
        assert_eq!(
            map_key(&view, key(KeyCode::Enter)),
            Action::Dispatch(Msg::ConfirmImportUrl)
        );
        assert_eq!(
            map_key(&view, key(KeyCode::Esc)),
            Action::Dispatch(Msg::CancelUrlMode)
        );
    }

    #[test]
    fn paste_outside_form_is_a_drop() {
        let view = PanelState::new().view();

        assert_eq!(
            map_paste(&view, "'/home/me/My Survey.zip'\n"),
            Action::Dispatch(Msg::FileChosen(PathBuf::from("/home/me/My Survey.zip")))
        );
        assert_eq!(
            map_paste(&view, "/home/me/My\\ Survey.zip"),
            Action::Dispatch(Msg::FileChosen(PathBuf::from("/home/me/My Survey.zip")))
        );
        assert_eq!(map_paste(&view, "  \n"), Action::None);
    }

    #[cfg(unix)]
    #[test]
    fn file_urls_are_fully_decoded() {
        let view = PanelState::new().view();

        assert_eq!(
            map_paste(&view, "file:///tmp/a%20b.zip"),
            Action::Dispatch(Msg::FileChosen(PathBuf::from("/tmp/a b.zip")))
        );
        assert_eq!(
            map_paste(&view, "file:///tmp/caf%C3%A9%20%28v2%29.zip\n"),
            Action::Dispatch(Msg::FileChosen(PathBuf::from("/tmp/café (v2).zip")))
        );
        assert_eq!(map_paste(&view, "file://server/share/a.zip"), Action::None);
    }

    #[test]
    fn ctrl_u_opens_the_picker_from_the_url_form() {
        let view = url_form_view("https://");
        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);

        assert_eq!(map_key(&view, ctrl_u), Action::PickFile);
        assert_eq!(
            map_key(&view, key(KeyCode::Char('u'))),
            Action::Dispatch(Msg::ImportUrlChanged("https://u".to_string()))
        );
    }

    #[test]
    fn paste_inside_form_appends_to_url() {
        let view = url_form_view("");

        assert_eq!(
            map_paste(&view, "https://example.com/a.zip\n"),
            Action::Dispatch(Msg::ImportUrlChanged(
                "https://example.com/a.zip".to_string()
            ))
        );
    }
}
