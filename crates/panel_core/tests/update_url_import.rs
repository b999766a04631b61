use std::path::PathBuf;
use std::sync::Once;

use panel_core::{
    update, Effect, Msg, PanelState, Transfer, UrlImportOutcome, URL_IMPORT_CONNECTION_ERROR,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(panel_logging::initialize_for_tests);
}

fn type_url(state: PanelState, url: &str) -> PanelState {
    let (state, _) = update(state, Msg::ToggleUrlMode);
    let (state, _) = update(state, Msg::ImportUrlChanged(url.to_string()));
    state
}

fn submit(state: PanelState) -> (PanelState, u64) {
    let (state, effects) = update(state, Msg::ConfirmImportUrl);
    let id = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ImportFromUrl { id, .. } => Some(*id),
            _ => None,
        })
        .expect("import effect");
    (state, id)
}

fn respond(state: PanelState, id: u64, body: &str) -> (PanelState, Vec<Effect>) {
    update(
        state,
        Msg::UrlImportCompleted {
            id,
            outcome: UrlImportOutcome::Responded {
                body: body.to_string(),
            },
        },
    )
}

#[test]
fn toggle_flips_url_form() {
    init_logging();
    let (state, _) = update(PanelState::new(), Msg::ToggleUrlMode);
    assert!(state.type_url());
    let (state, _) = update(state, Msg::ToggleUrlMode);
    assert!(!state.type_url());

    let (state, _) = update(state, Msg::ToggleUrlMode);
    let (state, _) = update(state, Msg::CancelUrlMode);
    assert!(!state.type_url());
}

#[test]
fn confirm_emits_import_effect_with_verbatim_url() {
    init_logging();
    let state = type_url(PanelState::new(), " https://example.com/a.zip");

    let (state, effects) = update(state, Msg::ConfirmImportUrl);

    assert_eq!(
        effects,
        vec![Effect::ImportFromUrl {
            id: 1,
            url: " https://example.com/a.zip".to_string(),
        }]
    );
    assert!(state.is_importing_from_url());
    assert!(!state.is_uploading());
}

#[test]
fn short_urls_cannot_be_submitted() {
    init_logging();
    let state = type_url(PanelState::new(), "abc");
    assert!(!state.view().url_submit_enabled);

    let (state, effects) = update(state, Msg::ConfirmImportUrl);
    assert!(effects.is_empty());
    assert!(state.is_idle());

    let (state, _) = update(state, Msg::ImportUrlChanged("abcd".to_string()));
    assert!(state.view().url_submit_enabled);
}

#[test]
fn reply_with_id_notifies_parent() {
    init_logging();
    let (state, id) = submit(type_url(PanelState::new(), "https://example.com"));

    let (state, effects) = respond(state, id, r#"{"id": "7"}"#);

    assert_eq!(effects, vec![Effect::NotifyImported]);
    assert!(!state.is_importing_from_url());
    assert_eq!(state.error(), "");
}

#[test]
fn server_error_field_is_shown_verbatim() {
    init_logging();
    let (state, id) = submit(type_url(PanelState::new(), "https://example.com"));

    let (state, effects) = respond(state, id, r#"{"error": "bad url"}"#);

    assert!(effects.is_empty());
    assert_eq!(state.error(), "bad url");
    assert!(!state.is_importing_from_url());
    // The form stays open for another attempt.
    assert!(state.type_url());
}

#[test]
fn reply_without_id_or_error_embeds_response() {
    init_logging();
    let (state, id) = submit(type_url(PanelState::new(), "https://example.com"));

    let (state, _) = respond(state, id, r#"{"status": "queued"}"#);

    assert_eq!(
        state.error(),
        r#"Cannot import from URL, server responded: {"status":"queued"}"#
    );
}

#[test]
fn network_failure_shows_connection_message_and_clears_flag() {
    init_logging();
    let (state, id) = submit(type_url(PanelState::new(), "https://example.com"));

    let (state, effects) = update(
        state,
        Msg::UrlImportCompleted {
            id,
            outcome: UrlImportOutcome::Failed,
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.error(), URL_IMPORT_CONNECTION_ERROR);
    assert!(!state.is_importing_from_url());
}

#[test]
fn url_input_is_frozen_while_importing() {
    init_logging();
    let (state, _) = submit(type_url(PanelState::new(), "https://example.com"));

    let (state, _) = update(state, Msg::ImportUrlChanged("https://other".to_string()));

    assert_eq!(state.import_url(), "https://example.com");
    assert!(!state.view().url_input_enabled);
}

#[test]
fn uploads_and_url_imports_exclude_each_other() {
    init_logging();
    let (state, id) = submit(type_url(PanelState::new(), "https://example.com"));

    let (state, effects) = update(state, Msg::FileChosen(PathBuf::from("task.zip")));
    assert!(effects.is_empty());
    assert_eq!(state.transfer(), Transfer::ImportingFromUrl { id });

    let (state, effects) = update(state, Msg::ConfirmImportUrl);
    assert!(effects.is_empty());

    let (state, _) = respond(state, id, "{}");
    let (state, effects) = update(state, Msg::FileChosen(PathBuf::from("task.zip")));
    assert_eq!(effects.len(), 1);
    assert!(state.is_uploading());

    let (state, effects) = update(state, Msg::ConfirmImportUrl);
    assert!(effects.is_empty());
    assert!(state.is_uploading());
}

#[test]
fn mode_switch_is_rejected_during_upload() {
    init_logging();
    let (state, _) = update(PanelState::new(), Msg::FileChosen(PathBuf::from("task.zip")));

    let (state, _) = update(state, Msg::ToggleUrlMode);

    assert!(!state.type_url());
}
