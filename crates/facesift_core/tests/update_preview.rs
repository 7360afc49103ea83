use std::sync::Once;

use facesift_core::{update, AppState, Effect, Msg, PreviewKey};
use serde_json::json;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(sift_logging::initialize_for_tests);
}

fn state_with_matches(count: usize) -> AppState {
    let results: Vec<_> = (0..count)
        .map(|i| json!({ "image_url": format!("https://img.example.com/{i}.jpg"), "confidence": 90 }))
        .collect();
    let (state, _) = update(AppState::new(), Msg::ResultsReceived(json!({ "results": results })));
    state
}

#[test]
fn opening_installs_key_listener_once() {
    init_logging();
    let state = state_with_matches(3);

    let (state, effects) = update(state, Msg::PreviewOpened { index: 1 });
    assert_eq!(effects, vec![Effect::InstallPreviewKeys]);
    assert_eq!(state.view().preview_index, Some(1));

    // Opening another index while open replaces it without reinstalling.
    let (state, effects) = update(state, Msg::PreviewOpened { index: 2 });
    assert!(effects.is_empty());
    assert_eq!(state.view().preview_index, Some(2));
}

#[test]
fn opening_out_of_range_or_over_empty_sequence_is_rejected() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::PreviewOpened { index: 0 });
    assert!(effects.is_empty());
    assert_eq!(state.view().preview_index, None);

    let state = state_with_matches(2);
    let (state, effects) = update(state, Msg::PreviewOpened { index: 5 });
    assert!(effects.is_empty());
    assert_eq!(state.view().preview_index, None);
}

#[test]
fn arrow_keys_wrap_circularly() {
    init_logging();
    let state = state_with_matches(4);
    let (state, _) = update(state, Msg::PreviewOpened { index: 0 });

    let (state, effects) = update(state, Msg::KeyPressed(PreviewKey::ArrowLeft));
    assert!(effects.is_empty());
    assert_eq!(state.view().preview_index, Some(3));

    let (state, _) = update(state, Msg::KeyPressed(PreviewKey::ArrowRight));
    assert_eq!(state.view().preview_index, Some(0));

    let (state, _) = update(state, Msg::KeyPressed(PreviewKey::ArrowRight));
    assert_eq!(state.view().preview_index, Some(1));
}

#[test]
fn escape_closes_and_removes_key_listener() {
    init_logging();
    let state = state_with_matches(2);
    let (state, _) = update(state, Msg::PreviewOpened { index: 0 });

    let (state, effects) = update(state, Msg::KeyPressed(PreviewKey::Escape));
    assert_eq!(effects, vec![Effect::RemovePreviewKeys]);
    assert_eq!(state.view().preview_index, None);

    // A second close is a no-op; the listener is already gone.
    let (_state, effects) = update(state, Msg::PreviewClosed);
    assert!(effects.is_empty());
}

#[test]
fn keys_are_ignored_while_preview_is_closed() {
    init_logging();
    let state = state_with_matches(2);

    let (state, effects) = update(state, Msg::KeyPressed(PreviewKey::ArrowRight));
    assert!(effects.is_empty());
    assert_eq!(state.view().preview_index, None);

    let (_state, effects) = update(state, Msg::KeyPressed(PreviewKey::Escape));
    assert!(effects.is_empty());
}

#[test]
fn close_button_emits_remove_effect() {
    init_logging();
    let state = state_with_matches(2);
    let (state, _) = update(state, Msg::PreviewOpened { index: 1 });
    let (state, effects) = update(state, Msg::PreviewClosed);
    assert_eq!(effects, vec![Effect::RemovePreviewKeys]);
    assert_eq!(state.view().preview_index, None);
}
