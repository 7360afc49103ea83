use crate::normalize::{normalize_response, SearchOutcome};
use crate::view_model::LastSearchStats;
use crate::{AppState, Effect, Msg, PreviewKey, StatusLine};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ResultsReceived(body) => {
            let preview_was_open = match normalize_response(&body) {
                SearchOutcome::Matches {
                    records,
                    dropped_no_locator,
                    dropped_low_confidence,
                } => {
                    let status = if records.is_empty() {
                        StatusLine::NoMatches
                    } else {
                        StatusLine::Found(records.len())
                    };
                    state.publish_matches(
                        records,
                        status,
                        Some(LastSearchStats {
                            dropped_no_locator,
                            dropped_low_confidence,
                        }),
                    )
                }
                SearchOutcome::Empty => {
                    state.publish_matches(Vec::new(), StatusLine::NoMatches, None)
                }
                SearchOutcome::Malformed => {
                    state.publish_matches(Vec::new(), StatusLine::InvalidResponse, None)
                }
            };
            if preview_was_open {
                vec![Effect::RemovePreviewKeys]
            } else {
                Vec::new()
            }
        }
        Msg::ToggleSelect { index } => {
            state.toggle_select(index);
            Vec::new()
        }
        Msg::SelectAllToggled => {
            state.select_all_visible();
            Vec::new()
        }
        Msg::ClearSelection => {
            state.clear_selection();
            Vec::new()
        }
        Msg::ExportRequested => {
            // One export at a time; the batch itself is not cancellable.
            if state.export_in_flight() || state.match_count() == 0 {
                Vec::new()
            } else {
                let indices = state.export_indices();
                state.begin_export();
                vec![Effect::StartExport { indices }]
            }
        }
        Msg::ExportFinished {
            succeeded,
            failed,
            completion,
        } => {
            state.finish_export(succeeded, failed, completion);
            Vec::new()
        }
        Msg::PreviewOpened { index } => {
            if state.open_preview(index) {
                vec![Effect::InstallPreviewKeys]
            } else {
                Vec::new()
            }
        }
        Msg::PreviewClosed => {
            if state.close_preview() {
                vec![Effect::RemovePreviewKeys]
            } else {
                Vec::new()
            }
        }
        Msg::KeyPressed(key) => {
            if state.preview_index().is_none() {
                Vec::new()
            } else {
                match key {
                    PreviewKey::ArrowLeft => {
                        state.preview_previous();
                        Vec::new()
                    }
                    PreviewKey::ArrowRight => {
                        state.preview_next();
                        Vec::new()
                    }
                    PreviewKey::Escape => {
                        state.close_preview();
                        vec![Effect::RemovePreviewKeys]
                    }
                }
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
