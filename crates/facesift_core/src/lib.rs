//! Facesift core: pure state machine over canonical search matches.
mod effect;
mod msg;
mod normalize;
mod preview;
mod record;
mod selection;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{ExportCompletion, Msg, PreviewKey};
pub use normalize::{normalize_response, SearchOutcome};
pub use preview::PreviewState;
pub use record::{CanonicalMatch, CONFIDENCE_THRESHOLD};
pub use selection::SelectionSet;
pub use state::{AppState, StatusLine};
pub use update::update;
pub use view_model::{AppViewModel, LastSearchStats, MatchRowView};
