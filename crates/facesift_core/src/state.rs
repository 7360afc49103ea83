use crate::msg::ExportCompletion;
use crate::preview::PreviewState;
use crate::record::CanonicalMatch;
use crate::selection::SelectionSet;
use crate::view_model::{status_text, AppViewModel, LastSearchStats, MatchRowView};

/// User-visible summary of the last pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLine {
    #[default]
    Idle,
    /// Well-formed response, zero retained matches.
    NoMatches,
    Found(usize),
    /// Response matched none of the known shapes.
    InvalidResponse,
    Exporting,
    ExportComplete {
        succeeded: usize,
    },
    ExportPartial {
        succeeded: usize,
        failed: usize,
    },
    /// Every fetch failed; nothing was delivered.
    ExportFailed {
        failed: usize,
    },
    /// Fetches succeeded but packaging or saving failed, so the retrieved
    /// images were wasted.
    ExportArchiveFailed {
        succeeded: usize,
        failed: usize,
    },
}

/// Whole-screen state. The result sequence is replaced wholesale on each
/// search and is read-only in between; selection and preview index into it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    matches: Vec<CanonicalMatch>,
    selection: SelectionSet,
    preview: PreviewState,
    export_in_flight: bool,
    status: StatusLine,
    last_search_stats: Option<LastSearchStats>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matches(&self) -> &[CanonicalMatch] {
        &self.matches
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn status(&self) -> StatusLine {
        self.status
    }

    pub fn export_in_flight(&self) -> bool {
        self.export_in_flight
    }

    pub fn preview_index(&self) -> Option<usize> {
        self.preview.current()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            status: self.status,
            status_text: status_text(&self.status),
            rows: self
                .matches
                .iter()
                .enumerate()
                .map(|(index, record)| MatchRowView {
                    index,
                    id: record.id.clone(),
                    confidence: record.confidence,
                    selected: self.selection.contains(index),
                })
                .collect(),
            selected_count: self.selection.len(),
            export_in_flight: self.export_in_flight,
            preview_index: self.preview.current(),
            last_search_stats: self.last_search_stats.clone(),
        }
    }

    /// Replaces the result sequence, dropping the old selection and closing
    /// any open preview. Returns whether a preview had to be closed.
    pub(crate) fn publish_matches(
        &mut self,
        records: Vec<CanonicalMatch>,
        status: StatusLine,
        stats: Option<LastSearchStats>,
    ) -> bool {
        let preview_was_open = self.preview.is_open();
        self.matches = records;
        self.selection.clear();
        self.preview.close();
        self.status = status;
        self.last_search_stats = stats;
        preview_was_open
    }

    pub(crate) fn toggle_select(&mut self, index: usize) {
        if index < self.matches.len() {
            self.selection.toggle(index);
        }
    }

    pub(crate) fn select_all_visible(&mut self) {
        self.selection.select_all(self.matches.len());
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Indices to export: the selection, or every visible index when
    /// nothing is selected.
    pub(crate) fn export_indices(&self) -> Vec<usize> {
        if self.selection.is_empty() {
            (0..self.matches.len()).collect()
        } else {
            self.selection.indices()
        }
    }

    pub(crate) fn begin_export(&mut self) {
        self.export_in_flight = true;
        self.status = StatusLine::Exporting;
    }

    pub(crate) fn finish_export(
        &mut self,
        succeeded: usize,
        failed: usize,
        completion: ExportCompletion,
    ) {
        self.export_in_flight = false;
        self.status = match completion {
            ExportCompletion::Delivered if failed == 0 => {
                StatusLine::ExportComplete { succeeded }
            }
            ExportCompletion::Delivered => StatusLine::ExportPartial { succeeded, failed },
            ExportCompletion::AllFailed => StatusLine::ExportFailed { failed },
            ExportCompletion::ArchiveFailed => {
                StatusLine::ExportArchiveFailed { succeeded, failed }
            }
        };
    }

    /// Returns true when the preview went from closed to open.
    pub(crate) fn open_preview(&mut self, index: usize) -> bool {
        let was_open = self.preview.is_open();
        self.preview.open(index, self.matches.len()) && !was_open
    }

    /// Returns true when a preview was actually open.
    pub(crate) fn close_preview(&mut self) -> bool {
        let was_open = self.preview.is_open();
        self.preview.close();
        was_open
    }

    pub(crate) fn preview_next(&mut self) {
        self.preview.next(self.matches.len());
    }

    pub(crate) fn preview_previous(&mut self) {
        self.preview.previous(self.matches.len());
    }
}
