use crate::state::StatusLine;

/// Normalizer drop counters from the most recent search, for the summary
/// line under the grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LastSearchStats {
    pub dropped_no_locator: usize,
    pub dropped_low_confidence: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub status: StatusLine,
    pub status_text: String,
    pub rows: Vec<MatchRowView>,
    pub selected_count: usize,
    pub export_in_flight: bool,
    pub preview_index: Option<usize>,
    pub last_search_stats: Option<LastSearchStats>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchRowView {
    pub index: usize,
    pub id: String,
    pub confidence: f64,
    pub selected: bool,
}

pub(crate) fn status_text(status: &StatusLine) -> String {
    match status {
        StatusLine::Idle => String::new(),
        StatusLine::NoMatches => "No matching images found".to_string(),
        StatusLine::Found(count) => format!("Found {count} matching images"),
        StatusLine::InvalidResponse => "Invalid response from search service".to_string(),
        StatusLine::Exporting => "Preparing download...".to_string(),
        StatusLine::ExportComplete { succeeded } => format!("Downloaded {succeeded} images"),
        StatusLine::ExportPartial { succeeded, failed } => {
            format!("Downloaded {succeeded} images, {failed} failed")
        }
        StatusLine::ExportFailed { failed } => {
            format!("Download failed for all {failed} images")
        }
        StatusLine::ExportArchiveFailed { succeeded, failed } => {
            let mut text = format!("Retrieved {succeeded} images but packaging the download failed");
            if *failed > 0 {
                text.push_str(&format!("; {failed} images also failed to download"));
            }
            text
        }
    }
}
