use serde_json::Value;

/// Keys the preview surface listens for while a preview is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKey {
    ArrowLeft,
    ArrowRight,
    Escape,
}

/// How an export batch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportCompletion {
    /// A file was saved.
    Delivered,
    /// Every fetch failed; there was nothing to save.
    AllFailed,
    /// Retrieval (at least partly) succeeded but the archive could not be
    /// built or saved, so the fetched images were lost.
    ArchiveFailed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Raw JSON body returned by the upstream search call.
    ResultsReceived(Value),
    /// User toggled one thumbnail's selection mark.
    ToggleSelect { index: usize },
    /// User clicked Select All / Deselect All.
    SelectAllToggled,
    /// Drop every selection mark.
    ClearSelection,
    /// User clicked Download.
    ExportRequested,
    /// Engine finished the export batch.
    ExportFinished {
        succeeded: usize,
        failed: usize,
        completion: ExportCompletion,
    },
    /// User clicked a thumbnail to open the full-size preview.
    PreviewOpened { index: usize },
    /// User dismissed the preview.
    PreviewClosed,
    /// Global key event, only meaningful while the preview is open.
    KeyPressed(PreviewKey),
    /// Fallback for placeholder wiring.
    NoOp,
}
