#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Kick off a bulk export for the given record indices, in ascending
    /// order. Always non-empty: an empty selection expands to all visible
    /// indices before the effect is emitted.
    StartExport { indices: Vec<usize> },
    /// Attach the global arrow/escape key listener for the preview.
    InstallPreviewKeys,
    /// Detach the global preview key listener.
    RemovePreviewKeys,
}
