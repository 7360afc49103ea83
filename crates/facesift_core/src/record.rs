use serde_json::{Map, Value};

/// Matches scoring at or below this are dropped during normalization.
///
/// The upstream service reports confidence on a 0-100 scale; the result
/// grid only shows matches strictly above this value.
pub const CONFIDENCE_THRESHOLD: f64 = 60.0;

/// The normalized, schema-independent representation of one search result.
///
/// All downstream components (selection, preview, export) consume only this
/// shape, never raw upstream fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalMatch {
    /// Upstream identifier, or `match-<index>` synthesized from position.
    pub id: String,
    /// Always finite and >= 0; absent or unusable values collapse to 0.
    pub confidence: f64,
    /// Raw upstream string referencing the image bytes, never mutated.
    pub locator: String,
    /// Additional upstream fields, passed through unchanged.
    pub metadata: Map<String, Value>,
}
