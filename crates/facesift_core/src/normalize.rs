use serde_json::{Map, Value};

use crate::record::{CanonicalMatch, CONFIDENCE_THRESHOLD};

/// Result of normalizing one upstream response body.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// A well-formed result set, already filtered by confidence.
    Matches {
        records: Vec<CanonicalMatch>,
        /// Entries with no usable image reference at all.
        dropped_no_locator: usize,
        /// Entries at or below the confidence threshold.
        dropped_low_confidence: usize,
    },
    /// Well-formed response carrying an empty match set.
    Empty,
    /// The body matches none of the known response shapes.
    Malformed,
}

/// Converts an upstream response body into canonical match records.
///
/// Two shapes are recognized, checked in priority order: a `results` array
/// (new format) and a `matched_images` array (legacy format). Per-record
/// normalization never fails; missing fields coerce to defaults and only
/// entries without any usable locator are dropped. Output order matches
/// upstream order.
pub fn normalize_response(body: &Value) -> SearchOutcome {
    if let Some(entries) = body.get("results").and_then(Value::as_array) {
        return normalize_entries(entries, parse_new_format);
    }
    if let Some(entries) = body.get("matched_images").and_then(Value::as_array) {
        return normalize_entries(entries, parse_legacy_format);
    }
    SearchOutcome::Malformed
}

fn normalize_entries(
    entries: &[Value],
    parse: fn(&Value, usize) -> Option<CanonicalMatch>,
) -> SearchOutcome {
    if entries.is_empty() {
        return SearchOutcome::Empty;
    }
    let mut records = Vec::with_capacity(entries.len());
    let mut dropped_no_locator = 0;
    let mut dropped_low_confidence = 0;
    for (index, entry) in entries.iter().enumerate() {
        match parse(entry, index) {
            None => dropped_no_locator += 1,
            Some(record) if record.confidence > CONFIDENCE_THRESHOLD => records.push(record),
            Some(_) => dropped_low_confidence += 1,
        }
    }
    SearchOutcome::Matches {
        records,
        dropped_no_locator,
        dropped_low_confidence,
    }
}

fn parse_new_format(entry: &Value, index: usize) -> Option<CanonicalMatch> {
    let locator = non_empty_str(entry.get("image_url"))?;
    let id = non_empty_str(entry.get("face_id")).unwrap_or_else(|| synthesized_id(index));
    let mut metadata = entry
        .get("metadata")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    if let Some(face) = entry.get("face_location") {
        if !face.is_null() {
            metadata.insert("face_location".to_string(), face.clone());
        }
    }
    Some(CanonicalMatch {
        id,
        confidence: coerce_confidence(entry.get("confidence")),
        locator,
        metadata,
    })
}

fn parse_legacy_format(entry: &Value, index: usize) -> Option<CanonicalMatch> {
    let locator = non_empty_str(entry.get("image_url"))
        .or_else(|| non_empty_str(entry.get("url")))
        .or_else(|| non_empty_str(entry.get("base64")))?;
    let id = non_empty_str(entry.get("id")).unwrap_or_else(|| synthesized_id(index));
    Some(CanonicalMatch {
        id,
        confidence: coerce_confidence(entry.get("confidence")),
        locator,
        metadata: Map::new(),
    })
}

fn synthesized_id(index: usize) -> String {
    format!("match-{index}")
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

/// Absent, non-numeric, non-finite, and negative values all collapse to 0.
fn coerce_confidence(value: Option<&Value>) -> f64 {
    let raw = value.and_then(Value::as_f64).unwrap_or(0.0);
    if raw.is_finite() && raw > 0.0 {
        raw
    } else {
        0.0
    }
}
