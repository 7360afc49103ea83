use facesift_core::{normalize_response, SearchOutcome, CONFIDENCE_THRESHOLD};
use serde_json::json;

fn records(outcome: SearchOutcome) -> Vec<facesift_core::CanonicalMatch> {
    match outcome {
        SearchOutcome::Matches { records, .. } => records,
        other => panic!("expected matches, got {other:?}"),
    }
}

#[test]
fn new_format_maps_fields_and_passes_metadata_through() {
    let body = json!({
        "results": [
            {
                "face_id": "f-17",
                "confidence": 92.5,
                "image_url": "https://img.example.com/f-17.jpg",
                "face_location": [10, 20, 30, 40],
                "metadata": { "camera": "gate-3" }
            }
        ]
    });

    let records = records(normalize_response(&body));
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.id, "f-17");
    assert_eq!(record.confidence, 92.5);
    assert_eq!(record.locator, "https://img.example.com/f-17.jpg");
    assert_eq!(record.metadata["camera"], json!("gate-3"));
    assert_eq!(record.metadata["face_location"], json!([10, 20, 30, 40]));
}

#[test]
fn missing_confidence_defaults_to_zero_and_is_filtered() {
    let body = json!({
        "results": [
            { "image_url": "https://img.example.com/a.jpg" },
            { "image_url": "https://img.example.com/b.jpg", "confidence": 80 }
        ]
    });

    match normalize_response(&body) {
        SearchOutcome::Matches {
            records,
            dropped_low_confidence,
            dropped_no_locator,
        } => {
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].locator, "https://img.example.com/b.jpg");
            assert_eq!(dropped_low_confidence, 1);
            assert_eq!(dropped_no_locator, 0);
        }
        other => panic!("expected matches, got {other:?}"),
    }
}

#[test]
fn threshold_is_strictly_greater_than() {
    let body = json!({
        "results": [
            { "image_url": "https://img.example.com/at.jpg", "confidence": CONFIDENCE_THRESHOLD },
            { "image_url": "https://img.example.com/above.jpg", "confidence": 60.01 }
        ]
    });

    let records = records(normalize_response(&body));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].locator, "https://img.example.com/above.jpg");
}

#[test]
fn negative_confidence_collapses_to_zero() {
    let body = json!({
        "results": [
            { "image_url": "https://img.example.com/neg.jpg", "confidence": -5 }
        ]
    });

    match normalize_response(&body) {
        SearchOutcome::Matches {
            records,
            dropped_low_confidence,
            ..
        } => {
            assert!(records.is_empty());
            assert_eq!(dropped_low_confidence, 1);
        }
        other => panic!("expected matches, got {other:?}"),
    }
}

#[test]
fn legacy_format_accepts_inline_base64_locator() {
    let body = json!({
        "matched_images": [
            { "id": "a", "confidence": 75, "base64": "aGVsbG8=" }
        ]
    });

    let records = records(normalize_response(&body));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "a");
    assert_eq!(records[0].confidence, 75.0);
    assert_eq!(records[0].locator, "aGVsbG8=");
}

#[test]
fn legacy_format_prefers_image_url_over_url_over_base64() {
    let body = json!({
        "matched_images": [
            { "confidence": 75, "image_url": "https://a.example.com/1.jpg", "url": "https://b.example.com/1.jpg", "base64": "Zm9v" },
            { "confidence": 75, "url": "https://b.example.com/2.jpg", "base64": "Zm9v" }
        ]
    });

    let records = records(normalize_response(&body));
    assert_eq!(records[0].locator, "https://a.example.com/1.jpg");
    assert_eq!(records[1].locator, "https://b.example.com/2.jpg");
}

#[test]
fn new_format_takes_priority_over_legacy_key() {
    let body = json!({
        "results": [
            { "image_url": "https://a.example.com/new.jpg", "confidence": 90 }
        ],
        "matched_images": [
            { "image_url": "https://a.example.com/old.jpg", "confidence": 90 }
        ]
    });

    let records = records(normalize_response(&body));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].locator, "https://a.example.com/new.jpg");
}

#[test]
fn empty_results_array_is_empty_outcome() {
    assert_eq!(
        normalize_response(&json!({ "results": [] })),
        SearchOutcome::Empty
    );
    assert_eq!(
        normalize_response(&json!({ "matched_images": [] })),
        SearchOutcome::Empty
    );
}

#[test]
fn unknown_shapes_are_malformed() {
    assert_eq!(
        normalize_response(&json!({ "hits": [1, 2, 3] })),
        SearchOutcome::Malformed
    );
    assert_eq!(
        normalize_response(&json!({ "results": "not-an-array" })),
        SearchOutcome::Malformed
    );
    assert_eq!(normalize_response(&json!(42)), SearchOutcome::Malformed);
}

#[test]
fn entries_without_locator_are_dropped_and_counted() {
    let body = json!({
        "results": [
            { "confidence": 90 },
            "garbage entry",
            { "image_url": "https://img.example.com/ok.jpg", "confidence": 90 }
        ]
    });

    match normalize_response(&body) {
        SearchOutcome::Matches {
            records,
            dropped_no_locator,
            ..
        } => {
            assert_eq!(records.len(), 1);
            assert_eq!(dropped_no_locator, 2);
        }
        other => panic!("expected matches, got {other:?}"),
    }
}

#[test]
fn missing_id_is_synthesized_from_position() {
    let body = json!({
        "results": [
            { "image_url": "https://img.example.com/0.jpg", "confidence": 90 },
            { "image_url": "https://img.example.com/1.jpg", "confidence": 90 }
        ]
    });

    let records = records(normalize_response(&body));
    assert_eq!(records[0].id, "match-0");
    assert_eq!(records[1].id, "match-1");
}

#[test]
fn output_order_matches_upstream_order() {
    let body = json!({
        "results": [
            { "image_url": "https://img.example.com/z.jpg", "confidence": 61 },
            { "image_url": "https://img.example.com/a.jpg", "confidence": 99 },
            { "image_url": "https://img.example.com/m.jpg", "confidence": 70 }
        ]
    });

    let locators: Vec<_> = records(normalize_response(&body))
        .into_iter()
        .map(|r| r.locator)
        .collect();
    assert_eq!(
        locators,
        vec![
            "https://img.example.com/z.jpg",
            "https://img.example.com/a.jpg",
            "https://img.example.com/m.jpg"
        ]
    );
}
