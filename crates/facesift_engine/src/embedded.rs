use bytes::Bytes;

use crate::resolver::DATA_URL_PREFIX;
use crate::types::{FailureKind, FetchError, ImagePayload};

/// Decodes a `data:` URL into its binary payload. No network involved;
/// malformed encoding is a terminal failure for the one record.
pub fn decode_embedded(data_url: &str) -> Result<ImagePayload, FetchError> {
    let rest = data_url.strip_prefix(DATA_URL_PREFIX).ok_or_else(|| {
        FetchError::new(FailureKind::InvalidEncoding, "missing data: prefix")
    })?;
    let (header, payload) = rest.split_once(',').ok_or_else(|| {
        FetchError::new(FailureKind::InvalidEncoding, "missing payload separator")
    })?;
    if !header.split(';').any(|part| part.trim() == "base64") {
        return Err(FetchError::new(
            FailureKind::InvalidEncoding,
            "only base64 data urls are supported",
        ));
    }
    let media_type = header
        .split(';')
        .next()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToOwned::to_owned);
    let bytes = base64::Engine::decode(
        &base64::engine::general_purpose::STANDARD,
        payload.trim(),
    )
    .map_err(|err| FetchError::new(FailureKind::InvalidEncoding, err.to_string()))?;
    Ok(ImagePayload {
        bytes: Bytes::from(bytes),
        media_type,
    })
}
