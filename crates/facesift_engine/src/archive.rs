use std::io::{Cursor, Write};

use bytes::Bytes;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::export::entry_filename;
use crate::types::{Deliverable, ImagePayload};

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Packages the succeeded subset into one in-memory ZIP. Entry names come
/// from each record's original grid position, not retrieval order.
pub fn build_archive(
    entries: &[(usize, ImagePayload)],
    filename: &str,
) -> Result<Deliverable, ArchiveError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (index, payload) in entries {
        writer.start_file(entry_filename(*index, payload.media_type.as_deref()), options)?;
        writer.write_all(&payload.bytes)?;
    }
    let cursor = writer.finish()?;
    Ok(Deliverable::Archive {
        filename: filename.to_string(),
        bytes: Bytes::from(cursor.into_inner()),
    })
}
