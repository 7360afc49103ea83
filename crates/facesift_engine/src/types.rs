use std::fmt;
use std::path::PathBuf;

use bytes::Bytes;

/// Retrieval strategy derived from a locator's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Payload is embedded in the locator itself (data URL or bare base64).
    InlineEmbedded,
    /// Secure absolute URL, fetched directly; proxy as fallback.
    DirectRemote,
    /// Insecure absolute URL, routed through the proxy; direct as fallback.
    ProxiedRemote,
    /// Backend-relative path, composed against the upstream base address.
    PathRelative,
}

/// Concrete retrieval plan for one locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    pub kind: SourceKind,
    pub primary_url: String,
    /// Alternate route, only for the two remote kinds.
    pub fallback_url: Option<String>,
}

/// Binary image content plus the media type it arrived with, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Bytes,
    pub media_type: Option<String>,
}

/// One record to export: the position in the result grid and its raw
/// upstream locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportItem {
    pub index: usize,
    pub locator: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    /// The response body is not image data.
    NotAnImage { content_type: String },
    /// Embedded payload could not be base64-decoded.
    InvalidEncoding,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::NotAnImage { content_type } => {
                write!(f, "not an image: {content_type}")
            }
            FailureKind::InvalidEncoding => write!(f, "invalid embedded encoding"),
        }
    }
}

/// Complete per-index account of one export invocation. Every requested
/// index lands in exactly one of the two lists, ordered by index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportOutcome {
    pub succeeded: Vec<(usize, ImagePayload)>,
    pub failed: Vec<(usize, FailureKind)>,
}

impl ExportOutcome {
    pub fn requested(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// What the export produced: a bare image for a single-record request, an
/// in-memory ZIP otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deliverable {
    Single {
        filename: String,
        payload: ImagePayload,
    },
    Archive {
        filename: String,
        bytes: Bytes,
    },
}

impl Deliverable {
    pub fn filename(&self) -> &str {
        match self {
            Deliverable::Single { filename, .. } => filename,
            Deliverable::Archive { filename, .. } => filename,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            Deliverable::Single { payload, .. } => &payload.bytes,
            Deliverable::Archive { bytes, .. } => bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub outcome: ExportOutcome,
    pub deliverable: Deliverable,
}

/// Events polled by the caller while an export runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// One record finished retrieval; emitted in completion order.
    RecordFinished {
        index: usize,
        result: Result<(), FailureKind>,
    },
    /// The whole batch finished and, on success, was saved to disk.
    ExportCompleted {
        result: Result<SavedExport, ExportFailure>,
    },
}

/// Summary of a delivered export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedExport {
    pub path: PathBuf,
    pub succeeded: usize,
    pub failed: usize,
}

/// Whole-batch failure surfaced to the caller once; per-record failures
/// never reach this level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportFailure {
    EmptyRequest,
    AllFailed {
        failed: usize,
    },
    /// Retrieval (at least partly) succeeded but ZIP assembly failed;
    /// the counts record how much work was wasted.
    Archive {
        succeeded: usize,
        failed: usize,
        message: String,
    },
    /// The deliverable was built but could not be written to disk.
    Persist {
        succeeded: usize,
        failed: usize,
        message: String,
    },
}

impl fmt::Display for ExportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFailure::EmptyRequest => write!(f, "no records requested"),
            ExportFailure::AllFailed { failed } => {
                write!(f, "all {failed} requested images failed")
            }
            ExportFailure::Archive {
                succeeded, message, ..
            } => {
                write!(
                    f,
                    "archive assembly failed after {succeeded} images were retrieved: {message}"
                )
            }
            ExportFailure::Persist {
                succeeded, message, ..
            } => {
                write!(
                    f,
                    "saving the export failed after {succeeded} images were retrieved: {message}"
                )
            }
        }
    }
}
