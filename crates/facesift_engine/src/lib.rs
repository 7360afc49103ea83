//! Facesift engine: image retrieval and bulk-export pipeline.
mod archive;
mod embedded;
mod engine;
mod export;
mod fetch;
mod persist;
mod resolver;
mod types;

pub use archive::{build_archive, ArchiveError};
pub use embedded::decode_embedded;
pub use engine::{EngineConfig, EngineHandle};
pub use export::{
    entry_filename, run_export, ChannelProgressSink, ExportError, ExportSettings, ProgressSink,
    DEFAULT_EXPORT_CONCURRENCY,
};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use persist::{DeliverableStore, PersistError};
pub use resolver::{Resolver, ResolverSettings, DATA_URL_PREFIX};
pub use types::{
    Deliverable, EngineEvent, ExportFailure, ExportItem, ExportOutcome, ExportReport, FailureKind,
    FetchError, ImagePayload, ResolvedSource, SavedExport, SourceKind,
};
