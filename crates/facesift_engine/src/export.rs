use futures_util::stream::{self, StreamExt};
use sift_logging::{sift_debug, sift_info, sift_warn};

use crate::archive::build_archive;
use crate::embedded::decode_embedded;
use crate::fetch::Fetcher;
use crate::resolver::Resolver;
use crate::types::{
    Deliverable, EngineEvent, ExportItem, ExportOutcome, ExportReport, FetchError, ImagePayload,
    SourceKind,
};

/// Upper bound on fetches in flight at once; keeps large batches from
/// hammering the upstream service.
pub const DEFAULT_EXPORT_CONCURRENCY: usize = 6;

#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub concurrency: usize,
    pub archive_filename: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_EXPORT_CONCURRENCY,
            archive_filename: "matches.zip".to_string(),
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no records requested for export")]
    EmptyRequest,
    #[error("all {} requested images failed", outcome.failed.len())]
    AllFailed { outcome: ExportOutcome },
    #[error("archive assembly failed: {message}")]
    Archive {
        outcome: ExportOutcome,
        message: String,
    },
}

/// Retrieves every requested record and packages the result.
///
/// A failure on one record never aborts the rest: the returned report (or
/// the error, for whole-batch failures) always accounts for every
/// requested index. Exactly one requested record produces a bare file;
/// two or more produce a ZIP over the succeeded subset.
pub async fn run_export(
    items: &[ExportItem],
    resolver: &Resolver,
    fetcher: &dyn Fetcher,
    settings: &ExportSettings,
    sink: &dyn ProgressSink,
) -> Result<ExportReport, ExportError> {
    if items.is_empty() {
        return Err(ExportError::EmptyRequest);
    }
    sift_info!("export started: {} records", items.len());

    let concurrency = settings.concurrency.max(1);
    let retrievals: Vec<_> = items
        .iter()
        .map(|item| async move { (item.index, retrieve(item, resolver, fetcher).await) })
        .collect();
    let mut pending = stream::iter(retrievals).buffer_unordered(concurrency);

    let mut results = Vec::with_capacity(items.len());
    while let Some((index, result)) = pending.next().await {
        sink.emit(EngineEvent::RecordFinished {
            index,
            result: result.as_ref().map(|_| ()).map_err(|err| err.kind.clone()),
        });
        results.push((index, result));
    }
    // The outcome and entry naming follow the requested index order, not
    // completion order.
    results.sort_by_key(|(index, _)| *index);

    let mut outcome = ExportOutcome::default();
    for (index, result) in results {
        match result {
            Ok(payload) => outcome.succeeded.push((index, payload)),
            Err(err) => {
                sift_warn!("record {index} failed: {} ({})", err.kind, err.message);
                outcome.failed.push((index, err.kind));
            }
        }
    }

    if outcome.succeeded.is_empty() {
        return Err(ExportError::AllFailed { outcome });
    }

    let deliverable = if items.len() == 1 {
        let (index, payload) = outcome.succeeded[0].clone();
        Deliverable::Single {
            filename: entry_filename(index, payload.media_type.as_deref()),
            payload,
        }
    } else {
        match build_archive(&outcome.succeeded, &settings.archive_filename) {
            Ok(deliverable) => deliverable,
            Err(err) => {
                return Err(ExportError::Archive {
                    outcome,
                    message: err.to_string(),
                })
            }
        }
    };

    sift_info!(
        "export finished: {} succeeded, {} failed",
        outcome.succeeded.len(),
        outcome.failed.len()
    );
    Ok(ExportReport {
        outcome,
        deliverable,
    })
}

async fn retrieve(
    item: &ExportItem,
    resolver: &Resolver,
    fetcher: &dyn Fetcher,
) -> Result<ImagePayload, FetchError> {
    let source = resolver.resolve(&item.locator);
    if source.kind == SourceKind::InlineEmbedded {
        return decode_embedded(&source.primary_url);
    }
    match fetcher.fetch(&source.primary_url).await {
        Ok(payload) => Ok(payload),
        Err(primary_err) => match source.fallback_url {
            Some(fallback) => {
                sift_debug!(
                    "record {}: primary route failed ({}), trying fallback",
                    item.index,
                    primary_err.kind
                );
                fetcher.fetch(&fallback).await
            }
            None => Err(primary_err),
        },
    }
}

/// `match-<position>.<ext>`, one-based, extension from the media type.
pub fn entry_filename(index: usize, media_type: Option<&str>) -> String {
    format!("match-{}.{}", index + 1, extension_for(media_type))
}

fn extension_for(media_type: Option<&str>) -> &'static str {
    let essence = media_type
        .unwrap_or("")
        .split(';')
        .next()
        .unwrap_or("")
        .trim();
    match essence {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/bmp" => "bmp",
        "image/tiff" => "tiff",
        _ => "jpg",
    }
}
