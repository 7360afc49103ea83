use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;

use sift_logging::{sift_error, sift_info};

use crate::export::{run_export, ChannelProgressSink, ExportError, ExportSettings};
use crate::fetch::{FetchSettings, ReqwestFetcher};
use crate::persist::DeliverableStore;
use crate::resolver::{Resolver, ResolverSettings};
use crate::types::{EngineEvent, ExportFailure, ExportItem, ExportReport, SavedExport};

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub fetch: FetchSettings,
    pub resolver: ResolverSettings,
    pub export: ExportSettings,
    /// Where delivered files land.
    pub output_dir: PathBuf,
}

impl EngineConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            ..Self::default()
        }
    }
}

enum EngineCommand {
    Export { items: Vec<ExportItem> },
}

/// Bridge between the synchronous caller and the async export pipeline.
///
/// A dedicated thread owns the tokio runtime; commands go in over a
/// channel and events come back out via `try_recv`, so the UI loop stays
/// responsive while a batch is in flight.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    sift_error!("failed to start engine runtime: {err}");
                    return;
                }
            };
            let fetcher = match ReqwestFetcher::new(config.fetch.clone()) {
                Ok(fetcher) => Arc::new(fetcher),
                Err(err) => {
                    sift_error!("failed to build http client: {}", err.message);
                    return;
                }
            };
            let resolver = Arc::new(Resolver::new(config.resolver.clone()));
            let config = Arc::new(config);

            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let resolver = resolver.clone();
                let config = config.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(command, &resolver, fetcher.as_ref(), &config, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    /// Queue a bulk export. Completion arrives as an
    /// `EngineEvent::ExportCompleted`.
    pub fn export(&self, items: Vec<ExportItem>) {
        let _ = self.cmd_tx.send(EngineCommand::Export { items });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    command: EngineCommand,
    resolver: &Resolver,
    fetcher: &ReqwestFetcher,
    config: &EngineConfig,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Export { items } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result = match run_export(&items, resolver, fetcher, &config.export, &sink).await {
                Ok(report) => save_deliverable(report, &config.output_dir),
                Err(err) => Err(failure_from(err)),
            };
            let _ = event_tx.send(EngineEvent::ExportCompleted { result });
        }
    }
}

fn save_deliverable(report: ExportReport, output_dir: &Path) -> Result<SavedExport, ExportFailure> {
    let store = DeliverableStore::new(output_dir.to_path_buf());
    let path = store
        .save(&report.deliverable)
        .map_err(|err| ExportFailure::Persist {
            succeeded: report.outcome.succeeded.len(),
            failed: report.outcome.failed.len(),
            message: err.to_string(),
        })?;
    sift_info!("export saved to {}", path.display());
    Ok(SavedExport {
        path,
        succeeded: report.outcome.succeeded.len(),
        failed: report.outcome.failed.len(),
    })
}

fn failure_from(err: ExportError) -> ExportFailure {
    match err {
        ExportError::EmptyRequest => ExportFailure::EmptyRequest,
        ExportError::AllFailed { outcome } => ExportFailure::AllFailed {
            failed: outcome.failed.len(),
        },
        // The archive step wasted real retrieval work; keep the counts so
        // the caller can report that distinctly from fetch failures.
        ExportError::Archive { outcome, message } => ExportFailure::Archive {
            succeeded: outcome.succeeded.len(),
            failed: outcome.failed.len(),
            message,
        },
    }
}
