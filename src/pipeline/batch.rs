use std::path::Path;

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::{
    pipeline::Pipeline,
    types::{BatchFailure, BatchSummary, ProgressEvent, Severity, TrackRequest},
};

/// Receives batch notifications from the worker running the pipeline.
///
/// Implementations are called from the worker task, never from the task that
/// owns the terminal or UI, and must marshal back to it themselves.
pub trait ProgressObserver: Send + Sync {
    /// One outcome per batch index, followed by a terminal event with
    /// `index == total`.
    fn on_progress(&self, event: ProgressEvent);

    /// Activity notice for the item currently in flight.
    fn on_status(&self, _index: usize, _total: usize, _message: &str) {}
}

/// Message shape used when batch notifications cross a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    Status {
        index: usize,
        total: usize,
        message: String,
    },
    Progress(ProgressEvent),
}

impl ProgressObserver for UnboundedSender<BatchEvent> {
    fn on_progress(&self, event: ProgressEvent) {
        // a dropped receiver only means nobody is watching anymore
        let _ = self.send(BatchEvent::Progress(event));
    }

    fn on_status(&self, index: usize, total: usize, message: &str) {
        let _ = self.send(BatchEvent::Status {
            index,
            total,
            message: message.to_string(),
        });
    }
}

impl Pipeline {
    /// Runs every request through resolve and acquire, strictly in order.
    ///
    /// A failing item is reported and skipped. The batch itself never fails,
    /// callers inspect the events or the returned summary.
    pub async fn run_batch(
        &self,
        requests: &[TrackRequest],
        output_dir: &Path,
        observer: &dyn ProgressObserver,
    ) -> BatchSummary {
        let total = requests.len();
        let mut summary = BatchSummary {
            total,
            ..Default::default()
        };

        for (index, request) in requests.iter().enumerate() {
            observer.on_status(index, total, &format!("Searching: {}", request.display_name));

            let source = match self.resolver.resolve(request).await {
                Ok(source) => source,
                Err(e) => {
                    let reason = e.to_string();
                    observer.on_progress(ProgressEvent {
                        index,
                        total,
                        message: format!("{}: {}", request.display_name, reason),
                        severity: Severity::Error,
                    });
                    summary.failures.push(BatchFailure {
                        index,
                        display_name: request.display_name.clone(),
                        reason,
                    });
                    continue;
                }
            };
            debug!("resolved {} to {}", request.display_name, source.media_locator);

            observer.on_status(index, total, &format!("Downloading: {}", source.title));

            let file_name = request
                .disambiguator
                .as_ref()
                .map(|extra| format!("{} - {}", source.title, extra));

            match self
                .engine
                .acquire(source, output_dir, file_name.as_deref(), true)
                .await
            {
                Ok(result) => {
                    summary.succeeded += 1;
                    let saved = result
                        .output_path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| result.output_path.display().to_string());

                    let event = match result.tagging_warning {
                        None => ProgressEvent {
                            index,
                            total,
                            message: format!("Saved {}", saved),
                            severity: Severity::Success,
                        },
                        Some(warning) => ProgressEvent {
                            index,
                            total,
                            message: format!("Saved {} without artwork: {}", saved, warning),
                            severity: Severity::Warning,
                        },
                    };
                    observer.on_progress(event);
                }
                Err(e) => {
                    let reason = format!("{} ({})", e, e.stage());
                    observer.on_progress(ProgressEvent {
                        index,
                        total,
                        message: format!("{}: {}", request.display_name, reason),
                        severity: Severity::Error,
                    });
                    summary.failures.push(BatchFailure {
                        index,
                        display_name: request.display_name.clone(),
                        reason,
                    });
                }
            }
        }

        observer.on_progress(ProgressEvent {
            index: total,
            total,
            message: format!(
                "Batch complete: {} of {} tracks saved",
                summary.succeeded, total
            ),
            severity: Severity::Success,
        });

        summary
    }
}
