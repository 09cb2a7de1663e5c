use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    info,
    pipeline::BatchEvent,
    success,
    types::{BatchSummary, FailureTableRow, ProgressEvent, Severity},
    warning,
};

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

/// Draws batch events until the worker drops its sender.
pub async fn render_batch(mut events: UnboundedReceiver<BatchEvent>, total: usize) {
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40.green/white} {pos}/{len} {wide_msg}") {
        pb.set_style(style.progress_chars("=> "));
    }

    while let Some(event) = events.recv().await {
        match event {
            BatchEvent::Status { message, .. } => pb.set_message(message),
            BatchEvent::Progress(event) if event.index >= event.total => {
                pb.finish_and_clear();
                print_event(&event);
            }
            BatchEvent::Progress(event) => {
                pb.inc(1);
                pb.suspend(|| print_event(&event));
            }
        }
    }

    pb.finish_and_clear();
}

fn print_event(event: &ProgressEvent) {
    match event.severity {
        Severity::Info => info!("{}", event.message),
        Severity::Success => success!("{}", event.message),
        Severity::Warning => warning!("{}", event.message),
        Severity::Error => println!("[{}] {}", "x".red().bold(), event.message),
    }
}

pub fn print_failures(summary: &BatchSummary) {
    if summary.failures.is_empty() {
        return;
    }

    let rows: Vec<FailureTableRow> = summary
        .failures
        .iter()
        .map(|f| FailureTableRow {
            track: f.display_name.clone(),
            reason: f.reason.clone(),
        })
        .collect();

    warning!(
        "{} of {} tracks could not be downloaded:",
        summary.failures.len(),
        summary.total
    );
    println!("{}", Table::new(rows));
}
