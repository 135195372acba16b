//! Progress notification for long-running exports.

use std::time::Instant;

/// Receives `(written, total)` at the job's progress cadence.
///
/// Observers cannot fail and have no access to the sink.
pub trait ProgressObserver {
    fn on_progress(&mut self, written: u64, total: u64);
}

impl<F: FnMut(u64, u64)> ProgressObserver for F {
    fn on_progress(&mut self, written: u64, total: u64) {
        self(written, total)
    }
}

/// Discards progress events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _written: u64, _total: u64) {}
}

/// Logs progress and generation rate through `log`.
#[derive(Debug)]
pub struct LogProgress {
    started: Instant,
}

impl LogProgress {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for LogProgress {
    fn on_progress(&mut self, written: u64, total: u64) {
        let elapsed = self.started.elapsed().as_secs_f64();
        let rate = if elapsed > 0.0 {
            written as f64 / elapsed
        } else {
            0.0
        };

        log::info!(
            "Progress: {} / {} ({}/s)",
            written,
            total,
            format_number(rate as u64)
        );
    }
}

/// Formats a count with a K/M/B suffix.
pub fn format_number(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}
