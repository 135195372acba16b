//! Streaming export of freshly generated keypairs.
//!
//! This module provides:
//! - Record formats (colon lines, JSON array, JSON lines)
//! - A streaming writer that keeps one record in memory
//! - The bulk exporter job and its progress observers

mod exporter;
mod progress;
mod record;
mod writer;

pub use exporter::{
    export, BulkKeypairExporter, ExportError, ExportJob, ExportSummary,
    DEFAULT_PROGRESS_INTERVAL,
};
pub use progress::{format_number, LogProgress, NoProgress, ProgressObserver};
pub use record::{prefixed_private_key, ExportRecord, RecordFormat};
pub use writer::RecordWriter;
