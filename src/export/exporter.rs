//! Bulk keypair export job.

use std::io::{self, Write};
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::crypto::{AddressStyle, KeyGenError, KeySource, RngKeySource};

use super::{ExportRecord, NoProgress, ProgressObserver, RecordFormat, RecordWriter};

/// Default number of records between progress notifications.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 2000;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Invalid export configuration: {0}")]
    InvalidConfig(String),
    #[error("Key generation failed after {written} record(s): {source}")]
    KeyGeneration { written: u64, source: KeyGenError },
    #[error("Writing to sink failed after {written} record(s): {source}")]
    SinkWrite { written: u64, source: io::Error },
}

impl ExportError {
    /// Records fully written before the job aborted.
    pub fn records_written(&self) -> u64 {
        match self {
            ExportError::InvalidConfig(_) => 0,
            ExportError::KeyGeneration { written, .. } | ExportError::SinkWrite { written, .. } => {
                *written
            }
        }
    }
}

/// Immutable description of one export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportJob {
    count: NonZeroU64,
    format: RecordFormat,
    address_style: AddressStyle,
    progress_interval: Option<NonZeroU64>,
}

impl ExportJob {
    /// Creates a job for `count` records. `count` must be at least 1.
    pub fn new(count: u64, format: RecordFormat) -> Result<Self, ExportError> {
        let count = NonZeroU64::new(count)
            .ok_or_else(|| ExportError::InvalidConfig("count must be at least 1".into()))?;

        Ok(Self {
            count,
            format,
            address_style: AddressStyle::default(),
            progress_interval: NonZeroU64::new(DEFAULT_PROGRESS_INTERVAL),
        })
    }

    /// Sets the progress cadence; 0 disables notifications.
    pub fn with_progress_interval(mut self, every: u64) -> Self {
        self.progress_interval = NonZeroU64::new(every);
        self
    }

    pub fn with_address_style(mut self, style: AddressStyle) -> Self {
        self.address_style = style;
        self
    }

    pub fn count(&self) -> u64 {
        self.count.get()
    }

    pub fn format(&self) -> RecordFormat {
        self.format
    }

    pub fn address_style(&self) -> AddressStyle {
        self.address_style
    }

    pub fn progress_interval(&self) -> Option<u64> {
        self.progress_interval.map(NonZeroU64::get)
    }
}

/// Outcome of a job that ran to completion or was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub written: u64,
    pub cancelled: bool,
}

/// Generates keypairs one at a time and streams them to a sink.
#[derive(Debug, Clone)]
pub struct BulkKeypairExporter {
    job: ExportJob,
    stop_flag: Option<Arc<AtomicBool>>,
}

impl BulkKeypairExporter {
    pub fn new(job: ExportJob) -> Self {
        Self {
            job,
            stop_flag: None,
        }
    }

    /// Stops the job before the next generation once the flag is set.
    pub fn with_stop_flag(mut self, stop_flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(stop_flag);
        self
    }

    pub fn job(&self) -> &ExportJob {
        &self.job
    }

    fn is_stopped(&self) -> bool {
        self.stop_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Runs the job.
    ///
    /// Records are written in generation order and the sink is flushed on
    /// completion or cancellation. On error the sink is left as-is; a JSON
    /// array will be missing its closing bracket.
    pub fn run<K, W, P>(
        &self,
        mut keys: K,
        sink: W,
        mut observer: P,
    ) -> Result<ExportSummary, ExportError>
    where
        K: KeySource,
        W: Write,
        P: ProgressObserver,
    {
        let total = self.job.count();
        let format = self.job.format();

        let mut writer = RecordWriter::begin(sink, format)
            .map_err(|source| ExportError::SinkWrite { written: 0, source })?;
        let mut cancelled = false;

        log::debug!("Exporting {} {} record(s)", total, format);

        for _ in 0..total {
            if self.is_stopped() {
                cancelled = true;
                break;
            }

            let written = writer.written();

            let keypair = keys
                .generate()
                .map_err(|source| ExportError::KeyGeneration { written, source })?;
            let record = ExportRecord::from_keypair(&keypair, format, self.job.address_style());

            writer
                .write_record(&record)
                .map_err(|source| ExportError::SinkWrite { written, source })?;

            let written = written + 1;
            if let Some(every) = self.job.progress_interval {
                if written % every.get() == 0 {
                    observer.on_progress(written, total);
                }
            }
        }

        let written = writer.written();
        writer
            .finish()
            .map_err(|source| ExportError::SinkWrite { written, source })?;

        Ok(ExportSummary { written, cancelled })
    }
}

/// Writes `count` fresh keypairs from the thread CSPRNG to `sink`.
pub fn export<W: Write>(count: u64, format: RecordFormat, sink: W) -> Result<u64, ExportError> {
    let job = ExportJob::new(count, format)?;
    let summary = BulkKeypairExporter::new(job).run(RngKeySource::thread(), sink, NoProgress)?;
    Ok(summary.written)
}
