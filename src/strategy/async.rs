//! Asynchronous batch processing strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of the
//! ProcessingStrategy trait. It processes ledger records in batches using
//! thread-based parallelism with group-based partitioning.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (group partitioning + threading)
//!     └── AsyncLedgerEngine (DashMap of groups)
//! ```
//!
//! # Thread-Based Parallelism
//!
//! - Batches are processed one after another, so the records of a group that
//!   span several batches are still applied in input order
//! - Within a batch, records are partitioned by group and each group runs in
//!   its own tokio task
//! - Once the input is consumed, group reports are computed in parallel from
//!   snapshots

use crate::core::r#async::{AsyncLedgerEngine, BatchProcessor};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_report;
use crate::io::sync_reader::open_error;
use crate::strategy::{successful_reports, ProcessingStrategy, ReportOptions};
use crate::types::SettleError;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Configuration for batch processing
///
/// Controls how ledger records are batched and the number of worker threads
/// for parallel processing within each batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of ledger records per batch
    pub batch_size: usize,
    /// Number of worker threads
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig, replacing zero values by the defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "Invalid batch size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                max_concurrent_batches,
                default = default.max_concurrent_batches,
                "Invalid max concurrent batches, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
///
/// Produces exactly the same output as the sync strategy for the same input.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
    options: ReportOptions,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig, options: ReportOptions) -> Self {
        Self { config, options }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process ledger records from input file and write the report to output
    ///
    /// 1. Creates a tokio multi-threaded runtime
    /// 2. Reads ledger records in batches with AsyncReader
    /// 3. Applies each batch before reading the next, groups in parallel
    /// 4. Computes group reports in parallel from snapshots
    /// 5. Writes the report in group id order
    ///
    /// Fatal errors (file not found, I/O errors, runtime errors) are returned
    /// immediately. Row errors are logged and processing continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), SettleError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| SettleError::IoError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        let reports = runtime.block_on(async {
            let engine = Arc::new(AsyncLedgerEngine::new());
            let processor = BatchProcessor::new(Arc::clone(&engine));

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| open_error(input_path, e))?;

            // csv-async reads through the futures I/O traits
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let mut applied = 0usize;
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                for result in processor.process_batch(batch).await {
                    match result.result {
                        Ok(()) => applied += 1,
                        Err(e) => warn!(
                            group = %result.record.group(),
                            record = result.record.kind(),
                            error = %e,
                            "Rejected ledger record"
                        ),
                    }
                }
            }
            debug!(applied, groups = engine.len(), "Ledger consumed");

            Ok::<_, SettleError>(processor.compute_reports(self.options.engine).await)
        })?;

        write_report(
            &successful_reports(reports),
            self.options.kind,
            self.options.engine.currency_scale,
            output,
        )
    }
}
