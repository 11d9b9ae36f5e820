//! Synchronous processing strategy
//!
//! Single-threaded implementation of the ProcessingStrategy trait. It
//! orchestrates the flow between the SyncReader (CSV input), the
//! LedgerEngine (group mutations) and the report writers.
//!
//! Rows are streamed one at a time; memory grows with the number of members
//! and expenses, not with the size of the input file.

use crate::core::LedgerEngine;
use crate::io::csv_format::write_report;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{successful_reports, ProcessingStrategy, ReportOptions};
use crate::types::SettleError;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use split_settle::strategy::{ProcessingStrategy, ReportOptions, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(ReportOptions::default());
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("ledger.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncProcessingStrategy {
    options: ReportOptions,
}

impl SyncProcessingStrategy {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Process ledger records from input file and write the report to output
    ///
    /// Fatal errors (file not found, I/O errors) are returned immediately.
    /// Row errors are logged and processing continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), SettleError> {
        let mut engine = LedgerEngine::new();
        let reader = SyncReader::new(input_path)?;

        let mut applied = 0usize;
        for result in reader {
            match result {
                Ok(record) => {
                    let kind = record.kind();
                    let group = record.group().clone();
                    match engine.process(record) {
                        Ok(()) => applied += 1,
                        Err(e) => warn!(
                            group = %group,
                            record = kind,
                            error = %e,
                            "Rejected ledger record"
                        ),
                    }
                }
                Err(e) => warn!(error = %e, "Skipping ledger row"),
            }
        }
        debug!(applied, groups = engine.groups().len(), "Ledger consumed");

        let reports = successful_reports(engine.reports(&self.options.engine));
        write_report(
            &reports,
            self.options.kind,
            self.options.engine.currency_scale,
            output,
        )
    }
}
