//! Processing strategy module for ledger processing
//!
//! This module defines the Strategy pattern for complete processing pipelines,
//! encompassing CSV parsing, ledger record processing and report output. This
//! allows different implementations (synchronous, asynchronous batch) to be
//! selected at runtime.

use crate::cli::{ReportKind, StrategyType};
use crate::config::EngineConfig;
use crate::core::summary::GroupReport;
use crate::types::{GroupId, SettleError};
use std::io::Write;
use std::path::Path;
use tracing::warn;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// What a strategy computes and how it writes it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportOptions {
    /// Report written to the output
    pub kind: ReportKind,
    /// Calculation settings
    pub engine: EngineConfig,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            kind: ReportKind::Settlements,
            engine: EngineConfig::default(),
        }
    }
}

/// Processing strategy trait for complete ledger processing pipelines
///
/// Each strategy reads ledger records from a CSV file, applies them to the
/// groups they name, and writes one report covering every group.
pub trait ProcessingStrategy: Send + Sync {
    /// Process ledger records from input file and write the report to output
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened (file not found, permission denied)
    /// - A fatal I/O error occurs during reading or writing
    /// - Output cannot be written
    ///
    /// Individual rows that are malformed or rejected by their group are
    /// logged at `warn` and skipped; processing continues with the next row.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), SettleError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// `config` only applies to the async strategy and falls back to defaults
/// when absent.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
    options: ReportOptions,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(options)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, options))
        }
    }
}

/// Keep the reports that could be computed, logging the groups that failed
pub(crate) fn successful_reports(
    reports: Vec<(GroupId, Result<GroupReport, SettleError>)>,
) -> Vec<GroupReport> {
    reports
        .into_iter()
        .filter_map(|(group, report)| match report {
            Ok(report) => Some(report),
            Err(e) => {
                warn!(group = %group, error = %e, "Omitting group from report");
                None
            }
        })
        .collect()
}
