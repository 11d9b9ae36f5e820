use crate::config::EngineConfig;
use crate::strategy::{BatchConfig, ReportOptions};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Work out who owes whom in shared-expense groups
#[derive(Parser, Debug)]
#[command(name = "split-settle")]
#[command(about = "Compute balances and settlement payments for shared-expense groups", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing ledger records
    #[arg(value_name = "INPUT", help = "Path to the input ledger CSV file")]
    pub input_file: PathBuf,

    /// Processing strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Report to write to stdout
    #[arg(
        long = "report",
        value_name = "REPORT",
        default_value = "settlements",
        help = "Report: 'settlements' for the payment plan or 'balances' for per-member balances"
    )]
    pub report: ReportKind,

    /// Decimal places of the currency minor unit
    #[arg(
        long = "scale",
        value_name = "PLACES",
        help = "Decimal places of the currency minor unit (default: 2, max: 10)"
    )]
    pub currency_scale: Option<u32>,

    /// Number of ledger records per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of ledger records per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Log filter used when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log level when RUST_LOG is not set (error, warn, info, debug, trace)"
    )]
    pub log_level: String,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Available reports
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Payments that settle every group
    Settlements,
    /// Net balance of every member
    Balances,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults; zero values are replaced by
    /// the defaults with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// Create an EngineConfig from CLI arguments
    pub fn to_engine_config(&self) -> EngineConfig {
        self.currency_scale
            .map(EngineConfig::new)
            .unwrap_or_default()
    }

    /// Report kind and calculation settings
    pub fn to_report_options(&self) -> ReportOptions {
        ReportOptions {
            kind: self.report,
            engine: self.to_engine_config(),
        }
    }
}
