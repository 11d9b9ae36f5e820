//! Split Settle CLI
//!
//! Command-line interface for settling shared-expense groups from a CSV ledger.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- ledger.csv > settlements.csv
//! cargo run -- --report balances ledger.csv > balances.csv
//! cargo run -- --strategy sync --scale 0 ledger.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 ledger.csv
//! RUST_LOG=debug cargo run -- ledger.csv
//! ```
//!
//! The program reads ledger records from the input CSV file, applies them to
//! their groups using the selected processing strategy, and writes the
//! requested report to stdout. Diagnostics go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use split_settle::cli;
use split_settle::strategy;
use std::process;

fn main() {
    let args = cli::parse_args();
    cli::init_logging(&args.log_level);

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config, args.to_report_options())
    };

    let mut output = std::io::stdout().lock();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
