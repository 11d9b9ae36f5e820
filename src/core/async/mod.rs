//! Asynchronous implementations of core components
//!
//! This module provides thread-safe, concurrent implementations of the ledger
//! engine using DashMap for locking.
//!
//! # Architecture
//!
//! - **AsyncLedgerEngine**: Thread-safe group book using DashMap
//! - **BatchProcessor**: Partitions record batches by group and fans them out
//!   to tokio tasks, then computes group reports in parallel
//!
//! # Thread Safety
//!
//! - Records for different groups are applied in parallel
//! - Records for the same group are applied sequentially, in input order
//! - Reports are computed from owned group snapshots, never from live state

pub mod batch_processor;
pub mod engine;

pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use engine::AsyncLedgerEngine;
