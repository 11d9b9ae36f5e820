//! Batch processing with group-based partitioning for async ledger processing
//!
//! This module provides the `BatchProcessor` struct, which manages concurrent
//! batch processing with group-based partitioning to enable parallel
//! processing while maintaining per-group record ordering.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     └── Arc<AsyncLedgerEngine>  (shared group book)
//! ```
//!
//! # Thread Safety
//!
//! The processor is cloneable and can be safely shared across async tasks.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error};

use super::AsyncLedgerEngine;
use crate::config::EngineConfig;
use crate::core::group::Group;
use crate::core::summary::GroupReport;
use crate::types::{GroupId, LedgerRecord, SettleError};

/// Result of applying a single ledger record
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The record that was applied
    pub record: LedgerRecord,

    /// The result of applying it
    pub result: Result<(), SettleError>,
}

/// Batch processor with group-based partitioning
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    engine: Arc<AsyncLedgerEngine>,
}

impl BatchProcessor {
    /// Create a new BatchProcessor sharing `engine`
    pub fn new(engine: Arc<AsyncLedgerEngine>) -> Self {
        Self { engine }
    }

    /// Partition a batch of records by group id
    ///
    /// # Guarantees
    ///
    /// - Each record appears in exactly one sub-batch
    /// - Records for each group keep their original order
    pub fn partition_by_group(
        &self,
        batch: Vec<LedgerRecord>,
    ) -> HashMap<GroupId, Vec<LedgerRecord>> {
        let mut group_batches: HashMap<GroupId, Vec<LedgerRecord>> = HashMap::new();

        for record in batch {
            group_batches
                .entry(record.group().clone())
                .or_default()
                .push(record);
        }

        group_batches
    }

    /// Apply all records of one group sequentially
    ///
    /// Every record is applied even if an earlier one fails. Results are in
    /// input order.
    pub async fn process_group_records(&self, records: Vec<LedgerRecord>) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(records.len());

        for record in records {
            let result = self.engine.process_record(record.clone());
            results.push(ProcessingResult { record, result });
        }

        results
    }

    /// Apply a batch of records with group-based partitioning
    ///
    /// Groups are processed concurrently in their own tokio task; the records
    /// of one group are applied sequentially in order. Results of different
    /// groups may come back in any order.
    pub async fn process_batch(&self, batch: Vec<LedgerRecord>) -> Vec<ProcessingResult> {
        let group_batches = self.partition_by_group(batch);

        let mut tasks = Vec::new();
        for (_group_id, records) in group_batches {
            let processor = self.clone();
            let task =
                tokio::spawn(async move { processor.process_group_records(records).await });
            tasks.push(task);
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(group_results) => results.extend(group_results),
                Err(e) => {
                    error!(error = %e, "Group task panicked");
                }
            }
        }

        results
    }

    /// Compute the report of every group concurrently
    ///
    /// Each report is computed in its own tokio task from a detached copy of
    /// the group. Results are returned sorted by group id.
    pub async fn compute_reports(
        &self,
        config: EngineConfig,
    ) -> Vec<(GroupId, Result<GroupReport, SettleError>)> {
        let snapshot: Vec<Group> = self.engine.snapshot();
        debug!(groups = snapshot.len(), "Computing group reports");

        let mut tasks = Vec::with_capacity(snapshot.len());
        for group in snapshot {
            let id = group.id().clone();
            let task = tokio::spawn(async move { GroupReport::compute(&group, &config) });
            tasks.push((id, task));
        }

        let mut reports = Vec::with_capacity(tasks.len());
        for (id, task) in tasks {
            match task.await {
                Ok(report) => reports.push((id, report)),
                Err(e) => {
                    error!(group = %id, error = %e, "Report task panicked");
                }
            }
        }

        reports
    }
}
