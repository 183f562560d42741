//! Batch verification of input records
//!
//! Walks every triple entry in input order, one at a time, with a fixed
//! delay before each resolution so the remote endpoint's rate limit holds.

pub mod io;

use crate::facts::{parse_triple, ExistenceResolver, InputRecord, VerificationRecord};
use crate::metrics::METRICS;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

pub use io::{read_records, write_records};

/// Counts for a finished run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    /// Every triple entry seen, skipped ones included
    pub processed: usize,
    pub skipped: usize,
    pub found: usize,
    pub not_found: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl VerificationSummary {
    fn start() -> Self {
        Self {
            processed: 0,
            skipped: 0,
            found: 0,
            not_found: 0,
            started_at: Utc::now(),
            finished_at: Utc::now(),
        }
    }

    pub fn verified(&self) -> usize {
        self.found + self.not_found
    }

    /// Log the end-of-run summary
    pub fn log(&self) {
        info!("--- Verification Summary ---");
        info!("Total triples processed: {}", self.processed);
        info!("Triples found: {}", self.found);
        info!("Triples not found: {}", self.not_found);
        if self.skipped > 0 {
            info!(
                "Entries skipped: {} (not counted as found or not found)",
                self.skipped
            );
        }
        info!(
            "Elapsed: {}s",
            (self.finished_at - self.started_at).num_seconds()
        );
    }
}

/// Records in input order plus the run summary
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub records: Vec<VerificationRecord>,
    pub summary: VerificationSummary,
}

/// Sequential driver around an [`ExistenceResolver`]
pub struct BatchVerifier {
    resolver: ExistenceResolver,
    throttle: Duration,
}

impl BatchVerifier {
    pub fn new(resolver: ExistenceResolver, throttle: Duration) -> Self {
        Self { resolver, throttle }
    }

    /// Verify every triple entry of every record
    ///
    /// Entries that are not text or do not split into three parts are skipped
    /// and produce no record.
    pub async fn run(&self, records: &[InputRecord]) -> BatchReport {
        let total: usize = records.iter().map(|r| r.triples.len()).sum();
        let mut summary = VerificationSummary::start();
        let mut results = Vec::with_capacity(total);

        for record in records {
            let label = record.source_label();

            for entry in &record.triples {
                summary.processed += 1;

                let triple = match parse_triple(entry) {
                    Ok(triple) => triple,
                    Err(e) => {
                        warn!("Skipping invalid triple for id {}: {} ({})", label, e, entry);
                        summary.skipped += 1;
                        METRICS.record_triple("skipped");
                        continue;
                    }
                };

                if !self.throttle.is_zero() {
                    tokio::time::sleep(self.throttle).await;
                }

                let resolution = self.resolver.resolve_triple(&triple).await;

                if resolution.exists {
                    summary.found += 1;
                    METRICS.record_triple("found");
                } else {
                    summary.not_found += 1;
                    METRICS.record_triple("not_found");
                }

                let status = if resolution.exists {
                    "exists"
                } else {
                    "does not exist"
                };
                info!(
                    "Processed {}/{}: Triple for '{}' {}.",
                    summary.processed, total, label, status
                );

                results.push(VerificationRecord::new(
                    record.source_id.clone(),
                    &triple,
                    resolution.query,
                    resolution.exists,
                ));
            }
        }

        summary.finished_at = Utc::now();
        BatchReport {
            records: results,
            summary,
        }
    }
}
