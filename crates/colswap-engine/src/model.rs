use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use colswap_core::Dataset;
use colswap_plan::{PermutationPolicy, RandomizationUnit};
use serde::{Deserialize, Serialize};

/// Summary of one swap group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupReport {
    pub name: String,
    pub columns: Vec<String>,
    pub unit: RandomizationUnit,
    pub policy: PermutationPolicy,
    /// Rows that received a non-identity permutation.
    pub rows_permuted: u64,
    pub rows_unchanged: u64,
    /// Cells whose value differs from the input after the swap.
    pub cells_changed: u64,
    /// Target column to source column, recorded for per-column groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment: Option<BTreeMap<String, String>>,
}

/// Report for a swap run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapReport {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    /// Seed that drove the run; replaying it reproduces the output.
    pub seed: u64,
    pub seed_configured: bool,
    pub rows: u64,
    pub groups: Vec<GroupReport>,
    pub duration_ms: u64,
}

impl SwapReport {
    pub fn new(seed: u64, seed_configured: bool, rows: usize) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            seed,
            seed_configured,
            rows: rows as u64,
            groups: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn rows_permuted_total(&self) -> u64 {
        self.groups.iter().map(|group| group.rows_permuted).sum()
    }
}

/// Output dataset plus the run report.
#[derive(Debug, Clone)]
pub struct SwapResult {
    pub dataset: Dataset,
    pub report: SwapReport,
}
