use std::time::Instant;

use colswap_core::{Dataset, Row, SchemaError};
use colswap_plan::SwapPlan;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::engine::RowSwapEngine;
use crate::model::{SwapReport, SwapResult};

/// Runs every group of a plan over a dataset.
#[derive(Debug, Clone, Copy)]
pub struct SwapOrchestrator<'a> {
    plan: &'a SwapPlan,
}

impl<'a> SwapOrchestrator<'a> {
    pub fn new(plan: &'a SwapPlan) -> Self {
        Self { plan }
    }

    /// Swap `dataset` into a new dataset, leaving the input untouched.
    ///
    /// One ChaCha8 stream seeded from the plan feeds every draw: groups in
    /// configuration order, rows in dataset order. Groups read the input rows
    /// and write the output copy, so no group observes another's writes.
    /// Without a configured seed one is drawn from the thread RNG and
    /// reported.
    pub fn run(&self, dataset: &Dataset) -> Result<SwapResult, SchemaError> {
        self.plan.schema().ensure_matches(dataset.schema())?;
        dataset.ensure_consistent()?;

        let start = Instant::now();
        let seed = self.plan.seed().unwrap_or_else(|| rand::rng().random());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut report = SwapReport::new(seed, self.plan.seed().is_some(), dataset.len());

        debug!(
            run_id = %report.run_id,
            seed,
            rows = dataset.len(),
            groups = self.plan.groups().len(),
            "swap started"
        );

        let source = dataset.rows();
        let mut output: Vec<Row> = source.to_vec();

        for group in self.plan.groups() {
            let group_report = RowSwapEngine::new(group).swap_rows(source, &mut output, &mut rng);
            info!(
                event = "group_swapped",
                group = %group_report.name,
                unit = %group_report.unit,
                policy = %group_report.policy,
                rows_permuted = group_report.rows_permuted,
                cells_changed = group_report.cells_changed,
                "group {}: {} rows swapped",
                group_report.name,
                group_report.rows_permuted
            );
            report.groups.push(group_report);
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        debug!(
            run_id = %report.run_id,
            duration_ms = report.duration_ms,
            "swap finished"
        );

        let dataset = Dataset::new(dataset.schema().clone(), output)?;
        Ok(SwapResult { dataset, report })
    }
}

/// Swap `dataset` according to `plan`, returning only the output dataset.
pub fn execute(plan: &SwapPlan, dataset: &Dataset) -> Result<Dataset, SchemaError> {
    SwapOrchestrator::new(plan)
        .run(dataset)
        .map(|result| result.dataset)
}
