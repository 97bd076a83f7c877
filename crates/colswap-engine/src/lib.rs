//! Column swap engine for colswap.
//!
//! Consumes a validated [`colswap_plan::SwapPlan`] and an in-memory
//! [`colswap_core::Dataset`] and produces a new dataset whose grouped columns
//! have their values permuted per row (or once per group), driven by a single
//! seeded generator so runs are reproducible.

pub mod engine;
pub mod errors;
pub mod io;
pub mod model;
pub mod orchestrator;
pub mod permutation;

pub use engine::RowSwapEngine;
pub use errors::SwapError;
pub use io::{DatasetFormat, dataset_to_bytes, read_dataset};
pub use model::{GroupReport, SwapReport, SwapResult};
pub use orchestrator::{SwapOrchestrator, execute};
pub use permutation::{Permutation, draw_permutation};
