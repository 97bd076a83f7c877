//! Core contracts for colswap.
//!
//! This crate defines the in-memory dataset model shared by the plan
//! builder, the swap engine, and the CLI: a closed cell [`Value`] type, the
//! ordered column [`Schema`], and the row-oriented [`Dataset`].

pub mod dataset;
pub mod error;
pub mod schema;
pub mod value;

pub use dataset::{Dataset, Row};
pub use error::{Result, SchemaError};
pub use schema::Schema;
pub use value::Value;
