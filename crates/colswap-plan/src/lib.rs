//! Swap configuration contract and plan building for colswap.
//!
//! A [`SwapConfig`] is checked structurally against its JSON Schema, then
//! compiled against a dataset [`colswap_core::Schema`] into an immutable
//! [`SwapPlan`] whose groups are resolved to column positions.

pub mod builder;
pub mod errors;
pub mod loader;
pub mod model;
pub mod schema;
pub mod validate;

pub use builder::{PermutationPolicy, SwapGroup, SwapPlan, build};
pub use errors::{ConfigError, Result, ValidationIssue, ValidationReport};
pub use loader::{ConfigFormat, load_config, parse_config, parse_config_str};
pub use model::{ColumnRef, GroupConfig, GroupSpec, RandomizationUnit, SwapConfig};
pub use schema::config_json_schema;
pub use validate::{LEGACY_GROUPS_KEY, normalize_config_json, validate_config_json};
