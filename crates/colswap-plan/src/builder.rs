use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use colswap_core::Schema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{ConfigError, ValidationIssue, ValidationReport};
use crate::model::{ColumnRef, GroupConfig, RandomizationUnit, SwapConfig};

/// Which permutations a group may draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermutationPolicy {
    /// Any of the k! orderings, identity included.
    Any,
    /// Every ordering except the identity (force-swap).
    NonIdentity,
    /// Orderings without fixed points.
    Derangement,
}

impl PermutationPolicy {
    pub fn from_flags(force_swap: bool, derangement: bool) -> Self {
        if derangement {
            PermutationPolicy::Derangement
        } else if force_swap {
            PermutationPolicy::NonIdentity
        } else {
            PermutationPolicy::Any
        }
    }
}

impl fmt::Display for PermutationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermutationPolicy::Any => f.write_str("any"),
            PermutationPolicy::NonIdentity => f.write_str("non_identity"),
            PermutationPolicy::Derangement => f.write_str("derangement"),
        }
    }
}

/// Swap group resolved to column positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapGroup {
    name: String,
    columns: Vec<usize>,
    column_names: Vec<String>,
    unit: RandomizationUnit,
    policy: PermutationPolicy,
}

impl SwapGroup {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column positions in configuration order.
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn unit(&self) -> RandomizationUnit {
        self.unit
    }

    pub fn policy(&self) -> PermutationPolicy {
        self.policy
    }
}

/// Immutable, validated swap plan.
#[derive(Debug, Clone)]
pub struct SwapPlan {
    schema: Schema,
    groups: Vec<SwapGroup>,
    seed: Option<u64>,
    output_file: Option<PathBuf>,
    warnings: Vec<ValidationIssue>,
}

impl SwapPlan {
    /// Schema the plan was validated against.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Groups in configuration order.
    pub fn groups(&self) -> &[SwapGroup] {
        &self.groups
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }

    pub fn warnings(&self) -> &[ValidationIssue] {
        &self.warnings
    }
}

/// Compile a configuration into a swap plan for `schema`.
///
/// Every issue is collected before failing, so a single `ConfigError`
/// describes all unknown columns, undersized groups, overlaps and seed
/// problems at once.
pub fn build(config: &SwapConfig, schema: &Schema) -> Result<SwapPlan, ConfigError> {
    let mut report = ValidationReport::default();

    let seed = resolve_seed(config.seed.as_ref(), &mut report);
    let groups = resolve_groups(config, schema, &mut report);

    if !report.is_ok() {
        return Err(ConfigError::Invalid(report));
    }

    if config.groups.is_empty() {
        report.push_warning(ValidationIssue::new(
            "no_groups",
            "/groups",
            "configuration declares no swap groups; output equals input",
        )
        .with_hint("add at least one group of two or more columns"));
    }

    if seed.is_none() {
        report.push_warning(ValidationIssue::new(
            "seed_not_set",
            "/seed",
            "no seed configured; the run is not reproducible",
        )
        .with_hint("set seed to replay the same permutations"));
    }

    Ok(SwapPlan {
        schema: schema.clone(),
        groups,
        seed,
        output_file: config.output_file.clone(),
        warnings: report.warnings,
    })
}

fn resolve_seed(seed: Option<&Value>, report: &mut ValidationReport) -> Option<u64> {
    let seed = seed?;
    let parsed = match seed {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    };

    if parsed.is_none() {
        report.push_error(ValidationIssue::new(
            "invalid_seed",
            "/seed",
            format!("seed {seed} is not a valid non-negative integer"),
        )
        .with_hint("use an integer between 0 and 18446744073709551615"));
    }

    parsed
}

fn resolve_groups(
    config: &SwapConfig,
    schema: &Schema,
    report: &mut ValidationReport,
) -> Vec<SwapGroup> {
    let mut groups = Vec::new();
    let mut claimed: HashMap<usize, String> = HashMap::new();
    let mut names: HashSet<String> = HashSet::new();

    for (idx, group) in config.groups.iter().enumerate() {
        let base_path = format!("/groups/{idx}");
        let name = group
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("group_{idx}"));

        if !names.insert(name.clone()) {
            report.push_error(ValidationIssue::new(
                "duplicate_group_name",
                format!("{base_path}/name"),
                format!("group name '{name}' is used more than once"),
            )
            .with_hint("give every group a unique name"));
        }

        let columns = group.columns();
        let mut valid = true;
        if columns.len() < 2 {
            valid = false;
            report.push_error(ValidationIssue::new(
                "group_too_small",
                group.columns_path(&base_path),
                format!(
                    "group '{name}' has {} column(s); at least 2 are required",
                    columns.len()
                ),
            )
            .with_hint("add another column or remove the group"));
        }

        let resolved = resolve_columns(group, &name, &base_path, schema, &claimed, report);
        if resolved.len() != columns.len() {
            valid = false;
        }

        for &column in &resolved {
            claimed.entry(column).or_insert_with(|| name.clone());
        }

        if valid {
            let unit = group.unit().unwrap_or(config.unit);
            let policy = PermutationPolicy::from_flags(
                group.force_swap().unwrap_or(config.force_swap),
                group.derangement().unwrap_or(config.derangement),
            );
            groups.push(SwapGroup {
                column_names: resolved
                    .iter()
                    .filter_map(|&column| schema.name(column).map(str::to_string))
                    .collect(),
                name,
                columns: resolved,
                unit,
                policy,
            });
        }
    }

    groups
}

fn resolve_columns(
    group: &GroupConfig,
    name: &str,
    base_path: &str,
    schema: &Schema,
    claimed: &HashMap<usize, String>,
    report: &mut ValidationReport,
) -> Vec<usize> {
    let columns_path = group.columns_path(base_path);
    let mut resolved = Vec::new();
    let mut in_group = HashSet::new();

    for (col_idx, column) in group.columns().iter().enumerate() {
        let path = format!("{columns_path}/{col_idx}");

        let Some(index) = resolve_column(column, schema) else {
            report.push_error(ValidationIssue::new(
                "unknown_column",
                path,
                format!("column {column} in group '{name}' not found in dataset schema"),
            )
            .with_hint(format!("available columns: {}", schema.columns().join(", "))));
            continue;
        };

        if !in_group.insert(index) {
            report.push_error(ValidationIssue::new(
                "duplicate_column",
                path,
                format!("column {column} appears more than once in group '{name}'"),
            ));
            continue;
        }

        if let Some(owner) = claimed.get(&index) {
            report.push_error(ValidationIssue::new(
                "overlapping_groups",
                path,
                format!("column {column} in group '{name}' is already claimed by group '{owner}'"),
            )
            .with_hint("a column may belong to at most one group"));
            continue;
        }

        resolved.push(index);
    }

    resolved
}

fn resolve_column(column: &ColumnRef, schema: &Schema) -> Option<usize> {
    match column {
        ColumnRef::Name(name) => schema.index_of(name),
        ColumnRef::Index(index) => (*index < schema.len()).then_some(*index),
    }
}
