use std::fmt;
use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How permutations are drawn for a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RandomizationUnit {
    /// Draw an independent permutation for every row.
    #[default]
    PerRow,
    /// Draw one permutation and apply it to every row.
    PerColumn,
}

impl fmt::Display for RandomizationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RandomizationUnit::PerRow => f.write_str("per-row"),
            RandomizationUnit::PerColumn => f.write_str("per-column"),
        }
    }
}

/// Column reference by name or zero-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ColumnRef {
    Name(String),
    Index(usize),
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Name(name) => write!(f, "'{name}'"),
            ColumnRef::Index(index) => write!(f, "#{index}"),
        }
    }
}

impl From<&str> for ColumnRef {
    fn from(value: &str) -> Self {
        ColumnRef::Name(value.to_string())
    }
}

impl From<usize> for ColumnRef {
    fn from(value: usize) -> Self {
        ColumnRef::Index(value)
    }
}

/// Group entry; accepts a bare column list or a full spec.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum GroupConfig {
    Columns(Vec<ColumnRef>),
    Spec(GroupSpec),
}

/// Swap group with optional per-group overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GroupSpec {
    /// Display name used in reports; defaults to `group_<index>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Columns whose values are exchanged.
    pub columns: Vec<ColumnRef>,
    /// Overrides the global randomization unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<RandomizationUnit>,
    /// Overrides the global force-swap flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_swap: Option<bool>,
    /// Overrides the global derangement flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derangement: Option<bool>,
}

impl GroupConfig {
    pub fn name(&self) -> Option<&str> {
        match self {
            GroupConfig::Columns(_) => None,
            GroupConfig::Spec(spec) => spec.name.as_deref(),
        }
    }

    pub fn columns(&self) -> &[ColumnRef] {
        match self {
            GroupConfig::Columns(columns) => columns,
            GroupConfig::Spec(spec) => &spec.columns,
        }
    }

    /// JSON pointer of the column list relative to the group entry.
    pub(crate) fn columns_path(&self, base_path: &str) -> String {
        match self {
            GroupConfig::Columns(_) => base_path.to_string(),
            GroupConfig::Spec(_) => format!("{base_path}/columns"),
        }
    }

    fn spec(&self) -> Option<&GroupSpec> {
        match self {
            GroupConfig::Columns(_) => None,
            GroupConfig::Spec(spec) => Some(spec),
        }
    }

    pub fn unit(&self) -> Option<RandomizationUnit> {
        self.spec().and_then(|spec| spec.unit)
    }

    pub fn force_swap(&self) -> Option<bool> {
        self.spec().and_then(|spec| spec.force_swap)
    }

    pub fn derangement(&self) -> Option<bool> {
        self.spec().and_then(|spec| spec.derangement)
    }
}

/// Canonical swap configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SwapConfig {
    /// Seed for reproducible runs: a non-negative integer, or a string holding one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<serde_json::Value>,
    /// Default randomization unit for every group.
    #[serde(default)]
    pub unit: RandomizationUnit,
    /// Exclude the identity permutation.
    #[serde(default)]
    pub force_swap: bool,
    /// Require that no column keeps its own value.
    #[serde(default)]
    pub derangement: bool,
    /// Default destination for the swapped dataset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,
    /// Column groups, processed in order.
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
}
