use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::model::SwapConfig;

/// Emit the JSON Schema for swap configuration documents.
pub fn config_json_schema() -> RootSchema {
    schema_for!(SwapConfig)
}
