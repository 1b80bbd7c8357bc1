use serde::{Deserialize, Serialize};

use crate::constants::MAX_TYPE_RECURSION_DEPTH;

/// Tuning knobs for one conversion session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Deepest descriptor nesting resolved before giving up on a branch
    pub max_depth:                     usize,
    /// Treat a parameterized type without arguments as unrepresentable
    /// instead of returning its raw schema
    pub reject_missing_type_arguments: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_depth:                     MAX_TYPE_RECURSION_DEPTH,
            reject_missing_type_arguments: false,
        }
    }
}
