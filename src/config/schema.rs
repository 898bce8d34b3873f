use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::PriorityWeights;

/// Contents of `~/.config/referee/config.yaml`.
///
/// Example YAML:
/// ```yaml
/// priorities:
///   performance: 5
///   reliability: 4
/// catalog: /home/me/catalog.yaml
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default weights; command-line flags override individual fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priorities: Option<PriorityWeights>,

    /// Optional catalog file replacing the built-in catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

impl Config {
    /// Weights from the config file, or the defaults
    pub fn effective_weights(&self) -> PriorityWeights {
        self.priorities.unwrap_or_default()
    }
}
