use serde::{Deserialize, Serialize};
use std::fmt;

/// Threshold at which a priority counts as "high" in narratives.
pub const HIGH_PRIORITY_THRESHOLD: u8 = 4;

/// The five scoring dimensions, in their fixed declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Cost,
    Performance,
    EaseOfUse,
    Scalability,
    Reliability,
}

impl Priority {
    pub const ALL: [Priority; 5] = [
        Priority::Cost,
        Priority::Performance,
        Priority::EaseOfUse,
        Priority::Scalability,
        Priority::Reliability,
    ];

    /// Field name as it appears in config files and exports
    pub fn key(self) -> &'static str {
        match self {
            Priority::Cost => "cost",
            Priority::Performance => "performance",
            Priority::EaseOfUse => "ease_of_use",
            Priority::Scalability => "scalability",
            Priority::Reliability => "reliability",
        }
    }

    /// Field name for prose ("ease of use")
    pub fn label(self) -> &'static str {
        match self {
            Priority::Cost => "cost",
            Priority::Performance => "performance",
            Priority::EaseOfUse => "ease of use",
            Priority::Scalability => "scalability",
            Priority::Reliability => "reliability",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// User-supplied importance levels, 1 (low) to 5 (high).
///
/// The engine takes these as given; range checks happen at the edges (see
/// `validate_weights`).
///
/// Example YAML:
/// ```yaml
/// priorities:
///   cost: 2
///   performance: 5
///   ease_of_use: 3
///   scalability: 4
///   reliability: 5
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct PriorityWeights {
    pub cost: u8,
    pub performance: u8,
    pub ease_of_use: u8,
    pub scalability: u8,
    pub reliability: u8,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self::uniform(3)
    }
}

impl PriorityWeights {
    /// Every dimension set to the same weight
    pub fn uniform(weight: u8) -> Self {
        Self {
            cost: weight,
            performance: weight,
            ease_of_use: weight,
            scalability: weight,
            reliability: weight,
        }
    }

    pub fn get(&self, priority: Priority) -> u8 {
        match priority {
            Priority::Cost => self.cost,
            Priority::Performance => self.performance,
            Priority::EaseOfUse => self.ease_of_use,
            Priority::Scalability => self.scalability,
            Priority::Reliability => self.reliability,
        }
    }

    pub fn set(&mut self, priority: Priority, weight: u8) {
        match priority {
            Priority::Cost => self.cost = weight,
            Priority::Performance => self.performance = weight,
            Priority::EaseOfUse => self.ease_of_use = weight,
            Priority::Scalability => self.scalability = weight,
            Priority::Reliability => self.reliability = weight,
        }
    }

    /// Dimensions weighted at or above the high threshold, in declaration order
    pub fn high_priorities(&self) -> Vec<Priority> {
        Priority::ALL
            .into_iter()
            .filter(|p| self.get(*p) >= HIGH_PRIORITY_THRESHOLD)
            .collect()
    }
}
