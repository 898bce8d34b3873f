use super::config::{Priority, PriorityWeights};

pub const MIN_WEIGHT: u8 = 1;
pub const MAX_WEIGHT: u8 = 5;

/// Validate priority weights before they reach the engine.
/// Returns all validation errors at once (not just the first).
pub fn validate_weights(weights: &PriorityWeights) -> Result<(), Vec<String>> {
    let errors: Vec<String> = Priority::ALL
        .into_iter()
        .filter_map(|priority| {
            let value = weights.get(priority);
            if (MIN_WEIGHT..=MAX_WEIGHT).contains(&value) {
                None
            } else {
                Some(format!(
                    "priorities.{}: must be between {} and {}, got {}",
                    priority.key(),
                    MIN_WEIGHT,
                    MAX_WEIGHT,
                    value
                ))
            }
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_valid() {
        assert!(validate_weights(&PriorityWeights::default()).is_ok());
    }

    #[test]
    fn test_boundaries_valid() {
        assert!(validate_weights(&PriorityWeights::uniform(1)).is_ok());
        assert!(validate_weights(&PriorityWeights::uniform(5)).is_ok());
    }

    #[test]
    fn test_zero_weight() {
        let mut weights = PriorityWeights::default();
        weights.cost = 0;
        let errors = validate_weights(&weights).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0], "priorities.cost: must be between 1 and 5, got 0");
    }

    #[test]
    fn test_collects_all_errors() {
        let weights = PriorityWeights {
            cost: 3,
            performance: 9,  // Error 1
            ease_of_use: 0,  // Error 2
            scalability: 3,
            reliability: 6,  // Error 3
        };
        let errors = validate_weights(&weights).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("priorities.performance"));
        assert!(errors[1].contains("priorities.ease_of_use"));
        assert!(errors[2].contains("priorities.reliability"));
    }
}
