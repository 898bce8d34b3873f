use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A fixed grouping of options of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Api,
    CloudService,
    Database,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Api, Category::CloudService, Category::Database];

    /// Key used in config files, exports and on the command line
    pub fn key(self) -> &'static str {
        match self {
            Category::Api => "api",
            Category::CloudService => "cloud-service",
            Category::Database => "database",
        }
    }

    /// Human-readable heading
    pub fn label(self) -> &'static str {
        match self {
            Category::Api => "APIs & Services",
            Category::CloudService => "Cloud Services",
            Category::Database => "Databases",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let keys: Vec<&str> = Category::ALL.iter().map(|c| c.key()).collect();
                format!("unknown category '{}' (expected one of: {})", s, keys.join(", "))
            })
    }
}

/// Runtime characteristics, each rated 1 (poor) to 5 (excellent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Performance {
    pub speed: u8,
    pub scalability: u8,
    pub reliability: u8,
}

/// Adoption cost, each rated 1 (trivial) to 5 (demanding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Complexity {
    pub setup: u8,
    pub maintenance: u8,
    pub learning: u8,
}

/// A single named alternative within a category.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogOption {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub use_cases: Vec<String>,
    #[serde(default)]
    pub performance: Option<Performance>,
    #[serde(default)]
    pub complexity: Option<Complexity>,
}

impl CatalogOption {
    /// First `n` pros in declaration order
    pub fn top_pros(&self, n: usize) -> &[String] {
        &self.pros[..n.min(self.pros.len())]
    }

    /// First `n` use cases in declaration order
    pub fn top_use_cases(&self, n: usize) -> &[String] {
        &self.use_cases[..n.min(self.use_cases.len())]
    }

    /// Every rated attribute as (field path, value), for range validation
    pub(crate) fn ratings(&self) -> Vec<(&'static str, u8)> {
        let mut ratings = Vec::new();
        if let Some(perf) = self.performance {
            ratings.push(("performance.speed", perf.speed));
            ratings.push(("performance.scalability", perf.scalability));
            ratings.push(("performance.reliability", perf.reliability));
        }
        if let Some(comp) = self.complexity {
            ratings.push(("complexity.setup", comp.setup));
            ratings.push(("complexity.maintenance", comp.maintenance));
            ratings.push(("complexity.learning", comp.learning));
        }
        ratings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_option() -> CatalogOption {
        CatalogOption {
            id: "REST API".to_string(),
            description: "Simple web services".to_string(),
            pros: vec!["Simple".to_string(), "Caching".to_string(), "Tooling".to_string()],
            cons: vec![],
            use_cases: vec!["CRUD".to_string()],
            performance: Some(Performance { speed: 4, scalability: 4, reliability: 5 }),
            complexity: None,
        }
    }

    #[test]
    fn test_category_parse_keys() {
        assert_eq!("api".parse::<Category>().unwrap(), Category::Api);
        assert_eq!("cloud-service".parse::<Category>().unwrap(), Category::CloudService);
        assert_eq!("Database".parse::<Category>().unwrap(), Category::Database);
    }

    #[test]
    fn test_category_parse_unknown() {
        let err = "queues".parse::<Category>().unwrap_err();
        assert!(err.contains("queues"));
        assert!(err.contains("cloud-service"));
    }

    #[test]
    fn test_category_display_matches_serde() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category));
        }
    }

    #[test]
    fn test_top_pros_truncates() {
        let option = sample_option();
        assert_eq!(option.top_pros(2), &["Simple".to_string(), "Caching".to_string()]);
    }

    #[test]
    fn test_top_use_cases_shorter_than_requested() {
        let option = sample_option();
        assert_eq!(option.top_use_cases(2), &["CRUD".to_string()]);
    }

    #[test]
    fn test_ratings_skip_missing_triples() {
        let option = sample_option();
        let ratings = option.ratings();
        assert_eq!(ratings.len(), 3);
        assert_eq!(ratings[2], ("performance.reliability", 5));
    }

    #[test]
    fn test_option_parse_without_optional_fields() {
        let yaml = r#"
id: "SQLite"
description: "Embedded database"
"#;
        let option: CatalogOption = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(option.id, "SQLite");
        assert!(option.pros.is_empty());
        assert!(option.performance.is_none());
        assert!(option.complexity.is_none());
    }
}
