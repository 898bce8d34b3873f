//! One comparison run: validate the selection, then rank, analyze and summarize.

use std::collections::HashSet;
use thiserror::Error;

use crate::analysis::{summarize, tradeoff, Tradeoff};
use crate::catalog::{Catalog, CatalogError, CatalogOption, Category};
use crate::scoring::{rank, PriorityWeights, ScoredOption};

pub const MIN_SELECTED: usize = 2;
pub const MAX_SELECTED: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    #[error("select at least 2 options to compare (got {0})")]
    TooFewOptions(usize),

    #[error("select at most 4 options to compare (got {0})")]
    TooManyOptions(usize),

    #[error("option '{0}' was selected more than once")]
    DuplicateOption(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Everything a comparison needs from the caller.
///
/// Requirements and constraints are carried through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRequest {
    pub category: Category,
    pub selected: Vec<String>,
    pub weights: PriorityWeights,
    pub requirements: Vec<String>,
    pub constraints: Vec<String>,
}

impl ComparisonRequest {
    pub fn new(category: Category, selected: Vec<String>, weights: PriorityWeights) -> Self {
        Self {
            category,
            selected,
            weights,
            requirements: Vec::new(),
            constraints: Vec::new(),
        }
    }
}

/// The outcome of one comparison. Borrows option data from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult<'a> {
    pub category: Category,
    pub selected: Vec<String>,
    pub ranked: Vec<ScoredOption<'a>>,
    pub confidence: u8,
    pub tradeoff: Option<Tradeoff<'a>>,
    pub summary: String,
    pub weights: PriorityWeights,
    pub requirements: Vec<String>,
    pub constraints: Vec<String>,
}

impl<'a> ComparisonResult<'a> {
    pub fn winner(&self) -> &ScoredOption<'a> {
        // Selection size is validated before ranking, so this is never empty
        &self.ranked[0]
    }
}

/// Check selection size, duplicates and ids before any scoring happens.
fn resolve_selection<'a>(
    catalog: &'a Catalog,
    request: &ComparisonRequest,
) -> Result<Vec<&'a CatalogOption>, CompareError> {
    let count = request.selected.len();
    if count < MIN_SELECTED {
        return Err(CompareError::TooFewOptions(count));
    }
    if count > MAX_SELECTED {
        return Err(CompareError::TooManyOptions(count));
    }

    let mut seen = HashSet::new();
    request
        .selected
        .iter()
        .map(|id| {
            if !seen.insert(id.as_str()) {
                return Err(CompareError::DuplicateOption(id.clone()));
            }
            Ok(catalog.option(request.category, id)?)
        })
        .collect()
}

/// Run a full comparison.
///
/// Weights are used as given; callers validate them (`validate_weights`).
pub fn compare<'a>(
    catalog: &'a Catalog,
    request: ComparisonRequest,
) -> Result<ComparisonResult<'a>, CompareError> {
    let options = resolve_selection(catalog, &request)?;

    let ranking = rank(options, &request.weights)
        .ok_or(CompareError::TooFewOptions(0))?;
    let (ranked, confidence) = ranking.into_parts();

    let tradeoff = tradeoff(&ranked, &request.weights);
    let summary = summarize(request.selected.as_slice(), &ranked[0], &request.weights.high_priorities());

    Ok(ComparisonResult {
        category: request.category,
        selected: request.selected,
        ranked,
        confidence,
        tradeoff,
        summary,
        weights: request.weights,
        requirements: request.requirements,
        constraints: request.constraints,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_database_comparison() {
        let catalog = Catalog::builtin().unwrap();
        let mut request = ComparisonRequest::new(
            Category::Database,
            ids(&["PostgreSQL", "MongoDB"]),
            PriorityWeights::uniform(3),
        );
        request.requirements = ids(&["High availability", ""]);
        request.constraints = ids(&["Budget under $1000/month"]);

        let result = compare(&catalog, request).unwrap();

        assert_eq!(result.winner().id(), "MongoDB");
        assert_eq!(result.winner().score, 4.0);
        assert_eq!(result.confidence, 4);
        assert_eq!(result.selected, ids(&["PostgreSQL", "MongoDB"]));
        assert_eq!(result.ranked[1].id(), "PostgreSQL");
        assert!((result.ranked[1].score - 66.0 / 90.0 * 5.0).abs() < 1e-12);

        let tradeoff = result.tradeoff.as_ref().unwrap();
        assert_eq!(tradeoff.first, "MongoDB");
        assert!(result.summary.contains("MongoDB emerges as the recommended choice"));

        // Pass-through lists are untouched, blank lines included
        assert_eq!(result.requirements, ids(&["High availability", ""]));
        assert_eq!(result.constraints, ids(&["Budget under $1000/month"]));
    }

    #[test]
    fn test_too_few_options() {
        let catalog = Catalog::builtin().unwrap();
        let request = ComparisonRequest::new(
            Category::Api,
            ids(&["gRPC"]),
            PriorityWeights::default(),
        );
        assert_eq!(
            compare(&catalog, request).unwrap_err(),
            CompareError::TooFewOptions(1)
        );
    }

    #[test]
    fn test_too_many_options() {
        let catalog = Catalog::builtin().unwrap();
        let request = ComparisonRequest::new(
            Category::Api,
            ids(&["gRPC", "GraphQL", "REST API", "SOAP", "tRPC"]),
            PriorityWeights::default(),
        );
        assert_eq!(
            compare(&catalog, request).unwrap_err(),
            CompareError::TooManyOptions(5)
        );
    }

    #[test]
    fn test_duplicate_option() {
        let catalog = Catalog::builtin().unwrap();
        let request = ComparisonRequest::new(
            Category::Api,
            ids(&["gRPC", "gRPC"]),
            PriorityWeights::default(),
        );
        assert_eq!(
            compare(&catalog, request).unwrap_err(),
            CompareError::DuplicateOption("gRPC".to_string())
        );
    }

    #[test]
    fn test_unknown_option() {
        let catalog = Catalog::builtin().unwrap();
        let request = ComparisonRequest::new(
            Category::CloudService,
            ids(&["AWS", "Heroku"]),
            PriorityWeights::default(),
        );
        let err = compare(&catalog, request).unwrap_err();
        assert_eq!(err.to_string(), "option 'Heroku' not found in category 'cloud-service'");
    }

    #[test]
    fn test_cloud_comparison_with_high_priorities() {
        let catalog = Catalog::builtin().unwrap();
        let weights = PriorityWeights {
            cost: 2,
            performance: 5,
            ease_of_use: 1,
            scalability: 5,
            reliability: 4,
        };
        let request = ComparisonRequest::new(
            Category::CloudService,
            ids(&["Google Cloud", "Azure", "AWS"]),
            weights,
        );
        let result = compare(&catalog, request).unwrap();

        assert_eq!(result.winner().id(), "AWS");
        assert_eq!(result.ranked.len(), 3);
        let text = result.tradeoff.as_ref().unwrap().to_string();
        assert!(text.contains("prioritize performance, scalability."));
        assert!(result
            .summary
            .contains("high priority on performance, scalability, reliability."));
    }

    #[test]
    fn test_result_is_recomputed_fresh() {
        let catalog = Catalog::builtin().unwrap();
        let request = ComparisonRequest::new(
            Category::Api,
            ids(&["REST API", "GraphQL"]),
            PriorityWeights::default(),
        );
        let first = compare(&catalog, request.clone()).unwrap();
        let second = compare(&catalog, request).unwrap();
        assert_eq!(first, second);
    }
}
