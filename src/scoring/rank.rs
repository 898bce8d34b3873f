use std::cmp::Ordering;

use super::config::PriorityWeights;
use super::engine::{calculate_score, ScoreBreakdown};
use crate::catalog::CatalogOption;

pub const MIN_CONFIDENCE: u8 = 1;
pub const MAX_CONFIDENCE: u8 = 5;

/// An option paired with its computed score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredOption<'a> {
    pub option: &'a CatalogOption,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

impl ScoredOption<'_> {
    pub fn id(&self) -> &str {
        &self.option.id
    }
}

/// Scored options, best first, with the confidence derived from the winner.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking<'a> {
    ranked: Vec<ScoredOption<'a>>,
    confidence: u8,
}

impl<'a> Ranking<'a> {
    pub fn winner(&self) -> &ScoredOption<'a> {
        // Never empty: `rank` returns None for an empty selection
        &self.ranked[0]
    }

    pub fn ranked(&self) -> &[ScoredOption<'a>] {
        &self.ranked
    }

    pub fn confidence(&self) -> u8 {
        self.confidence
    }

    pub fn into_parts(self) -> (Vec<ScoredOption<'a>>, u8) {
        (self.ranked, self.confidence)
    }
}

/// Score every option and sort best first.
///
/// The sort is stable: options with equal scores keep the order in which
/// they were passed in. Returns None when there is nothing to rank.
pub fn rank<'a, I>(options: I, weights: &PriorityWeights) -> Option<Ranking<'a>>
where
    I: IntoIterator<Item = &'a CatalogOption>,
{
    let mut ranked: Vec<ScoredOption<'a>> = options
        .into_iter()
        .map(|option| {
            let result = calculate_score(option, weights);
            ScoredOption {
                option,
                score: result.score,
                breakdown: result.breakdown,
            }
        })
        .collect();

    if ranked.is_empty() {
        return None;
    }

    // Score descending; `sort_by` is stable so ties keep selection order
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let confidence = confidence(ranked[0].score);
    Some(Ranking { ranked, confidence })
}

/// Winner score rounded half-to-even, then clamped into [1, 5].
pub fn confidence(score: f64) -> u8 {
    score
        .round_ties_even()
        .clamp(f64::from(MIN_CONFIDENCE), f64::from(MAX_CONFIDENCE)) as u8
}
