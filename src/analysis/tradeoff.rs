use std::fmt;

use crate::scoring::{Priority, PriorityWeights, ScoredOption};

/// How many pros, use cases and priorities a trade-off quotes.
const TOP_N: usize = 2;

/// Shown in place of a priority list when nothing is weighted high.
pub const BALANCED_FACTORS: &str = "balanced factors";

/// Contrast between the top two ranked options.
///
/// Built from data the ranking already holds; nothing is rescored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tradeoff<'a> {
    pub first: &'a str,
    pub second: &'a str,
    pub first_pros: &'a [String],
    pub second_pros: &'a [String],
    pub priorities: Vec<Priority>,
    pub second_use_cases: &'a [String],
}

/// Compare the first two entries of a ranking.
///
/// Returns None when fewer than two options were ranked.
pub fn tradeoff<'a>(ranked: &[ScoredOption<'a>], weights: &PriorityWeights) -> Option<Tradeoff<'a>> {
    let [first, second, ..] = ranked else {
        return None;
    };

    let (first, second) = (first.option, second.option);

    let mut priorities = weights.high_priorities();
    priorities.truncate(TOP_N);

    Some(Tradeoff {
        first: &first.id,
        second: &second.id,
        first_pros: first.top_pros(TOP_N),
        second_pros: second.top_pros(TOP_N),
        priorities,
        second_use_cases: second.top_use_cases(TOP_N),
    })
}

impl Tradeoff<'_> {
    /// Priority keys joined for prose, or `BALANCED_FACTORS`
    pub fn priorities_text(&self) -> String {
        if self.priorities.is_empty() {
            BALANCED_FACTORS.to_string()
        } else {
            self.priorities
                .iter()
                .map(|p| p.key())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

impl fmt::Display for Tradeoff<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} vs {}:", self.first, self.second)?;
        writeln!(f)?;
        writeln!(f, "{} scores higher overall but consider:", self.first)?;
        writeln!(f, "- {}: {}", self.first, self.first_pros.join(", "))?;
        writeln!(f, "- {}: {}", self.second, self.second_pros.join(", "))?;
        writeln!(f)?;
        writeln!(f, "Choose {} if you prioritize {}.", self.first, self.priorities_text())?;
        if self.second_use_cases.is_empty() {
            write!(f, "Choose {} if its strengths matter more to you.", self.second)
        } else {
            write!(
                f,
                "Choose {} if you need {}.",
                self.second,
                self.second_use_cases.join(", ")
            )
        }
    }
}
