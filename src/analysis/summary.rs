use super::tradeoff::BALANCED_FACTORS;
use crate::scoring::{Priority, ScoredOption};

/// Closing recommendation paragraph.
///
/// Names every selected option in selection order, the winner with its score,
/// and every high priority by label (not truncated, unlike the trade-off).
pub fn summarize<S: AsRef<str>>(
    selected: &[S],
    winner: &ScoredOption<'_>,
    high_priorities: &[Priority],
) -> String {
    let analyzed = selected
        .iter()
        .map(AsRef::<str>::as_ref)
        .collect::<Vec<_>>()
        .join(", ");

    let focus = if high_priorities.is_empty() {
        BALANCED_FACTORS.to_string()
    } else {
        high_priorities
            .iter()
            .map(|p| p.label())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "After analyzing {} based on your priorities, {} emerges as the recommended choice \
         with a score of {:.1}/5.\n\n\
         This recommendation particularly considers your high priority on {}.\n\n\
         However, the final decision should consider your specific context, team expertise, \
         and long-term goals. Each option has its merits - the best choice depends on weighing \
         these trade-offs against your unique situation.",
        analyzed,
        winner.id(),
        winner.score,
        focus
    )
}
