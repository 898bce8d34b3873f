use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use super::export::{comparison_rows, format_overall_score, CSV_HEADERS, NOT_AVAILABLE};
use crate::catalog::{Catalog, CatalogOption, Category};
use crate::compare::ComparisonResult;
use crate::scoring::{ScoredOption, MAX_CONFIDENCE};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Left-align text in a column, counting chars rather than bytes
fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn heading(title: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{}", title.bold().underline())
    } else {
        format!("{}\n{}", title, "-".repeat(title.chars().count()))
    }
}

/// Filled and empty stars, e.g. "★★★★☆"
pub fn format_stars(confidence: u8) -> String {
    let filled = usize::from(confidence.min(MAX_CONFIDENCE));
    let empty = usize::from(MAX_CONFIDENCE) - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

/// Headline: recommended option and confidence
pub fn format_recommendation(result: &ComparisonResult<'_>, use_colors: bool) -> String {
    let winner = result.winner();
    let score = format_overall_score(winner.score);
    let stars = format_stars(result.confidence);

    if use_colors {
        format!(
            "Recommended: {} (Score: {})\nConfidence: {} ({}/{})",
            winner.id().green().bold(),
            score.bold(),
            stars.yellow(),
            result.confidence,
            MAX_CONFIDENCE
        )
    } else {
        format!(
            "Recommended: {} (Score: {})\nConfidence: {} ({}/{})",
            winner.id(),
            score,
            stars,
            result.confidence,
            MAX_CONFIDENCE
        )
    }
}

/// Comparison table with the same columns as the CSV export.
///
/// The option column is truncated when the table would not fit the terminal.
pub fn format_comparison_table(result: &ComparisonResult<'_>, use_colors: bool) -> String {
    render_table(result, use_colors, get_terminal_width())
}

fn render_table(result: &ComparisonResult<'_>, use_colors: bool, max_width: Option<usize>) -> String {
    let rows = comparison_rows(result);
    let separator = "  ";

    let mut widths: Vec<usize> = CSV_HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    // Shrink only the option column; rating columns are already narrow
    if let Some(term_width) = max_width {
        let rest: usize = widths[1..].iter().sum::<usize>() + separator.len() * (widths.len() - 1);
        let available = term_width.saturating_sub(rest);
        if available < widths[0] {
            widths[0] = available.max(CSV_HEADERS[0].len());
        }
    }

    let header = CSV_HEADERS
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad(h, *w))
        .collect::<Vec<_>>()
        .join(separator);

    let mut lines = vec![if use_colors {
        format!("{}", header.trim_end().bold())
    } else {
        header.trim_end().to_string()
    }];

    for (idx, row) in rows.iter().enumerate() {
        let line = row
            .cells()
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(col, (cell, width))| {
                let text = if col == 0 {
                    pad(&truncate(cell, *width), *width)
                } else {
                    pad(cell, *width)
                };
                if !use_colors {
                    text
                } else if col == 0 && idx == 0 {
                    text.green().to_string()
                } else if *cell == NOT_AVAILABLE {
                    text.dimmed().to_string()
                } else {
                    text
                }
            })
            .collect::<Vec<_>>()
            .join(separator);
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

fn bullet_list(title: &str, items: &[String], use_colors: bool) -> Vec<String> {
    let mut lines = vec![if use_colors {
        format!("  {}", title.bold())
    } else {
        format!("  {}", title)
    }];
    if items.is_empty() {
        lines.push("    (none)".to_string());
    }
    lines.extend(items.iter().map(|item| format!("    • {}", item)));
    lines
}

fn plain_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("  • {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Description, pros, cons and use cases of one option
pub fn format_option_detail(option: &CatalogOption, use_colors: bool) -> String {
    let mut lines = vec![if use_colors {
        format!("{}", option.id.bold().cyan())
    } else {
        option.id.clone()
    }];
    lines.push(format!("  {}", option.description));
    lines.extend(bullet_list("Pros:", &option.pros, use_colors));
    lines.extend(bullet_list("Cons:", &option.cons, use_colors));
    lines.extend(bullet_list("Best for:", &option.use_cases, use_colors));
    lines.join("\n")
}

/// Weighted terms behind a score (for verbose mode)
pub fn format_breakdown(scored: &ScoredOption<'_>) -> String {
    let mut lines = vec![format!(
        "{}: {} ({}/{} weighted points)",
        scored.id(),
        format_overall_score(scored.score),
        scored.breakdown.raw,
        scored.breakdown.cap
    )];
    lines.extend(
        scored
            .breakdown
            .terms
            .iter()
            .map(|term| format!("  {}: {}/{}", term.label, term.points, term.max_points)),
    );
    lines.join("\n")
}

/// Full text report for a comparison
pub fn format_report(result: &ComparisonResult<'_>, use_colors: bool) -> String {
    let mut sections = vec![
        format_recommendation(result, use_colors),
        heading("Detailed Comparison", use_colors),
        format_comparison_table(result, use_colors),
        heading("Detailed Analysis", use_colors),
    ];

    sections.extend(
        result
            .ranked
            .iter()
            .map(|scored| format_option_detail(scored.option, use_colors)),
    );

    if let Some(tradeoff) = &result.tradeoff {
        sections.push(heading("Key Trade-offs", use_colors));
        sections.push(tradeoff.to_string());
    }

    sections.push(heading("Summary", use_colors));
    sections.push(result.summary.clone());

    if !result.requirements.is_empty() {
        sections.push(heading("Requirements", use_colors));
        sections.push(plain_list(&result.requirements));
    }
    if !result.constraints.is_empty() {
        sections.push(heading("Constraints", use_colors));
        sections.push(plain_list(&result.constraints));
    }

    sections.join("\n\n")
}

/// Options in one category, or every category when `category` is None
pub fn format_catalog(catalog: &Catalog, category: Option<Category>, use_colors: bool) -> String {
    let categories: Vec<Category> = match category {
        Some(c) => vec![c],
        None => catalog.categories().collect(),
    };

    categories
        .into_iter()
        .map(|category| {
            let title = format!("{} ({})", category.label(), category.key());
            let mut lines = vec![if use_colors {
                format!("{}", title.bold())
            } else {
                title
            }];
            let options = catalog.options(category);
            if options.is_empty() {
                lines.push("  No options.".to_string());
            }
            let id_width = options.iter().map(|o| o.id.chars().count()).max().unwrap_or(0);
            lines.extend(options.iter().map(|option| {
                let id = pad(&option.id, id_width);
                if use_colors {
                    format!("  {}  {}", id.cyan(), option.description)
                } else {
                    format!("  {}  {}", id, option.description)
                }
            }));
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
