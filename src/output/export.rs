use anyhow::{bail, Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

use crate::catalog::Category;
use crate::compare::ComparisonResult;
use crate::scoring::{PriorityWeights, ScoredOption};

/// Column headers of the tabular export, in order
pub const CSV_HEADERS: [&str; 7] = [
    "Option",
    "Overall Score",
    "Speed",
    "Scalability",
    "Reliability",
    "Setup Complexity",
    "Learning Curve",
];

/// Rendered in place of a rating the option doesn't define
pub const NOT_AVAILABLE: &str = "N/A";

/// One row of the comparison table, already rendered to display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub option: String,
    pub overall_score: String,
    pub speed: String,
    pub scalability: String,
    pub reliability: String,
    pub setup_complexity: String,
    pub learning_curve: String,
}

impl ComparisonRow {
    pub fn from_scored(scored: &ScoredOption<'_>) -> Self {
        let perf = scored.option.performance;
        let comp = scored.option.complexity;
        Self {
            option: scored.id().to_string(),
            overall_score: format_overall_score(scored.score),
            speed: format_rating(perf.map(|p| p.speed)),
            scalability: format_rating(perf.map(|p| p.scalability)),
            reliability: format_rating(perf.map(|p| p.reliability)),
            setup_complexity: format_rating(comp.map(|c| c.setup)),
            learning_curve: format_rating(comp.map(|c| c.learning)),
        }
    }

    /// Cells in `CSV_HEADERS` order
    pub fn cells(&self) -> [&str; 7] {
        [
            &self.option,
            &self.overall_score,
            &self.speed,
            &self.scalability,
            &self.reliability,
            &self.setup_complexity,
            &self.learning_curve,
        ]
    }

    fn from_cells(cells: Vec<String>) -> Option<Self> {
        let [option, overall_score, speed, scalability, reliability, setup_complexity, learning_curve]: [String; 7] =
            cells.try_into().ok()?;
        Some(Self {
            option,
            overall_score,
            speed,
            scalability,
            reliability,
            setup_complexity,
            learning_curve,
        })
    }
}

/// Score with one decimal: "3.7/5"
pub fn format_overall_score(score: f64) -> String {
    format!("{:.1}/5", score)
}

/// Rating as "4/5", or "N/A" when absent
pub fn format_rating(rating: Option<u8>) -> String {
    match rating {
        Some(value) => format!("{}/5", value),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Table rows for every ranked option, best first
pub fn comparison_rows(result: &ComparisonResult<'_>) -> Vec<ComparisonRow> {
    result.ranked.iter().map(ComparisonRow::from_scored).collect()
}

/// Quote a field if it contains a delimiter, quote or line break (RFC 4180)
fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn csv_line<'a>(cells: impl IntoIterator<Item = &'a str>) -> String {
    cells
        .into_iter()
        .map(escape_csv_field)
        .collect::<Vec<_>>()
        .join(",")
}

/// Format the comparison table as CSV with a header row
pub fn format_csv(result: &ComparisonResult<'_>) -> String {
    let mut out = csv_line(CSV_HEADERS);
    out.push('\n');
    for row in comparison_rows(result) {
        out.push_str(&csv_line(row.cells()));
        out.push('\n');
    }
    out
}

/// Split CSV text into records of fields, honoring quoted fields
fn split_csv_records(content: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        bail!("Unterminated quoted field");
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    Ok(records)
}

/// Parse a CSV export back into rows
///
/// # Errors
///
/// Returns an error if:
/// - The header row doesn't match `CSV_HEADERS`
/// - A row doesn't have exactly one cell per column
/// - A quoted field is never closed
pub fn parse_csv(content: &str) -> Result<Vec<ComparisonRow>> {
    let mut records = split_csv_records(content)?.into_iter();

    let header = records.next().context("CSV export is empty")?;
    if header != CSV_HEADERS {
        bail!("Unexpected CSV header: {}", header.join(","));
    }

    records
        .enumerate()
        .map(|(i, cells)| {
            let count = cells.len();
            ComparisonRow::from_cells(cells).with_context(|| {
                format!(
                    "Row {}: expected {} cells, got {}",
                    i + 1,
                    CSV_HEADERS.len(),
                    count
                )
            })
        })
        .collect()
}

/// Top-level JSON export document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub comparison: ComparisonExport,
}

/// Owned, serializable view of a comparison result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonExport {
    pub category: Category,
    pub options: Vec<String>,
    pub winner: String,
    /// Option id to score, best first
    #[serde(with = "ordered_scores")]
    pub scores: Vec<(String, f64)>,
    pub priorities: PriorityWeights,
    pub requirements: Vec<String>,
    pub constraints: Vec<String>,
}

impl From<&ComparisonResult<'_>> for ComparisonExport {
    fn from(result: &ComparisonResult<'_>) -> Self {
        Self {
            category: result.category,
            options: result.selected.clone(),
            winner: result.winner().id().to_string(),
            scores: result
                .ranked
                .iter()
                .map(|s| (s.id().to_string(), s.score))
                .collect(),
            priorities: result.weights,
            requirements: result.requirements.clone(),
            constraints: result.constraints.clone(),
        }
    }
}

/// Serializes scores as a JSON object while keeping ranked order.
mod ordered_scores {
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(
        scores: &[(String, f64)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(scores.len()))?;
        for (name, score) in scores {
            map.serialize_entry(name, score)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, f64)>, D::Error> {
        struct ScoresVisitor;

        impl<'de> Visitor<'de> for ScoresVisitor {
            type Value = Vec<(String, f64)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of option names to scores")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut scores = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, f64>()? {
                    scores.push(entry);
                }
                Ok(scores)
            }
        }

        deserializer.deserialize_map(ScoresVisitor)
    }
}

/// Format the comparison as pretty-printed JSON
pub fn format_json(result: &ComparisonResult<'_>) -> Result<String> {
    let document = ExportDocument {
        comparison: ComparisonExport::from(result),
    };
    serde_json::to_string_pretty(&document).context("Failed to serialize comparison")
}

/// Parse a JSON export back into its owned form
pub fn parse_json(content: &str) -> Result<ComparisonExport> {
    let document: ExportDocument =
        serde_json::from_str(content).context("Failed to parse comparison JSON")?;
    Ok(document.comparison)
}

/// Write an export to disk atomically
///
/// The file is either fully written or left untouched.
pub fn save_export(path: &Path, content: &str) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write export to {}", path.display()))?;

    file.commit()
        .with_context(|| format!("Failed to save export to {}", path.display()))?;

    Ok(())
}
