pub mod export;
pub mod formatter;

pub use export::{
    comparison_rows, format_csv, format_json, parse_csv, parse_json, save_export,
    ComparisonExport, ComparisonRow, ExportDocument, CSV_HEADERS,
};
pub use formatter::{
    format_breakdown, format_catalog, format_comparison_table, format_option_detail,
    format_recommendation, format_report, format_stars, should_use_colors,
};
