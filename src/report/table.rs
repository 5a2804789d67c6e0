//! Diagnostic table rendering.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Row, Table};
use tower_lsp::lsp_types::Range;

use crate::validation::{Diagnostic, Severity};

/// Table width, fixed so CI logs render the same everywhere
pub const TABLE_WIDTH: u16 = 120;

const HEADER: [&str; 5] = ["(index)", "line", "severity", "code", "message"];

/// A diagnostic flattened for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRow {
    pub line: String,
    pub severity: Severity,
    pub code: String,
    pub message: String,
}

impl From<&Diagnostic> for DiagnosticRow {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            line: map_line(&diagnostic.range),
            severity: diagnostic.severity(),
            code: diagnostic.code_text(),
            message: diagnostic.message.clone(),
        }
    }
}

/// `<line>:<character>` of the range start, as reported
pub fn map_line(range: &Range) -> String {
    format!("{}:{}", range.start.line, range.start.character)
}

pub fn map_diagnostics(diagnostics: &[Diagnostic]) -> Vec<DiagnosticRow> {
    diagnostics.iter().map(DiagnosticRow::from).collect()
}

/// Build the table: a header plus one row per diagnostic
pub fn build_table(rows: &[DiagnosticRow]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(TABLE_WIDTH)
        .set_header(HEADER.to_vec());

    for (index, row) in rows.iter().enumerate() {
        table.add_row(Row::from(vec![
            Cell::new(index),
            Cell::new(&row.line),
            Cell::new(row.severity.label()),
            Cell::new(&row.code),
            Cell::new(&row.message),
        ]));
    }

    table
}

/// Render the table to a string for later composition into the report
pub fn render_table(rows: &[DiagnosticRow]) -> String {
    build_table(rows).to_string()
}
