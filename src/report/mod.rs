//! Report Formatting
//!
//! Turns diagnostics into the table and summary printed to the job log.

pub mod summary;
pub mod table;

pub use summary::{SeverityCounts, SummaryColor};
pub use table::{build_table, map_diagnostics, map_line, render_table, DiagnosticRow};
