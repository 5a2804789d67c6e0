//! Severity counts and the one-line run summary.

use std::fmt;

use crate::validation::{Diagnostic, Severity};

/// ANSI color of the summary line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryColor {
    Error,
    Warning,
    Neutral,
}

impl SummaryColor {
    pub fn ansi(self) -> &'static str {
        match self {
            SummaryColor::Error => "\u{1b}[1;31m",
            SummaryColor::Warning => "\u{1b}[1;33m",
            SummaryColor::Neutral => "\u{1b}[1;1m",
        }
    }
}

/// Number of diagnostics in each severity bucket
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeverityCounts {
    pub errors: usize,
    pub warnings: usize,
    pub information: usize,
    pub hints: usize,
}

impl SeverityCounts {
    pub fn from_diagnostics(diagnostics: &[Diagnostic]) -> Self {
        let mut counts = Self::default();
        for diagnostic in diagnostics {
            counts.record(diagnostic.severity());
        }
        counts
    }

    pub fn record(&mut self, severity: Severity) {
        *self.bucket_mut(severity) += 1;
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Error => self.errors,
            Severity::Warning => self.warnings,
            Severity::Information => self.information,
            Severity::Hint => self.hints,
        }
    }

    fn bucket_mut(&mut self, severity: Severity) -> &mut usize {
        match severity {
            Severity::Error => &mut self.errors,
            Severity::Warning => &mut self.warnings,
            Severity::Information => &mut self.information,
            Severity::Hint => &mut self.hints,
        }
    }

    /// Errors and warnings; information and hints are not problems
    pub fn problems(&self) -> usize {
        self.errors + self.warnings
    }

    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.information + self.hints
    }

    pub fn color(&self) -> SummaryColor {
        if self.errors > 0 {
            SummaryColor::Error
        } else if self.warnings > 0 {
            SummaryColor::Warning
        } else {
            SummaryColor::Neutral
        }
    }

    /// Summary prefixed with its highlight color
    pub fn summary_line(&self) -> String {
        format!("{}{}", self.color().ansi(), self)
    }
}

impl fmt::Display for SeverityCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} problems ({} error, {} warnings, {} information, {} hints)",
            self.problems(),
            self.errors,
            self.warnings,
            self.information,
            self.hints
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_lsp::lsp_types::Range;

    fn with_severities(severities: &[Option<i32>]) -> Vec<Diagnostic> {
        severities
            .iter()
            .map(|&s| Diagnostic::new(Range::default(), s, None, "finding"))
            .collect()
    }

    #[test]
    fn empty_run_is_neutral() {
        let counts = SeverityCounts::from_diagnostics(&[]);
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.color(), SummaryColor::Neutral);
        assert_eq!(
            counts.summary_line(),
            "\u{1b}[1;1m0 problems (0 error, 0 warnings, 0 information, 0 hints)"
        );
    }

    #[test]
    fn buckets_every_diagnostic_exactly_once() {
        let diagnostics = with_severities(&[Some(1), Some(2), Some(2), Some(3), Some(4), Some(7), None]);
        let counts = SeverityCounts::from_diagnostics(&diagnostics);

        assert_eq!(
            counts,
            SeverityCounts {
                errors: 1,
                warnings: 2,
                information: 1,
                hints: 3,
            }
        );
        assert_eq!(counts.total(), diagnostics.len());
        assert_eq!(
            counts.to_string(),
            "3 problems (1 error, 2 warnings, 1 information, 3 hints)"
        );
    }

    #[test]
    fn errors_take_color_priority_over_warnings() {
        let counts = SeverityCounts::from_diagnostics(&with_severities(&[Some(2), Some(1)]));
        assert_eq!(counts.color(), SummaryColor::Error);
        assert!(counts.summary_line().starts_with("\u{1b}[1;31m"));
    }

    #[test]
    fn warnings_color_without_errors() {
        let counts = SeverityCounts::from_diagnostics(&with_severities(&[Some(3), Some(2)]));
        assert_eq!(counts.color(), SummaryColor::Warning);
    }

    #[test]
    fn information_and_hints_stay_neutral() {
        let counts = SeverityCounts::from_diagnostics(&with_severities(&[Some(3), Some(4)]));
        assert_eq!(counts.color(), SummaryColor::Neutral);
        assert_eq!(counts.problems(), 0);
    }
}
