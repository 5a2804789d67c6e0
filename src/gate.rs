//! The `failsOn` gate.

use std::str::FromStr;

use crate::error::LintError;
use crate::report::SeverityCounts;
use crate::validation::Severity;

/// Severity bucket whose non-emptiness fails the job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailsOn {
    Error,
    Warning,
    Information,
    Hint,
}

impl FailsOn {
    pub fn severity(self) -> Severity {
        match self {
            FailsOn::Error => Severity::Error,
            FailsOn::Warning => Severity::Warning,
            FailsOn::Information => Severity::Information,
            FailsOn::Hint => Severity::Hint,
        }
    }

    /// True when the selected bucket holds at least one diagnostic
    pub fn is_triggered(self, counts: &SeverityCounts) -> bool {
        counts.get(self.severity()) > 0
    }
}

/// Action inputs arrive as strings; the selector is coerced to an integer
/// before it is compared against the four ordinals.
impl FromStr for FailsOn {
    type Err = LintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().parse::<u8>() {
            Ok(1) => Ok(FailsOn::Error),
            Ok(2) => Ok(FailsOn::Warning),
            Ok(3) => Ok(FailsOn::Information),
            Ok(4) => Ok(FailsOn::Hint),
            _ => Err(LintError::InvalidFailsOn {
                value: value.to_string(),
            }),
        }
    }
}
