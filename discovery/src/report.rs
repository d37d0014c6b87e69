//! Extraction diagnostics.
//!
//! The extractor never fails; lines it cannot use are recorded here instead
//! so callers can explain an empty or short option list.

use std::fmt;

use scrcpy_form_core::DirectiveKind;
use serde::{Deserialize, Serialize};

/// Why a directive line produced no option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// A `.BI` line whose content does not open with a quoted segment.
    MissingQuotedSegment,
    /// The selected candidate was empty after trimming.
    EmptyCandidate,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MissingQuotedSegment => "no leading quoted segment",
            Self::EmptyCandidate => "no option token",
        };
        f.write_str(label)
    }
}

/// A directive line that was recognized but skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDirective {
    /// 1-based source line number.
    pub line: usize,
    pub kind: DirectiveKind,
    pub reason: SkipReason,
}

/// Counters and skip records for one extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub lines_scanned: usize,
    pub directive_lines: usize,
    pub options_found: usize,
    pub skipped: Vec<SkippedDirective>,
}

impl ExtractionReport {
    /// Human-readable summary lines, empty when nothing noteworthy happened.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.directive_lines == 0 {
            warnings.push(format!(
                "No .B or .BI directives found in {} lines",
                self.lines_scanned
            ));
        }

        if !self.skipped.is_empty() {
            warnings.push(format!(
                "Skipped {} directive line(s): {}",
                self.skipped.len(),
                self.skipped
                    .iter()
                    .map(|skip| format!("line {} ({}, {})", skip.line, skip.kind, skip.reason))
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_for_empty_document() {
        let report = ExtractionReport {
            lines_scanned: 3,
            ..ExtractionReport::default()
        };
        assert_eq!(
            report.warnings(),
            vec!["No .B or .BI directives found in 3 lines".to_string()]
        );
    }

    #[test]
    fn test_warnings_list_skipped_lines() {
        let report = ExtractionReport {
            lines_scanned: 10,
            directive_lines: 2,
            options_found: 1,
            skipped: vec![SkippedDirective {
                line: 7,
                kind: DirectiveKind::Value,
                reason: SkipReason::MissingQuotedSegment,
            }],
        };
        assert_eq!(
            report.warnings(),
            vec!["Skipped 1 directive line(s): line 7 (.BI, no leading quoted segment)".to_string()]
        );
    }
}
