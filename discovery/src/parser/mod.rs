//! Option extraction from raw manual page source.
//!
//! The extractor scans a roff document line by line and turns `.B` and
//! `.BI` directives into [`OptionDescriptor`]s. Manual pages list the short
//! and long spellings of an option together, comma-separated; the long
//! (`--`) spelling is preferred whenever one is present.
//!
//! | Directive | Example | Descriptor |
//! |---|---|---|
//! | `.B` | `.B "\-f, \-\-fullscreen"` | `--fullscreen`, no value |
//! | `.BI` | `.BI "\-\-crop " width:height` | `--crop`, value |
//!
//! Lines that are not directives are ignored. Directives that carry no
//! usable option are skipped and recorded in the [`ExtractionReport`];
//! extraction itself never fails.
//!
//! # Example
//!
//! ```
//! use scrcpy_form_discovery::parser::extract_options;
//! use scrcpy_form_core::OptionDescriptor;
//!
//! let page = r#".SH OPTIONS
//! .TP
//! .B \-f, \-\-fullscreen
//! Start in fullscreen.
//! .TP
//! .BI "\-m, \-\-max\-size " value
//! Limit both the width and height.
//! "#;
//!
//! assert_eq!(
//!     extract_options(page),
//!     vec![
//!         OptionDescriptor::flag("--fullscreen"),
//!         OptionDescriptor::value("--max-size"),
//!     ]
//! );
//! ```

pub mod roff;

use scrcpy_form_core::{DirectiveKind, OptionDescriptor};
use tracing::debug;

use crate::report::{ExtractionReport, SkipReason, SkippedDirective};
use roff::escapes::{first_word, normalize_hyphens, strip_outer_quotes};
use roff::{Directive, leading_quoted_segment, parse_directive};

/// Extracts option descriptors from manual page text, in line order.
pub fn extract_options(text: &str) -> Vec<OptionDescriptor> {
    extract_options_with_report(text).0
}

/// Extracts option descriptors and reports which directive lines were skipped.
pub fn extract_options_with_report(text: &str) -> (Vec<OptionDescriptor>, ExtractionReport) {
    let mut options = Vec::new();
    let mut report = ExtractionReport::default();

    for (idx, line) in text.lines().enumerate() {
        report.lines_scanned += 1;
        let Some(directive) = parse_directive(line) else {
            continue;
        };
        report.directive_lines += 1;

        match option_from_directive(&directive) {
            Ok(option) => options.push(option),
            Err(reason) => {
                debug!(
                    line = idx + 1,
                    kind = %directive.kind,
                    reason = %reason,
                    "Skipping directive without option"
                );
                report.skipped.push(SkippedDirective {
                    line: idx + 1,
                    kind: directive.kind,
                    reason,
                });
            }
        }
    }

    report.options_found = options.len();
    (options, report)
}

fn option_from_directive(directive: &Directive) -> Result<OptionDescriptor, SkipReason> {
    match directive.kind {
        DirectiveKind::Flag => flag_option(&directive.content),
        DirectiveKind::Value => value_option(&directive.content),
    }
}

/// `.B` content: the long spelling reduced to its first word, else the first
/// candidate's first word.
fn flag_option(content: &str) -> Result<OptionDescriptor, SkipReason> {
    let candidates = split_candidates(strip_outer_quotes(content));
    let selected = candidates
        .iter()
        .find(|candidate| candidate.starts_with("--"))
        .or_else(|| candidates.first())
        .and_then(|candidate| first_word(candidate))
        .ok_or(SkipReason::EmptyCandidate)?;
    Ok(OptionDescriptor::flag(selected))
}

/// `.BI` content: only the opening quoted segment names the option; the long
/// spelling is kept whole.
fn value_option(content: &str) -> Result<OptionDescriptor, SkipReason> {
    let segment = leading_quoted_segment(content).ok_or(SkipReason::MissingQuotedSegment)?;
    let segment = normalize_hyphens(segment);
    let candidates = split_candidates(&segment);
    let selected = candidates
        .iter()
        .find(|candidate| candidate.starts_with("--"))
        .or_else(|| candidates.first())
        .filter(|candidate| !candidate.is_empty())
        .ok_or(SkipReason::EmptyCandidate)?;
    Ok(OptionDescriptor::value(*selected))
}

fn split_candidates(text: &str) -> Vec<&str> {
    text.split(',').map(str::trim).collect()
}
