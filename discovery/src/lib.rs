//! Manual page option discovery and launching for scrcpy.
//!
//! This crate reads the locally installed `scrcpy(1)` manual page, extracts
//! its command-line options as [`OptionDescriptor`]s, and runs the
//! executable with an argument list assembled from a filled form.
//!
//! # Main entry points
//!
//! - [`parser::extract_options`] — scan roff text for `.B` / `.BI` option
//!   directives.
//! - [`parser::extract_options_with_report`] — same, with counts and the
//!   list of skipped directive lines.
//! - [`discover_options`] — locate and read the manual page for a program,
//!   then extract from it.
//! - [`launcher::launch`] — run an assembled [`Invocation`].
//!
//! # Example
//!
//! ```
//! use scrcpy_form_discovery::parser::extract_options;
//! use scrcpy_form_core::FormState;
//!
//! let page = "\
//! .TP
//! .B \\-\\-no\\-audio
//! .TP
//! .BI \"\\-\\-video\\-codec \" name
//! ";
//!
//! let options = extract_options(page);
//! let mut form = FormState::from_descriptors(&options);
//! form.set_flag("--no-audio", true).unwrap();
//! form.set_text("--video-codec", "h265").unwrap();
//!
//! let invocation = form.invocation("scrcpy");
//! assert_eq!(invocation.to_string(), "scrcpy --no-audio --video-codec h265");
//! ```
//!
//! [`OptionDescriptor`]: scrcpy_form_core::OptionDescriptor
//! [`Invocation`]: scrcpy_form_core::Invocation

pub mod config;
pub mod error;
pub mod launcher;
pub mod output;
pub mod parser;
pub mod report;
pub mod source;

use std::path::{Path, PathBuf};

use scrcpy_form_core::OptionDescriptor;
use tracing::debug;

use report::ExtractionReport;

/// Options discovered for a program, with where they came from.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Manual page that was read, if one was found.
    pub manpage: Option<PathBuf>,
    pub options: Vec<OptionDescriptor>,
    pub report: ExtractionReport,
}

/// Locates the manual page for `program` and extracts its options.
///
/// An explicit path overrides the search. When no page can be found or
/// read the result is empty; deciding whether that is fatal is left to the
/// caller.
pub fn discover_options(program: &str, explicit: Option<&Path>) -> Discovery {
    let Some(manpage) = source::locate_manpage(program, explicit) else {
        debug!(program, "No manual page located");
        return Discovery::default();
    };

    let Some(text) = source::load_manpage(&manpage) else {
        return Discovery {
            manpage: Some(manpage),
            ..Discovery::default()
        };
    };

    let (options, report) = parser::extract_options_with_report(&text);
    debug!(
        path = %manpage.display(),
        options = options.len(),
        skipped = report.skipped.len(),
        "Extracted options from manual page"
    );

    Discovery {
        manpage: Some(manpage),
        options,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_options_from_explicit_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scrcpy.1");
        std::fs::write(&path, ".B \\-\\-no\\-audio\n.BI nothing\n").unwrap();

        let discovery = discover_options("scrcpy", Some(&path));
        assert_eq!(discovery.manpage.as_deref(), Some(path.as_path()));
        assert_eq!(discovery.options, vec![OptionDescriptor::flag("--no-audio")]);
        assert_eq!(discovery.report.skipped.len(), 1);
    }

    #[test]
    fn test_discover_options_with_missing_page_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let discovery = discover_options("scrcpy", Some(&dir.path().join("nope.1")));
        assert!(discovery.manpage.is_none());
        assert!(discovery.options.is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scrcpy.1");
        std::fs::write(&path, ".B \\-f, \\-\\-fullscreen\n.BI \"\\-\\-crop \" w:h\n").unwrap();

        let first = discover_options("scrcpy", Some(&path));
        let second = discover_options("scrcpy", Some(&path));
        assert_eq!(first.options, second.options);
        assert_eq!(first.report, second.report);
    }
}
