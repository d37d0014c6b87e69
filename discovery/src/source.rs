//! Locating and reading manual pages.
//!
//! Installed manual pages are usually gzip-compressed (`scrcpy.1.gz`); a
//! source checkout ships the plain roff file (`app/scrcpy.1`). Both are
//! accepted. A page that is missing or unreadable yields no text, which the
//! extractor treats as "no options available".

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use flate2::read::GzDecoder;
use scrcpy_form_core::OptionDescriptor;
use tracing::debug;

use crate::error::SourceError;
use crate::parser::extract_options;

/// Directories searched for `man1/<program>.1[.gz]` when `man -w` is
/// unavailable or silent.
const MAN_ROOTS: &[&str] = &[
    "/usr/local/share/man",
    "/usr/share/man",
    "/opt/homebrew/share/man",
];

/// Reads a manual page, decompressing it when the path ends in `.gz`.
pub fn read_manpage(path: &Path) -> Result<String, SourceError> {
    let raw = fs::read(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let bytes = if is_gzip_path(path) {
        let mut decoded = Vec::new();
        GzDecoder::new(raw.as_slice())
            .read_to_end(&mut decoded)
            .map_err(|source| SourceError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        decoded
    } else {
        raw
    };

    String::from_utf8(bytes).map_err(|_| SourceError::NotUtf8(path.to_path_buf()))
}

/// Reads a manual page, absorbing any failure into `None`.
pub fn load_manpage(path: &Path) -> Option<String> {
    match read_manpage(path) {
        Ok(text) => Some(text),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "Manual page unavailable");
            None
        }
    }
}

/// Extracts options from the manual page at `path`.
///
/// A missing or unreadable page yields an empty list.
pub fn extract_options_from_path(path: &Path) -> Vec<OptionDescriptor> {
    load_manpage(path)
        .map(|text| extract_options(&text))
        .unwrap_or_default()
}

/// Finds the manual page for `program`.
///
/// Checks, in order: the explicit path (returned only if it exists), the
/// output of `man -w <program>`, then the conventional `man1` directories.
pub fn locate_manpage(program: &str, explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Some(path.to_path_buf());
        }
        debug!(path = %path.display(), "Configured manual page does not exist");
        return None;
    }

    if !is_plausible_page_name(program) {
        debug!(program, "Program name is not a plausible manual page name");
        return None;
    }

    if let Some(path) = query_man_path(program) {
        return Some(path);
    }

    conventional_candidates(program)
        .into_iter()
        .find(|candidate| candidate.is_file())
}

/// Asks `man -w` where the page lives.
fn query_man_path(program: &str) -> Option<PathBuf> {
    let output = match Command::new("man")
        .args(["-w", program])
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
    {
        Ok(output) if output.status.success() => output,
        Ok(output) => {
            debug!(program, status = ?output.status.code(), "man -w found no page");
            return None;
        }
        Err(err) => {
            debug!(program, error = %err, "Failed to run man -w");
            return None;
        }
    };

    let raw = String::from_utf8_lossy(&output.stdout);
    let first = raw.lines().next().unwrap_or_default().trim();
    if first.is_empty() {
        return None;
    }
    let path = PathBuf::from(first);
    path.is_file().then_some(path)
}

fn conventional_candidates(program: &str) -> Vec<PathBuf> {
    let mut out = Vec::with_capacity(MAN_ROOTS.len() * 2);
    for root in MAN_ROOTS {
        let dir = Path::new(root).join("man1");
        out.push(dir.join(format!("{program}.1.gz")));
        out.push(dir.join(format!("{program}.1")));
    }
    out
}

fn is_gzip_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

fn is_plausible_page_name(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '+' | '.' | '_' | '-'))
}
