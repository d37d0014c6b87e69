//! Output formatting for extracted options and reports.

use scrcpy_form_core::OptionDescriptor;

use crate::report::ExtractionReport;

/// Supported output formats.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

/// Formats an option list in the requested output format.
pub fn format_options(
    options: &[OptionDescriptor],
    format: OutputFormat,
) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(options)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(options).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(options_to_markdown(options)),
        OutputFormat::Table => Ok(options_to_table(options)),
    }
}

/// Formats an extraction report in the requested output format.
pub fn format_report(report: &ExtractionReport, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(report).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(report_to_markdown(report)),
        OutputFormat::Table => Ok(report_to_table(report)),
    }
}

fn kind_label(option: &OptionDescriptor) -> &'static str {
    if option.has_value { "value" } else { "flag" }
}

fn options_to_markdown(options: &[OptionDescriptor]) -> String {
    let mut out = String::new();

    out.push_str("## Options\n\n");
    out.push_str("| Option | Kind |\n");
    out.push_str("|--------|------|\n");
    for option in options {
        out.push_str(&format!("| `{}` | {} |\n", option.name, kind_label(option)));
    }
    out.push('\n');

    out
}

fn options_to_table(options: &[OptionDescriptor]) -> String {
    let mut out = String::new();

    let width = options
        .iter()
        .map(|option| option.name.len())
        .max()
        .unwrap_or(6)
        .max(6);

    out.push_str(&format!("{:<width$}  KIND\n", "OPTION"));
    for option in options {
        out.push_str(&format!(
            "{:<width$}  {}\n",
            option.name,
            kind_label(option)
        ));
    }

    out
}

fn report_to_markdown(report: &ExtractionReport) -> String {
    let mut out = String::new();

    out.push_str("## Extraction Report\n\n");
    out.push_str(&format!("- **Lines scanned:** {}\n", report.lines_scanned));
    out.push_str(&format!("- **Directive lines:** {}\n", report.directive_lines));
    out.push_str(&format!("- **Options found:** {}\n", report.options_found));

    if !report.skipped.is_empty() {
        out.push_str("\n### Skipped Directives\n\n");
        out.push_str("| Line | Directive | Reason |\n");
        out.push_str("|------|-----------|--------|\n");
        for skip in &report.skipped {
            out.push_str(&format!(
                "| {} | `{}` | {} |\n",
                skip.line, skip.kind, skip.reason
            ));
        }
    }
    out.push('\n');

    out
}

fn report_to_table(report: &ExtractionReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Lines: {}  Directives: {}  Options: {}\n",
        report.lines_scanned, report.directive_lines, report.options_found
    ));
    for skip in &report.skipped {
        out.push_str(&format!(
            "  skipped line {:>5}  {:<4} {}\n",
            skip.line,
            skip.kind.to_string(),
            skip.reason
        ));
    }

    out
}
