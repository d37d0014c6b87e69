mod prompt;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use scrcpy_form_core::{FormState, Invocation, OptionDescriptor};
use scrcpy_form_discovery::Discovery;
use scrcpy_form_discovery::config::FormConfig;
use scrcpy_form_discovery::error::LaunchError;
use scrcpy_form_discovery::launcher::{LaunchOutcome, launch};
use scrcpy_form_discovery::output::{OutputFormat, format_options, format_report};
use scrcpy_form_discovery::report::ExtractionReport;
use tracing_subscriber::EnvFilter;

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(fmt: CliOutputFormat) -> Self {
        match fmt {
            CliOutputFormat::Json => Self::Json,
            CliOutputFormat::Yaml => Self::Yaml,
            CliOutputFormat::Markdown => Self::Markdown,
            CliOutputFormat::Table => Self::Table,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "scrcpy-form")]
#[command(version)]
#[command(about = "Build and run a scrcpy command line from the options in its manual page")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// YAML configuration file (default: $SCRCPY_FORM_CONFIG, if set).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Manual page to read instead of locating one.
    #[arg(long, global = true)]
    manpage: Option<PathBuf>,
    /// Program to launch (default: scrcpy).
    #[arg(long, global = true)]
    executable: Option<String>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the options extracted from the manual page.
    Options(OptionsArgs),
    /// Build the command line from arguments and run it.
    Run(RunArgs),
    /// Fill the form interactively, then run.
    Form(FormArgs),
}

#[derive(Debug, Args)]
struct OptionsArgs {
    /// Output format.
    #[arg(long, default_value = "table")]
    format: CliOutputFormat,
    /// Also print the extraction report.
    #[arg(long)]
    with_report: bool,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Switch to enable (repeatable), e.g. --flag --fullscreen.
    #[arg(long = "flag", value_name = "NAME", allow_hyphen_values = true)]
    flags: Vec<String>,
    /// Value option to set (repeatable), e.g. --set --max-size=1024.
    #[arg(
        long = "set",
        value_name = "NAME=VALUE",
        allow_hyphen_values = true,
        value_parser = parse_assignment
    )]
    values: Vec<(String, String)>,
    /// Print the command line instead of running it.
    #[arg(long)]
    dry_run: bool,
    /// Kill the program after this many seconds; 0 waits indefinitely (overrides the config).
    #[arg(long)]
    timeout: Option<u64>,
}

#[derive(Debug, Args)]
struct FormArgs {
    /// Print the command line instead of running it.
    #[arg(long)]
    dry_run: bool,
}

/// Settings merged from the command line and the configuration file.
struct Session {
    config: FormConfig,
    executable: String,
    discovery: Discovery,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let result = match cli.command {
        Command::Options(args) => run_options(&cli.global, args),
        Command::Run(args) => run_run(&cli.global, args),
        Command::Form(args) => run_form(&cli.global, args),
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_options(global: &GlobalArgs, args: OptionsArgs) -> Result<i32, String> {
    let Session { discovery, .. } = open_session(global)?;

    let format = OutputFormat::from(args.format);
    match (format, args.with_report) {
        (OutputFormat::Json, true) => {
            #[derive(serde::Serialize)]
            struct OptionsOutput<'a> {
                options: &'a [OptionDescriptor],
                report: &'a ExtractionReport,
            }

            let output = OptionsOutput {
                options: &discovery.options,
                report: &discovery.report,
            };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| format!("Failed to serialize output: {e}"))?;
            println!("{json}");
        }
        (_, with_report) => {
            print_block(&format_options(&discovery.options, format)?);
            if with_report {
                print_block(&format_report(&discovery.report, format)?);
            }
        }
    }

    for warning in discovery.report.warnings() {
        tracing::info!("{warning}");
    }
    Ok(0)
}

fn print_block(text: &str) {
    if text.ends_with('\n') {
        print!("{text}");
    } else {
        println!("{text}");
    }
}

fn run_run(global: &GlobalArgs, args: RunArgs) -> Result<i32, String> {
    let session = open_session(global)?;
    let mut form = session.prefilled_form();

    for name in &args.flags {
        form.set_flag(name, true).map_err(|err| err.to_string())?;
    }
    for (name, value) in &args.values {
        form.set_text(name, value.as_str())
            .map_err(|err| err.to_string())?;
    }

    let invocation = form.invocation(&session.executable);
    if args.dry_run {
        println!("{invocation}");
        return Ok(0);
    }

    let timeout = match args.timeout {
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
        None => session.config.timeout(),
    };
    let outcome = launch(&invocation, timeout).map_err(|err| err.to_string())?;
    Ok(exit_code(&invocation, outcome))
}

fn run_form(global: &GlobalArgs, args: FormArgs) -> Result<i32, String> {
    let session = open_session(global)?;
    let mut form = session.prefilled_form();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    loop {
        prompt::fill_form(&mut form, &mut input, &mut output)
            .map_err(|err| format!("Failed to read form input: {err}"))?;
        let invocation = form.invocation(&session.executable);

        let code = if args.dry_run {
            println!("{invocation}");
            0
        } else {
            match launch(&invocation, session.config.timeout()) {
                Ok(outcome) => exit_code(&invocation, outcome),
                Err(err @ LaunchError::ExecutableNotFound { .. }) => {
                    eprintln!("{err}");
                    1
                }
                Err(err) => return Err(err.to_string()),
            }
        };

        if !ask_again(&mut input, &mut output)? {
            return Ok(code);
        }
    }
}

fn ask_again<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<bool, String> {
    prompt::confirm("Edit and run again?", input, output)
        .map_err(|err| format!("Failed to read form input: {err}"))
}

fn open_session(global: &GlobalArgs) -> Result<Session, String> {
    let config = load_config(global)?;
    let executable = executable_name(global, &config);
    let manpage = global.manpage.as_deref().or(config.manpage.as_deref());
    let discovery =
        scrcpy_form_discovery::discover_options(page_name(&executable), manpage);

    if discovery.options.is_empty() {
        return Err(no_options_message(&executable));
    }

    Ok(Session {
        config,
        executable,
        discovery,
    })
}

impl Session {
    fn prefilled_form(&self) -> FormState {
        let mut form = FormState::from_descriptors(&self.discovery.options);
        self.config.apply_defaults(&mut form);
        form
    }
}

fn load_config(global: &GlobalArgs) -> Result<FormConfig, String> {
    FormConfig::resolve(global.config.as_deref())
        .map_err(|err| format!("Failed to load configuration: {err}"))
}

fn executable_name(global: &GlobalArgs, config: &FormConfig) -> String {
    global
        .executable
        .clone()
        .unwrap_or_else(|| config.executable.clone())
}

/// Manual page name for an executable given as a bare name or a path.
fn page_name(executable: &str) -> &str {
    Path::new(executable)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(executable)
}

fn no_options_message(executable: &str) -> String {
    format!("Could not parse {} options from manpage", page_name(executable))
}

fn exit_code(invocation: &Invocation, outcome: LaunchOutcome) -> i32 {
    if outcome.timed_out {
        eprintln!("{} timed out and was stopped", invocation.program);
        return 124;
    }
    outcome.exit_code.unwrap_or(1)
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing option name in '{raw}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{page_name, parse_assignment};

    #[test]
    fn test_parse_assignment_splits_on_first_equals() {
        assert_eq!(
            parse_assignment("--crop=1224:1440:0:0").unwrap(),
            ("--crop".to_string(), "1224:1440:0:0".to_string())
        );
        assert_eq!(
            parse_assignment("--window-title=a=b").unwrap(),
            ("--window-title".to_string(), "a=b".to_string())
        );
    }

    #[test]
    fn test_parse_assignment_rejects_missing_parts() {
        assert!(parse_assignment("--max-size").is_err());
        assert!(parse_assignment("=1024").is_err());
    }

    #[test]
    fn test_page_name_strips_directories() {
        assert_eq!(page_name("/opt/scrcpy/bin/scrcpy"), "scrcpy");
        assert_eq!(page_name("scrcpy"), "scrcpy");
    }
}
