//! Line-oriented terminal form.
//!
//! Walks the form field by field: switches are answered `y`/`n`, value
//! options take free text. An empty answer keeps the current value, so
//! configured defaults survive a quick pass of Enter presses; a lone
//! [`CLEAR_TOKEN`] empties a value option.

use std::io::{self, BufRead, Write};

use scrcpy_form_core::{FieldValue, FormState};

/// Answer that empties a prefilled value option.
pub const CLEAR_TOKEN: &str = "-";

/// Prompts for every field of `form`, in form order.
///
/// Stops early (keeping the remaining values) when `input` reaches EOF.
pub fn fill_form<R: BufRead, W: Write>(
    form: &mut FormState,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    let fields: Vec<(String, FieldValue)> = form
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect();

    for (name, current) in fields {
        match current {
            FieldValue::Flag(checked) => {
                let hint = if checked { "[Y/n]" } else { "[y/N]" };
                write!(output, "{name} {hint}: ")?;
                output.flush()?;
                let Some(answer) = read_answer(input)? else {
                    break;
                };
                if let Some(choice) = parse_yes_no(&answer) {
                    apply(form, &name, FieldValue::Flag(choice))?;
                }
            }
            FieldValue::Text(text) => {
                if text.is_empty() {
                    write!(output, "{name}: ")?;
                } else {
                    write!(output, "{name} [{text}] ({CLEAR_TOKEN} clears): ")?;
                }
                output.flush()?;
                let Some(answer) = read_answer(input)? else {
                    break;
                };
                if answer == CLEAR_TOKEN {
                    apply(form, &name, FieldValue::Text(String::new()))?;
                } else if !answer.is_empty() {
                    apply(form, &name, FieldValue::Text(answer))?;
                }
            }
        }
    }

    writeln!(output)?;
    Ok(())
}

/// Asks a yes/no question; anything but an explicit yes (or EOF) is no.
pub fn confirm<R: BufRead, W: Write>(
    question: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    write!(output, "{question} [y/N]: ")?;
    output.flush()?;
    Ok(read_answer(input)?
        .as_deref()
        .and_then(parse_yes_no)
        .unwrap_or(false))
}

/// Reads one trimmed line, `None` at EOF.
fn read_answer<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

fn apply(form: &mut FormState, name: &str, value: FieldValue) -> io::Result<()> {
    form.apply(name, value)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))
}
