//! Form state and command-line assembly.
//!
//! A [`FormState`] holds one field per distinct option name, in the order
//! the options were first seen. Filling the form and calling
//! [`FormState::to_args`] yields the argument list for the external
//! executable.
//!
//! # Examples
//!
//! ```
//! use scrcpy_form_core::*;
//!
//! let options = vec![
//!     OptionDescriptor::flag("--fullscreen"),
//!     OptionDescriptor::value("--max-size"),
//!     OptionDescriptor::value("--crop"),
//! ];
//! let mut form = FormState::from_descriptors(&options);
//! form.set_flag("--fullscreen", true).unwrap();
//! form.set_text("--max-size", " 1024 ").unwrap();
//!
//! let invocation = form.invocation("scrcpy");
//! assert_eq!(invocation.args, vec!["--fullscreen", "--max-size", "1024"]);
//! assert_eq!(invocation.to_string(), "scrcpy --fullscreen --max-size 1024");
//! ```

use std::fmt;

use thiserror::Error;

use crate::{FieldValue, OptionDescriptor};

/// Errors raised while filling a form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The option name is not part of the form.
    #[error("unknown option: {0}")]
    UnknownOption(String),
    /// A text value was given for a switch, or a switch state for a value option.
    #[error("option {name} {expected}")]
    KindMismatch {
        name: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Field {
    name: String,
    value: FieldValue,
}

/// Mutable form state keyed by option name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    fields: Vec<Field>,
}

impl FormState {
    /// Builds an empty form (all switches off, all texts empty).
    ///
    /// A name listed more than once keeps the position of its first
    /// occurrence and the field kind of its last one.
    pub fn from_descriptors(descriptors: &[OptionDescriptor]) -> Self {
        let mut fields: Vec<Field> = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let value = FieldValue::empty_for(descriptor);
            match fields.iter_mut().find(|field| field.name == descriptor.name) {
                Some(existing) => existing.value = value,
                None => fields.push(Field {
                    name: descriptor.name.clone(),
                    value,
                }),
            }
        }
        Self { fields }
    }

    /// Number of distinct fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the current value of a field.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    /// Iterates fields in form order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields
            .iter()
            .map(|field| (field.name.as_str(), &field.value))
    }

    /// Sets a switch.
    pub fn set_flag(&mut self, name: &str, checked: bool) -> Result<(), FormError> {
        match self.field_mut(name)? {
            FieldValue::Flag(state) => {
                *state = checked;
                Ok(())
            }
            FieldValue::Text(_) => Err(FormError::KindMismatch {
                name: name.to_string(),
                expected: "expects a value",
            }),
        }
    }

    /// Sets the text of a value option.
    pub fn set_text(&mut self, name: &str, text: impl Into<String>) -> Result<(), FormError> {
        match self.field_mut(name)? {
            FieldValue::Text(current) => {
                *current = text.into();
                Ok(())
            }
            FieldValue::Flag(_) => Err(FormError::KindMismatch {
                name: name.to_string(),
                expected: "does not take a value",
            }),
        }
    }

    /// Applies a value of either kind.
    pub fn apply(&mut self, name: &str, value: FieldValue) -> Result<(), FormError> {
        match value {
            FieldValue::Flag(checked) => self.set_flag(name, checked),
            FieldValue::Text(text) => self.set_text(name, text),
        }
    }

    /// Assembles the argument list in form order.
    ///
    /// Checked switches become bare tokens. Value options whose trimmed text
    /// is non-empty become `name value` pairs; blank ones are omitted.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        for field in &self.fields {
            match &field.value {
                FieldValue::Flag(true) => args.push(field.name.clone()),
                FieldValue::Flag(false) => {}
                FieldValue::Text(text) => {
                    let value = text.trim();
                    if !value.is_empty() {
                        args.push(field.name.clone());
                        args.push(value.to_string());
                    }
                }
            }
        }
        args
    }

    /// Builds the full invocation for `program`.
    pub fn invocation(&self, program: &str) -> Invocation {
        Invocation {
            program: program.to_string(),
            args: self.to_args(),
        }
    }

    fn field_mut(&mut self, name: &str) -> Result<&mut FieldValue, FormError> {
        self.fields
            .iter_mut()
            .find(|field| field.name == name)
            .map(|field| &mut field.value)
            .ok_or_else(|| FormError::UnknownOption(name.to_string()))
    }
}

/// A program plus its assembled argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote_word(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote_word(arg))?;
        }
        Ok(())
    }
}

/// Single-quotes words that would not survive a shell as-is.
fn quote_word(word: &str) -> String {
    let plain = !word.is_empty()
        && word.chars().all(|ch| {
            ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '/' | ':' | '=' | ',' | '+')
        });
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
