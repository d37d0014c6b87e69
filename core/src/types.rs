//! Option descriptor type definitions.
//!
//! This module defines the data model shared between the manpage extractor
//! and the form layer. The types are plain values designed for serialization
//! with [`serde`] so extracted option lists can be printed as JSON or YAML.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Roff directive that introduced an option.
///
/// Manual pages mark option synopses with font macros. `.B` (bold) lines
/// name standalone switches; `.BI` (bold/italic) lines name options followed
/// by an italic value placeholder.
///
/// # Examples
///
/// ```
/// use scrcpy_form_core::DirectiveKind;
///
/// assert_eq!(DirectiveKind::from_macro("B"), Some(DirectiveKind::Flag));
/// assert_eq!(DirectiveKind::from_macro("BI"), Some(DirectiveKind::Value));
/// assert_eq!(DirectiveKind::from_macro("BR"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveKind {
    /// `.B` line: a switch without an argument.
    Flag,
    /// `.BI` line: an option that takes a value.
    Value,
}

impl DirectiveKind {
    /// Maps a roff macro name to a directive kind.
    pub fn from_macro(name: &str) -> Option<Self> {
        match name {
            "B" => Some(Self::Flag),
            "BI" => Some(Self::Value),
            _ => None,
        }
    }

    /// Returns the roff macro name for this kind.
    pub fn macro_name(self) -> &'static str {
        match self {
            Self::Flag => "B",
            Self::Value => "BI",
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.macro_name())
    }
}

/// A command-line option recognized in a manual page.
///
/// Descriptors are immutable value records: two descriptors with the same
/// fields are interchangeable.
///
/// # Examples
///
/// ```
/// use scrcpy_form_core::OptionDescriptor;
///
/// let fullscreen = OptionDescriptor::flag("--fullscreen");
/// assert!(!fullscreen.has_value);
///
/// let bit_rate = OptionDescriptor::value("-b");
/// assert!(bit_rate.has_value);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionDescriptor {
    /// Literal flag string as it appears on the command line.
    pub name: String,
    /// Whether the option expects an accompanying value.
    pub has_value: bool,
}

impl OptionDescriptor {
    /// Creates a descriptor for a standalone switch.
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_value: false,
        }
    }

    /// Creates a descriptor for an option that takes a value.
    pub fn value(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_value: true,
        }
    }
}

/// Value held by one form field.
///
/// Serialized untagged so configuration files can write `true` for a switch
/// and a plain string for a value option. Bare numbers are read as text, so
/// `--max-size: 1024` needs no quotes.
///
/// # Examples
///
/// ```
/// use scrcpy_form_core::FieldValue;
///
/// let on: FieldValue = serde_json::from_str("true").unwrap();
/// assert_eq!(on, FieldValue::Flag(true));
///
/// let size: FieldValue = serde_json::from_str("\"1024\"").unwrap();
/// assert_eq!(size, FieldValue::Text("1024".into()));
///
/// let fps: FieldValue = serde_json::from_str("30").unwrap();
/// assert_eq!(fps, FieldValue::Text("30".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, from = "RawFieldValue")]
pub enum FieldValue {
    /// Checkbox state for a switch.
    Flag(bool),
    /// Text entry for a value option.
    Text(String),
}

impl FieldValue {
    /// Returns the empty value for a descriptor (`false` or `""`).
    pub fn empty_for(descriptor: &OptionDescriptor) -> Self {
        if descriptor.has_value {
            Self::Text(String::new())
        } else {
            Self::Flag(false)
        }
    }
}

/// Scalars accepted where a [`FieldValue`] is read.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawFieldValue {
    Flag(bool),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

impl From<RawFieldValue> for FieldValue {
    fn from(raw: RawFieldValue) -> Self {
        match raw {
            RawFieldValue::Flag(checked) => Self::Flag(checked),
            RawFieldValue::Unsigned(n) => Self::Text(n.to_string()),
            RawFieldValue::Signed(n) => Self::Text(n.to_string()),
            RawFieldValue::Float(n) => Self::Text(n.to_string()),
            RawFieldValue::Text(text) => Self::Text(text),
        }
    }
}
