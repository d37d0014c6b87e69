//! Core types for turning a manual page into a launch form.
//!
//! This crate defines the values exchanged between the manpage extractor
//! and the form layer:
//!
//! - [`OptionDescriptor`] — one recognized command-line option (`name`,
//!   `has_value`).
//! - [`DirectiveKind`] — the roff directive (`.B` or `.BI`) an option came
//!   from.
//! - [`FieldValue`] — the state of one form field (switch or text).
//! - [`FormState`] — ordered fields keyed by option name, with command-line
//!   assembly via [`FormState::to_args`].
//! - [`Invocation`] — a program plus its assembled arguments.
//!
//! # Example
//!
//! ```
//! use scrcpy_form_core::*;
//!
//! let options = vec![
//!     OptionDescriptor::flag("--turn-screen-off"),
//!     OptionDescriptor::value("--max-fps"),
//! ];
//! let mut form = FormState::from_descriptors(&options);
//! form.apply("--turn-screen-off", FieldValue::Flag(true)).unwrap();
//! form.apply("--max-fps", FieldValue::Text("30".into())).unwrap();
//!
//! assert_eq!(form.to_args(), vec!["--turn-screen-off", "--max-fps", "30"]);
//! ```

mod form;
mod types;

pub use form::{FormError, FormState, Invocation};
pub use types::*;
