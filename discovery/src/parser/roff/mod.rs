//! Raw roff directive handling.

pub mod escapes;
pub mod lexer;

pub use lexer::{Directive, leading_quoted_segment, parse_directive};
