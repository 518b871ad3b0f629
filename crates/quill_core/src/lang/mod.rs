//! Registry-backed language vocabulary.
//!
//! - [`keywords`] - reserved words.
//! - [`operators`] - operator table: spelling, input side, associativity,
//!   precedence. Consumed by the lexer (longest-match scanning) and the
//!   parser (precedence climbing).
//! - [`punctuation`] - non-operator punctuation and bracket kinds.

pub mod keywords;
pub mod operators;
pub mod punctuation;
