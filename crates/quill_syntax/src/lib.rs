#![forbid(unsafe_code)]
//! Syntax frontend for the Quill language: lexer, parser, AST, macro pattern
//! engine, and blame diagnostics.
//!
//! This crate is dependency-light and intended for reuse across the compiler,
//! code generators, and future interactive tooling.
//!
//! ## Notes
//! - This crate is intentionally syntax-only: it does not do name resolution,
//!   type checking, or code generation.
//! - Vocabulary identity (keywords/operators/punctuation) comes from the
//!   `quill_core::lang` registries.
//! - Nothing here panics on malformed input: every expected failure is
//!   recorded as a [`blame::Blame`] and parsing continues.
//!
//! ## Examples
//! ```rust,no_run
//! use quill_syntax::source::SourceUnit;
//!
//! let unit = SourceUnit::compile("demo", "var x = 1\n", Default::default());
//! assert!(!unit.blames.has_errors());
//! ```

pub mod ast;
pub mod blame;
pub mod lexer;
pub mod parser;
pub mod pattern;
pub mod printer;
pub mod source;
pub mod span;
