#![forbid(unsafe_code)]
//! Quill Programming Language Frontend
//!
//! Quill is an indentation-sensitive language with user-extensible macro
//! syntax. This crate provides the command-line frontend over the
//! `quill_syntax` pipeline: tokenizing, parsing, canonical re-emission, and
//! blame reporting.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a frontend bug (logic error), use `.expect("reason")`
//!   with a clear explanation.

pub mod cli;
pub mod report;
pub mod version;

pub use quill_syntax::ast;
pub use quill_syntax::blame;
pub use quill_syntax::lexer;
pub use quill_syntax::parser;
pub use quill_syntax::pattern;
pub use quill_syntax::printer;
pub use quill_syntax::source;
pub use quill_syntax::span;
