#![forbid(unsafe_code)]
//! Canonical language vocabulary for Quill.
//!
//! This crate is the single source of truth for the language's fixed
//! vocabulary tables: reserved keywords, the operator table (spellings,
//! input side, associativity, precedence), and punctuation/bracket kinds.
//!
//! ## Notes
//! - Registries are `const` data, initialized at compile time and never
//!   mutated; they are safe to consult from any number of threads.
//! - This crate is intentionally pure: no AST, no IO, no side effects.

pub mod lang;
