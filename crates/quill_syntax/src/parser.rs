//! Parser for the Quill language.
//!
//! Converts a token stream into a [`Module`](crate::ast::Module). Parsing is
//! best-effort: every failure is recorded as a [`Blame`](crate::blame::Blame)
//! and the parser synchronizes at the next statement boundary, so the caller
//! always gets back a tree plus the full diagnostic list.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use quill_syntax::{lexer, parser};
//!
//! let source = "def add(a, b):\n    return a + b\n";
//! let lexed = lexer::lex(source);
//! let (module, blames) = parser::parse(&lexed.tokens);
//! assert_eq!(module.body.len(), 1);
//! assert!(!blames.has_errors());
//! ```

use crate::ast::*;
use crate::blame::{Blame, BlameKind, Blames};
use crate::lexer::tokens::{StringLit, Token, TokenKind};
use crate::span::{Span, Spanned};
use quill_core::lang::keywords::KeywordId;
use quill_core::lang::operators::{self, Associativity, InputSide, OperatorId, ASSIGN_PRECEDENCE};
use quill_core::lang::punctuation::{BracketKind, PunctId};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/defs.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/exprs.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
