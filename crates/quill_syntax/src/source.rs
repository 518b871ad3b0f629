//! One source unit, lexed and parsed in a single call.
//!
//! [`SourceUnit::compile`] is the convenience entry point for callers that
//! want tokens, tree, and the merged diagnostic list together. Both phases
//! always run: a lex error does not stop parsing, it just lands in the same
//! [`Blames`] sink.

use crate::ast::Module;
use crate::blame::Blames;
use crate::lexer::{self, LexOptions};
use crate::lexer::tokens::Token;
use crate::parser;

/// A named piece of source text with everything the frontend produced for it.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// Display name for diagnostics (usually a file path).
    pub name: String,
    pub text: String,
    pub tokens: Vec<Token>,
    pub module: Module,
    /// Lexer blames followed by parser blames, in source order per phase.
    pub blames: Blames,
}

impl SourceUnit {
    /// Lex and parse `text` under `options`.
    #[tracing::instrument(skip_all, fields(name = %name.as_ref()))]
    pub fn compile(name: impl AsRef<str>, text: impl Into<String>, options: LexOptions) -> Self {
        let name = name.as_ref().to_owned();
        let text = text.into();

        let lexed = lexer::lex_with_options(&text, options);
        let (module, parse_blames) = parser::parse(&lexed.tokens);

        let mut blames = lexed.blames;
        blames.absorb(parse_blames);

        Self {
            name,
            text,
            tokens: lexed.tokens,
            module,
            blames,
        }
    }

    /// Canonical re-emission of the parsed tree.
    pub fn print(&self) -> String {
        crate::printer::print(&self.module)
    }
}
