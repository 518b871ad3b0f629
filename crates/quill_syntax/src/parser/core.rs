/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` entrypoint,
/// plus the small internal types shared across the other parser chunks.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single "god file".
type PResult<T> = Result<T, Blame>;

/// Result of parsing `[...]` postfix syntax: either a single index or a slice.
enum IndexOrSlice {
    Index(Spanned<Expr>),
    Slice {
        start: Option<Spanned<Expr>>,
        stop: Option<Spanned<Expr>>,
        step: Option<Spanned<Expr>>,
    },
}

/// What the surrounding construct allows at the current position.
///
/// Saved and restored around every body so that, e.g., a `break` in a
/// function nested inside a loop is still rejected.
#[derive(Debug, Clone, Copy, Default)]
struct ParseContext {
    in_function: bool,
    in_loop: bool,
    /// Inside an `anyway` block with no loop opened since; `break` and
    /// `continue` must not escape one.
    in_anyway: bool,
    /// Inside a `macro` body, where `syntax = $(...)` is meaningful.
    in_macro: bool,
}

/// A saved parser position for speculative parsing: token index plus blame
/// count, so a rolled-back probe leaves no trace.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Mark {
    pos: usize,
    blames: usize,
}

impl Mark {
    /// How many tokens lie between `earlier` and this mark.
    pub(crate) fn offset_from(&self, earlier: &Mark) -> usize {
        self.pos.saturating_sub(earlier.pos)
    }
}

/// Parser state.
///
/// ## Notes
/// - The parser is intentionally single-pass and recovers from errors by
///   synchronizing at statement boundaries.
/// - Most parsing helpers are implemented on `Parser` but split across multiple files.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    blames: Blames,
    ctx: ParseContext,
    /// `syntax = $(...)` captured while parsing a macro body.
    pending_pattern: Option<Spanned<crate::pattern::Pattern>>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// The stream must be `End`-terminated, as `quill_syntax::lexer` produces.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            blames: Blames::new(),
            ctx: ParseContext::default(),
            pending_pattern: None,
        }
    }

    /// Parse the entire token stream into a [`Module`].
    ///
    /// Always returns a tree; anything the parser could not make sense of is
    /// reported through the returned [`Blames`].
    pub fn parse(mut self) -> (Module, Blames) {
        let mut body = Vec::new();

        self.skip_newlines();
        // Stray layout tokens can appear at the top level after error
        // recovery; ignore them rather than cascade.
        self.skip_layout();

        while !self.is_at_end() {
            match self.statement() {
                Ok(stmt) => body.push(stmt),
                Err(blame) => {
                    self.blames.push(blame);
                    self.synchronize();
                }
            }
            self.skip_newlines();
            self.skip_layout();
        }

        (Module { body }, self.blames)
    }
}
