//! Lexer for the Quill language.
//!
//! Handles tokenization including:
//! - Keywords, identifiers (kebab continuation allowed, never trailing `-`)
//! - Numeric, string, f-string, and character literals
//! - Table-driven longest-match operators and punctuation
//! - Indentation-based blocks (Indent/Outdent tokens carrying the literal
//!   leading whitespace)
//! - Bracket matching by kind, with implicit line continuation inside
//!   `(`/`[` and layout suspension inside `{`/`{{`
//!
//! ## Module structure
//!
//! - `tokens` - token types (TokenKind, Token, literal payloads)
//! - `strings` - string/f-string/character scanning
//! - `numbers` - numeric literal scanning
//! - `indent` - Indent/Outdent handling
//!
//! ## Re-entrancy
//!
//! Every lexer invocation owns its indentation and bracket stacks, so
//! f-string interpolations can recursively re-invoke the lexer (with a
//! close-brace terminator) without corrupting the outer scan.

mod indent;
mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{CharLit, Interpolation, NumberLit, StringLit, Token, TokenKind};

use crate::blame::{BlameKind, Blames};
use crate::span::{Position, Span};
use quill_core::lang::operators::{self, Symbol};
use quill_core::lang::punctuation::BracketKind;
use quill_core::lang::{keywords, operators as ops};

/// Options controlling a lexer invocation.
#[derive(Debug, Clone)]
pub struct LexOptions {
    /// Report Info blames when a line's indentation mixes whitespace styles.
    pub check_indentation: bool,
}

impl Default for LexOptions {
    fn default() -> Self {
        Self {
            check_indentation: true,
        }
    }
}

/// Where a lexer invocation stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    /// End of the source text (the normal case).
    EndOfText,
    /// An unmatched `}` at bracket depth zero; used for f-string
    /// interpolations. The terminator itself is not consumed.
    CloseBrace,
}

/// Everything a lexer invocation produces.
#[derive(Debug, Clone)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub blames: Blames,
}

// ============================================================================
// LEXER STATE
// ============================================================================

/// Lexer for Quill source code.
pub struct Lexer<'a> {
    source: &'a str,
    /// Byte index into `source`.
    cursor: usize,
    /// Absolute position; `pos.offset` includes any embedding base.
    pos: Position,
    options: LexOptions,
    terminator: Terminator,
    /// Embedded sub-lexes (interpolations) suspend all layout handling.
    embedded: bool,
    /// Non-empty; bottom sentinel is the empty string.
    indent_stack: Vec<String>,
    /// Whitespace style established by the first indented line.
    indent_style: Option<char>,
    bracket_stack: Vec<BracketKind>,
    at_line_start: bool,
    done: bool,
    tokens: Vec<Token>,
    blames: Blames,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'a str, options: LexOptions) -> Self {
        Self {
            source,
            cursor: 0,
            pos: Position::default(),
            options,
            terminator: Terminator::EndOfText,
            embedded: false,
            indent_stack: vec![String::new()],
            indent_style: None,
            bracket_stack: Vec::new(),
            at_line_start: true,
            done: false,
            tokens: Vec::new(),
            blames: Blames::new(),
        }
    }

    /// Create a sub-lexer for an f-string interpolation starting at `base`.
    fn embedded_at(source: &'a str, base: Position, options: LexOptions) -> Self {
        let mut lexer = Self::new(source, options);
        lexer.pos = base;
        lexer.terminator = Terminator::CloseBrace;
        lexer.embedded = true;
        lexer.at_line_start = false;
        lexer
    }

    /// Tokenize the entire source text.
    ///
    /// The token stream always ends with an `End` token whose span starts at
    /// end-of-text. All diagnostics are collected; the lexer recovers from
    /// every malformed construct and never fails outright.
    pub fn tokenize(mut self) -> LexOutput {
        self.scan_all();

        // Close any blocks still open at end of text.
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.push_token(TokenKind::Outdent, "", Span::point(self.pos));
        }

        // Every still-open bracket is a mismatch.
        let open: Vec<BracketKind> = self.bracket_stack.drain(..).collect();
        for kind in open {
            self.blames
                .report(BlameKind::MismatchedBracket { expected: kind }, Span::point(self.pos));
        }

        self.push_token(TokenKind::End, "", Span::point(self.pos));

        LexOutput {
            tokens: self.tokens,
            blames: self.blames,
        }
    }

    /// Run an embedded (interpolation) scan: returns the tokens, blames, the
    /// number of bytes consumed, and the position after the last token. No
    /// `End` token is appended; the terminator `}` is left unconsumed.
    fn run_embedded(mut self) -> (Vec<Token>, Blames, usize, Position) {
        self.scan_all();
        let open: Vec<BracketKind> = self.bracket_stack.drain(..).collect();
        for kind in open {
            self.blames
                .report(BlameKind::MismatchedBracket { expected: kind }, Span::point(self.pos));
        }
        (self.tokens, self.blames, self.cursor, self.pos)
    }

    fn scan_all(&mut self) {
        while !self.done {
            self.scan_token();
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn rest(&self) -> &'a str {
        let src: &'a str = self.source;
        &src[self.cursor..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor += c.len_utf8();
        self.pos.offset += c.len_utf8();
        if c == '\n' {
            self.pos.line += 1;
            self.pos.column = 0;
        } else {
            self.pos.column += 1;
        }
        Some(c)
    }

    /// Consume `bytes` of ASCII symbol text (no newlines).
    fn advance_bytes(&mut self, bytes: usize) {
        for _ in 0..bytes {
            self.advance();
        }
    }

    fn is_at_end(&self) -> bool {
        self.peek().is_none()
    }

    fn push_token(&mut self, kind: TokenKind, text: impl Into<String>, span: Span) {
        self.tokens.push(Token::new(kind, text, span));
    }

    fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.pos)
    }

    fn text_from(&self, start_cursor: usize) -> &'a str {
        let src: &'a str = self.source;
        &src[start_cursor..self.cursor]
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        // Layout at line start (never inside brackets or embedded scans).
        if self.at_line_start && !self.embedded && self.bracket_stack.is_empty() {
            self.handle_indentation();
            return;
        }
        self.at_line_start = false;

        // Same-line whitespace is trivia attached to the preceding token.
        self.skip_trivia_whitespace();

        let start = self.pos;
        let start_cursor = self.cursor;

        let Some(c) = self.peek() else {
            self.done = true;
            return;
        };

        match c {
            // Comments
            '#' => self.line_comment(),
            '/' if self.peek_next() == Some('*') => self.block_comment(start),

            // Newlines
            '\n' => {
                self.advance();
                if self.embedded {
                    return;
                }
                match self.bracket_stack.last() {
                    // Implicit continuation inside parens/brackets.
                    Some(BracketKind::Paren) | Some(BracketKind::Bracket) => {}
                    // Braces and code quotes keep newlines as separators but
                    // suspend indentation handling.
                    Some(BracketKind::Brace) | Some(BracketKind::Quote) => {
                        self.push_token(TokenKind::Newline, "\n", self.span_from(start));
                    }
                    None => {
                        self.push_token(TokenKind::Newline, "\n", self.span_from(start));
                        self.at_line_start = true;
                    }
                }
            }
            '\r' => {
                self.advance();
            }

            // Strings and characters
            '"' | '\'' => self.scan_string(start, start_cursor, false, false),
            '`' => self.scan_char(start, start_cursor),
            'f' | 'r' if self.string_prefix_ahead() => self.scan_prefixed_string(start, start_cursor),

            // Numbers
            '0'..='9' => self.scan_number(start, start_cursor),

            // Identifiers and keywords
            _ if is_ident_start(c) => self.scan_identifier(start, start_cursor),

            // Operators, punctuation, brackets (table-driven longest match)
            _ => match operators::match_symbol(self.rest()) {
                Some((symbol, len)) => self.scan_symbol(symbol, len, start, start_cursor),
                None => {
                    self.advance();
                    self.blames
                        .report(BlameKind::UnexpectedCharacter(c), self.span_from(start));
                }
            },
        }
    }

    fn skip_trivia_whitespace(&mut self) {
        let start_cursor = self.cursor;
        while let Some(c) = self.peek() {
            if c == ' ' || c == '\t' {
                self.advance();
            } else {
                break;
            }
        }
        if self.cursor > start_cursor {
            let trivia = self.text_from(start_cursor).to_string();
            if let Some(last) = self.tokens.last_mut() {
                last.trailing.push_str(&trivia);
            }
        }
    }

    // ========================================================================
    // Comments
    // ========================================================================

    fn line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Nested block comment: `/* ... /* ... */ ... */`.
    fn block_comment(&mut self, start: Position) {
        self.advance(); // /
        self.advance(); // *
        let mut depth = 1usize;
        while depth > 0 {
            match self.peek() {
                None => {
                    self.blames
                        .report(BlameKind::UnterminatedBlockComment, self.span_from(start));
                    self.done = true;
                    return;
                }
                Some('/') if self.peek_next() == Some('*') => {
                    self.advance();
                    self.advance();
                    depth += 1;
                }
                Some('*') if self.peek_next() == Some('/') => {
                    self.advance();
                    self.advance();
                    depth -= 1;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    // ========================================================================
    // Symbols and brackets
    // ========================================================================

    fn scan_symbol(&mut self, symbol: Symbol, len: usize, start: Position, start_cursor: usize) {
        match symbol {
            Symbol::Operator(id) => {
                self.advance_bytes(len);
                let text = self.text_from(start_cursor).to_string();
                self.push_token(TokenKind::Operator(id), text, self.span_from(start));
            }
            Symbol::Punct(id) => {
                self.advance_bytes(len);
                let text = self.text_from(start_cursor).to_string();
                self.push_token(TokenKind::Punct(id), text, self.span_from(start));
            }
            Symbol::Open(kind) => {
                self.advance_bytes(len);
                self.bracket_stack.push(kind);
                let text = self.text_from(start_cursor).to_string();
                self.push_token(TokenKind::Open(kind), text, self.span_from(start));
            }
            Symbol::Close(mut kind) => {
                // `}}` closes a code quote unless a plain brace is open, in
                // which case it is the first of two brace closers.
                let mut len = len;
                if kind == BracketKind::Quote && self.bracket_stack.last() == Some(&BracketKind::Brace) {
                    kind = BracketKind::Brace;
                    len = 1;
                }

                // The embedded terminator: an unmatched `}` ends the scan
                // without being consumed.
                if self.terminator == Terminator::CloseBrace
                    && kind == BracketKind::Brace
                    && self.bracket_stack.is_empty()
                {
                    self.done = true;
                    return;
                }

                self.advance_bytes(len);
                let span = self.span_from(start);
                match self.bracket_stack.last() {
                    Some(top) if *top == kind => {
                        self.bracket_stack.pop();
                    }
                    Some(top) => {
                        // Report but do not pop, so later closers can still
                        // match the bracket that is actually open.
                        let expected = *top;
                        self.blames.report(BlameKind::MismatchedBracket { expected }, span);
                    }
                    None => {
                        self.blames.report(
                            BlameKind::UnmatchedBracket {
                                found: kind.close_spelling(),
                            },
                            span,
                        );
                    }
                }
                let text = self.text_from(start_cursor).to_string();
                self.push_token(TokenKind::Close(kind), text, span);
            }
        }
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    fn scan_identifier(&mut self, start: Position, start_cursor: usize) {
        self.advance();
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else if c == '-' && self.peek_next().is_some_and(is_ident_continue) {
                // Kebab continuation; the restricted-ending rule means `-`
                // is only part of the identifier when a word follows.
                self.advance();
            } else {
                break;
            }
        }

        let spelling = self.text_from(start_cursor);
        let span = self.span_from(start);

        // Reserved word? Word operators become Operator tokens so the
        // parser's precedence climb sees a uniform token kind.
        if let Some(id) = keywords::from_str(spelling) {
            if let Some(op_id) = ops::word_operator(id) {
                self.push_token(TokenKind::Operator(op_id), spelling, span);
            } else {
                self.push_token(TokenKind::Keyword(id), spelling, span);
            }
        } else {
            self.push_token(TokenKind::Ident, spelling, span);
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only; see the
/// kebab rule in `scan_identifier` for `-`).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to lex a source string with default options.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> LexOutput {
    Lexer::new(source, LexOptions::default()).tokenize()
}

/// Lex with explicit options.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex_with_options(source: &str, options: LexOptions) -> LexOutput {
    Lexer::new(source, options).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================
