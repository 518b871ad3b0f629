//! Token types for the Quill lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words,
//! - `Operator(OperatorId)` for operators (including word operators - the
//!   lexer resolves `and`/`or`/`not`/`in`/`is` through the operator table),
//! - `Punct(PunctId)` / bracket kinds for structural markers.
//!
//! Literal tokens carry structured payloads recording everything later
//! stages need: radix/width/flags for numbers, prefix flags and nested
//! interpolation token ranges for strings, and a closed/unclosed flag for
//! anything quote-delimited.

use crate::span::Span;
use quill_core::lang::keywords::KeywordId;
use quill_core::lang::operators::OperatorId;
use quill_core::lang::punctuation::{BracketKind, PunctId};

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punct(PunctId),
    Open(BracketKind),
    Close(BracketKind),

    // ========== Identifiers and literals ==========
    /// Identifier; the spelling lives in [`Token::text`].
    Ident,
    Number(NumberLit),
    Str(StringLit),
    Char(CharLit),

    // ========== Layout ==========
    Newline,
    /// Synthesized block entry; [`Token::text`] holds the literal leading
    /// whitespace so consistency checks can compare it.
    Indent,
    /// Synthesized block exit; carries no text.
    Outdent,

    // ========== Special ==========
    /// End of token stream; its span starts at end-of-text.
    End,
}

impl TokenKind {
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    pub fn is_punct(&self, id: PunctId) -> bool {
        matches!(self, TokenKind::Punct(p) if *p == id)
    }

    pub fn is_open(&self, kind: BracketKind) -> bool {
        matches!(self, TokenKind::Open(k) if *k == kind)
    }

    pub fn is_close(&self, kind: BracketKind) -> bool {
        matches!(self, TokenKind::Close(k) if *k == kind)
    }

    /// Short human-readable description for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Keyword(id) => format!("keyword `{}`", quill_core::lang::keywords::as_str(*id)),
            TokenKind::Operator(id) => format!("`{}`", quill_core::lang::operators::info_for(*id).spelling),
            TokenKind::Punct(id) => format!("`{}`", quill_core::lang::punctuation::as_str(*id)),
            TokenKind::Open(k) => format!("`{}`", k.open_spelling()),
            TokenKind::Close(k) => format!("`{}`", k.close_spelling()),
            TokenKind::Ident => "identifier".to_string(),
            TokenKind::Number(_) => "number literal".to_string(),
            TokenKind::Str(_) => "string literal".to_string(),
            TokenKind::Char(_) => "character literal".to_string(),
            TokenKind::Newline => "end of line".to_string(),
            TokenKind::Indent => "indent".to_string(),
            TokenKind::Outdent => "outdent".to_string(),
            TokenKind::End => "end of input".to_string(),
        }
    }
}

/// Payload of a number literal.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberLit {
    /// 2, 8, 10, or 16.
    pub radix: u32,
    /// Digit characters with separators stripped (fraction digits included,
    /// after the `.`), exactly as written otherwise.
    pub value: String,
    pub is_float: bool,
    /// `j`-suffixed imaginary component of a complex number.
    pub is_imaginary: bool,
    /// `u` postfix.
    pub unsigned: bool,
    /// Explicit bit width from an `i`/`u`/`f` postfix.
    pub width: Option<u32>,
    /// Exponent digits (signed) when an `e`/`E` part was present.
    pub exponent: Option<i32>,
    /// No width postfix: the literal is unlimited-precision as written.
    pub unlimited: bool,
}

impl NumberLit {
    /// Best-effort integer value of the literal.
    pub fn as_int(&self) -> Option<i128> {
        if self.is_float {
            return None;
        }
        i128::from_str_radix(&self.value, self.radix).ok()
    }

    /// Best-effort floating value of the literal.
    pub fn as_float(&self) -> Option<f64> {
        if self.radix != 10 {
            return None;
        }
        let mut text = self.value.clone();
        if let Some(exp) = self.exponent {
            text.push('e');
            text.push_str(&exp.to_string());
        }
        text.parse().ok()
    }
}

/// One `{...}` interpolation inside an `f`-string: the tokens produced by
/// re-invoking the lexer on the embedded text, plus the span of the braces.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolation {
    pub tokens: Vec<Token>,
    pub span: Span,
}

/// Payload of a string literal.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLit {
    /// `'` or `"`.
    pub quote: char,
    /// 1 for single-line, 3 for multi-line literals.
    pub quote_count: u8,
    /// Content exactly as written (no escape processing).
    pub raw: String,
    /// Content with escapes resolved (equals `raw` for `r`-prefixed strings).
    pub cooked: String,
    pub is_raw: bool,
    pub is_interpolated: bool,
    pub interpolations: Vec<Interpolation>,
    /// `false` when the literal was implicitly closed at end of line/text.
    pub closed: bool,
}

/// Payload of a character literal.
#[derive(Debug, Clone, PartialEq)]
pub struct CharLit {
    pub value: char,
    pub closed: bool,
}

/// A token: kind, raw spelling, trailing same-line whitespace, and span.
///
/// `trailing` preserves the trivia between this token and the next so that
/// span adjacency holds exactly: `span.end` plus `trailing` reaches the next
/// token's `span.start` on the same line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub trailing: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            trailing: String::new(),
            span,
        }
    }
}
