//! String, f-string, and character literal scanning.
//!
//! Strings are delimited by one or three `'`/`"` quotes; three-quote
//! literals may span lines. The `r` prefix disables escape processing and
//! the `f` prefix enables `{...}` interpolations, which are scanned by
//! recursively re-invoking the lexer over the embedded text with a
//! close-brace terminator. Invalid escapes cook to U+FFFD so downstream
//! consumers always see a complete value.

use super::{Lexer, Terminator};
use crate::blame::BlameKind;
use crate::lexer::tokens::{CharLit, Interpolation, StringLit, TokenKind};
use crate::span::{Position, Span};
use quill_core::lang::punctuation::BracketKind;

/// Substituted for every escape that cannot be resolved.
const SUBSTITUTE: char = '\u{FFFD}';

impl<'a> Lexer<'a> {
    /// True when the cursor sits on an `f`/`r` prefix of a string literal
    /// rather than on an ordinary identifier.
    pub(super) fn string_prefix_ahead(&self) -> bool {
        let mut chars = self.rest().chars();
        let first = chars.next();
        let second = chars.next();
        let third = chars.next();
        match (first, second) {
            (Some('f') | Some('r'), Some('"') | Some('\'')) => true,
            (Some('f'), Some('r')) | (Some('r'), Some('f')) => {
                matches!(third, Some('"') | Some('\''))
            }
            _ => false,
        }
    }

    pub(super) fn scan_prefixed_string(&mut self, start: Position, start_cursor: usize) {
        let mut is_f = false;
        let mut is_r = false;
        while let Some(c @ ('f' | 'r')) = self.peek() {
            match c {
                'f' => is_f = true,
                _ => is_r = true,
            }
            self.advance();
        }
        self.scan_string(start, start_cursor, is_f, is_r);
    }

    /// Scan a string literal; the cursor sits on the opening quote.
    pub(super) fn scan_string(&mut self, start: Position, start_cursor: usize, is_f: bool, is_r: bool) {
        let Some(quote) = self.advance() else { return };

        // One quote or three. Two adjacent quotes are the empty string.
        let mut quote_count = 1u8;
        if self.peek() == Some(quote) {
            self.advance();
            if self.peek() == Some(quote) {
                self.advance();
                quote_count = 3;
            } else {
                self.finish_string(
                    start,
                    start_cursor,
                    StringLit {
                        quote,
                        quote_count: 1,
                        raw: String::new(),
                        cooked: String::new(),
                        is_raw: is_r,
                        is_interpolated: is_f,
                        interpolations: Vec::new(),
                        closed: true,
                    },
                );
                return;
            }
        }

        let mut raw = String::new();
        let mut cooked = String::new();
        let mut interpolations = Vec::new();
        let mut closed = false;

        loop {
            match self.peek() {
                None => {
                    self.blames
                        .report(BlameKind::UnclosedStringLiteral, self.span_from(start));
                    break;
                }
                // Single-line literals close implicitly at end of line.
                Some('\n') if quote_count == 1 => {
                    self.blames
                        .report(BlameKind::UnclosedStringLiteral, self.span_from(start));
                    break;
                }
                Some(c) if c == quote => {
                    let mut run = 0u8;
                    while self.peek() == Some(quote) && run < quote_count {
                        self.advance();
                        run += 1;
                    }
                    if run == quote_count {
                        closed = true;
                        break;
                    }
                    for _ in 0..run {
                        raw.push(quote);
                        cooked.push(quote);
                    }
                }
                Some('\\') if !is_r => {
                    let esc_cursor = self.cursor;
                    if let Some(c) = self.scan_escape() {
                        cooked.push(c);
                    }
                    raw.push_str(self.text_from(esc_cursor));
                }
                Some('{') if is_f => {
                    if self.peek_next() == Some('{') {
                        self.advance();
                        self.advance();
                        raw.push_str("{{");
                        cooked.push('{');
                    } else {
                        self.scan_interpolation(&mut raw, &mut cooked, &mut interpolations);
                    }
                }
                Some('}') if is_f && self.peek_next() == Some('}') => {
                    self.advance();
                    self.advance();
                    raw.push_str("}}");
                    cooked.push('}');
                }
                Some(c) => {
                    self.advance();
                    raw.push(c);
                    cooked.push(c);
                }
            }
        }

        self.finish_string(
            start,
            start_cursor,
            StringLit {
                quote,
                quote_count,
                raw,
                cooked,
                is_raw: is_r,
                is_interpolated: is_f,
                interpolations,
                closed,
            },
        );
    }

    fn finish_string(&mut self, start: Position, start_cursor: usize, lit: StringLit) {
        let span = self.span_from(start);
        if lit.is_interpolated && lit.interpolations.is_empty() {
            self.blames.report(BlameKind::RedundantStringPrefix, span);
        }
        if lit.is_raw && !lit.raw.contains('\\') {
            self.blames.report(BlameKind::RedundantStringPrefix, span);
        }
        let text = self.text_from(start_cursor).to_string();
        self.push_token(TokenKind::Str(lit), text, span);
    }

    /// One `{...}` interpolation: hand the remaining text to a fresh lexer
    /// that stops at the unmatched `}`, then splice its tokens in.
    fn scan_interpolation(
        &mut self,
        raw: &mut String,
        cooked: &mut String,
        interpolations: &mut Vec<Interpolation>,
    ) {
        let brace_start = self.pos;
        let brace_cursor = self.cursor;
        self.advance(); // {

        let src: &'a str = self.source;
        let inner = Lexer::embedded_at(&src[self.cursor..], self.pos, self.options.clone());
        debug_assert_eq!(inner.terminator, Terminator::CloseBrace);
        let (tokens, blames, consumed, end_pos) = inner.run_embedded();
        self.blames.absorb(blames);
        self.cursor += consumed;
        self.pos = end_pos;

        if self.peek() == Some('}') {
            self.advance();
        } else {
            // End of line or text before the interpolation closed.
            self.blames.report(
                BlameKind::MismatchedBracket {
                    expected: BracketKind::Brace,
                },
                Span::point(self.pos),
            );
        }

        let span = Span::new(brace_start, self.pos);
        let slice = self.text_from(brace_cursor);
        raw.push_str(slice);
        cooked.push_str(slice);
        interpolations.push(Interpolation { tokens, span });
    }

    /// Scan a character literal; the cursor sits on the opening backtick.
    pub(super) fn scan_char(&mut self, start: Position, start_cursor: usize) {
        self.advance(); // `

        let mut value = None;
        let mut extra = 0usize;
        let mut closed = false;

        loop {
            match self.peek() {
                None => break,
                Some('\n') => break,
                Some('`') => {
                    self.advance();
                    closed = true;
                    break;
                }
                Some('\\') => {
                    if let Some(c) = self.scan_escape() {
                        if value.is_none() {
                            value = Some(c);
                        } else {
                            extra += 1;
                        }
                    }
                }
                Some(c) => {
                    self.advance();
                    if value.is_none() {
                        value = Some(c);
                    } else {
                        extra += 1;
                    }
                }
            }
        }

        let span = self.span_from(start);
        if !closed {
            self.blames.report(BlameKind::UnclosedCharacterLiteral, span);
        }
        let value = match value {
            Some(c) => c,
            None => {
                if closed {
                    self.blames.report(BlameKind::EmptyCharacterLiteral, span);
                }
                SUBSTITUTE
            }
        };
        if extra > 0 {
            self.blames.report(BlameKind::CharacterLiteralTooLong, span);
        }

        let text = self.text_from(start_cursor).to_string();
        self.push_token(TokenKind::Char(CharLit { value, closed }), text, span);
    }

    /// Resolve one escape sequence; the cursor sits on the backslash. Every
    /// failure is blamed and yields the substitution character, except a
    /// backslash at end of text which yields nothing.
    fn scan_escape(&mut self) -> Option<char> {
        let esc_start = self.pos;
        self.advance(); // backslash
        let Some(c) = self.advance() else {
            self.blames
                .report(BlameKind::TruncatedEscapeSequence, self.span_from(esc_start));
            return None;
        };
        let resolved = match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            '\\' => '\\',
            '\'' => '\'',
            '"' => '"',
            '`' => '`',
            'x' => self.scan_hex_escape(esc_start, 2),
            'u' => self.scan_hex_escape(esc_start, 4),
            'U' => self.scan_hex_escape(esc_start, 8),
            other => {
                self.blames
                    .report(BlameKind::InvalidEscapeSequence(other), self.span_from(esc_start));
                SUBSTITUTE
            }
        };
        Some(resolved)
    }

    /// `\xHH` / `\uHHHH` / `\UHHHHHHHH`: exactly `digits` hex digits naming a
    /// Unicode scalar value.
    fn scan_hex_escape(&mut self, esc_start: Position, digits: u32) -> char {
        let mut code = 0u32;
        for _ in 0..digits {
            match self.peek() {
                Some(c) if c.is_ascii_hexdigit() => {
                    self.advance();
                    code = code.saturating_mul(16) + c.to_digit(16).unwrap_or(0);
                }
                _ => {
                    self.blames
                        .report(BlameKind::TruncatedEscapeSequence, self.span_from(esc_start));
                    return SUBSTITUTE;
                }
            }
        }
        match char::from_u32(code) {
            Some(c) => c,
            None => {
                self.blames
                    .report(BlameKind::EscapeOutOfRange, self.span_from(esc_start));
                SUBSTITUTE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::blame::{BlameKind, BlameSeverity};
    use crate::lexer::lex;
    use crate::lexer::tokens::{StringLit, TokenKind};

    fn string(source: &str) -> (StringLit, crate::blame::Blames) {
        let out = lex(source);
        let lit = out
            .tokens
            .iter()
            .find_map(|t| match &t.kind {
                TokenKind::Str(s) => Some(s.clone()),
                _ => None,
            })
            .expect("no string token");
        (lit, out.blames)
    }

    #[test]
    fn plain_string() {
        let (s, blames) = string(r#""hello""#);
        assert!(blames.is_empty(), "{blames:?}");
        assert_eq!(s.cooked, "hello");
        assert_eq!(s.raw, "hello");
        assert!(s.closed);
        assert_eq!(s.quote, '"');
    }

    #[test]
    fn empty_string() {
        let (s, blames) = string("''");
        assert!(blames.is_empty(), "{blames:?}");
        assert_eq!(s.cooked, "");
        assert!(s.closed);
    }

    #[test]
    fn escapes_resolve_in_cooked_but_not_raw() {
        let (s, blames) = string(r#""a\tb\n""#);
        assert!(blames.is_empty(), "{blames:?}");
        assert_eq!(s.cooked, "a\tb\n");
        assert_eq!(s.raw, r"a\tb\n");
    }

    #[test]
    fn unicode_escapes() {
        let (s, blames) = string(r#""\x41 é \U0001F600""#);
        assert!(blames.is_empty(), "{blames:?}");
        assert_eq!(s.cooked, "A \u{e9} \u{1F600}");
    }

    #[test]
    fn invalid_escape_substitutes() {
        let (s, blames) = string(r#""a\qb""#);
        assert!(blames.iter().any(|b| matches!(b.kind, BlameKind::InvalidEscapeSequence('q'))));
        assert_eq!(s.cooked, "a\u{FFFD}b");
        assert_eq!(s.raw, r"a\qb");
    }

    #[test]
    fn surrogate_escape_is_out_of_range() {
        let (s, blames) = string(r#""\uD800""#);
        assert!(blames.iter().any(|b| b.kind == BlameKind::EscapeOutOfRange));
        assert_eq!(s.cooked, "\u{FFFD}");
    }

    #[test]
    fn raw_string_keeps_backslashes() {
        let (s, blames) = string(r#"r"a\tb""#);
        assert!(blames.is_empty(), "{blames:?}");
        assert!(s.is_raw);
        assert_eq!(s.cooked, r"a\tb");
    }

    #[test]
    fn raw_prefix_without_backslash_is_redundant() {
        let (_, blames) = string(r#"r"plain""#);
        assert!(blames.iter().any(|b| b.kind == BlameKind::RedundantStringPrefix));
        assert!(!blames.has_errors());
    }

    #[test]
    fn triple_quoted_spans_lines() {
        let (s, blames) = string("\"\"\"a\nb\"\"\"");
        assert!(blames.is_empty(), "{blames:?}");
        assert_eq!(s.quote_count, 3);
        assert_eq!(s.cooked, "a\nb");
    }

    #[test]
    fn unclosed_single_line_string() {
        let (s, blames) = string("\"oops\nx");
        assert!(blames.iter().any(|b| b.kind == BlameKind::UnclosedStringLiteral));
        assert!(!s.closed);
        assert_eq!(s.cooked, "oops");
    }

    #[test]
    fn fstring_interpolation_re_lexes_the_inside() {
        let (s, blames) = string(r#"f"x = {a + 1}!""#);
        assert!(blames.is_empty(), "{blames:?}");
        assert!(s.is_interpolated);
        assert_eq!(s.interpolations.len(), 1);
        let inner = &s.interpolations[0];
        assert_eq!(inner.tokens.len(), 3);
        assert_eq!(inner.tokens[0].text, "a");
        assert_eq!(inner.tokens[2].text, "1");
        // Inner spans are absolute within the source unit.
        assert!(inner.tokens[0].span.start.offset > 0);
    }

    #[test]
    fn fstring_nested_string_inside_interpolation() {
        let (s, blames) = string(r#"f"{f('inner')}""#);
        assert!(blames.is_empty(), "{blames:?}");
        assert_eq!(s.interpolations.len(), 1);
        let inner = &s.interpolations[0].tokens;
        assert!(inner.iter().any(|t| matches!(t.kind, TokenKind::Str(_))));
    }

    #[test]
    fn fstring_doubled_braces_are_literal() {
        let (s, blames) = string(r#"f"{{not code}}""#);
        assert!(blames.iter().all(|b| b.severity() != BlameSeverity::Error), "{blames:?}");
        assert_eq!(s.cooked, "{not code}");
        assert!(s.interpolations.is_empty());
    }

    #[test]
    fn fstring_without_interpolations_is_redundant() {
        let (_, blames) = string(r#"f"static""#);
        assert!(blames.iter().any(|b| b.kind == BlameKind::RedundantStringPrefix));
    }

    #[test]
    fn unterminated_interpolation_is_blamed() {
        let (_, blames) = string("f\"{a\"\n");
        assert!(blames.iter().any(|b| matches!(b.kind, BlameKind::MismatchedBracket { .. })));
    }

    #[test]
    fn char_literal() {
        let out = lex("`a`");
        assert!(out.blames.is_empty(), "{:?}", out.blames);
        match &out.tokens[0].kind {
            TokenKind::Char(c) => {
                assert_eq!(c.value, 'a');
                assert!(c.closed);
            }
            other => panic!("expected char literal, got {other:?}"),
        }
    }

    #[test]
    fn char_literal_escape() {
        let out = lex(r"`\n`");
        match &out.tokens[0].kind {
            TokenKind::Char(c) => assert_eq!(c.value, '\n'),
            other => panic!("expected char literal, got {other:?}"),
        }
    }

    #[test]
    fn char_literal_too_long_is_exactly_one_error() {
        let out = lex("`abc`");
        assert_eq!(out.blames.len(), 1);
        let blame = out.blames.iter().next().unwrap();
        assert_eq!(blame.kind, BlameKind::CharacterLiteralTooLong);
        assert_eq!(blame.severity(), BlameSeverity::Error);
        match &out.tokens[0].kind {
            TokenKind::Char(c) => {
                assert_eq!(c.value, 'a');
                assert!(c.closed);
            }
            other => panic!("expected char literal, got {other:?}"),
        }
    }

    #[test]
    fn empty_char_literal() {
        let out = lex("``");
        assert!(out.blames.iter().any(|b| b.kind == BlameKind::EmptyCharacterLiteral));
    }

    #[test]
    fn unclosed_char_literal() {
        let out = lex("`a\n");
        assert!(out.blames.iter().any(|b| b.kind == BlameKind::UnclosedCharacterLiteral));
    }
}
