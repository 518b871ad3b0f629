//! Numeric literal scanning.
//!
//! Grammar: optional radix prefix (`0x`/`0o`/`0b`, plus the redundant `0d`),
//! digits with `_` separators between digits, a decimal-only fraction and
//! exponent, an optional `i`/`u`/`f` width postfix, and an optional `j`
//! imaginary marker. Every malformed shape is blamed and recovery resumes at
//! the next character that cannot belong to a number.

use super::Lexer;
use crate::blame::BlameKind;
use crate::lexer::tokens::{NumberLit, TokenKind};
use crate::span::Position;

impl<'a> Lexer<'a> {
    pub(super) fn scan_number(&mut self, start: Position, start_cursor: usize) {
        let mut radix = 10u32;
        let mut prefixed = false;

        if self.peek() == Some('0') {
            match self.peek_next() {
                Some('x') | Some('X') => {
                    radix = 16;
                    prefixed = true;
                }
                Some('o') | Some('O') => {
                    radix = 8;
                    prefixed = true;
                }
                Some('b') | Some('B') => {
                    radix = 2;
                    prefixed = true;
                }
                Some('d') | Some('D') => {
                    // Decimal is the default; the prefix only adds noise.
                    prefixed = true;
                    let prefix_start = self.pos;
                    self.advance();
                    self.advance();
                    self.blames
                        .report(BlameKind::RedundantRadixPrefix, self.span_from(prefix_start));
                }
                _ => {}
            }
            if prefixed && radix != 10 {
                self.advance();
                self.advance();
            }
        }

        let mut value = String::new();
        self.scan_digits(radix, &mut value);

        let mut is_float = false;
        let mut exponent = None;

        // Fraction: only when a digit actually follows the dot, so `1.frob`
        // stays a member access.
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            if prefixed {
                let dot = self.pos;
                self.blames
                    .report(BlameKind::FractionWithRadixPrefix, crate::span::Span::point(dot));
            }
            self.advance();
            is_float = true;
            value.push('.');
            self.scan_digits(10, &mut value);
        }

        // Exponent; for base 16 an `e` is already a digit, and for bases 2/8
        // an `e` was never valid, so only decimal literals get one.
        if radix == 10 && matches!(self.peek(), Some('e') | Some('E')) {
            let looks_like_exponent = match self.peek_next() {
                Some(c) if c.is_ascii_digit() => true,
                Some('+') | Some('-') => true,
                _ => false,
            };
            if looks_like_exponent {
                if prefixed {
                    self.blames
                        .report(BlameKind::ExponentWithRadixPrefix, crate::span::Span::point(self.pos));
                }
                let exp_start = self.pos;
                self.advance(); // e
                let negative = match self.peek() {
                    Some('-') => {
                        self.advance();
                        true
                    }
                    Some('+') => {
                        self.advance();
                        false
                    }
                    _ => false,
                };
                let mut digits = String::new();
                self.scan_digits(10, &mut digits);
                if digits.is_empty() {
                    self.blames
                        .report(BlameKind::TruncatedExponent, self.span_from(exp_start));
                } else {
                    is_float = true;
                    let magnitude: i32 = digits.parse().unwrap_or(i32::MAX);
                    exponent = Some(if negative { -magnitude } else { magnitude });
                }
            }
        }

        // Width postfix: `i`/`u`/`f` followed by a bit count.
        let mut unsigned = false;
        let mut width = None;
        if let Some(letter @ ('i' | 'u' | 'f')) = self.peek() {
            let postfix_start = self.pos;
            self.advance();
            let mut digits = String::new();
            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    digits.push(c);
                    self.advance();
                } else {
                    break;
                }
            }
            if digits.is_empty() {
                self.blames.report(
                    BlameKind::ExpectedBitWidthAfterNumberPostfix(letter),
                    self.span_from(postfix_start),
                );
            } else {
                let bits: u32 = digits.parse().unwrap_or(0);
                let valid = match letter {
                    'f' => matches!(bits, 32 | 64),
                    _ => matches!(bits, 8 | 16 | 32 | 64 | 128),
                };
                if valid {
                    width = Some(bits);
                    unsigned = letter == 'u';
                    if letter == 'f' {
                        is_float = true;
                    }
                } else {
                    self.blames
                        .report(BlameKind::InvalidBitWidth(bits), self.span_from(postfix_start));
                }
            }
        }

        let mut is_imaginary = false;
        if self.peek() == Some('j') {
            self.advance();
            is_imaginary = true;
        }

        // Anything word-like still glued on is junk; consume it in one go so
        // scanning resumes at the next non-number character.
        if self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
            let junk_start = self.pos;
            while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
                self.advance();
            }
            self.blames
                .report(BlameKind::MalformedNumberSuffix, self.span_from(junk_start));
        }

        let unlimited = !is_float && width.is_none();
        let lit = NumberLit {
            radix,
            value,
            is_float,
            is_imaginary,
            unsigned,
            width,
            exponent,
            unlimited,
        };
        let text = self.text_from(start_cursor).to_string();
        self.push_token(TokenKind::Number(lit), text, self.span_from(start));
    }

    /// Consume a run of digits in `radix`, appending them to `value` with
    /// separators stripped. Digits valid in some base but not this one are
    /// blamed and skipped; a separator not between two digits is blamed.
    fn scan_digits(&mut self, radix: u32, value: &mut String) {
        let mut last_was_digit = false;
        while let Some(c) = self.peek() {
            if c == '_' {
                let sep_pos = self.pos;
                let next_is_digit = self.peek_next().is_some_and(|n| n.is_digit(radix));
                if !last_was_digit || !next_is_digit {
                    self.blames
                        .report(BlameKind::MisplacedDigitSeparator, crate::span::Span::point(sep_pos));
                    // An `_` after the digits ends the run (it starts a
                    // suffix, reported by the caller).
                    if !next_is_digit {
                        break;
                    }
                }
                self.advance();
                last_was_digit = false;
            } else if c.is_digit(radix) {
                value.push(c);
                self.advance();
                last_was_digit = true;
            } else if c.is_ascii_digit() {
                // A digit character that exists in a bigger base, e.g. `9` in
                // binary. Letters are left alone so they can be postfixes.
                self.blames.report(
                    BlameKind::InvalidDigitForRadix { digit: c, radix },
                    crate::span::Span::point(self.pos),
                );
                self.advance();
                last_was_digit = true;
            } else {
                break;
            }
        }
    }
}
