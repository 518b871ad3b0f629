//! Indentation handling: Indent/Outdent synthesis at line starts.
//!
//! Levels are compared by character count against a stack of the literal
//! whitespace prefixes currently open. Blank lines and comment-only lines
//! never touch the stack, and the whole mechanism is bypassed while any
//! bracket is open (`scan_token` checks before calling in here).

use super::Lexer;
use crate::blame::BlameKind;
use crate::lexer::tokens::TokenKind;
use crate::span::Span;

impl<'a> Lexer<'a> {
    /// Consume the leading whitespace of a line and emit Indent/Outdent
    /// tokens as the level changes. Leaves `at_line_start` false unless the
    /// line turned out to be blank or comment-only.
    pub(super) fn handle_indentation(&mut self) {
        let line_start = self.pos;
        let ws_start = self.cursor;
        while let Some(c) = self.peek() {
            if c == ' ' || c == '\t' {
                self.advance();
            } else {
                break;
            }
        }
        let ws = self.text_from(ws_start).to_string();
        let ws_span = Span::new(line_start, self.pos);

        match self.peek() {
            // End of text: closing Outdents are emitted by `tokenize`.
            None => {
                self.at_line_start = false;
                self.done = true;
                return;
            }
            // Blank line: swallow it, stay at line start.
            Some('\n') => {
                self.advance();
                return;
            }
            Some('\r') => {
                self.advance();
                return;
            }
            // Comment-only line: trivia, does not establish a level.
            Some('#') => {
                self.line_comment();
                if self.peek() == Some('\n') {
                    self.advance();
                }
                return;
            }
            Some(_) => {}
        }

        self.at_line_start = false;
        self.check_indent_style(&ws, ws_span);

        let level = ws.chars().count();
        let top = self
            .indent_stack
            .last()
            .map(|s| s.chars().count())
            .unwrap_or(0);

        if level > top {
            self.indent_stack.push(ws.clone());
            self.push_token(TokenKind::Indent, ws, ws_span);
        } else if level < top {
            while self
                .indent_stack
                .last()
                .is_some_and(|s| s.chars().count() > level)
                && self.indent_stack.len() > 1
            {
                self.indent_stack.pop();
                self.push_token(TokenKind::Outdent, "", Span::point(line_start));
            }
            let landed = self
                .indent_stack
                .last()
                .map(|s| s.chars().count())
                .unwrap_or(0);
            if landed != level {
                // No enclosing block has this width. Recover by treating the
                // line as belonging to the level we landed on.
                self.blames.report(BlameKind::IndentationMismatch, ws_span);
            }
        }
    }

    /// Style consistency is an Info, never structural: the first indented
    /// line fixes the whitespace character, and later lines that mix in the
    /// other one get flagged (when the check is enabled).
    fn check_indent_style(&mut self, ws: &str, span: Span) {
        if !self.options.check_indentation || ws.is_empty() {
            return;
        }
        let style = match self.indent_style {
            Some(c) => c,
            None => {
                let first = ws.chars().next().unwrap_or(' ');
                self.indent_style = Some(first);
                first
            }
        };
        if ws.chars().any(|c| c != style) {
            self.blames.report(BlameKind::InconsistentIndentation, span);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::blame::BlameKind;
    use crate::lexer::tokens::TokenKind;
    use crate::lexer::{LexOptions, lex, lex_with_options};

    #[test]
    fn deeper_line_pushes_one_indent() {
        let tokens = lex("if a:\n    x = 1\n").tokens;
        let indents = tokens.iter().filter(|t| t.kind == TokenKind::Indent).count();
        assert_eq!(indents, 1);
    }

    #[test]
    fn multi_level_dedent_pops_each_level() {
        let source = "if a:\n  if b:\n    x = 1\ny = 2\n";
        let tokens = lex(source).tokens;
        // Both nested blocks close on the `y` line.
        let mut run = 0;
        let mut best = 0;
        for token in &tokens {
            if token.kind == TokenKind::Outdent {
                run += 1;
                best = best.max(run);
            } else {
                run = 0;
            }
        }
        assert_eq!(best, 2);
    }

    #[test]
    fn indents_and_outdents_always_balance() {
        for source in [
            "if a:\n    x = 1\n",
            "if a:\n  if b:\n    x\n  y\nz\n",
            "if a:\n\tx\n",
            "x = 1\n",
            "if a:\n    x",
        ] {
            let tokens = lex(source).tokens;
            let indents = tokens.iter().filter(|t| t.kind == TokenKind::Indent).count();
            let outdents = tokens.iter().filter(|t| t.kind == TokenKind::Outdent).count();
            assert_eq!(indents, outdents, "unbalanced for {source:?}");
        }
    }

    #[test]
    fn tab_and_space_levels_of_equal_width_are_info_only() {
        let source = "if a:\n\tx = 1\nif b:\n y = 2\n";
        let out = lex(source);
        assert!(!out.blames.has_errors(), "{:?}", out.blames);
        assert!(
            out.blames
                .iter()
                .any(|b| b.kind == BlameKind::InconsistentIndentation)
        );
    }

    #[test]
    fn style_check_can_be_disabled() {
        let source = "if a:\n\tx = 1\nif b:\n y = 2\n";
        let out = lex_with_options(source, LexOptions { check_indentation: false });
        assert!(out.blames.is_empty(), "{:?}", out.blames);
    }

    #[test]
    fn partial_dedent_to_unknown_level_is_an_error() {
        let source = "if a:\n      x = 1\n   y = 2\n";
        let out = lex(source);
        assert!(out.blames.iter().any(|b| b.kind == BlameKind::IndentationMismatch));
    }

    #[test]
    fn comment_only_lines_keep_the_current_level() {
        let source = "if a:\n    x = 1\n        # deep comment\n    y = 2\n";
        let out = lex(source);
        assert!(out.blames.is_empty(), "{:?}", out.blames);
        let indents = out.tokens.iter().filter(|t| t.kind == TokenKind::Indent).count();
        assert_eq!(indents, 1);
    }
}
