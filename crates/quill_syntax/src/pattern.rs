//! The macro pattern engine.
//!
//! A macro definition may bind `syntax = $( ... )`; the tokens between the
//! parentheses form a pattern in a small combinator language:
//!
//! - an identifier names a grammar rule from the [`SYNTAX_RULES`] registry
//!   (`expression`, `identifier`, `type`, `statement`, `block`, `number`,
//!   `string`),
//! - a quoted string matches that token's spelling literally,
//! - `[x]` is optional, `{x}` is zero-or-more, `(x)` groups,
//! - `x | y` tries alternatives in order, `x, y` matches in sequence.
//!
//! Patterns are built once when the macro is parsed and are immutable
//! afterwards. Matching is exact structural descent over a live [`Parser`]:
//! a failed match rewinds the parser (blames included) to where it started,
//! but there is no backtracking search inside a sequence.
//!
//! A rule name that is not in the registry is a hard [`UnknownSyntaxRule`]
//! error at definition time, never a silent skip.
//!
//! [`UnknownSyntaxRule`]: crate::blame::BlameKind::UnknownSyntaxRule

use crate::blame::{Blame, BlameKind};
use crate::parser::Parser;
use crate::span::{Span, Spanned};
use quill_core::lang::operators::OperatorId;
use quill_core::lang::punctuation::{BracketKind, PunctId};
use std::fmt;

use crate::lexer::tokens::TokenKind;

// ============================================================================
// SYNTAX RULE REGISTRY
// ============================================================================

/// A named grammar rule a pattern can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxRule {
    Expression,
    Identifier,
    Type,
    Statement,
    Block,
    Number,
    String,
}

/// Registry info for one syntax rule.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxRuleInfo {
    pub rule: SyntaxRule,
    pub name: &'static str,
}

const fn rule(rule: SyntaxRule, name: &'static str) -> SyntaxRuleInfo {
    SyntaxRuleInfo { rule, name }
}

/// Every rule a `syntax = $(...)` pattern may reference.
pub const SYNTAX_RULES: &[SyntaxRuleInfo] = &[
    rule(SyntaxRule::Expression, "expression"),
    rule(SyntaxRule::Identifier, "identifier"),
    rule(SyntaxRule::Type, "type"),
    rule(SyntaxRule::Statement, "statement"),
    rule(SyntaxRule::Block, "block"),
    rule(SyntaxRule::Number, "number"),
    rule(SyntaxRule::String, "string"),
];

/// Look up a rule by its pattern-language name.
pub fn rule_from_str(name: &str) -> Option<SyntaxRule> {
    SYNTAX_RULES.iter().find(|info| info.name == name).map(|info| info.rule)
}

/// The pattern-language name of a rule.
pub fn rule_name(rule: SyntaxRule) -> &'static str {
    SYNTAX_RULES
        .iter()
        .find(|info| info.rule == rule)
        .map(|info| info.name)
        .expect("syntax rule info missing")
}

// ============================================================================
// PATTERN
// ============================================================================

/// One node of a compiled macro pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// Match a token by its exact spelling.
    Token(String),
    /// Invoke a registered grammar rule.
    Rule(SyntaxRule),
    /// `[x]`: match `x` or nothing.
    Optional(Box<Pattern>),
    /// `{x}`: match `x` zero or more times.
    Multiple(Box<Pattern>),
    /// `x | y`: first alternative that matches wins.
    Or(Vec<Pattern>),
    /// `x, y`: match each element in order.
    Cascade(Vec<Pattern>),
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Token(text) => write!(f, "{text:?}"),
            Pattern::Rule(rule) => f.write_str(rule_name(*rule)),
            Pattern::Optional(inner) => write!(f, "[{inner}]"),
            Pattern::Multiple(inner) => write!(f, "{{{inner}}}"),
            Pattern::Or(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Pattern::Cascade(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

// ============================================================================
// PATTERN PARSING
// ============================================================================

/// Parse `$( ... )` at the parser's current position into a pattern.
///
/// Called from statement parsing when a macro body binds `syntax = ...`; the
/// `$` is the current token.
pub(crate) fn parse_syntax_pattern(parser: &mut Parser<'_>) -> Result<Spanned<Pattern>, Blame> {
    let start = parser.peek().span;
    if !matches!(parser.peek().kind, TokenKind::Punct(PunctId::Dollar)) {
        return Err(Blame::new(
            BlameKind::ExpectedToken {
                expected: "`$(` to open a syntax pattern",
                found: parser.peek().kind.describe(),
            },
            start,
        ));
    }
    parser.advance(); // $
    if !matches!(parser.peek().kind, TokenKind::Open(BracketKind::Paren)) {
        return Err(Blame::new(
            BlameKind::ExpectedToken {
                expected: "`(` after `$`",
                found: parser.peek().kind.describe(),
            },
            parser.peek().span,
        ));
    }
    parser.advance(); // (

    if matches!(parser.peek().kind, TokenKind::Close(BracketKind::Paren)) {
        let span = start.merge(parser.peek().span);
        parser.advance();
        return Err(Blame::new(BlameKind::EmptyMacroPattern, span));
    }

    let pattern = cascade(parser)?;

    if !matches!(parser.peek().kind, TokenKind::Close(BracketKind::Paren)) {
        return Err(Blame::new(
            BlameKind::ExpectedToken {
                expected: "`)` to close the syntax pattern",
                found: parser.peek().kind.describe(),
            },
            parser.peek().span,
        ));
    }
    let span = start.merge(parser.peek().span);
    parser.advance(); // )

    Ok(Spanned::new(pattern, span))
}

/// `x, y, z` - the loosest level.
fn cascade(parser: &mut Parser<'_>) -> Result<Pattern, Blame> {
    let mut items = vec![alternation(parser)?];
    while matches!(parser.peek().kind, TokenKind::Operator(OperatorId::Comma)) {
        parser.advance();
        items.push(alternation(parser)?);
    }
    Ok(if items.len() == 1 {
        items.into_iter().next().unwrap_or(Pattern::Cascade(Vec::new()))
    } else {
        Pattern::Cascade(items)
    })
}

/// `x | y`
fn alternation(parser: &mut Parser<'_>) -> Result<Pattern, Blame> {
    let mut items = vec![atom(parser)?];
    while matches!(parser.peek().kind, TokenKind::Operator(OperatorId::BitOr)) {
        parser.advance();
        items.push(atom(parser)?);
    }
    Ok(if items.len() == 1 {
        items.into_iter().next().unwrap_or(Pattern::Or(Vec::new()))
    } else {
        Pattern::Or(items)
    })
}

fn atom(parser: &mut Parser<'_>) -> Result<Pattern, Blame> {
    let span = parser.peek().span;
    match &parser.peek().kind {
        TokenKind::Ident => {
            let name = parser.peek().text.clone();
            match rule_from_str(&name) {
                Some(rule) => {
                    parser.advance();
                    Ok(Pattern::Rule(rule))
                }
                None => {
                    parser.advance();
                    Err(Blame::new(BlameKind::UnknownSyntaxRule(name), span))
                }
            }
        }
        TokenKind::Str(lit) => {
            let text = lit.cooked.clone();
            parser.advance();
            Ok(Pattern::Token(text))
        }
        TokenKind::Open(BracketKind::Bracket) => {
            parser.advance();
            let inner = cascade(parser)?;
            expect_close(parser, BracketKind::Bracket, "`]` after optional pattern")?;
            Ok(Pattern::Optional(Box::new(inner)))
        }
        TokenKind::Open(BracketKind::Brace) => {
            parser.advance();
            let inner = cascade(parser)?;
            expect_close(parser, BracketKind::Brace, "`}` after repeated pattern")?;
            Ok(Pattern::Multiple(Box::new(inner)))
        }
        TokenKind::Open(BracketKind::Paren) => {
            parser.advance();
            let inner = cascade(parser)?;
            expect_close(parser, BracketKind::Paren, "`)` after pattern group")?;
            Ok(inner)
        }
        other => Err(Blame::new(
            BlameKind::ExpectedToken {
                expected: "a rule name, literal, `[`, `{`, or `(`",
                found: other.describe(),
            },
            span,
        )),
    }
}

fn expect_close(parser: &mut Parser<'_>, kind: BracketKind, expected: &'static str) -> Result<(), Blame> {
    if matches!(&parser.peek().kind, TokenKind::Close(k) if *k == kind) {
        parser.advance();
        Ok(())
    } else {
        Err(Blame::new(
            BlameKind::ExpectedToken {
                expected,
                found: parser.peek().kind.describe(),
            },
            parser.peek().span,
        ))
    }
}

// ============================================================================
// PATTERN MATCHING
// ============================================================================

impl Pattern {
    /// Try to match this pattern against the parser's current position.
    ///
    /// On success the matched tokens are consumed; on failure the parser is
    /// rewound (position and blames) and `false` is returned.
    pub fn match_prefix(&self, parser: &mut Parser<'_>) -> bool {
        let mark = parser.mark();
        if self.descend(parser) {
            true
        } else {
            parser.rewind(mark);
            false
        }
    }

    fn descend(&self, parser: &mut Parser<'_>) -> bool {
        match self {
            Pattern::Token(text) => {
                if parser.peek().text == *text {
                    parser.advance();
                    true
                } else {
                    false
                }
            }
            Pattern::Rule(rule) => rule.probe(parser),
            Pattern::Optional(inner) => {
                inner.match_prefix(parser);
                true
            }
            Pattern::Multiple(inner) => {
                loop {
                    let before = parser.mark();
                    // A nullable inner pattern (`{[x]}`) succeeds without
                    // consuming; stop rather than spin.
                    if !inner.match_prefix(parser) || parser.mark().offset_from(&before) == 0 {
                        break;
                    }
                }
                true
            }
            Pattern::Or(items) => items.iter().any(|item| item.match_prefix(parser)),
            // Each element must match where the previous one stopped; a
            // failure fails the whole sequence (the caller rewinds).
            Pattern::Cascade(items) => items.iter().all(|item| item.descend(parser)),
        }
    }
}

impl SyntaxRule {
    /// Run the rule's grammar production as a probe; diagnostics from a
    /// failed probe are rolled back by the caller.
    fn probe(self, parser: &mut Parser<'_>) -> bool {
        match self {
            SyntaxRule::Expression => parser.expression().is_ok(),
            SyntaxRule::Identifier => {
                if matches!(parser.peek().kind, TokenKind::Ident) {
                    parser.advance();
                    true
                } else {
                    false
                }
            }
            SyntaxRule::Type => parser.type_name().is_ok(),
            SyntaxRule::Statement => parser.statement().is_ok(),
            SyntaxRule::Block => parser.block().is_ok(),
            SyntaxRule::Number => {
                if matches!(parser.peek().kind, TokenKind::Number(_)) {
                    parser.advance();
                    true
                } else {
                    false
                }
            }
            SyntaxRule::String => {
                if matches!(parser.peek().kind, TokenKind::Str(_)) {
                    parser.advance();
                    true
                } else {
                    false
                }
            }
        }
    }
}

// Spans attach at the `$(...)` level; the compiled tree doesn't carry one per
// node, so `Spanned<Pattern>` is what macro definitions store.
pub type SpannedPattern = Spanned<Pattern>;

/// A convenience for tests and tools: match a pattern against a standalone
/// token stream, returning how many tokens it consumed, or `None`.
pub fn match_tokens(pattern: &Pattern, tokens: &[crate::lexer::tokens::Token]) -> Option<usize> {
    let mut parser = Parser::new(tokens);
    let before = parser.mark();
    if pattern.match_prefix(&mut parser) {
        Some(parser.mark().offset_from(&before))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer;

    fn pattern_of(source: &str) -> Pattern {
        let full = format!("macro m():\n    syntax = $({source})\n    pass\n");
        let lexed = lexer::lex(&full);
        assert!(lexed.blames.is_empty(), "lex failed: {:?}", lexed.blames);
        let (module, blames) = crate::parser::parse(&lexed.tokens);
        assert!(!blames.has_errors(), "parse failed: {blames:?}");
        match &module.body[0].node {
            crate::ast::Stmt::Def(def) => match &def.kind {
                crate::ast::DefKind::Macro(m) => m.pattern.clone().expect("no pattern").node,
                other => panic!("expected macro, got {other:?}"),
            },
            other => panic!("expected def, got {other:?}"),
        }
    }

    fn matches_len(pattern: &Pattern, source: &str) -> Option<usize> {
        let lexed = lexer::lex(source);
        match_tokens(pattern, &lexed.tokens)
    }

    #[test]
    fn registry_resolves_every_listed_rule() {
        for info in SYNTAX_RULES {
            assert_eq!(rule_from_str(info.name), Some(info.rule));
            assert_eq!(rule_name(info.rule), info.name);
        }
        assert_eq!(rule_from_str("frobnicate"), None);
    }

    #[test]
    fn literal_and_rule_cascade() {
        let pattern = pattern_of(r#""unless", expression, block"#);
        assert!(matches!(&pattern, Pattern::Cascade(items) if items.len() == 3));
    }

    #[test]
    fn unknown_rule_is_a_hard_error() {
        let source = "macro m():\n    syntax = $(frobnicate)\n    pass\n";
        let lexed = lexer::lex(source);
        let (_, blames) = crate::parser::parse(&lexed.tokens);
        assert!(
            blames
                .iter()
                .any(|b| matches!(&b.kind, BlameKind::UnknownSyntaxRule(name) if name == "frobnicate"))
        );
    }

    #[test]
    fn empty_pattern_is_an_error() {
        let source = "macro m():\n    syntax = $()\n    pass\n";
        let lexed = lexer::lex(source);
        let (_, blames) = crate::parser::parse(&lexed.tokens);
        assert!(blames.iter().any(|b| b.kind == BlameKind::EmptyMacroPattern));
    }

    #[test]
    fn token_match_consumes_exactly_one() {
        let pattern = Pattern::Token("unless".to_string());
        assert_eq!(matches_len(&pattern, "unless x"), Some(1));
        assert_eq!(matches_len(&pattern, "while x"), None);
    }

    #[test]
    fn optional_matches_presence_and_absence() {
        let pattern = pattern_of(r#"["async"], "task""#);
        assert_eq!(matches_len(&pattern, "async task"), Some(2));
        assert_eq!(matches_len(&pattern, "task"), Some(1));
        assert_eq!(matches_len(&pattern, "async async"), None);
    }

    #[test]
    fn multiple_matches_zero_or_more() {
        let pattern = pattern_of(r#"{"very"}, "fast""#);
        assert_eq!(matches_len(&pattern, "fast"), Some(1));
        assert_eq!(matches_len(&pattern, "very very very fast"), Some(4));
    }

    #[test]
    fn alternation_takes_the_first_match() {
        let pattern = pattern_of(r#""up" | "down""#);
        assert_eq!(matches_len(&pattern, "up"), Some(1));
        assert_eq!(matches_len(&pattern, "down"), Some(1));
        assert_eq!(matches_len(&pattern, "left"), None);
    }

    #[test]
    fn rule_match_consumes_a_whole_expression() {
        let pattern = pattern_of(r#""emit", expression"#);
        // `a + b * c` is five tokens, all consumed by the expression rule.
        assert_eq!(matches_len(&pattern, "emit a + b * c"), Some(6));
    }

    #[test]
    fn failed_cascade_rewinds_cleanly() {
        let pattern = pattern_of(r#""emit", expression"#);
        let lexed = lexer::lex("emit while");
        let mut parser = Parser::new(&lexed.tokens);
        let before = parser.mark();
        assert!(!pattern.match_prefix(&mut parser));
        assert_eq!(parser.mark().offset_from(&before), 0);
    }

    #[test]
    fn display_round_trips_the_shape() {
        let pattern = pattern_of(r#""unless", expression | block, ["end"]"#);
        let shown = pattern.to_string();
        assert!(shown.contains("\"unless\""));
        assert!(shown.contains("expression | block"));
        assert!(shown.contains("[\"end\"]"));
    }
}
