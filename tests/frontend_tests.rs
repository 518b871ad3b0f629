//! End-to-end tests for the Quill frontend
//!
//! Each test drives the public pipeline (`lexer` -> `parser`, or
//! `SourceUnit::compile`) the way the CLI does, and checks the blames and
//! tree shapes a user would see.

use quill::blame::{BlameKind, BlameSeverity};
use quill::lexer::tokens::TokenKind;
use quill::lexer::{self, LexOptions};
use quill::parser;
use quill::source::SourceUnit;

fn compile(source: &str) -> SourceUnit {
    SourceUnit::compile("test", source, LexOptions::default())
}

// =============================================================================
// Lexer scenarios
// =============================================================================

#[test]
fn char_literal_with_three_characters_is_exactly_one_error() {
    let out = lexer::lex("var c = `abc`\n");
    let errors: Vec<_> = out
        .blames
        .iter()
        .filter(|b| b.severity() == BlameSeverity::Error)
        .collect();
    assert_eq!(errors.len(), 1, "{:?}", out.blames);
    assert!(matches!(errors[0].kind, BlameKind::CharacterLiteralTooLong));
}

#[test]
fn decimal_float_lexes_cleanly() {
    let out = lexer::lex("123.456\n");
    assert!(out.blames.is_empty(), "{:?}", out.blames);
    let TokenKind::Number(n) = &out.tokens[0].kind else {
        panic!("expected a number, got {:?}", out.tokens[0].kind);
    };
    assert!(n.is_float);
    assert_eq!(n.value, "123.456");
}

#[test]
fn hex_literal_with_separators_and_width() {
    let out = lexer::lex("0x1689_ABC_DEFi64\n");
    assert!(out.blames.is_empty(), "{:?}", out.blames);
    let TokenKind::Number(n) = &out.tokens[0].kind else {
        panic!("expected a number, got {:?}", out.tokens[0].kind);
    };
    assert_eq!(n.radix, 16);
    assert_eq!(n.value, "1689ABCDEF");
    assert_eq!(n.width, Some(64));
    assert!(!n.unsigned);
}

#[test]
fn tabs_only_nesting_is_clean() {
    let source = "if a:\n\tif b:\n\t\tx = 1\n";
    let out = lexer::lex(source);
    assert!(out.blames.is_empty(), "{:?}", out.blames);
}

#[test]
fn mixed_indentation_info_follows_the_option() {
    let source = "if a:\n\t x = 1\n";

    let checked = lexer::lex_with_options(source, LexOptions { check_indentation: true });
    assert_eq!(checked.blames.count_of(BlameSeverity::Info), 1);
    assert!(matches!(
        checked.blames.iter().next().map(|b| &b.kind),
        Some(BlameKind::InconsistentIndentation)
    ));

    let unchecked = lexer::lex_with_options(source, LexOptions { check_indentation: false });
    assert!(unchecked.blames.is_empty(), "{:?}", unchecked.blames);
}

#[test]
fn lone_close_brace_is_exactly_one_error() {
    let out = lexer::lex("}\n");
    let errors = out.blames.count_of(BlameSeverity::Error);
    assert_eq!(errors, 1, "{:?}", out.blames);
}

#[test]
fn every_indent_has_a_matching_outdent() {
    let sources = [
        "if a:\n    x = 1\n",
        "if a:\n    if b:\n        x = 1\n",
        "def f():\n    while g:\n        pass\n    return\n",
        "if a:\n    x = 1", // no trailing newline
    ];
    for source in sources {
        let out = lexer::lex(source);
        let indents = out.tokens.iter().filter(|t| matches!(t.kind, TokenKind::Indent)).count();
        let outdents = out.tokens.iter().filter(|t| matches!(t.kind, TokenKind::Outdent)).count();
        assert_eq!(indents, outdents, "unbalanced layout for {source:?}");
        assert!(matches!(out.tokens.last().map(|t| &t.kind), Some(TokenKind::End)));
    }
}

#[test]
fn fstring_interpolations_parse_to_expressions() {
    let unit = compile("var s = f\"sum: {a + b}, n: {n}\"\n");
    assert!(unit.blames.is_empty(), "{:?}", unit.blames);
}

// =============================================================================
// Parser scenarios
// =============================================================================

#[test]
fn whole_program_compiles_clean() {
    let source = "\
module geo:
    class Point:
        var x: float
        var y: float

        def length(self) -> float:
            return (self.x ** 2 + self.y ** 2) ** 0.5

def main():
    var p = geo.Point(3.0, 4.0)
    if p.length() > 1:
        print(f\"long: {p.length()}\")
";
    let unit = compile(source);
    assert!(unit.blames.is_empty(), "{:?}", unit.blames);
    assert_eq!(unit.module.body.len(), 2);
}

#[test]
fn macro_with_syntax_pattern_compiles() {
    let source = "\
macro unless(cond, body):
    syntax = $(\"unless\", expression, block)
    return {{ if not $cond: $body }}
";
    let unit = compile(source);
    assert!(unit.blames.is_empty(), "{:?}", unit.blames);
}

#[test]
fn unknown_syntax_rule_is_an_error() {
    let source = "\
macro m(x):
    syntax = $(\"m\", expresion)
    pass
";
    let unit = compile(source);
    assert!(unit
        .blames
        .iter()
        .any(|b| matches!(b.kind, BlameKind::UnknownSyntaxRule(_))), "{:?}", unit.blames);
}

#[test]
fn recovery_keeps_later_statements() {
    let source = "def f(a b):\n    pass\nvar ok = 1\n";
    let unit = compile(source);
    assert!(unit.blames.has_errors());
    // The good trailing statement still lands in the tree.
    assert!(unit.module.body.len() >= 2, "{:#?}", unit.module.body);
}

#[test]
fn parse_never_drops_blame_severities() {
    // One of each severity in a single unit.
    let source = "var a = 0d1\nvar b: list[]\nif c: { pass }\n";
    let unit = compile(source);
    assert_eq!(unit.blames.count_of(BlameSeverity::Warning), 2, "{:?}", unit.blames);
    assert_eq!(unit.blames.count_of(BlameSeverity::Info), 1, "{:?}", unit.blames);
    assert_eq!(unit.blames.count_of(BlameSeverity::Error), 0, "{:?}", unit.blames);
}

#[test]
fn parse_works_on_raw_token_slices() {
    let out = lexer::lex("x = 1 + 2\n");
    let (module, blames) = parser::parse(&out.tokens);
    assert!(!blames.has_errors());
    assert_eq!(module.body.len(), 1);
}
