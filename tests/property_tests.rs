//! Property-based tests for the Quill frontend
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use proptest::prelude::*;
use quill::lexer::tokens::TokenKind;
use quill::lexer::{self, LexOptions};
use quill::parser;
use quill::printer;
use quill::source::SourceUnit;

// =============================================================================
// Printer Properties
// =============================================================================

mod printer_properties {
    use super::*;

    fn reprint(source: &str) -> String {
        let unit = SourceUnit::compile("prop", source, LexOptions::default());
        assert!(!unit.blames.has_errors(), "{source:?}: {:?}", unit.blames);
        unit.print()
    }

    /// Property: printing is idempotent (print(parse(print(parse(x)))) ==
    /// print(parse(x)))
    #[test]
    fn print_is_idempotent() {
        let sources = [
            "def add(a: int, b: int) -> int:\n    return a + b\n",
            "var scores = {\"a\": 1, \"b\": 2}\n",
            "for item in items:\n    if item > 0:\n        keep(item)\n    else:\n        drop(item)\n",
            "class Reader <- Stream:\n    def next(self):\n        return self.buf[self.pos]\n",
            "x = -y ** 2 + not z\n",
        ];
        for source in sources {
            let once = reprint(source);
            let twice = reprint(&once);
            assert_eq!(once, twice, "printing not idempotent for {source:?}");
        }
    }
}

// =============================================================================
// Proptest Strategies
// =============================================================================

// Strategy for generating valid Quill identifiers
fn ident_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]*".prop_filter("Not a keyword", |s| {
        !matches!(
            s.as_str(),
            "if" | "elif"
                | "else"
                | "while"
                | "for"
                | "break"
                | "continue"
                | "return"
                | "yield"
                | "pass"
                | "try"
                | "catch"
                | "anyway"
                | "def"
                | "class"
                | "module"
                | "enum"
                | "macro"
                | "var"
                | "await"
                | "true"
                | "false"
                | "none"
                | "and"
                | "or"
                | "not"
                | "in"
                | "is"
        )
    })
}

// Strategy for generating simple function definitions
fn simple_function_strategy() -> impl Strategy<Value = String> {
    (ident_strategy(), ident_strategy()).prop_map(|(name, param)| {
        format!("def {}({}: int) -> int:\n    return {}\n", name, param, param)
    })
}

proptest! {
    /// Property: the lexer and parser never panic, whatever the input
    #[test]
    fn frontend_never_panics(source in "\\PC*") {
        let out = lexer::lex(&source);
        let _ = parser::parse(&out.tokens);
    }

    /// Property: layout tokens always balance and the stream ends with End
    #[test]
    fn layout_always_balances(source in "\\PC*") {
        let out = lexer::lex(&source);
        let indents = out.tokens.iter().filter(|t| matches!(t.kind, TokenKind::Indent)).count();
        let outdents = out.tokens.iter().filter(|t| matches!(t.kind, TokenKind::Outdent)).count();
        prop_assert_eq!(indents, outdents);
        prop_assert!(matches!(out.tokens.last().map(|t| &t.kind), Some(TokenKind::End)));
    }

    /// Property: generated functions compile clean and reprint to a fixed point
    #[test]
    fn generated_functions_reprint_to_a_fixed_point(func in simple_function_strategy()) {
        let unit = SourceUnit::compile("gen", func.as_str(), LexOptions::default());
        prop_assert!(unit.blames.is_empty(), "{:?}", unit.blames);

        let once = printer::print(&unit.module);
        let again = SourceUnit::compile("gen2", once.as_str(), LexOptions::default());
        prop_assert!(again.blames.is_empty(), "{:?}", again.blames);
        prop_assert_eq!(once, printer::print(&again.module));
    }

    /// Property: identifiers survive lexing as single Ident tokens
    #[test]
    fn identifiers_survive_lexing(ident in ident_strategy()) {
        let source = format!("x = {}\n", ident);
        let out = lexer::lex(&source);
        prop_assert!(out.blames.is_empty());
        prop_assert!(out.tokens.iter().any(|t| matches!(t.kind, TokenKind::Ident) && t.text == ident));
    }
}
