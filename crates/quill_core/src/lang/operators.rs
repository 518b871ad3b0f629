//! Operator vocabulary.
//!
//! This module defines the canonical operator table: symbol operators like
//! `+` and word operators like `and`, along with the metadata the parser's
//! precedence climb consumes: input side, associativity, and precedence.
//!
//! ## Notes
//! - Precedence is a relative ordering where **higher binds tighter**. The
//!   documented levels are monotonic: member access and calls (structural,
//!   above everything here), then `**`, multiplicative, additive, shifts,
//!   bitwise, comparisons, `not`, `and`, `or`, the ternary (structural, 20),
//!   assignment (10), and finally `:`/`,`/`;` which sit *below* assignment so
//!   they always terminate a climb and are consumed structurally.
//! - Word operators (`and`, `or`, `not`, `in`, `is`) share spellings with the
//!   keyword registry; the lexer resolves them here so the parser sees
//!   uniform `Operator` tokens. `not in` is composed by the parser from two
//!   tokens and has no scannable spelling.
//! - [`match_symbol`] provides the longest-match scan over every symbolic
//!   spelling (operators and punctuation together), ordered by descending
//!   length.
//!
//! ## Examples
//! ```rust
//! use quill_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("+"), Some(OperatorId::Plus));
//! assert_eq!(operators::info_for(OperatorId::Plus).precedence, 70);
//! ```

use super::punctuation::{BracketKind, PunctId};
use crate::lang::keywords::KeywordId;

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    LeftToRight,
    RightToLeft,
}

/// Which side(s) an operator's operands appear on.
///
/// - `Both`: infix binary operator.
/// - `Right`: prefix unary operator (operand textually follows).
/// - `Left`: postfix unary operator (operand textually precedes). The current
///   dialect defines none, but the table models it for completeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSide {
    Left,
    Right,
    Both,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Assignment
    Assign,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    FloorDivAssign,
    PercentAssign,
    PowerAssign,

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    FloorDiv,
    Percent,
    Power,

    // Shifts / bitwise
    Shl,
    Shr,
    BitAnd,
    BitXor,
    BitOr,
    BitNot,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Word operators
    And,
    Or,
    Not,
    In,
    NotIn,
    Is,

    // Sequencing (structural; lowest precedence by design)
    Colon,
    Comma,
    Semicolon,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub side: InputSide,
    pub associativity: Associativity,
    pub precedence: u8,
    pub is_word: bool,
}

/// Precedence of the assignment level; `expression()` climbs from here.
pub const ASSIGN_PRECEDENCE: u8 = 10;

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Assignment (right-associative: `x = y = 1` nests right)
    op(OperatorId::Assign, "=", InputSide::Both, Associativity::RightToLeft, 10, false),
    op(OperatorId::PlusAssign, "+=", InputSide::Both, Associativity::RightToLeft, 10, false),
    op(OperatorId::MinusAssign, "-=", InputSide::Both, Associativity::RightToLeft, 10, false),
    op(OperatorId::StarAssign, "*=", InputSide::Both, Associativity::RightToLeft, 10, false),
    op(OperatorId::SlashAssign, "/=", InputSide::Both, Associativity::RightToLeft, 10, false),
    op(OperatorId::FloorDivAssign, "//=", InputSide::Both, Associativity::RightToLeft, 10, false),
    op(OperatorId::PercentAssign, "%=", InputSide::Both, Associativity::RightToLeft, 10, false),
    op(OperatorId::PowerAssign, "**=", InputSide::Both, Associativity::RightToLeft, 10, false),
    // Arithmetic
    op(OperatorId::Plus, "+", InputSide::Both, Associativity::LeftToRight, 70, false),
    op(OperatorId::Minus, "-", InputSide::Both, Associativity::LeftToRight, 70, false),
    op(OperatorId::Star, "*", InputSide::Both, Associativity::LeftToRight, 80, false),
    op(OperatorId::Slash, "/", InputSide::Both, Associativity::LeftToRight, 80, false),
    op(OperatorId::FloorDiv, "//", InputSide::Both, Associativity::LeftToRight, 80, false),
    op(OperatorId::Percent, "%", InputSide::Both, Associativity::LeftToRight, 80, false),
    op(OperatorId::Power, "**", InputSide::Both, Associativity::RightToLeft, 90, false),
    // Shifts / bitwise
    op(OperatorId::Shl, "<<", InputSide::Both, Associativity::LeftToRight, 65, false),
    op(OperatorId::Shr, ">>", InputSide::Both, Associativity::LeftToRight, 65, false),
    op(OperatorId::BitAnd, "&", InputSide::Both, Associativity::LeftToRight, 62, false),
    op(OperatorId::BitXor, "^", InputSide::Both, Associativity::LeftToRight, 61, false),
    op(OperatorId::BitOr, "|", InputSide::Both, Associativity::LeftToRight, 60, false),
    op(OperatorId::BitNot, "~", InputSide::Right, Associativity::RightToLeft, 75, false),
    // Comparison (chains handled structurally above the climb)
    op(OperatorId::EqEq, "==", InputSide::Both, Associativity::LeftToRight, 50, false),
    op(OperatorId::NotEq, "!=", InputSide::Both, Associativity::LeftToRight, 50, false),
    op(OperatorId::Lt, "<", InputSide::Both, Associativity::LeftToRight, 50, false),
    op(OperatorId::LtEq, "<=", InputSide::Both, Associativity::LeftToRight, 50, false),
    op(OperatorId::Gt, ">", InputSide::Both, Associativity::LeftToRight, 50, false),
    op(OperatorId::GtEq, ">=", InputSide::Both, Associativity::LeftToRight, 50, false),
    // Word operators
    op(OperatorId::And, "and", InputSide::Both, Associativity::LeftToRight, 35, true),
    op(OperatorId::Or, "or", InputSide::Both, Associativity::LeftToRight, 30, true),
    op(OperatorId::Not, "not", InputSide::Right, Associativity::RightToLeft, 45, true),
    op(OperatorId::In, "in", InputSide::Both, Associativity::LeftToRight, 50, true),
    op(OperatorId::NotIn, "not in", InputSide::Both, Associativity::LeftToRight, 50, true),
    op(OperatorId::Is, "is", InputSide::Both, Associativity::LeftToRight, 50, true),
    // Sequencing: deliberately below assignment
    op(OperatorId::Colon, ":", InputSide::Both, Associativity::LeftToRight, 6, false),
    op(OperatorId::Comma, ",", InputSide::Both, Associativity::LeftToRight, 5, false),
    op(OperatorId::Semicolon, ";", InputSide::Both, Associativity::LeftToRight, 4, false),
];

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Resolve an operator spelling to its identifier. Case-sensitive.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

/// Map a word-operator keyword to its operator id, if it has one.
pub fn word_operator(id: KeywordId) -> Option<OperatorId> {
    match id {
        KeywordId::And => Some(OperatorId::And),
        KeywordId::Or => Some(OperatorId::Or),
        KeywordId::Not => Some(OperatorId::Not),
        KeywordId::In => Some(OperatorId::In),
        KeywordId::Is => Some(OperatorId::Is),
        _ => None,
    }
}

/// Return `true` if the operator may open a prefix (unary) expression.
///
/// `+` and `-` double as infix operators; `not` and `~` are prefix-only.
pub fn can_prefix(id: OperatorId) -> bool {
    matches!(id, OperatorId::Plus | OperatorId::Minus | OperatorId::Not | OperatorId::BitNot)
}

// ============================================================================
// Longest-match symbol scanning
// ============================================================================

/// A scannable symbol: an operator, punctuation, or bracket spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Operator(OperatorId),
    Punct(PunctId),
    Open(BracketKind),
    Close(BracketKind),
}

/// Every symbolic spelling, ordered by **descending length** so a prefix scan
/// implements longest match. Word operators are excluded; those are resolved
/// through the keyword path.
const SYMBOLS: &[(&str, Symbol)] = &[
    // length 3
    ("**=", Symbol::Operator(OperatorId::PowerAssign)),
    ("//=", Symbol::Operator(OperatorId::FloorDivAssign)),
    ("...", Symbol::Punct(PunctId::Ellipsis)),
    // length 2
    ("{{", Symbol::Open(BracketKind::Quote)),
    ("}}", Symbol::Close(BracketKind::Quote)),
    ("**", Symbol::Operator(OperatorId::Power)),
    ("//", Symbol::Operator(OperatorId::FloorDiv)),
    ("==", Symbol::Operator(OperatorId::EqEq)),
    ("!=", Symbol::Operator(OperatorId::NotEq)),
    ("<=", Symbol::Operator(OperatorId::LtEq)),
    (">=", Symbol::Operator(OperatorId::GtEq)),
    ("<<", Symbol::Operator(OperatorId::Shl)),
    (">>", Symbol::Operator(OperatorId::Shr)),
    ("+=", Symbol::Operator(OperatorId::PlusAssign)),
    ("-=", Symbol::Operator(OperatorId::MinusAssign)),
    ("*=", Symbol::Operator(OperatorId::StarAssign)),
    ("/=", Symbol::Operator(OperatorId::SlashAssign)),
    ("%=", Symbol::Operator(OperatorId::PercentAssign)),
    ("->", Symbol::Punct(PunctId::Arrow)),
    ("<-", Symbol::Punct(PunctId::LeftArrow)),
    // length 1
    ("+", Symbol::Operator(OperatorId::Plus)),
    ("-", Symbol::Operator(OperatorId::Minus)),
    ("*", Symbol::Operator(OperatorId::Star)),
    ("/", Symbol::Operator(OperatorId::Slash)),
    ("%", Symbol::Operator(OperatorId::Percent)),
    ("&", Symbol::Operator(OperatorId::BitAnd)),
    ("^", Symbol::Operator(OperatorId::BitXor)),
    ("|", Symbol::Operator(OperatorId::BitOr)),
    ("~", Symbol::Operator(OperatorId::BitNot)),
    ("=", Symbol::Operator(OperatorId::Assign)),
    ("<", Symbol::Operator(OperatorId::Lt)),
    (">", Symbol::Operator(OperatorId::Gt)),
    (":", Symbol::Operator(OperatorId::Colon)),
    (",", Symbol::Operator(OperatorId::Comma)),
    (";", Symbol::Operator(OperatorId::Semicolon)),
    (".", Symbol::Punct(PunctId::Dot)),
    ("$", Symbol::Punct(PunctId::Dollar)),
    ("(", Symbol::Open(BracketKind::Paren)),
    (")", Symbol::Close(BracketKind::Paren)),
    ("[", Symbol::Open(BracketKind::Bracket)),
    ("]", Symbol::Close(BracketKind::Bracket)),
    ("{", Symbol::Open(BracketKind::Brace)),
    ("}", Symbol::Close(BracketKind::Brace)),
];

/// Longest-match a symbol spelling at the start of `rest`.
///
/// ## Returns
/// - `Some((symbol, byte_len))` for the longest spelling that prefixes
///   `rest`, or `None` if no symbol matches.
pub fn match_symbol(rest: &str) -> Option<(Symbol, usize)> {
    SYMBOLS
        .iter()
        .find(|(sp, _)| rest.starts_with(sp))
        .map(|(sp, sym)| (*sym, sp.len()))
}

const fn op(
    id: OperatorId,
    spelling: &'static str,
    side: InputSide,
    associativity: Associativity,
    precedence: u8,
    is_word: bool,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        side,
        associativity,
        precedence,
        is_word,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_ordered_by_descending_length() {
        for pair in SYMBOLS.windows(2) {
            assert!(
                pair[0].0.len() >= pair[1].0.len(),
                "{:?} should come after {:?}",
                pair[0].0,
                pair[1].0
            );
        }
    }

    #[test]
    fn longest_match_wins() {
        assert_eq!(match_symbol("**= x"), Some((Symbol::Operator(OperatorId::PowerAssign), 3)));
        assert_eq!(match_symbol("** x"), Some((Symbol::Operator(OperatorId::Power), 2)));
        assert_eq!(match_symbol("* x"), Some((Symbol::Operator(OperatorId::Star), 1)));
        assert_eq!(match_symbol("{{x}}"), Some((Symbol::Open(BracketKind::Quote), 2)));
        assert_eq!(match_symbol("<- T"), Some((Symbol::Punct(PunctId::LeftArrow), 2)));
    }

    #[test]
    fn every_scannable_operator_resolves_back() {
        for (sp, sym) in SYMBOLS {
            if let Symbol::Operator(id) = sym {
                assert_eq!(from_str(sp), Some(*id), "spelling {:?}", sp);
            }
        }
    }

    #[test]
    fn precedence_levels_are_monotonic() {
        // Structural-lowest: sequencing below assignment, assignment below
        // boolean, boolean below comparison, comparison below arithmetic.
        let prec = |id| info_for(id).precedence;
        assert!(prec(OperatorId::Semicolon) < prec(OperatorId::Comma));
        assert!(prec(OperatorId::Comma) < prec(OperatorId::Colon));
        assert!(prec(OperatorId::Colon) < prec(OperatorId::Assign));
        assert!(prec(OperatorId::Assign) < prec(OperatorId::Or));
        assert!(prec(OperatorId::Or) < prec(OperatorId::And));
        assert!(prec(OperatorId::And) < prec(OperatorId::EqEq));
        assert!(prec(OperatorId::EqEq) < prec(OperatorId::Plus));
        assert!(prec(OperatorId::Plus) < prec(OperatorId::Star));
        assert!(prec(OperatorId::Star) < prec(OperatorId::Power));
    }

    #[test]
    fn assignment_is_right_associative() {
        assert_eq!(info_for(OperatorId::Assign).associativity, Associativity::RightToLeft);
        assert_eq!(info_for(OperatorId::Minus).associativity, Associativity::LeftToRight);
    }
}
