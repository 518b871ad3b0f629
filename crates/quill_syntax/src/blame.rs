//! The blame system: recoverable diagnostics with fixed severities.
//!
//! Every fallible lex/parse step reports through [`Blames::report`], which
//! appends to the owning source unit's list and returns control to the
//! caller - blames are never thrown as control flow. Severity is a property
//! of the *kind*, not of the occurrence (spec'd taxonomy), so a caller-level
//! policy such as "abort codegen if any Error exists" can be applied after
//! the fact.

use crate::span::Span;
use quill_core::lang::punctuation::BracketKind;
use std::fmt;
use thiserror::Error;

/// Severity of a blame. Fixed per [`BlameKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BlameSeverity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for BlameSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlameSeverity::Info => write!(f, "info"),
            BlameSeverity::Warning => write!(f, "warning"),
            BlameSeverity::Error => write!(f, "error"),
        }
    }
}

/// Closed catalog of everything the frontend can blame source text for.
///
/// Each kind carries a fixed human-readable description and a fixed severity
/// (see [`BlameKind::severity`]).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BlameKind {
    // ===== Lexical errors =====
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
    #[error("unclosed string literal")]
    UnclosedStringLiteral,
    #[error("unclosed character literal")]
    UnclosedCharacterLiteral,
    #[error("empty character literal")]
    EmptyCharacterLiteral,
    #[error("character literal holds more than one character")]
    CharacterLiteralTooLong,
    #[error("invalid escape sequence \\{0}")]
    InvalidEscapeSequence(char),
    #[error("truncated escape sequence")]
    TruncatedEscapeSequence,
    #[error("escape sequence is not a valid code point")]
    EscapeOutOfRange,
    #[error("digit {digit:?} is not valid in base {radix}")]
    InvalidDigitForRadix { digit: char, radix: u32 },
    #[error("digit separator `_` must sit between two digits")]
    MisplacedDigitSeparator,
    #[error("exponent is missing its digits")]
    TruncatedExponent,
    #[error("number postfix {0:?} must be followed by a bit width")]
    ExpectedBitWidthAfterNumberPostfix(char),
    #[error("{0} is not a supported bit width")]
    InvalidBitWidth(u32),
    #[error("number literal has a malformed suffix")]
    MalformedNumberSuffix,
    #[error("a literal with a radix prefix cannot have an exponent")]
    ExponentWithRadixPrefix,
    #[error("a literal with a radix prefix cannot have a fraction")]
    FractionWithRadixPrefix,
    #[error("block comment is never terminated")]
    UnterminatedBlockComment,
    #[error("mismatched bracket: expected `{}`", .expected.close_spelling())]
    MismatchedBracket { expected: BracketKind },
    #[error("unmatched `{found}`")]
    UnmatchedBracket { found: &'static str },
    #[error("indentation does not match any enclosing block")]
    IndentationMismatch,

    // ===== Parse errors =====
    #[error("expected {expected}, found {found}")]
    ExpectedToken { expected: &'static str, found: String },
    #[error("expected an expression, found {found}")]
    ExpectedExpression { found: String },
    #[error("expected an identifier, found {found}")]
    ExpectedIdentifier { found: String },
    #[error("expected a type name, found {found}")]
    ExpectedTypeName { found: String },
    #[error("expected a block body")]
    ExpectedBlock,
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("duplicate parameter name {0:?}")]
    DuplicateParameterName(String),
    #[error("duplicate argument name {0:?}")]
    DuplicateArgumentName(String),
    #[error("parameter {0:?} needs a default value because an earlier parameter has one")]
    ExpectedDefaultParameterValue(String),
    #[error("a parameter list may declare at most one `*` list parameter")]
    MultipleListParameters,
    #[error("a parameter list may declare at most one `**` map parameter")]
    MultipleMapParameters,
    #[error("the `**` map parameter must be declared last")]
    ParameterAfterMapParameter,
    #[error("positional argument may not follow a named argument")]
    PositionalArgumentAfterNamed,
    #[error("decorators may only precede a definition")]
    InvalidDecoratorPlacement,
    #[error("`break` outside of a loop")]
    BreakOutsideLoop,
    #[error("`continue` outside of a loop")]
    ContinueOutsideLoop,
    #[error("`break` cannot leave an `anyway` block")]
    BreakInsideAnyway,
    #[error("`continue` cannot leave an `anyway` block")]
    ContinueInsideAnyway,
    #[error("`return` outside of a function")]
    ReturnOutsideFunction,
    #[error("`yield` outside of a function")]
    YieldOutsideFunction,
    #[error("a variable needs a type, a value, or both")]
    VariableWithoutTypeOrValue,

    // ===== Macro pattern errors =====
    #[error("unknown syntax rule {0:?}")]
    UnknownSyntaxRule(String),
    #[error("macro pattern is empty")]
    EmptyMacroPattern,

    // ===== Warnings =====
    #[error("`0d` radix prefix is redundant; literals default to base 10")]
    RedundantRadixPrefix,
    #[error("generic argument list is empty")]
    EmptyGenericArguments,

    // ===== Infos =====
    #[error("indentation mixes tabs and spaces inconsistently")]
    InconsistentIndentation,
    #[error("`:` before `{{` is redundant")]
    RedundantColon,
    #[error("parentheses are redundant here")]
    RedundantParentheses,
    #[error("string prefix has no effect on this literal")]
    RedundantStringPrefix,
}

impl BlameKind {
    /// The fixed severity of this kind. Exhaustive by construction so a new
    /// kind cannot be added without classifying it.
    pub fn severity(&self) -> BlameSeverity {
        use BlameKind::*;
        match self {
            RedundantRadixPrefix | EmptyGenericArguments => BlameSeverity::Warning,
            InconsistentIndentation | RedundantColon | RedundantParentheses | RedundantStringPrefix => {
                BlameSeverity::Info
            }
            UnexpectedCharacter(_)
            | UnclosedStringLiteral
            | UnclosedCharacterLiteral
            | EmptyCharacterLiteral
            | CharacterLiteralTooLong
            | InvalidEscapeSequence(_)
            | TruncatedEscapeSequence
            | EscapeOutOfRange
            | InvalidDigitForRadix { .. }
            | MisplacedDigitSeparator
            | TruncatedExponent
            | ExpectedBitWidthAfterNumberPostfix(_)
            | InvalidBitWidth(_)
            | MalformedNumberSuffix
            | ExponentWithRadixPrefix
            | FractionWithRadixPrefix
            | UnterminatedBlockComment
            | MismatchedBracket { .. }
            | UnmatchedBracket { .. }
            | IndentationMismatch
            | ExpectedToken { .. }
            | ExpectedExpression { .. }
            | ExpectedIdentifier { .. }
            | ExpectedTypeName { .. }
            | ExpectedBlock
            | UnexpectedEndOfInput
            | DuplicateParameterName(_)
            | DuplicateArgumentName(_)
            | ExpectedDefaultParameterValue(_)
            | MultipleListParameters
            | MultipleMapParameters
            | ParameterAfterMapParameter
            | PositionalArgumentAfterNamed
            | InvalidDecoratorPlacement
            | BreakOutsideLoop
            | ContinueOutsideLoop
            | BreakInsideAnyway
            | ContinueInsideAnyway
            | ReturnOutsideFunction
            | YieldOutsideFunction
            | VariableWithoutTypeOrValue
            | UnknownSyntaxRule(_)
            | EmptyMacroPattern => BlameSeverity::Error,
        }
    }
}

/// One diagnostic record: what went wrong and where.
#[derive(Debug, Clone, PartialEq)]
pub struct Blame {
    pub kind: BlameKind,
    pub span: Span,
}

impl Blame {
    pub fn new(kind: BlameKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn severity(&self) -> BlameSeverity {
        self.kind.severity()
    }
}

impl fmt::Display for Blame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at {}", self.severity(), self.kind, self.span.start)
    }
}

/// The ordered, append-only diagnostics sink of one source unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Blames {
    records: Vec<Blame>,
}

impl Blames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a blame and return to the caller. Never unwinds.
    pub fn report(&mut self, kind: BlameKind, span: Span) {
        self.records.push(Blame::new(kind, span));
    }

    /// Record an already-built blame.
    pub fn push(&mut self, blame: Blame) {
        self.records.push(blame);
    }

    /// Drop every record after `len`; pairs with [`Blames::len`] to roll back
    /// speculative parsing.
    pub fn truncate(&mut self, len: usize) {
        self.records.truncate(len);
    }

    /// Append everything from another sink (used to merge sub-lexer output).
    pub fn absorb(&mut self, other: Blames) {
        self.records.extend(other.records);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Blame> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.records.iter().any(|b| b.severity() == BlameSeverity::Error)
    }

    pub fn count_of(&self, severity: BlameSeverity) -> usize {
        self.records.iter().filter(|b| b.severity() == severity).count()
    }
}

impl<'a> IntoIterator for &'a Blames {
    type Item = &'a Blame;
    type IntoIter = std::slice::Iter<'a, Blame>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_is_fixed_per_kind() {
        assert_eq!(BlameKind::CharacterLiteralTooLong.severity(), BlameSeverity::Error);
        assert_eq!(BlameKind::RedundantRadixPrefix.severity(), BlameSeverity::Warning);
        assert_eq!(BlameKind::InconsistentIndentation.severity(), BlameSeverity::Info);
    }

    #[test]
    fn report_appends_in_order() {
        let mut blames = Blames::new();
        blames.report(BlameKind::ExpectedBlock, Span::default());
        blames.report(BlameKind::RedundantColon, Span::default());
        assert_eq!(blames.len(), 2);
        assert!(blames.has_errors());
        assert_eq!(blames.count_of(BlameSeverity::Info), 1);
        let kinds: Vec<_> = blames.iter().map(|b| b.kind.clone()).collect();
        assert_eq!(kinds, vec![BlameKind::ExpectedBlock, BlameKind::RedundantColon]);
    }
}
