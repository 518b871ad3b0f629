//! Reserved keyword vocabulary.
//!
//! This module is the single source of truth for reserved words: a stable
//! identifier ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that
//! records canonical spellings and categories.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Some reserved words are also word operators (e.g. `and`). If you need
//!   operator precedence/fixity, use [`crate::lang::operators`].
//!
//! ## Examples
//! ```rust
//! use quill_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("if"), Some(KeywordId::If));
//! assert_eq!(keywords::as_str(KeywordId::If), "if");
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Control flow / statements
    If,
    Elif,
    Else,
    While,
    For,
    Break,
    Continue,
    Return,
    Yield,
    Pass,
    Try,
    Catch,
    Anyway,

    // Definitions
    Def,
    Class,
    Module,
    Enum,
    Macro,
    Var,

    // Expressions
    Await,
    True,
    False,
    None,

    // Word operators (see `lang::operators` for precedence/fixity)
    And,
    Or,
    Not,
    In,
    Is,
}

/// Broad syntactic grouping for keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    ControlFlow,
    Definition,
    Expression,
    WordOperator,
}

/// Metadata for a reserved keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
}

/// Registry of all reserved keywords.
pub const KEYWORDS: &[KeywordInfo] = &[
    kw(KeywordId::If, "if", KeywordCategory::ControlFlow),
    kw(KeywordId::Elif, "elif", KeywordCategory::ControlFlow),
    kw(KeywordId::Else, "else", KeywordCategory::ControlFlow),
    kw(KeywordId::While, "while", KeywordCategory::ControlFlow),
    kw(KeywordId::For, "for", KeywordCategory::ControlFlow),
    kw(KeywordId::Break, "break", KeywordCategory::ControlFlow),
    kw(KeywordId::Continue, "continue", KeywordCategory::ControlFlow),
    kw(KeywordId::Return, "return", KeywordCategory::ControlFlow),
    kw(KeywordId::Yield, "yield", KeywordCategory::ControlFlow),
    kw(KeywordId::Pass, "pass", KeywordCategory::ControlFlow),
    kw(KeywordId::Try, "try", KeywordCategory::ControlFlow),
    kw(KeywordId::Catch, "catch", KeywordCategory::ControlFlow),
    kw(KeywordId::Anyway, "anyway", KeywordCategory::ControlFlow),
    kw(KeywordId::Def, "def", KeywordCategory::Definition),
    kw(KeywordId::Class, "class", KeywordCategory::Definition),
    kw(KeywordId::Module, "module", KeywordCategory::Definition),
    kw(KeywordId::Enum, "enum", KeywordCategory::Definition),
    kw(KeywordId::Macro, "macro", KeywordCategory::Definition),
    kw(KeywordId::Var, "var", KeywordCategory::Definition),
    kw(KeywordId::Await, "await", KeywordCategory::Expression),
    kw(KeywordId::True, "true", KeywordCategory::Expression),
    kw(KeywordId::False, "false", KeywordCategory::Expression),
    kw(KeywordId::None, "none", KeywordCategory::Expression),
    kw(KeywordId::And, "and", KeywordCategory::WordOperator),
    kw(KeywordId::Or, "or", KeywordCategory::WordOperator),
    kw(KeywordId::Not, "not", KeywordCategory::WordOperator),
    kw(KeywordId::In, "in", KeywordCategory::WordOperator),
    kw(KeywordId::Is, "is", KeywordCategory::WordOperator),
];

/// Resolve a spelling to a keyword id, if reserved.
pub fn from_str(spelling: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == spelling).map(|k| k.id)
}

/// Return the canonical spelling for a keyword.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (a programming error).
pub fn as_str(id: KeywordId) -> &'static str {
    KEYWORDS
        .iter()
        .find(|k| k.id == id)
        .expect("keyword info missing")
        .canonical
}

const fn kw(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo { id, canonical, category }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_keyword() {
        for k in KEYWORDS {
            assert_eq!(from_str(k.canonical), Some(k.id));
            assert_eq!(as_str(k.id), k.canonical);
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(from_str("If"), None);
        assert_eq!(from_str("WHILE"), None);
    }

    #[test]
    fn no_duplicate_spellings() {
        for (i, a) in KEYWORDS.iter().enumerate() {
            for b in &KEYWORDS[i + 1..] {
                assert_ne!(a.canonical, b.canonical, "duplicate keyword spelling");
            }
        }
    }
}
