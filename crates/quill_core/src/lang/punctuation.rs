//! Punctuation vocabulary: structural markers and bracket kinds.
//!
//! ## Notes
//! - Brackets carry a [`BracketKind`] so the lexer's bracket stack can report
//!   mismatches by kind ("expected `)`, found `]`").
//! - The code-quote delimiters `{{`/`}}` are a bracket kind of their own and
//!   nest like any other bracket.

/// Stable identifier for non-bracket punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctId {
    /// `.` - member access / dotted names.
    Dot,
    /// `->` - return-type marker.
    Arrow,
    /// `<-` - base-list marker on class/enum definitions.
    LeftArrow,
    /// `$` - code-unquote and macro-pattern introducer.
    Dollar,
    /// `...` - placeholder / abstract body.
    Ellipsis,
}

/// Bracket families tracked by the lexer's matching stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BracketKind {
    Paren,
    Bracket,
    Brace,
    /// Code-quote delimiters `{{` / `}}`.
    Quote,
}

impl BracketKind {
    pub fn open_spelling(self) -> &'static str {
        match self {
            BracketKind::Paren => "(",
            BracketKind::Bracket => "[",
            BracketKind::Brace => "{",
            BracketKind::Quote => "{{",
        }
    }

    pub fn close_spelling(self) -> &'static str {
        match self {
            BracketKind::Paren => ")",
            BracketKind::Bracket => "]",
            BracketKind::Brace => "}",
            BracketKind::Quote => "}}",
        }
    }
}

/// Canonical spelling for a punctuation token.
pub fn as_str(id: PunctId) -> &'static str {
    match id {
        PunctId::Dot => ".",
        PunctId::Arrow => "->",
        PunctId::LeftArrow => "<-",
        PunctId::Dollar => "$",
        PunctId::Ellipsis => "...",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_spellings_pair_up() {
        for kind in [BracketKind::Paren, BracketKind::Bracket, BracketKind::Brace, BracketKind::Quote] {
            assert_ne!(kind.open_spelling(), kind.close_spelling());
        }
    }
}
