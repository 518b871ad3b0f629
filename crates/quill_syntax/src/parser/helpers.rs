/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`)
/// - Matching / expecting keywords, operators, punctuation, and brackets
/// - Layout handling (`skip_newlines`, `skip_layout`)
/// - Speculative parsing (`mark`/`rewind`, used by the macro pattern engine)
/// - Error recovery (`synchronize`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::End`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::End)
    }

    /// Return the current token without consuming it.
    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Return the token after the current token without consuming it.
    fn peek_next(&self) -> &Token {
        if self.pos + 1 < self.tokens.len() {
            &self.tokens[self.pos + 1]
        } else {
            &self.tokens[self.tokens.len() - 1]
        }
    }

    /// Advance to the next token and return the token we just consumed.
    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        &self.tokens[self.pos - 1]
    }

    fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            self.current_span()
        }
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().kind.is_operator(id)
    }

    fn check_punct(&self, id: PunctId) -> bool {
        self.peek().kind.is_punct(id)
    }

    fn check_open(&self, kind: BracketKind) -> bool {
        self.peek().kind.is_open(kind)
    }

    fn check_close(&self, kind: BracketKind) -> bool {
        self.peek().kind.is_close(kind)
    }

    fn check_ident(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Ident)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_open(&mut self, kind: BracketKind) -> bool {
        if self.check_open(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_close(&mut self, kind: BracketKind) -> bool {
        if self.check_close(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_newline(&mut self) -> bool {
        if matches!(self.peek().kind, TokenKind::Newline) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expected(&self, expected: &'static str) -> Blame {
        if self.is_at_end() {
            return Blame::new(BlameKind::UnexpectedEndOfInput, self.current_span());
        }
        Blame::new(
            BlameKind::ExpectedToken {
                expected,
                found: self.peek().kind.describe(),
            },
            self.current_span(),
        )
    }

    fn expect_op(&mut self, id: OperatorId, expected: &'static str) -> PResult<&Token> {
        if self.check_op(id) {
            Ok(self.advance())
        } else {
            Err(self.expected(expected))
        }
    }

    fn expect_keyword(&mut self, id: KeywordId, expected: &'static str) -> PResult<&Token> {
        if self.check_keyword(id) {
            Ok(self.advance())
        } else {
            Err(self.expected(expected))
        }
    }

    fn expect_close(&mut self, kind: BracketKind, expected: &'static str) -> PResult<&Token> {
        if self.check_close(kind) {
            Ok(self.advance())
        } else {
            Err(self.expected(expected))
        }
    }

    /// Expect an identifier and return it with its span.
    fn expect_ident(&mut self) -> PResult<Ident> {
        if self.check_ident() {
            let token = self.advance();
            Ok(Ident::new(token.text.clone(), token.span))
        } else {
            Err(Blame::new(
                BlameKind::ExpectedIdentifier {
                    found: self.peek().kind.describe(),
                },
                self.current_span(),
            ))
        }
    }

    fn skip_newlines(&mut self) {
        while self.match_newline() {}
    }

    /// Skip stray Indent/Outdent tokens at the current position.
    ///
    /// These should not normally appear at module level, but can show up after
    /// error recovery.
    fn skip_layout(&mut self) {
        while matches!(self.peek().kind, TokenKind::Indent | TokenKind::Outdent) {
            self.advance();
        }
    }

    /// Discard tokens until a likely statement boundary.
    fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() {
            match &self.peek().kind {
                TokenKind::Newline => {
                    self.advance();
                    return;
                }
                TokenKind::Outdent => return,
                TokenKind::Keyword(
                    KeywordId::Def
                    | KeywordId::Class
                    | KeywordId::Module
                    | KeywordId::Enum
                    | KeywordId::Macro
                    | KeywordId::Var
                    | KeywordId::If
                    | KeywordId::While
                    | KeywordId::For
                    | KeywordId::Try
                    | KeywordId::Return,
                ) => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    // ========================================================================
    // Speculative parsing
    // ========================================================================

    /// Save the current position so a speculative parse can be undone.
    pub(crate) fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            blames: self.blames.len(),
        }
    }

    /// Undo everything since `mark`, blames included.
    pub(crate) fn rewind(&mut self, mark: Mark) {
        self.pos = mark.pos;
        self.blames.truncate(mark.blames);
    }

    /// Check if the current token can start an expression.
    fn is_at_expr_start(&self) -> bool {
        match &self.peek().kind {
            TokenKind::Ident
            | TokenKind::Number(_)
            | TokenKind::Str(_)
            | TokenKind::Char(_)
            | TokenKind::Open(BracketKind::Paren)
            | TokenKind::Open(BracketKind::Bracket)
            | TokenKind::Open(BracketKind::Brace)
            | TokenKind::Open(BracketKind::Quote) => true,
            TokenKind::Punct(PunctId::Dollar) => true,
            TokenKind::Operator(id) => operators::can_prefix(*id),
            TokenKind::Keyword(
                KeywordId::True
                | KeywordId::False
                | KeywordId::None
                | KeywordId::Await
                | KeywordId::Yield
                | KeywordId::Def,
            ) => true,
            _ => false,
        }
    }
}
