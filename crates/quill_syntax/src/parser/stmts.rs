/// Statement and block parsing.
///
/// Blocks come in four forms after a header:
/// - `: NEWLINE INDENT ... OUTDENT` (the usual one)
/// - `{ ... }` with newline/semicolon separators
/// - `: { ... }`, where the colon is flagged as redundant
/// - `: stmt` inline on the same line, `;`-separated
impl<'a> Parser<'a> {
    // ========================================================================
    // Statements
    // ========================================================================

    pub(crate) fn statement(&mut self) -> PResult<Spanned<Stmt>> {
        let start = self.current_span();

        // `syntax = $(...)` inside a macro body.
        if self.ctx.in_macro && self.at_syntax_binding() {
            return self.syntax_binding();
        }

        match &self.peek().kind {
            TokenKind::Keyword(KeywordId::Pass) => {
                self.advance();
                Ok(Spanned::new(Stmt::Empty, start))
            }
            // `...` is a placeholder body, equivalent to `pass`.
            TokenKind::Punct(PunctId::Ellipsis) => {
                self.advance();
                Ok(Spanned::new(Stmt::Empty, start))
            }
            TokenKind::Keyword(KeywordId::Break) => {
                self.advance();
                if !self.ctx.in_loop {
                    let kind = if self.ctx.in_anyway {
                        BlameKind::BreakInsideAnyway
                    } else {
                        BlameKind::BreakOutsideLoop
                    };
                    self.blames.report(kind, start);
                }
                Ok(Spanned::new(Stmt::Break, start))
            }
            TokenKind::Keyword(KeywordId::Continue) => {
                self.advance();
                if !self.ctx.in_loop {
                    let kind = if self.ctx.in_anyway {
                        BlameKind::ContinueInsideAnyway
                    } else {
                        BlameKind::ContinueOutsideLoop
                    };
                    self.blames.report(kind, start);
                }
                Ok(Spanned::new(Stmt::Continue, start))
            }
            TokenKind::Keyword(KeywordId::Return) => {
                self.advance();
                if !self.ctx.in_function {
                    self.blames.report(BlameKind::ReturnOutsideFunction, start);
                }
                let value = if self.is_at_expr_start() {
                    Some(self.expression()?)
                } else {
                    None
                };
                let span = value.as_ref().map_or(start, |v| start.merge(v.span));
                Ok(Spanned::new(Stmt::Return(value), span))
            }
            TokenKind::Keyword(KeywordId::If) => self.if_stmt(),
            TokenKind::Keyword(KeywordId::While) => self.while_stmt(),
            TokenKind::Keyword(KeywordId::For) => self.for_stmt(),
            TokenKind::Keyword(KeywordId::Try) => self.try_stmt(),
            TokenKind::Keyword(
                KeywordId::Def
                | KeywordId::Class
                | KeywordId::Module
                | KeywordId::Enum
                | KeywordId::Macro
                | KeywordId::Var,
            ) => self.definition(Vec::new()),
            TokenKind::Open(BracketKind::Bracket) if self.decorators_ahead() => self.decorated(),
            _ => {
                let expr = self.expression()?;
                let span = expr.span;
                Ok(Spanned::new(Stmt::Expr(expr), span))
            }
        }
    }

    fn if_stmt(&mut self) -> PResult<Spanned<Stmt>> {
        let start = self.current_span();
        self.advance(); // if

        let mut arms = Vec::new();
        let cond = self.condition()?;
        let body = self.block()?;
        arms.push(IfArm { cond, body });

        while self.match_keyword(KeywordId::Elif) {
            let cond = self.condition()?;
            let body = self.block()?;
            arms.push(IfArm { cond, body });
        }

        let orelse = if self.match_keyword(KeywordId::Else) {
            Some(self.block()?)
        } else {
            None
        };

        let span = start.merge(self.previous_span());
        Ok(Spanned::new(Stmt::If(IfStmt { arms, orelse }), span))
    }

    fn while_stmt(&mut self) -> PResult<Spanned<Stmt>> {
        let start = self.current_span();
        self.advance(); // while
        let cond = self.condition()?;

        let saved = self.ctx;
        self.ctx.in_loop = true;
        self.ctx.in_anyway = false;
        let body = self.block();
        self.ctx = saved;

        let span = start.merge(self.previous_span());
        Ok(Spanned::new(Stmt::While(WhileStmt { cond, body: body? }), span))
    }

    fn for_stmt(&mut self) -> PResult<Spanned<Stmt>> {
        let start = self.current_span();
        self.advance(); // for

        // The target stops before `in`, so it is parsed below the comparison
        // level; `a, b` makes a tuple target.
        let first = self.postfix_expr()?;
        let target = if self.check_op(OperatorId::Comma) {
            let mut items = vec![first];
            while self.match_op(OperatorId::Comma) {
                items.push(self.postfix_expr()?);
            }
            let span = items
                .first()
                .map(|i| i.span)
                .unwrap_or(start)
                .merge(items.last().map(|i| i.span).unwrap_or(start));
            Spanned::new(Expr::Tuple(items), span)
        } else {
            first
        };

        self.expect_op(OperatorId::In, "`in` after the loop target")?;
        let iter = self.condition()?;

        let saved = self.ctx;
        self.ctx.in_loop = true;
        self.ctx.in_anyway = false;
        let body = self.block();
        self.ctx = saved;

        let span = start.merge(self.previous_span());
        Ok(Spanned::new(
            Stmt::For(ForStmt {
                target,
                iter,
                body: body?,
            }),
            span,
        ))
    }

    fn try_stmt(&mut self) -> PResult<Spanned<Stmt>> {
        let start = self.current_span();
        self.advance(); // try
        let body = self.block()?;

        let mut catches = Vec::new();
        while self.match_keyword(KeywordId::Catch) {
            let (ty, name) = if self.check_op(OperatorId::Colon) || self.check_open(BracketKind::Brace) {
                (None, None)
            } else {
                let ty = self.type_name()?;
                let name = if self.check_ident() {
                    Some(self.expect_ident()?)
                } else {
                    None
                };
                (Some(ty), name)
            };
            let body = self.block()?;
            catches.push(CatchArm { ty, name, body });
        }

        let anyway = if self.match_keyword(KeywordId::Anyway) {
            // `break`/`continue` must not leave an `anyway` block, so the
            // loop context is cleared for its body.
            let saved = self.ctx;
            self.ctx.in_loop = false;
            self.ctx.in_anyway = true;
            let block = self.block();
            self.ctx = saved;
            Some(block?)
        } else {
            None
        };

        let span = start.merge(self.previous_span());
        Ok(Spanned::new(
            Stmt::Try(TryStmt { body, catches, anyway }),
            span,
        ))
    }

    // ========================================================================
    // Decorators
    // ========================================================================

    /// A `[` at statement start is a decorator list only when its matching
    /// `]` is the last token on the line; otherwise it is a list expression.
    fn decorators_ahead(&self) -> bool {
        if !self.check_open(BracketKind::Bracket) {
            return false;
        }
        let mut depth = 0usize;
        let mut i = self.pos;
        while i < self.tokens.len() {
            match &self.tokens[i].kind {
                TokenKind::Open(BracketKind::Bracket) => depth += 1,
                TokenKind::Close(BracketKind::Bracket) => {
                    depth -= 1;
                    if depth == 0 {
                        return matches!(
                            self.tokens.get(i + 1).map(|t| &t.kind),
                            Some(TokenKind::Newline)
                        );
                    }
                }
                TokenKind::End => return false,
                _ => {}
            }
            i += 1;
        }
        false
    }

    fn decorated(&mut self) -> PResult<Spanned<Stmt>> {
        let start = self.current_span();
        let mut decorators = Vec::new();

        while self.decorators_ahead() {
            self.advance(); // [
            while !self.check_close(BracketKind::Bracket) && !self.is_at_end() {
                decorators.push(self.condition()?);
                if !self.match_op(OperatorId::Comma) {
                    break;
                }
            }
            self.expect_close(BracketKind::Bracket, "`]` after decorators")?;
            self.skip_newlines();
        }

        if matches!(
            self.peek().kind,
            TokenKind::Keyword(
                KeywordId::Def
                    | KeywordId::Class
                    | KeywordId::Module
                    | KeywordId::Enum
                    | KeywordId::Macro
                    | KeywordId::Var
            )
        ) {
            self.definition(decorators)
        } else {
            self.blames
                .report(BlameKind::InvalidDecoratorPlacement, start.merge(self.previous_span()));
            self.statement()
        }
    }

    // ========================================================================
    // Blocks
    // ========================================================================

    /// Parse a block body after a header, in any of its four forms.
    pub(crate) fn block(&mut self) -> PResult<Block> {
        if self.check_op(OperatorId::Colon) {
            let colon_span = self.current_span();
            self.advance();
            if self.check_open(BracketKind::Brace) {
                self.blames.report(BlameKind::RedundantColon, colon_span);
                return self.braced_block();
            }
            if self.match_newline() {
                return self.indented_block();
            }
            return self.inline_block();
        }
        if self.check_open(BracketKind::Brace) {
            return self.braced_block();
        }
        Err(Blame::new(BlameKind::ExpectedBlock, self.current_span()))
    }

    fn indented_block(&mut self) -> PResult<Block> {
        self.skip_newlines();
        if !matches!(self.peek().kind, TokenKind::Indent) {
            return Err(Blame::new(BlameKind::ExpectedBlock, self.current_span()));
        }
        self.advance();

        let mut body = Vec::new();
        self.skip_newlines();
        while !matches!(self.peek().kind, TokenKind::Outdent) && !self.is_at_end() {
            match self.statement() {
                Ok(stmt) => body.push(stmt),
                Err(blame) => {
                    self.blames.push(blame);
                    self.synchronize();
                }
            }
            self.skip_newlines();
        }
        if matches!(self.peek().kind, TokenKind::Outdent) {
            self.advance();
        }
        Ok(body)
    }

    fn braced_block(&mut self) -> PResult<Block> {
        self.advance(); // {
        let mut body = Vec::new();
        self.skip_separators();
        while !self.check_close(BracketKind::Brace) && !self.is_at_end() {
            match self.statement() {
                Ok(stmt) => body.push(stmt),
                Err(blame) => {
                    self.blames.push(blame);
                    self.synchronize();
                }
            }
            self.skip_separators();
        }
        self.expect_close(BracketKind::Brace, "`}` after block")?;
        Ok(body)
    }

    /// One or more `;`-separated statements on the header's own line.
    fn inline_block(&mut self) -> PResult<Block> {
        let mut body = vec![self.statement()?];
        while self.match_op(OperatorId::Semicolon) {
            if matches!(self.peek().kind, TokenKind::Newline | TokenKind::End) {
                break;
            }
            body.push(self.statement()?);
        }
        Ok(body)
    }

    fn skip_separators(&mut self) {
        loop {
            if self.match_newline() || self.match_op(OperatorId::Semicolon) {
                continue;
            }
            break;
        }
    }

    // ========================================================================
    // Macro syntax binding
    // ========================================================================

    fn at_syntax_binding(&self) -> bool {
        self.check_ident()
            && self.peek().text == "syntax"
            && self.peek_next().kind.is_operator(OperatorId::Assign)
            && matches!(
                self.tokens.get(self.pos + 2).map(|t| &t.kind),
                Some(TokenKind::Punct(PunctId::Dollar))
            )
    }

    fn syntax_binding(&mut self) -> PResult<Spanned<Stmt>> {
        let start = self.current_span();
        self.advance(); // syntax
        self.advance(); // =
        let pattern = crate::pattern::parse_syntax_pattern(self)?;
        let span = start.merge(pattern.span);
        self.pending_pattern = Some(pattern.clone());
        Ok(Spanned::new(Stmt::Syntax(pattern), span))
    }
}
