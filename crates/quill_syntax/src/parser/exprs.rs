/// Expression parsing methods.
///
/// This chunk implements the expression grammar by precedence climbing over
/// the operator table in `quill_core::lang::operators`: `infix_expr(min)`
/// consumes every infix operator whose precedence is at least `min`,
/// recursing with `prec + 1` for left-associative operators and `prec` for
/// right-associative ones. Assignment is an ordinary right-associative entry
/// at the bottom of the table, so `x = y = 1` nests to the right, and `,` /
/// `;` / `:` sit below the entry precedence so a climb never swallows them.
///
/// Ternary `then if cond else orelse` binds between assignment and `or`.
const TERNARY_PRECEDENCE: u8 = 20;

impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    pub(crate) fn expression(&mut self) -> PResult<Spanned<Expr>> {
        // `yield` binds loosest of all.
        if self.check_keyword(KeywordId::Yield) {
            let start = self.current_span();
            self.advance();
            if !self.ctx.in_function {
                self.blames.report(BlameKind::YieldOutsideFunction, start);
            }
            let value = if self.is_at_expr_start() {
                Some(Box::new(self.expression()?))
            } else {
                None
            };
            let span = value.as_ref().map_or(start, |v| start.merge(v.span));
            return Ok(Spanned::new(Expr::Yield(value), span));
        }
        self.infix_expr(ASSIGN_PRECEDENCE)
    }

    /// An expression that must not contain a top-level assignment or ternary,
    /// e.g. the condition of `if`/`while`.
    fn condition(&mut self) -> PResult<Spanned<Expr>> {
        self.infix_expr(TERNARY_PRECEDENCE + 1)
    }

    fn infix_expr(&mut self, min_prec: u8) -> PResult<Spanned<Expr>> {
        let mut left = self.unary_expr()?;

        loop {
            // `then if cond else orelse`
            if min_prec <= TERNARY_PRECEDENCE && self.check_keyword(KeywordId::If) {
                self.advance();
                let cond = self.infix_expr(TERNARY_PRECEDENCE + 1)?;
                self.expect_keyword(KeywordId::Else, "`else` of a conditional expression")?;
                let orelse = self.infix_expr(TERNARY_PRECEDENCE)?;
                let span = left.span.merge(orelse.span);
                left = Spanned::new(
                    Expr::Ternary {
                        then: Box::new(left),
                        cond: Box::new(cond),
                        orelse: Box::new(orelse),
                    },
                    span,
                );
                continue;
            }

            let Some(op) = self.peek_infix_operator() else { break };
            let info = operators::info_for(op);
            if info.precedence < min_prec {
                break;
            }

            // `not in` is spelled as two tokens.
            if op == OperatorId::NotIn {
                self.advance();
            }
            self.advance();

            let next_min = match info.associativity {
                Associativity::LeftToRight => info.precedence + 1,
                Associativity::RightToLeft => info.precedence,
            };
            let right = self.infix_expr(next_min)?;
            let span = left.span.merge(right.span);
            // Left-associative folding happens in this loop, so comparison
            // chains like `a < b < c` nest on the left.
            left = Spanned::new(
                Expr::Binary {
                    op,
                    lhs: Box::new(left),
                    rhs: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    /// The infix operator at the current position, if any. Composes `not in`
    /// and filters out prefix-only operators.
    fn peek_infix_operator(&self) -> Option<OperatorId> {
        let TokenKind::Operator(id) = &self.peek().kind else {
            return None;
        };
        let id = *id;
        if id == OperatorId::Not && self.peek_next().kind.is_operator(OperatorId::In) {
            return Some(OperatorId::NotIn);
        }
        let info = operators::info_for(id);
        (info.side == InputSide::Both).then_some(id)
    }

    fn unary_expr(&mut self) -> PResult<Spanned<Expr>> {
        if self.check_keyword(KeywordId::Await) {
            let start = self.current_span();
            self.advance();
            let operand = self.unary_expr()?;
            let span = start.merge(operand.span);
            return Ok(Spanned::new(Expr::Await(Box::new(operand)), span));
        }

        if let TokenKind::Operator(id) = &self.peek().kind {
            let id = *id;
            if operators::can_prefix(id) {
                let start = self.current_span();
                self.advance();
                // `not` reaches across comparisons (`not a == b` negates the
                // comparison); the tighter prefixes take just the operand.
                let operand = if id == OperatorId::Not {
                    self.infix_expr(operators::info_for(id).precedence)?
                } else {
                    self.unary_expr()?
                };
                let span = start.merge(operand.span);
                return Ok(Spanned::new(
                    Expr::Unary {
                        op: id,
                        operand: Box::new(operand),
                    },
                    span,
                ));
            }
        }

        self.postfix_expr()
    }

    fn postfix_expr(&mut self) -> PResult<Spanned<Expr>> {
        let mut expr = self.primary()?;

        loop {
            if self.match_open(BracketKind::Paren) {
                let args = self.call_args()?;
                self.expect_close(BracketKind::Paren, "`)` after arguments")?;
                let span = expr.span.merge(self.previous_span());
                expr = Spanned::new(
                    Expr::Call {
                        callee: Box::new(expr),
                        args,
                    },
                    span,
                );
            } else if self.match_open(BracketKind::Bracket) {
                let result = self.index_or_slice()?;
                self.expect_close(BracketKind::Bracket, "`]` after index")?;
                let span = expr.span.merge(self.previous_span());
                expr = match result {
                    IndexOrSlice::Index(index) => Spanned::new(
                        Expr::Index {
                            base: Box::new(expr),
                            index: Box::new(index),
                        },
                        span,
                    ),
                    IndexOrSlice::Slice { start, stop, step } => Spanned::new(
                        Expr::Slice {
                            base: Box::new(expr),
                            start: start.map(Box::new),
                            stop: stop.map(Box::new),
                            step: step.map(Box::new),
                        },
                        span,
                    ),
                };
            } else if self.match_punct(PunctId::Dot) {
                let member = self.expect_ident()?;
                let span = expr.span.merge(member.span);
                // Access on a plain name extends the dotted chain; anything
                // else becomes a member node.
                expr = match expr.node {
                    Expr::Name(mut parts) => {
                        parts.push(member);
                        Spanned::new(Expr::Name(parts), span)
                    }
                    node => Spanned::new(
                        Expr::Member {
                            base: Box::new(Spanned::new(node, expr.span)),
                            member,
                        },
                        span,
                    ),
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parse index or slice expression inside brackets.
    /// Handles: `[expr]`, `[start:stop]`, `[start:stop:step]`, and every
    /// omitted-part combination.
    fn index_or_slice(&mut self) -> PResult<IndexOrSlice> {
        let start = if self.check_op(OperatorId::Colon) {
            None
        } else {
            Some(self.condition()?)
        };

        if !self.match_op(OperatorId::Colon) {
            return match start {
                Some(index) => Ok(IndexOrSlice::Index(index)),
                None => Err(self.expected("an index expression")),
            };
        }

        let stop = if self.check_op(OperatorId::Colon) || self.check_close(BracketKind::Bracket) {
            None
        } else {
            Some(self.condition()?)
        };

        let step = if self.match_op(OperatorId::Colon) {
            if self.check_close(BracketKind::Bracket) {
                None
            } else {
                Some(self.condition()?)
            }
        } else {
            None
        };

        Ok(IndexOrSlice::Slice { start, stop, step })
    }

    /// Parse the argument list of a call (the opening `(` is consumed).
    fn call_args(&mut self) -> PResult<Vec<Arg>> {
        let mut args = Vec::new();
        let mut seen_named = false;
        let mut names: Vec<String> = Vec::new();

        if self.check_close(BracketKind::Paren) {
            return Ok(args);
        }

        loop {
            if self.match_op(OperatorId::Power) {
                args.push(Arg::Map(self.condition()?));
            } else if self.match_op(OperatorId::Star) {
                args.push(Arg::List(self.condition()?));
            } else if self.check_ident() && self.peek_next().kind.is_operator(OperatorId::Assign) {
                let name = self.expect_ident()?;
                self.advance(); // =
                let value = self.condition()?;
                if names.iter().any(|n| n == &name.name) {
                    self.blames
                        .report(BlameKind::DuplicateArgumentName(name.name.clone()), name.span);
                }
                names.push(name.name.clone());
                seen_named = true;
                args.push(Arg::Named { name, value });
            } else {
                let value = self.condition()?;
                if seen_named {
                    self.blames
                        .report(BlameKind::PositionalArgumentAfterNamed, value.span);
                }
                args.push(Arg::Positional(value));
            }

            if !self.match_op(OperatorId::Comma) {
                break;
            }
            // Trailing comma.
            if self.check_close(BracketKind::Paren) {
                break;
            }
        }

        Ok(args)
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn primary(&mut self) -> PResult<Spanned<Expr>> {
        let span = self.current_span();

        match &self.peek().kind {
            TokenKind::Ident => {
                let token = self.advance();
                let ident = Ident::new(token.text.clone(), token.span);
                Ok(Spanned::new(Expr::Name(vec![ident]), span))
            }
            TokenKind::Number(lit) => {
                let lit = lit.clone();
                self.advance();
                Ok(Spanned::new(Expr::Literal(Literal::Number(lit)), span))
            }
            TokenKind::Char(lit) => {
                let value = lit.value;
                self.advance();
                Ok(Spanned::new(Expr::Literal(Literal::Char(value)), span))
            }
            TokenKind::Str(lit) => {
                let lit = lit.clone();
                self.advance();
                if lit.is_interpolated {
                    let expr = self.fstring_expr(lit);
                    Ok(Spanned::new(expr, span))
                } else {
                    Ok(Spanned::new(Expr::Literal(Literal::Str(lit)), span))
                }
            }
            TokenKind::Keyword(KeywordId::True) => {
                self.advance();
                Ok(Spanned::new(Expr::Literal(Literal::Bool(true)), span))
            }
            TokenKind::Keyword(KeywordId::False) => {
                self.advance();
                Ok(Spanned::new(Expr::Literal(Literal::Bool(false)), span))
            }
            TokenKind::Keyword(KeywordId::None) => {
                self.advance();
                Ok(Spanned::new(Expr::Literal(Literal::None), span))
            }
            TokenKind::Keyword(KeywordId::Def) => self.anonymous_function(),
            TokenKind::Open(BracketKind::Paren) => self.paren_or_tuple(),
            TokenKind::Open(BracketKind::Bracket) => self.list_literal(),
            TokenKind::Open(BracketKind::Brace) => self.map_literal(),
            TokenKind::Open(BracketKind::Quote) => self.code_quote(),
            TokenKind::Punct(PunctId::Dollar) => {
                self.advance();
                let operand = self.postfix_expr()?;
                let full = span.merge(operand.span);
                Ok(Spanned::new(Expr::Unquote(Box::new(operand)), full))
            }
            _ => Err(Blame::new(
                BlameKind::ExpectedExpression {
                    found: self.peek().kind.describe(),
                },
                span,
            )),
        }
    }

    /// Parse each interpolation of an `f`-string into an expression.
    fn fstring_expr(&mut self, lit: StringLit) -> Expr {
        let mut parts = Vec::new();
        for interp in &lit.interpolations {
            let (expr, blames) = parse_embedded(&interp.tokens, interp.span);
            self.blames.absorb(blames);
            parts.push(expr);
        }
        Expr::FString { lit, parts }
    }

    fn paren_or_tuple(&mut self) -> PResult<Spanned<Expr>> {
        let start = self.current_span();
        self.advance(); // (

        // `()` is the empty tuple.
        if self.check_close(BracketKind::Paren) {
            self.advance();
            return Ok(Spanned::new(Expr::Tuple(Vec::new()), start.merge(self.previous_span())));
        }

        let first = self.expression()?;

        if self.match_op(OperatorId::Comma) {
            let mut items = vec![first];
            while !self.check_close(BracketKind::Paren) {
                items.push(self.expression()?);
                if !self.match_op(OperatorId::Comma) {
                    break;
                }
            }
            self.expect_close(BracketKind::Paren, "`)` after tuple")?;
            return Ok(Spanned::new(Expr::Tuple(items), start.merge(self.previous_span())));
        }

        self.expect_close(BracketKind::Paren, "`)`")?;
        let span = start.merge(self.previous_span());
        if matches!(first.node, Expr::Paren(_)) {
            self.blames.report(BlameKind::RedundantParentheses, span);
        }
        Ok(Spanned::new(Expr::Paren(Box::new(first)), span))
    }

    fn list_literal(&mut self) -> PResult<Spanned<Expr>> {
        let start = self.current_span();
        self.advance(); // [
        let mut items = Vec::new();
        while !self.check_close(BracketKind::Bracket) && !self.is_at_end() {
            items.push(self.expression()?);
            if !self.match_op(OperatorId::Comma) {
                break;
            }
        }
        self.expect_close(BracketKind::Bracket, "`]` after list items")?;
        Ok(Spanned::new(Expr::List(items), start.merge(self.previous_span())))
    }

    fn map_literal(&mut self) -> PResult<Spanned<Expr>> {
        let start = self.current_span();
        self.advance(); // {
        let mut entries = Vec::new();
        self.skip_newlines();
        while !self.check_close(BracketKind::Brace) && !self.is_at_end() {
            let key = self.condition()?;
            self.expect_op(OperatorId::Colon, "`:` between map key and value")?;
            let value = self.condition()?;
            entries.push(MapEntry { key, value });
            self.skip_newlines();
            if !self.match_op(OperatorId::Comma) {
                break;
            }
            self.skip_newlines();
        }
        self.skip_newlines();
        self.expect_close(BracketKind::Brace, "`}` after map entries")?;
        Ok(Spanned::new(Expr::Map(entries), start.merge(self.previous_span())))
    }

    /// `{{ statements }}`: a block captured as data.
    fn code_quote(&mut self) -> PResult<Spanned<Expr>> {
        let start = self.current_span();
        self.advance(); // {{
        let mut body = Vec::new();
        self.skip_separators();
        while !self.check_close(BracketKind::Quote) && !self.is_at_end() {
            match self.statement() {
                Ok(stmt) => body.push(stmt),
                Err(blame) => {
                    self.blames.push(blame);
                    self.synchronize();
                }
            }
            self.skip_separators();
        }
        self.expect_close(BracketKind::Quote, "`}}` after quoted code")?;
        Ok(Spanned::new(Expr::CodeQuote(body), start.merge(self.previous_span())))
    }

    /// `def (params) -> Type: body` in expression position.
    fn anonymous_function(&mut self) -> PResult<Spanned<Expr>> {
        let start = self.current_span();
        self.advance(); // def
        let def = self.function_signature_and_body(None)?;
        let span = start.merge(self.previous_span());
        Ok(Spanned::new(Expr::Function(Box::new(def)), span))
    }
}

/// Parse a standalone token slice (an f-string interpolation) into one
/// expression. The slice has no `End` terminator, so one is appended.
fn parse_embedded(tokens: &[Token], span: Span) -> (Spanned<Expr>, Blames) {
    let end = Token::new(TokenKind::End, "", Span::point(span.end));
    let mut owned: Vec<Token> = tokens.to_vec();
    owned.push(end);

    let mut parser = Parser::new(&owned);
    match parser.expression() {
        Ok(expr) => {
            if !parser.is_at_end() {
                let blame = parser.expected("end of interpolation");
                parser.blames.push(blame);
            }
            (expr, parser.blames)
        }
        Err(blame) => {
            parser.blames.push(blame);
            (Spanned::new(Expr::Error, span), parser.blames)
        }
    }
}
