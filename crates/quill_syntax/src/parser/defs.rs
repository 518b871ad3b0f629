/// Definition parsing: `def`, `class`, `module`, `enum`, `macro`, `var`.
impl<'a> Parser<'a> {
    // ========================================================================
    // Definitions
    // ========================================================================

    /// Parse the definition starting at the current keyword. `decorators`
    /// holds any decorator lines already consumed.
    fn definition(&mut self, decorators: Vec<Spanned<Expr>>) -> PResult<Spanned<Stmt>> {
        let start = self.current_span();
        let kind = match &self.peek().kind {
            TokenKind::Keyword(KeywordId::Def) => {
                self.advance();
                // `def (params): ...` without a name is an anonymous function
                // expression; at statement level it still parses, just with
                // no binding.
                let name = if self.check_ident() {
                    Some(self.expect_ident()?)
                } else {
                    None
                };
                DefKind::Function(self.function_signature_and_body(name)?)
            }
            TokenKind::Keyword(KeywordId::Class) => {
                self.advance();
                DefKind::Class(self.class_def()?)
            }
            TokenKind::Keyword(KeywordId::Module) => {
                self.advance();
                DefKind::Module(self.module_def()?)
            }
            TokenKind::Keyword(KeywordId::Enum) => {
                self.advance();
                DefKind::Enum(self.enum_def()?)
            }
            TokenKind::Keyword(KeywordId::Macro) => {
                self.advance();
                DefKind::Macro(self.macro_def()?)
            }
            TokenKind::Keyword(KeywordId::Var) => {
                self.advance();
                DefKind::Var(self.var_def()?)
            }
            _ => return Err(self.expected("a definition keyword")),
        };

        let span = start.merge(self.previous_span());
        Ok(Spanned::new(Stmt::Def(Def { decorators, kind }), span))
    }

    /// Parameters, return type, and body of a function; `def` and the name
    /// are already consumed. Shared with anonymous functions.
    fn function_signature_and_body(&mut self, name: Option<Ident>) -> PResult<FunctionDef> {
        if !self.match_open(BracketKind::Paren) {
            return Err(self.expected("`(` before parameters"));
        }
        let params = self.parameters()?;
        self.expect_close(BracketKind::Paren, "`)` after parameters")?;

        let return_type = if self.match_punct(PunctId::Arrow) {
            Some(self.type_name()?)
        } else {
            None
        };

        let saved = self.ctx;
        self.ctx = ParseContext {
            in_function: true,
            ..ParseContext::default()
        };
        let body = self.block();
        self.ctx = saved;

        Ok(FunctionDef {
            name,
            params,
            return_type,
            body: body?,
        })
    }

    /// Parse a parameter list up to (not including) the closing `)`.
    ///
    /// Enforced here rather than later: unique names, defaults required after
    /// the first defaulted parameter, at most one `*` and one `**`, and `**`
    /// last.
    fn parameters(&mut self) -> PResult<Vec<Param>> {
        let mut params: Vec<Param> = Vec::new();
        let mut seen_default = false;
        let mut seen_list = false;
        let mut seen_map = false;

        while !self.check_close(BracketKind::Paren) && !self.is_at_end() {
            if self.match_op(OperatorId::Power) {
                let name = self.expect_ident()?;
                let ty = self.param_type()?;
                if seen_map {
                    self.blames.report(BlameKind::MultipleMapParameters, name.span);
                }
                self.check_duplicate_param(&params, &name);
                seen_map = true;
                params.push(Param::Map { name, ty });
            } else if self.check_op(OperatorId::Star) {
                let star_span = self.current_span();
                self.advance();
                if self.check_ident() {
                    let name = self.expect_ident()?;
                    let ty = self.param_type()?;
                    if seen_list {
                        self.blames.report(BlameKind::MultipleListParameters, name.span);
                    }
                    if seen_map {
                        self.blames.report(BlameKind::ParameterAfterMapParameter, name.span);
                    }
                    self.check_duplicate_param(&params, &name);
                    seen_list = true;
                    params.push(Param::List { name, ty });
                } else {
                    // Bare `*`: named-only marker.
                    if seen_list {
                        self.blames.report(BlameKind::MultipleListParameters, star_span);
                    }
                    seen_list = true;
                    params.push(Param::Separator { span: star_span });
                }
            } else {
                let name = self.expect_ident()?;
                if seen_map {
                    self.blames.report(BlameKind::ParameterAfterMapParameter, name.span);
                }
                self.check_duplicate_param(&params, &name);
                let ty = self.param_type()?;
                let default = if self.match_op(OperatorId::Assign) {
                    Some(self.condition()?)
                } else {
                    None
                };
                match &default {
                    Some(_) => seen_default = true,
                    None if seen_default => {
                        self.blames
                            .report(BlameKind::ExpectedDefaultParameterValue(name.name.clone()), name.span);
                    }
                    None => {}
                }
                params.push(Param::Regular { name, ty, default });
            }

            if !self.match_op(OperatorId::Comma) {
                break;
            }
        }

        Ok(params)
    }

    fn param_type(&mut self) -> PResult<Option<Spanned<TypeName>>> {
        if self.match_op(OperatorId::Colon) {
            Ok(Some(self.type_name()?))
        } else {
            Ok(None)
        }
    }

    fn check_duplicate_param(&mut self, params: &[Param], name: &Ident) {
        if params
            .iter()
            .filter_map(|p| p.name())
            .any(|n| n.name == name.name)
        {
            self.blames
                .report(BlameKind::DuplicateParameterName(name.name.clone()), name.span);
        }
    }

    fn class_def(&mut self) -> PResult<ClassDef> {
        let name = self.expect_ident()?;
        let bases = self.base_specs()?;
        let body = self.block()?;
        Ok(ClassDef { name, bases, body })
    }

    /// `<- Base, key = expr, ...` after a class or enum name.
    fn base_specs(&mut self) -> PResult<Vec<BaseSpec>> {
        let mut bases = Vec::new();
        if !self.match_punct(PunctId::LeftArrow) {
            return Ok(bases);
        }
        loop {
            if self.check_ident() && self.peek_next().kind.is_operator(OperatorId::Assign) {
                let name = self.expect_ident()?;
                self.advance(); // =
                let value = self.condition()?;
                bases.push(BaseSpec { name: Some(name), value });
            } else {
                let value = self.condition()?;
                bases.push(BaseSpec { name: None, value });
            }
            if !self.match_op(OperatorId::Comma) {
                break;
            }
        }
        Ok(bases)
    }

    fn module_def(&mut self) -> PResult<ModuleDef> {
        let name = self.expect_ident()?;
        let body = self.block()?;
        Ok(ModuleDef { name, body })
    }

    fn enum_def(&mut self) -> PResult<EnumDef> {
        let name = self.expect_ident()?;
        let bases = self.base_specs()?;
        self.expect_op(OperatorId::Colon, "`:` before enum items")?;

        let mut items = Vec::new();
        if self.match_newline() {
            self.skip_newlines();
            if !matches!(self.peek().kind, TokenKind::Indent) {
                return Err(Blame::new(BlameKind::ExpectedBlock, self.current_span()));
            }
            self.advance();
            self.skip_newlines();
            while !matches!(self.peek().kind, TokenKind::Outdent) && !self.is_at_end() {
                items.push(self.enum_item()?);
                // Items separate by comma, newline, or both.
                self.match_op(OperatorId::Comma);
                self.skip_newlines();
            }
            if matches!(self.peek().kind, TokenKind::Outdent) {
                self.advance();
            }
        } else {
            loop {
                items.push(self.enum_item()?);
                if !self.match_op(OperatorId::Comma) {
                    break;
                }
            }
        }

        Ok(EnumDef { name, bases, items })
    }

    /// `Name`, `Name(args)`, `Name = const`, or `Name(args) = const`.
    fn enum_item(&mut self) -> PResult<EnumItem> {
        let name = self.expect_ident()?;
        let start = name.span;

        let mut args = Vec::new();
        if self.match_open(BracketKind::Paren) {
            while !self.check_close(BracketKind::Paren) && !self.is_at_end() {
                args.push(self.condition()?);
                if !self.match_op(OperatorId::Comma) {
                    break;
                }
            }
            self.expect_close(BracketKind::Paren, "`)` after enum item arguments")?;
        }

        let value = if self.match_op(OperatorId::Assign) {
            Some(self.condition()?)
        } else {
            None
        };

        let span = start.merge(self.previous_span());
        Ok(EnumItem { name, args, value, span })
    }

    fn macro_def(&mut self) -> PResult<MacroDef> {
        let name = self.expect_ident()?;
        if !self.match_open(BracketKind::Paren) {
            return Err(self.expected("`(` before macro parameters"));
        }
        let params = self.parameters()?;
        self.expect_close(BracketKind::Paren, "`)` after macro parameters")?;

        // The body may bind `syntax = $(...)`; nested macros each get their
        // own slot. The body runs in a fresh function-like context, since a
        // macro returns its expansion.
        let outer_pattern = self.pending_pattern.take();
        let saved = self.ctx;
        self.ctx = ParseContext {
            in_function: true,
            in_macro: true,
            ..ParseContext::default()
        };
        let body = self.block();
        self.ctx = saved;
        let pattern = self.pending_pattern.take();
        self.pending_pattern = outer_pattern;

        Ok(MacroDef {
            name,
            params,
            pattern,
            body: body?,
        })
    }

    fn var_def(&mut self) -> PResult<VarDef> {
        let name = self.expect_ident()?;
        let ty = self.param_type()?;
        let value = if self.match_op(OperatorId::Assign) {
            Some(self.expression()?)
        } else {
            None
        };
        if ty.is_none() && value.is_none() {
            self.blames
                .report(BlameKind::VariableWithoutTypeOrValue, name.span);
        }
        Ok(VarDef { name, ty, value })
    }
}
