/// Type name parsing.
///
/// Grammar: dotted simple names, `Base[Args]` generics, `[T]` arrays,
/// `(A, B)` tuples, `(A, B) -> R` function types, and `A | B` unions binding
/// loosest.
impl<'a> Parser<'a> {
    // ========================================================================
    // Types
    // ========================================================================

    pub(crate) fn type_name(&mut self) -> PResult<Spanned<TypeName>> {
        let first = self.type_atom()?;

        if self.check_op(OperatorId::BitOr) {
            let mut items = vec![first];
            while self.match_op(OperatorId::BitOr) {
                items.push(self.type_atom()?);
            }
            let span = items[0].span.merge(items[items.len() - 1].span);
            return Ok(Spanned::new(TypeName::Union(items), span));
        }

        Ok(first)
    }

    fn type_atom(&mut self) -> PResult<Spanned<TypeName>> {
        let start = self.current_span();

        let mut ty = if self.match_open(BracketKind::Paren) {
            let mut params = Vec::new();
            while !self.check_close(BracketKind::Paren) && !self.is_at_end() {
                params.push(self.type_name()?);
                if !self.match_op(OperatorId::Comma) {
                    break;
                }
            }
            self.expect_close(BracketKind::Paren, "`)` in type")?;

            if self.match_punct(PunctId::Arrow) {
                let ret = self.type_name()?;
                let span = start.merge(ret.span);
                Spanned::new(
                    TypeName::Function {
                        params,
                        ret: Box::new(ret),
                    },
                    span,
                )
            } else {
                Spanned::new(TypeName::Tuple(params), start.merge(self.previous_span()))
            }
        } else if self.match_open(BracketKind::Bracket) {
            // `[T]` is the array of `T`; the empty-args form of a generic
            // (`List[]`) never reaches here because it needs a base first.
            let element = self.type_name()?;
            self.expect_close(BracketKind::Bracket, "`]` after array element type")?;
            Spanned::new(
                TypeName::Array(Box::new(element)),
                start.merge(self.previous_span()),
            )
        } else if self.check_ident() {
            let mut parts = vec![self.expect_ident()?];
            while self.match_punct(PunctId::Dot) {
                parts.push(self.expect_ident()?);
            }
            let span = parts[0].span.merge(parts[parts.len() - 1].span);
            Spanned::new(TypeName::Simple(parts), span)
        } else {
            return Err(Blame::new(
                BlameKind::ExpectedTypeName {
                    found: self.peek().kind.describe(),
                },
                start,
            ));
        };

        // Generic arguments; `Map[str, int][int]` nests.
        while self.match_open(BracketKind::Bracket) {
            let open_span = self.previous_span();
            let mut args = Vec::new();
            while !self.check_close(BracketKind::Bracket) && !self.is_at_end() {
                args.push(self.type_name()?);
                if !self.match_op(OperatorId::Comma) {
                    break;
                }
            }
            self.expect_close(BracketKind::Bracket, "`]` after type arguments")?;
            let span = ty.span.merge(self.previous_span());
            if args.is_empty() {
                self.blames
                    .report(BlameKind::EmptyGenericArguments, open_span.merge(self.previous_span()));
            }
            ty = Spanned::new(
                TypeName::Generic {
                    base: Box::new(ty),
                    args,
                },
                span,
            );
        }

        Ok(ty)
    }
}
