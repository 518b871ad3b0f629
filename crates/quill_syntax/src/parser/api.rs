/// Parse a token stream into an AST [`Module`].
///
/// This is the main public entrypoint for parsing. It never fails: the
/// returned [`Blames`] carries everything that went wrong, and the module is
/// the best-effort tree built around those problems.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> (Module, Blames) {
    Parser::new(tokens).parse()
}
