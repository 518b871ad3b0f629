#[cfg(test)]
/// Parser unit tests.
///
/// These tests focus on correctness of specific syntactic forms and on the
/// parser's recovery behavior (avoiding cascaded errors).
mod tests {
    use super::*;
    use crate::lexer;

    fn parse_str(source: &str) -> (Module, Blames) {
        let lexed = lexer::lex(source);
        let mut blames = lexed.blames;
        let (module, parse_blames) = parse(&lexed.tokens);
        blames.absorb(parse_blames);
        (module, blames)
    }

    fn parse_clean(source: &str) -> Module {
        let (module, blames) = parse_str(source);
        assert!(blames.is_empty(), "unexpected blames: {blames:?}");
        module
    }

    fn only_expr(source: &str) -> Spanned<Expr> {
        let module = parse_clean(source);
        assert_eq!(module.body.len(), 1, "expected one statement");
        match &module.body[0].node {
            Stmt::Expr(e) => e.clone(),
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn parse_function() {
        let module = parse_clean("def add(a: int, b: int) -> int:\n    return a + b\n");
        match &module.body[0].node {
            Stmt::Def(def) => match &def.kind {
                DefKind::Function(f) => {
                    assert_eq!(f.name.as_ref().map(|n| n.name.as_str()), Some("add"));
                    assert_eq!(f.params.len(), 2);
                    assert!(f.return_type.is_some());
                    assert_eq!(f.body.len(), 1);
                }
                other => panic!("expected function, got {other:?}"),
            },
            other => panic!("expected def, got {other:?}"),
        }
    }

    #[test]
    fn parse_class_with_bases() {
        let module = parse_clean("class Dog <- Animal, legs = 4:\n    pass\n");
        match &module.body[0].node {
            Stmt::Def(def) => match &def.kind {
                DefKind::Class(c) => {
                    assert_eq!(c.name.name, "Dog");
                    assert_eq!(c.bases.len(), 2);
                    assert!(c.bases[0].name.is_none());
                    assert_eq!(c.bases[1].name.as_ref().map(|n| n.name.as_str()), Some("legs"));
                }
                other => panic!("expected class, got {other:?}"),
            },
            other => panic!("expected def, got {other:?}"),
        }
    }

    #[test]
    fn parse_enum_items() {
        let module = parse_clean("enum Color:\n    Red = 1\n    Green(g)\n    Blue\n");
        match &module.body[0].node {
            Stmt::Def(def) => match &def.kind {
                DefKind::Enum(e) => {
                    assert_eq!(e.items.len(), 3);
                    assert!(e.items[0].value.is_some());
                    assert_eq!(e.items[1].args.len(), 1);
                    assert!(e.items[2].args.is_empty() && e.items[2].value.is_none());
                }
                other => panic!("expected enum, got {other:?}"),
            },
            other => panic!("expected def, got {other:?}"),
        }
    }

    #[test]
    fn var_needs_type_or_value() {
        let (_, blames) = parse_str("var x\n");
        assert!(blames.iter().any(|b| b.kind == BlameKind::VariableWithoutTypeOrValue));

        parse_clean("var y: int\n");
        parse_clean("var z = 1\n");
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expr = only_expr("a + b * c\n");
        match &expr.node {
            Expr::Binary { op: OperatorId::Plus, rhs, .. } => {
                assert!(matches!(rhs.node, Expr::Binary { op: OperatorId::Star, .. }));
            }
            other => panic!("expected `+` at the top, got {other:?}"),
        }
    }

    #[test]
    fn subtraction_is_left_associative() {
        // a - b - c == (a - b) - c
        let expr = only_expr("a - b - c\n");
        match &expr.node {
            Expr::Binary { op: OperatorId::Minus, lhs, rhs } => {
                assert!(matches!(lhs.node, Expr::Binary { op: OperatorId::Minus, .. }));
                assert!(matches!(rhs.node, Expr::Name(_)));
            }
            other => panic!("expected `-` at the top, got {other:?}"),
        }
    }

    #[test]
    fn assignment_is_right_associative() {
        // x = y = 1 == x = (y = 1)
        let expr = only_expr("x = y = 1\n");
        match &expr.node {
            Expr::Binary { op: OperatorId::Assign, lhs, rhs } => {
                assert!(matches!(lhs.node, Expr::Name(_)));
                assert!(matches!(rhs.node, Expr::Binary { op: OperatorId::Assign, .. }));
            }
            other => panic!("expected `=` at the top, got {other:?}"),
        }
    }

    #[test]
    fn power_is_right_associative() {
        let expr = only_expr("a ** b ** c\n");
        match &expr.node {
            Expr::Binary { op: OperatorId::Power, rhs, .. } => {
                assert!(matches!(rhs.node, Expr::Binary { op: OperatorId::Power, .. }));
            }
            other => panic!("expected `**` at the top, got {other:?}"),
        }
    }

    #[test]
    fn comparison_chain_folds_left() {
        let expr = only_expr("a < b < c\n");
        match &expr.node {
            Expr::Binary { op: OperatorId::Lt, lhs, .. } => {
                assert!(matches!(lhs.node, Expr::Binary { op: OperatorId::Lt, .. }));
            }
            other => panic!("expected `<` at the top, got {other:?}"),
        }
    }

    #[test]
    fn not_in_is_one_operator() {
        let expr = only_expr("a not in b\n");
        assert!(matches!(expr.node, Expr::Binary { op: OperatorId::NotIn, .. }));
    }

    #[test]
    fn ternary_expression() {
        let expr = only_expr("a if cond else b\n");
        assert!(matches!(expr.node, Expr::Ternary { .. }));
    }

    #[test]
    fn ternary_can_be_assigned() {
        let expr = only_expr("x = a if cond else b\n");
        match &expr.node {
            Expr::Binary { op: OperatorId::Assign, rhs, .. } => {
                assert!(matches!(rhs.node, Expr::Ternary { .. }));
            }
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn dotted_access_folds_into_a_name_chain() {
        let expr = only_expr("geo.point.x\n");
        match &expr.node {
            Expr::Name(parts) => {
                let names: Vec<_> = parts.iter().map(|p| p.name.as_str()).collect();
                assert_eq!(names, ["geo", "point", "x"]);
            }
            other => panic!("expected name chain, got {other:?}"),
        }
    }

    #[test]
    fn member_access_on_a_call_result_stays_a_member() {
        let expr = only_expr("f(x).field\n");
        assert!(matches!(expr.node, Expr::Member { .. }));
    }

    #[test]
    fn call_argument_rules() {
        parse_clean("f(1, x = 2, *rest, **extra)\n");

        let (_, blames) = parse_str("f(x = 1, 2)\n");
        assert!(blames.iter().any(|b| b.kind == BlameKind::PositionalArgumentAfterNamed));

        let (_, blames) = parse_str("f(x = 1, x = 2)\n");
        assert!(blames.iter().any(|b| matches!(&b.kind, BlameKind::DuplicateArgumentName(n) if n == "x")));
    }

    #[test]
    fn parameter_rules() {
        let (_, blames) = parse_str("def f(a, a):\n    pass\n");
        assert!(blames.iter().any(|b| matches!(&b.kind, BlameKind::DuplicateParameterName(n) if n == "a")));

        let (_, blames) = parse_str("def f(a = 1, b):\n    pass\n");
        assert!(blames.iter().any(|b| matches!(&b.kind, BlameKind::ExpectedDefaultParameterValue(n) if n == "b")));

        let (_, blames) = parse_str("def f(*a, *b):\n    pass\n");
        assert!(blames.iter().any(|b| b.kind == BlameKind::MultipleListParameters));

        let (_, blames) = parse_str("def f(**a, b):\n    pass\n");
        assert!(blames.iter().any(|b| b.kind == BlameKind::ParameterAfterMapParameter));
    }

    #[test]
    fn break_and_continue_context() {
        let (_, blames) = parse_str("break\n");
        assert!(blames.iter().any(|b| b.kind == BlameKind::BreakOutsideLoop));

        parse_clean("while a:\n    break\n");

        // `break` must not escape an `anyway` block.
        let source = "while a:\n    try:\n        pass\n    anyway:\n        break\n";
        let (_, blames) = parse_str(source);
        assert!(blames.iter().any(|b| b.kind == BlameKind::BreakInsideAnyway));

        // A loop opened inside the `anyway` block is fine to break.
        let source = "try:\n    pass\nanyway:\n    while a:\n        continue\n";
        parse_clean(source);
    }

    #[test]
    fn return_and_yield_need_a_function() {
        let (_, blames) = parse_str("return 1\n");
        assert!(blames.iter().any(|b| b.kind == BlameKind::ReturnOutsideFunction));

        let (_, blames) = parse_str("yield 1\n");
        assert!(blames.iter().any(|b| b.kind == BlameKind::YieldOutsideFunction));

        parse_clean("def g():\n    yield 1\n");
    }

    #[test]
    fn try_catch_anyway() {
        let source = "try:\n    work()\ncatch IoError e:\n    log(e)\ncatch:\n    pass\nanyway:\n    close()\n";
        let module = parse_clean(source);
        match &module.body[0].node {
            Stmt::Try(t) => {
                assert_eq!(t.catches.len(), 2);
                assert!(t.catches[0].ty.is_some());
                assert_eq!(t.catches[0].name.as_ref().map(|n| n.name.as_str()), Some("e"));
                assert!(t.catches[1].ty.is_none());
                assert!(t.anyway.is_some());
            }
            other => panic!("expected try, got {other:?}"),
        }
    }

    #[test]
    fn all_four_block_forms_parse() {
        // Indented.
        parse_clean("if a:\n    x = 1\n");
        // Braced.
        parse_clean("if a { x = 1 }\n");
        // Inline.
        parse_clean("if a: x = 1; y = 2\n");
        // Colon before brace: parses, with an Info.
        let (_, blames) = parse_str("if a: { x = 1 }\n");
        assert!(blames.iter().any(|b| b.kind == BlameKind::RedundantColon));
        assert!(!blames.has_errors(), "{blames:?}");
    }

    #[test]
    fn ellipsis_is_a_placeholder_body() {
        let module = parse_clean("def f():\n    ...\n");
        match &module.body[0].node {
            Stmt::Def(def) => match &def.kind {
                DefKind::Function(f) => assert!(matches!(f.body[0].node, Stmt::Empty)),
                other => panic!("expected function, got {other:?}"),
            },
            other => panic!("expected def, got {other:?}"),
        }
    }

    #[test]
    fn decorators_attach_to_the_next_definition() {
        let module = parse_clean("[logged, traced(level)]\ndef f():\n    pass\n");
        match &module.body[0].node {
            Stmt::Def(def) => assert_eq!(def.decorators.len(), 2),
            other => panic!("expected def, got {other:?}"),
        }
    }

    #[test]
    fn decorators_before_a_non_definition_are_an_error() {
        let (_, blames) = parse_str("[logged]\nx = 1\n");
        assert!(blames.iter().any(|b| b.kind == BlameKind::InvalidDecoratorPlacement));
    }

    #[test]
    fn bracket_at_statement_start_can_still_be_a_list() {
        let expr = only_expr("[1, 2, 3].sum()\n");
        assert!(matches!(expr.node, Expr::Call { .. }));
    }

    #[test]
    fn fstring_interpolations_are_parsed() {
        let expr = only_expr("f\"total: {a + b}\"\n");
        match &expr.node {
            Expr::FString { parts, .. } => {
                assert_eq!(parts.len(), 1);
                assert!(matches!(parts[0].node, Expr::Binary { op: OperatorId::Plus, .. }));
            }
            other => panic!("expected f-string, got {other:?}"),
        }
    }

    #[test]
    fn anonymous_function_expression() {
        let expr = only_expr("apply(def (x): return x)\n");
        match &expr.node {
            Expr::Call { args, .. } => match &args[0] {
                Arg::Positional(arg) => assert!(matches!(arg.node, Expr::Function(_))),
                other => panic!("expected positional argument, got {other:?}"),
            },
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn code_quote_and_unquote() {
        let expr = only_expr("{{ var x = $seed }}\n");
        match &expr.node {
            Expr::CodeQuote(body) => {
                assert_eq!(body.len(), 1);
                match &body[0].node {
                    Stmt::Def(def) => match &def.kind {
                        DefKind::Var(v) => {
                            assert!(matches!(v.value.as_ref().map(|e| &e.node), Some(Expr::Unquote(_))));
                        }
                        other => panic!("expected var, got {other:?}"),
                    },
                    other => panic!("expected def, got {other:?}"),
                }
            }
            other => panic!("expected code quote, got {other:?}"),
        }
    }

    #[test]
    fn union_and_generic_types() {
        let module = parse_clean("var x: Map[str, int] | none_type\n");
        match &module.body[0].node {
            Stmt::Def(def) => match &def.kind {
                DefKind::Var(v) => {
                    let ty = v.ty.as_ref().expect("type missing");
                    assert!(matches!(ty.node, TypeName::Union(_)));
                }
                other => panic!("expected var, got {other:?}"),
            },
            other => panic!("expected def, got {other:?}"),
        }

        let (_, blames) = parse_str("var y: List[]\n");
        assert!(blames.iter().any(|b| b.kind == BlameKind::EmptyGenericArguments));
        assert!(!blames.has_errors(), "{blames:?}");
    }

    #[test]
    fn array_types() {
        let var_type = |source: &str| {
            let module = parse_clean(source);
            match &module.body[0].node {
                Stmt::Def(def) => match &def.kind {
                    DefKind::Var(v) => v.ty.clone().expect("type missing"),
                    other => panic!("expected var, got {other:?}"),
                },
                other => panic!("expected def, got {other:?}"),
            }
        };

        assert!(matches!(var_type("var xs: [int]\n").node, TypeName::Array(_)));

        // Nested element types.
        match var_type("var grid: [[f64]]\n").node {
            TypeName::Array(element) => assert!(matches!(element.node, TypeName::Array(_))),
            other => panic!("expected array, got {other:?}"),
        }

        // An array is an ordinary type argument.
        match var_type("var by_name: Map[str, [int]]\n").node {
            TypeName::Generic { args, .. } => {
                assert!(matches!(args[1].node, TypeName::Array(_)));
            }
            other => panic!("expected generic, got {other:?}"),
        }

        let (_, blames) = parse_str("var bad: [\n");
        assert!(blames.has_errors());
    }

    #[test]
    fn slices_and_indexes() {
        let expr = only_expr("xs[1:10:2]\n");
        assert!(matches!(expr.node, Expr::Slice { .. }));

        let expr = only_expr("xs[i]\n");
        assert!(matches!(expr.node, Expr::Index { .. }));

        let expr = only_expr("xs[::2]\n");
        match &expr.node {
            Expr::Slice { start, stop, step, .. } => {
                assert!(start.is_none() && stop.is_none() && step.is_some());
            }
            other => panic!("expected slice, got {other:?}"),
        }
    }

    #[test]
    fn recovery_keeps_later_statements() {
        let (module, blames) = parse_str("var = 1\nx = 2\n");
        assert!(blames.has_errors());
        // The second statement still parsed.
        assert!(module.body.iter().any(|s| matches!(
            &s.node,
            Stmt::Expr(e) if matches!(e.node, Expr::Binary { op: OperatorId::Assign, .. })
        )));
    }

    #[test]
    fn one_error_per_bad_statement() {
        let (_, blames) = parse_str("def f(a b):\n    pass\n");
        assert_eq!(blames.count_of(crate::blame::BlameSeverity::Error), 1, "{blames:?}");
    }
}
