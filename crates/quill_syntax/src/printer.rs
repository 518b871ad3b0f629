//! Canonical re-emission of parsed code.
//!
//! `print` turns a [`Module`] back into dialect text in one canonical shape:
//! four-space indented blocks, single spaces around binary operators, and
//! literals reconstructed from their structured payloads. The printer is a
//! closed exhaustive match over the AST, so a new node cannot be added
//! without deciding how it prints.
//!
//! The output is designed to be a fixed point: parsing printed text and
//! printing it again yields the same text.

use crate::ast::*;
use crate::lexer::tokens::{NumberLit, StringLit};
use crate::span::Spanned;
use quill_core::lang::operators::{self, OperatorId};

const INDENT: &str = "    ";

/// Render a module as canonical source text.
pub fn print(module: &Module) -> String {
    let mut printer = Printer::default();
    for stmt in &module.body {
        printer.stmt(&stmt.node);
    }
    printer.out
}

/// Render one expression (used by diagnostics and tests).
pub fn print_expr(expr: &Expr) -> String {
    let mut printer = Printer::default();
    printer.expr(expr);
    printer.out
}

#[derive(Default)]
struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn line_start(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
    }

    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Empty => {
                self.line_start();
                self.push("pass\n");
            }
            Stmt::Break => {
                self.line_start();
                self.push("break\n");
            }
            Stmt::Continue => {
                self.line_start();
                self.push("continue\n");
            }
            Stmt::Return(value) => {
                self.line_start();
                self.push("return");
                if let Some(value) = value {
                    self.push(" ");
                    self.expr(&value.node);
                }
                self.push("\n");
            }
            Stmt::Expr(expr) => {
                self.line_start();
                self.expr(&expr.node);
                self.push("\n");
            }
            Stmt::If(stmt) => self.if_stmt(stmt),
            Stmt::While(stmt) => {
                self.line_start();
                self.push("while ");
                self.expr(&stmt.cond.node);
                self.block(&stmt.body);
            }
            Stmt::For(stmt) => {
                self.line_start();
                self.push("for ");
                self.expr(&stmt.target.node);
                self.push(" in ");
                self.expr(&stmt.iter.node);
                self.block(&stmt.body);
            }
            Stmt::Try(stmt) => self.try_stmt(stmt),
            Stmt::Def(def) => self.def(def),
            Stmt::Syntax(pattern) => {
                self.line_start();
                self.push(&format!("syntax = $({})\n", pattern.node));
            }
        }
    }

    fn if_stmt(&mut self, stmt: &IfStmt) {
        for (i, arm) in stmt.arms.iter().enumerate() {
            self.line_start();
            self.push(if i == 0 { "if " } else { "elif " });
            self.expr(&arm.cond.node);
            self.block(&arm.body);
        }
        if let Some(orelse) = &stmt.orelse {
            self.line_start();
            self.push("else");
            self.block(orelse);
        }
    }

    fn try_stmt(&mut self, stmt: &TryStmt) {
        self.line_start();
        self.push("try");
        self.block(&stmt.body);
        for arm in &stmt.catches {
            self.line_start();
            self.push("catch");
            if let Some(ty) = &arm.ty {
                self.push(" ");
                self.type_name(&ty.node);
            }
            if let Some(name) = &arm.name {
                self.push(" ");
                self.push(&name.name);
            }
            self.block(&arm.body);
        }
        if let Some(anyway) = &stmt.anyway {
            self.line_start();
            self.push("anyway");
            self.block(anyway);
        }
    }

    /// `: NEWLINE INDENT ... OUTDENT`, the canonical block form. Empty
    /// bodies print a `pass` so the result stays parseable.
    fn block(&mut self, body: &Block) {
        self.push(":\n");
        self.indent += 1;
        if body.is_empty() {
            self.line_start();
            self.push("pass\n");
        }
        for stmt in body {
            self.stmt(&stmt.node);
        }
        self.indent -= 1;
    }

    // ========================================================================
    // Definitions
    // ========================================================================

    fn def(&mut self, def: &Def) {
        if !def.decorators.is_empty() {
            self.line_start();
            self.push("[");
            for (i, decorator) in def.decorators.iter().enumerate() {
                if i > 0 {
                    self.push(", ");
                }
                self.expr(&decorator.node);
            }
            self.push("]\n");
        }
        match &def.kind {
            DefKind::Function(f) => {
                self.line_start();
                self.push("def ");
                if let Some(name) = &f.name {
                    self.push(&name.name);
                }
                self.signature(f);
                self.block(&f.body);
            }
            DefKind::Class(c) => {
                self.line_start();
                self.push("class ");
                self.push(&c.name.name);
                self.bases(&c.bases);
                self.block(&c.body);
            }
            DefKind::Module(m) => {
                self.line_start();
                self.push("module ");
                self.push(&m.name.name);
                self.block(&m.body);
            }
            DefKind::Enum(e) => {
                self.line_start();
                self.push("enum ");
                self.push(&e.name.name);
                self.bases(&e.bases);
                self.push(":\n");
                self.indent += 1;
                for item in &e.items {
                    self.line_start();
                    self.push(&item.name.name);
                    if !item.args.is_empty() {
                        self.push("(");
                        self.comma_exprs(&item.args);
                        self.push(")");
                    }
                    if let Some(value) = &item.value {
                        self.push(" = ");
                        self.expr(&value.node);
                    }
                    self.push("\n");
                }
                self.indent -= 1;
            }
            DefKind::Macro(m) => {
                self.line_start();
                self.push("macro ");
                self.push(&m.name.name);
                self.params(&m.params);
                self.block(&m.body);
            }
            DefKind::Var(v) => {
                self.line_start();
                self.push("var ");
                self.push(&v.name.name);
                if let Some(ty) = &v.ty {
                    self.push(": ");
                    self.type_name(&ty.node);
                }
                if let Some(value) = &v.value {
                    self.push(" = ");
                    self.expr(&value.node);
                }
                self.push("\n");
            }
        }
    }

    fn signature(&mut self, f: &FunctionDef) {
        self.params(&f.params);
        if let Some(ret) = &f.return_type {
            self.push(" -> ");
            self.type_name(&ret.node);
        }
    }

    fn params(&mut self, params: &[Param]) {
        self.push("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            match param {
                Param::Regular { name, ty, default } => {
                    self.push(&name.name);
                    if let Some(ty) = ty {
                        self.push(": ");
                        self.type_name(&ty.node);
                    }
                    if let Some(default) = default {
                        self.push(" = ");
                        self.expr(&default.node);
                    }
                }
                Param::List { name, ty } => {
                    self.push("*");
                    self.push(&name.name);
                    if let Some(ty) = ty {
                        self.push(": ");
                        self.type_name(&ty.node);
                    }
                }
                Param::Map { name, ty } => {
                    self.push("**");
                    self.push(&name.name);
                    if let Some(ty) = ty {
                        self.push(": ");
                        self.type_name(&ty.node);
                    }
                }
                Param::Separator { .. } => self.push("*"),
            }
        }
        self.push(")");
    }

    fn bases(&mut self, bases: &[BaseSpec]) {
        if bases.is_empty() {
            return;
        }
        self.push(" <- ");
        for (i, base) in bases.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            if let Some(name) = &base.name {
                self.push(&name.name);
                self.push(" = ");
            }
            self.expr(&base.value.node);
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Name(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        self.push(".");
                    }
                    self.push(&part.name);
                }
            }
            Expr::Literal(lit) => self.literal(lit),
            Expr::FString { lit, .. } => self.string_lit(lit),
            Expr::Await(operand) => {
                self.push("await ");
                self.expr(&operand.node);
            }
            Expr::Yield(value) => {
                self.push("yield");
                if let Some(value) = value {
                    self.push(" ");
                    self.expr(&value.node);
                }
            }
            Expr::CodeQuote(body) => {
                self.push("{{ ");
                for (i, stmt) in body.iter().enumerate() {
                    if i > 0 {
                        self.push("; ");
                    }
                    self.inline_stmt(&stmt.node);
                }
                self.push(" }}");
            }
            Expr::Unquote(operand) => {
                self.push("$");
                self.expr(&operand.node);
            }
            Expr::Unary { op, operand } => {
                let spelling = operators::info_for(*op).spelling;
                self.push(spelling);
                if *op == OperatorId::Not {
                    self.push(" ");
                }
                self.expr(&operand.node);
            }
            Expr::Binary { op, lhs, rhs } => {
                self.expr(&lhs.node);
                self.push(" ");
                self.push(operators::info_for(*op).spelling);
                self.push(" ");
                self.expr(&rhs.node);
            }
            Expr::Ternary { then, cond, orelse } => {
                self.expr(&then.node);
                self.push(" if ");
                self.expr(&cond.node);
                self.push(" else ");
                self.expr(&orelse.node);
            }
            Expr::Call { callee, args } => {
                self.expr(&callee.node);
                self.push("(");
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    match arg {
                        Arg::Positional(value) => self.expr(&value.node),
                        Arg::Named { name, value } => {
                            self.push(&name.name);
                            self.push(" = ");
                            self.expr(&value.node);
                        }
                        Arg::List(value) => {
                            self.push("*");
                            self.expr(&value.node);
                        }
                        Arg::Map(value) => {
                            self.push("**");
                            self.expr(&value.node);
                        }
                    }
                }
                self.push(")");
            }
            Expr::Index { base, index } => {
                self.expr(&base.node);
                self.push("[");
                self.expr(&index.node);
                self.push("]");
            }
            Expr::Slice { base, start, stop, step } => {
                self.expr(&base.node);
                self.push("[");
                if let Some(start) = start {
                    self.expr(&start.node);
                }
                self.push(":");
                if let Some(stop) = stop {
                    self.expr(&stop.node);
                }
                if let Some(step) = step {
                    self.push(":");
                    self.expr(&step.node);
                }
                self.push("]");
            }
            Expr::Member { base, member } => {
                self.expr(&base.node);
                self.push(".");
                self.push(&member.name);
            }
            Expr::Tuple(items) => {
                self.push("(");
                self.comma_exprs(items);
                if items.len() == 1 {
                    self.push(",");
                }
                self.push(")");
            }
            Expr::List(items) => {
                self.push("[");
                self.comma_exprs(items);
                self.push("]");
            }
            Expr::Map(entries) => {
                self.push("{");
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.expr(&entry.key.node);
                    self.push(": ");
                    self.expr(&entry.value.node);
                }
                self.push("}");
            }
            Expr::Paren(inner) => {
                self.push("(");
                self.expr(&inner.node);
                self.push(")");
            }
            Expr::Function(f) => {
                // Anonymous functions print with a braced body so they stay
                // expressions.
                self.push("def ");
                if let Some(name) = &f.name {
                    self.push(&name.name);
                }
                self.signature(f);
                self.push(" { ");
                for (i, stmt) in f.body.iter().enumerate() {
                    if i > 0 {
                        self.push("; ");
                    }
                    self.inline_stmt(&stmt.node);
                }
                self.push(" }");
            }
            Expr::Error => self.push("<error>"),
        }
    }

    /// A statement rendered without line structure, for bodies embedded in
    /// expressions.
    fn inline_stmt(&mut self, stmt: &Stmt) {
        let saved = std::mem::take(&mut self.out);
        let saved_indent = std::mem::take(&mut self.indent);
        self.stmt(stmt);
        let rendered = std::mem::replace(&mut self.out, saved);
        self.indent = saved_indent;
        // Collapse the line-oriented rendering onto one line.
        let flat = rendered
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("; ");
        self.push(&flat);
    }

    fn comma_exprs(&mut self, items: &[Spanned<Expr>]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.expr(&item.node);
        }
    }

    // ========================================================================
    // Literals and types
    // ========================================================================

    fn literal(&mut self, lit: &Literal) {
        match lit {
            Literal::Number(n) => self.number_lit(n),
            Literal::Str(s) => self.string_lit(s),
            Literal::Char(c) => {
                self.push("`");
                match c {
                    '\n' => self.push("\\n"),
                    '\t' => self.push("\\t"),
                    '\r' => self.push("\\r"),
                    '\0' => self.push("\\0"),
                    '\\' => self.push("\\\\"),
                    '`' => self.push("\\`"),
                    other => self.out.push(*other),
                }
                self.push("`");
            }
            Literal::Bool(true) => self.push("true"),
            Literal::Bool(false) => self.push("false"),
            Literal::None => self.push("none"),
        }
    }

    fn number_lit(&mut self, n: &NumberLit) {
        match n.radix {
            16 => self.push("0x"),
            8 => self.push("0o"),
            2 => self.push("0b"),
            _ => {}
        }
        self.push(&n.value);
        if let Some(exp) = n.exponent {
            self.push(&format!("e{exp}"));
        }
        if let Some(width) = n.width {
            let letter = if n.is_float {
                'f'
            } else if n.unsigned {
                'u'
            } else {
                'i'
            };
            self.push(&format!("{letter}{width}"));
        }
        if n.is_imaginary {
            self.push("j");
        }
    }

    fn string_lit(&mut self, s: &StringLit) {
        if s.is_interpolated {
            self.push("f");
        }
        if s.is_raw {
            self.push("r");
        }
        let quotes = if s.quote_count == 3 {
            format!("{0}{0}{0}", s.quote)
        } else {
            s.quote.to_string()
        };
        self.push(&quotes);
        self.push(&s.raw);
        self.push(&quotes);
    }

    fn type_name(&mut self, ty: &TypeName) {
        match ty {
            TypeName::Simple(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        self.push(".");
                    }
                    self.push(&part.name);
                }
            }
            TypeName::Generic { base, args } => {
                self.type_name(&base.node);
                self.push("[");
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.type_name(&arg.node);
                }
                self.push("]");
            }
            TypeName::Array(element) => {
                self.push("[");
                self.type_name(&element.node);
                self.push("]");
            }
            TypeName::Function { params, ret } => {
                self.push("(");
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.type_name(&param.node);
                }
                self.push(") -> ");
                self.type_name(&ret.node);
            }
            TypeName::Tuple(items) => {
                self.push("(");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.type_name(&item.node);
                }
                self.push(")");
            }
            TypeName::Union(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.push(" | ");
                    }
                    self.type_name(&item.node);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer, parser};

    fn roundtrip(source: &str) -> String {
        let lexed = lexer::lex(source);
        let (module, blames) = parser::parse(&lexed.tokens);
        assert!(!lexed.blames.has_errors(), "lex: {:?}", lexed.blames);
        assert!(!blames.has_errors(), "parse: {blames:?}");
        print(&module)
    }

    #[test]
    fn printed_text_is_a_fixed_point() {
        let sources = [
            "def add(a: int, b: int) -> int:\n    return a + b\n",
            "class Dog <- Animal, legs = 4:\n    var sound = \"woof\"\n",
            "while a < b:\n    a += 1\n",
            "for x, y in pairs:\n    emit(x, y)\n",
            "try:\n    work()\ncatch IoError e:\n    log(e)\nanyway:\n    close()\n",
            "if a:\n    x = 1\nelif b:\n    x = 2\nelse:\n    x = 3\n",
            "enum Color:\n    Red = 1\n    Green(g)\n    Blue\n",
            "x = a if cond else b\n",
            "xs[1:10:2]\n",
            "var m = {1: \"one\", 2: \"two\"}\n",
            "var grid: [[f64]] = make_grid()\n",
            "def lookup(table: Map[str, [int]], key: str) -> [int]:\n    return table[key]\n",
            "[logged]\ndef f():\n    pass\n",
        ];
        for source in sources {
            let once = roundtrip(source);
            let twice = roundtrip(&once);
            assert_eq!(once, twice, "not a fixed point for {source:?}");
        }
    }

    #[test]
    fn braced_and_inline_blocks_normalize_to_indentation() {
        assert_eq!(roundtrip("if a { x = 1 }\n"), "if a:\n    x = 1\n");
        assert_eq!(roundtrip("if a: x = 1\n"), "if a:\n    x = 1\n");
    }

    #[test]
    fn operators_print_with_canonical_spacing() {
        assert_eq!(roundtrip("x=1+2*3\n"), "x = 1 + 2 * 3\n");
        assert_eq!(roundtrip("a not in b\n"), "a not in b\n");
    }

    #[test]
    fn number_literals_keep_radix_and_width() {
        assert_eq!(roundtrip("x = 0x1689ABCDEFi64\n"), "x = 0x1689ABCDEFi64\n");
        assert_eq!(roundtrip("y = 2e-3\n"), "y = 2e-3\n");
        assert_eq!(roundtrip("z = 3.5j\n"), "z = 3.5j\n");
    }

    #[test]
    fn strings_reprint_raw_content() {
        assert_eq!(roundtrip("s = \"a\\tb\"\n"), "s = \"a\\tb\"\n");
        assert_eq!(roundtrip("t = f\"v: {x + 1}\"\n"), "t = f\"v: {x + 1}\"\n");
    }

    #[test]
    fn macro_with_pattern_reprints() {
        let source = "macro unless(cond, body):\n    syntax = $(\"unless\", expression, block)\n    pass\n";
        let once = roundtrip(source);
        assert!(once.contains("syntax = $(\"unless\", expression, block)"));
        let twice = roundtrip(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_bodies_print_pass() {
        assert_eq!(roundtrip("def f():\n    pass\n"), "def f():\n    pass\n");
    }

    #[test]
    fn code_quote_prints_inline() {
        let printed = roundtrip("q = {{ var x = $seed }}\n");
        assert_eq!(printed, "q = {{ var x = $seed }}\n");
    }
}
