//! AST node types for the Quill language.
//!
//! Every node is wrapped in [`Spanned`] at its use site, so spans compose by
//! construction: a parent's span is the merge of its children's. The tree is
//! a closed sum type; consumers (printer, macro expansion, later phases)
//! dispatch by exhaustive `match`, which keeps additions honest.

use crate::lexer::tokens::{NumberLit, StringLit};
use crate::span::{Span, Spanned};
use quill_core::lang::operators::OperatorId;
use std::fmt;

// ============================================================================
// MODULE AND STATEMENTS
// ============================================================================

/// The root of one parsed source unit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    pub body: Block,
}

/// A sequence of statements sharing one indentation level (or one bracketed
/// region).
pub type Block = Vec<Spanned<Stmt>>;

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `pass`
    Empty,
    Break,
    Continue,
    Return(Option<Spanned<Expr>>),
    Expr(Spanned<Expr>),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Try(TryStmt),
    Def(Def),
    /// `syntax = $(...)` inside a macro body; the pattern is also copied
    /// onto the enclosing [`MacroDef`].
    Syntax(Spanned<crate::pattern::Pattern>),
}

/// `if`/`elif` arms plus an optional `else` block.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub arms: Vec<IfArm>,
    pub orelse: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfArm {
    pub cond: Spanned<Expr>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub cond: Spanned<Expr>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub target: Spanned<Expr>,
    pub iter: Spanned<Expr>,
    pub body: Block,
}

/// `try` with zero or more `catch` arms and an optional `anyway` block that
/// always runs.
#[derive(Debug, Clone, PartialEq)]
pub struct TryStmt {
    pub body: Block,
    pub catches: Vec<CatchArm>,
    pub anyway: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchArm {
    pub ty: Option<Spanned<TypeName>>,
    pub name: Option<Ident>,
    pub body: Block,
}

// ============================================================================
// DEFINITIONS
// ============================================================================

/// Any named definition, with the decorator expressions that preceded it.
#[derive(Debug, Clone, PartialEq)]
pub struct Def {
    pub decorators: Vec<Spanned<Expr>>,
    pub kind: DefKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DefKind {
    Function(FunctionDef),
    Class(ClassDef),
    Module(ModuleDef),
    Enum(EnumDef),
    Macro(MacroDef),
    Var(VarDef),
}

impl DefKind {
    /// The defined name, when the definition has one (anonymous functions
    /// don't).
    pub fn name(&self) -> Option<&Ident> {
        match self {
            DefKind::Function(f) => f.name.as_ref(),
            DefKind::Class(c) => Some(&c.name),
            DefKind::Module(m) => Some(&m.name),
            DefKind::Enum(e) => Some(&e.name),
            DefKind::Macro(m) => Some(&m.name),
            DefKind::Var(v) => Some(&v.name),
        }
    }
}

/// A single (undotted) identifier with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self { name: name.into(), span }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// `def name(params) -> Type: body`; `name` is `None` for anonymous
/// functions used as expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: Option<Ident>,
    pub params: Vec<Param>,
    pub return_type: Option<Spanned<TypeName>>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Regular {
        name: Ident,
        ty: Option<Spanned<TypeName>>,
        default: Option<Spanned<Expr>>,
    },
    /// `*rest`: collects extra positional arguments.
    List { name: Ident, ty: Option<Spanned<TypeName>> },
    /// `**extra`: collects extra named arguments. Must come last.
    Map { name: Ident, ty: Option<Spanned<TypeName>> },
    /// A bare `*`: everything after it is named-only.
    Separator { span: Span },
}

impl Param {
    pub fn name(&self) -> Option<&Ident> {
        match self {
            Param::Regular { name, .. } | Param::List { name, .. } | Param::Map { name, .. } => Some(name),
            Param::Separator { .. } => None,
        }
    }
}

/// `class Name <- Base, key = expr: body`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: Ident,
    pub bases: Vec<BaseSpec>,
    pub body: Block,
}

/// One entry of a `<-` base list: a positional base expression or a
/// `key = expr` configuration pair.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseSpec {
    pub name: Option<Ident>,
    pub value: Spanned<Expr>,
}

/// `module name: body`
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDef {
    pub name: Ident,
    pub body: Block,
}

/// `enum Name <- Base: items`
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDef {
    pub name: Ident,
    pub bases: Vec<BaseSpec>,
    pub items: Vec<EnumItem>,
}

/// One enum item: `Name`, `Name(args)`, or `Name = const` (and the
/// combination of the last two).
#[derive(Debug, Clone, PartialEq)]
pub struct EnumItem {
    pub name: Ident,
    pub args: Vec<Spanned<Expr>>,
    pub value: Option<Spanned<Expr>>,
    pub span: Span,
}

/// `macro name(params): body`, with the pattern captured from the
/// `syntax = $(...)` statement in the body.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroDef {
    pub name: Ident,
    pub params: Vec<Param>,
    pub pattern: Option<Spanned<crate::pattern::Pattern>>,
    pub body: Block,
}

/// `var name: Type = expr`; needs a type, a value, or both.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDef {
    pub name: Ident,
    pub ty: Option<Spanned<TypeName>>,
    pub value: Option<Spanned<Expr>>,
}

// ============================================================================
// EXPRESSIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A dotted name chain like `geo.point.x`; plain identifiers are chains
    /// of length one.
    Name(Vec<Ident>),
    Literal(Literal),
    /// An `f`-string with its interpolations parsed to expressions, in
    /// source order.
    FString { lit: StringLit, parts: Vec<Spanned<Expr>> },
    Await(Box<Spanned<Expr>>),
    Yield(Option<Box<Spanned<Expr>>>),
    /// `{{ ... }}`: a block captured as data for macro use.
    CodeQuote(Block),
    /// `$expr` inside a code quote.
    Unquote(Box<Spanned<Expr>>),
    Unary {
        op: OperatorId,
        operand: Box<Spanned<Expr>>,
    },
    /// Binary operators, assignments included; comparison chains fold left.
    Binary {
        op: OperatorId,
        lhs: Box<Spanned<Expr>>,
        rhs: Box<Spanned<Expr>>,
    },
    /// `then if cond else orelse`
    Ternary {
        then: Box<Spanned<Expr>>,
        cond: Box<Spanned<Expr>>,
        orelse: Box<Spanned<Expr>>,
    },
    Call {
        callee: Box<Spanned<Expr>>,
        args: Vec<Arg>,
    },
    Index {
        base: Box<Spanned<Expr>>,
        index: Box<Spanned<Expr>>,
    },
    Slice {
        base: Box<Spanned<Expr>>,
        start: Option<Box<Spanned<Expr>>>,
        stop: Option<Box<Spanned<Expr>>>,
        step: Option<Box<Spanned<Expr>>>,
    },
    /// Member access on a non-name base, e.g. `f(x).field`. Access on a
    /// plain name folds into [`Expr::Name`] instead.
    Member {
        base: Box<Spanned<Expr>>,
        member: Ident,
    },
    Tuple(Vec<Spanned<Expr>>),
    List(Vec<Spanned<Expr>>),
    Map(Vec<MapEntry>),
    /// Explicit grouping parentheses, kept for faithful re-emission.
    Paren(Box<Spanned<Expr>>),
    /// Anonymous `def (params): body` used as a value.
    Function(Box<FunctionDef>),
    /// Placeholder produced by error recovery.
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    pub key: Spanned<Expr>,
    pub value: Spanned<Expr>,
}

/// One call argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Positional(Spanned<Expr>),
    Named { name: Ident, value: Spanned<Expr> },
    /// `*expr`: splat a list into positional arguments.
    List(Spanned<Expr>),
    /// `**expr`: splat a map into named arguments.
    Map(Spanned<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(NumberLit),
    Str(StringLit),
    Char(char),
    Bool(bool),
    None,
}

// ============================================================================
// TYPE NAMES
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum TypeName {
    /// Dotted type path, e.g. `geo.Point`.
    Simple(Vec<Ident>),
    /// `Base[Arg, ...]`
    Generic {
        base: Box<Spanned<TypeName>>,
        args: Vec<Spanned<TypeName>>,
    },
    /// `[T]`
    Array(Box<Spanned<TypeName>>),
    /// `(A, B) -> R`
    Function {
        params: Vec<Spanned<TypeName>>,
        ret: Box<Spanned<TypeName>>,
    },
    /// `(A, B)`
    Tuple(Vec<Spanned<TypeName>>),
    /// `A | B`
    Union(Vec<Spanned<TypeName>>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    #[test]
    fn def_kind_exposes_its_name() {
        let var = DefKind::Var(VarDef {
            name: Ident::new("x", Span::default()),
            ty: None,
            value: None,
        });
        assert_eq!(var.name().map(|i| i.name.as_str()), Some("x"));

        let anon = DefKind::Function(FunctionDef {
            name: None,
            params: Vec::new(),
            return_type: None,
            body: Vec::new(),
        });
        assert!(anon.name().is_none());
    }

    #[test]
    fn separator_param_has_no_name() {
        assert!(Param::Separator { span: Span::default() }.name().is_none());
    }
}
