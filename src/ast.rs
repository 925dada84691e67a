//! AST (Abstract Syntax Tree) definitions for the MyPL front end
//!
//! Every node owns its children exclusively (`Box`/`Vec`, no sharing, no
//! cycles), so the whole tree is dropped at once with the [`Program`]. Nodes
//! are built bottom-up during parsing and never mutated afterwards; consumers
//! walk the closed variant sets with exhaustive `match`.
//!
//! Tokens stored in nodes are owned copies, so a node carries its own lexemes
//! and positions. All lists are insertion-ordered and order is significant
//! (parameter order, statement order, operand order).

use crate::token::Token;

/// Top-level program: an ordered sequence of declarations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub decls: Vec<Decl>,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Type(TypeDecl),
    Fun(FunDecl),
}

/// `type ID <field decls> end`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: Token,
    pub vdecls: Vec<VarDeclStmt>,
}

/// `fun (nil | <dtype>) ID(<params>) <stmts> end`
///
/// `return_type` is either a type token (`int`, `double`, ..., or a user type
/// identifier) or the `nil` token itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunDecl {
    pub return_type: Token,
    pub name: Token,
    pub params: Vec<FunParam>,
    pub stmts: Vec<Stmt>,
}

/// One `id: type` function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunParam {
    pub id: Token,
    pub dtype: Token,
}

/// Statement variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    VarDecl(VarDeclStmt),
    Assign(AssignStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Return(ReturnStmt),
    /// A bare function call used as a statement.
    Call(CallExpr),
}

/// `var ID (: <dtype>)? = <expr>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDeclStmt {
    pub id: Token,
    /// Declared type, if the (otherwise inferred) `: type` annotation is
    /// present.
    pub dtype: Option<Token>,
    pub init: Expr,
}

/// `<lvalue> = <expr>` where the lvalue is a dotted identifier path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignStmt {
    /// The dotted path, in source order; always at least one identifier.
    pub lvalue: Vec<Token>,
    pub rhs: Expr,
}

/// One condition/body pair of an `if`/`elseif` chain. The statement list may
/// be empty but is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicIf {
    pub cond: Expr,
    pub stmts: Vec<Stmt>,
}

/// `if ... then ... (elseif ... then ...)* (else ...)? end`
///
/// The `elseif` clauses keep source order; a later evaluator takes the first
/// clause whose condition holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfStmt {
    pub if_part: BasicIf,
    pub else_ifs: Vec<BasicIf>,
    pub else_stmts: Option<Vec<Stmt>>,
}

/// `while <expr> do <stmts> end`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhileStmt {
    pub cond: Expr,
    pub stmts: Vec<Stmt>,
}

/// `for ID = <expr> to <expr> do <stmts> end`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForStmt {
    pub var_id: Token,
    pub start: Expr,
    pub end: Expr,
    pub stmts: Vec<Stmt>,
}

/// `return <expr>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnStmt {
    pub expr: Expr,
}

/// An expression: an optionally `not`-negated first term, optionally chained
/// to the rest of the expression through a single binary operator.
///
/// The chain is flat and fully right-associative: `a + b * c` groups as
/// `a + (b * c)` purely because the operand to the right of `+` is itself a
/// whole expression. There is no precedence table, and consumers rely on this
/// exact shape. The operator and the rest of the chain travel together in one
/// `Option`, so one is present exactly when the other is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub negated: bool,
    pub first: Term,
    pub rest: Option<(Token, Box<Expr>)>,
}

/// The first operand of an [`Expr`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// A plain rvalue.
    Simple(RValue),
    /// A parenthesized (or `not`-wrapped) sub-expression.
    Complex(Box<Expr>),
}

/// Primary values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RValue {
    /// A literal token, including `nil`.
    Simple(Token),
    /// `new ID`: the type name to instantiate.
    New(Token),
    /// A function call.
    Call(CallExpr),
    /// A dotted identifier path, in source order; always at least one
    /// identifier.
    Id(Vec<Token>),
    /// `neg <expr>`.
    Negated(Box<Expr>),
}

/// `ID(<expr>, ...)`, either as an rvalue or as a bare call statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpr {
    pub name: Token,
    pub args: Vec<Expr>,
}
