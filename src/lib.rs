//! # Introduction
//!
//! Front end for the MyPL teaching language: a lazy tokenizer and a strict
//! LL(1) recursive-descent parser that turn source text into an immutable
//! abstract syntax tree.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST
//! ```
//!
//! 1. [`lexer`] — pull-based tokenization; the parser requests one
//!    [`token::Token`] at a time and never looks further ahead.
//! 2. [`parser`] — recursive descent, one method per grammar nonterminal,
//!    building the [`ast::Program`] bottom-up.
//! 3. [`ast`] — single-owner tree of sum types; read-only once built and
//!    freely shareable for traversal.
//!
//! Both phases abort on the first failure with a structured [`error::Error`]
//! carrying phase, message, line, and column. Later phases (printing,
//! semantic analysis, evaluation) are external consumers of the AST and not
//! part of this crate.
//!
//! ## The language
//!
//! Record types (`type ... end`), functions (`fun ... end`), `var`
//! declarations with optional type annotations, dotted-path assignment,
//! `if`/`elseif`/`else`, `while` and `for`/`to` loops, `return`, function
//! calls, and `new` allocation. Expressions chain binary operators flat and
//! fully right-associatively; there is no precedence table.
//!
//! ```text
//! type Point
//!   var x: int = 0
//!   var y: int = 0
//! end
//!
//! fun int main()
//!   var p: Point = new Point
//!   p.x = 3
//!   return p.x
//! end
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;
