//! Recursive descent parser for MyPL
//!
//! Strict LL(1): a single lookahead token (`curr`) drives every decision.
//! One method per grammar nonterminal, each pulling tokens from the lexer on
//! demand through [`Parser::advance`] and asserting expected tokens with
//! [`Parser::eat`]. The first grammar violation aborts the whole parse with a
//! [`Error::Syntax`]; no partial AST is ever returned.

use crate::ast::*;
use crate::error::Error;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Recursive descent parser over a [`Lexer`] it exclusively owns.
pub struct Parser {
    lexer: Lexer,
    curr: Token,
}

impl Parser {
    /// Create a parser, pulling the first lookahead token.
    pub fn new(mut lexer: Lexer) -> Result<Self, Error> {
        let curr = lexer.next_token()?;
        Ok(Self { lexer, curr })
    }

    /// Parse the entire token stream into a [`Program`].
    ///
    /// `program -> (type_decl | fun_decl)* EOS`
    pub fn parse(mut self) -> Result<Program, Error> {
        let mut decls = Vec::new();
        loop {
            match self.curr.kind {
                TokenKind::Type => decls.push(Decl::Type(self.tdecl()?)),
                TokenKind::Fun => decls.push(Decl::Fun(self.fdecl()?)),
                _ => break,
            }
        }
        self.eat(TokenKind::Eos, "expecting end-of-file ")?;
        Ok(Program { decls })
    }

    // Helper functions

    /// Discard the lookahead and pull the next token.
    fn advance(&mut self) -> Result<(), Error> {
        self.curr = self.lexer.next_token()?;
        Ok(())
    }

    /// Assert the lookahead's kind, returning the consumed token.
    fn eat(&mut self, kind: TokenKind, err_msg: &str) -> Result<Token, Error> {
        if self.curr.kind == kind {
            let token = self.curr.clone();
            self.advance()?;
            Ok(token)
        } else {
            Err(self.error(err_msg))
        }
    }

    /// Build a syntax error naming the offending lookahead token.
    fn error(&self, err_msg: &str) -> Error {
        Error::Syntax {
            message: format!("{}found '{}'", err_msg, self.curr.lexeme),
            line: self.curr.line,
            column: self.curr.column,
        }
    }

    fn is_operator(kind: TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Multiply
                | TokenKind::Divide
                | TokenKind::Modulo
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Equal
                | TokenKind::NotEqual
                | TokenKind::Less
                | TokenKind::LessEqual
                | TokenKind::Greater
                | TokenKind::GreaterEqual
        )
    }

    fn is_dtype(kind: TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::IntType
                | TokenKind::DoubleType
                | TokenKind::BoolType
                | TokenKind::CharType
                | TokenKind::StringType
                | TokenKind::Id
        )
    }

    fn starts_stmt(kind: TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::Var
                | TokenKind::Id
                | TokenKind::If
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Return
        )
    }

    // Recursive descent functions

    /// `type_decl -> TYPE ID var_decl* END`
    fn tdecl(&mut self) -> Result<TypeDecl, Error> {
        self.advance()?; // TYPE
        let name = self.eat(TokenKind::Id, "expecting id ")?;
        let mut vdecls = Vec::new();
        while self.curr.kind == TokenKind::Var {
            vdecls.push(self.vdecl_stmt()?);
        }
        self.eat(TokenKind::End, "expecting 'END' keyword ")?;
        Ok(TypeDecl { name, vdecls })
    }

    /// `fun_decl -> FUN (NIL | dtype) ID LPAREN params RPAREN stmt* END`
    fn fdecl(&mut self) -> Result<FunDecl, Error> {
        self.advance()?; // FUN
        let return_type = if self.curr.kind == TokenKind::Nil {
            let token = self.curr.clone();
            self.advance()?;
            token
        } else if Self::is_dtype(self.curr.kind) {
            self.dtype()?
        } else {
            return Err(self.error("invalid function declaration "));
        };
        let name = self.eat(TokenKind::Id, "expecting id ")?;
        self.eat(TokenKind::Lparen, "expecting '(' ")?;
        let params = self.params()?;
        self.eat(TokenKind::Rparen, "expecting ')' ")?;
        let stmts = self.stmts()?;
        self.eat(TokenKind::End, "expecting 'END' keyword ")?;
        Ok(FunDecl {
            return_type,
            name,
            params,
            stmts,
        })
    }

    /// `params -> (ID COLON dtype (COMMA ID COLON dtype)*)?`
    ///
    /// A comma must be followed by another parameter; a trailing comma fails
    /// on the missing id.
    fn params(&mut self) -> Result<Vec<FunParam>, Error> {
        let mut params = Vec::new();
        if self.curr.kind == TokenKind::Id {
            loop {
                let id = self.eat(TokenKind::Id, "expecting id ")?;
                self.eat(TokenKind::Colon, "expecting ':' ")?;
                let dtype = self.dtype()?;
                params.push(FunParam { id, dtype });
                if self.curr.kind != TokenKind::Comma {
                    break;
                }
                self.advance()?;
            }
        }
        Ok(params)
    }

    /// `dtype -> BOOL_TYPE | INT_TYPE | DOUBLE_TYPE | CHAR_TYPE | STRING_TYPE | ID`
    fn dtype(&mut self) -> Result<Token, Error> {
        if Self::is_dtype(self.curr.kind) {
            let token = self.curr.clone();
            self.advance()?;
            Ok(token)
        } else {
            Err(self.error("expecting type "))
        }
    }

    /// Greedily parse statements while the lookahead can start one; stops on
    /// the first non-matching token (`end`, `else`, `elseif`, or EOS).
    fn stmts(&mut self) -> Result<Vec<Stmt>, Error> {
        let mut stmts = Vec::new();
        while Self::starts_stmt(self.curr.kind) {
            stmts.push(self.stmt()?);
        }
        Ok(stmts)
    }

    /// Dispatch a single statement on the lookahead.
    fn stmt(&mut self) -> Result<Stmt, Error> {
        match self.curr.kind {
            TokenKind::Var => Ok(Stmt::VarDecl(self.vdecl_stmt()?)),
            TokenKind::Id => {
                // Call statement or assignment, decided by the token after
                // the leading id.
                let id = self.curr.clone();
                self.advance()?;
                if self.curr.kind == TokenKind::Lparen {
                    Ok(Stmt::Call(self.call_expr(id)?))
                } else {
                    Ok(Stmt::Assign(self.assign_stmt(id)?))
                }
            }
            TokenKind::If => Ok(Stmt::If(self.cond_stmt()?)),
            TokenKind::While => Ok(Stmt::While(self.while_stmt()?)),
            TokenKind::For => Ok(Stmt::For(self.for_stmt()?)),
            TokenKind::Return => Ok(Stmt::Return(self.exit_stmt()?)),
            _ => Err(self.error("expecting statement ")),
        }
    }

    /// `var_decl_stmt -> VAR ID (COLON dtype)? ASSIGN expr`
    fn vdecl_stmt(&mut self) -> Result<VarDeclStmt, Error> {
        self.advance()?; // VAR
        let id = self.eat(TokenKind::Id, "expecting id ")?;
        let dtype = if self.curr.kind == TokenKind::Colon {
            self.advance()?;
            Some(self.dtype()?)
        } else {
            None
        };
        self.eat(TokenKind::Assign, "expecting '=' ")?;
        let init = self.expr()?;
        Ok(VarDeclStmt { id, dtype, init })
    }

    /// `assign_stmt -> lvalue ASSIGN expr`, with the leading id already
    /// consumed by the caller and `lvalue -> ID (DOT ID)*`.
    fn assign_stmt(&mut self, first_id: Token) -> Result<AssignStmt, Error> {
        let mut lvalue = vec![first_id];
        while self.curr.kind == TokenKind::Dot {
            self.advance()?;
            lvalue.push(self.eat(TokenKind::Id, "expecting id ")?);
        }
        self.eat(TokenKind::Assign, "expecting '=' ")?;
        let rhs = self.expr()?;
        Ok(AssignStmt { lvalue, rhs })
    }

    /// `cond_stmt -> IF expr THEN stmt* (ELSEIF expr THEN stmt*)* (ELSE stmt*)? END`
    fn cond_stmt(&mut self) -> Result<IfStmt, Error> {
        self.advance()?; // IF
        let cond = self.expr()?;
        self.eat(TokenKind::Then, "expecting 'then' keyword ")?;
        let stmts = self.stmts()?;
        let if_part = BasicIf { cond, stmts };

        let mut else_ifs = Vec::new();
        while self.curr.kind == TokenKind::Elseif {
            self.advance()?;
            let cond = self.expr()?;
            self.eat(TokenKind::Then, "expecting 'then' keyword ")?;
            let stmts = self.stmts()?;
            else_ifs.push(BasicIf { cond, stmts });
        }

        let else_stmts = if self.curr.kind == TokenKind::Else {
            self.advance()?;
            Some(self.stmts()?)
        } else {
            None
        };

        self.eat(TokenKind::End, "expecting 'end' keyword ")?;
        Ok(IfStmt {
            if_part,
            else_ifs,
            else_stmts,
        })
    }

    /// `while_stmt -> WHILE expr DO stmt* END`
    fn while_stmt(&mut self) -> Result<WhileStmt, Error> {
        self.advance()?; // WHILE
        let cond = self.expr()?;
        self.eat(TokenKind::Do, "expecting 'do' keyword ")?;
        let stmts = self.stmts()?;
        self.eat(TokenKind::End, "expecting 'end' keyword ")?;
        Ok(WhileStmt { cond, stmts })
    }

    /// `for_stmt -> FOR ID ASSIGN expr TO expr DO stmt* END`
    fn for_stmt(&mut self) -> Result<ForStmt, Error> {
        self.advance()?; // FOR
        let var_id = self.eat(TokenKind::Id, "expecting id ")?;
        self.eat(TokenKind::Assign, "expecting '=' ")?;
        let start = self.expr()?;
        self.eat(TokenKind::To, "expecting 'to' keyword ")?;
        let end = self.expr()?;
        self.eat(TokenKind::Do, "expecting 'do' keyword ")?;
        let stmts = self.stmts()?;
        self.eat(TokenKind::End, "expecting 'end' keyword ")?;
        Ok(ForStmt {
            var_id,
            start,
            end,
            stmts,
        })
    }

    /// `return_stmt -> RETURN expr`
    fn exit_stmt(&mut self) -> Result<ReturnStmt, Error> {
        self.advance()?; // RETURN
        let expr = self.expr()?;
        Ok(ReturnStmt { expr })
    }

    /// `call_expr -> LPAREN (expr (COMMA expr)*)? RPAREN`, with the function
    /// name already consumed by the caller. A comma must be followed by
    /// another argument.
    fn call_expr(&mut self, name: Token) -> Result<CallExpr, Error> {
        self.eat(TokenKind::Lparen, "expecting '(' ")?;
        let mut args = Vec::new();
        if self.curr.kind != TokenKind::Rparen && self.curr.kind != TokenKind::Eos {
            args.push(self.expr()?);
            while self.curr.kind == TokenKind::Comma {
                self.advance()?;
                args.push(self.expr()?);
            }
        }
        self.eat(TokenKind::Rparen, "expecting ')' ")?;
        Ok(CallExpr { name, args })
    }

    /// `expr -> (NOT expr | LPAREN expr RPAREN | rvalue) (operator expr)?`
    ///
    /// The operator chain is flat and fully right-associative; each operator
    /// recursively consumes a whole expression to its right. No precedence.
    fn expr(&mut self) -> Result<Expr, Error> {
        let mut negated = false;
        let first = match self.curr.kind {
            TokenKind::Not => {
                negated = true;
                self.advance()?;
                Term::Complex(Box::new(self.expr()?))
            }
            TokenKind::Lparen => {
                self.advance()?;
                let inner = self.expr()?;
                self.eat(TokenKind::Rparen, "expecting ')' ")?;
                Term::Complex(Box::new(inner))
            }
            _ => Term::Simple(self.rvalue()?),
        };

        let rest = if Self::is_operator(self.curr.kind) {
            let op = self.curr.clone();
            self.advance()?;
            Some((op, Box::new(self.expr()?)))
        } else {
            None
        };

        Ok(Expr {
            negated,
            first,
            rest,
        })
    }

    /// `rvalue -> pval | NIL | NEW ID | call_expr | idrval | NEG expr`
    fn rvalue(&mut self) -> Result<RValue, Error> {
        match self.curr.kind {
            TokenKind::IntVal
            | TokenKind::DoubleVal
            | TokenKind::BoolVal
            | TokenKind::CharVal
            | TokenKind::StringVal
            | TokenKind::Nil => {
                let token = self.curr.clone();
                self.advance()?;
                Ok(RValue::Simple(token))
            }
            TokenKind::New => {
                self.advance()?;
                let name = self.eat(TokenKind::Id, "expecting id ")?;
                Ok(RValue::New(name))
            }
            TokenKind::Neg => {
                self.advance()?;
                Ok(RValue::Negated(Box::new(self.expr()?)))
            }
            TokenKind::Id => {
                let id = self.curr.clone();
                self.advance()?;
                if self.curr.kind == TokenKind::Lparen {
                    Ok(RValue::Call(self.call_expr(id)?))
                } else {
                    Ok(RValue::Id(self.idrval(id)?))
                }
            }
            _ => Err(self.error("expecting an expression ")),
        }
    }

    /// `idrval -> ID (DOT ID)*`, with the leading id already consumed.
    fn idrval(&mut self, first_id: Token) -> Result<Vec<Token>, Error> {
        let mut path = vec![first_id];
        while self.curr.kind == TokenKind::Dot {
            self.advance()?;
            path.push(self.eat(TokenKind::Id, "expecting id ")?);
        }
        Ok(path)
    }
}
