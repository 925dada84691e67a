//! Token definitions for the MyPL lexer
//!
//! A [`Token`] is an immutable record of a kind, the exact source text it was
//! scanned from, and the line/column where that text starts. The kind set is
//! closed: the lexer produces nothing outside [`TokenKind`].

use std::fmt;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of the input stream.
    Eos,

    // Punctuation
    Comma,
    Lparen,
    Rparen,
    Colon,
    Dot,

    // Arithmetic operators
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,

    // Comparison and boolean operators
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    And,
    Or,
    Not,
    Neg,

    // Assignment
    Assign,

    // Literals
    IntVal,
    DoubleVal,
    BoolVal,
    CharVal,
    StringVal,

    // Reserved words
    Type,
    While,
    For,
    To,
    Do,
    If,
    Then,
    Elseif,
    Else,
    End,
    Fun,
    Var,
    Return,
    New,
    Nil,

    // Primitive type names
    BoolType,
    IntType,
    DoubleType,
    CharType,
    StringType,

    /// Anything alphanumeric that is not a reserved word.
    Id,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Eos => "end-of-file",
            TokenKind::Comma => "','",
            TokenKind::Lparen => "'('",
            TokenKind::Rparen => "')'",
            TokenKind::Colon => "':'",
            TokenKind::Dot => "'.'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Multiply => "'*'",
            TokenKind::Divide => "'/'",
            TokenKind::Modulo => "'%'",
            TokenKind::Equal => "'=='",
            TokenKind::NotEqual => "'!='",
            TokenKind::Less => "'<'",
            TokenKind::LessEqual => "'<='",
            TokenKind::Greater => "'>'",
            TokenKind::GreaterEqual => "'>='",
            TokenKind::And => "'and'",
            TokenKind::Or => "'or'",
            TokenKind::Not => "'not'",
            TokenKind::Neg => "'neg'",
            TokenKind::Assign => "'='",
            TokenKind::IntVal => "int literal",
            TokenKind::DoubleVal => "double literal",
            TokenKind::BoolVal => "bool literal",
            TokenKind::CharVal => "char literal",
            TokenKind::StringVal => "string literal",
            TokenKind::Type => "'type'",
            TokenKind::While => "'while'",
            TokenKind::For => "'for'",
            TokenKind::To => "'to'",
            TokenKind::Do => "'do'",
            TokenKind::If => "'if'",
            TokenKind::Then => "'then'",
            TokenKind::Elseif => "'elseif'",
            TokenKind::Else => "'else'",
            TokenKind::End => "'end'",
            TokenKind::Fun => "'fun'",
            TokenKind::Var => "'var'",
            TokenKind::Return => "'return'",
            TokenKind::New => "'new'",
            TokenKind::Nil => "'nil'",
            TokenKind::BoolType => "'bool'",
            TokenKind::IntType => "'int'",
            TokenKind::DoubleType => "'double'",
            TokenKind::CharType => "'char'",
            TokenKind::StringType => "'string'",
            TokenKind::Id => "identifier",
        };
        f.write_str(text)
    }
}

/// A single token: kind, exact source text, and the position (1-based) of the
/// first character of that text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eos => write!(f, "end-of-file"),
            TokenKind::Id => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::IntVal
            | TokenKind::DoubleVal
            | TokenKind::BoolVal
            | TokenKind::CharVal
            | TokenKind::StringVal => write!(f, "{} '{}'", self.kind, self.lexeme),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}
