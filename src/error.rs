//! Error types for the MyPL front end
//!
//! Both phases report through a single [`Error`] enum: [`Error::Lexical`] for
//! malformed tokens and [`Error::Syntax`] for token sequences that violate the
//! grammar. Errors are fatal at the point of detection; the first one unwinds
//! the whole `next_token()`/`parse()` call chain and no partial AST is
//! returned.

use thiserror::Error;

/// A front-end failure, carrying the phase that detected it plus the line and
/// column (1-based) of the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed token: bad escape, unterminated literal, illegal character,
    /// malformed number.
    #[error("lexical error at line {line}, column {column}: {message}")]
    Lexical {
        message: String,
        line: usize,
        column: usize,
    },

    /// Token sequence violates the grammar: expected-but-missing keyword or
    /// punctuation, missing required production.
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },
}

impl Error {
    /// The diagnostic text, without the phase/position prefix.
    pub fn message(&self) -> &str {
        match self {
            Error::Lexical { message, .. } | Error::Syntax { message, .. } => message,
        }
    }

    /// Line of the offending input (1-based).
    pub fn line(&self) -> usize {
        match self {
            Error::Lexical { line, .. } | Error::Syntax { line, .. } => *line,
        }
    }

    /// Column of the offending input (1-based).
    pub fn column(&self) -> usize {
        match self {
            Error::Lexical { column, .. } | Error::Syntax { column, .. } => *column,
        }
    }
}
