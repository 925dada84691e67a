//! Lexer (tokenizer) for MyPL source code
//!
//! Converts source text into a lazy stream of [`Token`]s, one
//! [`Lexer::next_token`] call at a time. Whitespace and `#` line comments are
//! skipped between tokens, and every token records the line and column of its
//! first character so diagnostics stay accurate after the skip.
//!
//! Lexeme notes:
//! - String lexemes keep `\"` escape pairs literally; no unescaping happens
//!   at this stage.
//! - A number never begins or ends with `.`: `.5` and `12.` are both errors,
//!   as is a fractional part cut off by a non-digit, non-whitespace character.
//! - A digit run immediately followed by a letter (`123abc`) is a malformed
//!   number, not two tokens.

use crate::error::Error;
use crate::token::{Token, TokenKind};
use rustc_hash::FxHashMap;

/// Lexer over an in-memory character buffer.
///
/// Holds exclusive ownership of the input; the only state beyond the buffer is
/// the cursor and the line/column counters (one character of peek, no other
/// buffering).
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    keywords: FxHashMap<&'static str, TokenKind>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        let mut keywords = FxHashMap::default();
        for (word, kind) in [
            ("and", TokenKind::And),
            ("or", TokenKind::Or),
            ("not", TokenKind::Not),
            ("neg", TokenKind::Neg),
            ("type", TokenKind::Type),
            ("while", TokenKind::While),
            ("for", TokenKind::For),
            ("to", TokenKind::To),
            ("do", TokenKind::Do),
            ("if", TokenKind::If),
            ("then", TokenKind::Then),
            ("elseif", TokenKind::Elseif),
            ("else", TokenKind::Else),
            ("end", TokenKind::End),
            ("fun", TokenKind::Fun),
            ("var", TokenKind::Var),
            ("return", TokenKind::Return),
            ("new", TokenKind::New),
            ("nil", TokenKind::Nil),
            ("bool", TokenKind::BoolType),
            ("int", TokenKind::IntType),
            ("double", TokenKind::DoubleType),
            ("char", TokenKind::CharType),
            ("string", TokenKind::StringType),
            ("true", TokenKind::BoolVal),
            ("false", TokenKind::BoolVal),
        ] {
            keywords.insert(word, kind);
        }

        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            keywords,
        }
    }

    /// Return the next token in the stream, or the `Eos` token once the input
    /// is exhausted. Repeated calls after `Eos` keep returning `Eos`.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        self.skip_whitespace_and_comments();

        let line = self.line;
        let column = self.column;

        let ch = match self.advance() {
            Some(ch) => ch,
            None => return Ok(Token::new(TokenKind::Eos, "", line, column)),
        };

        match ch {
            ',' => Ok(Token::new(TokenKind::Comma, ",", line, column)),
            '(' => Ok(Token::new(TokenKind::Lparen, "(", line, column)),
            ')' => Ok(Token::new(TokenKind::Rparen, ")", line, column)),
            ':' => Ok(Token::new(TokenKind::Colon, ":", line, column)),
            '+' => Ok(Token::new(TokenKind::Plus, "+", line, column)),
            '-' => Ok(Token::new(TokenKind::Minus, "-", line, column)),
            '*' => Ok(Token::new(TokenKind::Multiply, "*", line, column)),
            '/' => Ok(Token::new(TokenKind::Divide, "/", line, column)),
            '%' => Ok(Token::new(TokenKind::Modulo, "%", line, column)),

            '.' => {
                // A number never starts with the decimal point.
                if matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    Err(self.error("a double value must begin with a digit", line, column))
                } else {
                    Ok(Token::new(TokenKind::Dot, ".", line, column))
                }
            }

            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::new(TokenKind::Equal, "==", line, column))
                } else {
                    Ok(Token::new(TokenKind::Assign, "=", line, column))
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::new(TokenKind::LessEqual, "<=", line, column))
                } else {
                    Ok(Token::new(TokenKind::Less, "<", line, column))
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::new(TokenKind::GreaterEqual, ">=", line, column))
                } else {
                    Ok(Token::new(TokenKind::Greater, ">", line, column))
                }
            }
            '!' => {
                // No bare '!' operator exists.
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::new(TokenKind::NotEqual, "!=", line, column))
                } else {
                    Err(self.error("'!' is invalid syntax", line, column))
                }
            }

            '\'' => self.char_literal(line, column),
            '"' => self.string_literal(line, column),
            '0'..='9' => self.number_literal(ch, line, column),
            'a'..='z' | 'A'..='Z' => Ok(self.identifier_or_keyword(ch, line, column)),

            _ => Err(self.error(format!("unexpected character '{}'", ch), line, column)),
        }
    }

    /// Drain the stream into a vector, ending with the `Eos` token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, Error> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eos;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Scan a char literal; the opening quote is already consumed.
    fn char_literal(&mut self, line: usize, column: usize) -> Result<Token, Error> {
        let ch = match self.advance() {
            Some('\'') => return Err(self.error("'' is an invalid char", line, column)),
            Some(ch) => ch,
            None => return Err(self.error("unterminated char value", line, column)),
        };
        if self.advance() != Some('\'') {
            return Err(self.error("unterminated char value", line, column));
        }
        Ok(Token::new(TokenKind::CharVal, ch.to_string(), line, column))
    }

    /// Scan a string literal; the opening quote is already consumed. A `\"`
    /// pair is kept in the lexeme verbatim; a newline before the closing quote
    /// ends the literal with an error.
    fn string_literal(&mut self, line: usize, column: usize) -> Result<Token, Error> {
        let mut lexeme = String::new();
        loop {
            match self.peek() {
                Some('"') => {
                    self.advance();
                    return Ok(Token::new(TokenKind::StringVal, lexeme, line, column));
                }
                Some('\n') | None => {
                    return Err(self.error("unterminated string value", line, column));
                }
                Some('\\') => {
                    lexeme.push('\\');
                    self.advance();
                    if self.peek() == Some('"') {
                        lexeme.push('"');
                        self.advance();
                    }
                }
                Some(ch) => {
                    lexeme.push(ch);
                    self.advance();
                }
            }
        }
    }

    /// Scan an int or double literal starting from its first digit.
    fn number_literal(
        &mut self,
        first_digit: char,
        line: usize,
        column: usize,
    ) -> Result<Token, Error> {
        let mut lexeme = String::new();
        lexeme.push(first_digit);

        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            lexeme.push(c);
            self.advance();
        }

        if self.peek() == Some('.') {
            lexeme.push('.');
            self.advance();
            if !matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                return Err(self.error("invalid double value", line, column));
            }
            while let Some(c) = self.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                lexeme.push(c);
                self.advance();
            }
            // The fractional part must end at whitespace or end of input.
            match self.peek() {
                Some(c) if !c.is_ascii_whitespace() => {
                    Err(self.error("invalid double value", line, column))
                }
                _ => Ok(Token::new(TokenKind::DoubleVal, lexeme, line, column)),
            }
        } else {
            match self.peek() {
                Some(c) if c.is_ascii_alphabetic() => Err(self.error(
                    format!("malformed number '{}{}'", lexeme, c),
                    line,
                    column,
                )),
                _ => Ok(Token::new(TokenKind::IntVal, lexeme, line, column)),
            }
        }
    }

    /// Scan an identifier and classify it against the reserved-word table.
    fn identifier_or_keyword(&mut self, first_char: char, line: usize, column: usize) -> Token {
        let mut lexeme = String::new();
        lexeme.push(first_char);

        while let Some(c) = self.peek() {
            if !c.is_ascii_alphanumeric() && c != '_' {
                break;
            }
            lexeme.push(c);
            self.advance();
        }

        let kind = self
            .keywords
            .get(lexeme.as_str())
            .copied()
            .unwrap_or(TokenKind::Id);
        Token::new(kind, lexeme, line, column)
    }

    /// Skip a maximal run of whitespace and `#` line comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_ascii_whitespace() => {
                    self.advance();
                }
                Some('#') => {
                    while let Some(c) = self.peek() {
                        self.advance();
                        if c == '\n' {
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    /// Peek at the current character without consuming it.
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Consume and return the current character, tracking line/column.
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn error(&self, message: impl Into<String>, line: usize, column: usize) -> Error {
        Error::Lexical {
            message: message.into(),
            line,
            column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn single(source: &str) -> Token {
        let tokens = Lexer::new(source).tokenize().unwrap();
        assert_eq!(tokens.len(), 2, "expected one token plus Eos in {:?}", source);
        assert_eq!(tokens[1].kind, TokenKind::Eos);
        tokens.into_iter().next().unwrap()
    }

    #[test]
    fn reserved_words_round_trip() {
        let words = [
            ("and", TokenKind::And),
            ("or", TokenKind::Or),
            ("not", TokenKind::Not),
            ("neg", TokenKind::Neg),
            ("type", TokenKind::Type),
            ("while", TokenKind::While),
            ("for", TokenKind::For),
            ("to", TokenKind::To),
            ("do", TokenKind::Do),
            ("if", TokenKind::If),
            ("then", TokenKind::Then),
            ("elseif", TokenKind::Elseif),
            ("else", TokenKind::Else),
            ("end", TokenKind::End),
            ("fun", TokenKind::Fun),
            ("var", TokenKind::Var),
            ("return", TokenKind::Return),
            ("new", TokenKind::New),
            ("nil", TokenKind::Nil),
            ("bool", TokenKind::BoolType),
            ("int", TokenKind::IntType),
            ("double", TokenKind::DoubleType),
            ("char", TokenKind::CharType),
            ("string", TokenKind::StringType),
            ("true", TokenKind::BoolVal),
            ("false", TokenKind::BoolVal),
        ];
        for (word, kind) in words {
            let token = single(word);
            assert_eq!(token.kind, kind, "{}", word);
            assert_eq!(token.lexeme, word);
        }
    }

    #[test]
    fn punctuation_and_operators_round_trip() {
        let symbols = [
            (",", TokenKind::Comma),
            ("(", TokenKind::Lparen),
            (")", TokenKind::Rparen),
            (":", TokenKind::Colon),
            (".", TokenKind::Dot),
            ("+", TokenKind::Plus),
            ("-", TokenKind::Minus),
            ("*", TokenKind::Multiply),
            ("/", TokenKind::Divide),
            ("%", TokenKind::Modulo),
            ("=", TokenKind::Assign),
            ("==", TokenKind::Equal),
            ("!=", TokenKind::NotEqual),
            ("<", TokenKind::Less),
            ("<=", TokenKind::LessEqual),
            (">", TokenKind::Greater),
            (">=", TokenKind::GreaterEqual),
        ];
        for (text, kind) in symbols {
            let token = single(text);
            assert_eq!(token.kind, kind, "{}", text);
            assert_eq!(token.lexeme, text);
        }
    }

    #[test]
    fn two_char_operator_fallback() {
        assert_eq!(
            kinds("= == <= < >= >"),
            vec![
                TokenKind::Assign,
                TokenKind::Equal,
                TokenKind::LessEqual,
                TokenKind::Less,
                TokenKind::GreaterEqual,
                TokenKind::Greater,
                TokenKind::Eos,
            ]
        );
    }

    #[test]
    fn bare_bang_is_an_error() {
        let err = Lexer::new("!x").tokenize().unwrap_err();
        assert!(matches!(err, Error::Lexical { .. }));
    }

    #[test]
    fn number_classification() {
        let token = single("123");
        assert_eq!(token.kind, TokenKind::IntVal);
        assert_eq!(token.lexeme, "123");

        let token = single("12.5");
        assert_eq!(token.kind, TokenKind::DoubleVal);
        assert_eq!(token.lexeme, "12.5");
    }

    #[test]
    fn malformed_numbers_are_errors() {
        for source in ["12.", ".5", "12.5)", "123abc"] {
            let err = Lexer::new(source).tokenize().unwrap_err();
            assert!(matches!(err, Error::Lexical { .. }), "{}", source);
        }
    }

    #[test]
    fn string_literal_boundaries() {
        let token = single(r#""ab""#);
        assert_eq!(token.kind, TokenKind::StringVal);
        assert_eq!(token.lexeme, "ab");

        let err = Lexer::new("\"ab\nrest").tokenize().unwrap_err();
        assert!(matches!(err, Error::Lexical { .. }));
    }

    #[test]
    fn escaped_quote_is_kept_verbatim() {
        let token = single(r#""a\"b""#);
        assert_eq!(token.kind, TokenKind::StringVal);
        assert_eq!(token.lexeme, r#"a\"b"#);
    }

    #[test]
    fn char_literal_boundaries() {
        let token = single("'a'");
        assert_eq!(token.kind, TokenKind::CharVal);
        assert_eq!(token.lexeme, "a");

        for source in ["''", "'a", "'"] {
            let err = Lexer::new(source).tokenize().unwrap_err();
            assert!(matches!(err, Error::Lexical { .. }), "{}", source);
        }
    }

    #[test]
    fn comment_skipping_tracks_lines() {
        let tokens = Lexer::new("# comment\n123").tokenize().unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::IntVal);
        assert_eq!(tokens[0].lexeme, "123");
        assert_eq!(tokens[0].line, 2);
        assert_eq!(tokens[0].column, 1);
    }

    #[test]
    fn consecutive_comment_lines() {
        let tokens = Lexer::new("# one\n# two\n# three\nx").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Id);
        assert_eq!(tokens[0].line, 4);
    }

    #[test]
    fn positions_record_lexeme_start() {
        let tokens = Lexer::new("var x = 12.5").tokenize().unwrap();
        let positions: Vec<(usize, usize)> =
            tokens.iter().map(|t| (t.line, t.column)).collect();
        assert_eq!(positions, vec![(1, 1), (1, 5), (1, 7), (1, 9), (1, 13)]);
    }

    #[test]
    fn eos_token_at_end() {
        let mut lexer = Lexer::new("");
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Eos);
        assert_eq!(token.lexeme, "");
        // Stays at Eos on further pulls.
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eos);
    }

    #[test]
    fn unexpected_character_reports_position() {
        let err = Lexer::new("var x = @").tokenize().unwrap_err();
        match err {
            Error::Lexical { message, line, column } => {
                assert!(message.contains('@'), "{}", message);
                assert_eq!((line, column), (1, 9));
            }
            other => panic!("expected lexical error, got {:?}", other),
        }
    }

    #[test]
    fn identifiers_with_digits_and_underscores() {
        let token = single("my_var2");
        assert_eq!(token.kind, TokenKind::Id);
        assert_eq!(token.lexeme, "my_var2");
    }

    #[test]
    fn dotted_access_lexes_as_dot_tokens() {
        assert_eq!(
            kinds("p.x"),
            vec![TokenKind::Id, TokenKind::Dot, TokenKind::Id, TokenKind::Eos]
        );
    }

    #[test]
    fn token_display_quotes_lexeme() {
        let token = single("while");
        assert_eq!(token.to_string(), "'while'");
        let token = single("abc");
        assert_eq!(token.to_string(), "identifier 'abc'");
        let token = single("42");
        assert_eq!(token.to_string(), "int literal '42'");
    }
}
