mod cursor;
mod lexer_error;
#[cfg(test)]
mod lexer_tests;
mod token;

use cursor::Cursor;
pub use lexer_error::{InnerLexError, LexError};
pub use token::{LocatedToken, Position, Token};

use tracing::{debug, trace};

pub type Result<T> = std::result::Result<T, LexError>;

#[inline]
fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Lazy token stream over a source string.
///
/// Yields tokens up to and including [Token::Eof], or up to the first error.
/// Cloning a lexer gives an independent stream starting from the same point.
#[derive(Clone)]
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            finished: false,
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            self.cursor.skip_whitespaces();
            if self.cursor.peek() == Some('/') && self.cursor.peek_2nd() == Some('/') {
                self.cursor.skip_line();
            } else {
                break;
            }
        }
    }

    fn lex_constant(&mut self) -> std::result::Result<Token, InnerLexError> {
        let digits = self.cursor.take_while(|c| c.is_ascii_digit());

        if let Some(c) = self.cursor.peek().filter(|&c| is_identifier_char(c)) {
            return Err(InnerLexError::BadConstantSuffix(c));
        }

        digits
            .parse()
            .map(Token::Constant)
            .map_err(|_| InnerLexError::BadConstant(digits.to_owned()))
    }

    fn lex_identifier(&mut self) -> Token {
        let word = self.cursor.take_while(is_identifier_char);
        Token::from(word)
    }

    fn next_token(&mut self) -> Result<LocatedToken> {
        self.skip_trivia();
        let pos = self.cursor.position();
        let Some(c) = self.cursor.peek() else {
            return Ok(LocatedToken::new(Token::Eof, pos));
        };

        let token = match c {
            '0'..='9' => self.lex_constant(),
            c if c.is_ascii_alphabetic() || c == '_' => Ok(self.lex_identifier()),
            _ => {
                self.cursor.take();
                Token::try_from(c)
            }
        };

        let token = token.map_err(|err| err.set_pos(pos))?;
        trace!(%pos, ?token, "lexed token");
        Ok(LocatedToken::new(token, pos))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<LocatedToken>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let next = self.next_token();
        self.finished = next.as_ref().map_or(true, |t| t.is_eof());
        Some(next)
    }
}

/// Collects the whole token stream, [Token::Eof] included.
pub fn lex(source: &str) -> Result<Vec<LocatedToken>> {
    let tokens = Lexer::new(source).collect::<Result<Vec<_>>>()?;
    debug!(count = tokens.len(), "lexing finished");
    Ok(tokens)
}
