use crate::lexer::{LocatedToken, Position, Token};
use crate::parser::{InnerParseError, Result};

/// Deepest expression nesting the parser accepts.
pub const MAX_NESTING: usize = 256;

#[derive(Debug)]
pub struct Cursor<'a> {
    tokens: &'a [LocatedToken],
    position: usize,
    eof: LocatedToken,
    depth: usize,
}

impl<'a> Cursor<'a> {
    /// Reading past the end of `tokens` yields [Token::Eof], whether or not
    /// the slice ends with one.
    pub fn new(tokens: &'a [LocatedToken]) -> Self {
        let eof_pos = tokens.last().map(LocatedToken::get_pos).unwrap_or_default();
        Self {
            tokens,
            position: 0,
            eof: LocatedToken::new(Token::Eof, eof_pos),
            depth: 0,
        }
    }

    fn current(&self) -> &LocatedToken {
        self.tokens.get(self.position).unwrap_or(&self.eof)
    }

    pub fn peek(&self) -> &Token {
        self.current().get_inner()
    }

    /// Position of the token under the cursor.
    pub fn get_pos(&self) -> Position {
        self.current().get_pos()
    }

    pub fn bump(&mut self) {
        if !self.at_end() {
            self.position += 1;
        }
    }

    pub fn bump_if(&mut self, t: &Token) -> bool {
        let condition = self.peek() == t;
        if condition {
            self.bump();
        }
        condition
    }

    pub fn peek_is(&self, t: &Token) -> bool {
        self.peek() == t
    }

    pub fn at_end(&self) -> bool {
        self.peek().is_eof()
    }

    pub fn next_token(&mut self) -> Token {
        let next = self.peek().clone();
        self.bump();
        next
    }

    pub fn expect(&mut self, t: &Token) -> Result<()> {
        let pos = self.get_pos();
        let next = self.next_token();
        if &next == t {
            Ok(())
        } else {
            Err(InnerParseError::ExpectedButGot(t.clone(), next).set_pos(pos))
        }
    }

    /// Must be paired with [leave_nested](Cursor::leave_nested) on success.
    pub fn enter_nested(&mut self) -> Result<()> {
        if self.depth >= MAX_NESTING {
            let pos = self.get_pos();
            return Err(InnerParseError::NestingTooDeep(MAX_NESTING).set_pos(pos));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave_nested(&mut self) {
        self.depth -= 1;
    }
}
