use crate::lexer::{Position, Token};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum InnerParseError {
    #[error("expected {0}, but got {1}")]
    ExpectedButGot(Token, Token),
    #[error("expected identifier, but got {0}")]
    ExpectedIdentifierButGot(Token),
    #[error("expected expression, but got {0}")]
    BadFactor(Token),
    #[error("expected `int` or `void` in parameter list, but got {0}")]
    BadParameter(Token),
    #[error("trailing comma in {0} list")]
    TrailingComma(&'static str),
    #[error("expression nested more than {0} levels deep")]
    NestingTooDeep(usize),
}

#[derive(Debug, Clone, Error, Eq, PartialEq)]
#[error("{pos}: {inner}")]
pub struct ParseError {
    pub inner: InnerParseError,
    pub pos: Position,
}

impl ParseError {
    pub fn get_pos(&self) -> Position {
        self.pos
    }
}

impl InnerParseError {
    pub fn set_pos(self, pos: Position) -> ParseError {
        ParseError { inner: self, pos }
    }
}
