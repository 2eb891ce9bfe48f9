use super::token::Position;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InnerLexError {
    #[error("unexpected character: {0:?}")]
    UnexpectedChar(char),
    #[error("bad constant suffix: {0:?}")]
    BadConstantSuffix(char),
    #[error("constant {0} does not fit in 64 bits")]
    BadConstant(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{pos}: {inner}")]
pub struct LexError {
    pub inner: InnerLexError,
    pub pos: Position,
}

impl InnerLexError {
    pub(super) fn set_pos(self, pos: Position) -> LexError {
        LexError { inner: self, pos }
    }
}
