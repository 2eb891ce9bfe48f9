use super::lexer_error::InnerLexError;
use std::fmt;
use std::ops::Deref;

/// Line and column of a token's first character, both starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub ln: u64,
    pub col: u64,
}

impl Position {
    pub fn new(ln: u64, col: u64) -> Self {
        Self { ln, col }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { ln: 1, col: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ln, self.col)
    }
}

/// Token with the position it was found at.
///
/// To get inner [Token] use [Token::from] to consume or [get_inner](LocatedToken::get_inner) to borrow.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedToken {
    pub(crate) inner: Token,
    pos: Position,
}

impl From<LocatedToken> for Token {
    fn from(value: LocatedToken) -> Self {
        value.inner
    }
}

/// Basic token type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// int keyword
    Int,
    /// return keyword
    Return,
    /// void keyword
    Void,
    /// any non-keyword word (variable names, function names, ..)
    Identifier(String),
    /// decimal integer constant
    Constant(i64),
    /// (
    OpenParanth,
    /// )
    CloseParanth,
    /// {
    OpenCurly,
    /// }
    CloseCurly,
    /// ;
    Semicolon,
    /// ,
    Comma,
    /// +
    Plus,
    /// *
    Asterisk,
    /// =
    Assign,
    /// end of input, always the last token
    Eof,
}

impl LocatedToken {
    pub fn new(t: Token, pos: Position) -> Self {
        Self { inner: t, pos }
    }

    pub fn get_pos(&self) -> Position {
        self.pos
    }

    pub fn get_inner(&self) -> &Token {
        &self.inner
    }
}

impl Deref for LocatedToken {
    type Target = Token;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Token {
    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }

    #[inline]
    pub fn is_binaryop(&self) -> bool {
        matches!(self, Self::Plus | Self::Asterisk)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "`int`"),
            Self::Return => write!(f, "`return`"),
            Self::Void => write!(f, "`void`"),
            Self::Identifier(name) => write!(f, "identifier `{name}`"),
            Self::Constant(c) => write!(f, "constant `{c}`"),
            Self::OpenParanth => write!(f, "`(`"),
            Self::CloseParanth => write!(f, "`)`"),
            Self::OpenCurly => write!(f, "`{{`"),
            Self::CloseCurly => write!(f, "`}}`"),
            Self::Semicolon => write!(f, "`;`"),
            Self::Comma => write!(f, "`,`"),
            Self::Plus => write!(f, "`+`"),
            Self::Asterisk => write!(f, "`*`"),
            Self::Assign => write!(f, "`=`"),
            Self::Eof => write!(f, "end of input"),
        }
    }
}

impl TryFrom<char> for Token {
    type Error = InnerLexError;
    fn try_from(c: char) -> std::result::Result<Self, InnerLexError> {
        match c {
            ';' => Ok(Self::Semicolon),
            '(' => Ok(Self::OpenParanth),
            ')' => Ok(Self::CloseParanth),
            '{' => Ok(Self::OpenCurly),
            '}' => Ok(Self::CloseCurly),
            ',' => Ok(Self::Comma),
            '+' => Ok(Self::Plus),
            '*' => Ok(Self::Asterisk),
            '=' => Ok(Self::Assign),
            _ => Err(InnerLexError::UnexpectedChar(c)),
        }
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        match s {
            "int" => Self::Int,
            "return" => Self::Return,
            "void" => Self::Void,
            _ => Self::Identifier(s.to_owned()),
        }
    }
}
