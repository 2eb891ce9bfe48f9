use crate::ast::Identifier;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SemAnalysisError>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SemAnalysisError {
    #[error("redefinition of function `{0}`")]
    DuplicateDefinition(Identifier),
    #[error("function `{name}` redeclared with {got} parameters, but previously declared with {expected}")]
    IncompatibleDeclaration {
        name: Identifier,
        expected: usize,
        got: usize,
    },
    #[error("call to undeclared function `{0}`")]
    UndefinedFunction(Identifier),
    #[error("function `{name}` called with {got} arguments, but expected {expected}")]
    ArityMismatch {
        name: Identifier,
        expected: usize,
        got: usize,
    },
    #[error("function `{name}` uses {count} arguments, but at most 6 are supported")]
    TooManyArguments { name: Identifier, count: usize },
    #[error("use of undeclared variable `{0}`")]
    UndeclaredVariable(Identifier),
    #[error("redeclaration of variable `{0}`")]
    DuplicateVariable(Identifier),
}
