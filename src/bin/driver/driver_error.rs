use nanocc::CompileError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("usage error: {0}")]
    Usage(String),
    #[error("io error: file {0} does not exist")]
    InputFileDoesNotExist(String),
    #[error("io error: {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Compile(#[from] CompileError),
}

impl DriverError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<nanocc::lexer::LexError> for DriverError {
    fn from(e: nanocc::lexer::LexError) -> Self {
        Self::Compile(e.into())
    }
}

impl From<nanocc::parser::ParseError> for DriverError {
    fn from(e: nanocc::parser::ParseError) -> Self {
        Self::Compile(e.into())
    }
}

impl From<nanocc::semantic_analysis::SemAnalysisError> for DriverError {
    fn from(e: nanocc::semantic_analysis::SemAnalysisError) -> Self {
        Self::Compile(e.into())
    }
}

impl From<nanocc::emission::EmitError> for DriverError {
    fn from(e: nanocc::emission::EmitError) -> Self {
        Self::Compile(e.into())
    }
}
