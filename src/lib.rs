#![deny(unused_must_use)]
#![warn(clippy::pedantic)]
#![allow(clippy::wildcard_imports)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::must_use_candidate)]

pub mod ast;
#[cfg(feature = "codegen")]
pub mod codegen;
#[cfg(feature = "emission")]
pub mod emission;
#[cfg(feature = "lexer")]
pub mod lexer;
#[cfg(feature = "parser")]
pub mod parser;
#[cfg(feature = "semantic_analysis")]
pub mod semantic_analysis;

#[cfg(feature = "emission")]
pub use compile::{compile, CompileError};

#[cfg(feature = "emission")]
mod compile {
    use crate::emission::EmitError;
    use crate::lexer::LexError;
    use crate::parser::ParseError;
    use crate::semantic_analysis::SemAnalysisError;
    use crate::{codegen, emission, lexer, parser, semantic_analysis};

    use thiserror::Error;

    #[derive(Debug, Error, PartialEq, Eq)]
    pub enum CompileError {
        #[error("lex error: {0}")]
        Lex(#[from] LexError),
        #[error("parse error: {0}")]
        Parse(#[from] ParseError),
        #[error("semantic error: {0}")]
        Semantic(#[from] SemAnalysisError),
        #[error("internal error: {0}")]
        Emit(#[from] EmitError),
    }

    /// Compiles one translation unit to assembly text.
    ///
    /// The first failing stage aborts compilation; no partial output is produced.
    pub fn compile(source: &str) -> Result<String, CompileError> {
        let tokens = lexer::lex(source)?;
        let ast = parser::parse(&tokens)?;
        let validated = semantic_analysis::validate(ast)?;
        let program = codegen::codegen(&validated);
        Ok(emission::emit(&program)?)
    }
}
