mod function_collection;
mod semanalysis_error;
mod symbol_table;
mod variable_resolution;

use crate::ast::TranslationUnit;
use function_collection::collect_functions;
use variable_resolution::resolve_variables;

pub use semanalysis_error::{Result, SemAnalysisError};
pub use symbol_table::{Frame, FunSymbol, SymbolTable, SLOT_SIZE};

use tracing::debug;

/// Integer arguments passed in registers by the System V AMD64 calling convention.
pub const MAX_REGISTER_ARGS: usize = 6;

/// Translation unit with every variable resolved to its stack slot, together
/// with the symbol table built along the way.
#[derive(Debug, Clone)]
pub struct ValidatedAst {
    pub ast: TranslationUnit,
    pub symbols: SymbolTable,
}

// collect_functions must run to completion before resolve_variables
pub fn validate(ast: TranslationUnit) -> Result<ValidatedAst> {
    let mut symbols = collect_functions(&ast)?;
    let ast = resolve_variables(ast, &mut symbols)?;
    debug!(functions = ast.functions.len(), "semantic analysis finished");
    Ok(ValidatedAst { ast, symbols })
}
