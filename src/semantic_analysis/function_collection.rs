use crate::ast::*;
use crate::semantic_analysis::symbol_table::{FunSymbol, SymbolTable};
use crate::semantic_analysis::{Result, SemAnalysisError, MAX_REGISTER_ARGS};

use tracing::trace;

fn collect_function(fundec: &FunctionDecl, table: &mut SymbolTable) -> Result<()> {
    let name = &fundec.name;
    let arity = fundec.params.len();
    let defined = fundec.is_definition();

    if arity > MAX_REGISTER_ARGS {
        let name = name.clone();
        return Err(SemAnalysisError::TooManyArguments { name, count: arity });
    }

    let symbol = match table.get_function(name) {
        Some(previous) if previous.defined && defined => {
            return Err(SemAnalysisError::DuplicateDefinition(name.clone()));
        }
        Some(previous) if previous.arity != arity => {
            return Err(SemAnalysisError::IncompatibleDeclaration {
                name: name.clone(),
                expected: previous.arity,
                got: arity,
            });
        }
        Some(previous) => FunSymbol {
            arity,
            defined: previous.defined || defined,
        },
        None => FunSymbol { arity, defined },
    };

    trace!(%name, arity, defined = symbol.defined, "registered function");
    table.add_function(name.clone(), symbol);
    Ok(())
}

/// Registers every function signature before any body is looked at, so calls
/// may refer to functions declared further down the file.
pub fn collect_functions(ast: &TranslationUnit) -> Result<SymbolTable> {
    let mut table = SymbolTable::new();
    for fundec in &ast.functions {
        collect_function(fundec, &mut table)?;
    }
    Ok(table)
}
