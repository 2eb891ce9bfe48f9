pub mod asm_ast;
mod gen;

use crate::semantic_analysis::ValidatedAst;

pub use asm_ast::*;
pub use gen::ARG_REGISTERS;

use gen::gen_function;
use tracing::debug;

/// Lowers every function definition, in source order. Prototypes produce no code.
pub fn codegen(validated: &ValidatedAst) -> AsmProgram {
    let ValidatedAst { ast, symbols } = validated;
    let functions = ast
        .functions
        .iter()
        .filter_map(|fundec| {
            let body = fundec.body.as_ref()?;
            Some(gen_function(fundec, body, symbols))
        })
        .collect::<Vec<_>>();

    debug!(functions = functions.len(), "code generation finished");
    AsmProgram { functions }
}
