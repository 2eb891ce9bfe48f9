use crate::ast::*;
use crate::semantic_analysis::symbol_table::{Frame, SymbolTable};
use crate::semantic_analysis::{Result, SemAnalysisError, MAX_REGISTER_ARGS};

use tracing::trace;

fn resolve_var(mut var: Var, frame: &Frame) -> Result<Var> {
    let offset = frame
        .get_offset(&var.name)
        .ok_or_else(|| SemAnalysisError::UndeclaredVariable(var.name.clone()))?;
    var.offset = Some(offset);
    Ok(var)
}

fn resolve_exp_call(
    name: Identifier,
    args: Vec<Exp>,
    frame: &Frame,
    table: &SymbolTable,
) -> Result<Exp> {
    let symbol = table
        .get_function(&name)
        .ok_or_else(|| SemAnalysisError::UndefinedFunction(name.clone()))?;

    let got = args.len();
    if got > MAX_REGISTER_ARGS {
        return Err(SemAnalysisError::TooManyArguments { name, count: got });
    }
    if got != symbol.arity {
        let expected = symbol.arity;
        return Err(SemAnalysisError::ArityMismatch {
            name,
            expected,
            got,
        });
    }

    let args = args
        .into_iter()
        .map(|arg| resolve_exp(arg, frame, table))
        .collect::<Result<Vec<_>>>()?;

    Ok(Exp::Call(name, args))
}

fn resolve_exp_binary(
    op: AstBinaryOp,
    left: Exp,
    right: Exp,
    frame: &Frame,
    table: &SymbolTable,
) -> Result<Exp> {
    let left = resolve_exp(left, frame, table).map(Box::new)?;
    let right = resolve_exp(right, frame, table).map(Box::new)?;
    Ok(Exp::Binary(op, left, right))
}

fn resolve_exp(exp: Exp, frame: &Frame, table: &SymbolTable) -> Result<Exp> {
    match exp {
        Exp::Constant(_) => Ok(exp),
        Exp::Var(var) => resolve_var(var, frame).map(Exp::Var),
        Exp::Binary(op, left, right) => resolve_exp_binary(op, *left, *right, frame, table),
        Exp::Call(name, args) => resolve_exp_call(name, args, frame, table),
    }
}

// The initializer is resolved before the name is declared.
fn resolve_vardecl(decl: VarDecl, frame: &mut Frame, table: &SymbolTable) -> Result<VarDecl> {
    let VarDecl { mut var, init } = decl;
    let init = resolve_exp(init, frame, table)?;
    var.offset = Some(frame.allocate(var.name.clone())?);
    Ok(VarDecl { var, init })
}

fn resolve_statement(st: Statement, frame: &mut Frame, table: &SymbolTable) -> Result<Statement> {
    use Statement as S;
    match st {
        S::Return(e) => resolve_exp(e, frame, table).map(S::Return),
        S::Exp(e) => resolve_exp(e, frame, table).map(S::Exp),
        S::VarDecl(decl) => resolve_vardecl(decl, frame, table).map(S::VarDecl),
    }
}

fn resolve_block(block: Block, frame: &mut Frame, table: &SymbolTable) -> Result<Block> {
    let statements = block
        .statements
        .into_iter()
        .map(|st| resolve_statement(st, frame, table))
        .collect::<Result<Vec<_>>>()?;
    Ok(Block { statements })
}

fn resolve_function(fundec: FunctionDecl, table: &mut SymbolTable) -> Result<FunctionDecl> {
    let FunctionDecl { name, params, body } = fundec;
    let Some(body) = body else {
        return Ok(FunctionDecl { name, params, body });
    };

    let mut frame = Frame::new();
    for param in &params {
        frame.allocate(param.clone())?;
    }
    let body = resolve_block(body, &mut frame, table)?;

    trace!(%name, slots = frame.len(), frame_size = frame.aligned_size(), "resolved function body");
    table.add_frame(name.clone(), frame);

    Ok(FunctionDecl {
        name,
        params,
        body: Some(body),
    })
}

pub fn resolve_variables(ast: TranslationUnit, table: &mut SymbolTable) -> Result<TranslationUnit> {
    let functions = ast
        .functions
        .into_iter()
        .map(|fundec| resolve_function(fundec, table))
        .collect::<Result<Vec<_>>>()?;
    Ok(TranslationUnit { functions })
}
