//! Code emission
//!
//! Turns an [AsmProgram](crate::codegen::AsmProgram) into GNU assembler (AT&T syntax) text.
//! Register and mnemonic names are produced through [Display](std::fmt::Display) implementations,
//! while [emit] validates every instruction first so that a malformed instruction
//! surfaces as an [EmitError] instead of unassemblable output.


use crate::ast::Identifier;
use crate::codegen::*;

use std::fmt::{self, Write};
use thiserror::Error;
use tracing::debug;

/// Internal consistency violations in generated code. These indicate a
/// compiler bug, not a problem with the compiled program.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmitError {
    #[error("pseudo operand `{0}` reached emission")]
    PseudoOperand(Identifier),
    #[error("instruction with two memory operands: {0:?}")]
    TwoMemoryOperands(AsmInstruction),
    #[error("immediate operand cannot be encoded: {0:?}")]
    ImmediateTooBig(AsmInstruction),
    #[error("immediate used as destination: {0:?}")]
    ImmediateDestination(AsmInstruction),
    #[error(transparent)]
    Format(#[from] fmt::Error),
}

pub type Result<T> = std::result::Result<T, EmitError>;

#[cfg(target_os = "macos")]
fn symbol(name: &str) -> String {
    format!("_{name}")
}

#[cfg(not(target_os = "macos"))]
fn symbol(name: &str) -> String {
    name.to_owned()
}

#[cfg(target_os = "macos")]
const LOCAL_LABEL_PREFIX: &str = "L";

#[cfg(not(target_os = "macos"))]
const LOCAL_LABEL_PREFIX: &str = ".L";

fn call_target(name: &str, plt: bool) -> String {
    if plt && cfg!(target_os = "linux") {
        format!("{}@PLT", symbol(name))
    } else {
        symbol(name)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Add => write!(f, "addq"),
            Self::Sub => write!(f, "subq"),
            Self::Imul => write!(f, "imulq"),
        }
    }
}

impl Register {
    fn quadword(self) -> &'static str {
        match self {
            Self::AX => "%rax",
            Self::CX => "%rcx",
            Self::DX => "%rdx",
            Self::DI => "%rdi",
            Self::SI => "%rsi",
            Self::R8 => "%r8",
            Self::R9 => "%r9",
            Self::SP => "%rsp",
            Self::BP => "%rbp",
        }
    }

    fn longword(self) -> &'static str {
        match self {
            Self::AX => "%eax",
            Self::CX => "%ecx",
            Self::DX => "%edx",
            Self::DI => "%edi",
            Self::SI => "%esi",
            Self::R8 => "%r8d",
            Self::R9 => "%r9d",
            Self::SP => "%esp",
            Self::BP => "%ebp",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.quadword())
    }
}

fn display_operand(op: &Operand) -> Result<String> {
    match op {
        Operand::Reg(r) => Ok(r.to_string()),
        Operand::Imm(i) => Ok(format!("${i}")),
        Operand::Stack(i) => Ok(format!("{i}(%rbp)")),
        Operand::Pseudo(name) => Err(EmitError::PseudoOperand(name.clone())),
    }
}

fn check_instruction(instruction: &AsmInstruction) -> Result<()> {
    if instruction.mem_operands() {
        return Err(EmitError::TwoMemoryOperands(instruction.clone()));
    }
    if instruction.is_imm_dst() {
        return Err(EmitError::ImmediateDestination(instruction.clone()));
    }
    if instruction.is_imm_toobig() {
        return Err(EmitError::ImmediateTooBig(instruction.clone()));
    }
    Ok(())
}

fn display_instruction(instruction: &AsmInstruction) -> Result<String> {
    check_instruction(instruction)?;
    let line = match instruction {
        AsmInstruction::Mov(Operand::Imm(i), dst) if !fits_imm32(*i) => {
            format!("\tmovabsq ${i}, {}", display_operand(dst)?)
        }
        AsmInstruction::Mov(src, dst) => {
            format!("\tmovq {}, {}", display_operand(src)?, display_operand(dst)?)
        }
        AsmInstruction::Movsx(src, dst) => {
            format!("\tmovslq {}, {}", src.longword(), dst.quadword())
        }
        AsmInstruction::Binary(op, src, dst) => {
            format!("\t{op} {}, {}", display_operand(src)?, display_operand(dst)?)
        }
        AsmInstruction::Push(op) => format!("\tpushq {}", display_operand(op)?),
        AsmInstruction::Pop(reg) => format!("\tpopq {reg}"),
        AsmInstruction::Call { name, plt } => format!("\tcall {}", call_target(name, *plt)),
        AsmInstruction::Jmp(label) => format!("\tjmp {LOCAL_LABEL_PREFIX}{label}"),
        AsmInstruction::Label(label) => format!("{LOCAL_LABEL_PREFIX}{label}:"),
        AsmInstruction::Ret => String::from("\tret"),
    };
    Ok(line)
}

fn emit_function(function: &AsmFunction, out: &mut String) -> Result<()> {
    let name = symbol(&function.name);
    writeln!(out, "\t.globl {name}")?;
    writeln!(out, "\t.text")?;
    writeln!(out, "{name}:")?;

    let instructions = function
        .prologue
        .iter()
        .chain(&function.body)
        .chain(&function.epilogue);
    for instruction in instructions {
        writeln!(out, "{}", display_instruction(instruction)?)?;
    }
    Ok(())
}

/// Renders the whole program. Nothing is returned unless every instruction is valid.
pub fn emit(program: &AsmProgram) -> Result<String> {
    let mut out = String::new();
    for function in &program.functions {
        emit_function(function, &mut out)?;
    }
    if cfg!(target_os = "linux") {
        writeln!(out, "\t.section .note.GNU-stack,\"\",@progbits")?;
    }
    debug!(bytes = out.len(), "emission finished");
    Ok(out)
}
