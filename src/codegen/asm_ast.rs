use crate::ast::Identifier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmProgram {
    pub functions: Vec<AsmFunction>,
}

pub type AsmInstructions = Vec<AsmInstruction>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmFunction {
    pub name: Identifier,
    pub prologue: AsmInstructions,
    pub body: AsmInstructions,
    pub epilogue: AsmInstructions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsmInstruction {
    /// 64-bit move
    Mov(Operand, Operand),
    /// Sign-extend the low 32 bits of the first register into the second
    Movsx(Register, Register),
    Binary(BinaryOp, Operand, Operand),
    Push(Operand),
    Pop(Register),
    /// `plt` is set for callees that are not defined in this translation unit
    Call { name: Identifier, plt: bool },
    Jmp(Identifier),
    Label(Identifier),
    Ret,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    Imm(i64),
    Reg(Register),
    /// `%rbp`-relative memory
    Stack(i64),
    /// Variable that was never given a stack slot
    Pseudo(Identifier),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Imul,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Register {
    AX,
    CX,
    DX,
    DI,
    SI,
    R8,
    R9,
    SP,
    BP,
}

impl AsmInstruction {
    pub fn mem_operands(&self) -> bool {
        match self {
            Self::Mov(src, dst) | Self::Binary(_, src, dst) => src.is_mem() && dst.is_mem(),
            _ => false,
        }
    }

    /// Immediate that is neither a sign-extended 32-bit value nor a
    /// `movabsq` candidate.
    pub fn is_imm_toobig(&self) -> bool {
        match self {
            Self::Mov(Operand::Imm(i), dst) => !dst.is_reg() && !fits_imm32(*i),
            Self::Binary(_, Operand::Imm(i), _) | Self::Push(Operand::Imm(i)) => !fits_imm32(*i),
            _ => false,
        }
    }

    pub fn is_imm_dst(&self) -> bool {
        matches!(self, Self::Mov(_, Operand::Imm(_)) | Self::Binary(_, _, Operand::Imm(_)))
    }
}

#[inline]
pub fn fits_imm32(i: i64) -> bool {
    i32::try_from(i).is_ok()
}

impl Operand {
    pub fn is_mem(&self) -> bool {
        matches!(self, Self::Stack(_))
    }

    pub fn is_reg(&self) -> bool {
        matches!(self, Self::Reg(_))
    }
}
