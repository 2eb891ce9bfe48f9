use crate::ast::*;
use crate::codegen::asm_ast::*;
use crate::semantic_analysis::{Frame, SymbolTable, MAX_REGISTER_ARGS};

use tracing::trace;

pub const ARG_REGISTERS: [Register; MAX_REGISTER_ARGS] = [
    Register::DI,
    Register::SI,
    Register::DX,
    Register::CX,
    Register::R8,
    Register::R9,
];

/// Bytes the stack grows by for every value pushed during evaluation.
const PUSH_SIZE: i64 = 8;

fn var_operand(var: &Var) -> Operand {
    var.offset
        .map_or_else(|| Operand::Pseudo(var.name.clone()), Operand::Stack)
}

/// Per-function instruction builder.
///
/// Expressions are evaluated into `%rax`, with pending left operands kept on
/// the machine stack. `depth` counts those pending pushes so calls can be
/// padded to keep `%rsp` 16-byte aligned.
struct FunctionGen<'a> {
    symbols: &'a SymbolTable,
    epilogue_label: Identifier,
    instructions: AsmInstructions,
    depth: usize,
}

impl<'a> FunctionGen<'a> {
    fn new(name: &str, symbols: &'a SymbolTable) -> Self {
        Self {
            symbols,
            epilogue_label: format!("{name}.epilogue"),
            instructions: AsmInstructions::new(),
            depth: 0,
        }
    }

    fn emit(&mut self, instruction: AsmInstruction) {
        self.instructions.push(instruction);
    }

    fn push_ax(&mut self) {
        self.emit(AsmInstruction::Push(Operand::Reg(Register::AX)));
        self.depth += 1;
    }

    fn pop(&mut self, reg: Register) {
        self.emit(AsmInstruction::Pop(reg));
        self.depth -= 1;
    }

    fn gen_constant(&mut self, c: i64) {
        let mov = AsmInstruction::Mov(Operand::Imm(c), Operand::Reg(Register::AX));
        self.emit(mov);
    }

    fn gen_var(&mut self, var: &Var) {
        let mov = AsmInstruction::Mov(var_operand(var), Operand::Reg(Register::AX));
        self.emit(mov);
    }

    fn gen_binary(&mut self, op: AstBinaryOp, left: &Exp, right: &Exp) {
        self.gen_exp(left);
        self.push_ax();
        self.gen_exp(right);
        self.pop(Register::CX);

        let op = BinaryOp::from(op);
        let cx = Operand::Reg(Register::CX);
        let ax = Operand::Reg(Register::AX);
        self.emit(AsmInstruction::Binary(op, cx, ax));
    }

    fn gen_call(&mut self, name: &Identifier, args: &[Exp]) {
        for arg in args {
            self.gen_exp(arg);
            self.push_ax();
        }
        for reg in ARG_REGISTERS.iter().take(args.len()).rev() {
            self.pop(*reg);
        }

        let padding = if self.depth % 2 == 1 { PUSH_SIZE } else { 0 };
        let sp = Operand::Reg(Register::SP);
        if padding != 0 {
            let allocate = AsmInstruction::Binary(BinaryOp::Sub, Operand::Imm(padding), sp.clone());
            self.emit(allocate);
        }

        let plt = !self.symbols.is_fun_defined(name);
        self.emit(AsmInstruction::Call {
            name: name.clone(),
            plt,
        });

        if padding != 0 {
            let dealloc = AsmInstruction::Binary(BinaryOp::Add, Operand::Imm(padding), sp);
            self.emit(dealloc);
        }
        // callee returns a 32-bit int in %eax
        self.emit(AsmInstruction::Movsx(Register::AX, Register::AX));
    }

    fn gen_exp(&mut self, exp: &Exp) {
        match exp {
            Exp::Constant(c) => self.gen_constant(*c),
            Exp::Var(var) => self.gen_var(var),
            Exp::Binary(op, left, right) => self.gen_binary(*op, left, right),
            Exp::Call(name, args) => self.gen_call(name, args),
        }
    }

    fn gen_statement(&mut self, st: &Statement) {
        match st {
            Statement::Return(exp) => {
                self.gen_exp(exp);
                let jmp = AsmInstruction::Jmp(self.epilogue_label.clone());
                self.emit(jmp);
            }
            Statement::VarDecl(VarDecl { var, init }) => {
                self.gen_exp(init);
                let mov = AsmInstruction::Mov(Operand::Reg(Register::AX), var_operand(var));
                self.emit(mov);
            }
            Statement::Exp(exp) => self.gen_exp(exp),
        }
    }

    /// Copies incoming register arguments into their stack slots.
    fn gen_params(&mut self, params: &[Identifier], frame: &Frame) {
        for (param, reg) in params.iter().zip(ARG_REGISTERS) {
            let dst = frame
                .get_offset(param)
                .map_or_else(|| Operand::Pseudo(param.clone()), Operand::Stack);
            self.emit(AsmInstruction::Movsx(reg, Register::AX));
            self.emit(AsmInstruction::Mov(Operand::Reg(Register::AX), dst));
        }
    }

    fn gen_body(mut self, params: &[Identifier], frame: &Frame, body: &Block) -> AsmInstructions {
        self.gen_params(params, frame);
        for statement in &body.statements {
            self.gen_statement(statement);
        }
        debug_assert_eq!(0, self.depth, "unbalanced evaluation stack");
        // falling off the end returns 0
        self.gen_constant(0);
        self.instructions
    }
}

fn gen_prologue(frame: &Frame) -> AsmInstructions {
    let bp = Operand::Reg(Register::BP);
    let sp = Operand::Reg(Register::SP);
    let mut prologue = vec![
        AsmInstruction::Push(bp.clone()),
        AsmInstruction::Mov(sp.clone(), bp),
    ];
    let stack_size = frame.aligned_size();
    if stack_size != 0 {
        prologue.push(AsmInstruction::Binary(BinaryOp::Sub, Operand::Imm(stack_size), sp));
    }
    prologue
}

fn gen_epilogue(label: Identifier) -> AsmInstructions {
    vec![
        AsmInstruction::Label(label),
        AsmInstruction::Mov(Operand::Reg(Register::BP), Operand::Reg(Register::SP)),
        AsmInstruction::Pop(Register::BP),
        AsmInstruction::Ret,
    ]
}

pub fn gen_function(
    fundec: &FunctionDecl,
    body: &Block,
    symbols: &SymbolTable,
) -> AsmFunction {
    let empty = Frame::new();
    let frame = symbols.get_frame(&fundec.name).unwrap_or(&empty);
    let generator = FunctionGen::new(&fundec.name, symbols);
    let epilogue_label = generator.epilogue_label.clone();

    let prologue = gen_prologue(frame);
    let body = generator.gen_body(&fundec.params, frame, body);
    let epilogue = gen_epilogue(epilogue_label);
    trace!(name = %fundec.name, instructions = body.len(), "generated function");

    AsmFunction {
        name: fundec.name.clone(),
        prologue,
        body,
        epilogue,
    }
}

impl From<AstBinaryOp> for BinaryOp {
    fn from(value: AstBinaryOp) -> Self {
        match value {
            AstBinaryOp::Add => Self::Add,
            AstBinaryOp::Multiply => Self::Imul,
        }
    }
}
