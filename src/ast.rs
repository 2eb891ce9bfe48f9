pub type Identifier = String;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUnit {
    pub functions: Vec<FunctionDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: Identifier,
    pub params: Vec<Identifier>,
    /// `None` for a prototype.
    pub body: Option<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Return(Exp),
    VarDecl(VarDecl),
    Exp(Exp),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub var: Var,
    pub init: Exp,
}

/// Variable occurrence. `offset` is the `%rbp`-relative stack slot filled in
/// by semantic analysis; the parser leaves it empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Var {
    pub name: Identifier,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exp {
    Constant(i64),
    Var(Var),
    Binary(AstBinaryOp, Box<Exp>, Box<Exp>),
    Call(Identifier, Vec<Exp>),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AstBinaryOp {
    Add,
    Multiply,
}

impl FunctionDecl {
    #[inline]
    pub fn is_definition(&self) -> bool {
        self.body.is_some()
    }
}

impl Var {
    pub fn new(name: Identifier) -> Self {
        Self { name, offset: None }
    }
}

impl Exp {
    pub fn constant(c: i64) -> Self {
        Self::Constant(c)
    }

    pub fn var(name: Identifier) -> Self {
        Self::Var(Var::new(name))
    }

    pub fn binary(op: AstBinaryOp, left: Box<Exp>, right: Box<Exp>) -> Self {
        Self::Binary(op, left, right)
    }

    pub fn call(name: Identifier, args: Vec<Exp>) -> Self {
        Self::Call(name, args)
    }
}
