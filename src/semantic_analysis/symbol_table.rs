use crate::ast::Identifier;
use crate::semantic_analysis::{Result, SemAnalysisError};

use std::collections::HashMap;
use tracing::trace;

/// Size of every stack slot. Values are kept at machine width.
pub const SLOT_SIZE: i64 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunSymbol {
    pub arity: usize,
    pub defined: bool,
}

/// Flat per-function namespace mapping parameters and locals to
/// `%rbp`-relative offsets, handed out downwards in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    slots: HashMap<Identifier, i64>,
    size: i64,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, name: Identifier) -> Result<i64> {
        if self.slots.contains_key(&name) {
            return Err(SemAnalysisError::DuplicateVariable(name));
        }
        self.size += SLOT_SIZE;
        let offset = -self.size;
        trace!(%name, offset, "allocated stack slot");
        self.slots.insert(name, offset);
        Ok(offset)
    }

    pub fn get_offset(&self, name: &str) -> Option<i64> {
        self.slots.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Bytes used by all slots.
    pub fn size(&self) -> i64 {
        self.size
    }

    /// Bytes to reserve below `%rbp`, rounded up so that `%rsp` stays 16-byte aligned.
    pub fn aligned_size(&self) -> i64 {
        (self.size + 15) / 16 * 16
    }
}

/// Everything semantic analysis learned about one translation unit.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    functions: HashMap<Identifier, FunSymbol>,
    frames: HashMap<Identifier, Frame>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_function(&self, name: &str) -> Option<FunSymbol> {
        self.functions.get(name).copied()
    }

    pub fn is_fun_defined(&self, name: &str) -> bool {
        self.get_function(name).filter(|f| f.defined).is_some()
    }

    pub fn get_frame(&self, name: &str) -> Option<&Frame> {
        self.frames.get(name)
    }

    pub(super) fn add_function(&mut self, name: Identifier, symbol: FunSymbol) {
        self.functions.insert(name, symbol);
    }

    pub(super) fn add_frame(&mut self, name: Identifier, frame: Frame) {
        self.frames.insert(name, frame);
    }
}
