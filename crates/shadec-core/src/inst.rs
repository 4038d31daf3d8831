//! Instructions and basic blocks.

use crate::module::{BlockId, InstId};
use crate::op::Op;
use crate::types::TyId;

/// An instruction operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// A value produced by another instruction (or a module-scope
    /// instruction such as a function or a shared literal).
    Value(InstId),
    /// A branch target.
    Block(BlockId),
}

/// Opcode-specific instruction data.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// `IntLit` value.
    Int(i64),
    /// `FloatLit` value.
    Float(f64),
    /// `BoolLit` value.
    Bool(bool),
    /// `Func` body: ordered basic blocks.
    Body(Vec<BlockId>),
}

/// One IR instruction.
#[derive(Clone, Debug)]
pub struct Inst {
    pub op: Op,
    /// Data type of the produced value; `None` for instructions that
    /// yield nothing.
    pub ty: Option<TyId>,
    pub operands: Vec<Operand>,
    pub payload: Option<Payload>,
    /// Source-level name, when the front end attached one.
    pub name: Option<String>,
}

impl Inst {
    pub fn new(op: Op, ty: Option<TyId>, operands: Vec<Operand>) -> Self {
        Self {
            op,
            ty,
            operands,
            payload: None,
            name: None,
        }
    }

    pub fn int_value(&self) -> Option<i64> {
        match self.payload {
            Some(Payload::Int(v)) => Some(v),
            _ => None,
        }
    }

    pub fn float_value(&self) -> Option<f64> {
        match self.payload {
            Some(Payload::Float(v)) => Some(v),
            _ => None,
        }
    }

    pub fn bool_value(&self) -> Option<bool> {
        match self.payload {
            Some(Payload::Bool(v)) => Some(v),
            _ => None,
        }
    }

    /// Blocks of a `Func` instruction, in order.
    pub fn body(&self) -> &[BlockId] {
        match &self.payload {
            Some(Payload::Body(blocks)) => blocks,
            _ => &[],
        }
    }
}

/// A basic block: an ordered list of instructions, the leading ones being
/// the block's `Param`s.
#[derive(Clone, Debug, Default)]
pub struct Block {
    pub insts: Vec<InstId>,
}
