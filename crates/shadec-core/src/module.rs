//! Module storage.

use crate::inst::{Block, Inst, Payload};
use crate::op::Op;
use crate::types::{TyId, TypeContext};

/// Index of an instruction in its module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct InstId(pub u32);

/// Index of a basic block in its module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct BlockId(pub u32);

/// One translation unit's IR.
///
/// Instructions and blocks live in flat per-module storage and refer to
/// each other by id. Module-scope instructions (global values and shared
/// literals) are tracked in `globals`, in declaration order.
#[derive(Debug, Default)]
pub struct Module {
    pub types: TypeContext,
    insts: Vec<Inst>,
    blocks: Vec<Block>,
    globals: Vec<InstId>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inst(&self, id: InstId) -> &Inst {
        &self.insts[id.0 as usize]
    }

    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.0 as usize]
    }

    /// Module-scope instructions, in declaration order.
    pub fn globals(&self) -> &[InstId] {
        &self.globals
    }

    /// Ordered blocks of a function.
    pub fn func_blocks(&self, func: InstId) -> &[BlockId] {
        self.inst(func).body()
    }

    /// Adds an instruction without attaching it anywhere.
    pub fn add_inst(&mut self, inst: Inst) -> InstId {
        let id = InstId(self.insts.len() as u32);
        self.insts.push(inst);
        id
    }

    /// Adds a function with an empty body at module scope.
    pub fn add_func(&mut self, name: impl Into<String>, ty: TyId) -> InstId {
        let mut inst = Inst::new(Op::Func, Some(ty), Vec::new());
        inst.payload = Some(Payload::Body(Vec::new()));
        inst.name = Some(name.into());
        let id = self.add_inst(inst);
        self.globals.push(id);
        id
    }

    /// Adds a global variable at module scope. `ty` is the pointer type of
    /// the variable.
    pub fn add_global_var(&mut self, name: impl Into<String>, ty: TyId) -> InstId {
        let mut inst = Inst::new(Op::GlobalVar, Some(ty), Vec::new());
        inst.name = Some(name.into());
        let id = self.add_inst(inst);
        self.globals.push(id);
        id
    }

    /// Adds a global constant at module scope.
    pub fn add_global_constant(&mut self, name: impl Into<String>, ty: TyId) -> InstId {
        let mut inst = Inst::new(Op::GlobalConstant, Some(ty), Vec::new());
        inst.name = Some(name.into());
        let id = self.add_inst(inst);
        self.globals.push(id);
        id
    }

    /// Adds a shared integer literal at module scope.
    ///
    /// Module-scope literals are not global values; functions referring to
    /// them pick them up through the module's constant pool when encoded.
    pub fn int_const(&mut self, ty: TyId, value: i64) -> InstId {
        let mut inst = Inst::new(Op::IntLit, Some(ty), Vec::new());
        inst.payload = Some(Payload::Int(value));
        let id = self.add_inst(inst);
        self.globals.push(id);
        id
    }

    /// Adds a shared float literal at module scope.
    pub fn float_const(&mut self, ty: TyId, value: f64) -> InstId {
        let mut inst = Inst::new(Op::FloatLit, Some(ty), Vec::new());
        inst.payload = Some(Payload::Float(value));
        let id = self.add_inst(inst);
        self.globals.push(id);
        id
    }

    /// Adds a shared bool literal at module scope.
    pub fn bool_const(&mut self, ty: TyId, value: bool) -> InstId {
        let mut inst = Inst::new(Op::BoolLit, Some(ty), Vec::new());
        inst.payload = Some(Payload::Bool(value));
        let id = self.add_inst(inst);
        self.globals.push(id);
        id
    }

    /// Appends a fresh empty block to a function's body.
    pub fn append_block(&mut self, func: InstId) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        self.blocks.push(Block::default());
        match &mut self.insts[func.0 as usize].payload {
            Some(Payload::Body(blocks)) => blocks.push(id),
            _ => panic!("append_block on a non-function instruction"),
        }
        id
    }

    /// Appends an instruction to a block.
    pub fn push_inst(&mut self, block: BlockId, inst: Inst) -> InstId {
        let id = self.add_inst(inst);
        self.blocks[block.0 as usize].insts.push(id);
        id
    }
}
