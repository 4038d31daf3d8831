//! Convenience builder for function bodies.

use crate::inst::{Inst, Operand, Payload};
use crate::module::{BlockId, InstId, Module};
use crate::op::Op;
use crate::types::TyId;

/// Appends instructions to one block of a function.
///
/// Parameters must be added before any other instruction of the block so
/// that they stay the block's leading instructions.
pub struct FuncBuilder<'m> {
    module: &'m mut Module,
    block: BlockId,
}

impl<'m> FuncBuilder<'m> {
    pub fn new(module: &'m mut Module, block: BlockId) -> Self {
        Self { module, block }
    }

    /// Switches the builder to another block of the same function.
    pub fn select_block(&mut self, block: BlockId) {
        self.block = block;
    }

    pub fn block(&self) -> BlockId {
        self.block
    }

    fn push(&mut self, inst: Inst) -> InstId {
        self.module.push_inst(self.block, inst)
    }

    pub fn param(&mut self, ty: TyId) -> InstId {
        self.push(Inst::new(Op::Param, Some(ty), Vec::new()))
    }

    /// Declares a local variable; `ptr_ty` is the pointer type of the
    /// produced address.
    pub fn var(&mut self, ptr_ty: TyId) -> InstId {
        self.push(Inst::new(Op::Var, Some(ptr_ty), Vec::new()))
    }

    pub fn int_lit(&mut self, ty: TyId, value: i64) -> InstId {
        let mut inst = Inst::new(Op::IntLit, Some(ty), Vec::new());
        inst.payload = Some(Payload::Int(value));
        self.push(inst)
    }

    pub fn float_lit(&mut self, ty: TyId, value: f64) -> InstId {
        let mut inst = Inst::new(Op::FloatLit, Some(ty), Vec::new());
        inst.payload = Some(Payload::Float(value));
        self.push(inst)
    }

    pub fn bool_lit(&mut self, ty: TyId, value: bool) -> InstId {
        let mut inst = Inst::new(Op::BoolLit, Some(ty), Vec::new());
        inst.payload = Some(Payload::Bool(value));
        self.push(inst)
    }

    pub fn load(&mut self, ty: TyId, ptr: InstId) -> InstId {
        self.push(Inst::new(Op::Load, Some(ty), vec![Operand::Value(ptr)]))
    }

    /// Stores `value` through `ptr`; produces nothing.
    pub fn store(&mut self, ptr: InstId, value: InstId) -> InstId {
        self.push(Inst::new(
            Op::Store,
            None,
            vec![Operand::Value(ptr), Operand::Value(value)],
        ))
    }

    pub fn call(&mut self, ty: TyId, callee: InstId, args: &[InstId]) -> InstId {
        let mut operands = Vec::with_capacity(args.len() + 1);
        operands.push(Operand::Value(callee));
        operands.extend(args.iter().map(|&a| Operand::Value(a)));
        self.push(Inst::new(Op::Call, Some(ty), operands))
    }

    pub fn add(&mut self, ty: TyId, lhs: InstId, rhs: InstId) -> InstId {
        self.push(Inst::new(
            Op::Add,
            Some(ty),
            vec![Operand::Value(lhs), Operand::Value(rhs)],
        ))
    }

    pub fn mul(&mut self, ty: TyId, lhs: InstId, rhs: InstId) -> InstId {
        self.push(Inst::new(
            Op::Mul,
            Some(ty),
            vec![Operand::Value(lhs), Operand::Value(rhs)],
        ))
    }

    pub fn branch(&mut self, target: BlockId) -> InstId {
        self.push(Inst::new(Op::Branch, None, vec![Operand::Block(target)]))
    }

    pub fn cond_branch(&mut self, cond: InstId, then: BlockId, els: BlockId) -> InstId {
        self.push(Inst::new(
            Op::CondBranch,
            None,
            vec![
                Operand::Value(cond),
                Operand::Block(then),
                Operand::Block(els),
            ],
        ))
    }

    pub fn ret(&mut self, value: InstId) -> InstId {
        self.push(Inst::new(Op::ReturnVal, None, vec![Operand::Value(value)]))
    }

    pub fn ret_void(&mut self) -> InstId {
        self.push(Inst::new(Op::ReturnVoid, None, Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_lead_the_block() {
        let mut module = Module::new();
        let int32 = module.types.int32();
        let fn_ty = module.types.func(int32, vec![int32]);
        let f = module.add_func("f", fn_ty);
        let entry = module.append_block(f);

        let mut b = FuncBuilder::new(&mut module, entry);
        let x = b.param(int32);
        let doubled = b.add(int32, x, x);
        b.ret(doubled);

        let insts = &module.block(entry).insts;
        assert_eq!(insts.len(), 3);
        assert_eq!(module.inst(insts[0]).op, Op::Param);
        assert_eq!(module.inst(insts[1]).op, Op::Add);
        assert_eq!(module.inst(insts[2]).op, Op::ReturnVal);
    }

    #[test]
    fn store_has_no_result_type() {
        let mut module = Module::new();
        let int32 = module.types.int32();
        let ptr = module.types.ptr(int32);
        let void = module.types.void();
        let fn_ty = module.types.func(void, vec![]);
        let f = module.add_func("f", fn_ty);
        let entry = module.append_block(f);

        let mut b = FuncBuilder::new(&mut module, entry);
        let p = b.var(ptr);
        let seven = b.int_lit(int32, 7);
        let store = b.store(p, seven);
        b.ret_void();

        assert_eq!(module.inst(store).ty, None);
        assert_eq!(module.inst(store).operands.len(), 2);
    }
}
