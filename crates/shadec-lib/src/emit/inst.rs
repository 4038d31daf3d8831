//! Instruction encoding.
//!
//! The default layout is `op, type id, operand count, operands…,
//! destination`, with the destination present iff the instruction produces
//! a value (it is the instruction encoded as its own operand). A handful
//! of opcodes use tighter layouts.
//!
//! Type ids are written unsigned; value and block operands are written
//! signed, so register ids and import-table complements share one stream.

use shadec_bytecode::varint::{write_sint, write_uint};
use shadec_core::{InstId, Op, Operand, TyId};

use super::error::EmitError;
use super::func::FuncEncoder;

impl FuncEncoder<'_, '_> {
    /// Encodes one instruction into the function's code buffer.
    pub(super) fn encode_inst(&mut self, inst_id: InstId) -> Result<(), EmitError> {
        let ir = self.cx.ir;
        let inst = ir.inst(inst_id);

        match inst.op {
            Op::ReturnVoid => {
                self.emit_op(Op::ReturnVoid);
            }

            Op::IntLit => {
                self.emit_op(inst.op);
                self.emit_type(inst.ty)?;
                // TODO: distinct encodings for signed vs. unsigned
                // literals; the raw bit pattern is lossless either way.
                let value = inst.int_value().ok_or(EmitError::MissingLiteralValue)?;
                write_uint(&mut self.code, value as u64);
                self.emit_dest(inst_id)?;
            }

            Op::FloatLit => {
                self.emit_op(inst.op);
                self.emit_type(inst.ty)?;
                let value = inst.float_value().ok_or(EmitError::MissingLiteralValue)?;
                self.code.extend_from_slice(&value.to_le_bytes());
                self.emit_dest(inst_id)?;
            }

            Op::BoolLit => {
                self.emit_op(inst.op);
                let value = inst.bool_value().ok_or(EmitError::MissingLiteralValue)?;
                write_uint(&mut self.code, u64::from(value));
                self.emit_dest(inst_id)?;
            }

            Op::Store => {
                self.emit_op(inst.op);
                // The stored value's type rides along.
                let value_ty = match inst.operands.as_slice() {
                    [Operand::Value(_), Operand::Value(value)] => ir.inst(*value).ty,
                    _ => return Err(EmitError::MalformedOperands { op: inst.op }),
                };
                self.emit_type(value_ty)?;
                self.emit_operand(inst.operands[0])?;
                self.emit_operand(inst.operands[1])?;
            }

            Op::Load => {
                self.emit_op(inst.op);
                self.emit_type(inst.ty)?;
                let ptr = *inst
                    .operands
                    .first()
                    .ok_or(EmitError::MalformedOperands { op: inst.op })?;
                self.emit_operand(ptr)?;
                self.emit_dest(inst_id)?;
            }

            _ => {
                self.emit_op(inst.op);
                self.emit_type(inst.ty)?;
                write_uint(&mut self.code, inst.operands.len() as u64);
                for &operand in &inst.operands {
                    self.emit_operand(operand)?;
                }
                if self.cx.has_result(inst_id) {
                    self.emit_dest(inst_id)?;
                }
            }
        }
        Ok(())
    }

    fn emit_op(&mut self, op: Op) {
        write_uint(&mut self.code, u64::from(op.as_u32()));
    }

    fn emit_type(&mut self, ty: Option<TyId>) -> Result<(), EmitError> {
        let id = self.cx.type_id(self.arena, ty)?;
        write_uint(&mut self.code, u64::from(id.0));
        Ok(())
    }

    fn emit_operand(&mut self, operand: Operand) -> Result<(), EmitError> {
        let id = match operand {
            Operand::Value(value) => self.value_local_id(value)?,
            Operand::Block(block) => self.block_local_id(block)?,
        };
        write_sint(&mut self.code, id);
        Ok(())
    }

    fn emit_dest(&mut self, inst: InstId) -> Result<(), EmitError> {
        let id = self.value_local_id(inst)?;
        write_sint(&mut self.code, id);
        Ok(())
    }
}
