//! Function encoding.
//!
//! One function is encoded in five ordered passes over its blocks:
//! 1. number the blocks, so forward branches can be encoded;
//! 2. count registers and block parameters, then reserve the contiguous
//!    block and register arrays;
//! 3. assign register ids and fill in the register records;
//! 4. encode instructions into a per-function code buffer, remembering
//!    each block's starting offset;
//! 5. copy the code buffer into the arena in one piece, patch the block
//!    records, and emit the imported-constant table.
//!
//! Blocks and registers share one local id space (an operand position
//! always implies which one is meant). References that leave the function
//! are projected into that space as the bitwise complement of an index
//! into the function's import table.

use std::collections::HashMap;

use shadec_bytecode::records as bc;
use shadec_bytecode::{Arena, Ref};
use shadec_core::{BlockId, InstId, Op, TypeShape};

use super::error::EmitError;
use super::module::ModuleCx;

pub(crate) struct FuncEncoder<'a, 'ir> {
    pub(super) arena: &'a mut Arena,
    pub(super) cx: &'a mut ModuleCx<'ir>,
    /// Code buffer of the function being encoded; copied into the arena
    /// only once every block is done.
    pub(super) code: Vec<u8>,
    pub(super) local_ids: HashMap<InstId, i64>,
    pub(super) block_ids: HashMap<BlockId, i64>,
    /// Global symbols and literals this function pulls in, in the order
    /// they were first referenced.
    pub(super) imports: Vec<bc::Import>,
}

impl FuncEncoder<'_, '_> {
    /// Local id of a value operand.
    ///
    /// In-function definitions resolve to their register id. Anything else
    /// goes through the module scope and gets an import slot; the slot
    /// index is memoized so repeated references share one entry.
    pub(super) fn value_local_id(&mut self, inst: InstId) -> Result<i64, EmitError> {
        if let Some(&id) = self.local_ids.get(&inst) {
            return Ok(id);
        }

        let import = self.cx.global_value(inst)?;
        let index = self.imports.len();
        self.imports.push(import);

        let id = !(index as i64);
        self.local_ids.insert(inst, id);
        Ok(id)
    }

    /// Local id of a branch-target block.
    pub(super) fn block_local_id(&self, block: BlockId) -> Result<i64, EmitError> {
        self.block_ids
            .get(&block)
            .copied()
            .ok_or(EmitError::ForeignBlock)
    }
}

/// Encodes one function, returning its record handle. The caller fills in
/// the symbol name afterwards.
pub(crate) fn encode_func(
    arena: &mut Arena,
    cx: &mut ModuleCx<'_>,
    func: InstId,
) -> Result<Ref<bc::Func>, EmitError> {
    let func_rec = arena.alloc::<bc::Func>()?;
    let type_id = cx.type_id_for_symbol(arena, func)?;

    let ir = cx.ir;
    let blocks = ir.func_blocks(func);

    let mut enc = FuncEncoder {
        arena,
        cx,
        code: Vec::new(),
        local_ids: HashMap::new(),
        block_ids: HashMap::new(),
        imports: Vec::new(),
    };

    // Pass 1: number the blocks in source order.
    for (index, &block) in blocks.iter().enumerate() {
        enc.block_ids.insert(block, index as i64);
    }
    let bc_blocks = enc.arena.alloc_array::<bc::Block>(blocks.len())?;

    // Pass 2: count registers and block parameters.
    let mut reg_count = 0usize;
    let mut param_counts = vec![0u32; blocks.len()];
    for (index, &block) in blocks.iter().enumerate() {
        for &inst in &ir.block(block).insts {
            match ir.inst(inst).op {
                Op::Param => {
                    reg_count += 1;
                    param_counts[index] += 1;
                }
                // A var needs two slots: the pointer, then the storage it
                // points at.
                Op::Var => reg_count += 2,
                _ => {
                    if enc.cx.has_result(inst) {
                        reg_count += 1;
                    }
                }
            }
        }
    }
    let bc_regs = enc.arena.alloc_array::<bc::Reg>(reg_count)?;

    // Pass 3: assign register ids and fill in the register records. Block
    // parameters are the leading instructions of their block, so they get
    // the block's first registers; the entry block's parameters are the
    // function's.
    let mut reg_counter = 0usize;
    let mut block_params = vec![0u64; blocks.len()];
    for (index, &block) in blocks.iter().enumerate() {
        block_params[index] = bc_regs.at(reg_counter).offset();
        for &inst in &ir.block(block).insts {
            let op = ir.inst(inst).op;
            match op {
                Op::Var => {
                    let local = reg_counter as i64;
                    reg_counter += 2;
                    enc.local_ids.insert(inst, local);

                    let pointer_type = enc.cx.type_id_for_symbol(enc.arena, inst)?;
                    let pointee = match ir.inst(inst).ty.map(|ty| ir.types.shape(ty)) {
                        Some(TypeShape::Ptr(value)) => *value,
                        _ => return Err(EmitError::VarWithoutPointerType),
                    };
                    let pointee_type = enc.cx.type_id(enc.arena, Some(pointee))?;

                    enc.arena.write(
                        bc_regs.at(local as usize),
                        &bc::Reg {
                            op: op.as_u32(),
                            type_id: pointer_type,
                            previous_var_index_plus_one: local as u32,
                            ..Default::default()
                        },
                    );
                    enc.arena.write(
                        bc_regs.at(local as usize + 1),
                        &bc::Reg {
                            op: op.as_u32(),
                            type_id: pointee_type.0,
                            previous_var_index_plus_one: local as u32 + 1,
                            ..Default::default()
                        },
                    );
                }
                _ if op == Op::Param || enc.cx.has_result(inst) => {
                    let local = reg_counter as i64;
                    reg_counter += 1;
                    enc.local_ids.insert(inst, local);

                    let reg_type = enc.cx.type_id_for_symbol(enc.arena, inst)?;
                    enc.arena.write(
                        bc_regs.at(local as usize),
                        &bc::Reg {
                            op: op.as_u32(),
                            type_id: reg_type,
                            previous_var_index_plus_one: local as u32,
                            ..Default::default()
                        },
                    );
                }
                _ => {}
            }
        }
    }
    if reg_counter != reg_count {
        return Err(EmitError::RegCountMismatch {
            reserved: reg_count as u32,
            assigned: reg_counter as u32,
        });
    }

    // Pass 4: encode the instruction stream. Params emit no code; their
    // values arrive by the calling convention.
    let mut block_offsets = Vec::with_capacity(blocks.len());
    for &block in blocks {
        block_offsets.push(enc.code.len() as u64);
        for &inst in &ir.block(block).insts {
            if ir.inst(inst).op == Op::Param {
                continue;
            }
            enc.encode_inst(inst)?;
        }
    }

    // Pass 5: materialize the code and stitch everything together.
    let code_base = enc.arena.alloc_bytes(&enc.code)?;
    for (index, &offset) in block_offsets.iter().enumerate() {
        enc.arena.write(
            bc_blocks.at(index),
            &bc::Block {
                param_count: param_counts[index],
                params: block_params[index],
                code: code_base + offset,
                ..Default::default()
            },
        );
    }

    let bc_consts = enc.arena.alloc_array::<bc::Import>(enc.imports.len())?;
    for (index, import) in enc.imports.iter().enumerate() {
        enc.arena.write(bc_consts.at(index), import);
    }

    let const_count = enc.imports.len() as u32;
    enc.arena.write(
        func_rec,
        &bc::Func {
            op: Op::Func.as_u32(),
            type_id,
            name: 0,
            block_count: blocks.len() as u32,
            blocks: bc_blocks.offset(),
            reg_count: reg_count as u32,
            regs: bc_regs.offset(),
            const_count,
            consts: bc_consts.offset(),
            ..Default::default()
        },
    );
    Ok(func_rec)
}
