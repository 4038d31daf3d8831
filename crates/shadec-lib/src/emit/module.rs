//! Module-level encoding: global symbol table, constant pool, type table.

use indexmap::IndexMap;
use std::collections::HashMap;

use shadec_bytecode::records as bc;
use shadec_bytecode::{Arena, Ref, TypeId};
use shadec_core::{InstId, Module, Op, Payload, TyId, TypeShape};

use super::error::EmitError;
use super::func::encode_func;
use super::type_table::TypeTable;

/// Shared encoding state for one module.
pub(crate) struct ModuleCx<'ir> {
    pub ir: &'ir Module,
    pub types: TypeTable,
    /// Module-scope resolution of instructions referenced from function
    /// bodies: global symbols registered up front, literals pooled on
    /// first use.
    value_to_global: IndexMap<InstId, bc::Import>,
    /// Pool of literal instructions, in id order.
    constants: Vec<InstId>,
    /// Local ids of the module scope itself; for a global value this is
    /// its global id.
    local_ids: HashMap<InstId, i64>,
}

impl<'ir> ModuleCx<'ir> {
    fn new(ir: &'ir Module) -> Self {
        Self {
            ir,
            types: TypeTable::new(),
            value_to_global: IndexMap::new(),
            constants: Vec::new(),
            local_ids: HashMap::new(),
        }
    }

    /// Bytecode type id for `ty`; `None` encodes as Void.
    pub fn type_id(&mut self, arena: &mut Arena, ty: Option<TyId>) -> Result<TypeId, EmitError> {
        self.types.intern(arena, &self.ir.types, ty)
    }

    /// Type id field value for a symbol or register: untyped instructions
    /// get the reserved value 0 instead of a Void entry.
    pub fn type_id_for_symbol(
        &mut self,
        arena: &mut Arena,
        inst: InstId,
    ) -> Result<u32, EmitError> {
        match self.ir.inst(inst).ty {
            None => Ok(0),
            Some(ty) => Ok(self.type_id(arena, Some(ty))?.0),
        }
    }

    /// Whether an instruction produces a value that needs a register: it
    /// has a data type and that type is not the basic Void type.
    pub fn has_result(&self, inst: InstId) -> bool {
        match self.ir.inst(inst).ty {
            None => false,
            Some(ty) => !matches!(self.ir.types.shape(ty), TypeShape::Void),
        }
    }

    /// Resolves an instruction to a module-scope entity.
    ///
    /// Global values were registered in the numbering pass; integer and
    /// float literals are appended to the constant pool on first use.
    /// Anything else reaching this point is a compiler bug.
    pub fn global_value(&mut self, inst: InstId) -> Result<bc::Import, EmitError> {
        if let Some(&import) = self.value_to_global.get(&inst) {
            return Ok(import);
        }

        match self.ir.inst(inst).op {
            Op::IntLit | Op::FloatLit => {
                let id = self.constants.len() as u32;
                self.constants.push(inst);
                let import = bc::Import::constant(id);
                self.value_to_global.insert(inst, import);
                Ok(import)
            }
            op => Err(EmitError::MissingGlobalId { op }),
        }
    }
}

/// Encodes one IR module into the arena, returning its record handle.
pub(crate) fn encode_module(
    arena: &mut Arena,
    ir: &Module,
) -> Result<Ref<bc::Module>, EmitError> {
    let module_rec = arena.alloc::<bc::Module>()?;
    let mut cx = ModuleCx::new(ir);

    // First pass: number the global values so code inside any function can
    // refer to any of them, regardless of declaration order.
    let mut symbol_count = 0u32;
    for &global in ir.globals() {
        if !ir.inst(global).op.is_global_value() {
            continue;
        }
        let global_id = symbol_count;
        symbol_count += 1;
        cx.value_to_global
            .insert(global, bc::Import::global_symbol(global_id));
        // At module scope, global ids double as local ids.
        cx.local_ids.insert(global, global_id as i64);
    }

    let symbols = arena.alloc_array::<bc::Slot>(symbol_count as usize)?;

    // Second pass: emit a record per symbol.
    for &global in ir.globals() {
        let inst = ir.inst(global);
        if !inst.op.is_global_value() {
            continue;
        }
        let index = cx.local_ids[&global] as usize;

        let Some(symbol) = encode_symbol(arena, &mut cx, global)? else {
            continue;
        };

        let name = match inst.name.as_deref() {
            Some(name) => arena.alloc_str(name)?,
            None => 0,
        };
        let mut rec = arena.read(symbol);
        rec.name = name;
        arena.write(symbol, &rec);

        arena.write(symbols.at(index), &bc::Slot(symbol.offset()));
    }

    // Every literal the functions pulled in is known now; flush the pool.
    let pooled = std::mem::take(&mut cx.constants);
    let constants = arena.alloc_array::<bc::Constant>(pooled.len())?;
    for (index, &literal) in pooled.iter().enumerate() {
        let inst = ir.inst(literal);
        let type_id = cx.type_id(arena, inst.ty)?;
        let value = match inst.payload {
            Some(Payload::Int(v)) => {
                let slot = arena.alloc::<bc::Slot>()?;
                arena.write(slot, &bc::Slot(v as u64));
                slot.offset()
            }
            Some(Payload::Float(v)) => {
                let slot = arena.alloc::<bc::Slot>()?;
                arena.write(slot, &bc::Slot(v.to_bits()));
                slot.offset()
            }
            _ => 0,
        };
        arena.write(
            constants.at(index),
            &bc::Constant {
                op: inst.op.as_u32(),
                type_id: type_id.0,
                value,
            },
        );
    }

    // And every type: the table grew monotonically while symbols and
    // constants were encoded.
    let type_count = cx.types.len();
    let types = arena.alloc_array::<bc::Slot>(type_count)?;
    for (index, record) in cx.types.records().iter().enumerate() {
        arena.write(types.at(index), &bc::Slot(record.offset()));
    }

    arena.write(
        module_rec,
        &bc::Module {
            symbol_count,
            symbols: symbols.offset(),
            constant_count: pooled.len() as u32,
            constants: constants.offset(),
            type_count: type_count as u32,
            types: types.offset(),
            ..Default::default()
        },
    );
    Ok(module_rec)
}

/// Emits the record for one global value, or `None` for globals with no
/// custom representation.
fn encode_symbol(
    arena: &mut Arena,
    cx: &mut ModuleCx<'_>,
    global: InstId,
) -> Result<Option<Ref<bc::Symbol>>, EmitError> {
    let ir = cx.ir;
    match ir.inst(global).op {
        Op::Func => Ok(Some(encode_func(arena, cx, global)?.cast())),

        Op::GlobalVar | Op::GlobalConstant => {
            let inst = ir.inst(global);
            let rec = arena.alloc::<bc::Symbol>()?;
            let type_id = cx.type_id(arena, inst.ty)?;
            // TODO: emit initializer body instructions.
            arena.write(
                rec,
                &bc::Symbol {
                    op: inst.op.as_u32(),
                    type_id: type_id.0,
                    name: 0,
                },
            );
            Ok(Some(rec))
        }

        _ => Ok(None),
    }
}
