//! Type interning: IR types to bytecode type records.

use std::collections::HashMap;

use shadec_bytecode::records::{Record, Slot, TypeDef};
use shadec_bytecode::{Arena, Ref, TypeId};
use shadec_core::{Op, TyId, TypeContext, TypeShape};

use super::error::EmitError;

/// Builds a module's type table, mapping IR [`TyId`]s to dense bytecode
/// [`TypeId`]s.
///
/// IR types are already canonical (structural interning), so the map is
/// keyed by `TyId` directly. Records are emitted on first use, argument
/// types before the types that reference them, and the id order matches
/// the record order.
#[derive(Debug, Default)]
pub(crate) struct TypeTable {
    ids: HashMap<TyId, TypeId>,
    records: Vec<Ref<TypeDef>>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of interned types.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Emitted type records, in id order.
    pub fn records(&self) -> &[Ref<TypeDef>] {
        &self.records
    }

    /// Returns the bytecode id for `ty`, emitting its record (and those of
    /// its argument types) if it has not been seen before. A `None` type
    /// is treated as Void.
    pub fn intern(
        &mut self,
        arena: &mut Arena,
        types: &TypeContext,
        ty: Option<TyId>,
    ) -> Result<TypeId, EmitError> {
        let ty = ty.unwrap_or(TypeContext::VOID);
        if let Some(&id) = self.ids.get(&ty) {
            return Ok(id);
        }

        let (op, args) = match types.shape(ty) {
            TypeShape::Void => (Op::VoidType, Vec::new()),
            TypeShape::Bool => (Op::BoolType, Vec::new()),
            TypeShape::Int32 => (Op::Int32Type, Vec::new()),
            TypeShape::UInt32 => (Op::UInt32Type, Vec::new()),
            TypeShape::UInt64 => (Op::UInt64Type, Vec::new()),
            TypeShape::Float16 => (Op::Float16Type, Vec::new()),
            TypeShape::Float32 => (Op::Float32Type, Vec::new()),
            TypeShape::Float64 => (Op::Float64Type, Vec::new()),
            TypeShape::Func { result, params } => {
                let mut args = Vec::with_capacity(params.len() + 1);
                args.push(self.record_of(arena, types, *result)?);
                for &param in params {
                    args.push(self.record_of(arena, types, param)?);
                }
                (Op::FuncType, args)
            }
            TypeShape::Ptr(value) => (Op::PtrType, vec![self.record_of(arena, types, *value)?]),
            TypeShape::StructuredBuffer(elem) => (
                Op::StructuredBufferType,
                vec![self.record_of(arena, types, *elem)?],
            ),
            TypeShape::RwStructuredBuffer(elem) => (
                Op::RwStructuredBufferType,
                vec![self.record_of(arena, types, *elem)?],
            ),
            TypeShape::Vector { .. } | TypeShape::Matrix { .. } => {
                return Err(EmitError::UnsupportedType(ty));
            }
        };

        self.emit_record(arena, ty, op, &args)
    }

    /// Interns `ty` and returns its record handle.
    fn record_of(
        &mut self,
        arena: &mut Arena,
        types: &TypeContext,
        ty: TyId,
    ) -> Result<Ref<TypeDef>, EmitError> {
        let id = self.intern(arena, types, Some(ty))?;
        Ok(self.records[id.index()])
    }

    /// Allocates and fills a type record with `args.len()` inline operand
    /// slots, assigning the next dense id.
    fn emit_record(
        &mut self,
        arena: &mut Arena,
        ty: TyId,
        op: Op,
        args: &[Ref<TypeDef>],
    ) -> Result<TypeId, EmitError> {
        let size = TypeDef::SIZE + args.len() * Slot::SIZE;
        let record: Ref<TypeDef> = Ref::new(arena.alloc_raw(size, TypeDef::ALIGN)?);

        let id = TypeId(self.records.len() as u32);
        arena.write(
            record,
            &TypeDef {
                op: op.as_u32(),
                id,
                arg_count: args.len() as u32,
                ..Default::default()
            },
        );

        let slots = record.at(1).cast::<Slot>();
        for (index, arg) in args.iter().enumerate() {
            arena.write(slots.at(index), &Slot(arg.offset()));
        }

        self.ids.insert(ty, id);
        self.records.push(record);
        Ok(id)
    }
}
