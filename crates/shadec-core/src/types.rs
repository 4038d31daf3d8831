//! Structural type interning.

use indexmap::IndexSet;

/// Identifier of an interned type.
///
/// Interning is structural, so a `TyId` *is* the canonical form of a type:
/// two types built from equal shapes always carry the same id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct TyId(pub u32);

/// Structure of a type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeShape {
    Void,
    Bool,
    Int32,
    UInt32,
    UInt64,
    Float16,
    Float32,
    Float64,
    /// Function type; `result` first, then parameters.
    Func { result: TyId, params: Vec<TyId> },
    /// Pointer to a value of the inner type.
    Ptr(TyId),
    /// Read-only structured buffer of the element type.
    StructuredBuffer(TyId),
    /// Read-write structured buffer of the element type.
    RwStructuredBuffer(TyId),
    /// Short vector; not representable in the bytecode container.
    Vector { elem: TyId, count: u32 },
    /// Small matrix; not representable in the bytecode container.
    Matrix { elem: TyId, rows: u32, cols: u32 },
}

/// Interner for the types of one module.
#[derive(Debug)]
pub struct TypeContext {
    shapes: IndexSet<TypeShape>,
}

impl TypeContext {
    /// `Void` is always interned first.
    pub const VOID: TyId = TyId(0);

    pub fn new() -> Self {
        let mut shapes = IndexSet::new();
        shapes.insert(TypeShape::Void);
        Self { shapes }
    }

    /// Interns a shape, returning the id it already has or a fresh one.
    pub fn intern(&mut self, shape: TypeShape) -> TyId {
        let (index, _) = self.shapes.insert_full(shape);
        TyId(index as u32)
    }

    /// The shape behind an id.
    pub fn shape(&self, id: TyId) -> &TypeShape {
        self.shapes
            .get_index(id.0 as usize)
            .expect("type id out of range")
    }

    pub fn void(&mut self) -> TyId {
        Self::VOID
    }

    pub fn bool_(&mut self) -> TyId {
        self.intern(TypeShape::Bool)
    }

    pub fn int32(&mut self) -> TyId {
        self.intern(TypeShape::Int32)
    }

    pub fn uint32(&mut self) -> TyId {
        self.intern(TypeShape::UInt32)
    }

    pub fn uint64(&mut self) -> TyId {
        self.intern(TypeShape::UInt64)
    }

    pub fn float16(&mut self) -> TyId {
        self.intern(TypeShape::Float16)
    }

    pub fn float32(&mut self) -> TyId {
        self.intern(TypeShape::Float32)
    }

    pub fn float64(&mut self) -> TyId {
        self.intern(TypeShape::Float64)
    }

    pub fn func(&mut self, result: TyId, params: Vec<TyId>) -> TyId {
        self.intern(TypeShape::Func { result, params })
    }

    pub fn ptr(&mut self, value: TyId) -> TyId {
        self.intern(TypeShape::Ptr(value))
    }

    pub fn structured_buffer(&mut self, elem: TyId) -> TyId {
        self.intern(TypeShape::StructuredBuffer(elem))
    }

    pub fn rw_structured_buffer(&mut self, elem: TyId) -> TyId {
        self.intern(TypeShape::RwStructuredBuffer(elem))
    }

    pub fn vector(&mut self, elem: TyId, count: u32) -> TyId {
        self.intern(TypeShape::Vector { elem, count })
    }
}

impl Default for TypeContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn void_is_preinterned() {
        let mut ctx = TypeContext::new();
        assert_eq!(ctx.void(), TypeContext::VOID);
        assert_eq!(ctx.intern(TypeShape::Void), TypeContext::VOID);
    }

    #[test]
    fn equal_shapes_share_an_id() {
        let mut ctx = TypeContext::new();
        let int32 = ctx.int32();
        let a = ctx.ptr(int32);
        let b = ctx.ptr(int32);
        assert_eq!(a, b);

        let f1 = ctx.func(int32, vec![int32]);
        let f2 = ctx.func(int32, vec![int32]);
        assert_eq!(f1, f2);
    }

    #[test]
    fn distinct_shapes_get_distinct_ids() {
        let mut ctx = TypeContext::new();
        let int32 = ctx.int32();
        let float32 = ctx.float32();
        assert_ne!(int32, float32);
        assert_ne!(ctx.ptr(int32), ctx.ptr(float32));
        assert_ne!(ctx.structured_buffer(int32), ctx.rw_structured_buffer(int32));
    }

    #[test]
    fn shape_lookup_roundtrips() {
        let mut ctx = TypeContext::new();
        let int32 = ctx.int32();
        let fn_ty = ctx.func(int32, vec![int32, int32]);
        match ctx.shape(fn_ty) {
            TypeShape::Func { result, params } => {
                assert_eq!(*result, int32);
                assert_eq!(params.as_slice(), &[int32, int32]);
            }
            other => panic!("expected function shape, got {other:?}"),
        }
    }
}
