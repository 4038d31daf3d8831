//! BC index newtypes.

/// Dense index into a module's type table.
///
/// Operands that refer to types carry a `TypeId` rather than a record
/// offset; this keeps the per-operand byte cost independent of how large
/// the type record itself is.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(transparent)]
pub struct TypeId(pub u32);

impl TypeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
