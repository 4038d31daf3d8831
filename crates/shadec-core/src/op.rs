//! Instruction opcodes.

/// Opcode of an IR instruction.
///
/// Discriminants are wire-stable: the bytecode encoder writes them into
/// the container as-is, so they must never be renumbered, only appended
/// to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Op {
    Nop = 0,

    // Type opcodes; these appear in type table records, never in code.
    VoidType = 1,
    BoolType = 2,
    Int32Type = 3,
    UInt32Type = 4,
    UInt64Type = 5,
    Float16Type = 6,
    Float32Type = 7,
    Float64Type = 8,
    FuncType = 9,
    PtrType = 10,
    StructuredBufferType = 11,
    RwStructuredBufferType = 12,

    // Literals.
    IntLit = 13,
    FloatLit = 14,
    BoolLit = 15,

    // Module-scope global values.
    Func = 16,
    GlobalVar = 17,
    GlobalConstant = 18,

    // Function-body instructions.
    Param = 19,
    Var = 20,
    Load = 21,
    Store = 22,
    Call = 23,
    Add = 24,
    Sub = 25,
    Mul = 26,
    Div = 27,
    Branch = 28,
    CondBranch = 29,
    ReturnVal = 30,
    ReturnVoid = 31,
}

impl Op {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Whether instructions with this opcode define a module-scope global
    /// symbol.
    pub fn is_global_value(self) -> bool {
        matches!(self, Op::Func | Op::GlobalVar | Op::GlobalConstant)
    }
}
