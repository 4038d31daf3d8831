//! Encoder error type.

use shadec_bytecode::ArenaError;
use shadec_core::{Op, TyId};

/// Error during bytecode emission.
///
/// Every variant indicates a bug in the caller or in the IR handed to the
/// encoder, not a user-facing compile error. There is no recovery: the
/// container under construction is abandoned.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EmitError {
    /// The type has no representation in the bytecode format.
    #[error("type {0:?} has no bytecode encoding")]
    UnsupportedType(TyId),
    /// An operand was neither a local definition, a registered global
    /// symbol, nor a poolable literal.
    #[error("no global id for {op:?} operand")]
    MissingGlobalId { op: Op },
    /// The byte arena hit its size ceiling.
    #[error(transparent)]
    Arena(#[from] ArenaError),
    /// The register-counting and register-assignment passes disagreed.
    #[error("register count mismatch: reserved {reserved}, assigned {assigned}")]
    RegCountMismatch { reserved: u32, assigned: u32 },
    /// A `Var` instruction's data type is not a pointer.
    #[error("var instruction does not produce a pointer")]
    VarWithoutPointerType,
    /// A branch operand names a block outside the current function.
    #[error("branch target is not a block of the current function")]
    ForeignBlock,
    /// A literal instruction carries no value payload.
    #[error("literal instruction is missing its value payload")]
    MissingLiteralValue,
    /// An instruction's operand list does not match its opcode.
    #[error("{op:?} instruction has malformed operands")]
    MalformedOperands { op: Op },
}
