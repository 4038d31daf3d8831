//! Typed, SSA-form intermediate representation for compiled shader
//! translation units.
//!
//! This crate is the input side of the bytecode encoder: a [`Module`]
//! holds instructions and basic blocks in arena-style storage, types are
//! interned structurally in a [`TypeContext`], and [`FuncBuilder`] offers
//! a convenient way to grow function bodies.

mod builder;
mod inst;
mod module;
mod op;
mod types;

pub use builder::FuncBuilder;
pub use inst::{Block, Inst, Operand, Payload};
pub use module::{BlockId, InstId, Module};
pub use op::Op;
pub use types::{TyId, TypeContext, TypeShape};
