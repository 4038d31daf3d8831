//! IR-to-bytecode encoder.
//!
//! Takes the typed, SSA-form IR of one or more translation units
//! ([`shadec_core`]) and serializes it into a BC container
//! ([`shadec_bytecode`]): a single byte arena whose records reference one
//! another by offsets from the arena base, ready to be memory-mapped by
//! downstream tools.
//!
//! # Example
//!
//! ```
//! use shadec_core::{FuncBuilder, Module};
//! use shadec_lib::{CompileRequest, TranslationUnit, generate_bytecode};
//!
//! let mut module = Module::new();
//! let int32 = module.types.int32();
//! let fn_ty = module.types.func(int32, vec![int32]);
//! let f = module.add_func("identity", fn_ty);
//! let entry = module.append_block(f);
//!
//! let mut b = FuncBuilder::new(&mut module, entry);
//! let x = b.param(int32);
//! b.ret(x);
//!
//! let mut request = CompileRequest::new();
//! request
//!     .translation_units
//!     .push(TranslationUnit::new(Some(module)));
//! generate_bytecode(&mut request)?;
//!
//! assert_eq!(&request.generated_bytecode[0..8], b"slang\0bc");
//! # Ok::<(), shadec_lib::EmitError>(())
//! ```

pub mod emit;

mod request;

pub use emit::{EmitError, generate_bytecode};
pub use request::{CompileRequest, TranslationUnit};
