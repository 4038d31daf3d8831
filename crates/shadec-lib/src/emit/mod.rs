//! Bytecode emission.
//!
//! Encoding one compile request proceeds top-down:
//! - the container assembler (here) writes the header and one module per
//!   translation unit,
//! - `module` numbers a module's global symbols, drives the function
//!   encoder, and flushes the constant pool and type table,
//! - `func` encodes one function in five passes over its blocks,
//! - `inst` encodes individual instructions into the per-function code
//!   buffer,
//! - `type_table` interns IR types into dense bytecode type ids.
//!
//! All allocation funnels through the byte arena; the encoder only ever
//! holds [`shadec_bytecode::Ref`] handles, never addresses, so records can
//! be patched after later allocations moved the buffer.

mod error;
mod func;
mod inst;
mod module;
mod type_table;


pub use error::EmitError;

use shadec_bytecode::records as bc;
use shadec_bytecode::{Arena, MAGIC, VERSION};

use crate::request::CompileRequest;

/// Encodes every translation unit of `request` into a BC container and
/// stores it in `request.generated_bytecode`.
///
/// On error the request is left untouched; no partial container is ever
/// handed out.
pub fn generate_bytecode(request: &mut CompileRequest) -> Result<(), EmitError> {
    let mut arena = Arena::new();

    // The header must be the very first record in the container.
    let header = arena.alloc::<bc::Header>()?;
    arena.write(
        header,
        &bc::Header {
            magic: MAGIC,
            version: VERSION,
            module_count: 0,
            modules: 0,
        },
    );

    let mut module_offsets = Vec::with_capacity(request.translation_units.len());
    for unit in &request.translation_units {
        match &unit.ir_module {
            Some(ir) => module_offsets.push(module::encode_module(&mut arena, ir)?.offset()),
            None => module_offsets.push(0),
        }
    }

    let modules = arena.alloc_array::<bc::Slot>(module_offsets.len())?;
    for (index, &offset) in module_offsets.iter().enumerate() {
        arena.write(modules.at(index), &bc::Slot(offset));
    }

    let mut finished = arena.read(header);
    finished.module_count = module_offsets.len() as u32;
    finished.modules = modules.offset();
    arena.write(header, &finished);

    request.generated_bytecode = arena.into_bytes();
    Ok(())
}
