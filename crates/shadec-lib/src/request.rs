//! Compile-request plumbing.

use shadec_core::Module;

/// One translation unit of a compile request.
#[derive(Debug, Default)]
pub struct TranslationUnit {
    /// The unit's IR, if lowering produced any. Units without IR still
    /// occupy a (null) module slot in the container.
    pub ir_module: Option<Module>,
}

impl TranslationUnit {
    pub fn new(ir_module: Option<Module>) -> Self {
        Self { ir_module }
    }
}

/// A compile request, as handed over by the driver.
#[derive(Debug, Default)]
pub struct CompileRequest {
    pub translation_units: Vec<TranslationUnit>,
    /// Filled in by [`crate::generate_bytecode`]; left untouched on
    /// failure.
    pub generated_bytecode: Vec<u8>,
}

impl CompileRequest {
    pub fn new() -> Self {
        Self::default()
    }
}
