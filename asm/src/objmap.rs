use indexmap::IndexMap;
use serde::Serialize;

use crate::assembler::Assembly;
use crate::error::Error;
use crate::reloc::Reloc;

/// What a linker needs besides the image: exports, imports and the spots
/// to patch.
#[derive(Debug, Serialize)]
pub struct ObjectMap<'a> {
    pub size: usize,
    pub globals: IndexMap<&'a str, i64>,
    pub externs: Vec<&'a str>,
    pub relocations: &'a IndexMap<String, Vec<Reloc>>,
}

impl<'a> ObjectMap<'a> {
    pub fn new(asm: &'a Assembly) -> Self {
        ObjectMap {
            size: asm.segment.size,
            globals: asm.globals().collect(),
            externs: asm.symbols().externs().collect(),
            relocations: asm.relocs().as_map(),
        }
    }

    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }
}
