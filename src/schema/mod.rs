//! Schema mapping module
//!
//! Declares indexed fields and compiles them into the engine's native
//! field mapping document.

mod compiler;
mod definition;
mod field;
mod mapping;

pub use compiler::{CompiledSchema, SchemaCompiler};
pub use definition::{FieldEntry, Preset, SchemaDefinition};
pub use field::{FieldDescriptor, FieldType};
pub use mapping::{FieldMapping, IndexMode, MappingType, StoreMode, TermVector};
