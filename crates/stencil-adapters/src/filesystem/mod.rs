//! Filesystem adapters.

mod local;
mod memory;

pub use local::{LocalFilesystem, TEMP_SUFFIX, temp_path};
pub use memory::MemoryFilesystem;
