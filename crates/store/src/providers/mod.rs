//! Parameter store backends.

pub mod memory;
pub mod ssm;

pub use memory::MemoryStore;
pub use ssm::SsmStore;
