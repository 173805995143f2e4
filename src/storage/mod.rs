//! Storage implementations for orders and signatures

pub mod filesystem;
pub mod in_memory;

pub use filesystem::FsSignatureStore;
pub use in_memory::{InMemoryOrderStore, InMemorySignatureStore};
