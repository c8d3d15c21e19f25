//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod memory;
pub mod uuid_generator;

pub use memory::InMemoryTransactionRepository;
pub use uuid_generator::UuidIdGenerator;
