//! Document store implementations.

pub mod firebase;
pub mod memory;

pub use firebase::FirebaseStore;
pub use memory::MemoryStore;
