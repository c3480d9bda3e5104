pub mod base;
pub mod file_store;
pub mod memory_store;

// Re-export the primary Storage items so code outside can do
// "use crate::store::{Storage, create_storage};"
pub use base::{create_storage, Storage};
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
