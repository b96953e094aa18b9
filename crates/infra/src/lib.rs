//! Infrastructure layer: the key-value persistence boundary.
//!
//! All state lives in an external key-value service; every request reads
//! fresh and writes whole values back (last-writer-wins). Nothing in here
//! knows about HTTP or prompts.

pub mod kv;
pub mod repository;

pub use kv::{InMemoryKvStore, KvError, KvStore};
pub use repository::{InventoryRepository, MenuRepository};
