pub mod connection;
pub mod memory;

pub use connection::Database;
pub use memory::MemoryStore;
#[cfg(test)]
pub(crate) use memory::FailingStore;

use crate::error::Result;

/// Durable string-keyed storage the journal mirrors its state into.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
