//! Key-value storage abstraction
//!
//! The application keeps all of its state as serialized strings under a
//! handful of fixed keys, the same shape as browser local storage. Backends
//! implement [`KeyValueStore`]; the session and ticket stores only ever see
//! the trait.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StoreResult;

/// String-keyed, string-valued storage
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` when never set
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove_item(&self, key: &str) -> StoreResult<()>;
}
