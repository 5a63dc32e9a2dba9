//! Durable key-value slots.
//!
//! The event store reads and writes one slot through the `Storage` port;
//! `FileStorage` backs it with files on disk and `MemoryStorage` keeps it in
//! memory for tests.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::AuraResult;

/// Slot holding the serialized event collection.
pub const EVENTS_KEY: &str = "aura_events";

/// Slot holding the chat session id.
pub const SESSION_KEY: &str = "session_id";

/// A string-keyed store of string values.
pub trait Storage {
    fn get(&self, key: &str) -> AuraResult<Option<String>>;

    /// Replace the value in `key` as a whole.
    fn set(&self, key: &str, value: &str) -> AuraResult<()>;

    fn remove(&self, key: &str) -> AuraResult<()>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get(&self, key: &str) -> AuraResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> AuraResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> AuraResult<()> {
        (**self).remove(key)
    }
}
