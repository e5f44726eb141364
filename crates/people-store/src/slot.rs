//! Key-value slot stores.

use std::collections::BTreeMap;

use crate::error::{StoreError, StoreResult};

/// A synchronous string key-value store holding serialized slots.
///
/// A missing key reads as `None`. Writes replace the whole value.
pub trait SlotStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

impl<S: SlotStore + ?Sized> SlotStore for &mut S {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).write(key, value)
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// In-process store, used for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: BTreeMap<String, String>,
    reads_fail: bool,
    writes_fail: bool,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one slot.
    pub fn with_slot(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.slots.insert(key.to_string(), value.to_string());
        store
    }

    /// Make reads fail with [`StoreError::Unavailable`].
    pub fn set_reads_fail(&mut self, fail: bool) {
        self.reads_fail = fail;
    }

    /// Make writes and removals fail with [`StoreError::Unavailable`].
    pub fn set_writes_fail(&mut self, fail: bool) {
        self.writes_fail = fail;
    }

    /// Current raw value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl SlotStore for MemoryStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        if self.reads_fail {
            return Err(StoreError::Unavailable {
                reason: "reads disabled".to_string(),
            });
        }
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StoreResult<()> {
        if self.writes_fail {
            return Err(StoreError::Unavailable {
                reason: "quota exceeded".to_string(),
            });
        }
        self.slots.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        if self.writes_fail {
            return Err(StoreError::Unavailable {
                reason: "writes disabled".to_string(),
            });
        }
        self.slots.remove(key);
        Ok(())
    }
}
