use super::backend::StorageBackend;
use crate::error::{EvError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded.
/// This keeps the `StorageBackend` trait on `&self` without locking.
#[derive(Default)]
pub struct MemBackend {
    blobs: RefCell<HashMap<String, String>>,
    simulate_write_error: Cell<bool>,
    writes: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a blob as if a previous session had saved it.
    pub fn with_blob(self, name: &str, blob: &str) -> Self {
        self.blobs
            .borrow_mut()
            .insert(name.to_string(), blob.to_string());
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful saves.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    pub fn blob(&self, name: &str) -> Option<String> {
        self.blobs.borrow().get(name).cloned()
    }
}

impl StorageBackend for MemBackend {
    fn load(&self, name: &str) -> Result<Option<String>> {
        Ok(self.blobs.borrow().get(name).cloned())
    }

    fn save(&self, name: &str, blob: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(EvError::Store("Simulated write error".to_string()));
        }
        self.blobs
            .borrow_mut()
            .insert(name.to_string(), blob.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
