//! In-memory storage backend implementation.
//!
//! This module provides a memory-based implementation of the StorageBackend
//! trait, useful for tests and for the session store, where persistence
//! across process restarts is not wanted.

use crate::{StorageBackend, StorageError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory storage implementation.
///
/// Stores data in a HashMap, providing fast access but no persistence
/// across restarts. Clones share the same underlying map, which lets a
/// test hand "the same storage" to a fresh service to simulate a reload.
#[derive(Clone)]
pub struct MemoryStorage {
	store: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
	/// Creates a new MemoryStorage instance.
	pub fn new() -> Self {
		Self {
			store: Arc::new(Mutex::new(HashMap::new())),
		}
	}

	fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>, StorageError> {
		self.store
			.lock()
			.map_err(|e| StorageError::Backend(e.to_string()))
	}
}

impl Default for MemoryStorage {
	fn default() -> Self {
		Self::new()
	}
}

impl StorageBackend for MemoryStorage {
	fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError> {
		let store = self.lock()?;
		store.get(key).cloned().ok_or(StorageError::NotFound)
	}

	fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
		let mut store = self.lock()?;
		store.insert(key.to_string(), value);
		Ok(())
	}

	fn delete(&self, key: &str) -> Result<(), StorageError> {
		let mut store = self.lock()?;
		store.remove(key);
		Ok(())
	}

	fn exists(&self, key: &str) -> Result<bool, StorageError> {
		let store = self.lock()?;
		Ok(store.contains_key(key))
	}
}
