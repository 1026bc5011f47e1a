//! Storage module for the laundry order core.
//!
//! This module provides abstractions over the key-value persistence
//! collaborator, supporting different backend implementations such as
//! in-memory or file-based storage. The whole system runs on a single
//! logical thread with fully-completing calls, so the interface is
//! synchronous.

use laundry_types::StorageKey;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod file;
	pub mod memory;
}

pub use implementations::{file::FileStorage, memory::MemoryStorage};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
	/// Error that occurs when a requested key holds no value.
	#[error("Not found")]
	NotFound,
	/// Error that occurs during serialization/deserialization.
	#[error("Serialization error: {0}")]
	Serialization(String),
	/// Error that occurs in the storage backend.
	#[error("Backend error: {0}")]
	Backend(String),
}

/// Trait defining the low-level interface for storage backends.
///
/// Backends are opaque byte stores keyed by name; they own no
/// interpretation of the data. Each call completes fully before
/// returning, with no partial-write visibility window.
pub trait StorageBackend: Send + Sync {
	/// Retrieves raw bytes for the given key.
	fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError>;

	/// Stores raw bytes under the given key, replacing any prior value.
	fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;

	/// Deletes the value associated with the given key.
	fn delete(&self, key: &str) -> Result<(), StorageError>;

	/// Checks if a key exists in storage.
	fn exists(&self, key: &str) -> Result<bool, StorageError>;
}

/// High-level storage service that provides typed operations.
///
/// The StorageService wraps a low-level storage backend and provides
/// convenient methods for storing and retrieving typed data with
/// automatic JSON serialization/deserialization, keyed by [`StorageKey`].
pub struct StorageService {
	/// The underlying storage backend implementation.
	backend: Box<dyn StorageBackend>,
}

impl StorageService {
	/// Creates a new StorageService with the specified backend.
	pub fn new(backend: Box<dyn StorageBackend>) -> Self {
		Self { backend }
	}

	/// Serializes and stores a value under the given key.
	pub fn store<T: Serialize>(&self, key: StorageKey, data: &T) -> Result<(), StorageError> {
		let bytes =
			serde_json::to_vec(data).map_err(|e| StorageError::Serialization(e.to_string()))?;
		self.backend.set_bytes(key.as_str(), bytes)
	}

	/// Retrieves and deserializes the value stored under the given key.
	pub fn retrieve<T: DeserializeOwned>(&self, key: StorageKey) -> Result<T, StorageError> {
		let bytes = self.backend.get_bytes(key.as_str())?;
		serde_json::from_slice(&bytes).map_err(|e| StorageError::Serialization(e.to_string()))
	}

	/// Removes the value stored under the given key.
	pub fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
		self.backend.delete(key.as_str())
	}

	/// Checks if a value exists for the given key.
	pub fn exists(&self, key: StorageKey) -> Result<bool, StorageError> {
		self.backend.exists(key.as_str())
	}
}
