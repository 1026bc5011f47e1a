//! File-based storage backend implementation.
//!
//! This module provides a concrete implementation of the StorageBackend
//! trait that persists each key as one JSON blob file on the filesystem,
//! surviving process restarts without external dependencies.

use crate::{StorageBackend, StorageError};
use std::fs;
use std::path::{Path, PathBuf};

/// File-based storage implementation.
///
/// Each key maps to a single file under the base directory. Writes go
/// through a temp file followed by a rename, so a reader never observes
/// a partially written value.
pub struct FileStorage {
	/// Base directory path for storing files.
	base_path: PathBuf,
}

impl FileStorage {
	/// Creates a new FileStorage instance rooted at the given directory.
	pub fn new(base_path: impl Into<PathBuf>) -> Self {
		Self {
			base_path: base_path.into(),
		}
	}

	/// Converts a storage key to a filesystem-safe file path.
	fn file_path(&self, key: &str) -> PathBuf {
		let safe_key = key.replace(['/', ':'], "_");
		self.base_path.join(format!("{}.json", safe_key))
	}

	fn ensure_base_dir(&self, path: &Path) -> Result<(), StorageError> {
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent).map_err(|e| StorageError::Backend(e.to_string()))?;
		}
		Ok(())
	}
}

impl StorageBackend for FileStorage {
	fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError> {
		let path = self.file_path(key);

		match fs::read(&path) {
			Ok(data) => Ok(data),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StorageError::NotFound),
			Err(e) => Err(StorageError::Backend(e.to_string())),
		}
	}

	fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
		let path = self.file_path(key);
		self.ensure_base_dir(&path)?;

		// Write atomically by writing to a temp file then renaming
		let temp_path = path.with_extension("tmp");
		fs::write(&temp_path, value).map_err(|e| StorageError::Backend(e.to_string()))?;
		fs::rename(&temp_path, &path).map_err(|e| StorageError::Backend(e.to_string()))?;

		Ok(())
	}

	fn delete(&self, key: &str) -> Result<(), StorageError> {
		let path = self.file_path(key);

		match fs::remove_file(&path) {
			Ok(_) => Ok(()),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
			Err(e) => Err(StorageError::Backend(e.to_string())),
		}
	}

	fn exists(&self, key: &str) -> Result<bool, StorageError> {
		Ok(self.file_path(key).exists())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn persists_across_instances() {
		let dir = tempfile::tempdir().unwrap();

		let storage = FileStorage::new(dir.path());
		storage
			.set_bytes("laundry_orders", b"[]".to_vec())
			.unwrap();

		// A fresh instance over the same directory sees the value.
		let reopened = FileStorage::new(dir.path());
		assert_eq!(reopened.get_bytes("laundry_orders").unwrap(), b"[]");
	}

	#[test]
	fn missing_key_is_not_found() {
		let dir = tempfile::tempdir().unwrap();
		let storage = FileStorage::new(dir.path());

		let result = storage.get_bytes("laundry_users");
		assert!(matches!(result, Err(StorageError::NotFound)));
		assert!(!storage.exists("laundry_users").unwrap());
	}

	#[test]
	fn keys_are_sanitized_for_the_filesystem() {
		let dir = tempfile::tempdir().unwrap();
		let storage = FileStorage::new(dir.path());

		storage.set_bytes("odd/key:name", b"x".to_vec()).unwrap();
		assert!(storage.exists("odd/key:name").unwrap());
		assert!(dir.path().join("odd_key_name.json").exists());
	}

	#[test]
	fn delete_then_exists() {
		let dir = tempfile::tempdir().unwrap();
		let storage = FileStorage::new(dir.path());

		storage.set_bytes("k", b"v".to_vec()).unwrap();
		storage.delete("k").unwrap();
		assert!(!storage.exists("k").unwrap());

		// Deleting again is a no-op.
		storage.delete("k").unwrap();
	}
}
