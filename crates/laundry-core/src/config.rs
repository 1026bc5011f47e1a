//! Configuration for the laundry order core.
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no
//! file at all) yields a memory-backed store with the stock gate policy.

use laundry_storage::{FileStorage, MemoryStorage, StorageService};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
	/// Storage backend selection for the durable store.
	#[serde(default)]
	pub storage: StorageConfig,
	/// Signup/login policy.
	#[serde(default)]
	pub gate: GateConfig,
}

impl Config {
	/// Loads and validates configuration from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let raw = std::fs::read_to_string(path)?;
		Self::from_toml(&raw)
	}

	/// Parses and validates configuration from TOML text.
	pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
		let config: Config = toml::from_str(raw)?;
		config.validate()?;
		Ok(config)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.gate.min_password_len == 0 {
			return Err(ConfigError::Validation(
				"gate.min_password_len must be at least 1".to_string(),
			));
		}
		if let StorageConfig::File { path } = &self.storage {
			if path.as_os_str().is_empty() {
				return Err(ConfigError::Validation(
					"storage.path must not be empty".to_string(),
				));
			}
		}
		Ok(())
	}
}

/// Selects and builds the durable storage backend.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageConfig {
	/// In-memory storage; nothing survives a restart.
	#[default]
	Memory,
	/// One JSON file per key under the given directory.
	File {
		/// Base directory for the blob files.
		path: PathBuf,
	},
}

impl StorageConfig {
	/// Builds the storage service this configuration describes.
	pub fn build(&self) -> StorageService {
		match self {
			StorageConfig::Memory => StorageService::new(Box::new(MemoryStorage::new())),
			StorageConfig::File { path } => {
				StorageService::new(Box::new(FileStorage::new(path.clone())))
			}
		}
	}
}

/// Signup/login policy for the session gate.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GateConfig {
	/// Minimum accepted password length. Deployments have run this
	/// anywhere between 8 and 18, so it is a knob rather than a constant.
	#[serde(default = "default_min_password_len")]
	pub min_password_len: usize,
}

impl Default for GateConfig {
	fn default() -> Self {
		Self {
			min_password_len: default_min_password_len(),
		}
	}
}

/// Returns the default minimum password length.
fn default_min_password_len() -> usize {
	8
}
