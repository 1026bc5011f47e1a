//! Storage-related types for the laundry order core.

use std::str::FromStr;

/// Storage keys for the persisted collections.
///
/// This enum provides type safety for storage operations by replacing
/// string literals with strongly typed variants. Each key names one
/// whole-collection blob in the key-value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
	/// Key for the account collection
	Users,
	/// Key for the order collection
	Orders,
	/// Key for the shared student-number counter
	NextStudentNumber,
	/// Key for the authenticated account (session-scoped store)
	Session,
}

impl StorageKey {
	/// Returns the string representation of the storage key.
	pub fn as_str(&self) -> &'static str {
		match self {
			StorageKey::Users => "laundry_users",
			StorageKey::Orders => "laundry_orders",
			StorageKey::NextStudentNumber => "laundry_next_student_number",
			StorageKey::Session => "laundry_session",
		}
	}

	/// Returns an iterator over all StorageKey variants.
	pub fn all() -> impl Iterator<Item = Self> {
		[
			Self::Users,
			Self::Orders,
			Self::NextStudentNumber,
			Self::Session,
		]
		.into_iter()
	}
}

impl FromStr for StorageKey {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"laundry_users" => Ok(Self::Users),
			"laundry_orders" => Ok(Self::Orders),
			"laundry_next_student_number" => Ok(Self::NextStudentNumber),
			"laundry_session" => Ok(Self::Session),
			_ => Err(()),
		}
	}
}

impl From<StorageKey> for &'static str {
	fn from(key: StorageKey) -> Self {
		key.as_str()
	}
}
