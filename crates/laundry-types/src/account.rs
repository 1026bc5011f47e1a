//! Account types for students and laundry staff.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The role an account was registered with.
///
/// The role gates which view of the order state machine a logged-in
/// caller is handed; it is not a security boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	/// A student who places pickup requests.
	Student,
	/// A staff member who processes them.
	Staff,
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Role::Student => write!(f, "student"),
			Role::Staff => write!(f, "staff"),
		}
	}
}

/// A registered user of the laundry service.
///
/// Accounts are created by signup and never mutated afterwards, apart
/// from the optional last-login timestamp. Removal is not supported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
	/// Unique identifier, assigned at creation.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Login email, unique across all accounts (exact match, case-sensitive).
	pub email: String,
	/// Stored as authored, unhashed. The data lives client-side and is
	/// inspectable anyway; validation is a one-line comparison at login.
	pub password: String,
	/// Role the account was registered with.
	pub role: Role,
	/// `STU-NNN` identifier, present iff the role is student. Assigned once
	/// from the shared counter and never reused.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub student_id: Option<String>,
	/// Timestamp when the account was created.
	pub created_at: DateTime<Utc>,
	/// Timestamp of the most recent successful login.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub last_login_at: Option<DateTime<Utc>>,
}

impl Account {
	/// Creates a new account. The student id, when applicable, is assigned
	/// by the store so the shared counter stays in one place.
	pub fn new(
		name: String,
		email: String,
		password: String,
		role: Role,
		student_id: Option<String>,
	) -> Self {
		Self {
			id: Uuid::new_v4().to_string(),
			name,
			email,
			password,
			role,
			student_id,
			created_at: Utc::now(),
			last_login_at: None,
		}
	}
}
