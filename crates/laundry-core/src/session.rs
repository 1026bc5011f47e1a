//! Role-scoped session capabilities over the order store.
//!
//! Authorization by construction: logging in hands the caller a value
//! whose methods are exactly what that role may do. A student session
//! carries its own student id and cannot name another; a staff session
//! has the transition and queue operations but no way to place orders.
//! This is a usability boundary, not a security one; all data is
//! client-local.

use crate::config::GateConfig;
use crate::error::StoreError;
use crate::store::{Committed, OrderStore};
use laundry_storage::{StorageError, StorageService};
use laundry_types::{Account, Items, Order, OrderStatus, Role, StorageKey};

/// Session-scoped persistence for the authenticated account.
///
/// Wraps a storage service whose lifetime matches the client session
/// (cleared when the session ends), holding the serialized account under
/// the single session key.
pub struct SessionStore {
	storage: StorageService,
}

impl SessionStore {
	/// Creates a session store over the given (session-scoped) storage.
	pub fn new(storage: StorageService) -> Self {
		Self { storage }
	}

	/// The remembered account, if a session is present and readable.
	pub fn current(&self) -> Option<Account> {
		match self.storage.retrieve(StorageKey::Session) {
			Ok(account) => Some(account),
			Err(StorageError::NotFound) => None,
			Err(e) => {
				tracing::warn!(error = %e, "session unreadable, treating as logged out");
				None
			}
		}
	}

	/// Remembers the authenticated account. A write failure only costs
	/// session resumption, so it is logged and swallowed.
	pub fn remember(&self, account: &Account) {
		if let Err(e) = self.storage.store(StorageKey::Session, account) {
			tracing::warn!(error = %e, "failed to remember session");
		}
	}

	/// Forgets the current session.
	pub fn clear(&self) {
		if let Err(e) = self.storage.remove(StorageKey::Session) {
			tracing::warn!(error = %e, "failed to clear session");
		}
	}
}

/// The role-matched capability handed out by a successful login.
pub enum Session {
	Student(StudentSession),
	Staff(StaffSession),
}

impl Session {
	/// The authenticated account behind this session.
	pub fn account(&self) -> &Account {
		match self {
			Session::Student(session) => session.account(),
			Session::Staff(session) => session.account(),
		}
	}
}

/// What a logged-in student may do: place and view their own orders.
pub struct StudentSession {
	account: Account,
	student_id: String,
}

impl StudentSession {
	/// The authenticated account.
	pub fn account(&self) -> &Account {
		&self.account
	}

	/// The student's own `STU-NNN` identifier.
	pub fn student_id(&self) -> &str {
		&self.student_id
	}

	/// Places a new order for this student.
	pub fn place_order(
		&self,
		store: &mut OrderStore,
		items: Items,
		special_instructions: Option<String>,
	) -> Result<Committed<Order>, StoreError> {
		store.create_order(&self.student_id, items, special_instructions)
	}

	/// This student's order in a non-terminal status, if any.
	pub fn active_order<'a>(&self, store: &'a OrderStore) -> Option<&'a Order> {
		store.active_order_for(&self.student_id)
	}

	/// This student's order history, most recent first.
	pub fn history<'a>(&self, store: &'a OrderStore) -> Vec<&'a Order> {
		store.history_for(&self.student_id)
	}

	/// The scan token to show for the active order, present only while
	/// the order is confirmed or ready.
	pub fn pickup_token(&self, store: &OrderStore) -> Option<String> {
		self.active_order(store)
			.filter(|order| {
				matches!(order.status, OrderStatus::Confirmed | OrderStatus::Ready)
			})
			.map(Order::scan_token)
	}
}

/// What logged-in staff may do: process orders and view the queues.
pub struct StaffSession {
	account: Account,
}

impl StaffSession {
	/// The authenticated account.
	pub fn account(&self) -> &Account {
		&self.account
	}

	/// Accepts a pending order.
	pub fn confirm(
		&self,
		store: &mut OrderStore,
		order_id: &str,
	) -> Result<Committed<Order>, StoreError> {
		store.confirm(order_id)
	}

	/// Marks a confirmed order ready for pickup.
	pub fn mark_ready(
		&self,
		store: &mut OrderStore,
		order_id: &str,
	) -> Result<Committed<Order>, StoreError> {
		store.mark_ready(order_id)
	}

	/// Hands a ready order back to its student.
	pub fn deliver(
		&self,
		store: &mut OrderStore,
		order_id: &str,
	) -> Result<Committed<Order>, StoreError> {
		store.deliver(order_id)
	}

	/// Applies a scanned `ORDER-<id>` token.
	pub fn scan(
		&self,
		store: &mut OrderStore,
		token: &str,
	) -> Result<Committed<Order>, StoreError> {
		store.apply_scan_token(token)
	}

	/// Orders awaiting confirmation, in insertion order.
	pub fn pending_queue<'a>(&self, store: &'a OrderStore) -> Vec<&'a Order> {
		store.pending_orders()
	}

	/// Confirmed and ready orders, in insertion order.
	pub fn in_progress_queue<'a>(&self, store: &'a OrderStore) -> Vec<&'a Order> {
		store.in_progress_orders()
	}
}

/// Signup and login front door, parameterized by gate policy.
pub struct SessionGate {
	config: GateConfig,
}

impl SessionGate {
	/// Creates a gate with the given policy.
	pub fn new(config: GateConfig) -> Self {
		Self { config }
	}

	/// Registers a new account after checking the configured password
	/// minimum. Registration does not log the account in.
	pub fn sign_up(
		&self,
		store: &mut OrderStore,
		name: &str,
		email: &str,
		password: &str,
		role: Role,
	) -> Result<Committed<Account>, StoreError> {
		if password.len() < self.config.min_password_len {
			return Err(StoreError::PasswordTooShort {
				min: self.config.min_password_len,
			});
		}
		store.create_account(name, email, password, role)
	}

	/// Authenticates and hands back the role-matched capability.
	///
	/// Any mismatch (unknown email, wrong role, wrong password) yields the
	/// single generic [`StoreError::InvalidCredentials`] outcome.
	pub fn log_in(
		&self,
		store: &mut OrderStore,
		sessions: &SessionStore,
		email: &str,
		password: &str,
		role: Role,
	) -> Result<Session, StoreError> {
		let account = store
			.find_account_by_email_and_role(email, role)
			.ok_or(StoreError::InvalidCredentials)?;
		if account.password != password {
			return Err(StoreError::InvalidCredentials);
		}

		let account_id = account.id.clone();
		let account = store
			.record_login(&account_id)
			.ok_or(StoreError::InvalidCredentials)?
			.into_value();

		sessions.remember(&account);
		tracing::info!(account_id = %account.id, role = %account.role, "logged in");
		session_for(account)
	}

	/// Rebuilds the session from the session store, re-resolving the
	/// account against the loaded store. Returns `None` when no session
	/// is remembered or the remembered account no longer resolves.
	pub fn resume(&self, store: &OrderStore, sessions: &SessionStore) -> Option<Session> {
		let remembered = sessions.current()?;
		let account = store
			.find_account_by_email_and_role(&remembered.email, remembered.role)?
			.clone();
		session_for(account).ok()
	}

	/// Ends the current session.
	pub fn log_out(&self, sessions: &SessionStore) {
		sessions.clear();
	}
}

fn session_for(account: Account) -> Result<Session, StoreError> {
	match account.role {
		Role::Student => {
			// A student account always carries its id; a record without one
			// is unusable and treated as a failed login.
			let student_id = account
				.student_id
				.clone()
				.ok_or(StoreError::InvalidCredentials)?;
			Ok(Session::Student(StudentSession {
				account,
				student_id,
			}))
		}
		Role::Staff => Ok(Session::Staff(StaffSession { account })),
	}
}
