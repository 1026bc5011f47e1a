//! The order store: authoritative collections, persistence, and queries.
//!
//! One `OrderStore` instance is constructed per process/session and handed
//! to whatever drives the system; there is no ambient singleton. Every
//! mutation writes all persisted state back through the storage service,
//! and a failed write is surfaced as a warning rather than rolled back:
//! the mutation already happened in memory and the next successful write
//! will carry it.

use crate::error::StoreError;
use laundry_storage::{StorageError, StorageService};
use laundry_types::{Account, Items, Order, OrderStatus, Role, StorageKey};
use serde::de::DeserializeOwned;

/// Outcome of a mutation that attempted a save.
///
/// The mutation has already been applied in memory. `warning` carries a
/// storage failure the caller should surface; it never implies a rollback.
#[derive(Debug)]
pub struct Committed<T> {
	/// Snapshot of the mutated record.
	pub value: T,
	/// Persistence failure, if the write-back did not complete.
	pub warning: Option<StorageError>,
}

impl<T> Committed<T> {
	/// Discards the persistence warning and returns the mutated value.
	/// The warning has already been logged by the store.
	pub fn into_value(self) -> T {
		self.value
	}
}

/// Owns the account and order collections and the shared student counter.
pub struct OrderStore {
	storage: StorageService,
	accounts: Vec<Account>,
	orders: Vec<Order>,
	next_student_number: u32,
}

impl OrderStore {
	/// Creates an empty store over the given storage service. Call
	/// [`OrderStore::load`] to populate it from persisted state.
	pub fn new(storage: StorageService) -> Self {
		Self {
			storage,
			accounts: Vec::new(),
			orders: Vec::new(),
			next_student_number: 0,
		}
	}

	/// Loads the persisted collections and counter.
	///
	/// Each field falls back to its empty value independently when missing
	/// or unreadable, so one corrupt field cannot poison the rest of the
	/// load.
	pub fn load(&mut self) {
		self.accounts = load_field(&self.storage, StorageKey::Users);
		self.orders = load_field(&self.storage, StorageKey::Orders);
		self.next_student_number = load_field(&self.storage, StorageKey::NextStudentNumber);
		tracing::debug!(
			accounts = self.accounts.len(),
			orders = self.orders.len(),
			next_student_number = self.next_student_number,
			"store loaded"
		);
	}

	/// Writes all persisted state back to the storage service.
	///
	/// Returns the failure as a warning; in-memory state stays valid and
	/// the triggering mutation is not reverted.
	pub fn persist(&self) -> Option<StorageError> {
		let result = self
			.storage
			.store(StorageKey::Users, &self.accounts)
			.and_then(|_| self.storage.store(StorageKey::Orders, &self.orders))
			.and_then(|_| {
				self.storage
					.store(StorageKey::NextStudentNumber, &self.next_student_number)
			});
		match result {
			Ok(()) => None,
			Err(e) => {
				tracing::warn!(error = %e, "persist failed, keeping in-memory state");
				Some(e)
			}
		}
	}

	/// Wraps a mutated snapshot together with the outcome of the write-back.
	pub(crate) fn commit<T>(&mut self, value: T) -> Committed<T> {
		let warning = self.persist();
		Committed { value, warning }
	}

	/// Exact-match lookup by email and role.
	pub fn find_account_by_email_and_role(&self, email: &str, role: Role) -> Option<&Account> {
		self.accounts
			.iter()
			.find(|account| account.email == email && account.role == role)
	}

	/// Exact-match lookup by email alone.
	pub fn find_account_by_email(&self, email: &str) -> Option<&Account> {
		self.accounts.iter().find(|account| account.email == email)
	}

	/// Exact-match lookup by `STU-NNN` identifier.
	pub fn find_account_by_student_id(&self, student_id: &str) -> Option<&Account> {
		self.accounts
			.iter()
			.find(|account| account.student_id.as_deref() == Some(student_id))
	}

	/// Registers a new account.
	///
	/// Fails with [`StoreError::DuplicateEmail`] if the email is already
	/// registered under any role. Students draw the next `STU-NNN` from the
	/// shared counter; the counter is incremented before the number is
	/// used, as one indivisible step, so no two students can ever share
	/// one.
	pub fn create_account(
		&mut self,
		name: &str,
		email: &str,
		password: &str,
		role: Role,
	) -> Result<Committed<Account>, StoreError> {
		if self.find_account_by_email(email).is_some() {
			return Err(StoreError::DuplicateEmail);
		}

		let student_id = match role {
			Role::Student => {
				self.next_student_number += 1;
				Some(format!("STU-{:03}", self.next_student_number))
			}
			Role::Staff => None,
		};

		let account = Account::new(
			name.to_string(),
			email.to_string(),
			password.to_string(),
			role,
			student_id,
		);
		self.accounts.push(account.clone());
		tracing::info!(account_id = %account.id, role = %account.role, "account created");
		Ok(self.commit(account))
	}

	/// Places a new order for the given student.
	///
	/// Fails with [`StoreError::ActiveOrderExists`] while the student holds
	/// any non-terminal order, and with [`StoreError::EmptyOrder`] when a
	/// structured item set sums to zero quantity.
	pub fn create_order(
		&mut self,
		student_id: &str,
		items: Items,
		special_instructions: Option<String>,
	) -> Result<Committed<Order>, StoreError> {
		if self.active_order_for(student_id).is_some() {
			return Err(StoreError::ActiveOrderExists);
		}
		if items.quantity_sum() == Some(0) {
			return Err(StoreError::EmptyOrder);
		}

		let order = Order::new(student_id.to_string(), items, special_instructions);
		self.orders.push(order.clone());
		tracing::info!(order_id = %order.id, student_id, "order placed");
		Ok(self.commit(order))
	}

	/// The student's single order in a non-terminal status, if any.
	pub fn active_order_for(&self, student_id: &str) -> Option<&Order> {
		self.orders
			.iter()
			.find(|order| order.student_id == student_id && order.status.is_open())
	}

	/// All of the student's orders, most recently created first.
	pub fn history_for(&self, student_id: &str) -> Vec<&Order> {
		let mut history: Vec<&Order> = self
			.orders
			.iter()
			.filter(|order| order.student_id == student_id)
			.collect();
		history.sort_by(|a, b| b.created_at.cmp(&a.created_at));
		history
	}

	/// Orders awaiting confirmation, in insertion order.
	pub fn pending_orders(&self) -> Vec<&Order> {
		self.orders
			.iter()
			.filter(|order| order.status == OrderStatus::Pending)
			.collect()
	}

	/// Confirmed and ready orders, in insertion order.
	pub fn in_progress_orders(&self) -> Vec<&Order> {
		self.orders
			.iter()
			.filter(|order| {
				matches!(order.status, OrderStatus::Confirmed | OrderStatus::Ready)
			})
			.collect()
	}

	/// Looks up an order by id.
	pub fn order(&self, order_id: &str) -> Option<&Order> {
		self.orders.iter().find(|order| order.id == order_id)
	}

	pub(crate) fn order_mut(&mut self, order_id: &str) -> Option<&mut Order> {
		self.orders.iter_mut().find(|order| order.id == order_id)
	}

	/// Stamps the account's last login and persists.
	pub(crate) fn record_login(&mut self, account_id: &str) -> Option<Committed<Account>> {
		let account = self
			.accounts
			.iter_mut()
			.find(|account| account.id == account_id)?;
		account.last_login_at = Some(chrono::Utc::now());
		let snapshot = account.clone();
		Some(self.commit(snapshot))
	}

	/// All registered accounts, in signup order.
	pub fn accounts(&self) -> &[Account] {
		&self.accounts
	}

	/// All orders, in insertion order.
	pub fn orders(&self) -> &[Order] {
		&self.orders
	}

	/// Current value of the shared student-number counter.
	pub fn next_student_number(&self) -> u32 {
		self.next_student_number
	}
}

fn load_field<T: DeserializeOwned + Default>(storage: &StorageService, key: StorageKey) -> T {
	match storage.retrieve(key) {
		Ok(value) => value,
		Err(StorageError::NotFound) => T::default(),
		Err(e) => {
			tracing::warn!(key = key.as_str(), error = %e, "stored value unreadable, starting empty");
			T::default()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use laundry_storage::{MemoryStorage, StorageBackend};
	use laundry_types::{Garment, OrderStatus};

	fn store_on(backend: MemoryStorage) -> OrderStore {
		let mut store = OrderStore::new(StorageService::new(Box::new(backend)));
		store.load();
		store
	}

	fn memory_store() -> OrderStore {
		store_on(MemoryStorage::new())
	}

	fn sign_up_student(store: &mut OrderStore, email: &str) -> Account {
		store
			.create_account("Student", email, "changemeplease", Role::Student)
			.unwrap()
			.into_value()
	}

	#[test]
	fn student_ids_are_sequential_and_zero_padded() {
		let mut store = memory_store();

		let first = sign_up_student(&mut store, "a@campus.edu");
		let second = sign_up_student(&mut store, "b@campus.edu");
		let staff = store
			.create_account("Staff", "s@campus.edu", "washhouse", Role::Staff)
			.unwrap()
			.into_value();
		let third = sign_up_student(&mut store, "c@campus.edu");

		assert_eq!(first.student_id.as_deref(), Some("STU-001"));
		assert_eq!(second.student_id.as_deref(), Some("STU-002"));
		assert_eq!(staff.student_id, None);
		assert_eq!(third.student_id.as_deref(), Some("STU-003"));
		assert_eq!(store.next_student_number(), 3);
	}

	#[test]
	fn duplicate_email_is_rejected_across_roles() {
		let mut store = memory_store();
		sign_up_student(&mut store, "same@campus.edu");

		let result = store.create_account("Other", "same@campus.edu", "password1", Role::Staff);
		assert!(matches!(result, Err(StoreError::DuplicateEmail)));
		assert_eq!(store.accounts().len(), 1);
	}

	#[test]
	fn one_active_order_per_student() {
		let mut store = memory_store();
		let student = sign_up_student(&mut store, "a@campus.edu");
		let student_id = student.student_id.unwrap();

		store
			.create_order(&student_id, Items::from_catalog([(Garment::Pant, 1)]), None)
			.unwrap();

		let result =
			store.create_order(&student_id, Items::from_catalog([(Garment::Shirt, 1)]), None);
		assert!(matches!(result, Err(StoreError::ActiveOrderExists)));
		assert_eq!(store.orders().len(), 1);
	}

	#[test]
	fn zero_quantity_structured_order_is_rejected() {
		let mut store = memory_store();
		let student = sign_up_student(&mut store, "a@campus.edu");
		let student_id = student.student_id.unwrap();

		let result =
			store.create_order(&student_id, Items::from_catalog([(Garment::Towel, 0)]), None);
		assert!(matches!(result, Err(StoreError::EmptyOrder)));
		assert!(store.orders().is_empty());
	}

	#[test]
	fn legacy_order_is_accepted_as_written() {
		let mut store = memory_store();
		let student = sign_up_student(&mut store, "a@campus.edu");
		let student_id = student.student_id.unwrap();

		let order = store
			.create_order(
				&student_id,
				Items::Legacy("two shirts, one towel".into()),
				Some("no starch".into()),
			)
			.unwrap()
			.into_value();
		assert_eq!(order.status, OrderStatus::Pending);
		assert_eq!(order.total_items, None);
		assert_eq!(order.total_quantity(), None);
	}

	#[test]
	fn history_is_most_recent_first() {
		let mut store = memory_store();
		let student = sign_up_student(&mut store, "a@campus.edu");
		let student_id = student.student_id.unwrap();

		let first = store
			.create_order(&student_id, Items::from_catalog([(Garment::Pant, 1)]), None)
			.unwrap()
			.into_value();
		store.confirm(&first.id).unwrap();
		store.mark_ready(&first.id).unwrap();
		store.deliver(&first.id).unwrap();

		let second = store
			.create_order(&student_id, Items::from_catalog([(Garment::Shirt, 1)]), None)
			.unwrap()
			.into_value();

		let history = store.history_for(&student_id);
		assert_eq!(history.len(), 2);
		assert_eq!(history[0].id, second.id);
		assert_eq!(history[1].id, first.id);
	}

	#[test]
	fn queues_keep_insertion_order() {
		let mut store = memory_store();
		let mut order_ids = Vec::new();
		for i in 0..3 {
			let student = sign_up_student(&mut store, &format!("s{}@campus.edu", i));
			let student_id = student.student_id.unwrap();
			let order = store
				.create_order(&student_id, Items::from_catalog([(Garment::Towel, 1)]), None)
				.unwrap()
				.into_value();
			order_ids.push(order.id);
		}

		let pending: Vec<&str> = store.pending_orders().iter().map(|o| o.id.as_str()).collect();
		assert_eq!(pending, order_ids.iter().map(String::as_str).collect::<Vec<_>>());

		store.confirm(&order_ids[1]).unwrap();
		store.confirm(&order_ids[0]).unwrap();

		// In-progress reflects insertion order, not confirmation order.
		let in_progress: Vec<&str> = store
			.in_progress_orders()
			.iter()
			.map(|o| o.id.as_str())
			.collect();
		assert_eq!(in_progress, vec![order_ids[0].as_str(), order_ids[1].as_str()]);
	}

	#[test]
	fn round_trip_reproduces_state() {
		for order_count in [0usize, 1, 50] {
			let backend = MemoryStorage::new();
			let mut store = store_on(backend.clone());

			for i in 0..order_count {
				let student = sign_up_student(&mut store, &format!("s{}@campus.edu", i));
				let student_id = student.student_id.unwrap();
				store
					.create_order(
						&student_id,
						Items::from_catalog([(Garment::Shirt, 2), (Garment::SocksPair, 1)]),
						None,
					)
					.unwrap();
			}

			// A fresh store over the same storage simulates a reload.
			let reloaded = store_on(backend);
			assert_eq!(reloaded.accounts(), store.accounts());
			assert_eq!(reloaded.orders(), store.orders());
			assert_eq!(reloaded.next_student_number(), store.next_student_number());
		}
	}

	#[test]
	fn corrupt_field_does_not_poison_the_load() {
		let backend = MemoryStorage::new();
		{
			let mut store = store_on(backend.clone());
			let student = sign_up_student(&mut store, "a@campus.edu");
			store
				.create_order(
					&student.student_id.unwrap(),
					Items::from_catalog([(Garment::Pant, 1)]),
					None,
				)
				.unwrap();
		}

		// Clobber the account collection only.
		backend
			.set_bytes(StorageKey::Users.as_str(), b"{corrupt".to_vec())
			.unwrap();

		let reloaded = store_on(backend);
		assert!(reloaded.accounts().is_empty());
		assert_eq!(reloaded.orders().len(), 1);
		assert_eq!(reloaded.next_student_number(), 1);
	}

	struct RefusingStorage;

	impl StorageBackend for RefusingStorage {
		fn get_bytes(&self, _key: &str) -> Result<Vec<u8>, StorageError> {
			Err(StorageError::NotFound)
		}

		fn set_bytes(&self, _key: &str, _value: Vec<u8>) -> Result<(), StorageError> {
			Err(StorageError::Backend("quota exceeded".into()))
		}

		fn delete(&self, _key: &str) -> Result<(), StorageError> {
			Ok(())
		}

		fn exists(&self, _key: &str) -> Result<bool, StorageError> {
			Ok(false)
		}
	}

	#[test]
	fn persist_failure_is_a_warning_not_a_rollback() {
		let mut store = OrderStore::new(StorageService::new(Box::new(RefusingStorage)));
		store.load();

		let committed = store
			.create_account("Student", "a@campus.edu", "changemeplease", Role::Student)
			.unwrap();
		assert!(matches!(committed.warning, Some(StorageError::Backend(_))));

		// The account still exists in memory.
		assert_eq!(store.accounts().len(), 1);
		assert!(store.find_account_by_email("a@campus.edu").is_some());
	}
}
