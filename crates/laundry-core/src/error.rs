//! Domain errors for the order store and session gate.

use laundry_types::OrderStatus;
use thiserror::Error;

/// Errors that can occur during store and session operations.
///
/// Every variant blocks the requested mutation entirely; persistence
/// warnings are not errors and ride on [`crate::Committed`] instead.
#[derive(Debug, Error)]
pub enum StoreError {
	/// An account with this email is already registered, regardless of role.
	#[error("an account with this email already exists")]
	DuplicateEmail,
	/// The student already holds an order in a non-terminal status.
	#[error("student already has an active order")]
	ActiveOrderExists,
	/// A structured item set summing to zero quantity.
	#[error("order contains no items")]
	EmptyOrder,
	/// The order id did not resolve.
	#[error("order not found: {0}")]
	OrderNotFound(String),
	/// The order's current status does not allow the requested transition.
	#[error("invalid transition: order in status '{from}' cannot move to '{to}'")]
	InvalidTransition { from: OrderStatus, to: OrderStatus },
	/// A scan token without the `ORDER-` prefix.
	#[error("malformed scan token")]
	MalformedToken,
	/// The supplied password is shorter than the configured minimum.
	#[error("password must be at least {min} characters")]
	PasswordTooShort { min: usize },
	/// Login failed. Deliberately does not distinguish a wrong email from
	/// a wrong password.
	#[error("invalid credentials")]
	InvalidCredentials,
}
