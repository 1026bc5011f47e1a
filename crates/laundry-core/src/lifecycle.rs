//! Order lifecycle transitions.
//!
//! The chain is strictly linear: pending -> confirmed -> ready ->
//! delivered. Each transition stamps its timestamp exactly once, persists,
//! and fails loudly when called out of order; repeat calls are errors,
//! never no-ops. Staff-side scanning drives the same transitions through
//! an opaque `ORDER-<id>` token.

use crate::error::StoreError;
use crate::store::{Committed, OrderStore};
use chrono::Utc;
use laundry_types::{Order, OrderStatus, ORDER_TOKEN_PREFIX};

impl OrderStore {
	/// Accepts a pending order: status to confirmed, `confirmed_at` stamped.
	pub fn confirm(&mut self, order_id: &str) -> Result<Committed<Order>, StoreError> {
		self.transition(order_id, OrderStatus::Confirmed)
	}

	/// Marks a confirmed order ready for pickup: `ready_at` stamped.
	pub fn mark_ready(&mut self, order_id: &str) -> Result<Committed<Order>, StoreError> {
		self.transition(order_id, OrderStatus::Ready)
	}

	/// Hands a ready order back to the student: `completed_at` stamped.
	/// Terminal; the student's active slot frees up.
	pub fn deliver(&mut self, order_id: &str) -> Result<Committed<Order>, StoreError> {
		self.transition(order_id, OrderStatus::Delivered)
	}

	/// Applies a scanned token, dispatching to whichever transition matches
	/// the order's current status.
	///
	/// The token must read `ORDER-<order id>`; anything else is
	/// [`StoreError::MalformedToken`]. A token for a delivered order fails
	/// with [`StoreError::InvalidTransition`] without mutating anything.
	pub fn apply_scan_token(&mut self, token: &str) -> Result<Committed<Order>, StoreError> {
		let order_id = token
			.strip_prefix(ORDER_TOKEN_PREFIX)
			.ok_or(StoreError::MalformedToken)?;

		let status = self
			.order(order_id)
			.ok_or_else(|| StoreError::OrderNotFound(order_id.to_string()))?
			.status;

		match status {
			OrderStatus::Pending => self.confirm(order_id),
			OrderStatus::Confirmed => self.mark_ready(order_id),
			OrderStatus::Ready => self.deliver(order_id),
			OrderStatus::Delivered => Err(StoreError::InvalidTransition {
				from: OrderStatus::Delivered,
				to: OrderStatus::Delivered,
			}),
		}
	}

	fn transition(
		&mut self,
		order_id: &str,
		to: OrderStatus,
	) -> Result<Committed<Order>, StoreError> {
		let now = Utc::now();
		let order = self
			.order_mut(order_id)
			.ok_or_else(|| StoreError::OrderNotFound(order_id.to_string()))?;

		if order.status.next() != Some(to) {
			return Err(StoreError::InvalidTransition {
				from: order.status,
				to,
			});
		}

		let from = order.status;
		order.status = to;
		match to {
			OrderStatus::Confirmed => order.confirmed_at = Some(now),
			OrderStatus::Ready => order.ready_at = Some(now),
			OrderStatus::Delivered => order.completed_at = Some(now),
			// Pending is never a transition target; next() never yields it.
			OrderStatus::Pending => {}
		}

		let snapshot = order.clone();
		tracing::info!(order_id, %from, %to, "order transitioned");
		Ok(self.commit(snapshot))
	}
}
