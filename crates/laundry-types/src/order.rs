//! Order types: lifecycle status, item representation, and the scan token.
//!
//! The item field of an order has two on-disk shapes. Early records store a
//! free-text description; later records store a garment-to-quantity map.
//! Both must remain readable side by side, so [`Items`] is a tagged variant
//! and no stored record is ever migrated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Prefix of the scan token handed to staff, format `ORDER-<order id>`.
pub const ORDER_TOKEN_PREFIX: &str = "ORDER-";

/// Current position of an order in its lifecycle.
///
/// The chain is strictly linear: pending -> confirmed -> ready -> delivered.
/// There is no cancellation or rejection branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
	/// Placed by the student, awaiting staff confirmation.
	Pending,
	/// Accepted by staff, being processed.
	Confirmed,
	/// Processed and ready for pickup.
	Ready,
	/// Handed back to the student. Terminal.
	Delivered,
}

impl OrderStatus {
	/// The next status in the linear chain, or `None` from the terminal state.
	pub fn next(self) -> Option<OrderStatus> {
		match self {
			OrderStatus::Pending => Some(OrderStatus::Confirmed),
			OrderStatus::Confirmed => Some(OrderStatus::Ready),
			OrderStatus::Ready => Some(OrderStatus::Delivered),
			OrderStatus::Delivered => None,
		}
	}

	/// True once the order has reached its final state.
	pub fn is_terminal(self) -> bool {
		matches!(self, OrderStatus::Delivered)
	}

	/// True while the order still occupies the student's single active slot.
	pub fn is_open(self) -> bool {
		!self.is_terminal()
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OrderStatus::Pending => write!(f, "pending"),
			OrderStatus::Confirmed => write!(f, "confirmed"),
			OrderStatus::Ready => write!(f, "ready"),
			OrderStatus::Delivered => write!(f, "delivered"),
		}
	}
}

/// The fixed catalog of garment categories offered for quantity selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Garment {
	Pant,
	Shirt,
	TShirt,
	Jeans,
	Shorts,
	Kurta,
	Saree,
	BedSheet,
	PillowCover,
	Blanket,
	Towel,
	SocksPair,
	Undergarment,
	Jacket,
	Sweater,
	Dupatta,
	Curtain,
}

impl Garment {
	/// Returns the catalog name used as the map key in structured orders.
	pub fn as_str(&self) -> &'static str {
		match self {
			Garment::Pant => "PANT",
			Garment::Shirt => "SHIRT",
			Garment::TShirt => "T-SHIRT",
			Garment::Jeans => "JEANS",
			Garment::Shorts => "SHORTS",
			Garment::Kurta => "KURTA",
			Garment::Saree => "SAREE",
			Garment::BedSheet => "BED SHEET",
			Garment::PillowCover => "PILLOW COVER",
			Garment::Blanket => "BLANKET",
			Garment::Towel => "TOWEL",
			Garment::SocksPair => "SOCKS PAIR",
			Garment::Undergarment => "UNDERGARMENT",
			Garment::Jacket => "JACKET",
			Garment::Sweater => "SWEATER",
			Garment::Dupatta => "DUPATTA",
			Garment::Curtain => "CURTAIN",
		}
	}

	/// Returns an iterator over the catalog in its display order.
	pub fn all() -> impl Iterator<Item = Self> {
		[
			Self::Pant,
			Self::Shirt,
			Self::TShirt,
			Self::Jeans,
			Self::Shorts,
			Self::Kurta,
			Self::Saree,
			Self::BedSheet,
			Self::PillowCover,
			Self::Blanket,
			Self::Towel,
			Self::SocksPair,
			Self::Undergarment,
			Self::Jacket,
			Self::Sweater,
			Self::Dupatta,
			Self::Curtain,
		]
		.into_iter()
	}
}

/// The two on-disk shapes of an order's item field.
///
/// Serialized untagged: a JSON string deserializes as [`Items::Legacy`],
/// a JSON object as [`Items::Structured`]. Shape detection happens here,
/// by variant, and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Items {
	/// Garment name to positive quantity, keys drawn from the catalog.
	Structured(HashMap<String, u32>),
	/// Free-text description from early records.
	Legacy(String),
}

impl Items {
	/// Builds a structured item set from catalog entries.
	pub fn from_catalog<I: IntoIterator<Item = (Garment, u32)>>(entries: I) -> Self {
		Items::Structured(
			entries
				.into_iter()
				.map(|(garment, quantity)| (garment.as_str().to_string(), quantity))
				.collect(),
		)
	}

	/// Sum of quantities for a structured set; `None` for legacy text,
	/// where the total was never recorded.
	pub fn quantity_sum(&self) -> Option<u32> {
		match self {
			Items::Structured(map) => Some(map.values().sum()),
			Items::Legacy(_) => None,
		}
	}

	/// Human-readable rendering for display.
	///
	/// Structured sets render as comma-joined `"qty NAME"` entries in
	/// catalog order, skipping zero quantities. Legacy text is returned
	/// unchanged.
	pub fn summary(&self) -> String {
		match self {
			Items::Structured(map) => {
				let parts: Vec<String> = Garment::all()
					.filter_map(|garment| {
						map.get(garment.as_str())
							.filter(|&&quantity| quantity > 0)
							.map(|quantity| format!("{} {}", quantity, garment.as_str()))
					})
					.collect();
				parts.join(", ")
			}
			Items::Legacy(text) => text.clone(),
		}
	}
}

/// One laundry pickup request tied to a student.
///
/// Orders are created by a student action and mutated only by the status
/// transition operations on the store; they are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
	/// Unique identifier, assigned at creation.
	pub id: String,
	/// `STU-NNN` of the owning student.
	pub student_id: String,
	/// What the student handed in, in either on-disk shape.
	pub items: Items,
	/// Recorded quantity total. Present only for structured orders; legacy
	/// records never carried one.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub total_items: Option<u32>,
	/// Optional free-text handling notes.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub special_instructions: Option<String>,
	/// Current lifecycle status.
	pub status: OrderStatus,
	/// Timestamp when the order was placed.
	pub created_at: DateTime<Utc>,
	/// Set once by the pending -> confirmed transition.
	pub confirmed_at: Option<DateTime<Utc>>,
	/// Set once by the confirmed -> ready transition.
	pub ready_at: Option<DateTime<Utc>>,
	/// Set once by the ready -> delivered transition.
	pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
	/// Creates a new pending order with all transition timestamps unset.
	pub fn new(student_id: String, items: Items, special_instructions: Option<String>) -> Self {
		let total_items = items.quantity_sum();
		Self {
			id: Uuid::new_v4().to_string(),
			student_id,
			items,
			total_items,
			special_instructions,
			status: OrderStatus::Pending,
			created_at: Utc::now(),
			confirmed_at: None,
			ready_at: None,
			completed_at: None,
		}
	}

	/// Total item quantity: the recorded total when present, else the sum
	/// over the structured map, else `None` (legacy text, total unknown).
	pub fn total_quantity(&self) -> Option<u32> {
		self.total_items.or_else(|| self.items.quantity_sum())
	}

	/// The scan token shown to the student and consumed by staff-side
	/// scanning, format `ORDER-<order id>`.
	pub fn scan_token(&self) -> String {
		format!("{}{}", ORDER_TOKEN_PREFIX, self.id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_chain_is_linear() {
		assert_eq!(OrderStatus::Pending.next(), Some(OrderStatus::Confirmed));
		assert_eq!(OrderStatus::Confirmed.next(), Some(OrderStatus::Ready));
		assert_eq!(OrderStatus::Ready.next(), Some(OrderStatus::Delivered));
		assert_eq!(OrderStatus::Delivered.next(), None);
		assert!(OrderStatus::Delivered.is_terminal());
		assert!(OrderStatus::Ready.is_open());
	}

	#[test]
	fn structured_summary_follows_catalog_order() {
		let items = Items::from_catalog([
			(Garment::SocksPair, 1),
			(Garment::Shirt, 2),
			(Garment::Towel, 0),
		]);
		assert_eq!(items.summary(), "2 SHIRT, 1 SOCKS PAIR");
		assert_eq!(items.quantity_sum(), Some(3));
	}

	#[test]
	fn legacy_summary_is_the_text_itself() {
		let items = Items::Legacy("3 shirts and a bedsheet".into());
		assert_eq!(items.summary(), "3 shirts and a bedsheet");
		assert_eq!(items.quantity_sum(), None);
	}

	#[test]
	fn items_deserialize_by_shape() {
		let legacy: Items = serde_json::from_str("\"two towels\"").unwrap();
		assert_eq!(legacy, Items::Legacy("two towels".into()));

		let structured: Items = serde_json::from_str(r#"{"PANT": 1, "SHIRT": 2}"#).unwrap();
		match structured {
			Items::Structured(map) => {
				assert_eq!(map.get("PANT"), Some(&1));
				assert_eq!(map.get("SHIRT"), Some(&2));
			}
			Items::Legacy(_) => panic!("object should deserialize as structured"),
		}
	}

	#[test]
	fn total_prefers_recorded_value() {
		let mut order = Order::new(
			"STU-001".into(),
			Items::from_catalog([(Garment::Pant, 2)]),
			None,
		);
		assert_eq!(order.total_quantity(), Some(2));

		// Stored totals from disk win over re-derivation.
		order.total_items = Some(5);
		assert_eq!(order.total_quantity(), Some(5));

		let legacy = Order::new("STU-001".into(), Items::Legacy("a towel".into()), None);
		assert_eq!(legacy.total_quantity(), None);
	}

	#[test]
	fn scan_token_carries_the_order_id() {
		let order = Order::new("STU-001".into(), Items::Legacy("a towel".into()), None);
		assert_eq!(order.scan_token(), format!("ORDER-{}", order.id));
	}
}
