//! Common types for the laundry order core.
//!
//! This crate defines the data types shared by the storage and order
//! management crates: accounts, orders, the garment catalog, and the
//! typed storage keys. It carries no behavior beyond what the types
//! themselves own (status chains, item aggregation, token formatting).

/// Account types for students and staff.
pub mod account;
/// Order, status, and item representation types.
pub mod order;
/// Typed keys for the persistence collaborator.
pub mod storage;

pub use account::{Account, Role};
pub use order::{Garment, Items, Order, OrderStatus, ORDER_TOKEN_PREFIX};
pub use storage::StorageKey;
