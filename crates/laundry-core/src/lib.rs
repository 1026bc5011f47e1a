//! Core order management for the campus laundry service.
//!
//! This crate owns the authoritative in-memory collections of accounts and
//! orders, the order lifecycle state machine, and the role-scoped session
//! capabilities. Persistence goes through the injected storage service
//! after every mutation; queries are pure. The whole crate is driven
//! synchronously by an external UI or test harness.

/// Configuration loading and validation.
pub mod config;
/// Domain error kinds.
pub mod error;
/// Order lifecycle transitions and token dispatch.
pub mod lifecycle;
/// Role-scoped session capabilities over the store.
pub mod session;
/// The order store: collections, load/save, and queries.
pub mod store;

pub use config::{Config, ConfigError, GateConfig, StorageConfig};
pub use error::StoreError;
pub use session::{Session, SessionGate, SessionStore, StaffSession, StudentSession};
pub use store::{Committed, OrderStore};
