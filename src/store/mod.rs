//! In-memory relay stores
//!
//! - `ExpiringStore`: TTL-bounded hand-off store (one-shot `take` or `peek`)
//! - `DocumentRegistry`: non-expiring, LRU-bounded registry with a "latest" slot
//!
//! Stores are constructed once at start-up and passed to handlers through
//! `AppState`; nothing here is process-global.

mod expiring;
mod key;
mod registry;

pub use expiring::{ExpiringStore, ExpiringStoreConfig};
pub use key::{new_key, Stamp};
pub use registry::DocumentRegistry;
