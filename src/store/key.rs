//! Identifier and timestamp helpers shared by the stores

use tokio::time::{Duration, Instant};
use uuid::Uuid;

/// Generate a fresh store key (random UUID v4, 122 bits of entropy)
pub fn new_key() -> String {
    Uuid::new_v4().to_string()
}

/// Creation stamp for a stored record
///
/// Uses the tokio clock so that a paused test runtime can advance time.
#[derive(Debug, Clone, Copy)]
pub struct Stamp(Instant);

impl Stamp {
    pub fn now() -> Self {
        Self(Instant::now())
    }

    /// Time elapsed since the stamp was taken
    pub fn age(&self) -> Duration {
        Instant::now().saturating_duration_since(self.0)
    }

    /// Whether a record with this stamp has outlived `ttl`
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age() >= ttl
    }
}
