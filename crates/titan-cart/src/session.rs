//! # Session Store
//!
//! The key-value store a cart persists into. Hosts back this with whatever
//! session mechanism they already run (cookie store, Redis, in-process map);
//! the cart only needs four operations on string blobs.
//!
//! ## Keys
//! ```text
//! cart.default    ← Cart::new(..) before any instance() call
//! cart.wishlist   ← cart.instance(Some("wishlist"))
//! ```
//!
//! Each key holds the JSON encoding of one [`CartContent`](crate::CartContent).

use std::collections::HashMap;
use std::sync::Mutex;

/// Per-session key-value storage.
///
/// Implementations are owned by the host and shared across requests, so
/// they must be thread-safe. The cart performs at most one `get` and one
/// `put`/`remove` per mutating call.
pub trait SessionStore: Send + Sync {
    fn has(&self, key: &str) -> bool;

    fn get(&self, key: &str) -> Option<String>;

    fn put(&self, key: &str, value: String);

    fn remove(&self, key: &str);
}

/// In-process session store.
///
/// Suitable for tests, the demo binary, and single-process hosts that keep
/// sessions in memory.
#[derive(Debug, Default)]
pub struct MemorySession {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A panicking writer can't leave a half-written String behind
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemorySession {
    fn has(&self, key: &str) -> bool {
        self.entries().contains_key(key)
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn put(&self, key: &str, value: String) {
        self.entries().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries().remove(key);
    }
}
