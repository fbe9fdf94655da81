//! # titan-cart: Session-Scoped Shopping Cart
//!
//! Cart logic for storefront sessions. Line items are keyed by a hash of
//! their identity, persisted as one blob per cart instance in whatever
//! session store the host provides, and every mutation fires a typed event.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Request                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Host Application                             │   │
//! │  │    route handler ──► Cart::new(session, events, config)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ titan-cart (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   cart    │  │   item    │  │  search   │  │  event    │  │   │
//! │  │   │   Cart    │  │   Item    │  │ ItemFilter│  │ CartEvent │  │   │
//! │  │   │ instances │  │   hash    │  │ predicate │  │ EventBus  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ SessionStore trait                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              Session backend (owned by the host)                │   │
//! │  │     "cart.default" → JSON blob, "cart.wishlist" → JSON blob     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - The cart itself: add, update, remove, destroy, queries
//! - [`item`] - Cart lines, hashing, update rules
//! - [`options`] - Key-ordered item options
//! - [`content`] - Ordered hash → item collection
//! - [`search`] - Field and predicate filters
//! - [`event`] - Lifecycle events and dispatchers
//! - [`session`] - Session store seam plus an in-memory store
//! - [`cartable`] - Domain objects that add themselves to a cart
//! - [`config`] - Instance naming and title update policy
//! - [`error`] / [`validation`] - Typed errors and input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use titan_cart::{Cart, CartConfig, ItemOptions, ItemUpdate, MemorySession, NullDispatcher};
//!
//! let cart = Cart::new(Arc::new(MemorySession::new()), Arc::new(NullDispatcher), CartConfig::default());
//!
//! let tee = cart
//!     .add("tee-01", "Crew Tee", 2, 12.5, ItemOptions::from([("size", "M")]))
//!     .unwrap();
//!
//! // Same id and options: quantities are summed on one line
//! cart.add("tee-01", "Crew Tee", 1, 12.5, ItemOptions::from([("size", "M")])).unwrap();
//! assert_eq!(cart.count_items(), 1);
//! assert_eq!(cart.count_quantities(), 3);
//!
//! cart.update(tee.hash(), ItemUpdate::new().qty(4)).unwrap();
//! assert_eq!(cart.total(), 50.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod cartable;
pub mod config;
pub mod content;
pub mod error;
pub mod event;
pub mod item;
pub mod options;
pub mod search;
pub mod session;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use cartable::{Cartable, ModelRepository, Shopping};
pub use config::CartConfig;
pub use content::CartContent;
pub use error::{CartError, CartResult, ValidationError};
pub use event::{CartEvent, EventBus, EventDispatcher, NullDispatcher, TracingDispatcher};
pub use item::{Item, ItemUpdate, TitleUpdatePolicy};
pub use options::ItemOptions;
pub use search::{ItemFilter, SearchFilter};
pub use session::{MemorySession, SessionStore};
