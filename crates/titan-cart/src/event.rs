//! # Cart Events
//!
//! Lifecycle notifications fired around every cart mutation.
//!
//! ## Event Pairs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation        Before (content before)      After (content after)   │
//! │  ─────────        ───────────────────────      ──────────────────────  │
//! │  add (new line)   cart.adding    (item)        cart.added     (item)   │
//! │  update           cart.updating  (old item)    cart.updated   (item)   │
//! │  remove           cart.removing  (item)        cart.removed   (item)   │
//! │  destroy          cart.destroying              cart.destroyed          │
//! │                                                                         │
//! │  add on an existing hash fires the update pair, not the add pair.      │
//! │  An "after" event is only fired once the session write happened.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Payloads are snapshots: a listener holding on to an event never sees the
//! cart change underneath it.

use std::sync::Mutex;

use tracing::debug;

use crate::content::CartContent;
use crate::item::Item;

// =============================================================================
// Cart Event
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    Adding { item: Item, content: CartContent },
    Added { item: Item, content: CartContent },
    Updating { item: Item, content: CartContent },
    Updated { item: Item, content: CartContent },
    Removing { item: Item, content: CartContent },
    Removed { item: Item, content: CartContent },
    Destroying { content: CartContent },
    Destroyed { content: CartContent },
}

impl CartEvent {
    /// Dotted event name, e.g. `cart.added`.
    pub fn name(&self) -> &'static str {
        match self {
            CartEvent::Adding { .. } => "cart.adding",
            CartEvent::Added { .. } => "cart.added",
            CartEvent::Updating { .. } => "cart.updating",
            CartEvent::Updated { .. } => "cart.updated",
            CartEvent::Removing { .. } => "cart.removing",
            CartEvent::Removed { .. } => "cart.removed",
            CartEvent::Destroying { .. } => "cart.destroying",
            CartEvent::Destroyed { .. } => "cart.destroyed",
        }
    }

    /// The item the event is about. `None` for destroy events.
    pub fn item(&self) -> Option<&Item> {
        match self {
            CartEvent::Adding { item, .. }
            | CartEvent::Added { item, .. }
            | CartEvent::Updating { item, .. }
            | CartEvent::Updated { item, .. }
            | CartEvent::Removing { item, .. }
            | CartEvent::Removed { item, .. } => Some(item),
            CartEvent::Destroying { .. } | CartEvent::Destroyed { .. } => None,
        }
    }

    /// Content snapshot carried by the event.
    pub fn content(&self) -> &CartContent {
        match self {
            CartEvent::Adding { content, .. }
            | CartEvent::Added { content, .. }
            | CartEvent::Updating { content, .. }
            | CartEvent::Updated { content, .. }
            | CartEvent::Removing { content, .. }
            | CartEvent::Removed { content, .. }
            | CartEvent::Destroying { content }
            | CartEvent::Destroyed { content } => content,
        }
    }
}

// =============================================================================
// Dispatchers
// =============================================================================

/// Receives cart events. Fire-and-forget: nothing is returned to the cart.
pub trait EventDispatcher: Send + Sync {
    fn fire(&self, event: &CartEvent);
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDispatcher;

impl EventDispatcher for NullDispatcher {
    fn fire(&self, _event: &CartEvent) {}
}

/// Logs every event at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDispatcher;

impl EventDispatcher for TracingDispatcher {
    fn fire(&self, event: &CartEvent) {
        match event.item() {
            Some(item) => debug!(
                event = event.name(),
                hash = %item.hash(),
                qty = item.qty(),
                lines = event.content().len(),
                "Cart event"
            ),
            None => debug!(event = event.name(), lines = event.content().len(), "Cart event"),
        }
    }
}

type Listener = Box<dyn Fn(&CartEvent) + Send + Sync>;

/// Fans each event out to registered listener closures, in registration
/// order.
///
/// ## Usage
/// ```rust
/// use std::sync::Arc;
/// use titan_cart::{Cart, CartConfig, EventBus, ItemOptions, MemorySession};
///
/// let bus = Arc::new(EventBus::new());
/// bus.listen(|event| println!("{}", event.name()));
///
/// let cart = Cart::new(Arc::new(MemorySession::new()), bus, CartConfig::default());
/// cart.add("tee-01", "Crew Tee", 1, 12.5, ItemOptions::new()).unwrap();
/// ```
#[derive(Default)]
pub struct EventBus {
    listeners: Mutex<Vec<Listener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for every event.
    pub fn listen<F>(&self, listener: F)
    where
        F: Fn(&CartEvent) + Send + Sync + 'static,
    {
        self.listeners().push(Box::new(listener));
    }

    /// Registers a listener for a single event name (`cart.added`, ...).
    pub fn listen_to<F>(&self, name: &'static str, listener: F)
    where
        F: Fn(&CartEvent) + Send + Sync + 'static,
    {
        self.listen(move |event| {
            if event.name() == name {
                listener(event);
            }
        });
    }

    pub fn listener_count(&self) -> usize {
        self.listeners().len()
    }

    fn listeners(&self) -> std::sync::MutexGuard<'_, Vec<Listener>> {
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl EventDispatcher for EventBus {
    fn fire(&self, event: &CartEvent) {
        for listener in self.listeners().iter() {
            listener(event);
        }
    }
}
