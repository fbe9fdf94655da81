//! # Cart
//!
//! The session-backed cart: every call loads the active instance's content
//! from the session store, changes it, writes it back, and fires events.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Caller                 Cart                      Session / Events      │
//! │  ──────                 ────                      ────────────────      │
//! │                                                                         │
//! │  add(id, ..) ─────────► Item::new ─► hash known? ─┐                    │
//! │                              │ no                  │ yes                │
//! │                              ▼                     ▼                    │
//! │                         cart.adding          update path (qty merge)   │
//! │                         put + write ───────► session.put               │
//! │                         cart.added                                     │
//! │                                                                         │
//! │  update(hash, ..) ────► qty <= 0? ─► remove(hash)                      │
//! │                         cart.updating                                  │
//! │                         pull, apply, merge on hash collision           │
//! │                         (re-inserted line moves to the end)            │
//! │                         put + write ───────► session.put               │
//! │                         cart.updated                                   │
//! │                                                                         │
//! │  remove(hash) ────────► absent? ─► no-op                               │
//! │                         cart.removing, pull + write, cart.removed      │
//! │                                                                         │
//! │  destroy() ───────────► cart.destroying ───► session.remove            │
//! │                         cart.destroyed                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! A `Cart` holds nothing between calls except the active instance name.
//! Two requests mutating the same session at once can overwrite each
//! other's changes; the last write wins.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::CartConfig;
use crate::content::CartContent;
use crate::error::{CartError, CartResult};
use crate::event::{CartEvent, EventDispatcher};
use crate::item::{Item, ItemUpdate};
use crate::options::ItemOptions;
use crate::search::SearchFilter;
use crate::session::SessionStore;
use crate::validation::{add_quantities, validate_price, validate_subtotal};

/// A shopping cart bound to one session.
///
/// Build one per request (or per session) from the host's session store and
/// event dispatcher. Several named instances ("default", "wishlist", ...)
/// can live side by side in the same session; [`Cart::instance`] picks the
/// one the following calls work on.
#[derive(Clone)]
pub struct Cart {
    session: Arc<dyn SessionStore>,
    events: Arc<dyn EventDispatcher>,
    config: CartConfig,
    instance: String,
}

impl Cart {
    /// Creates a cart working on the configured default instance.
    pub fn new(
        session: Arc<dyn SessionStore>,
        events: Arc<dyn EventDispatcher>,
        config: CartConfig,
    ) -> Self {
        let instance = config.default_instance.clone();
        Cart {
            session,
            events,
            config,
            instance,
        }
    }

    /// Settings this cart was built with.
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    // =========================================================================
    // Instances
    // =========================================================================

    /// Switches the active instance. `None` or an empty name selects the
    /// default instance.
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::Arc;
    /// use titan_cart::{Cart, CartConfig, ItemOptions, MemorySession, NullDispatcher};
    ///
    /// let mut cart = Cart::new(Arc::new(MemorySession::new()), Arc::new(NullDispatcher), CartConfig::default());
    /// cart.instance(Some("wishlist"))
    ///     .add("tee-01", "Crew Tee", 1, 12.5, ItemOptions::new())
    ///     .unwrap();
    ///
    /// assert_eq!(cart.get_instance(), "wishlist");
    /// assert_eq!(cart.instance(None).count_items(), 0);
    /// ```
    pub fn instance(&mut self, name: Option<&str>) -> &mut Self {
        self.instance = match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.config.default_instance.clone(),
        };
        self
    }

    /// Name of the active instance, without the session key prefix.
    pub fn get_instance(&self) -> &str {
        &self.instance
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds an item, or raises the quantity of the matching line.
    ///
    /// ## Behavior
    /// - New hash: fires `cart.adding`, inserts, persists, fires `cart.added`
    /// - Existing hash: quantities are summed through the update path, which
    ///   fires `cart.updating`/`cart.updated` instead
    ///
    /// ## Errors
    /// `CartError::InvalidArgument` when the item fails validation.
    pub fn add(
        &self,
        id: impl Into<String>,
        title: impl Into<String>,
        qty: i64,
        price: f64,
        options: ItemOptions,
    ) -> CartResult<Item> {
        let candidate = Item::new(id, title, qty, price, options, None)?;
        self.add_item(candidate)
    }

    /// Adds an already built item under the same merge rule as [`Cart::add`].
    pub fn add_item(&self, candidate: Item) -> CartResult<Item> {
        let mut content = self.get_content();

        if let Some(existing) = content.get(candidate.hash()) {
            let hash = candidate.hash().to_string();
            let qty = add_quantities(existing.qty(), candidate.qty())?;
            debug!(instance = %self.instance, hash = %hash, qty, "Merging into existing cart line");

            return self
                .apply_update(content, &hash, ItemUpdate::new().qty(qty))?
                .ok_or(CartError::InvalidHash(hash));
        }

        self.events.fire(&CartEvent::Adding {
            item: candidate.clone(),
            content: content.clone(),
        });

        content.put(candidate.clone());
        self.update_cart_session(&content)?;
        debug!(instance = %self.instance, hash = %candidate.hash(), "Added cart line");

        self.events.fire(&CartEvent::Added {
            item: candidate.clone(),
            content,
        });

        Ok(candidate)
    }

    /// Updates the line stored under `hash`.
    ///
    /// ## Behavior
    /// - `qty` of zero or less removes the line and returns `None`
    /// - Unknown hash returns `None` without firing events
    /// - If new options move the line onto another line's hash, the two
    ///   are merged and their quantities summed
    pub fn update(&self, hash: &str, update: ItemUpdate) -> CartResult<Option<Item>> {
        self.update_item(hash, update)
    }

    /// Removes the line stored under `hash`. Unknown hashes are ignored.
    pub fn remove(&self, hash: &str) -> CartResult<&Self> {
        let mut content = self.get_content();

        let Some(item) = content.get(hash).cloned() else {
            debug!(instance = %self.instance, hash = %hash, "Remove skipped, hash not in cart");
            return Ok(self);
        };

        self.events.fire(&CartEvent::Removing {
            item: item.clone(),
            content: content.clone(),
        });

        content.pull(hash);
        self.update_cart_session(&content)?;
        debug!(instance = %self.instance, hash = %hash, "Removed cart line");

        self.events.fire(&CartEvent::Removed { item, content });

        Ok(self)
    }

    /// Empties the active instance and drops its session entry.
    pub fn destroy(&self) -> &Self {
        let content = self.get_content();

        self.events.fire(&CartEvent::Destroying {
            content: content.clone(),
        });

        self.session.remove(&self.session_key());
        debug!(instance = %self.instance, lines = content.len(), "Destroyed cart");

        self.events.fire(&CartEvent::Destroyed { content });

        self
    }

    /// Alias of [`Cart::destroy`].
    pub fn remove_all(&self) -> &Self {
        self.destroy()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Every line of the active instance.
    pub fn all(&self) -> CartContent {
        self.get_content()
    }

    /// Alias of [`Cart::all`].
    pub fn content(&self) -> CartContent {
        self.all()
    }

    /// Returns the line stored under `hash`.
    ///
    /// ## Errors
    /// `CartError::InvalidHash` when the active instance has no such line.
    pub fn get(&self, hash: &str) -> CartResult<Item> {
        self.get_content()
            .pull(hash)
            .ok_or_else(|| CartError::InvalidHash(hash.to_string()))
    }

    /// Alias of [`Cart::get`].
    pub fn find(&self, hash: &str) -> CartResult<Item> {
        self.get(hash)
    }

    /// Checks whether the active instance holds a line under `hash`.
    pub fn has(&self, hash: &str) -> bool {
        self.get_content().has(hash)
    }

    /// Sum of all line subtotals; 0 for an empty cart.
    pub fn total(&self) -> f64 {
        self.get_content().total()
    }

    /// Total units when `total_items` is true, distinct lines otherwise.
    pub fn count(&self, total_items: bool) -> i64 {
        let content = self.get_content();

        if total_items {
            content.total_quantity()
        } else {
            content.len() as i64
        }
    }

    /// Number of distinct lines.
    pub fn count_items(&self) -> i64 {
        self.count(false)
    }

    /// Number of units across all lines.
    pub fn count_quantities(&self) -> i64 {
        self.count(true)
    }

    /// Searches the active instance. See [`SearchFilter`] for the modes.
    pub fn search<'f>(&self, filter: impl Into<SearchFilter<'f>>, all_scope: bool) -> Vec<Item> {
        filter.into().apply(&self.get_content(), all_scope)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn session_key(&self) -> String {
        self.config.session_key(&self.instance)
    }

    /// Stored content for the active instance, or an empty cart.
    fn get_content(&self) -> CartContent {
        let key = self.session_key();

        if !self.session.has(&key) {
            return CartContent::new();
        }

        match self.session.get(&key) {
            Some(blob) => serde_json::from_str(&blob).unwrap_or_else(|err| {
                warn!(key = %key, error = %err, "Discarding unreadable cart session data");
                CartContent::new()
            }),
            None => CartContent::new(),
        }
    }

    fn update_item(&self, hash: &str, update: ItemUpdate) -> CartResult<Option<Item>> {
        if update.qty.is_some_and(|qty| qty <= 0) {
            self.remove(hash)?;
            return Ok(None);
        }

        self.apply_update(self.get_content(), hash, update)
    }

    fn apply_update(
        &self,
        mut content: CartContent,
        hash: &str,
        update: ItemUpdate,
    ) -> CartResult<Option<Item>> {
        let Some(original) = content.get(hash).cloned() else {
            debug!(instance = %self.instance, hash = %hash, "Update skipped, hash not in cart");
            return Ok(None);
        };

        let mut item = original.clone();
        item.update(update, self.config.title_update)?;

        // Landing on another line's hash takes its place and sums quantities
        if item.hash() != hash {
            if let Some(existing) = content.get(item.hash()) {
                let merged = add_quantities(existing.qty(), item.qty())?;
                debug!(instance = %self.instance, hash = %item.hash(), qty = merged, "Update collided with existing line, merging");
                item.update(ItemUpdate::new().qty(merged), self.config.title_update)?;
            }
        }

        self.events.fire(&CartEvent::Updating {
            item: original,
            content: content.clone(),
        });

        content.pull(hash);
        content.put(item.clone());
        self.update_cart_session(&content)?;
        debug!(instance = %self.instance, from = %hash, to = %item.hash(), qty = item.qty(), "Updated cart line");

        self.events.fire(&CartEvent::Updated {
            item: item.clone(),
            content,
        });

        Ok(Some(item))
    }

    /// Writes `content` back to the session. The only place the cart persists.
    ///
    /// Non-finite amounts encode as JSON `null` and would not decode again,
    /// so they are refused here.
    fn update_cart_session(&self, content: &CartContent) -> CartResult<()> {
        for item in content {
            validate_price(item.price())?;
            validate_subtotal(item.subtotal())?;
        }

        let blob = serde_json::to_string(content)?;
        self.session.put(&self.session_key(), blob);
        Ok(())
    }
}

impl std::fmt::Debug for Cart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cart")
            .field("instance", &self.instance)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
