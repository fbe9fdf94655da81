//! # Cart Item
//!
//! A single cart line and the rules that keep it consistent.
//!
//! ## Item Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Item Hash                                        │
//! │                                                                         │
//! │   id ─────────┐                                                         │
//! │   associated ─┼──► canonical bytes ──► SHA-256 ──► first 128 bits (hex) │
//! │   options ────┘    (options in key order)                               │
//! │                                                                         │
//! │   "tee-01" + None + {color: red, size: M}   → 3f1c…                     │
//! │   "tee-01" + None + {size: M, color: red}   → 3f1c…  (same line)        │
//! │   "tee-01" + None + {color: blue, size: M}  → 9a07…  (new line)         │
//! │                                                                         │
//! │   title, qty and price never affect the hash.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mutability
//! Only title, qty, price and options can change after construction, and
//! only through [`Item::update`]. `subtotal` and `hash` are derived and
//! recomputed internally; `id` and `associated` are fixed.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use ts_rs::TS;

use crate::cartable::ModelRepository;
use crate::error::{CartError, CartResult};
use crate::options::ItemOptions;
use crate::validation::{
    validate_id, validate_price, validate_quantity, validate_subtotal, validate_title,
};

/// Number of digest bytes kept in an item hash (128 bits).
const HASH_BYTES: usize = 16;

// =============================================================================
// Item
// =============================================================================

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    hash: String,
    id: String,
    title: String,
    qty: i64,
    price: f64,
    subtotal: f64,
    options: ItemOptions,
    associated: Option<String>,
}

impl Item {
    /// Builds a validated item.
    ///
    /// ## Errors
    /// `CartError::InvalidArgument` when the id or title is empty, `qty` is
    /// below 1, `price` is negative or not finite, or `qty × price`
    /// overflows.
    ///
    /// ## Example
    /// ```rust
    /// use titan_cart::{Item, ItemOptions};
    ///
    /// let item = Item::new("tee-01", "Crew Tee", 3, 12.5, ItemOptions::new(), None).unwrap();
    /// assert_eq!(item.subtotal(), 37.5);
    /// assert_eq!(item.hash().len(), 32);
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        qty: i64,
        price: f64,
        options: ItemOptions,
        associated: Option<String>,
    ) -> CartResult<Self> {
        let id = id.into();
        let title = title.into();

        validate_id(&id)?;
        validate_title(&title)?;
        validate_quantity(qty)?;
        validate_price(price)?;

        let subtotal = calc_subtotal(qty, price);
        validate_subtotal(subtotal)?;

        Ok(Item {
            hash: generate_hash(&id, associated.as_deref(), &options),
            subtotal,
            id,
            title,
            qty,
            price,
            options,
            associated,
        })
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn qty(&self) -> i64 {
        self.qty
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// qty × price, kept in step with every update.
    pub fn subtotal(&self) -> f64 {
        self.subtotal
    }

    pub fn options(&self) -> &ItemOptions {
        &self.options
    }

    /// Type tag of the domain object this item was added from, if any.
    pub fn associated(&self) -> Option<&str> {
        self.associated.as_deref()
    }

    /// Applies an update and recomputes derived fields.
    ///
    /// ## Field Handling
    /// - `options` are merged into the existing set, never replaced
    /// - `qty` and `price` are stored as given; subtotal follows
    /// - `title` follows `policy` (see [`TitleUpdatePolicy`])
    ///
    /// The hash is recomputed only when options were supplied. A rejected
    /// price, or a qty × price that overflows, leaves the item untouched.
    pub fn update(&mut self, update: ItemUpdate, policy: TitleUpdatePolicy) -> CartResult<()> {
        if let Some(price) = update.price {
            validate_price(price)?;
        }

        let qty = update.qty.unwrap_or(self.qty);
        let price = update.price.unwrap_or(self.price);
        let subtotal = calc_subtotal(qty, price);
        validate_subtotal(subtotal)?;

        if let Some(title) = update.title {
            self.title = match policy {
                TitleUpdatePolicy::KeyName => title_case("title"),
                TitleUpdatePolicy::Value => title,
            };
        }

        if update.qty.is_some() || update.price.is_some() {
            self.qty = qty;
            self.price = price;
            self.subtotal = subtotal;
        }

        if let Some(options) = update.options {
            self.options.merge(options);
            self.hash = generate_hash(&self.id, self.associated.as_deref(), &self.options);
        }

        Ok(())
    }

    /// Resolves the associated domain model through `repository`.
    ///
    /// ## Errors
    /// `CartError::InvalidModel` when the item carries no associated tag,
    /// the tag belongs to a different repository, or the lookup finds
    /// nothing.
    pub fn model<R: ModelRepository>(&self, repository: &R) -> CartResult<R::Model> {
        let associated = self
            .associated
            .as_deref()
            .ok_or_else(|| CartError::invalid_model("<none>", &self.id))?;

        if associated != repository.model_type() {
            return Err(CartError::invalid_model(associated, &self.id));
        }

        repository
            .find_by_id(&self.id)
            .ok_or_else(|| CartError::invalid_model(associated, &self.id))
    }
}

// =============================================================================
// Item Update
// =============================================================================

/// Attributes a caller may change on an existing item.
///
/// Anything outside this set (hash, id, subtotal, associated) is not
/// representable here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub qty: Option<i64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub options: Option<ItemOptions>,
}

impl ItemUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn qty(mut self, qty: i64) -> Self {
        self.qty = Some(qty);
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn options(mut self, options: ItemOptions) -> Self {
        self.options = Some(options);
        self
    }
}

// =============================================================================
// Title Update Policy
// =============================================================================

/// What a title update writes into the item.
///
/// Earlier releases stored the word "Title" on every title update instead
/// of the submitted value, and existing storefronts may depend on it.
/// `KeyName` keeps that behavior; `Value` stores what the caller sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleUpdatePolicy {
    /// Store the title-cased attribute name ("Title").
    #[default]
    KeyName,

    /// Store the supplied title.
    Value,
}

impl std::fmt::Display for TitleUpdatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TitleUpdatePolicy::KeyName => write!(f, "key_name"),
            TitleUpdatePolicy::Value => write!(f, "value"),
        }
    }
}

impl std::str::FromStr for TitleUpdatePolicy {
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "key_name" | "key" | "legacy" => Ok(TitleUpdatePolicy::KeyName),
            "value" => Ok(TitleUpdatePolicy::Value),
            other => Err(CartError::Config(format!(
                "Unknown title update policy: '{}'. Valid options: key_name, value",
                other
            ))),
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Computes the identity hash for an item.
///
/// Each component is length-prefixed so that ("ab", "c") and ("a", "bc")
/// never encode to the same bytes.
pub fn generate_hash(id: &str, associated: Option<&str>, options: &ItemOptions) -> String {
    let mut hasher = Sha256::new();

    feed(&mut hasher, id);
    match associated {
        Some(tag) => {
            hasher.update([1u8]);
            feed(&mut hasher, tag);
        }
        None => hasher.update([0u8]),
    }

    hasher.update((options.len() as u64).to_le_bytes());
    for (key, value) in options.iter() {
        feed(&mut hasher, key);
        feed(&mut hasher, value);
    }

    let digest = hasher.finalize();
    hex::encode(&digest[..HASH_BYTES])
}

fn feed(hasher: &mut Sha256, field: &str) {
    hasher.update((field.len() as u64).to_le_bytes());
    hasher.update(field.as_bytes());
}

fn calc_subtotal(qty: i64, price: f64) -> f64 {
    qty as f64 * price
}

/// Upper-cases the first letter of every whitespace-separated word.
fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn tee(options: ItemOptions) -> Item {
        Item::new("tee-01", "Crew Tee", 2, 12.5, options, None).unwrap()
    }

    #[test]
    fn test_new_computes_subtotal() {
        let item = Item::new("mug", "Enamel Mug", 3, 7.25, ItemOptions::new(), None).unwrap();

        assert_eq!(item.qty(), 3);
        assert_eq!(item.price(), 7.25);
        assert_eq!(item.subtotal(), 21.75);
        assert_eq!(item.associated(), None);
    }

    #[test]
    fn test_new_rejects_bad_input() {
        let opts = ItemOptions::new;

        assert!(matches!(
            Item::new("", "Mug", 1, 1.0, opts(), None),
            Err(CartError::InvalidArgument(_))
        ));
        assert!(matches!(
            Item::new("mug", "", 1, 1.0, opts(), None),
            Err(CartError::InvalidArgument(_))
        ));
        assert!(matches!(
            Item::new("mug", "Mug", 0, 1.0, opts(), None),
            Err(CartError::InvalidArgument(_))
        ));
        assert!(matches!(
            Item::new("mug", "Mug", 1, -5.0, opts(), None),
            Err(CartError::InvalidArgument(_))
        ));
        assert!(matches!(
            Item::new("mug", "Mug", 1, f64::NAN, opts(), None),
            Err(CartError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_free_item_allowed() {
        let item = Item::new("sticker", "Sticker", 4, 0.0, ItemOptions::new(), None).unwrap();
        assert_eq!(item.subtotal(), 0.0);
    }

    #[test]
    fn test_hash_ignores_option_order() {
        let a = tee(ItemOptions::from([("size", "M"), ("color", "red")]));
        let b = tee(ItemOptions::from([("color", "red"), ("size", "M")]));

        assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn test_hash_changes_with_option_value() {
        let red = tee(ItemOptions::from([("size", "M"), ("color", "red")]));
        let blue = tee(ItemOptions::from([("size", "M"), ("color", "blue")]));

        assert_ne!(red.hash(), blue.hash());
    }

    #[test]
    fn test_hash_ignores_title_qty_price() {
        let a = Item::new("tee-01", "Crew Tee", 1, 10.0, ItemOptions::new(), None).unwrap();
        let b = Item::new("tee-01", "Other", 9, 99.0, ItemOptions::new(), None).unwrap();

        assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn test_hash_includes_associated() {
        let plain = generate_hash("7", None, &ItemOptions::new());
        let product = generate_hash("7", Some("product"), &ItemOptions::new());
        let bundle = generate_hash("7", Some("bundle"), &ItemOptions::new());

        assert_ne!(plain, product);
        assert_ne!(product, bundle);
    }

    #[test]
    fn test_hash_components_are_delimited() {
        let a = generate_hash("ab", None, &ItemOptions::from([("c", "d")]));
        let b = generate_hash("a", None, &ItemOptions::from([("bc", "d")]));

        assert_ne!(a, b);
    }

    #[test]
    fn test_update_qty_and_price_recalculates_subtotal() {
        let mut item = tee(ItemOptions::new());
        let hash = item.hash().to_string();

        item.update(ItemUpdate::new().qty(4).price(3.0), TitleUpdatePolicy::Value)
            .unwrap();

        assert_eq!(item.qty(), 4);
        assert_eq!(item.subtotal(), 12.0);
        assert_eq!(item.hash(), hash);
    }

    #[test]
    fn test_update_options_merges_and_rehashes() {
        let mut item = tee(ItemOptions::from([("size", "M"), ("color", "red")]));
        let old_hash = item.hash().to_string();

        item.update(
            ItemUpdate::new().options(ItemOptions::from([("color", "blue")])),
            TitleUpdatePolicy::Value,
        )
        .unwrap();

        assert_eq!(item.options().get("size"), Some("M"));
        assert_eq!(item.options().get("color"), Some("blue"));
        assert_ne!(item.hash(), old_hash);
        assert_eq!(
            item.hash(),
            generate_hash("tee-01", None, &ItemOptions::from([("size", "M"), ("color", "blue")]))
        );
    }

    #[test]
    fn test_title_update_key_name_policy_stores_attribute_name() {
        // Legacy behavior: the submitted title is ignored
        let mut item = tee(ItemOptions::new());
        item.update(ItemUpdate::new().title("Heavyweight Tee"), TitleUpdatePolicy::KeyName)
            .unwrap();

        assert_eq!(item.title(), "Title");
    }

    #[test]
    fn test_title_update_value_policy_stores_value() {
        let mut item = tee(ItemOptions::new());
        item.update(ItemUpdate::new().title("Heavyweight Tee"), TitleUpdatePolicy::Value)
            .unwrap();

        assert_eq!(item.title(), "Heavyweight Tee");
    }

    #[test]
    fn test_update_rejects_negative_price_without_mutation() {
        let mut item = tee(ItemOptions::new());
        let before = item.clone();

        let result = item.update(ItemUpdate::new().qty(9).price(-1.0), TitleUpdatePolicy::Value);

        assert!(matches!(result, Err(CartError::InvalidArgument(_))));
        assert_eq!(item, before);
    }

    #[test]
    fn test_new_rejects_overflowing_subtotal() {
        let result = Item::new("big", "Big", 2, f64::MAX, ItemOptions::new(), None);

        assert!(matches!(
            result,
            Err(CartError::InvalidArgument(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_update_rejects_overflowing_subtotal_without_mutation() {
        let mut item = Item::new("big", "Big", 1, f64::MAX, ItemOptions::new(), None).unwrap();
        let before = item.clone();

        let result = item.update(ItemUpdate::new().qty(3), TitleUpdatePolicy::Value);

        assert!(matches!(result, Err(CartError::InvalidArgument(_))));
        assert_eq!(item, before);
    }

    #[test]
    fn test_title_policy_parsing() {
        assert_eq!("value".parse::<TitleUpdatePolicy>().unwrap(), TitleUpdatePolicy::Value);
        assert_eq!("KEY_NAME".parse::<TitleUpdatePolicy>().unwrap(), TitleUpdatePolicy::KeyName);
        assert!("upper".parse::<TitleUpdatePolicy>().is_err());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("title"), "Title");
        assert_eq!(title_case("linen SHIRT"), "Linen Shirt");
    }
}
