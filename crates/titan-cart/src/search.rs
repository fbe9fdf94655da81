//! # Cart Search
//!
//! Filtering over the lines of one cart instance.
//!
//! ## Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Filter                 all_scope   Item kept when                      │
//! │  ──────                 ─────────   ──────────────                      │
//! │  Predicate(closure)     ignored     closure returns true                │
//! │  Fields(ItemFilter)     true        EVERY set field equals the item's   │
//! │                                     and every listed option is present  │
//! │                                     with the same value                 │
//! │  Fields(ItemFilter)     false       ANY set field equals the item's,    │
//! │                                     or ANY listed option matches        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An empty `ItemFilter` keeps everything with `all_scope = true` and
//! nothing with `all_scope = false`.

use crate::content::CartContent;
use crate::item::Item;
use crate::options::ItemOptions;

/// What to search a cart with.
pub enum SearchFilter<'a> {
    Predicate(Box<dyn Fn(&Item) -> bool + 'a>),
    Fields(ItemFilter),
}

impl<'a> SearchFilter<'a> {
    /// Wraps a closure as a filter.
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&Item) -> bool + 'a,
    {
        SearchFilter::Predicate(Box::new(predicate))
    }

    /// Returns the matching items of `content`, in cart order.
    pub fn apply(&self, content: &CartContent, all_scope: bool) -> Vec<Item> {
        content
            .iter()
            .filter(|item| self.keeps(item, all_scope))
            .cloned()
            .collect()
    }

    fn keeps(&self, item: &Item, all_scope: bool) -> bool {
        match self {
            SearchFilter::Predicate(predicate) => predicate(item),
            SearchFilter::Fields(filter) if all_scope => filter.matches_all(item),
            SearchFilter::Fields(filter) => filter.matches_any(item),
        }
    }
}

impl From<ItemFilter> for SearchFilter<'_> {
    fn from(filter: ItemFilter) -> Self {
        SearchFilter::Fields(filter)
    }
}

impl std::fmt::Debug for SearchFilter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchFilter::Predicate(_) => f.write_str("Predicate(..)"),
            SearchFilter::Fields(filter) => f.debug_tuple("Fields").field(filter).finish(),
        }
    }
}

/// Field values to match cart items against. Unset fields are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    pub hash: Option<String>,
    pub id: Option<String>,
    pub title: Option<String>,
    pub qty: Option<i64>,
    pub price: Option<f64>,
    pub subtotal: Option<f64>,
    pub associated: Option<String>,
    pub options: Option<ItemOptions>,
}

impl ItemFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
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

    pub fn subtotal(mut self, subtotal: f64) -> Self {
        self.subtotal = Some(subtotal);
        self
    }

    pub fn associated(mut self, associated: impl Into<String>) -> Self {
        self.associated = Some(associated.into());
        self
    }

    pub fn options(mut self, options: ItemOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// True when every set field matches.
    pub fn matches_all(&self, item: &Item) -> bool {
        self.field_checks(item).into_iter().flatten().all(|hit| hit)
            && self
                .options
                .as_ref()
                .map_or(true, |options| item.options().contains_all(options))
    }

    /// True when at least one set field, or one listed option, matches.
    pub fn matches_any(&self, item: &Item) -> bool {
        self.field_checks(item).into_iter().flatten().any(|hit| hit)
            || self
                .options
                .as_ref()
                .is_some_and(|options| !item.options().intersect(options).is_empty())
    }

    /// One entry per top-level field; `None` where the filter leaves it unset.
    fn field_checks(&self, item: &Item) -> [Option<bool>; 7] {
        [
            self.hash.as_deref().map(|v| v == item.hash()),
            self.id.as_deref().map(|v| v == item.id()),
            self.title.as_deref().map(|v| v == item.title()),
            self.qty.map(|v| v == item.qty()),
            self.price.map(|v| v == item.price()),
            self.subtotal.map(|v| v == item.subtotal()),
            self.associated.as_deref().map(|v| Some(v) == item.associated()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> CartContent {
        vec![
            Item::new("tee", "Crew Tee", 2, 10.0, ItemOptions::from([("color", "red"), ("size", "M")]), None).unwrap(),
            Item::new("tee", "Crew Tee", 1, 10.0, ItemOptions::from([("color", "blue"), ("size", "M")]), None).unwrap(),
            Item::new("mug", "Enamel Mug", 1, 8.0, ItemOptions::from([("color", "red")]), Some("product".to_string())).unwrap(),
            Item::new("cap", "Cap", 3, 15.0, ItemOptions::new(), None).unwrap(),
        ]
        .into_iter()
        .collect()
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(Item::id).collect()
    }

    #[test]
    fn test_predicate_filter() {
        let filter = SearchFilter::predicate(|item| item.qty() > 1);
        assert_eq!(ids(&filter.apply(&content(), true)), vec!["tee", "cap"]);
    }

    #[test]
    fn test_all_scope_options() {
        let filter: SearchFilter = ItemFilter::new()
            .options(ItemOptions::from([("color", "red")]))
            .into();

        assert_eq!(ids(&filter.apply(&content(), true)), vec!["tee", "mug"]);
    }

    #[test]
    fn test_all_scope_requires_every_field() {
        let filter: SearchFilter = ItemFilter::new()
            .id("tee")
            .options(ItemOptions::from([("color", "red"), ("size", "M")]))
            .into();
        let found = filter.apply(&content(), true);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].qty(), 2);

        let none: SearchFilter = ItemFilter::new().id("tee").title("Cap").into();
        assert!(none.apply(&content(), true).is_empty());
    }

    #[test]
    fn test_all_scope_associated() {
        let filter: SearchFilter = ItemFilter::new().associated("product").into();
        assert_eq!(ids(&filter.apply(&content(), true)), vec!["mug"]);
    }

    #[test]
    fn test_any_scope_field_or_option() {
        // title matches the cap, option matches the red tee and the mug
        let filter: SearchFilter = ItemFilter::new()
            .title("Cap")
            .options(ItemOptions::from([("color", "red")]))
            .into();

        assert_eq!(ids(&filter.apply(&content(), false)), vec!["tee", "mug", "cap"]);
    }

    #[test]
    fn test_any_scope_single_field() {
        let filter: SearchFilter = ItemFilter::new().qty(1).into();
        let found = filter.apply(&content(), false);

        assert_eq!(ids(&found), vec!["tee", "mug"]);
        assert_eq!(found[0].options().get("color"), Some("blue"));
    }

    #[test]
    fn test_empty_filter() {
        let filter: SearchFilter = ItemFilter::new().into();

        assert_eq!(filter.apply(&content(), true).len(), 4);
        assert!(filter.apply(&content(), false).is_empty());
    }
}
