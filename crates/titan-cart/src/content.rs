//! # Cart Content
//!
//! The ordered hash → item mapping for one cart instance. This is the value
//! written to (and read back from) the session store.
//!
//! ## Ordering
//! ```text
//! put(new hash)        → appended at the end
//! put(existing hash)   → replaced in place
//! pull(hash)           → removed, later items shift left
//!
//! Cart::update         → pull then put, so an updated line moves to the
//!                        end unless its new hash is already present
//! ```
//!
//! Carts are small, so lookups scan the line list.

use serde::{Deserialize, Serialize};

use crate::item::Item;

/// Items of one cart instance, unique by hash, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartContent {
    items: Vec<Item>,
}

impl CartContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, hash: &str) -> bool {
        self.position(hash).is_some()
    }

    pub fn get(&self, hash: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.hash() == hash)
    }

    /// Inserts `item` under its hash, replacing an existing entry in place.
    pub fn put(&mut self, item: Item) {
        match self.position(item.hash()) {
            Some(index) => self.items[index] = item,
            None => self.items.push(item),
        }
    }

    /// Removes and returns the item stored under `hash`.
    pub fn pull(&mut self, hash: &str) -> Option<Item> {
        self.position(hash).map(|index| self.items.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Hashes in cart order.
    pub fn hashes(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(Item::hash)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of every line's subtotal.
    pub fn total(&self) -> f64 {
        self.items.iter().map(Item::subtotal).sum()
    }

    /// Sum of every line's quantity, saturating at `i64::MAX`.
    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |total, item| total.saturating_add(item.qty()))
    }

    fn position(&self, hash: &str) -> Option<usize> {
        self.items.iter().position(|item| item.hash() == hash)
    }
}

impl<'a> IntoIterator for &'a CartContent {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for CartContent {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<Item> for CartContent {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        let mut content = CartContent::new();
        for item in iter {
            content.put(item);
        }
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ItemOptions;

    fn item(id: &str, qty: i64, price: f64) -> Item {
        Item::new(id, format!("Item {}", id), qty, price, ItemOptions::new(), None).unwrap()
    }

    #[test]
    fn test_put_appends_and_replaces_in_place() {
        let mut content = CartContent::new();
        let a = item("a", 1, 1.0);
        let b = item("b", 1, 1.0);
        content.put(a.clone());
        content.put(b.clone());

        // Same hash as `a`, different qty
        content.put(item("a", 5, 1.0));

        let order: Vec<&str> = content.hashes().collect();
        assert_eq!(order, vec![a.hash(), b.hash()]);
        assert_eq!(content.get(a.hash()).map(Item::qty), Some(5));
    }

    #[test]
    fn test_pull_removes() {
        let mut content: CartContent = vec![item("a", 1, 1.0), item("b", 1, 1.0)]
            .into_iter()
            .collect();
        let hash = item("a", 1, 1.0).hash().to_string();

        let pulled = content.pull(&hash).unwrap();
        assert_eq!(pulled.id(), "a");
        assert!(!content.has(&hash));
        assert_eq!(content.len(), 1);
        assert!(content.pull(&hash).is_none());
    }

    #[test]
    fn test_totals() {
        let content: CartContent = vec![item("a", 2, 4.5), item("b", 3, 1.0)]
            .into_iter()
            .collect();

        assert_eq!(content.total(), 12.0);
        assert_eq!(content.total_quantity(), 5);
        assert_eq!(CartContent::new().total(), 0.0);
    }

    #[test]
    fn test_total_quantity_saturates() {
        let content: CartContent = vec![item("a", i64::MAX, 0.0), item("b", 2, 0.0)]
            .into_iter()
            .collect();

        assert_eq!(content.total_quantity(), i64::MAX);
    }
}
