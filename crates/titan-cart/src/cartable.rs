//! # Cartable Domain Objects
//!
//! Lets a host's domain types (products, gift cards, bundles) put themselves
//! into a cart without the caller spelling out id, title and price.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  product.add_to_cart(&mut cart, Some("default"), 2, options)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Item::new(product.cartable_id(), product.cartable_title(), 2,         │
//! │            product.cartable_price(), options, Some(Product::TYPE))     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Cart::add_item ── same merge rule as Cart::add                        │
//! │                                                                         │
//! │  Later: item.model(&product_repository) → Product                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The associated tag is a plain string. Resolving it back to a value goes
//! through a [`ModelRepository`] the host supplies.

use crate::cart::Cart;
use crate::error::CartResult;
use crate::item::Item;
use crate::options::ItemOptions;
use crate::search::ItemFilter;

/// A domain object that can be added to a cart.
pub trait Cartable {
    /// Type tag stored as the item's `associated` field.
    const CARTABLE_TYPE: &'static str;

    fn cartable_id(&self) -> String;

    fn cartable_title(&self) -> String;

    fn cartable_price(&self) -> f64;
}

/// Cart operations available on every [`Cartable`].
///
/// Each call switches `cart` to `instance` first (`None` selects the
/// configured default instance), the same way `cart.instance(..)` does.
pub trait Shopping: Cartable {
    /// Adds `qty` of this object with `options`.
    fn add_to_cart(
        &self,
        cart: &mut Cart,
        instance: Option<&str>,
        qty: i64,
        options: ItemOptions,
    ) -> CartResult<Item>;

    /// Checks whether a line for this object with `options` exists.
    fn has_in_cart(&self, cart: &mut Cart, instance: Option<&str>, options: ItemOptions) -> bool;

    /// All lines for this object, whatever their options.
    fn all_from_cart(&self, cart: &mut Cart, instance: Option<&str>) -> Vec<Item>;

    /// Lines for this object carrying every entry of `options`.
    fn search_in_cart(
        &self,
        cart: &mut Cart,
        instance: Option<&str>,
        options: ItemOptions,
    ) -> Vec<Item>;
}

impl<T: Cartable> Shopping for T {
    fn add_to_cart(
        &self,
        cart: &mut Cart,
        instance: Option<&str>,
        qty: i64,
        options: ItemOptions,
    ) -> CartResult<Item> {
        let item = Item::new(
            self.cartable_id(),
            self.cartable_title(),
            qty,
            self.cartable_price(),
            options,
            Some(T::CARTABLE_TYPE.to_string()),
        )?;

        cart.instance(instance).add_item(item)
    }

    fn has_in_cart(&self, cart: &mut Cart, instance: Option<&str>, options: ItemOptions) -> bool {
        !self.search_in_cart(cart, instance, options).is_empty()
    }

    fn all_from_cart(&self, cart: &mut Cart, instance: Option<&str>) -> Vec<Item> {
        self.search_in_cart(cart, instance, ItemOptions::new())
    }

    fn search_in_cart(
        &self,
        cart: &mut Cart,
        instance: Option<&str>,
        options: ItemOptions,
    ) -> Vec<Item> {
        let filter = ItemFilter::new()
            .id(self.cartable_id())
            .title(self.cartable_title())
            .associated(T::CARTABLE_TYPE)
            .options(options);

        cart.instance(instance).search(filter, true)
    }
}

/// Looks up the domain object behind an item's `associated` tag.
pub trait ModelRepository {
    type Model;

    /// The tag this repository resolves; compared with `Item::associated`.
    fn model_type(&self) -> &str;

    fn find_by_id(&self, id: &str) -> Option<Self::Model>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use crate::config::CartConfig;
    use crate::error::CartError;
    use crate::event::NullDispatcher;
    use crate::session::MemorySession;

    #[derive(Debug, Clone, PartialEq)]
    struct Product {
        id: u32,
        name: String,
        price: f64,
    }

    impl Cartable for Product {
        const CARTABLE_TYPE: &'static str = "product";

        fn cartable_id(&self) -> String {
            self.id.to_string()
        }

        fn cartable_title(&self) -> String {
            self.name.clone()
        }

        fn cartable_price(&self) -> f64 {
            self.price
        }
    }

    struct ProductRepository {
        products: HashMap<String, Product>,
    }

    impl ModelRepository for ProductRepository {
        type Model = Product;

        fn model_type(&self) -> &str {
            Product::CARTABLE_TYPE
        }

        fn find_by_id(&self, id: &str) -> Option<Product> {
            self.products.get(id).cloned()
        }
    }

    fn cart() -> Cart {
        Cart::new(
            Arc::new(MemorySession::new()),
            Arc::new(NullDispatcher),
            CartConfig::default(),
        )
    }

    fn coffee() -> Product {
        Product {
            id: 7,
            name: "House Blend".to_string(),
            price: 14.0,
        }
    }

    #[test]
    fn test_add_to_cart_tags_item() {
        let mut cart = cart();
        let item = coffee()
            .add_to_cart(&mut cart, None, 2, ItemOptions::from([("grind", "whole")]))
            .unwrap();

        assert_eq!(item.id(), "7");
        assert_eq!(item.title(), "House Blend");
        assert_eq!(item.subtotal(), 28.0);
        assert_eq!(item.associated(), Some("product"));
    }

    #[test]
    fn test_add_to_cart_switches_instance() {
        let mut cart = cart();
        coffee()
            .add_to_cart(&mut cart, Some("wishlist"), 1, ItemOptions::new())
            .unwrap();

        assert_eq!(cart.get_instance(), "wishlist");
        assert_eq!(cart.count_items(), 1);
        assert_eq!(cart.instance(None).count_items(), 0);
    }

    #[test]
    fn test_associated_tag_separates_lines() {
        let mut cart = cart();
        cart.add("7", "House Blend", 1, 14.0, ItemOptions::new()).unwrap();
        coffee()
            .add_to_cart(&mut cart, None, 1, ItemOptions::new())
            .unwrap();

        assert_eq!(cart.count_items(), 2);
        assert_eq!(coffee().all_from_cart(&mut cart, None).len(), 1);
    }

    #[test]
    fn test_has_and_search_in_cart() {
        let mut cart = cart();
        let product = coffee();
        product
            .add_to_cart(&mut cart, None, 1, ItemOptions::from([("grind", "whole")]))
            .unwrap();
        product
            .add_to_cart(&mut cart, None, 1, ItemOptions::from([("grind", "espresso")]))
            .unwrap();

        assert!(product.has_in_cart(&mut cart, None, ItemOptions::from([("grind", "whole")])));
        assert!(!product.has_in_cart(&mut cart, None, ItemOptions::from([("grind", "filter")])));
        assert_eq!(product.all_from_cart(&mut cart, None).len(), 2);
        assert!(!product.has_in_cart(&mut cart, Some("other"), ItemOptions::new()));
    }

    #[test]
    fn test_item_model_resolution() {
        let mut cart = cart();
        let product = coffee();
        let repository = ProductRepository {
            products: HashMap::from([("7".to_string(), product.clone())]),
        };

        let item = product
            .add_to_cart(&mut cart, None, 1, ItemOptions::new())
            .unwrap();
        assert_eq!(item.model(&repository).unwrap(), product);

        let untagged = cart.add("7", "House Blend", 1, 14.0, ItemOptions::new()).unwrap();
        assert!(matches!(
            untagged.model(&repository),
            Err(CartError::InvalidModel { .. })
        ));

        let empty = ProductRepository {
            products: HashMap::new(),
        };
        assert!(matches!(
            item.model(&empty),
            Err(CartError::InvalidModel { .. })
        ));
    }
}
