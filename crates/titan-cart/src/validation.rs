//! # Validation Module
//!
//! Input checks applied when a cart item is built or updated.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Cart::add(id, title, qty, price, options)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Item::new ── validate_id, validate_title,                             │
//! │               validate_quantity, validate_price, validate_subtotal     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Session write (only reached when every check passed)                  │
//! │                                                                         │
//! │  Cart::update(hash, ItemUpdate)                                        │
//! │       │                                                                 │
//! │       ├── qty <= 0 → item removed, no validation error                 │
//! │       ├── price   → validate_price                                     │
//! │       ├── merge   → add_quantities                                     │
//! │       └── result  → validate_subtotal                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use titan_cart::validation::{validate_price, validate_quantity};
//!
//! validate_quantity(2).unwrap();
//! assert!(validate_price(-1.0).is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Smallest quantity an item can be created with.
pub const MIN_ITEM_QUANTITY: i64 = 1;

// =============================================================================
// String Validators
// =============================================================================

/// Validates the caller-supplied item identifier.
///
/// ## Rules
/// - Must not be empty or whitespace only
pub fn validate_id(id: &str) -> ValidationResult<()> {
    required("id", id)
}

/// Validates an item title.
///
/// ## Example
/// ```rust
/// use titan_cart::validation::validate_title;
///
/// assert!(validate_title("Linen Shirt").is_ok());
/// assert!(validate_title("").is_err());
/// ```
pub fn validate_title(title: &str) -> ValidationResult<()> {
    required("title", title)
}

fn required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates the quantity an item is created with.
///
/// ## Rules
/// - Must be at least 1
///
/// Updates are different: a quantity of zero or less on update removes the
/// item instead of failing, so this check only guards construction.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < MIN_ITEM_QUANTITY {
        return Err(ValidationError::TooSmall {
            field: "qty".to_string(),
            min: MIN_ITEM_QUANTITY,
            value: qty,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be finite (NaN and infinities are rejected)
/// - Must be zero or greater (free items are allowed)
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a derived subtotal.
///
/// `qty × price` of two valid inputs can still overflow to infinity, which
/// the session blob cannot represent.
pub fn validate_subtotal(subtotal: f64) -> ValidationResult<()> {
    if !subtotal.is_finite() {
        return Err(ValidationError::OutOfRange {
            field: "subtotal".to_string(),
        });
    }

    Ok(())
}

/// Sums two line quantities, failing instead of wrapping.
///
/// ## Example
/// ```rust
/// use titan_cart::validation::add_quantities;
///
/// assert_eq!(add_quantities(2, 3), Ok(5));
/// assert!(add_quantities(i64::MAX, 1).is_err());
/// ```
pub fn add_quantities(current: i64, extra: i64) -> ValidationResult<i64> {
    current
        .checked_add(extra)
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "qty".to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        assert!(validate_id("sku-1").is_ok());
        assert!(validate_id("42").is_ok());

        assert!(validate_id("").is_err());
        assert!(validate_id("   ").is_err());
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Coffee Beans 1kg").is_ok());
        assert_eq!(
            validate_title(""),
            Err(ValidationError::Required {
                field: "title".to_string()
            })
        );
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(250).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(19.99).is_ok());

        assert!(validate_price(-0.01).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_subtotal() {
        assert!(validate_subtotal(0.0).is_ok());
        assert!(validate_subtotal(2.0 * 19.99).is_ok());

        assert!(validate_subtotal(2.0 * f64::MAX).is_err());
        assert!(validate_subtotal(f64::NAN).is_err());
    }

    #[test]
    fn test_add_quantities() {
        assert_eq!(add_quantities(4, 1), Ok(5));
        assert_eq!(
            add_quantities(i64::MAX, 1),
            Err(ValidationError::OutOfRange {
                field: "qty".to_string()
            })
        );
    }
}
