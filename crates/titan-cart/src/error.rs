//! # Error Types
//!
//! Error types surfaced by titan-cart.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CartError                                                              │
//! │  ├── InvalidArgument  - Malformed item input (wraps ValidationError)    │
//! │  ├── InvalidHash      - get/find on a hash the cart doesn't hold        │
//! │  ├── InvalidModel     - Associated model lookup failed                  │
//! │  ├── Serialization    - Session blob could not be encoded              │
//! │  └── Config           - cart.toml / environment problems               │
//! │                                                                         │
//! │  Flow: ValidationError → CartError → host application                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is retried or swallowed. A mutating call that returns an
//! error has not touched the session store.

use thiserror::Error;

// =============================================================================
// Cart Error
// =============================================================================

/// Errors returned by cart and item operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Item construction or update received bad input.
    ///
    /// ## When This Occurs
    /// - Empty id or title
    /// - Quantity below 1 on construction
    /// - Negative or non-finite price
    /// - Quantity merge or subtotal that overflows
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// The active cart instance holds no item with this hash.
    ///
    /// Only `get`/`find` report this. `remove` and `update` treat a missing
    /// hash as a no-op.
    #[error("The cart does not contain hash {0}")]
    InvalidHash(String),

    /// The associated domain model could not be resolved.
    #[error("The associated model {associated} with id {id} does not exist")]
    InvalidModel { associated: String, id: String },

    /// Cart content could not be encoded for the session store.
    #[error("Failed to serialize cart content: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration could not be loaded or failed validation.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CartError {
    /// Creates an InvalidModel error for an item's associated tag and id.
    pub fn invalid_model(associated: impl Into<String>, id: impl Into<String>) -> Self {
        CartError::InvalidModel {
            associated: associated.into(),
            id: id.into(),
        }
    }
}

impl From<std::io::Error> for CartError {
    fn from(err: std::io::Error) -> Self {
        CartError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for CartError {
    fn from(err: toml::de::Error) -> Self {
        CartError::Config(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level input validation failures.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is below its minimum.
    #[error("{field} must be at least {min}, got {value}")]
    TooSmall { field: String, min: i64, value: i64 },

    /// Value must be a finite number that is zero or greater.
    #[error("{field} must be a non-negative number")]
    MustBeNonNegative { field: String },

    /// Derived value no longer fits its type (qty sum, qty × price).
    #[error("{field} is out of range")]
    OutOfRange { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================
