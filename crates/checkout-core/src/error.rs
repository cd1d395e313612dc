//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                       │
//! │  ├── CoreError        - Cart/VAS rule violations, not-found, save      │
//! │  └── ValidationError  - Malformed input (quantity, price)              │
//! │                                                                         │
//! │  checkout-store errors (separate crate)                                 │
//! │  └── StoreError       - Snapshot read/write failures                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CartResponse { result: false }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. The `Display` text of each rule variant IS the message returned to
//!    the caller, so it must stay byte-for-byte stable
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart rule violations and lookup failures.
///
/// The engine never propagates these; it turns them into a failed
/// [`CartResponse`](crate::engine::CartResponse).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The cart already holds the maximum number of distinct items.
    #[error("Cannot add more than {max} unique items to cart.")]
    TooManyUniqueItems { max: usize },

    /// Digital category quantity for one item would exceed its limit.
    #[error("Cannot add more than {max} digital items to cart.")]
    DigitalItemLimit { max: i64 },

    /// Total units across all lines would exceed the cart capacity.
    #[error("Cannot add more items, cart limit exceeded.")]
    CartQuantityLimit,

    /// Cart value would exceed the ceiling.
    #[error("Cannot add item, cart total value limit exceeded.")]
    CartValueLimit,

    /// Merged quantity of one item would exceed its limit.
    #[error("Cannot add more than {max} of the same item.")]
    ItemQuantityLimit { max: i64 },

    /// No line with this item id.
    #[error("Item not found in cart.")]
    ItemNotFound(i64),

    /// VAS items may only come from the VAS seller.
    #[error("VAS item cannot be added with this sellerId.")]
    VasSellerNotAllowed { seller_id: i64 },

    /// The owning item's category does not accept VAS items.
    #[error("VAS item cannot be added to this item.")]
    VasCategoryNotAllowed { category_id: i64 },

    /// The owning item already has its fill of VAS items.
    #[error("Cannot add more than {max} VAS items to a VAS item.")]
    VasItemLimit { max: usize },

    /// Merged quantity of one VAS item would exceed its limit.
    #[error("Cannot add more than {max} of the same VAS item.")]
    VasQuantityLimit { max: i64 },

    /// The mutated snapshot could not be persisted.
    #[error("Cart could not be saved: {0}")]
    SaveFailed(String),

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input that breaks the data model before any cart rule is consulted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
