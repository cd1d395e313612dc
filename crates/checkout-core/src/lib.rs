//! # checkout-core: Cart Rules and Promotions
//!
//! This crate holds the cart engine: the item and VAS rule chains, the
//! promotion evaluator, and the storage seam the engine talks through.
//! It performs no I/O of its own.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 checkout-cli (command adapter)                  │   │
//! │  │    input.json ──► CommandRequest ──► execute ──► output.json    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ checkout-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  engine   │  │ validation│  │ evaluator │  │ promotion │  │   │
//! │  │   │CartEngine │  │ rule      │  │ best      │  │ catalog   │  │   │
//! │  │   │CartStore  │  │ chains    │  │ discount  │  │ built-ins │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILE ACCESS • STORAGE THROUGH A TRAIT             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CartStore                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              checkout-store (storage adapters)                  │   │
//! │  │              JsonFileStore (db.json), MemoryStore               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Items, VAS items, identifiers, discount rates
//! - [`money`] - Money type with integer arithmetic (hundredths)
//! - [`cart`] - The cart aggregate and its merge rules
//! - [`validation`] - Item and VAS rule chains
//! - [`promotion`] - Promotion kinds and the catalog
//! - [`evaluator`] - Best-discount selection
//! - [`engine`] - Operations, responses and the storage seam
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::money::Money;
//! use checkout_core::types::DiscountRate;
//!
//! let total = Money::from_major(200);
//! let discount = total.apply_rate(DiscountRate::from_bps(1000)); // 10%
//!
//! assert_eq!(discount, Money::from_major(20));
//! assert_eq!(total - discount, Money::from_major(180));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod money;
pub mod promotion;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use engine::{CartEngine, CartResponse, CartStore, ResponseMessage};
pub use error::{CoreError, CoreResult, ValidationError};
pub use evaluator::{AppliedPromotion, PromotionEvaluator};
pub use money::Money;
pub use promotion::{Promotion, PromotionDto, PromotionKind};
pub use types::*;

// =============================================================================
// Cart Limits
// =============================================================================

/// Distinct item identities a cart may hold.
pub const MAX_UNIQUE_ITEMS: usize = 10;

/// Units of a single digital item a cart may hold.
pub const MAX_DIGITAL_ITEM_QUANTITY: i64 = 5;

/// Units across all lines (VAS items not counted).
pub const MAX_CART_QUANTITY: i64 = 30;

/// Ceiling on the undiscounted cart value.
pub const MAX_CART_VALUE: Money = Money::from_major(500_000);

/// Units of a single item once merged.
pub const MAX_ITEM_QUANTITY: i64 = 10;

/// Distinct VAS items one line may carry.
pub const MAX_VAS_ITEMS: usize = 3;

/// Units of one VAS item once merged.
pub const MAX_VAS_QUANTITY: i64 = 3;

// =============================================================================
// Category and Seller Identifiers
// =============================================================================

/// Category of VAS items themselves. Items in it bypass the unique limit.
pub const VAS_ITEM_CATEGORY_ID: i64 = 3242;

/// Category of digital items.
pub const DIGITAL_CATEGORY_ID: i64 = 7889;

/// The only seller allowed to sell VAS items.
pub const VAS_SELLER_ID: i64 = 5003;

/// Categories whose items may carry VAS items.
pub const VAS_ELIGIBLE_CATEGORY_IDS: [i64; 1] = [1001];
