//! # Domain Types
//!
//! Core domain types used throughout the checkout engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                         │
//! │  │      Item       │ 1    * │     VasItem     │                         │
//! │  │  ─────────────  │───────►│  ─────────────  │                         │
//! │  │  itemId         │        │  itemId (back)  │                         │
//! │  │  categoryId     │        │  vasItemId      │                         │
//! │  │  sellerId       │        │  vasCategoryId  │                         │
//! │  │  price, qty     │        │  vasSellerId    │                         │
//! │  └─────────────────┘        └─────────────────┘                         │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                         │
//! │  │  DiscountRate   │        │   PromotionId   │                         │
//! │  │  bps (u32)      │        │  0 = NONE       │                         │
//! │  │  500 = 5%       │        │  9909, 5676 ... │                         │
//! │  └─────────────────┘        └─────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Wire names are camelCase to match the command and snapshot files.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 500 bps = 5% (the category promotion rate)
///
/// On the wire the rate is the decimal fraction (`0.05`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a decimal fraction (`0.05` → 500 bps).
    pub fn from_fraction(fraction: f64) -> Self {
        DiscountRate((fraction * 10_000.0).round().max(0.0) as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a decimal fraction (for serialization only).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }
}

impl Serialize for DiscountRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.fraction())
    }
}

impl<'de> Deserialize<'de> for DiscountRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fraction = f64::deserialize(deserializer)?;
        if !fraction.is_finite() || fraction < 0.0 {
            return Err(serde::de::Error::custom(
                "discount rate must be a non-negative fraction",
            ));
        }
        Ok(DiscountRate::from_fraction(fraction))
    }
}

// =============================================================================
// Promotion Identifier
// =============================================================================

/// Identifier of a promotion in the catalog.
///
/// `PromotionId::NONE` (0) marks a cart that has no promotion applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromotionId(i64);

impl PromotionId {
    /// Sentinel for "no promotion applied".
    pub const NONE: PromotionId = PromotionId(0);

    #[inline]
    pub const fn new(id: i64) -> Self {
        PromotionId(id)
    }

    #[inline]
    pub const fn get(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for PromotionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// VAS Item
// =============================================================================

/// A value-added-service line attached to exactly one [`Item`].
///
/// `item_id` is a back-reference to the owning item; ownership is
/// expressed by living inside that item's `vas_items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VasItem {
    pub item_id: i64,
    pub vas_item_id: i64,
    pub vas_category_id: i64,
    pub vas_seller_id: i64,
    pub price: Money,
    pub quantity: i64,
}

// =============================================================================
// Item
// =============================================================================

/// A line in the cart.
///
/// ## Invariants
/// - At most one `Item` per `item_id` in a cart (re-adding merges quantity)
/// - `vas_items` never holds more than 3 entries or 3 units in total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub item_id: i64,
    pub category_id: i64,
    pub seller_id: i64,

    /// Unit price.
    pub price: Money,

    pub quantity: i64,

    /// Missing on input means "no VAS items yet".
    #[serde(default)]
    pub vas_items: Vec<VasItem>,
}

impl Item {
    /// Creates an item with no VAS items attached.
    pub fn new(item_id: i64, category_id: i64, seller_id: i64, price: Money, quantity: i64) -> Self {
        Item {
            item_id,
            category_id,
            seller_id,
            price,
            quantity,
            vas_items: Vec::new(),
        }
    }

    /// Unit price × quantity. VAS prices are not part of the line total.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }

    /// Sum of quantities across attached VAS items.
    pub fn vas_quantity(&self) -> i64 {
        self.vas_items
            .iter()
            .fold(0i64, |acc, v| acc.saturating_add(v.quantity))
    }

    pub fn find_vas_item_mut(&mut self, vas_item_id: i64) -> Option<&mut VasItem> {
        self.vas_items.iter_mut().find(|v| v.vas_item_id == vas_item_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
