//! # Promotion Catalog
//!
//! Promotion definitions and the catalog that holds them.
//!
//! ## Promotion Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  id     kind          configuration                                     │
//! │  ────   ───────────   ─────────────────────────────────────────────     │
//! │  9909   SameSeller    10% of the cart when one seller, 2+ items         │
//! │  5676   Category      5% of unit price for categories [3003]            │
//! │  1232   TotalPrice    flat tiers: 500→250, 5000→500,                    │
//! │                                   10000→1000, 50000→2000                │
//! │  ....   Unpriced      anything added at runtime; always prices as 0     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is seeded once with the three built-ins and only grows.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{DiscountRate, PromotionId};

pub const SAME_SELLER_PROMOTION_ID: PromotionId = PromotionId::new(9909);
pub const CATEGORY_PROMOTION_ID: PromotionId = PromotionId::new(5676);
pub const TOTAL_PRICE_PROMOTION_ID: PromotionId = PromotionId::new(1232);

// =============================================================================
// Promotion Kind
// =============================================================================

/// One step of a tiered flat discount: carts worth at least `threshold`
/// get `discount` off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceTier {
    pub threshold: Money,
    pub discount: Money,
}

impl PriceTier {
    pub const fn new(threshold: Money, discount: Money) -> Self {
        PriceTier { threshold, discount }
    }
}

/// What a promotion does, together with its configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromotionKind {
    /// `rate` of the cart total when every line shares one seller and the
    /// cart holds at least two distinct items.
    SameSeller { rate: DiscountRate },

    /// `rate` of the UNIT price of every line whose category is listed.
    /// Quantity does not multiply the discount.
    Category {
        categories: Vec<i64>,
        rate: DiscountRate,
    },

    /// Flat discount of the highest tier the cart total reaches.
    /// Tiers are kept in ascending threshold order.
    TotalPrice { tiers: Vec<PriceTier> },

    /// A promotion added at runtime. The evaluator has no pricing rule for
    /// it; the DTO fields are kept for listing.
    Unpriced {
        label: Option<String>,
        applicable_items: Vec<i64>,
        discount_rate: Option<DiscountRate>,
        discount_amount: Option<Money>,
    },
}

impl PromotionKind {
    /// Short name for logs.
    pub fn name(&self) -> &str {
        match self {
            PromotionKind::SameSeller { .. } => "same_seller",
            PromotionKind::Category { .. } => "category",
            PromotionKind::TotalPrice { .. } => "total_price",
            PromotionKind::Unpriced { label, .. } => label.as_deref().unwrap_or("unpriced"),
        }
    }
}

// =============================================================================
// Promotion
// =============================================================================

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    pub id: PromotionId,
    pub kind: PromotionKind,
}

impl Promotion {
    /// Same-seller promotion (id 9909): 10% off.
    pub fn same_seller() -> Self {
        Promotion {
            id: SAME_SELLER_PROMOTION_ID,
            kind: PromotionKind::SameSeller {
                rate: DiscountRate::from_bps(1000),
            },
        }
    }

    /// Category promotion (id 5676): 5% of unit price in category 3003.
    pub fn category() -> Self {
        Promotion {
            id: CATEGORY_PROMOTION_ID,
            kind: PromotionKind::Category {
                categories: vec![3003],
                rate: DiscountRate::from_bps(500),
            },
        }
    }

    /// Total-price promotion (id 1232).
    pub fn total_price() -> Self {
        Promotion {
            id: TOTAL_PRICE_PROMOTION_ID,
            kind: PromotionKind::TotalPrice {
                tiers: vec![
                    PriceTier::new(Money::from_major(500), Money::from_major(250)),
                    PriceTier::new(Money::from_major(5_000), Money::from_major(500)),
                    PriceTier::new(Money::from_major(10_000), Money::from_major(1_000)),
                    PriceTier::new(Money::from_major(50_000), Money::from_major(2_000)),
                ],
            },
        }
    }
}

/// Wire shape of a promotion handed to `addPromotion` or listed in config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionDto {
    pub promotion_id: i64,

    #[serde(default)]
    pub applicable_items: Vec<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_rate: Option<DiscountRate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<Money>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl From<PromotionDto> for Promotion {
    /// Runtime additions never become a built-in kind, whatever their
    /// `type` says.
    fn from(dto: PromotionDto) -> Self {
        Promotion {
            id: PromotionId::new(dto.promotion_id),
            kind: PromotionKind::Unpriced {
                label: dto.kind,
                applicable_items: dto.applicable_items,
                discount_rate: dto.discount_rate,
                discount_amount: dto.discount_amount,
            },
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Ordered promotion catalog: built-ins first, then additions in arrival
/// order. Entries are never removed.
#[derive(Debug, Clone)]
pub struct PromotionCatalog {
    promotions: Vec<Promotion>,
}

impl PromotionCatalog {
    /// Catalog holding SameSeller, Category and TotalPrice, in that order.
    pub fn with_builtins() -> Self {
        PromotionCatalog {
            promotions: vec![
                Promotion::same_seller(),
                Promotion::category(),
                Promotion::total_price(),
            ],
        }
    }

    pub fn push(&mut self, promotion: Promotion) {
        self.promotions.push(promotion);
    }

    pub fn as_slice(&self) -> &[Promotion] {
        &self.promotions
    }

    pub fn len(&self) -> usize {
        self.promotions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.promotions.is_empty()
    }
}

impl Default for PromotionCatalog {
    fn default() -> Self {
        Self::with_builtins()
    }
}
