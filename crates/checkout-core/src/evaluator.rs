//! # Promotion Evaluator
//!
//! Recomputes cart totals and picks the single best promotion.
//!
//! ## Evaluation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  evaluate(cart)                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  totalAmount = Σ price × quantity        (VAS items excluded)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  for promotion in catalog (built-ins first):                            │
//! │       discount = discount_for(kind, cart)                               │
//! │       discount > best?  → best = (discount, id)    strict: ties keep    │
//! │       │                                            the earlier entry    │
//! │       ▼                                                                 │
//! │  totalDiscount = best, appliedPromotionId = id | NONE                   │
//! │  totalAmount  -= best                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use tracing::debug;

use crate::cart::Cart;
use crate::engine::CartResponse;
use crate::money::Money;
use crate::promotion::{Promotion, PromotionCatalog, PromotionDto, PromotionKind};
use crate::types::PromotionId;

/// Outcome of one evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedPromotion {
    pub promotion_id: PromotionId,
    pub discount: Money,
}

/// Owns the promotion catalog and prices carts against it.
#[derive(Debug, Clone, Default)]
pub struct PromotionEvaluator {
    catalog: PromotionCatalog,
}

impl PromotionEvaluator {
    /// Evaluator seeded with the three built-in promotions.
    pub fn new() -> Self {
        PromotionEvaluator {
            catalog: PromotionCatalog::with_builtins(),
        }
    }

    /// Appends a promotion to the catalog. Always succeeds.
    pub fn add_promotion(&mut self, dto: PromotionDto) -> CartResponse {
        let promotion = Promotion::from(dto);
        debug!(promotion_id = %promotion.id, kind = promotion.kind.name(), "Promotion added");
        self.catalog.push(promotion);
        CartResponse::success("Promotion added.")
    }

    /// Catalog entries in evaluation order.
    pub fn list_promotions(&self) -> &[Promotion] {
        self.catalog.as_slice()
    }

    /// Rewrites `total_amount`, `total_discount` and `applied_promotion_id`.
    ///
    /// Infallible: an empty cart or a cart no promotion applies to simply
    /// ends up with a zero discount and `PromotionId::NONE`.
    pub fn evaluate(&self, cart: &mut Cart) -> AppliedPromotion {
        cart.total_amount = cart.subtotal();

        let mut best = AppliedPromotion {
            promotion_id: PromotionId::NONE,
            discount: Money::zero(),
        };

        for promotion in self.catalog.as_slice() {
            let discount = discount_for(&promotion.kind, cart);
            if discount > best.discount {
                best = AppliedPromotion {
                    promotion_id: promotion.id,
                    discount,
                };
            }
        }

        cart.total_discount = best.discount;
        cart.applied_promotion_id = best.promotion_id;
        cart.total_amount -= best.discount;

        debug!(
            promotion_id = %best.promotion_id,
            discount = %best.discount,
            total = %cart.total_amount,
            "Promotion evaluated"
        );

        best
    }
}

/// Discount a promotion of `kind` would grant on `cart`.
///
/// Reads `cart.total_amount`, so the caller must have set it to the
/// undiscounted subtotal first.
pub fn discount_for(kind: &PromotionKind, cart: &Cart) -> Money {
    match kind {
        PromotionKind::SameSeller { rate } => {
            let sellers: HashSet<i64> = cart.items.iter().map(|i| i.seller_id).collect();
            let items: HashSet<i64> = cart.items.iter().map(|i| i.item_id).collect();

            if sellers.len() == 1 && items.len() > 1 {
                cart.total_amount.apply_rate(*rate)
            } else {
                Money::zero()
            }
        }
        PromotionKind::Category { categories, rate } => cart
            .items
            .iter()
            .filter(|i| categories.contains(&i.category_id))
            .map(|i| i.price.apply_rate(*rate))
            .sum(),
        PromotionKind::TotalPrice { tiers } => tiers
            .iter()
            .rev()
            .find(|tier| cart.total_amount >= tier.threshold)
            .map_or(Money::zero(), |tier| tier.discount),
        PromotionKind::Unpriced { .. } => Money::zero(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promotion::{CATEGORY_PROMOTION_ID, SAME_SELLER_PROMOTION_ID, TOTAL_PRICE_PROMOTION_ID};
    use crate::types::Item;

    fn item(id: i64, category_id: i64, seller_id: i64, price: i64, quantity: i64) -> Item {
        Item::new(id, category_id, seller_id, Money::from_major(price), quantity)
    }

    fn evaluated(items: Vec<Item>) -> Cart {
        let mut cart = Cart {
            items,
            ..Cart::default()
        };
        PromotionEvaluator::new().evaluate(&mut cart);
        cart
    }

    #[test]
    fn test_same_seller_promotion() {
        let cart = evaluated(vec![item(1, 1001, 7, 100, 1), item(2, 1001, 7, 100, 1)]);

        assert_eq!(cart.total_discount, Money::from_major(20));
        assert_eq!(cart.applied_promotion_id, SAME_SELLER_PROMOTION_ID);
        assert_eq!(cart.total_amount, Money::from_major(180));
    }

    #[test]
    fn test_same_seller_needs_two_distinct_items() {
        let cart = evaluated(vec![item(1, 1001, 7, 100, 2)]);

        assert!(cart.total_discount.is_zero());
        assert!(cart.applied_promotion_id.is_none());
        assert_eq!(cart.total_amount, Money::from_major(200));
    }

    #[test]
    fn test_category_promotion_uses_unit_price() {
        let cart = evaluated(vec![item(1, 3003, 7, 100, 1)]);

        assert_eq!(cart.total_discount, Money::from_major(5));
        assert_eq!(cart.applied_promotion_id, CATEGORY_PROMOTION_ID);
        assert_eq!(cart.total_amount, Money::from_major(95));

        // Four units still discount one unit price
        let cart = evaluated(vec![item(1, 3003, 7, 100, 4)]);
        assert_eq!(cart.total_discount, Money::from_major(5));
    }

    #[test]
    fn test_total_price_tiers() {
        let cases = [(1_000, 250), (9_000, 500), (10_000, 1_000), (100_000, 2_000)];

        for (price, expected) in cases {
            let cart = evaluated(vec![item(1, 1001, 7, price, 1)]);
            assert_eq!(cart.total_discount, Money::from_major(expected), "price {}", price);
            assert_eq!(cart.applied_promotion_id, TOTAL_PRICE_PROMOTION_ID);
            assert_eq!(
                cart.total_amount,
                Money::from_major(price) - Money::from_major(expected)
            );
        }
    }

    #[test]
    fn test_total_price_below_first_tier() {
        let cart = evaluated(vec![item(1, 1001, 7, 499, 1)]);
        assert!(cart.total_discount.is_zero());
        assert!(cart.applied_promotion_id.is_none());
    }

    #[test]
    fn test_highest_discount_wins() {
        // Same seller: 10% of 1000 = 100. Total price: 250. Total price wins.
        let cart = evaluated(vec![item(1, 1001, 7, 500, 1), item(2, 1001, 7, 500, 1)]);
        assert_eq!(cart.applied_promotion_id, TOTAL_PRICE_PROMOTION_ID);
        assert_eq!(cart.total_discount, Money::from_major(250));

        // Same seller: 10% of 4000 = 400 beats 250.
        let cart = evaluated(vec![item(1, 1001, 7, 2000, 1), item(2, 1001, 7, 2000, 1)]);
        assert_eq!(cart.applied_promotion_id, SAME_SELLER_PROMOTION_ID);
        assert_eq!(cart.total_discount, Money::from_major(400));
    }

    #[test]
    fn test_tie_keeps_first_promotion() {
        // Same seller: 10% of 2500 = 250. Total price: 250. Same seller is first.
        let cart = evaluated(vec![item(1, 1001, 7, 1250, 1), item(2, 1001, 7, 1250, 1)]);
        assert_eq!(cart.applied_promotion_id, SAME_SELLER_PROMOTION_ID);
        assert_eq!(cart.total_discount, Money::from_major(250));
    }

    #[test]
    fn test_unpriced_promotions_never_win() {
        let mut evaluator = PromotionEvaluator::new();
        let response = evaluator.add_promotion(PromotionDto {
            promotion_id: 77,
            applicable_items: vec![1001],
            discount_rate: None,
            discount_amount: Some(Money::from_major(10_000)),
            kind: Some("flat".to_string()),
        });
        assert!(response.result);
        assert_eq!(evaluator.list_promotions().len(), 4);

        let mut cart = Cart {
            items: vec![item(1, 1001, 7, 100, 1)],
            ..Cart::default()
        };
        let applied = evaluator.evaluate(&mut cart);
        assert!(applied.promotion_id.is_none());
        assert!(cart.total_discount.is_zero());
    }

    #[test]
    fn test_vas_prices_excluded_from_total() {
        let mut owner = item(1, 1001, 7, 100, 1);
        owner.vas_items.push(crate::types::VasItem {
            item_id: 1,
            vas_item_id: 2,
            vas_category_id: 1,
            vas_seller_id: 5003,
            price: Money::from_major(1_000),
            quantity: 3,
        });

        let cart = evaluated(vec![owner]);
        assert_eq!(cart.total_amount, Money::from_major(100));
    }

    #[test]
    fn test_empty_cart_evaluates_to_zero() {
        let cart = evaluated(Vec::new());
        assert_eq!(cart, Cart::default());
    }
}
