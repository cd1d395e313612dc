//! # Cart
//!
//! The single mutable aggregate: ordered item lines plus the totals the
//! promotion evaluator writes back.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Mutations                                       │
//! │                                                                         │
//! │  Engine Operation         Cart Method             Cart Change           │
//! │  ────────────────         ───────────             ───────────           │
//! │                                                                         │
//! │  addItem ────────────────► merge_item() ────────► qty += n | push      │
//! │                                                                         │
//! │  addVasItemToItem ───────► attach_vas_item() ───► vas qty += n | push  │
//! │                                                                         │
//! │  removeItem ─────────────► remove_item() ───────► items.remove(i)      │
//! │                                                                         │
//! │  resetCart ──────────────► Cart::default() ─────► everything zeroed    │
//! │                                                                         │
//! │  NOTE: Totals are NOT touched here. The evaluator recomputes them      │
//! │        after every successful mutation.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Item, PromotionId, VasItem};
use crate::{MAX_ITEM_QUANTITY, MAX_VAS_QUANTITY};

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `item_id` (adding the same item increases quantity)
/// - `items` keeps arrival order
/// - After every engine mutation:
///   `total_amount == subtotal() - total_discount`
///
/// Every field defaults when missing so partial snapshots still load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cart {
    pub items: Vec<Item>,
    pub total_amount: Money,
    pub total_discount: Money,
    pub applied_promotion_id: PromotionId,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    pub fn find_item(&self, item_id: i64) -> Option<&Item> {
        self.items.iter().find(|i| i.item_id == item_id)
    }

    pub fn find_item_mut(&mut self, item_id: i64) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.item_id == item_id)
    }

    /// Number of distinct item identities.
    ///
    /// Snapshots written by hand may repeat an id, so this counts ids rather
    /// than lines.
    pub fn unique_item_count(&self) -> usize {
        self.items
            .iter()
            .map(|i| i.item_id)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Quantity currently held for `item_id` (0 when absent).
    pub fn quantity_of(&self, item_id: i64) -> i64 {
        self.find_item(item_id).map_or(0, |i| i.quantity)
    }

    /// Sum of line totals, before any discount. VAS items are excluded.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(Item::line_total).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds an item line, or merges its quantity into an existing line.
    ///
    /// ## Behavior
    /// - Same `item_id` present: quantity increases, unless the merged
    ///   quantity would pass `MAX_ITEM_QUANTITY`
    /// - Otherwise: appended as a new line
    ///
    /// Capacity rules are checked beforehand by
    /// [`validate_item_addition`](crate::validation::validate_item_addition).
    pub fn merge_item(&mut self, item: Item) -> CoreResult<()> {
        if let Some(existing) = self.find_item_mut(item.item_id) {
            if existing.quantity + item.quantity > MAX_ITEM_QUANTITY {
                return Err(CoreError::ItemQuantityLimit {
                    max: MAX_ITEM_QUANTITY,
                });
            }
            existing.quantity += item.quantity;
            return Ok(());
        }

        self.items.push(item);
        Ok(())
    }

    /// Attaches a VAS item to the owning line, merging by `vas_item_id`.
    ///
    /// Eligibility is checked beforehand by
    /// [`validate_vas_addition`](crate::validation::validate_vas_addition).
    pub fn attach_vas_item(&mut self, item_id: i64, vas_item: VasItem) -> CoreResult<()> {
        let owner = self
            .find_item_mut(item_id)
            .ok_or(CoreError::ItemNotFound(item_id))?;

        if let Some(existing) = owner.find_vas_item_mut(vas_item.vas_item_id) {
            if existing.quantity + vas_item.quantity > MAX_VAS_QUANTITY {
                return Err(CoreError::VasQuantityLimit {
                    max: MAX_VAS_QUANTITY,
                });
            }
            existing.quantity += vas_item.quantity;
            return Ok(());
        }

        owner.vas_items.push(vas_item);
        Ok(())
    }

    /// Removes the line with `item_id`.
    pub fn remove_item(&mut self, item_id: i64) -> CoreResult<Item> {
        let index = self
            .items
            .iter()
            .position(|i| i.item_id == item_id)
            .ok_or(CoreError::ItemNotFound(item_id))?;

        Ok(self.items.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, price: i64, quantity: i64) -> Item {
        Item::new(id, 1001, 2001, Money::from_major(price), quantity)
    }

    fn vas(vas_item_id: i64, quantity: i64) -> VasItem {
        VasItem {
            item_id: 1,
            vas_item_id,
            vas_category_id: 1,
            vas_seller_id: 5003,
            price: Money::from_major(120),
            quantity,
        }
    }

    #[test]
    fn test_merge_new_item_appends() {
        let mut cart = Cart::new();
        cart.merge_item(item(1, 100, 2)).unwrap();
        cart.merge_item(item(2, 50, 1)).unwrap();

        assert_eq!(cart.unique_item_count(), 2);
        assert_eq!(cart.items[0].item_id, 1);
        assert_eq!(cart.items[1].item_id, 2);
        assert_eq!(cart.subtotal(), Money::from_major(250));
    }

    #[test]
    fn test_merge_same_item_increases_quantity() {
        let mut cart = Cart::new();
        cart.merge_item(item(1, 100, 2)).unwrap();
        cart.merge_item(item(1, 100, 3)).unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_merge_same_item_past_limit_is_rejected() {
        let mut cart = Cart::new();
        cart.merge_item(item(1, 100, 10)).unwrap();

        let err = cart.merge_item(item(1, 100, 1)).unwrap_err();
        assert_eq!(err.to_string(), "Cannot add more than 10 of the same item.");
        assert_eq!(cart.quantity_of(1), 10);
    }

    #[test]
    fn test_attach_vas_item_merges_by_id() {
        let mut cart = Cart::new();
        cart.merge_item(item(1, 100, 1)).unwrap();

        cart.attach_vas_item(1, vas(2, 1)).unwrap();
        cart.attach_vas_item(1, vas(2, 2)).unwrap();

        let owner = cart.find_item(1).unwrap();
        assert_eq!(owner.vas_items.len(), 1);
        assert_eq!(owner.vas_quantity(), 3);
    }

    #[test]
    fn test_attach_vas_item_past_limit_is_rejected() {
        let mut cart = Cart::new();
        cart.merge_item(item(1, 100, 1)).unwrap();
        cart.attach_vas_item(1, vas(2, 2)).unwrap();

        let err = cart.attach_vas_item(1, vas(2, 2)).unwrap_err();
        assert_eq!(err, CoreError::VasQuantityLimit { max: 3 });
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.merge_item(item(1, 100, 1)).unwrap();

        assert_eq!(cart.remove_item(1).unwrap().item_id, 1);
        assert!(cart.is_empty());
        assert_eq!(cart.remove_item(1), Err(CoreError::ItemNotFound(1)));
    }

    #[test]
    fn test_partial_snapshot_loads_with_defaults() {
        let cart: Cart = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert_eq!(cart, Cart::default());
        assert!(cart.applied_promotion_id.is_none());
    }

    #[test]
    fn test_totals_of_oversized_snapshot_saturate() {
        let cart = Cart {
            items: vec![item(1, 10, i64::MAX), item(2, 10, i64::MAX)],
            ..Cart::default()
        };

        assert_eq!(cart.total_quantity(), i64::MAX);
        assert_eq!(cart.subtotal(), Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_unique_count_ignores_repeated_ids() {
        let cart = Cart {
            items: vec![item(1, 10, 1), item(1, 10, 1), item(2, 10, 1)],
            ..Cart::default()
        };
        assert_eq!(cart.unique_item_count(), 2);
    }
}
