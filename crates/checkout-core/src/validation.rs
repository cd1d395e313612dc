//! # Validation Module
//!
//! The rule chains that decide whether an item or VAS item may enter the cart.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Command adapter                                                │
//! │  └── Type validation (payload deserialization)                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Input sanity (this module)                                    │
//! │  └── quantity > 0, price >= 0                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart rules (this module)                                      │
//! │  └── ordered chain, first failure wins                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: Merge (cart.rs)                                               │
//! │  └── same-id quantity ceilings                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The order of checks inside each chain is part of the contract: callers
//! observe the message of the FIRST rule that fails.

use tracing::debug;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Item, VasItem};
use crate::{
    DIGITAL_CATEGORY_ID, MAX_CART_QUANTITY, MAX_CART_VALUE, MAX_DIGITAL_ITEM_QUANTITY,
    MAX_UNIQUE_ITEMS, MAX_VAS_ITEMS, MAX_VAS_QUANTITY, VAS_ELIGIBLE_CATEGORY_IDS,
    VAS_ITEM_CATEGORY_ID, VAS_SELLER_ID,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Input Sanity
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// Upper bounds are cart rules, not input rules, and live in the chains below.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use checkout_core::money::Money;
/// use checkout_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_major(100)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Item Rules
// =============================================================================

/// Checks an incoming item against the cart's capacity rules.
///
/// ## Rule Chain
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  addItem(item)                                                          │
/// │       │                                                                 │
/// │       ├── quantity <= 0 / price < 0?          → ValidationError         │
/// │       │                                                                 │
/// │       ├── 1. not a VAS-category item AND                                │
/// │       │      cart has >= 10 distinct ids?     → TooManyUniqueItems      │
/// │       │                                                                 │
/// │       ├── 2. digital category AND                                       │
/// │       │      held + new quantity > 5?         → DigitalItemLimit        │
/// │       │                                                                 │
/// │       ├── 3. all units + new quantity > 30?   → CartQuantityLimit       │
/// │       │                                                                 │
/// │       ├── 4. subtotal + price × qty > 500000? → CartValueLimit          │
/// │       │                                                                 │
/// │       └── OK → Cart::merge_item (step 5: same-id limit of 10)           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Rule 1 fires even when the item is already in the cart and would only
/// be merged.
pub fn validate_item_addition(cart: &Cart, item: &Item) -> CoreResult<()> {
    validate_quantity(item.quantity)?;
    validate_price(item.price)?;

    if item.category_id != VAS_ITEM_CATEGORY_ID && cart.unique_item_count() >= MAX_UNIQUE_ITEMS {
        debug!(item_id = item.item_id, "Rejected: unique item limit");
        return Err(CoreError::TooManyUniqueItems {
            max: MAX_UNIQUE_ITEMS,
        });
    }

    if item.category_id == DIGITAL_CATEGORY_ID
        && cart.quantity_of(item.item_id).saturating_add(item.quantity) > MAX_DIGITAL_ITEM_QUANTITY
    {
        debug!(item_id = item.item_id, "Rejected: digital item limit");
        return Err(CoreError::DigitalItemLimit {
            max: MAX_DIGITAL_ITEM_QUANTITY,
        });
    }

    if cart.total_quantity().saturating_add(item.quantity) > MAX_CART_QUANTITY {
        debug!(item_id = item.item_id, "Rejected: cart quantity limit");
        return Err(CoreError::CartQuantityLimit);
    }

    if cart.subtotal().saturating_add(item.line_total()) > MAX_CART_VALUE {
        debug!(item_id = item.item_id, "Rejected: cart value limit");
        return Err(CoreError::CartValueLimit);
    }

    Ok(())
}

// =============================================================================
// VAS Item Rules
// =============================================================================

/// Checks whether `vas_item` may be attached to `owner`.
///
/// ## Rule Chain
/// 1. `vas_seller_id` must be `VAS_SELLER_ID`
/// 2. `owner.category_id` must be one of `VAS_ELIGIBLE_CATEGORY_IDS`
/// 3. `owner` has fewer than 3 VAS entries, the new quantity is at most 3,
///    and the EXISTING VAS quantity is at most 3
///
/// Rule 3 looks at the existing sum only; the new quantity joins the sum
/// in [`Cart::attach_vas_item`].
pub fn validate_vas_addition(owner: &Item, vas_item: &VasItem) -> CoreResult<()> {
    if vas_item.vas_seller_id != VAS_SELLER_ID {
        debug!(
            item_id = owner.item_id,
            vas_seller_id = vas_item.vas_seller_id,
            "Rejected: VAS seller"
        );
        return Err(CoreError::VasSellerNotAllowed {
            seller_id: vas_item.vas_seller_id,
        });
    }

    if !VAS_ELIGIBLE_CATEGORY_IDS.contains(&owner.category_id) {
        debug!(
            item_id = owner.item_id,
            category_id = owner.category_id,
            "Rejected: category does not take VAS items"
        );
        return Err(CoreError::VasCategoryNotAllowed {
            category_id: owner.category_id,
        });
    }

    if owner.vas_items.len() >= MAX_VAS_ITEMS
        || vas_item.quantity > MAX_VAS_QUANTITY
        || owner.vas_quantity() > MAX_VAS_QUANTITY
    {
        debug!(item_id = owner.item_id, "Rejected: VAS item limit");
        return Err(CoreError::VasItemLimit { max: MAX_VAS_ITEMS });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, category_id: i64, price: i64, quantity: i64) -> Item {
        Item::new(id, category_id, 2001, Money::from_major(price), quantity)
    }

    fn vas(vas_item_id: i64, seller_id: i64, quantity: i64) -> VasItem {
        VasItem {
            item_id: 1,
            vas_item_id,
            vas_category_id: 1,
            vas_seller_id: seller_id,
            price: Money::from_major(120),
            quantity,
        }
    }

    fn cart_with(items: Vec<Item>) -> Cart {
        Cart {
            items,
            ..Cart::default()
        }
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_unique_item_limit() {
        let cart = cart_with((1..=10).map(|id| item(id, 1001, 10, 1)).collect());

        let err = validate_item_addition(&cart, &item(11, 1001, 10, 1)).unwrap_err();
        assert_eq!(err.to_string(), "Cannot add more than 10 unique items to cart.");
    }

    #[test]
    fn test_unique_item_limit_applies_to_existing_item() {
        let cart = cart_with((1..=10).map(|id| item(id, 1001, 10, 1)).collect());

        let err = validate_item_addition(&cart, &item(1, 1001, 10, 1)).unwrap_err();
        assert_eq!(err, CoreError::TooManyUniqueItems { max: 10 });
    }

    #[test]
    fn test_vas_category_item_skips_unique_limit() {
        let cart = cart_with((1..=10).map(|id| item(id, 1001, 10, 1)).collect());

        assert!(validate_item_addition(&cart, &item(11, VAS_ITEM_CATEGORY_ID, 10, 1)).is_ok());
    }

    #[test]
    fn test_digital_item_limit() {
        let cart = cart_with(vec![item(1, DIGITAL_CATEGORY_ID, 100, 5)]);

        let err = validate_item_addition(&cart, &item(1, DIGITAL_CATEGORY_ID, 100, 2)).unwrap_err();
        assert_eq!(err.to_string(), "Cannot add more than 5 digital items to cart.");

        let empty = Cart::new();
        assert!(validate_item_addition(&empty, &item(1, DIGITAL_CATEGORY_ID, 100, 5)).is_ok());
        assert!(validate_item_addition(&empty, &item(1, DIGITAL_CATEGORY_ID, 100, 6)).is_err());
    }

    #[test]
    fn test_cart_quantity_limit() {
        let cart = cart_with((1..=3).map(|id| item(id, 1001, 10, 10)).collect());

        let err = validate_item_addition(&cart, &item(4, 1001, 10, 1)).unwrap_err();
        assert_eq!(err.to_string(), "Cannot add more items, cart limit exceeded.");
    }

    #[test]
    fn test_cart_value_limit() {
        let cart = cart_with(vec![item(1, 1, 300, 10)]);

        let err = validate_item_addition(&cart, &item(2, 1001, 498_000, 1)).unwrap_err();
        assert_eq!(err.to_string(), "Cannot add item, cart total value limit exceeded.");

        // Landing exactly on the ceiling is allowed
        assert!(validate_item_addition(&cart, &item(2, 1001, 497_000, 1)).is_ok());
    }

    #[test]
    fn test_first_failing_rule_wins() {
        // Breaks both the quantity and the value rule; quantity is checked first.
        let cart = cart_with(vec![item(1, 1001, 1000, 10), item(2, 1001, 1000, 10)]);

        let err = validate_item_addition(&cart, &item(3, 1001, 500_000, 11)).unwrap_err();
        assert_eq!(err, CoreError::CartQuantityLimit);
    }

    #[test]
    fn test_input_sanity_runs_first() {
        let err = validate_item_addition(&Cart::new(), &item(1, 1001, 100, 0)).unwrap_err();
        assert_eq!(err.to_string(), "quantity must be positive");

        let mut negative = item(1, 1001, 0, 1);
        negative.price = Money::from_cents(-100);
        assert!(matches!(
            validate_item_addition(&Cart::new(), &negative),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_vas_seller_rule() {
        let owner = item(1, 1001, 100, 1);
        let err = validate_vas_addition(&owner, &vas(2, 23, 1)).unwrap_err();
        assert_eq!(err.to_string(), "VAS item cannot be added with this sellerId.");
    }

    #[test]
    fn test_vas_category_rule() {
        assert!(validate_vas_addition(&item(1, 1001, 100, 1), &vas(2, VAS_SELLER_ID, 1)).is_ok());

        let err = validate_vas_addition(&item(1, 3004, 100, 1), &vas(2, VAS_SELLER_ID, 1)).unwrap_err();
        assert_eq!(err, CoreError::VasCategoryNotAllowed { category_id: 3004 });

        let err = validate_vas_addition(&item(1, 61, 100, 1), &vas(2, VAS_SELLER_ID, 1)).unwrap_err();
        assert_eq!(err.to_string(), "VAS item cannot be added to this item.");
    }

    #[test]
    fn test_vas_item_limit() {
        let mut owner = item(1, 1001, 100, 1);
        owner.vas_items = vec![
            vas(1, VAS_SELLER_ID, 1),
            vas(2, VAS_SELLER_ID, 1),
            vas(3, VAS_SELLER_ID, 1),
        ];

        let err = validate_vas_addition(&owner, &vas(4, VAS_SELLER_ID, 1)).unwrap_err();
        assert_eq!(err.to_string(), "Cannot add more than 3 VAS items to a VAS item.");
    }

    #[test]
    fn test_vas_new_quantity_over_limit() {
        let owner = item(1, 1001, 100, 1);
        let err = validate_vas_addition(&owner, &vas(2, VAS_SELLER_ID, 4)).unwrap_err();
        assert_eq!(err, CoreError::VasItemLimit { max: 3 });
    }

    #[test]
    fn test_vas_limit_uses_existing_sum_only() {
        // Existing sum is 2 and the new quantity is 2: rule 3 passes, the
        // same-id merge ceiling is left to Cart::attach_vas_item.
        let mut owner = item(1, 1001, 100, 1);
        owner.vas_items = vec![vas(2, VAS_SELLER_ID, 2)];

        assert!(validate_vas_addition(&owner, &vas(2, VAS_SELLER_ID, 2)).is_ok());
    }
}
