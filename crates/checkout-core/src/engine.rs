//! # Cart Engine
//!
//! Runs every cart operation through one protocol and turns the outcome into
//! a [`CartResponse`].
//!
//! ## Operation Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Cart Operation                                   │
//! │                                                                         │
//! │  1. store.load()           ─► Cart (empty on miss / corrupt data)       │
//! │  2. validate + mutate      ─► Err(CoreError)? → {result:false} and STOP │
//! │  3. evaluator.evaluate()   ─► totals, discount, appliedPromotionId      │
//! │  4. store.save(cart)       ─► snapshot ownership moves to the store     │
//! │  5. {result:true, message}                                              │
//! │                                                                         │
//! │  Nothing is saved on a failed step 2: the prior snapshot stands.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Exclusive Access
//! Every operation takes `&mut self`. The load → mutate → evaluate → save
//! sequence is one critical section; a long-lived host sharing the engine
//! across threads must wrap it in a `Mutex` rather than split the steps.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::evaluator::PromotionEvaluator;
use crate::promotion::{Promotion, PromotionDto};
use crate::types::{Item, VasItem};
use crate::validation::{validate_item_addition, validate_price, validate_quantity, validate_vas_addition};

// =============================================================================
// Storage Seam
// =============================================================================

/// The single-slot cart storage the engine reads and writes.
///
/// Implementations live in `checkout-store`. The storage location is given
/// to the implementation at construction.
pub trait CartStore {
    type Error: std::error::Error;

    /// Returns the stored snapshot, or an empty cart when nothing usable is
    /// stored. Never fails.
    fn load(&self) -> Cart;

    /// Replaces the stored snapshot (last write wins).
    fn save(&mut self, cart: Cart) -> Result<(), Self::Error>;
}

// =============================================================================
// Response
// =============================================================================

/// Payload of a response: a human-readable message, or the cart itself for
/// `displayCart`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseMessage {
    Text(String),
    Cart(Cart),
}

/// `{ result, message }` returned by every engine operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartResponse {
    pub result: bool,
    pub message: ResponseMessage,
}

impl CartResponse {
    pub fn success(message: impl Into<String>) -> Self {
        CartResponse {
            result: true,
            message: ResponseMessage::Text(message.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        CartResponse {
            result: false,
            message: ResponseMessage::Text(message.into()),
        }
    }

    /// Successful response carrying a cart snapshot.
    pub fn cart(cart: Cart) -> Self {
        CartResponse {
            result: true,
            message: ResponseMessage::Cart(cart),
        }
    }

    /// The text message, if this response carries one.
    pub fn text(&self) -> Option<&str> {
        match &self.message {
            ResponseMessage::Text(text) => Some(text),
            ResponseMessage::Cart(_) => None,
        }
    }
}

impl From<CoreError> for CartResponse {
    fn from(err: CoreError) -> Self {
        CartResponse::failure(err.to_string())
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Applies cart operations against a [`CartStore`].
#[derive(Debug)]
pub struct CartEngine<S: CartStore> {
    store: S,
    promotions: PromotionEvaluator,
}

impl<S: CartStore> CartEngine<S> {
    /// Creates an engine with the built-in promotion catalog.
    pub fn new(store: S) -> Self {
        Self::with_promotions(store, PromotionEvaluator::new())
    }

    pub fn with_promotions(store: S, promotions: PromotionEvaluator) -> Self {
        CartEngine { store, promotions }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn promotions(&self) -> &PromotionEvaluator {
        &self.promotions
    }

    /// Adds an item, or merges its quantity into the matching line.
    ///
    /// See [`validate_item_addition`] for the rule order.
    pub fn add_item(&mut self, item: Item) -> CartResponse {
        debug!(item_id = item.item_id, quantity = item.quantity, "add_item");

        self.apply("Item added to cart.", |cart| {
            validate_item_addition(cart, &item)?;
            cart.merge_item(item)
        })
    }

    /// Attaches a VAS item to the line with `item_id`.
    ///
    /// The owner lookup comes first, then the sanity checks, then the rules
    /// in [`validate_vas_addition`]. The stored back-reference is always
    /// `item_id`, whatever `vas_item.item_id` held.
    pub fn add_vas_item_to_item(&mut self, item_id: i64, mut vas_item: VasItem) -> CartResponse {
        debug!(item_id, vas_item_id = vas_item.vas_item_id, "add_vas_item_to_item");
        vas_item.item_id = item_id;

        self.apply("VAS item added to item.", |cart| {
            let owner = cart
                .find_item(item_id)
                .ok_or(CoreError::ItemNotFound(item_id))?;

            validate_quantity(vas_item.quantity)?;
            validate_price(vas_item.price)?;
            validate_vas_addition(owner, &vas_item)?;

            cart.attach_vas_item(item_id, vas_item)
        })
    }

    /// Removes the line with `item_id`.
    pub fn remove_item(&mut self, item_id: i64) -> CartResponse {
        debug!(item_id, "remove_item");

        self.apply("Item removed from cart.", |cart| {
            cart.remove_item(item_id).map(|_| ())
        })
    }

    /// Replaces the stored cart with an empty one.
    pub fn reset_cart(&mut self) -> CartResponse {
        debug!("reset_cart");

        match self.persist(Cart::default()) {
            Ok(()) => {
                info!("Cart reset");
                CartResponse::success("Cart reset.")
            }
            Err(err) => err.into(),
        }
    }

    /// Returns the stored cart.
    ///
    /// The unchanged snapshot is written back, so a display leaves the store
    /// in the same state as any other successful operation.
    pub fn display_cart(&mut self) -> CartResponse {
        debug!("display_cart");

        let cart = self.store.load();
        match self.persist(cart.clone()) {
            Ok(()) => CartResponse::cart(cart),
            Err(err) => err.into(),
        }
    }

    /// Appends a promotion to the catalog.
    pub fn add_promotion(&mut self, dto: PromotionDto) -> CartResponse {
        self.promotions.add_promotion(dto)
    }

    /// Catalog entries, built-ins first.
    pub fn list_promotions(&self) -> &[Promotion] {
        self.promotions.list_promotions()
    }

    /// Load, mutate, evaluate, save.
    fn apply<F>(&mut self, success: &str, mutate: F) -> CartResponse
    where
        F: FnOnce(&mut Cart) -> CoreResult<()>,
    {
        let mut cart = self.store.load();

        if let Err(err) = mutate(&mut cart) {
            debug!(reason = %err, "Cart operation rejected");
            return err.into();
        }

        self.promotions.evaluate(&mut cart);
        let total = cart.total_amount;

        match self.persist(cart) {
            Ok(()) => {
                info!(%total, "{}", success);
                CartResponse::success(success)
            }
            Err(err) => err.into(),
        }
    }

    fn persist(&mut self, cart: Cart) -> CoreResult<()> {
        self.store.save(cart).map_err(|e| {
            error!("Failed to save cart: {}", e);
            CoreError::SaveFailed(e.to_string())
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
