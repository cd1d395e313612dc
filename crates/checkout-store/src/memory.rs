//! # Memory Store
//!
//! Keeps the cart snapshot in process. Used by tests and by hosts that
//! persist the cart elsewhere.

use std::convert::Infallible;

use checkout_core::{Cart, CartStore};

/// In-memory cart slot that counts its saves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    cart: Option<Cart>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Store pre-loaded with `cart`.
    pub fn with_cart(cart: Cart) -> Self {
        MemoryStore {
            cart: Some(cart),
            saves: 0,
        }
    }

    /// The last saved snapshot, if any.
    pub fn snapshot(&self) -> Option<&Cart> {
        self.cart.as_ref()
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl CartStore for MemoryStore {
    type Error = Infallible;

    fn load(&self) -> Cart {
        self.cart.clone().unwrap_or_default()
    }

    fn save(&mut self, cart: Cart) -> Result<(), Infallible> {
        self.cart = Some(cart);
        self.saves += 1;
        Ok(())
    }
}
