//! # checkout-store: Cart Storage Adapters
//!
//! Implementations of [`CartStore`](checkout_core::CartStore), the single
//! slot the cart engine loads from and saves to.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Data Flow                                   │
//! │                                                                         │
//! │  CartEngine operation (add_item, remove_item, ...)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 checkout-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────────────┐        ┌──────────────────────┐     │   │
//! │  │   │    JsonFileStore     │        │     MemoryStore      │     │   │
//! │  │   │     (file.rs)        │        │     (memory.rs)      │     │   │
//! │  │   │                      │        │                      │     │   │
//! │  │   │ load: read + parse   │        │ load: clone slot     │     │   │
//! │  │   │ save: mkdir + write  │        │ save: replace slot   │     │   │
//! │  │   └──────────┬───────────┘        └──────────────────────┘     │   │
//! │  │              │                                                  │   │
//! │  └──────────────┼──────────────────────────────────────────────────┘   │
//! │                 ▼                                                       │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                        db.json                                  │   │
//! │  │   {"items":[...],"totalAmount":..,"totalDiscount":..,           │   │
//! │  │    "appliedPromotionId":..}                                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`file`] - JSON document on disk
//! - [`memory`] - In-process slot
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use checkout_core::CartEngine;
//! use checkout_store::JsonFileStore;
//!
//! let mut engine = CartEngine::new(JsonFileStore::new("db.json"));
//! let response = engine.display_cart();
//! assert!(response.result);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod file;
pub mod memory;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use memory::MemoryStore;
