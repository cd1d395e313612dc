//! # JSON File Store
//!
//! Keeps the cart as one JSON document on disk.
//!
//! ## Load / Save
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load()                                                                 │
//! │    read file ── NotFound ──────────────► debug!  → Cart::default()      │
//! │        │     └─ other I/O error ───────► warn!   → Cart::default()      │
//! │        ▼                                                                │
//! │    parse JSON ── invalid ──────────────► warn!   → Cart::default()      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │    Cart                                                                 │
//! │                                                                         │
//! │  save(cart)                                                             │
//! │    create parent dirs ─► encode (compact) ─► write whole file           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The file is rewritten in full on every save; last write wins.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use checkout_core::{Cart, CartStore};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

/// Default file name, relative to the working directory.
pub const DEFAULT_DB_FILE: &str = "db.json";

/// Cart storage backed by a JSON file.
///
/// ## Example
/// ```rust,no_run
/// use checkout_core::CartStore;
/// use checkout_store::JsonFileStore;
///
/// let store = JsonFileStore::new("./data/db.json");
/// let cart = store.load(); // empty if the file does not exist yet
/// assert!(cart.items.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store for `path`. Nothing is touched until the first
    /// load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, cart: &Cart) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }

        let json = serde_json::to_string(cart)?;
        fs::write(&self.path, json).map_err(|e| StoreError::io(&self.path, e))?;

        debug!(path = %self.path.display(), items = cart.items.len(), "Cart saved");
        Ok(())
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        JsonFileStore::new(DEFAULT_DB_FILE)
    }
}

impl CartStore for JsonFileStore {
    type Error = StoreError;

    fn load(&self) -> Cart {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No stored cart, starting empty");
                return Cart::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Stored cart unreadable, starting empty");
                return Cart::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(cart) => cart,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Stored cart corrupt, starting empty");
                Cart::default()
            }
        }
    }

    fn save(&mut self, cart: Cart) -> Result<(), StoreError> {
        self.write(&cart)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
