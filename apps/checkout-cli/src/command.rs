//! # Cart Commands
//!
//! Decodes a `{ command, payload }` record and dispatches it to the engine.
//!
//! ## Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Dispatch                                     │
//! │                                                                         │
//! │  command             payload              engine call                   │
//! │  ─────────────────   ──────────────────   ───────────────────────────   │
//! │  addItem             Item                 add_item(item)                │
//! │  addVasItemToItem    VasItem              add_vas_item_to_item(         │
//! │                                               vas.itemId, vas)          │
//! │  removeItem          { itemId }           remove_item(itemId)           │
//! │  resetCart           ignored              reset_cart()                  │
//! │  displayCart         ignored              display_cart()                │
//! │                                                                         │
//! │  anything else, missing or non-string ───► "Invalid command"            │
//! │  missing / undecodable payload ──────────► "Invalid payload for <cmd>." │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use checkout_core::{CartEngine, CartResponse, CartStore, Item, VasItem};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// One decoded command record.
///
/// `command` is kept as raw JSON so that a missing or non-string name still
/// decodes and is answered with "Invalid command".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl CommandRequest {
    pub fn new(command: impl Into<String>, payload: Option<Value>) -> Self {
        CommandRequest {
            command: Some(Value::String(command.into())),
            payload,
        }
    }

    /// The command name, when one was given as a string.
    pub fn command_name(&self) -> Option<&str> {
        self.command.as_ref().and_then(Value::as_str)
    }
}

/// The recognised commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    AddItem,
    AddVasItemToItem,
    RemoveItem,
    ResetCart,
    DisplayCart,
}

impl CommandKind {
    /// Matches the wire name exactly (case-sensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "addItem" => Some(CommandKind::AddItem),
            "addVasItemToItem" => Some(CommandKind::AddVasItemToItem),
            "removeItem" => Some(CommandKind::RemoveItem),
            "resetCart" => Some(CommandKind::ResetCart),
            "displayCart" => Some(CommandKind::DisplayCart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::AddItem => "addItem",
            CommandKind::AddVasItemToItem => "addVasItemToItem",
            CommandKind::RemoveItem => "removeItem",
            CommandKind::ResetCart => "resetCart",
            CommandKind::DisplayCart => "displayCart",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoveItemPayload {
    item_id: i64,
}

/// Runs `request` against `engine`.
///
/// Every outcome, including an unknown command, is a [`CartResponse`].
pub fn execute<S: CartStore>(engine: &mut CartEngine<S>, request: CommandRequest) -> CartResponse {
    let kind = match request.command_name().and_then(CommandKind::parse) {
        Some(kind) => kind,
        None => {
            warn!(command = ?request.command, "Unknown command");
            return CartResponse::failure("Invalid command");
        }
    };

    debug!(command = %kind, "Executing command");

    match kind {
        CommandKind::AddItem => match decode::<Item>(kind, request.payload) {
            Ok(item) => engine.add_item(item),
            Err(response) => response,
        },
        CommandKind::AddVasItemToItem => match decode::<VasItem>(kind, request.payload) {
            Ok(vas_item) => engine.add_vas_item_to_item(vas_item.item_id, vas_item),
            Err(response) => response,
        },
        CommandKind::RemoveItem => match decode::<RemoveItemPayload>(kind, request.payload) {
            Ok(payload) => engine.remove_item(payload.item_id),
            Err(response) => response,
        },
        CommandKind::ResetCart => engine.reset_cart(),
        CommandKind::DisplayCart => engine.display_cart(),
    }
}

fn decode<T: DeserializeOwned>(kind: CommandKind, payload: Option<Value>) -> Result<T, CartResponse> {
    let invalid = || CartResponse::failure(format!("Invalid payload for {}.", kind));

    let value = match payload {
        Some(value) => value,
        None => {
            warn!(command = %kind, "Missing payload");
            return Err(invalid());
        }
    };

    serde_json::from_value(value).map_err(|e| {
        warn!(command = %kind, error = %e, "Rejected payload");
        invalid()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{Money, ResponseMessage};
    use checkout_store::MemoryStore;
    use serde_json::json;

    fn engine() -> CartEngine<MemoryStore> {
        CartEngine::new(MemoryStore::new())
    }

    fn add_item_request(item_id: i64, category_id: i64, price: f64, quantity: i64) -> CommandRequest {
        CommandRequest::new(
            "addItem",
            Some(json!({
                "itemId": item_id,
                "categoryId": category_id,
                "sellerId": 7,
                "price": price,
                "quantity": quantity
            })),
        )
    }

    #[test]
    fn test_command_names() {
        for kind in [
            CommandKind::AddItem,
            CommandKind::AddVasItemToItem,
            CommandKind::RemoveItem,
            CommandKind::ResetCart,
            CommandKind::DisplayCart,
        ] {
            assert_eq!(CommandKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(CommandKind::parse("AddItem"), None);
    }

    #[test]
    fn test_unknown_command() {
        let mut engine = engine();
        let response = execute(&mut engine, CommandRequest::new("checkout", None));

        assert_eq!(response, CartResponse::failure("Invalid command"));
        assert_eq!(engine.store().save_count(), 0);
    }

    #[test]
    fn test_add_item_command() {
        let mut engine = engine();
        let response = execute(&mut engine, add_item_request(1, 1001, 100.0, 2));

        assert_eq!(response, CartResponse::success("Item added to cart."));
        let cart = engine.store().load();
        assert_eq!(cart.total_amount, Money::from_major(200));
    }

    #[test]
    fn test_missing_payload() {
        let mut engine = engine();
        let response = execute(&mut engine, CommandRequest::new("addItem", None));
        assert_eq!(response, CartResponse::failure("Invalid payload for addItem."));
    }

    #[test]
    fn test_undecodable_payload() {
        let mut engine = engine();
        let request = CommandRequest::new("removeItem", Some(json!({ "id": 1 })));

        let response = execute(&mut engine, request);
        assert_eq!(response, CartResponse::failure("Invalid payload for removeItem."));
    }

    #[test]
    fn test_vas_command_uses_item_id_from_payload() {
        let mut engine = engine();
        execute(&mut engine, add_item_request(1, 1001, 100.0, 1));

        let request = CommandRequest::new(
            "addVasItemToItem",
            Some(json!({
                "itemId": 1,
                "vasItemId": 21,
                "vasCategoryId": 3242,
                "vasSellerId": 5003,
                "price": 12.5,
                "quantity": 1
            })),
        );

        assert_eq!(
            execute(&mut engine, request),
            CartResponse::success("VAS item added to item.")
        );
        let cart = engine.store().load();
        assert_eq!(cart.items[0].vas_items[0].price, Money::from_cents(1250));
    }

    #[test]
    fn test_remove_and_reset_commands() {
        let mut engine = engine();
        execute(&mut engine, add_item_request(1, 1001, 100.0, 1));
        execute(&mut engine, add_item_request(2, 1001, 100.0, 1));

        let response = execute(
            &mut engine,
            CommandRequest::new("removeItem", Some(json!({ "itemId": 2 }))),
        );
        assert_eq!(response, CartResponse::success("Item removed from cart."));

        // resetCart ignores whatever payload it is given
        let response = execute(&mut engine, CommandRequest::new("resetCart", Some(json!(42))));
        assert_eq!(response, CartResponse::success("Cart reset."));
        assert!(engine.store().load().items.is_empty());
    }

    #[test]
    fn test_display_command_returns_cart() {
        let mut engine = engine();
        execute(&mut engine, add_item_request(1, 3003, 100.0, 1));

        let response = execute(&mut engine, CommandRequest::new("displayCart", None));

        assert!(response.result);
        match response.message {
            ResponseMessage::Cart(cart) => assert_eq!(cart.total_amount, Money::from_major(95)),
            ResponseMessage::Text(text) => panic!("expected cart, got {}", text),
        }
    }

    #[test]
    fn test_request_decodes_without_payload() {
        let request: CommandRequest = serde_json::from_str(r#"{"command":"displayCart"}"#).unwrap();
        assert_eq!(request, CommandRequest::new("displayCart", None));
        assert_eq!(request.command_name(), Some("displayCart"));
    }

    #[test]
    fn test_missing_or_non_string_command() {
        let mut engine = engine();

        for raw in [r#"{"payload":{}}"#, r#"{"command":42}"#, r#"{"command":null}"#] {
            let request: CommandRequest = serde_json::from_str(raw).unwrap();
            assert_eq!(request.command_name(), None);
            assert_eq!(
                execute(&mut engine, request),
                CartResponse::failure("Invalid command")
            );
        }
        assert_eq!(engine.store().save_count(), 0);
    }
}
