//! # Invoke Loop
//!
//! Line-delimited JSON bridge between the UI process and the commands.
//!
//! ## Wire Format
//! ```text
//! stdin  (one request per line)
//!   {"command": "add_to_cart", "args": {"item": {...}}}
//!   {"command": "get_cart"}
//!
//! stdout (one response per line, same order)
//!   {"ok": {"items": [...], "totals": {...}}}
//!   {"error": {"code": "UNKNOWN_COMMAND", "message": "Unknown command: x"}}
//! ```
//!
//! | Command            | Args                                   |
//! |--------------------|----------------------------------------|
//! | `get_cart`         | none                                   |
//! | `add_to_cart`      | `item` (NewCartItem)                   |
//! | `update_cart_item` | `lineId`, `quantity`                   |
//! | `remove_from_cart` | `lineId`                               |
//! | `clear_cart`       | none                                   |
//! | `inspect_card`     | `number`                               |
//! | `checkout`         | `card`, `billingAddress`               |
//! | `get_config`       | none                                   |
//!
//! Requests are handled one at a time, in arrival order. Logs go to stderr,
//! so stdout carries nothing but responses.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, warn};

use atelier_core::{BillingAddress, CardDetails, NewCartItem};

use crate::commands;
use crate::error::ApiError;
use crate::Storefront;

/// A decoded request line.
#[derive(Debug, Clone, Deserialize)]
pub struct InvokeRequest {
    pub command: String,
    #[serde(default)]
    pub args: Value,
}

/// One response line: `{"ok": ...}` or `{"error": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InvokeResponse {
    Ok(Value),
    Error(ApiError),
}

impl From<Result<Value, ApiError>> for InvokeResponse {
    fn from(result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(value) => InvokeResponse::Ok(value),
            Err(err) => InvokeResponse::Error(err),
        }
    }
}

// =============================================================================
// Command Arguments
// =============================================================================

#[derive(Deserialize)]
struct AddToCartArgs {
    item: NewCartItem,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateCartItemArgs {
    line_id: String,
    quantity: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoveFromCartArgs {
    line_id: String,
}

#[derive(Deserialize)]
struct InspectCardArgs {
    number: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutArgs {
    card: CardDetails,
    billing_address: BillingAddress,
}

fn decode_args<T: DeserializeOwned>(args: Value) -> Result<T, ApiError> {
    let args = match args {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(args).map_err(|e| ApiError::invalid_arguments(format!("Invalid arguments: {}", e)))
}

fn to_value<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(format!("Failed to encode response: {}", e)))
}

// =============================================================================
// Dispatch
// =============================================================================

/// Routes a request to its command.
pub async fn dispatch(app: &Storefront, request: InvokeRequest) -> Result<Value, ApiError> {
    let InvokeRequest { command, args } = request;

    match command.as_str() {
        "get_cart" => to_value(commands::cart::get_cart(&app.cart).await),
        "add_to_cart" => {
            let AddToCartArgs { item } = decode_args(args)?;
            to_value(commands::cart::add_to_cart(&app.cart, item).await)
        }
        "update_cart_item" => {
            let UpdateCartItemArgs { line_id, quantity } = decode_args(args)?;
            to_value(commands::cart::update_cart_item(&app.cart, &line_id, quantity).await)
        }
        "remove_from_cart" => {
            let RemoveFromCartArgs { line_id } = decode_args(args)?;
            to_value(commands::cart::remove_from_cart(&app.cart, &line_id).await)
        }
        "clear_cart" => to_value(commands::cart::clear_cart(&app.cart).await),
        "inspect_card" => {
            let InspectCardArgs { number } = decode_args(args)?;
            to_value(commands::card::inspect_card(&number))
        }
        "checkout" => {
            let CheckoutArgs { card, billing_address } = decode_args(args)?;
            let confirmation = commands::checkout::checkout(
                &app.cart,
                &app.config,
                &app.payments,
                card,
                billing_address,
            )
            .await?;
            to_value(confirmation)
        }
        "get_config" => to_value(commands::config::get_config(&app.config)),
        other => Err(ApiError::unknown_command(other)),
    }
}

/// Decodes and runs one request line.
pub async fn handle_line(app: &Storefront, line: &str) -> InvokeResponse {
    let request: InvokeRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            return InvokeResponse::Error(ApiError::invalid_arguments(format!(
                "Malformed request: {}",
                e
            )))
        }
    };

    debug!(command = %request.command, "Dispatching command");
    dispatch(app, request).await.into()
}

/// Serves requests from `reader` until it is exhausted.
///
/// A line that is not UTF-8 gets an `INVALID_ARGUMENTS` reply like any other
/// undecodable request; only I/O failures end the loop.
pub async fn serve<R, W>(app: &Storefront, mut reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => handle_line(app, line.trim_end_matches(|c| c == '\n' || c == '\r')).await,
            Err(e) => {
                warn!(error = %e, "Request line is not valid UTF-8");
                InvokeResponse::Error(ApiError::invalid_arguments(format!(
                    "Malformed request: {}",
                    e
                )))
            }
        };

        let mut encoded = encode(&response);
        encoded.push('\n');

        writer.write_all(encoded.as_bytes()).await?;
        writer.flush().await?;
    }

    info!("Input closed, shutting down");
    Ok(())
}

fn encode(response: &InvokeResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        error!("Failed to encode response: {}", e);
        r#"{"error":{"code":"INTERNAL","message":"Failed to encode response"}}"#.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ConfigState;
    use atelier_store::SnapshotStore;
    use serde_json::json;

    async fn app() -> Storefront {
        let config = ConfigState {
            payment_latency_ms: 0,
            ..ConfigState::default()
        };
        Storefront::with_store(config, SnapshotStore::memory()).await
    }

    async fn call(app: &Storefront, request: Value) -> Value {
        let response = handle_line(app, &request.to_string()).await;
        serde_json::to_value(response).unwrap()
    }

    fn earring() -> Value {
        json!({
            "productId": "ear-07",
            "variantId": "ear-07-silver",
            "name": "Silver Drop Earrings",
            "price": 3600,
            "quantity": 2,
            "attributes": {"finish": "oxidized"}
        })
    }

    #[tokio::test]
    async fn test_cart_round_trip() {
        let app = app().await;

        let added = call(&app, json!({"command": "add_to_cart", "args": {"item": earring()}})).await;
        assert_eq!(added["ok"]["totals"]["itemCount"], 2);
        assert_eq!(added["ok"]["totals"]["subtotal"], 7200);
        let line_id = added["ok"]["items"][0]["id"].as_str().unwrap().to_string();

        let updated = call(
            &app,
            json!({"command": "update_cart_item", "args": {"lineId": line_id, "quantity": 5}}),
        )
        .await;
        assert_eq!(updated["ok"]["totals"]["itemCount"], 5);

        let removed = call(&app, json!({"command": "remove_from_cart", "args": {"lineId": line_id}})).await;
        assert_eq!(removed["ok"]["items"], json!([]));

        let cart = call(&app, json!({"command": "get_cart"})).await;
        assert_eq!(cart["ok"]["totals"]["itemCount"], 0);
    }

    #[tokio::test]
    async fn test_item_without_attributes_or_quantity() {
        let app = app().await;
        let item = json!({
            "productId": "ear-07",
            "variantId": "ear-07-silver",
            "name": "Silver Drop Earrings",
            "price": 3600
        });

        call(&app, json!({"command": "add_to_cart", "args": {"item": item.clone()}})).await;
        let mut with_empty = item;
        with_empty["attributes"] = json!({});
        let response = call(&app, json!({"command": "add_to_cart", "args": {"item": with_empty}})).await;

        assert_eq!(response["ok"]["items"].as_array().unwrap().len(), 1);
        assert_eq!(response["ok"]["items"][0]["quantity"], 2);
    }

    #[tokio::test]
    async fn test_checkout_through_invoke() {
        let app = app().await;
        call(&app, json!({"command": "add_to_cart", "args": {"item": earring()}})).await;

        let response = call(
            &app,
            json!({
                "command": "checkout",
                "args": {
                    "card": {
                        "number": "4532 0151 1283 0366",
                        "holderName": "Lio Brandt",
                        "expiry": "11/39",
                        "cvv": "321"
                    },
                    "billingAddress": {
                        "name": "Lio Brandt",
                        "line1": "3 Anvil Court",
                        "city": "Santa Fe",
                        "state": "NM",
                        "postalCode": "87501",
                        "country": "US"
                    }
                }
            }),
        )
        .await;

        assert_eq!(response["ok"]["amountFormatted"], "$72.00");
        assert_eq!(response["ok"]["cardMasked"], "•••• 0366");
        assert_eq!(response["ok"]["cardIssuer"], "Visa");

        let cart = call(&app, json!({"command": "get_cart"})).await;
        assert_eq!(cart["ok"]["items"], json!([]));
    }

    #[tokio::test]
    async fn test_inspect_card_and_config() {
        let app = app().await;

        let card = call(&app, json!({"command": "inspect_card", "args": {"number": "5105105105105100"}})).await;
        assert_eq!(card["ok"]["issuer"], "Mastercard");
        assert_eq!(card["ok"]["isValid"], true);

        let config = call(&app, json!({"command": "get_config"})).await;
        assert_eq!(config["ok"]["currencyCode"], "USD");
    }

    #[tokio::test]
    async fn test_errors() {
        let app = app().await;

        let unknown = call(&app, json!({"command": "ship_it"})).await;
        assert_eq!(unknown["error"]["code"], "UNKNOWN_COMMAND");

        let bad_args = call(&app, json!({"command": "update_cart_item", "args": {"lineId": "x"}})).await;
        assert_eq!(bad_args["error"]["code"], "INVALID_ARGUMENTS");

        let malformed = serde_json::to_value(handle_line(&app, "{not json").await).unwrap();
        assert_eq!(malformed["error"]["code"], "INVALID_ARGUMENTS");

        let empty = call(&app, json!({"command": "checkout", "args": {
            "card": {"number": "", "holderName": "", "expiry": "", "cvv": ""},
            "billingAddress": {"name": "", "line1": "", "city": "", "state": "", "postalCode": "", "country": ""}
        }}))
        .await;
        assert_eq!(empty["error"]["code"], "CART_ERROR");
    }

    #[tokio::test]
    async fn test_serve_writes_one_line_per_request() {
        let app = app().await;
        let input = concat!(
            r#"{"command": "get_cart"}"#,
            "\n\n",
            r#"{"command": "nope"}"#,
            "\n"
        );
        let mut output = Vec::new();

        serve(&app, input.as_bytes(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].get("ok").is_some());
        assert_eq!(lines[1]["error"]["code"], "UNKNOWN_COMMAND");
    }

    #[tokio::test]
    async fn test_serve_survives_non_utf8_line() {
        let app = app().await;
        let mut input = Vec::new();
        input.extend_from_slice(b"{\"command\": \"get_cart\"}\n");
        input.extend_from_slice(&[0xff, 0xfe, b'\n']);
        input.extend_from_slice(b"{\"command\": \"get_cart\"}\r\n");
        let mut output = Vec::new();

        serve(&app, input.as_slice(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].get("ok").is_some());
        assert_eq!(lines[1]["error"]["code"], "INVALID_ARGUMENTS");
        assert!(lines[2].get("ok").is_some());
    }

    #[tokio::test]
    async fn test_serve_handles_last_line_without_newline() {
        let app = app().await;
        let mut output = Vec::new();

        serve(&app, r#"{"command": "get_config"}"#.as_bytes(), &mut output).await.unwrap();

        let reply: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(reply["ok"]["currencyCode"], "USD");
    }
}
