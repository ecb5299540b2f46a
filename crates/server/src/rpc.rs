//! Message-pattern handler for broker transports.
//!
//! A request is `{"cmd": <pattern>, "payload": <json>}`; the reply is
//! `{"response": <json>}` on success or `{"err": {"status", "message"}}`.
//! The broker connection itself lives outside this crate.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use service::errors::ServiceError;
use service::pagination::PaginationDto;
use service::products::domain::{CreateProduct, UpdateProduct};

use crate::observability;
use crate::state::Products;

pub const CREATE_PRODUCT: &str = "create_product";
pub const FIND_ALL_PRODUCTS: &str = "find_all_products";
pub const FIND_ONE_PRODUCT: &str = "find_one_product";
pub const UPDATE_PRODUCT: &str = "update_product";
pub const DELETE_PRODUCT: &str = "delete_product";
pub const VALIDATE_PRODUCTS: &str = "validate_products";

const TRANSPORT: &str = "rpc";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RpcRequest {
    pub cmd: String,
    #[serde(default)]
    pub payload: Value,
}

/// Error carried back to the caller with an HTTP-style status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{status}: {message}")]
pub struct RpcError {
    pub status: u16,
    pub message: String,
}

impl RpcError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: 400, message: message.into() }
    }
}

impl From<ServiceError> for RpcError {
    fn from(e: ServiceError) -> Self {
        Self { status: e.status(), message: e.to_string() }
    }
}

#[derive(Debug, Deserialize)]
struct IdPayload {
    id: i32,
}

#[derive(Debug, Deserialize)]
struct UpdatePayload {
    id: i32,
    #[serde(flatten)]
    changes: UpdateProduct,
}

fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, RpcError> {
    serde_json::from_value(payload).map_err(|e| RpcError::bad_request(format!("invalid payload: {e}")))
}

#[derive(Clone)]
pub struct RpcHandler {
    products: Products,
}

impl RpcHandler {
    pub fn new(products: Products) -> Self { Self { products } }

    /// Dispatch one request to the product store.
    #[instrument(skip(self, req), fields(cmd = %req.cmd))]
    pub async fn handle(&self, req: RpcRequest) -> Result<Value, RpcError> {
        let (op, res) = match req.cmd.as_str() {
            CREATE_PRODUCT => {
                let input: CreateProduct = decode(req.payload)?;
                input.validate()?;
                ("create", self.products.create(input).await.map(|p| json!(p)))
            }
            FIND_ALL_PRODUCTS => {
                let pagination: PaginationDto = if req.payload.is_null() {
                    PaginationDto::default()
                } else {
                    decode(req.payload)?
                };
                pagination.validate()?;
                ("find_all", self.products.find_all(pagination).await.map(|page| json!(page)))
            }
            FIND_ONE_PRODUCT => {
                let IdPayload { id } = decode(req.payload)?;
                ("find_one", self.products.find_one(id).await.map(|p| json!(p)))
            }
            UPDATE_PRODUCT => {
                let UpdatePayload { id, changes } = decode(req.payload)?;
                changes.validate()?;
                ("update", self.products.update(id, changes).await.map(|p| json!(p)))
            }
            DELETE_PRODUCT => {
                let IdPayload { id } = decode(req.payload)?;
                ("remove", self.products.remove(id).await.map(|p| json!(p)))
            }
            VALIDATE_PRODUCTS => {
                let ids: Vec<i32> = decode(req.payload)?;
                ("validate_products", self.products.validate_products(&ids).await.map(|ps| json!(ps)))
            }
            other => {
                warn!(cmd = other, "unknown message pattern");
                return Err(RpcError::bad_request(format!("unknown pattern: {other}")));
            }
        };
        observability::record(op, TRANSPORT, &res, ServiceError::status);
        res.map_err(RpcError::from)
    }

    /// Decode a raw message, dispatch it and encode the reply envelope.
    pub async fn handle_message(&self, raw: &[u8]) -> Vec<u8> {
        let reply = match serde_json::from_slice::<RpcRequest>(raw) {
            Ok(req) => self.handle(req).await,
            Err(e) => Err(RpcError::bad_request(format!("malformed message: {e}"))),
        };
        let envelope = match reply {
            Ok(response) => json!({ "response": response }),
            Err(err) => {
                debug!(status = err.status, message = %err.message, "rpc error reply");
                json!({ "err": err })
            }
        };
        serde_json::to_vec(&envelope).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::state::ServerState;
    use service::products::repository::mock::InMemoryProductRepository;

    fn handler() -> RpcHandler {
        RpcHandler::new(ServerState::new(Arc::new(InMemoryProductRepository::default())).products)
    }

    fn req(cmd: &str, payload: Value) -> RpcRequest {
        RpcRequest { cmd: cmd.into(), payload }
    }

    #[tokio::test]
    async fn create_then_find_one() {
        let h = handler();
        let created = h.handle(req(CREATE_PRODUCT, json!({"name": "Pen", "price": 1.25}))).await.unwrap();
        assert_eq!(created["available"], true);
        let id = created["id"].clone();
        let found = h.handle(req(FIND_ONE_PRODUCT, json!({"id": id}))).await.unwrap();
        assert_eq!(found["name"], "Pen");
    }

    #[tokio::test]
    async fn missing_product_is_404() {
        let err = handler().handle(req(FIND_ONE_PRODUCT, json!({"id": 7}))).await.unwrap_err();
        assert_eq!(err, RpcError { status: 404, message: "Product with id #7 not found".into() });
    }

    #[tokio::test]
    async fn counters_use_store_operation_names() {
        let h = handler();
        let _ = h.handle(req(FIND_ONE_PRODUCT, json!({"id": 41}))).await;
        let _ = h.handle(req(DELETE_PRODUCT, json!({"id": 41}))).await;
        let counter = |op: &str| observability::PRODUCT_OPS_TOTAL.with_label_values(&[op, "rpc", "404"]).get();
        assert!(counter("find_one") >= 1);
        assert!(counter("remove") >= 1);
    }

    #[tokio::test]
    async fn update_targets_payload_id_and_delete_is_soft() {
        let h = handler();
        h.handle(req(CREATE_PRODUCT, json!({"name": "Pen", "price": 1.0}))).await.unwrap();
        let updated = h.handle(req(UPDATE_PRODUCT, json!({"id": 1, "price": 2.0}))).await.unwrap();
        assert_eq!(updated["price"], 2.0);
        assert_eq!(updated["name"], "Pen");

        let removed = h.handle(req(DELETE_PRODUCT, json!({"id": 1}))).await.unwrap();
        assert_eq!(removed["available"], false);
        let again = h.handle(req(DELETE_PRODUCT, json!({"id": 1}))).await.unwrap_err();
        assert_eq!(again.status, 404);
    }

    #[tokio::test]
    async fn validate_products_reports_invalid_argument() {
        let h = handler();
        for name in ["a", "b"] {
            h.handle(req(CREATE_PRODUCT, json!({"name": name, "price": 1.0}))).await.unwrap();
        }
        let ok = h.handle(req(VALIDATE_PRODUCTS, json!([1, 1, 2]))).await.unwrap();
        assert_eq!(ok.as_array().map(Vec::len), Some(2));

        let err = h.handle(req(VALIDATE_PRODUCTS, json!([1, 2, 999]))).await.unwrap_err();
        assert_eq!(err.status, 400);
        assert_eq!(err.message, "Some products were not found");
    }

    #[tokio::test]
    async fn find_all_defaults_and_meta() {
        let h = handler();
        for i in 0..3 {
            h.handle(req(CREATE_PRODUCT, json!({"name": format!("p{i}"), "price": 1.0}))).await.unwrap();
        }
        let page = h.handle(req(FIND_ALL_PRODUCTS, Value::Null)).await.unwrap();
        assert_eq!(page["meta"], json!({"totalPages": 3, "page": 1, "lastPage": 1}));
        let bad = h.handle(req(FIND_ALL_PRODUCTS, json!({"page": 0}))).await.unwrap_err();
        assert_eq!(bad.status, 400);
    }

    #[tokio::test]
    async fn bad_payloads_and_patterns_are_400() {
        let h = handler();
        assert_eq!(h.handle(req(FIND_ONE_PRODUCT, json!({"id": "x"}))).await.unwrap_err().status, 400);
        assert_eq!(h.handle(req(CREATE_PRODUCT, json!({"name": "", "price": 1.0}))).await.unwrap_err().status, 400);
        assert_eq!(h.handle(req("drop_table", Value::Null)).await.unwrap_err().status, 400);
    }

    #[tokio::test]
    async fn raw_messages_round_trip_through_envelopes() {
        let h = handler();
        let reply = h.handle_message(br#"{"cmd":"create_product","payload":{"name":"Cup","price":4}}"#).await;
        let v: Value = serde_json::from_slice(&reply).unwrap();
        assert_eq!(v["response"]["name"], "Cup");

        let reply = h.handle_message(b"not json").await;
        let v: Value = serde_json::from_slice(&reply).unwrap();
        assert_eq!(v["err"]["status"], 400);
    }
}
