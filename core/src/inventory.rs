//! CRUD operations on the `/inventory` collection.
//!
//! Each operation has a pure `build_*` half that produces the `HttpRequest`
//! and an async half that sends it through the owning `ApiClient` and returns
//! the decoded body, never the transport envelope.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::transport::Transport;
use crate::types::{InventoryItem, ItemId, ListParams};

pub const INVENTORY_PATH: &str = "/inventory";

pub struct InventoryApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> InventoryApi<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub fn build_get_all(&self, params: &ListParams) -> HttpRequest {
        let mut request = self.client.request(HttpMethod::Get, INVENTORY_PATH);
        request.query = params.pairs();
        request
    }

    pub fn build_get_by_id(&self, id: &ItemId) -> HttpRequest {
        self.client.request(HttpMethod::Get, item_path(id))
    }

    pub fn build_create(&self, item: &InventoryItem) -> Result<HttpRequest, ApiError> {
        let mut request = self.client.request(HttpMethod::Post, INVENTORY_PATH);
        request.body = Some(encode(item)?);
        Ok(request)
    }

    pub fn build_update(&self, id: &ItemId, item: &InventoryItem) -> Result<HttpRequest, ApiError> {
        let mut request = self.client.request(HttpMethod::Put, item_path(id));
        request.body = Some(encode(item)?);
        Ok(request)
    }

    pub fn build_delete(&self, id: &ItemId) -> HttpRequest {
        self.client.request(HttpMethod::Delete, item_path(id))
    }

    pub async fn get_all(&self, params: &ListParams) -> Result<Vec<InventoryItem>, ApiError> {
        self.client.execute(self.build_get_all(params)).await
    }

    pub async fn get_by_id(&self, id: impl Into<ItemId>) -> Result<InventoryItem, ApiError> {
        self.client.execute(self.build_get_by_id(&id.into())).await
    }

    pub async fn create(&self, item: &InventoryItem) -> Result<InventoryItem, ApiError> {
        self.client.execute(self.build_create(item)?).await
    }

    pub async fn update(
        &self,
        id: impl Into<ItemId>,
        item: &InventoryItem,
    ) -> Result<InventoryItem, ApiError> {
        self.client.execute(self.build_update(&id.into(), item)?).await
    }

    /// Returns the server's acknowledgement as sent; `null` when the body is
    /// empty.
    pub async fn delete(&self, id: impl Into<ItemId>) -> Result<Value, ApiError> {
        self.client.execute(self.build_delete(&id.into())).await
    }
}

fn item_path(id: &ItemId) -> String {
    format!("{INVENTORY_PATH}/{id}")
}

fn encode(item: &InventoryItem) -> Result<String, ApiError> {
    serde_json::to_string(item).map_err(|e| ApiError::Request(e.to_string()))
}
