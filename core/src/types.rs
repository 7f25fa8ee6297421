//! Domain DTOs for the inventory API.
//!
//! # Design
//! The inventory service owns the item schema. `InventoryItem` names the
//! fields that service is known to send (`id`, `name`, `category`,
//! `quantity`, `price`) and keeps any other field in `extra`. Values are
//! stored as raw JSON and only interpreted by the getters, so nothing the
//! server returns is lost or rejected on the client.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Server-assigned identifier. The service has used both numeric and string
/// ids, so either is accepted and rendered verbatim into the URL path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{n}"),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        ItemId::Number(n)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::Text(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId::Text(s)
    }
}

/// A single inventory record as exchanged with the server.
///
/// Named fields hold whatever JSON the server sent for them, explicit `null`
/// included, so a record always serializes back to the body it came from.
/// The typed getters return `None` when a value has another shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub category: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    /// Fields not named above, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A key that is present maps to `Some`, even when its value is `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl InventoryItem {
    pub fn named(name: impl Into<String>) -> Self {
        Self::default().with_field("name", name.into())
    }

    /// Set a field, routing the named ones to their struct member.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn with_category(self, category: impl Into<String>) -> Self {
        self.with_field("category", category.into())
    }

    pub fn with_quantity(self, quantity: i64) -> Self {
        self.with_field("quantity", quantity)
    }

    pub fn with_price(self, price: f64) -> Self {
        self.with_field("price", price)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        let slot = match key.as_str() {
            "id" => Some(&mut self.id),
            "name" => Some(&mut self.name),
            "category" => Some(&mut self.category),
            "quantity" => Some(&mut self.quantity),
            "price" => Some(&mut self.price),
            _ => None,
        };
        match slot {
            Some(slot) => *slot = Some(value),
            None => {
                self.extra.insert(key, value);
            }
        }
    }

    pub fn id(&self) -> Option<ItemId> {
        match self.id.as_ref()? {
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => ItemId::Number(i),
                None => ItemId::Text(n.to_string()),
            }),
            Value::String(s) => Some(ItemId::Text(s.clone())),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().and_then(Value::as_str)
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_ref().and_then(Value::as_str)
    }

    /// Whole-unit quantity; `None` for fractional or non-numeric values.
    pub fn quantity(&self) -> Option<i64> {
        self.quantity.as_ref().and_then(Value::as_i64)
    }

    pub fn price(&self) -> Option<f64> {
        self.price.as_ref().and_then(Value::as_f64)
    }
}

/// Query parameters for listing inventory. Empty by default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams(BTreeMap<String, String>);

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.insert(key.into(), value.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pairs in key order.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_id_accepts_number_or_string() {
        let n: ItemId = serde_json::from_value(json!(42)).unwrap();
        let s: ItemId = serde_json::from_value(json!("a1b2")).unwrap();
        assert_eq!(n, ItemId::Number(42));
        assert_eq!(s, ItemId::Text("a1b2".to_string()));
        assert_eq!(n.to_string(), "42");
        assert_eq!(s.to_string(), "a1b2");
    }

    #[test]
    fn new_item_omits_absent_fields() {
        let item = InventoryItem::named("apples").with_field("qty", 10);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json, json!({"name": "apples", "qty": 10}));
    }

    #[test]
    fn unknown_fields_survive_a_roundtrip() {
        let raw = json!({
            "id": 3,
            "name": "Carrots",
            "category": "vegetables",
            "quantity": 80,
            "price": 1.49,
            "location_id": "wh-1"
        });
        let item: InventoryItem = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(item.id(), Some(ItemId::Number(3)));
        assert_eq!(item.quantity(), Some(80));
        assert_eq!(item.price(), Some(1.49));
        assert_eq!(item.extra["location_id"], "wh-1");
        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }

    #[test]
    fn odd_shapes_and_nulls_are_kept() {
        let raw = json!({"id": "x-1", "name": "flour", "quantity": 2.5, "price": null});
        let item: InventoryItem = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(item.quantity, Some(json!(2.5)));
        assert_eq!(item.quantity(), None);
        assert_eq!(item.price, Some(Value::Null));
        assert_eq!(item.price(), None);
        assert_eq!(item.id(), Some(ItemId::Text("x-1".to_string())));
        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }

    #[test]
    fn named_keys_go_to_their_fields() {
        let item = InventoryItem::named("milk")
            .with_quantity(4)
            .with_field("price", 0.89)
            .with_field("unit", "l");
        assert_eq!(item.name(), Some("milk"));
        assert_eq!(item.quantity(), Some(4));
        assert_eq!(item.price(), Some(0.89));
        assert_eq!(item.extra.len(), 1);
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"name": "milk", "quantity": 4, "price": 0.89, "unit": "l"})
        );
    }

    #[test]
    fn list_params_sorted_by_key() {
        let params = ListParams::new().with("limit", 10).with("category", "fruits");
        assert_eq!(
            params.pairs(),
            vec![
                ("category".to_string(), "fruits".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
        assert!(ListParams::default().is_empty());
    }
}
