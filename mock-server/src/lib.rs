//! In-memory stand-in for the inventory service.
//!
//! Items are schema-less JSON objects keyed by a server-assigned id. The
//! routes and status codes follow the real service closely enough for the
//! client's integration tests and for local front-end work.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

pub type Item = Map<String, Value>;

pub type Db = Arc<RwLock<BTreeMap<String, Item>>>;

pub fn app() -> Router {
    app_with(Db::default())
}

pub fn app_with(db: Db) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(health))
        .route("/inventory", get(list_items).post(create_item))
        .route(
            "/inventory/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

/// A store preloaded with a few produce items, for running the binary by hand.
pub fn seeded_db() -> Db {
    let seed = [
        json!({"name": "Apples", "category": "fruits", "quantity": 150, "price": 1.99}),
        json!({"name": "Bananas", "category": "fruits", "quantity": 200, "price": 0.99}),
        json!({"name": "Carrots", "category": "vegetables", "quantity": 80, "price": 1.49}),
    ];
    let items: BTreeMap<String, Item> = seed
        .into_iter()
        .filter_map(|value| match value {
            Value::Object(item) => Some(with_new_id(item)),
            _ => None,
        })
        .collect();
    Arc::new(RwLock::new(items))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Db::default()).await
}

pub async fn run_with(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(db)).await
}

#[derive(Debug)]
pub enum ServerError {
    NotFound,
    BadRequest(String),
    Rejected(JsonRejection),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Rejected(rejection) => (rejection.status(), rejection.body_text()),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_items(
    State(db): State<Db>,
    Query(filter): Query<HashMap<String, String>>,
) -> Json<Vec<Item>> {
    let items = db.read().await;
    Json(
        items
            .values()
            .filter(|item| matches_filter(item, &filter))
            .cloned()
            .collect(),
    )
}

async fn create_item(
    State(db): State<Db>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), ServerError> {
    let (id, item) = with_new_id(object_body(body)?);
    db.write().await.insert(id, item.clone());
    Ok((StatusCode::CREATED, Json(item)))
}

async fn get_item(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Item>, ServerError> {
    let items = db.read().await;
    items.get(&id).cloned().map(Json).ok_or(ServerError::NotFound)
}

async fn update_item(
    State(db): State<Db>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Item>, ServerError> {
    let fields = object_body(body)?;
    let mut items = db.write().await;
    let item = items.get_mut(&id).ok_or(ServerError::NotFound)?;
    for (key, value) in fields {
        if key != "id" {
            item.insert(key, value);
        }
    }
    Ok(Json(item.clone()))
}

async fn delete_item(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let mut items = db.write().await;
    items
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(ServerError::NotFound)
}

fn object_body(body: Result<Json<Value>, JsonRejection>) -> Result<Item, ServerError> {
    match body.map_err(ServerError::Rejected)? {
        Json(Value::Object(item)) => Ok(item),
        Json(_) => Err(ServerError::BadRequest(
            "expected a JSON object".to_string(),
        )),
    }
}

fn with_new_id(mut item: Item) -> (String, Item) {
    let id = Uuid::new_v4().to_string();
    item.insert("id".to_string(), Value::String(id.clone()));
    (id, item)
}

/// Every filter pair must equal the item's field; non-string fields compare
/// by their JSON text.
fn matches_filter(item: &Item, filter: &HashMap<String, String>) -> bool {
    filter.iter().all(|(key, expected)| match item.get(key) {
        Some(Value::String(s)) => s == expected,
        Some(other) => other.to_string() == *expected,
        None => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(value: Value) -> Item {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn new_id_is_added_to_body() {
        let (id, stored) = with_new_id(item(json!({"name": "apples", "qty": 10})));
        assert_eq!(stored["id"], Value::String(id.clone()));
        assert_eq!(stored["name"], "apples");
        assert_eq!(stored["qty"], 10);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn filter_matches_strings_and_numbers() {
        let apples = item(json!({"name": "Apples", "category": "fruits", "quantity": 150}));
        let mut filter = HashMap::new();
        assert!(matches_filter(&apples, &filter));

        filter.insert("category".to_string(), "fruits".to_string());
        filter.insert("quantity".to_string(), "150".to_string());
        assert!(matches_filter(&apples, &filter));

        filter.insert("category".to_string(), "vegetables".to_string());
        assert!(!matches_filter(&apples, &filter));
    }

    #[test]
    fn filter_on_missing_field_excludes() {
        let apples = item(json!({"name": "Apples"}));
        let filter = HashMap::from([("location".to_string(), "wh-1".to_string())]);
        assert!(!matches_filter(&apples, &filter));
    }

    #[test]
    fn seeded_db_has_three_items() {
        let db = seeded_db();
        let items = db.try_read().unwrap();
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|(id, item)| item["id"] == *id));
    }
}
