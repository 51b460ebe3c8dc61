use std::{collections::BTreeMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, Method, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemList {
    pub items: Vec<Item>,
}

#[derive(Deserialize)]
pub struct CreateItem {
    pub name: String,
}

/// What the server saw of a request sent to `/echo`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub query: BTreeMap<String, String>,
    pub body: String,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct SlowQuery {
    #[serde(default)]
    pub ms: u64,
}

/// Status for `/raw` and `/big`; anything outside 100..=999 is a 400.
#[derive(Deserialize)]
pub struct StatusQuery {
    #[serde(default = "ok_status")]
    pub status: u16,
}

#[derive(Deserialize)]
pub struct BigQuery {
    pub count: usize,
    #[serde(default = "ok_status")]
    pub status: u16,
}

fn ok_status() -> u16 {
    200
}

/// Bytes served by `/raw`: Latin-1 text that is not valid UTF-8.
pub const RAW_BODY: &[u8] = &[0xFF, 0xFE, 0xE9, 0xE8, 0x41];

/// Length of every item name served by `/big`.
pub const BIG_NAME_LEN: usize = 64;

pub type Db = Arc<RwLock<Vec<Item>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", get(get_item))
        .route("/echo", get(echo).post(echo))
        .route("/text", get(text))
        .route("/slow", get(slow))
        .route("/raw", get(raw))
        .route("/big", get(big))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_items(State(db): State<Db>, Query(query): Query<ListQuery>) -> Json<ItemList> {
    let items = db.read().await;
    let limit = query.limit.unwrap_or(usize::MAX);
    Json(ItemList {
        items: items.iter().take(limit).cloned().collect(),
    })
}

async fn create_item(
    State(db): State<Db>,
    Json(input): Json<CreateItem>,
) -> (StatusCode, Json<Item>) {
    let mut items = db.write().await;
    let item = Item {
        id: items.len() as u64 + 1,
        name: input.name,
    };
    items.push(item.clone());
    (StatusCode::CREATED, Json(item))
}

async fn get_item(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Item>, StatusCode> {
    let items = db.read().await;
    items
        .iter()
        .find(|item| item.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn echo(
    method: Method,
    headers: HeaderMap,
    Query(query): Query<BTreeMap<String, String>>,
    body: String,
) -> Json<Echo> {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    Json(Echo {
        method: method.as_str().to_string(),
        headers,
        query,
        body,
    })
}

async fn text() -> &'static str {
    "plain text, not json"
}

async fn slow(Query(query): Query<SlowQuery>) -> Json<ItemList> {
    tokio::time::sleep(Duration::from_millis(query.ms)).await;
    Json(ItemList::default())
}

async fn raw(Query(query): Query<StatusQuery>) -> Result<(StatusCode, Vec<u8>), StatusCode> {
    let status = StatusCode::from_u16(query.status).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((status, RAW_BODY.to_vec()))
}

/// `count` items with `BIG_NAME_LEN`-byte names, under any status.
async fn big(Query(query): Query<BigQuery>) -> Result<(StatusCode, Json<ItemList>), StatusCode> {
    let status = StatusCode::from_u16(query.status).map_err(|_| StatusCode::BAD_REQUEST)?;
    let items = (1..=query.count as u64)
        .map(|id| Item {
            id,
            name: "x".repeat(BIG_NAME_LEN),
        })
        .collect();
    Ok((status, Json(ItemList { items })))
}
