// pesanin-client/tests/common/mod.rs
// In-process fake of the Pesanin REST API

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use pesanin_client::{AppContext, ClientConfig, HistoryNavigator, MemoryStorage, SharedStorage};
use serde_json::{Value, json};

pub const VALID_TOKEN: &str = "tok-valid";
pub const PASSWORD: &str = "rahasia";
/// First bytes of a PNG file, served as the table QR code
pub const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

/// One request as it reached the server
#[derive(Debug, Clone)]
pub struct LoggedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

impl LoggedRequest {
    pub fn bearer(&self) -> bool {
        self.authorization == Some(format!("Bearer {VALID_TOKEN}"))
    }
}

/// What the fake server saw
#[derive(Default)]
pub struct Recorded {
    /// `Authorization` header of every request, in arrival order
    pub auth_headers: Vec<(String, Option<String>)>,
    /// Bodies posted to `/public/orders`
    pub orders: Vec<Value>,
    /// Every request, in arrival order
    pub requests: Vec<LoggedRequest>,
    /// Raw multipart bodies of image uploads
    pub uploads: Vec<Vec<u8>>,
    /// Bodies of order status updates
    pub status_updates: Vec<(String, Value)>,
}

impl Recorded {
    /// Last request whose path is `path`
    pub fn last(&self, path: &str) -> Option<&LoggedRequest> {
        self.requests.iter().rev().find(|r| r.path == path)
    }
}

pub type Shared = Arc<Mutex<Recorded>>;

fn record(state: &Shared, path: &str, headers: &HeaderMap) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state
        .lock()
        .unwrap()
        .auth_headers
        .push((path.to_string(), auth));
}

async fn log_request(State(state): State<Shared>, req: Request, next: Next) -> Response {
    let entry = {
        let value_of = |name: header::HeaderName| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        LoggedRequest {
            method: req.method().to_string(),
            path: req.uri().path().to_string(),
            query: req.uri().query().map(str::to_string),
            authorization: value_of(header::AUTHORIZATION),
            content_type: value_of(header::CONTENT_TYPE),
        }
    };
    state.lock().unwrap().requests.push(entry);
    next.run(req).await
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {VALID_TOKEN}"))
}

fn ok(data: Value) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": "OK", "data": data })),
    )
}

fn fail(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({ "success": false, "message": message })),
    )
}

pub fn user_json() -> Value {
    json!({
        "id": "u1",
        "name": "Sari",
        "email": "sari@pesanin.id",
        "role": "kasir",
        "created_at": 1_700_000_000,
        "updated_at": 1_700_000_000
    })
}

fn table_json(id: &str, number: i32) -> Value {
    json!({
        "id": id,
        "table_number": number,
        "barcode_url": format!("http://localhost:5173/customer/scan/{id}"),
        "status": "available",
        "created_at": 0,
        "updated_at": 0
    })
}

fn menu_json(id: &str) -> Option<Value> {
    let (name, price, available) = match id {
        "m1" => ("Nasi Goreng", 20000, true),
        "m2" => ("Es Teh", 5000, true),
        "m3" => ("Sate Kambing", 45000, false),
        _ => return None,
    };
    Some(json!({
        "id": id,
        "name": name,
        "description": "",
        "category_id": "c1",
        "category": { "id": "c1", "name": "Makanan" },
        "price": price,
        "stock": 10,
        "image_url": "/uploads/menu.png",
        "is_available": available,
        "created_at": 0,
        "updated_at": 0
    }))
}

fn payment_json(order_id: &str) -> Value {
    json!({
        "id": "p1",
        "order_id": order_id,
        "payment_method": "midtrans",
        "status": "pending",
        "amount": 65000,
        "snap_token": "snap-123",
        "snap_redirect_url": "https://app.sandbox.midtrans.com/snap/v2/vtweb/snap-123",
        "created_at": 1_700_000_000,
        "updated_at": 1_700_000_000
    })
}

fn order_json(id: &str, table_id: &str, total: i64, status: &str) -> Value {
    json!({
        "id": id,
        "table_id": table_id,
        "table": null,
        "user_id": null,
        "user": null,
        "total": total,
        "status": status,
        "notes": "",
        "order_items": [],
        "created_at": 1_700_000_000,
        "updated_at": 1_700_000_000
    })
}

async fn login(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    record(&state, "/auth/login", &headers);
    if body["password"] == PASSWORD {
        ok(json!({ "token": VALID_TOKEN, "user": user_json() }))
    } else {
        fail(StatusCode::UNAUTHORIZED, "Email atau password salah")
    }
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    record(&state, "/auth/me", &headers);
    if !authorized(&headers) {
        return fail(StatusCode::UNAUTHORIZED, "Token tidak valid");
    }
    let mut user = user_json();
    user["name"] = json!("Sari Wulandari");
    ok(user)
}

async fn staff_orders(State(state): State<Shared>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    record(&state, "/orders", &headers);
    if !authorized(&headers) {
        return fail(StatusCode::UNAUTHORIZED, "Token tidak valid");
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "OK",
            "data": [order_json("o1", "t1", 20000, "paid")],
            "pagination": { "page": 1, "page_size": 10, "total": 1, "total_pages": 1 }
        })),
    )
}

async fn public_table(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    record(&state, "/public/tables", &headers);
    match id.as_str() {
        "t1" => ok(table_json("t1", 1)),
        "t2" => ok(table_json("t2", 2)),
        _ => fail(StatusCode::NOT_FOUND, "Meja tidak ditemukan"),
    }
}

async fn public_menus(State(state): State<Shared>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    record(&state, "/public/menus", &headers);
    let menus: Vec<Value> = ["m1", "m2"].into_iter().filter_map(menu_json).collect();
    ok(Value::Array(menus))
}

async fn public_menu(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    record(&state, "/public/menus/{id}", &headers);
    match menu_json(&id) {
        Some(menu) => ok(menu),
        None => fail(StatusCode::NOT_FOUND, "Menu tidak ditemukan"),
    }
}

async fn create_order(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    record(&state, "/public/orders", &headers);

    let mut total = 0;
    for item in body["items"].as_array().into_iter().flatten() {
        let Some(menu) = item["menu_id"].as_str().and_then(menu_json) else {
            return fail(StatusCode::BAD_REQUEST, "Menu tidak valid");
        };
        total += menu["price"].as_i64().unwrap_or(0) * item["quantity"].as_i64().unwrap_or(0);
    }

    let mut recorded = state.lock().unwrap();
    recorded.orders.push(body.clone());
    let id = format!("o{}", recorded.orders.len());
    let table_id = body["table_id"].as_str().unwrap_or_default();
    ok(order_json(&id, table_id, total, "pending"))
}

async fn public_order(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    record(&state, "/public/orders/{id}", &headers);
    ok(order_json(&id, "t1", 20000, "cooking"))
}

async fn checkout_order(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    record(&state, "/public/orders/{id}/checkout", &headers);
    ok(payment_json(&id))
}

// ========== Staff routes ==========

fn unauthorized() -> (StatusCode, Json<Value>) {
    fail(StatusCode::UNAUTHORIZED, "Token tidak valid")
}

async fn payment_by_order(headers: HeaderMap, Path(order_id): Path<String>) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    match order_id.as_str() {
        "o1" => ok(payment_json("o1")),
        _ => fail(StatusCode::NOT_FOUND, "Pembayaran tidak ditemukan"),
    }
}

async fn upload_menu_image(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    let multipart = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));
    if !multipart {
        return fail(StatusCode::BAD_REQUEST, "Gambar wajib diunggah");
    }
    state.lock().unwrap().uploads.push(body.to_vec());

    let Some(mut menu) = menu_json(&id) else {
        return fail(StatusCode::NOT_FOUND, "Menu tidak ditemukan");
    };
    menu["image_url"] = json!(format!("/uploads/menus/{id}.png"));
    ok(menu)
}

async fn monthly_sales(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    let year: i32 = params.get("year").and_then(|v| v.parse().ok()).unwrap_or(2024);
    let month: u32 = params.get("month").and_then(|v| v.parse().ok()).unwrap_or(1);
    ok(json!({
        "year": year,
        "month": month,
        "total_orders": 42,
        "total_revenue": 1_250_000,
        "daily_sales": [
            { "date": format!("{year}-{month:02}-01"), "total": 250_000 },
            { "date": format!("{year}-{month:02}-02"), "total": 1_000_000 }
        ]
    }))
}

async fn transactions(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    ok(json!([{
        "id": "p1",
        "order_id": "o1",
        "table_number": 1,
        "total": 65000,
        "status": "success",
        "payment_method": "midtrans",
        "created_at": 1_700_000_000
    }]))
}

/// Answers with an empty body like the real endpoint; `o9` is already closed
async fn update_order_status(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized().into_response();
    }
    if id == "o9" {
        return (
            StatusCode::OK,
            Json(json!({ "success": false, "message": "Pesanan sudah selesai" })),
        )
            .into_response();
    }
    state.lock().unwrap().status_updates.push((id, body));
    StatusCode::OK.into_response()
}

async fn list_tables(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    let page: u32 = params.get("page").and_then(|v| v.parse().ok()).unwrap_or(1);
    let page_size: u32 = params.get("page_size").and_then(|v| v.parse().ok()).unwrap_or(10);
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "OK",
            "data": [table_json("t1", 1), table_json("t2", 2)],
            "pagination": { "page": page, "page_size": page_size, "total": 2, "total_pages": 1 }
        })),
    )
}

async fn create_table(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    let number = body["table_number"].as_i64().unwrap_or(0) as i32;
    if number <= 0 {
        return fail(StatusCode::BAD_REQUEST, "Nomor meja tidak valid");
    }
    ok(table_json("t3", number))
}

async fn get_table(headers: HeaderMap, Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    match id.as_str() {
        "t1" => ok(table_json("t1", 1)),
        "t2" => ok(table_json("t2", 2)),
        _ => fail(StatusCode::NOT_FOUND, "Meja tidak ditemukan"),
    }
}

async fn update_table(
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut table = table_json(&id, 1);
    if let Some(number) = body.get("table_number") {
        table["table_number"] = number.clone();
    }
    if let Some(status) = body.get("status") {
        table["status"] = status.clone();
    }
    ok(table)
}

async fn delete_table(headers: HeaderMap, Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    match id.as_str() {
        "t1" | "t2" => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Meja dihapus" })),
        ),
        _ => fail(StatusCode::NOT_FOUND, "Meja tidak ditemukan"),
    }
}

async fn table_qr(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized().into_response();
    }
    ([(header::CONTENT_TYPE, "image/png")], PNG_MAGIC).into_response()
}

/// Serve the fake API on an ephemeral port
pub async fn spawn_server() -> (String, Shared) {
    let state = Shared::default();
    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/orders", get(staff_orders))
        .route("/public/tables/{id}", get(public_table))
        .route("/public/menus", get(public_menus))
        .route("/public/menus/{id}", get(public_menu))
        .route("/public/orders", post(create_order))
        .route("/public/orders/{id}", get(public_order))
        .route("/public/orders/{id}/checkout", post(checkout_order))
        .route("/payments/order/{order_id}", get(payment_by_order))
        .route("/menus/{id}/upload-image", post(upload_menu_image))
        .route("/reports/sales/monthly", get(monthly_sales))
        .route("/reports/transactions", get(transactions))
        .route("/orders/{id}/status", patch(update_order_status))
        .route("/tables", get(list_tables).post(create_table))
        .route(
            "/tables/{id}",
            get(get_table).put(update_table).delete(delete_table),
        )
        .route("/tables/{id}/qr", get(table_qr))
        .layer(middleware::from_fn_with_state(state.clone(), log_request))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), state)
}

/// Context over `storage` talking to `base_url`, already hydrated
pub async fn context(
    base_url: &str,
    storage: SharedStorage,
    start: &str,
) -> (AppContext, Arc<HistoryNavigator>) {
    let config = ClientConfig::new(base_url)
        .with_timeout(5)
        .with_scan_redirect_delay(std::time::Duration::ZERO);
    let navigator = Arc::new(HistoryNavigator::new(start));
    let ctx = AppContext::bootstrap(config, storage, navigator.clone())
        .await
        .unwrap();
    (ctx, navigator)
}

pub async fn memory_context(base_url: &str, start: &str) -> (AppContext, Arc<HistoryNavigator>) {
    context(base_url, MemoryStorage::shared(), start).await
}
