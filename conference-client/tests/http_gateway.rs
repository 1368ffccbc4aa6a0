//! HTTP gateway against an in-process API server

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use conference::{
    ConferenceCommand, ConferenceError, ConferenceSession, ConferenceStatus, GatewayError, OrderGateway,
    ScanDebounceConfig, StatusMapping,
};
use conference_client::{ClientConfig, ClientError, ConferenceFilter, HttpClient};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const TOKEN: &str = "test-token";

#[derive(Clone, Default)]
struct ApiState {
    orders: Arc<Mutex<HashMap<String, Value>>>,
    puts: Arc<Mutex<Vec<Value>>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN))
}

async fn list(State(state): State<ApiState>, headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let orders: Vec<Value> = state.orders.lock().unwrap().values().cloned().collect();
    Ok(Json(json!({ "conferencias": orders, "count": orders.len() })))
}

async fn fetch(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    state
        .orders
        .lock()
        .unwrap()
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Mimics a document store: stores the body, bumps `__v`, answers with the
/// previous document
async fn replace(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, String)> {
    if !authorized(&headers) {
        return Err((StatusCode::UNAUTHORIZED, String::new()));
    }
    state.puts.lock().unwrap().push(body.clone());

    let quantities_ok = body["Itens"]
        .as_array()
        .is_some_and(|items| items.iter().all(|i| i["QuantidadeConferida"].as_u64() <= i["Quantidade"].as_u64()));
    if !quantities_ok {
        return Err((StatusCode::BAD_REQUEST, "QuantidadeConferida invalid".into()));
    }

    let mut orders = state.orders.lock().unwrap();
    let previous = orders
        .get(&id)
        .cloned()
        .ok_or((StatusCode::NOT_FOUND, String::new()))?;

    let mut next = body;
    next["_id"] = json!(id);
    next["__v"] = json!(previous["__v"].as_u64().unwrap_or(0) + 1);
    next["createdAt"] = previous["createdAt"].clone();
    orders.insert(id, next);
    Ok(Json(previous))
}

fn sample() -> Value {
    json!({
        "_id": "66a1f0c2b3d4e5f601234567",
        "Numero": "1042",
        "CnpjTransportadora": "12345678000190",
        "status": null,
        "createdAt": "2024-07-01T10:00:00.000Z",
        "updatedAt": "2024-07-01T10:00:00.000Z",
        "__v": 0,
        "Itens": [
            {
                "_id": "66a1f0c2b3d4e5f601234568",
                "Produto": { "Partnumber": "PN-100", "Descricao": "Parafuso", "Ean13": "7891000100103" },
                "Quantidade": 2,
                "QuantidadeConferida": 0,
                "Observacao": null
            },
            {
                "_id": "66a1f0c2b3d4e5f601234569",
                "Produto": { "Partnumber": "PN-200", "Descricao": "Porca", "Ean13": "7891000200200" },
                "Quantidade": 1,
                "QuantidadeConferida": 0,
                "Observacao": null
            }
        ]
    })
}

async fn serve() -> (String, ApiState) {
    let state = ApiState::default();
    state
        .orders
        .lock()
        .unwrap()
        .insert("66a1f0c2b3d4e5f601234567".into(), sample());

    let app = Router::new()
        .route("/api/conferencias", get(list))
        .route("/api/conferencias/{id}", get(fetch).put(replace))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}/api", addr), state)
}

fn client(base_url: &str) -> HttpClient {
    HttpClient::new(&ClientConfig::new(base_url).with_token(TOKEN)).unwrap()
}

fn mapping() -> StatusMapping {
    StatusMapping::new("st-pending", "st-progress", "st-final")
}

#[tokio::test]
async fn test_fetch_and_list() {
    let (base_url, _state) = serve().await;
    let client = client(&base_url);

    let order = client.fetch_conference("66a1f0c2b3d4e5f601234567").await.unwrap();
    assert_eq!(order.number(), Some("1042"));
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].product.part_number, "PN-100");

    let list = client.list_conferences(&ConferenceFilter::default()).await.unwrap();
    assert_eq!(list.count, 1);
    assert_eq!(list.orders[0].id, "66a1f0c2b3d4e5f601234567");
}

#[tokio::test]
async fn test_error_statuses() {
    let (base_url, _state) = serve().await;

    let anonymous = HttpClient::new(&ClientConfig::new(&base_url)).unwrap();
    assert!(matches!(
        anonymous.fetch_conference("66a1f0c2b3d4e5f601234567").await,
        Err(ClientError::Unauthorized)
    ));

    let err = client(&base_url).fetch_order("missing").await.unwrap_err();
    assert!(matches!(err, GatewayError::NotFound(_)));
}

#[tokio::test]
async fn test_replace_strips_server_fields() {
    let (base_url, state) = serve().await;
    let client = client(&base_url);

    let mut order = client.fetch_order("66a1f0c2b3d4e5f601234567").await.unwrap();
    order.items[0].conferred_quantity = 1;
    let stored = client
        .replace_order("66a1f0c2b3d4e5f601234567", &order, 0)
        .await
        .unwrap();

    // Read back after the write, not the previous document from the PUT
    assert_eq!(stored.version, 1);
    assert_eq!(stored.items[0].conferred_quantity, 1);

    let puts = state.puts.lock().unwrap();
    let body = &puts[0];
    for key in ["_id", "__v", "createdAt", "updatedAt"] {
        assert!(body.get(key).is_none(), "{} sent", key);
    }
    assert!(body["Itens"][0].get("_id").is_none());
    assert_eq!(body["CnpjTransportadora"], "12345678000190");
}

#[tokio::test]
async fn test_replace_with_stale_version() {
    let (base_url, state) = serve().await;
    let client = client(&base_url);

    let order = client.fetch_order("66a1f0c2b3d4e5f601234567").await.unwrap();
    client
        .replace_order("66a1f0c2b3d4e5f601234567", &order, 0)
        .await
        .unwrap();

    let err = client
        .replace_order("66a1f0c2b3d4e5f601234567", &order, 0)
        .await
        .unwrap_err();
    assert_eq!(err, GatewayError::Conflict { expected: 0, actual: 1 });
    assert_eq!(state.puts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_session_over_http() {
    let (base_url, state) = serve().await;
    let gateway = Arc::new(client(&base_url));

    let mut session = ConferenceSession::open(
        gateway,
        mapping(),
        "66a1f0c2b3d4e5f601234567",
        ScanDebounceConfig::default(),
    )
    .await
    .unwrap();

    session
        .execute(ConferenceCommand::SetQuantity {
            item_index: 0,
            quantity: 2,
        })
        .await
        .unwrap();
    let response = session
        .execute(ConferenceCommand::Increment { item_index: 1 })
        .await
        .unwrap();
    assert_eq!(response.status, ConferenceStatus::Finalized);

    let stored = state.orders.lock().unwrap()["66a1f0c2b3d4e5f601234567"].clone();
    assert_eq!(stored["status"], "st-final");
    assert_eq!(stored["__v"], 2);
    assert_eq!(stored["Itens"][1]["QuantidadeConferida"], 1);
}

#[tokio::test]
async fn test_session_reports_server_rejection() {
    let (base_url, state) = serve().await;
    let gateway = Arc::new(client(&base_url));
    let mut session = ConferenceSession::open(
        gateway,
        mapping(),
        "66a1f0c2b3d4e5f601234567",
        ScanDebounceConfig::default(),
    )
    .await
    .unwrap();

    // Corrupt a stored quantity without bumping the version
    {
        let mut orders = state.orders.lock().unwrap();
        if let Some(order) = orders.get_mut("66a1f0c2b3d4e5f601234567") {
            order["Itens"][1]["QuantidadeConferida"] = json!(5);
        }
    }

    let err = session
        .execute(ConferenceCommand::Increment { item_index: 0 })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ConferenceError::Gateway(GatewayError::Validation(_))
    ));
    assert_eq!(session.order().items[0].conferred_quantity, 0);
}
