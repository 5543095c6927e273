//! Storefront sessions against a fake REST backend on an ephemeral port.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use checkout::SubmissionState;
use common::ItemId;
use serde_json::{Value, json};
use storefront::{Backend, Config, HttpStorefrontClient, Notice, StorefrontSession};

#[derive(Default)]
struct FakeState {
    fruits: Vec<Value>,
    orders: Vec<Value>,
    fail_orders: bool,
    order_posts: usize,
}

type Shared = Arc<Mutex<FakeState>>;

async fn list_fruits(State(state): State<Shared>) -> Json<Value> {
    Json(Value::Array(state.lock().unwrap().fruits.clone()))
}

async fn list_orders(State(state): State<Shared>) -> Json<Value> {
    Json(Value::Array(state.lock().unwrap().orders.clone()))
}

async fn create_order(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    state.order_posts += 1;
    if state.fail_orders {
        return (StatusCode::INTERNAL_SERVER_ERROR, "database offline").into_response();
    }

    // Populate each line the way the real server does.
    let items: Vec<Value> = body["items"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .map(|line| {
            let fruit = state
                .fruits
                .iter()
                .find(|f| f["_id"] == line["fruitId"])
                .cloned()
                .unwrap_or(Value::Null);
            json!({ "fruitId": fruit, "quantity": line["quantity"] })
        })
        .collect();

    let order = json!({
        "_id": format!("o-{}", state.orders.len() + 1),
        "items": items,
        "totalCost": body["totalCost"],
    });
    state.orders.push(order.clone());
    (StatusCode::CREATED, Json(order)).into_response()
}

struct TestServer {
    base_url: String,
    state: Shared,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(fruits: Vec<Value>) -> Self {
        let state: Shared = Arc::new(Mutex::new(FakeState {
            fruits,
            ..FakeState::default()
        }));
        let app = Router::new()
            .route("/fruits", get(list_fruits))
            .route("/orders", get(list_orders).post(create_order))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            state,
            handle,
        }
    }

    fn session(&self, poll_interval: Duration) -> StorefrontSession {
        let client = HttpStorefrontClient::new(&self.base_url).with_poll_interval(poll_interval);
        StorefrontSession::new(Backend::http(client), &Config::default())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn fruits() -> Vec<Value> {
    vec![
        json!({"_id": "apple", "name": "Apple", "price": 1.2, "quantity": 5}),
        json!({"_id": "banana", "name": "Banana", "price": 0.45, "quantity": 2}),
        json!({"_id": "mango", "name": "Mango", "price": 2.5, "quantity": 0}),
    ]
}

#[tokio::test]
async fn order_round_trip_shows_in_history() {
    let server = TestServer::spawn(fruits()).await;
    let mut session = server.session(Duration::from_secs(60));
    session.start().await;

    let names: Vec<_> = session
        .available_items()
        .await
        .into_iter()
        .map(|item| item.name)
        .collect();
    assert_eq!(names, vec!["Apple", "Banana"]);

    session.add_to_cart(&ItemId::new("apple")).await.unwrap();
    session.add_to_cart(&ItemId::new("apple")).await.unwrap();
    session.add_to_cart(&ItemId::new("banana")).await.unwrap();
    assert_eq!(session.cart_total().await.cents(), 285);

    let submission = session.place_order().await.unwrap();
    assert_eq!(submission.state(), SubmissionState::Committed);
    assert_eq!(submission.order_id().unwrap().as_str(), "o-1");

    let posted = server.state.lock().unwrap().orders[0].clone();
    assert!((posted["totalCost"].as_f64().unwrap() - 2.85).abs() < 1e-9);

    session.back_to_shop().await;
    let orders = session.open_orders().await;
    assert_eq!(orders.len(), 1);
    let lines: Vec<_> = orders[0].lines.iter().map(ToString::to_string).collect();
    assert_eq!(lines, vec!["Apple × 2", "Banana × 1"]);

    session.shutdown().await;
}

#[tokio::test]
async fn server_error_falls_back_without_retry() {
    let server = TestServer::spawn(fruits()).await;
    server.state.lock().unwrap().fail_orders = true;
    let mut session = server.session(Duration::from_secs(60));
    session.start().await;

    session.add_to_cart(&ItemId::new("banana")).await.unwrap();
    let submission = session.place_order().await.unwrap();

    assert_eq!(submission.state(), SubmissionState::Fallback);
    assert_eq!(server.state.lock().unwrap().order_posts, 1);
    assert!(session.cart_lines().await.is_empty());

    let confirmation = session.open_confirmation().unwrap();
    assert_eq!(confirmation.render_lines(), vec!["Banana × 1"]);

    let notices = session.drain_notices();
    assert!(
        notices
            .iter()
            .any(|n| matches!(n, Notice::OrderSubmissionFailed(reason) if reason.contains("500")))
    );
    session.shutdown().await;
}

#[tokio::test]
async fn polling_picks_up_stock_changes_and_clamps_cart() {
    let server = TestServer::spawn(fruits()).await;
    let mut session = server.session(Duration::from_millis(20));
    session.start().await;

    for _ in 0..3 {
        session.add_to_cart(&ItemId::new("apple")).await.unwrap();
    }
    server.state.lock().unwrap().fruits[0]["quantity"] = json!(1);

    let mut clamped = Vec::new();
    for _ in 0..100 {
        clamped.extend(session.drain_notices());
        if !clamped.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert!(matches!(
        clamped.as_slice(),
        [Notice::StaleQuantityClamped(clamp)] if clamp.requested == 3 && clamp.clamped_to == 1
    ));
    assert_eq!(session.cart_lines().await[0].quantity, 1);
    session.shutdown().await;
}

#[tokio::test]
async fn unreachable_backend_raises_feed_unavailable() {
    let client = HttpStorefrontClient::new("http://127.0.0.1:1");
    let mut session = StorefrontSession::new(Backend::http(client), &Config::default());

    session.start().await;

    assert!(session.available_items().await.is_empty());
    let kinds: Vec<_> = session.drain_notices().iter().map(Notice::kind).collect();
    assert_eq!(kinds, vec!["FeedUnavailable"]);
    session.shutdown().await;
}
