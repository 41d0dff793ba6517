//! HTTP API tests driven through `actix_web::test`, with in-process fakes for
//! the menu and order services.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::{test, web, App};
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use serde_json::{json, Value};

use order_form::domain::errors::GatewayError;
use order_form::domain::menu::{Menu, MenuItem};
use order_form::domain::order::OrderRequest;
use order_form::domain::ports::{GatewayResponse, MenuSource, OrderGateway};
use order_form::{configure, OrderFormService};

struct FakeMenu {
    broken: bool,
}

#[async_trait]
impl MenuSource for FakeMenu {
    async fn fetch_menu(&self) -> Result<Menu, GatewayError> {
        if self.broken {
            return Err(GatewayError::Decode("EOF while parsing a list".to_string()));
        }
        Ok(Menu::new(vec![
            MenuItem {
                item_id: "1".to_string(),
                name: "Burger".to_string(),
                price: BigDecimal::from(25),
            },
            MenuItem {
                item_id: "2".to_string(),
                name: "Pizza".to_string(),
                price: BigDecimal::from(40),
            },
        ]))
    }
}

struct FakeOrders {
    status: u16,
    body: &'static str,
    calls: AtomicUsize,
    last: Mutex<Option<OrderRequest>>,
}

impl FakeOrders {
    fn new(status: u16, body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderGateway for FakeOrders {
    async fn create_order(&self, order: &OrderRequest) -> Result<GatewayResponse, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(order.clone());
        Ok(GatewayResponse {
            status: self.status,
            body: self.body.to_string(),
        })
    }
}

fn service_data(menu_broken: bool, orders: Arc<FakeOrders>) -> web::Data<OrderFormService> {
    web::Data::new(OrderFormService::new(
        Arc::new(FakeMenu {
            broken: menu_broken,
        }),
        orders,
    ))
}

macro_rules! app {
    ($data:expr) => {
        test::init_service(App::new().app_data($data.clone()).configure(configure)).await
    };
}

macro_rules! call_json {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status().as_u16();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

macro_rules! patch {
    ($app:expr, $id:expr, $body:expr) => {{
        let (status, form) = call_json!(
            $app,
            test::TestRequest::patch()
                .uri(&format!("/forms/{}", $id))
                .set_json($body)
        );
        assert_eq!(status, 200);
        form
    }};
}

#[actix_web::test]
async fn new_form_starts_with_one_blank_line() {
    let data = service_data(false, FakeOrders::new(201, "{}"));
    let app = app!(data);

    let (status, body) = call_json!(app, test::TestRequest::post().uri("/forms"));

    assert_eq!(status, 201);
    assert_eq!(body["customer_name"], "");
    assert_eq!(body["items"], json!([{ "item_id": "", "quantity": 1 }]));
    assert_eq!(body["payment_type"], "manual");
    assert_eq!(body["submitting"], false);
    assert_eq!(body["menu"].as_array().unwrap().len(), 2);
    assert_eq!(body["summary"]["total"], "0.00");
}

#[actix_web::test]
async fn summary_tracks_edits() {
    let data = service_data(false, FakeOrders::new(201, "{}"));
    let app = app!(data);
    let (_, form) = call_json!(app, test::TestRequest::post().uri("/forms"));
    let id = form["id"].as_str().unwrap().to_string();

    patch!(app, id, json!({ "field": "item_id", "line": 0, "value": "1" }));
    patch!(app, id, json!({ "field": "quantity", "line": 0, "value": 2 }));
    let (status, _) = call_json!(
        app,
        test::TestRequest::post().uri(&format!("/forms/{id}/lines"))
    );
    assert_eq!(status, 200);
    let form = patch!(app, id, json!({ "field": "item_id", "line": 1, "value": "2" }));

    assert_eq!(form["summary"]["total"], "90.00");

    let (status, summary) = call_json!(
        app,
        test::TestRequest::get().uri(&format!("/forms/{id}/summary"))
    );
    assert_eq!(status, 200);
    assert_eq!(summary["total"], "90.00");
    assert_eq!(summary["lines"][0]["name"], "Burger");
    assert_eq!(summary["lines"][0]["subtotal"], "50.00");
    assert_eq!(summary["lines"][1]["unit_price"], "40.00");
}

#[actix_web::test]
async fn unknown_item_is_left_out_of_summary() {
    let data = service_data(false, FakeOrders::new(201, "{}"));
    let app = app!(data);
    let (_, form) = call_json!(app, test::TestRequest::post().uri("/forms"));
    let id = form["id"].as_str().unwrap().to_string();

    let form = patch!(app, id, json!({ "field": "item_id", "line": 0, "value": "999" }));

    assert_eq!(form["summary"]["lines"], json!([]));
    assert_eq!(form["summary"]["total"], "0.00");
}

#[actix_web::test]
async fn successful_submission_resets_form() {
    let orders = FakeOrders::new(201, r#"{"order_id":"7c1e","status":"pending"}"#);
    let data = service_data(false, orders.clone());
    let app = app!(data);
    let (_, form) = call_json!(app, test::TestRequest::post().uri("/forms"));
    let id = form["id"].as_str().unwrap().to_string();

    patch!(app, id, json!({ "field": "customer_name", "value": "Ana" }));
    patch!(app, id, json!({ "field": "item_id", "line": 0, "value": "1" }));
    patch!(app, id, json!({ "field": "payment_type", "value": "online" }));

    let (status, result) = call_json!(
        app,
        test::TestRequest::post().uri(&format!("/forms/{id}/submit"))
    );

    assert_eq!(status, 200);
    assert_eq!(result["success"], true);
    assert_eq!(result["data"]["order_id"], "7c1e");
    assert_eq!(orders.calls(), 1);
    let sent = orders.last.lock().unwrap().clone().unwrap();
    assert_eq!(
        serde_json::to_value(&sent).unwrap(),
        json!({
            "customer_name": "Ana",
            "items": [{ "item_id": "1", "quantity": 1 }],
            "payment_type": "online"
        })
    );

    let (_, form) = call_json!(app, test::TestRequest::get().uri(&format!("/forms/{id}")));
    assert_eq!(form["customer_name"], "");
    assert_eq!(form["items"], json!([{ "item_id": "", "quantity": 1 }]));
    assert_eq!(form["payment_type"], "manual");
}

#[actix_web::test]
async fn rejected_submission_shows_detail_and_keeps_form() {
    let orders = FakeOrders::new(400, r#"{"detail":"Out of stock"}"#);
    let data = service_data(false, orders.clone());
    let app = app!(data);
    let (_, form) = call_json!(app, test::TestRequest::post().uri("/forms"));
    let id = form["id"].as_str().unwrap().to_string();
    patch!(app, id, json!({ "field": "customer_name", "value": "Ana" }));
    let before = patch!(app, id, json!({ "field": "item_id", "line": 0, "value": "2" }));

    let (status, result) = call_json!(
        app,
        test::TestRequest::post().uri(&format!("/forms/{id}/submit"))
    );

    assert_eq!(status, 200);
    assert_eq!(result["success"], false);
    assert_eq!(result["message"], "Out of stock");

    let (_, after) = call_json!(app, test::TestRequest::get().uri(&format!("/forms/{id}")));
    assert_eq!(after["customer_name"], before["customer_name"]);
    assert_eq!(after["items"], before["items"]);
    assert_eq!(after["submitting"], false);
}

#[actix_web::test]
async fn missing_name_is_rejected_without_calling_order_service() {
    let orders = FakeOrders::new(201, "{}");
    let data = service_data(false, orders.clone());
    let app = app!(data);
    let (_, form) = call_json!(app, test::TestRequest::post().uri("/forms"));
    let id = form["id"].as_str().unwrap().to_string();
    patch!(app, id, json!({ "field": "item_id", "line": 0, "value": "1" }));

    let (status, body) = call_json!(
        app,
        test::TestRequest::post().uri(&format!("/forms/{id}/submit"))
    );

    assert_eq!(status, 422);
    assert_eq!(
        body["fields"],
        json!([{ "field": "customer_name", "message": "Name is required." }])
    );
    assert_eq!(orders.calls(), 0);
}

#[actix_web::test]
async fn bad_lines_are_rejected_without_calling_order_service() {
    let orders = FakeOrders::new(201, "{}");
    let data = service_data(false, orders.clone());
    let app = app!(data);
    let (_, form) = call_json!(app, test::TestRequest::post().uri("/forms"));
    let id = form["id"].as_str().unwrap().to_string();
    patch!(app, id, json!({ "field": "customer_name", "value": "Ana" }));
    patch!(app, id, json!({ "field": "quantity", "line": 0, "value": 0 }));

    let (status, body) = call_json!(
        app,
        test::TestRequest::post().uri(&format!("/forms/{id}/submit"))
    );

    assert_eq!(status, 422);
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, ["items.0.item_id", "items.0.quantity"]);
    assert_eq!(orders.calls(), 0);
}

#[actix_web::test]
async fn removing_every_line_blocks_submission() {
    let orders = FakeOrders::new(201, "{}");
    let data = service_data(false, orders.clone());
    let app = app!(data);
    let (_, form) = call_json!(app, test::TestRequest::post().uri("/forms"));
    let id = form["id"].as_str().unwrap().to_string();
    patch!(app, id, json!({ "field": "customer_name", "value": "Ana" }));

    let (status, form) = call_json!(
        app,
        test::TestRequest::delete().uri(&format!("/forms/{id}/lines/0"))
    );
    assert_eq!(status, 200);
    assert_eq!(form["items"], json!([]));

    let (status, body) = call_json!(
        app,
        test::TestRequest::post().uri(&format!("/forms/{id}/submit"))
    );
    assert_eq!(status, 422);
    assert_eq!(body["fields"][0]["field"], "items");
    assert_eq!(orders.calls(), 0);
}

#[actix_web::test]
async fn out_of_range_line_is_bad_request() {
    let data = service_data(false, FakeOrders::new(201, "{}"));
    let app = app!(data);
    let (_, form) = call_json!(app, test::TestRequest::post().uri("/forms"));
    let id = form["id"].as_str().unwrap().to_string();

    let (status, _) = call_json!(
        app,
        test::TestRequest::delete().uri(&format!("/forms/{id}/lines/3"))
    );
    assert_eq!(status, 400);

    let (status, _) = call_json!(
        app,
        test::TestRequest::patch()
            .uri(&format!("/forms/{id}"))
            .set_json(json!({ "field": "quantity", "line": 5, "value": 2 }))
    );
    assert_eq!(status, 400);
}

#[actix_web::test]
async fn reset_restores_initial_state() {
    let data = service_data(false, FakeOrders::new(201, "{}"));
    let app = app!(data);
    let (_, form) = call_json!(app, test::TestRequest::post().uri("/forms"));
    let id = form["id"].as_str().unwrap().to_string();
    patch!(app, id, json!({ "field": "customer_name", "value": "Ana" }));
    call_json!(app, test::TestRequest::post().uri(&format!("/forms/{id}/lines")));

    let (status, form) = call_json!(
        app,
        test::TestRequest::post().uri(&format!("/forms/{id}/reset"))
    );

    assert_eq!(status, 200);
    assert_eq!(form["customer_name"], "");
    assert_eq!(form["items"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn unknown_form_is_not_found() {
    let data = service_data(false, FakeOrders::new(201, "{}"));
    let app = app!(data);
    let uri = format!("/forms/{}", uuid::Uuid::new_v4());

    let (status, body) = call_json!(app, test::TestRequest::get().uri(&uri));
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Form not found");

    let (status, _) = call_json!(app, test::TestRequest::post().uri(&format!("{uri}/submit")));
    assert_eq!(status, 404);
}

#[actix_web::test]
async fn deleted_form_is_gone() {
    let data = service_data(false, FakeOrders::new(201, "{}"));
    let app = app!(data);
    let (_, form) = call_json!(app, test::TestRequest::post().uri("/forms"));
    let id = form["id"].as_str().unwrap().to_string();

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/forms/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 204);

    let (status, _) = call_json!(app, test::TestRequest::get().uri(&format!("/forms/{id}")));
    assert_eq!(status, 404);
}

#[actix_web::test]
async fn broken_menu_service_gives_empty_menu() {
    let data = service_data(true, FakeOrders::new(201, "{}"));
    let app = app!(data);

    let (status, menu) = call_json!(app, test::TestRequest::get().uri("/menu"));
    assert_eq!(status, 200);
    assert_eq!(menu, json!([]));

    let (status, form) = call_json!(app, test::TestRequest::post().uri("/forms"));
    assert_eq!(status, 201);
    assert_eq!(form["menu"], json!([]));
}

#[actix_web::test]
async fn menu_lists_items_with_decimal_prices() {
    let data = service_data(false, FakeOrders::new(201, "{}"));
    let app = app!(data);

    let (status, menu) = call_json!(app, test::TestRequest::get().uri("/menu"));

    assert_eq!(status, 200);
    assert_eq!(
        menu,
        json!([
            { "item_id": "1", "name": "Burger", "price": "25" },
            { "item_id": "2", "name": "Pizza", "price": "40" }
        ])
    );
}

#[actix_web::test]
async fn openapi_document_lists_form_routes() {
    let data = service_data(false, FakeOrders::new(201, "{}"));
    let app = app!(data);

    let (status, doc) = call_json!(app, test::TestRequest::get().uri("/api-docs/openapi.json"));

    assert_eq!(status, 200);
    assert!(doc["paths"]["/forms/{id}/submit"].is_object());
    assert!(doc["paths"]["/menu"].is_object());
}
