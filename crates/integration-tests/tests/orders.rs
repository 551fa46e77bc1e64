//! Checkout and the order lifecycle.

use axum::http::StatusCode;
use serde_json::json;

use dabeeha_core::{OrderId, ProductId, UserId};
use dabeeha_integration_tests::{BASATEEN, TestContext, checkout_form};
use dabeeha_server::models::CartLine;

#[tokio::test]
async fn test_checkout_happy_path() {
    let mut ctx = TestContext::new().await;
    let user = ctx.register("Fatma", "fatma@example.com").await;

    ctx.add_to_cart("1", None).await;
    let (status, order) = ctx.post("/orders", checkout_form(Some(BASATEEN))).await;
    assert_eq!(status, StatusCode::CREATED, "checkout failed: {order}");

    let order_id = order["id"].as_str().unwrap();
    assert!(order_id.starts_with("DBH-"));
    assert_eq!(order["status"], "PENDING");
    assert_eq!(order["total"], "8500");
    assert_eq!(order["down_payment"], "2125.00");
    assert_eq!(order["balance"], "6375.00");

    // Checkout clears the cart atomically with placing the order.
    let (_, cart) = ctx.get("/cart").await;
    assert!(cart["items"].as_array().unwrap().is_empty());

    let (status, history) = ctx
        .get(&format!("/orders/user/{}", user["id"].as_str().unwrap()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["id"], order_id);

    // The farm health-check timer is armed for the new order.
    assert!(ctx.state.has_farm_timer(&OrderId::new(order_id)).await);
}

#[tokio::test]
async fn test_cart_edit_during_checkout_is_never_dropped() {
    let mut ctx = TestContext::new().await;
    let user = ctx.register("Fatma", "fatma@example.com").await;
    ctx.add_to_cart("1", None).await;

    let user_id = UserId::new(user["id"].as_str().unwrap());
    let state = ctx.state.clone();
    let product = state
        .catalog()
        .get(&ProductId::new("1"))
        .expect("seed product")
        .clone();

    // Keep adding the same sheep while the checkout request runs.
    let adder = {
        let state = state.clone();
        let user_id = user_id.clone();
        tokio::spawn(async move {
            for _ in 0..20 {
                let line = CartLine::new(&product, product.fulfillment, None, 1).unwrap();
                state
                    .mutate_account(&user_id, |account| account.cart.add(line))
                    .await;
                tokio::task::yield_now().await;
            }
        })
    };

    let (status, order) = ctx.post("/orders", checkout_form(Some(BASATEEN))).await;
    assert_eq!(status, StatusCode::CREATED, "checkout failed: {order}");
    adder.await.unwrap();

    // Every addition lands either on the order or in the still-open cart;
    // none may fall between the validation snapshot and the clear.
    let ordered: u64 = order["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["quantity"].as_u64().unwrap())
        .sum();
    let in_cart = u64::from(
        state
            .read_account(&user_id, |account| account.cart.item_count())
            .await
            .unwrap(),
    );
    assert_eq!(ordered + in_cart, 21);
}

#[tokio::test]
async fn test_checkout_rejects_missing_meeting_point() {
    let mut ctx = TestContext::new().await;
    ctx.register("Fatma", "fatma@example.com").await;

    ctx.add_to_cart("1", None).await;
    let (status, body) = ctx.post("/orders", checkout_form(None)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("meeting point"));

    // A rejected checkout mutates nothing.
    let (_, cart) = ctx.get("/cart").await;
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_checkout_allows_slaughtered_only_without_meeting_point() {
    let mut ctx = TestContext::new().await;
    ctx.register("Fatma", "fatma@example.com").await;

    // Product 3 is a slaughtered cut, delivered to the door.
    ctx.add_to_cart("3", None).await;
    let (status, _) = ctx.post("/orders", checkout_form(None)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_checkout_rejects_empty_cart_and_unknown_district() {
    let mut ctx = TestContext::new().await;
    ctx.register("Fatma", "fatma@example.com").await;

    let (status, body) = ctx.post("/orders", checkout_form(Some(BASATEEN))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "cart is empty");

    ctx.add_to_cart("3", None).await;
    let mut form = checkout_form(None);
    form["address"]["district"] = json!("Atlantis");
    let (status, body) = ctx.post("/orders", form).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("Atlantis"));
}

#[tokio::test]
async fn test_cancel_marks_cancelled_and_disarms_timer() {
    let mut ctx = TestContext::new().await;
    let user = ctx.register("Fatma", "fatma@example.com").await;

    ctx.add_to_cart("1", None).await;
    let (_, order) = ctx.post("/orders", checkout_form(Some(BASATEEN))).await;
    let order_id = order["id"].as_str().unwrap().to_owned();

    let (status, cancelled) = ctx.post_empty(&format!("/orders/{order_id}/cancel")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "CANCELLED");
    assert!(!ctx.state.has_farm_timer(&OrderId::new(&order_id)).await);

    // The record stays on the history, marked cancelled.
    let (_, history) = ctx
        .get(&format!("/orders/user/{}", user["id"].as_str().unwrap()))
        .await;
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["status"], "CANCELLED");

    // Cancelled is terminal.
    let (status, _) = ctx.post_empty(&format!("/orders/{order_id}/cancel")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cancel_unknown_order_is_404() {
    let mut ctx = TestContext::new().await;
    let user = ctx.register("Fatma", "fatma@example.com").await;

    let (status, _) = ctx.post_empty("/orders/DBH-000000/cancel").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, history) = ctx
        .get(&format!("/orders/user/{}", user["id"].as_str().unwrap()))
        .await;
    assert!(history.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_advance_walks_the_delivery_progression() {
    let mut ctx = TestContext::new().await;
    ctx.register("Fatma", "fatma@example.com").await;

    ctx.add_to_cart("3", None).await;
    let (_, order) = ctx.post("/orders", checkout_form(None)).await;
    let order_id = order["id"].as_str().unwrap().to_owned();
    let path = format!("/orders/{order_id}/advance");

    for expected in ["PROCESSING", "OUT_FOR_DELIVERY", "DELIVERED"] {
        let (status, advanced) = ctx.post_empty(&path).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(advanced["status"], expected);
    }

    // Delivered is terminal.
    let (status, _) = ctx.post_empty(&path).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_media_update_appended_to_order() {
    let mut ctx = TestContext::new().await;
    ctx.register("Fatma", "fatma@example.com").await;

    ctx.add_to_cart("1", None).await;
    let (_, order) = ctx.post("/orders", checkout_form(Some(BASATEEN))).await;
    let order_id = order["id"].as_str().unwrap().to_owned();

    let (status, updated) = ctx
        .post(
            &format!("/orders/{order_id}/media"),
            json!({
                "kind": "image",
                "url": "https://cdn.example.com/farm/1.jpg",
                "description": "Morning feeding",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let updates = updated["media_updates"].as_array().unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0]["kind"], "image");
    assert!(updates[0]["id"].as_str().unwrap().starts_with("MED-"));
}

#[tokio::test]
async fn test_history_of_another_customer_is_rejected() {
    let mut ctx = TestContext::new().await;
    ctx.register("Fatma", "fatma@example.com").await;

    let (status, _) = ctx.get("/orders/user/u-someone-else").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_order_history_survives_relogin() {
    let mut ctx = TestContext::new().await;
    ctx.register("Fatma", "fatma@example.com").await;

    ctx.add_to_cart("1", None).await;
    let (_, order) = ctx.post("/orders", checkout_form(Some(BASATEEN))).await;
    let order_id = order["id"].as_str().unwrap().to_owned();

    ctx.post_empty("/auth/logout").await;
    let (_, user) = ctx
        .post(
            "/auth/login",
            json!({ "email": "fatma@example.com", "password": "x" }),
        )
        .await;

    let (status, history) = ctx
        .get(&format!("/orders/user/{}", user["id"].as_str().unwrap()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history[0]["id"], order_id);
}
