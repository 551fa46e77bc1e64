//! Catalog browsing and cart behavior.

use axum::http::StatusCode;
use serde_json::json;

use dabeeha_integration_tests::TestContext;

#[tokio::test]
async fn test_product_listing_and_category_filter() {
    let mut ctx = TestContext::new().await;
    ctx.register("Fatma", "fatma@example.com").await;

    let (status, all) = ctx.get("/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 5);

    let (_, calves) = ctx.get("/products?category=Calf").await;
    assert_eq!(calves.as_array().unwrap().len(), 2);

    let (_, everything) = ctx.get("/products?category=All").await;
    assert_eq!(everything.as_array().unwrap().len(), 5);

    let (status, _) = ctx.get("/products?category=Goat").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_product_is_404() {
    let mut ctx = TestContext::new().await;
    ctx.register("Fatma", "fatma@example.com").await;

    let (status, detail) = ctx.get("/products/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["name"], "Baladi Calf");

    let (status, _) = ctx.get("/products/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_merges_same_line() {
    let mut ctx = TestContext::new().await;
    ctx.register("Fatma", "fatma@example.com").await;

    ctx.add_to_cart("1", None).await;
    let cart = ctx.add_to_cart("1", None).await;

    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["items"][0]["quantity"], 2);
    assert_eq!(cart["item_count"], 2);

    let (_, count) = ctx.get("/cart/count").await;
    assert_eq!(count["count"], 2);
}

#[tokio::test]
async fn test_calf_share_line_pricing() {
    let mut ctx = TestContext::new().await;
    ctx.register("Fatma", "fatma@example.com").await;

    let cart = ctx.add_to_cart("2", Some(3)).await;

    assert_eq!(cart["items"][0]["share"], 3);
    // 65000 * 3 / 7, rounded to the piaster for display.
    assert_eq!(cart["total_display"], "EGP 27,857.14");
    // An alive calf needs a slaughter meeting point at checkout.
    assert_eq!(cart["requires_meeting_point"], true);
}

#[tokio::test]
async fn test_distinct_share_counts_are_separate_lines() {
    let mut ctx = TestContext::new().await;
    ctx.register("Fatma", "fatma@example.com").await;

    ctx.add_to_cart("2", Some(3)).await;
    let cart = ctx.add_to_cart("2", Some(2)).await;
    assert_eq!(cart["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_full_share_merges_with_whole_purchase() {
    let mut ctx = TestContext::new().await;
    ctx.register("Fatma", "fatma@example.com").await;

    ctx.add_to_cart("2", Some(7)).await;
    let cart = ctx.add_to_cart("2", None).await;

    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["items"][0]["quantity"], 2);
    assert_eq!(cart["items"][0]["share"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_share_on_sheep_rejected() {
    let mut ctx = TestContext::new().await;
    ctx.register("Fatma", "fatma@example.com").await;

    let (status, body) = ctx
        .post("/cart/add", json!({ "product_id": "1", "share": 3 }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("sold whole"));
}

#[tokio::test]
async fn test_share_out_of_range_rejected() {
    let mut ctx = TestContext::new().await;
    ctx.register("Fatma", "fatma@example.com").await;

    for share in [0, 8] {
        let (status, _) = ctx
            .post("/cart/add", json!({ "product_id": "2", "share": share }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "share {share} accepted");
    }
}

#[tokio::test]
async fn test_update_quantity_and_remove_by_key() {
    let mut ctx = TestContext::new().await;
    ctx.register("Fatma", "fatma@example.com").await;

    ctx.add_to_cart("1", None).await;
    let cart = ctx.add_to_cart("2", Some(3)).await;
    let sheep_key = cart["items"][0]["key"].clone();
    let calf_key = cart["items"][1]["key"].clone();

    let (status, cart) = ctx
        .post("/cart/update", json!({ "key": sheep_key, "quantity": 4 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"][0]["quantity"], 4);

    // Quantity zero removes the line.
    let (_, cart) = ctx
        .post("/cart/update", json!({ "key": calf_key, "quantity": 0 }))
        .await;
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);

    let (_, cart) = ctx
        .post("/cart/remove", json!({ "key": cart["items"][0]["key"] }))
        .await;
    assert!(cart["items"].as_array().unwrap().is_empty());
    assert_eq!(cart["item_count"], 0);
}

#[tokio::test]
async fn test_payment_split_sums_to_total() {
    let mut ctx = TestContext::new().await;
    ctx.register("Fatma", "fatma@example.com").await;

    let cart = ctx.add_to_cart("1", None).await;

    assert_eq!(cart["total"], "8500");
    assert_eq!(cart["down_payment"], "2125.00");
    assert_eq!(cart["balance"], "6375.00");
}
