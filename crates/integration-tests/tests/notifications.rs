//! Notification feed behavior around the order lifecycle.

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::Value;

use dabeeha_integration_tests::{BASATEEN, TestContext, checkout_form};

async fn place_order(ctx: &mut TestContext) -> String {
    ctx.add_to_cart("1", None).await;
    let (status, order) = ctx.post("/orders", checkout_form(Some(BASATEEN))).await;
    assert_eq!(status, StatusCode::CREATED);
    order["id"].as_str().unwrap().to_owned()
}

/// Poll the feed until a notification with `title` shows up.
///
/// Under paused test time the sleeps auto-advance, so this also drives
/// the delayed farm-update task to completion without waiting.
async fn wait_for_notification(ctx: &mut TestContext, title: &str) -> Value {
    for _ in 0..100 {
        let (_, feed) = ctx.get("/notifications").await;
        if let Some(found) = feed["notifications"]
            .as_array()
            .unwrap()
            .iter()
            .find(|n| n["title"] == title)
        {
            return found.clone();
        }
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
    panic!("notification {title:?} never arrived");
}

#[tokio::test]
async fn test_order_confirmation_notification() {
    let mut ctx = TestContext::new().await;
    ctx.register("Fatma", "fatma@example.com").await;
    let order_id = place_order(&mut ctx).await;

    let (status, feed) = ctx.get("/notifications").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feed["unread_count"], 1);

    let first = &feed["notifications"][0];
    assert_eq!(first["title"], "Reservation Confirmed");
    assert_eq!(first["kind"], "order");
    assert_eq!(first["order_id"], order_id);
    assert_eq!(first["read"], false);
    assert!(first["id"].as_str().unwrap().starts_with("NTF-"));
}

#[tokio::test]
async fn test_arabic_copy_follows_language_preference() {
    let mut ctx = TestContext::new().await;
    ctx.register("Fatma", "fatma@example.com").await;
    ctx.put("/lang", serde_json::json!({ "language": "ar" }))
        .await;
    place_order(&mut ctx).await;

    let (_, feed) = ctx.get("/notifications").await;
    assert_eq!(feed["notifications"][0]["title"], "تأكيد الحجز");
}

#[tokio::test(start_paused = true)]
async fn test_farm_update_arrives_after_delay() {
    let mut ctx = TestContext::new().await;
    ctx.register("Fatma", "fatma@example.com").await;
    place_order(&mut ctx).await;

    let farm = wait_for_notification(&mut ctx, "Farm Update").await;
    assert_eq!(farm["kind"], "farm");
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_order_never_gets_farm_update() {
    let mut ctx = TestContext::new().await;
    ctx.register("Fatma", "fatma@example.com").await;
    let order_id = place_order(&mut ctx).await;

    let (status, _) = ctx.post_empty(&format!("/orders/{order_id}/cancel")).await;
    assert_eq!(status, StatusCode::OK);

    // Give the (aborted) timer plenty of virtual time to misfire.
    tokio::time::sleep(Duration::from_secs(30)).await;

    let (_, feed) = ctx.get("/notifications").await;
    let titles: Vec<&str> = feed["notifications"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Order Cancelled", "Reservation Confirmed"]);
}

#[tokio::test]
async fn test_mark_all_read_keeps_entries() {
    let mut ctx = TestContext::new().await;
    ctx.register("Fatma", "fatma@example.com").await;
    place_order(&mut ctx).await;

    let (status, _) = ctx.post_empty("/notifications/read-all").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, feed) = ctx.get("/notifications").await;
    assert_eq!(feed["unread_count"], 0);
    assert_eq!(feed["notifications"].as_array().unwrap().len(), 1);
    assert_eq!(feed["notifications"][0]["read"], true);
}

#[tokio::test]
async fn test_clear_empties_the_feed() {
    let mut ctx = TestContext::new().await;
    ctx.register("Fatma", "fatma@example.com").await;
    place_order(&mut ctx).await;

    let (status, _) = ctx.delete("/notifications").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, feed) = ctx.get("/notifications").await;
    assert!(feed["notifications"].as_array().unwrap().is_empty());
    assert_eq!(feed["unread_count"], 0);
}
