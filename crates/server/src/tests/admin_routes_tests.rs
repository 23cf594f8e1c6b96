// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{As, create_test_router, send, thursday_morning};
use axum::http::StatusCode;
use serde_json::{Value, json};

fn special_body() -> Value {
    json!({
        "size": "LARGE",
        "bread": "NORMAL",
        "ingredients": ["Jamon", "Brie"],
    })
}

async fn place(app: &axum::Router, user_id: &'static str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/orders",
        As::Member(user_id),
        Some(json!({
            "display_name": user_id,
            "size": "NORMAL",
            "bread": "NORMAL",
            "ingredients": ["Ham"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    format!("/orders/{}", body["order"]["order_id"])
}

#[tokio::test]
async fn test_manual_closure_locks_ordering_with_message() {
    let app = create_test_router(thursday_morning);

    let (status, _) = send(
        &app,
        "PUT",
        "/closure",
        As::Member("user-a"),
        Some(json!({ "closed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, closure) = send(
        &app,
        "PUT",
        "/closure",
        As::Admin,
        Some(json!({ "closed": true, "message": "Hoy no hay bocadillos" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(closure["closure"]["manually_closed"], true);
    assert_eq!(closure["closure"]["closed_by"], "admin-1");

    let (status, rejected) = send(
        &app,
        "POST",
        "/orders",
        As::Member("user-a"),
        Some(json!({
            "display_name": "ana",
            "size": "NORMAL",
            "bread": "NORMAL",
            "ingredients": ["Ham"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::LOCKED);
    assert_eq!(rejected["reason"], "manual");
    assert_eq!(rejected["message"], "Hoy no hay bocadillos");

    let (_, window) = send(&app, "GET", "/window", As::Nobody, None).await;
    assert_eq!(window["is_open"], false);
    assert_eq!(window["manually_closed"], true);
}

#[tokio::test]
async fn test_price_and_paid_are_admin_only() {
    let app = create_test_router(thursday_morning);
    let uri: String = place(&app, "user-a").await;

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("{uri}/price"),
        As::Member("user-a"),
        Some(json!({ "price": 4.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("{uri}/paid"),
        As::Admin,
        Some(json!({ "paid": true })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, priced) = send(
        &app,
        "PATCH",
        &format!("{uri}/price"),
        As::Admin,
        Some(json!({ "price": 4.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(priced["order"]["price"], 4.5);

    let (status, paid) = send(
        &app,
        "PATCH",
        &format!("{uri}/paid"),
        As::Admin,
        Some(json!({ "paid": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["order"]["paid"], true);

    let (status, _) = send(
        &app,
        "PATCH",
        "/orders/9999/price",
        As::Admin,
        Some(json!({ "price": 1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_special_lifecycle_and_combo_visibility() {
    let app = create_test_router(thursday_morning);

    let (status, _) = send(&app, "POST", "/special", As::Member("user-a"), Some(special_body())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = send(&app, "POST", "/special", As::Admin, Some(special_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["special"]["size"], "LARGE");

    let (status, _) = send(&app, "POST", "/special", As::Admin, Some(special_body())).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "PUT",
        "/special",
        As::Admin,
        Some(json!({ "size": "NORMAL", "bread": "NORMAL", "ingredients": ["Salmon"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, member_combos) = send(&app, "GET", "/combos", As::Member("user-a"), None).await;
    let special: &Value = member_combos["combos"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["is_special"] == true)
        .unwrap();
    assert!(special["ingredients"].as_array().unwrap().is_empty());

    let (_, admin_special) = send(&app, "GET", "/special", As::Admin, None).await;
    assert_eq!(admin_special["special"]["ingredients"], json!(["Salmon"]));

    let (status, _) = send(&app, "DELETE", "/special", As::Admin, None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, after) = send(&app, "GET", "/special", As::Member("user-a"), None).await;
    assert!(after["special"].is_null());
}

#[tokio::test]
async fn test_catalog_crud_and_filters() {
    let app = create_test_router(thursday_morning);

    let (status, _) = send(
        &app,
        "POST",
        "/catalog",
        As::Member("user-a"),
        Some(json!({ "name": "Ham" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, ham) = send(
        &app,
        "POST",
        "/catalog",
        As::Admin,
        Some(json!({ "name": "Ham", "category": "Meat" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    send(
        &app,
        "POST",
        "/catalog",
        As::Admin,
        Some(json!({ "name": "Brie", "category": "Dairy", "available": false })),
    )
    .await;

    let (status, _) = send(
        &app,
        "POST",
        "/catalog",
        As::Admin,
        Some(json!({ "name": "ham" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, available) = send(
        &app,
        "GET",
        "/catalog?available_only=true",
        As::Member("user-a"),
        None,
    )
    .await;
    assert_eq!(available["entries"].as_array().unwrap().len(), 1);

    let (_, categories) = send(&app, "GET", "/catalog/categories", As::Member("user-a"), None).await;
    assert_eq!(categories["categories"], json!(["Dairy", "Meat"]));

    let uri: String = format!("/catalog/{}", ham["entry"]["ingredient_id"]);
    let (status, updated) = send(
        &app,
        "PUT",
        &uri,
        As::Admin,
        Some(json!({ "name": "Jamon", "available": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["entry"]["name"], "Jamon");
    assert_eq!(updated["entry"]["category"], "Meat");
    assert_eq!(updated["entry"]["available"], false);

    let (status, _) = send(&app, "DELETE", &uri, As::Admin, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "DELETE", &uri, As::Admin, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_push_subscription_and_manual_broadcast() {
    let app = create_test_router(thursday_morning);
    let subscription: Value = json!({
        "endpoint": "https://push.example/a",
        "p256dh": "key",
        "auth": "secret",
    });

    let (status, _) = send(
        &app,
        "POST",
        "/push/subscriptions",
        As::Member("user-a"),
        Some(subscription),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let notification: Value = json!({ "title": "Hola", "body": "Hay pan" });
    let (status, _) = send(
        &app,
        "POST",
        "/push/send",
        As::Member("user-a"),
        Some(notification.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, report) = send(&app, "POST", "/push/send", As::Admin, Some(notification)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["delivered"], 1);

    let (status, _) = send(
        &app,
        "POST",
        "/push/send",
        As::Admin,
        Some(json!({ "title": " ", "body": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, removed) = send(
        &app,
        "DELETE",
        "/push/subscriptions",
        As::Member("user-a"),
        Some(json!({ "endpoint": "https://push.example/a" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["removed"], true);
}

#[tokio::test]
async fn test_audit_listing_is_admin_only_and_newest_first() {
    let app = create_test_router(thursday_morning);
    place(&app, "user-a").await;
    place(&app, "user-b").await;

    let (status, _) = send(&app, "GET", "/audit", As::Member("user-a"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, audit) = send(&app, "GET", "/audit?limit=1", As::Admin, None).await;
    assert_eq!(status, StatusCode::OK);
    let events = audit["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["actor_id"], "user-b");

    let (status, _) = send(&app, "GET", "/audit?limit=0", As::Admin, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
