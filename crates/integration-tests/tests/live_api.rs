//! Tests against a running server.
//!
//! These require:
//! - A running `PostgreSQL` database with migrations applied
//! - The API server running (cargo run -p mealkit-api)
//! - For the admin flow: `MEALKIT_ADMIN_TOKEN` set to a token issued with
//!   `cargo run -p mealkit-cli -- user create --email ... --admin`
//!
//! Run with: cargo test -p mealkit-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::Value;

use mealkit_integration_tests::{live_admin_token, live_base_url};

/// A filled checkout form that passes validation.
fn customer_form() -> Value {
    serde_json::json!({
        "firstName": "Astrid",
        "lastName": "Lind",
        "email": "astrid@example.com",
        "address": "Storgatan 1",
        "postalCode": "11122",
        "city": "Stockholm",
        "country": "SE",
        "phone": "+46701234567"
    })
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_live_health() {
    let base_url = live_base_url();

    let resp = Client::new()
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("health request");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("body"), "ok");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_live_readiness() {
    let base_url = live_base_url();

    let resp = Client::new()
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("readiness request");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_live_meal_listing() {
    let base_url = live_base_url();

    let resp = Client::new()
        .get(format!("{base_url}/meals"))
        .send()
        .await
        .expect("meals request");

    assert_eq!(resp.status(), StatusCode::OK);

    let meals: Value = resp.json().await.expect("meal listing is JSON");
    let meals = meals.as_array().expect("meal listing is an array");

    // Every listed meal is public data: no internal columns leak.
    for meal in meals {
        assert!(meal.get("id").is_some());
        assert!(meal.get("name").is_some());
        assert!(meal.get("price").is_some());
        assert!(meal.get("active").is_none());
    }
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_live_dummy_checkout_creates_order() {
    let base_url = live_base_url();
    let client = Client::new();
    let email = format!("it-{}@example.com", uuid::Uuid::new_v4().simple());
    let credentials = serde_json::json!({ "email": email, "password": "hunter2hunter2" });

    let resp = client
        .post(format!("{base_url}/users"))
        .json(&credentials)
        .send()
        .await
        .expect("register request");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(format!("{base_url}/users/login"))
        .json(&credentials)
        .send()
        .await
        .expect("login request");
    assert_eq!(resp.status(), StatusCode::OK);
    let login: Value = resp.json().await.expect("login body");
    let token = login["token"].as_str().expect("bearer token").to_string();

    let resp = client
        .post(format!("{base_url}/checkout/order"))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "items": [{
                "id": uuid::Uuid::new_v4(),
                "name": "Veggie Box",
                "image": null,
                "price": { "amount": "129.50", "currency_code": "SEK" },
                "quantity": 2
            }],
            "customer": customer_form(),
            "paymentMethod": "dummy"
        }))
        .send()
        .await
        .expect("checkout request");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.expect("checkout body");
    assert_eq!(body["redirect"], "/confirmation");
    let order_number = body["order"]["order_number"]
        .as_str()
        .expect("order number");
    assert!(order_number.starts_with("MK-"));
    // Total recomputed server-side from the cart lines.
    assert_eq!(body["order"]["total"], "259.00");

    let order_id = body["order"]["id"].as_str().expect("order id");
    let resp = client
        .get(format!("{base_url}/orders/{order_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("order detail request");
    assert_eq!(resp.status(), StatusCode::OK);

    let detail: Value = resp.json().await.expect("order detail body");
    assert_eq!(detail["order"]["order_number"], order_number);
    let items = detail["items"].as_array().expect("order items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 2);
}

#[tokio::test]
#[ignore = "Requires running API server, database, and MEALKIT_ADMIN_TOKEN"]
async fn test_live_admin_meal_crud() {
    let base_url = live_base_url();
    let token = live_admin_token();
    let client = Client::new();
    let name = format!("IT Box {}", uuid::Uuid::new_v4().simple());

    let resp = client
        .post(format!("{base_url}/meals"))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "name": name,
            "description": "Created by the live suite",
            "image": null,
            "price": "129.00"
        }))
        .send()
        .await
        .expect("create request");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = resp.json().await.expect("create body");
    let meal_id = created["id"].as_str().expect("meal id").to_string();

    let resp = client
        .get(format!("{base_url}/meals/{meal_id}"))
        .send()
        .await
        .expect("detail request");
    assert_eq!(resp.status(), StatusCode::OK);
    let detail: Value = resp.json().await.expect("detail body");
    assert_eq!(detail["name"], name.as_str());

    let resp = client
        .put(format!("{base_url}/meals/{meal_id}"))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "name": format!("{name} (renamed)"),
            "description": "Updated by the live suite",
            "image": null,
            "price": "149.00"
        }))
        .send()
        .await
        .expect("update request");
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.expect("update body");
    assert_eq!(updated["price"]["amount"], "149.00");

    let resp = client
        .delete(format!("{base_url}/meals/{meal_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("delete request");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // Deactivated meals disappear from the public surface.
    let resp = client
        .get(format!("{base_url}/meals/{meal_id}"))
        .send()
        .await
        .expect("detail after delete");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_live_newsletter_roundtrip() {
    let base_url = live_base_url();
    let email = format!("it-{}@example.com", uuid::Uuid::new_v4().simple());

    let client = Client::new();

    // Subscribing twice must succeed both times.
    for _ in 0..2 {
        let resp = client
            .post(format!("{base_url}/newsletter"))
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await
            .expect("subscribe request");

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = resp.json().await.expect("subscribe body");
        assert_eq!(body["subscribed"], true);
    }
}
