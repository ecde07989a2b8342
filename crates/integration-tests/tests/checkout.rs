//! Checkout validation tests.
//!
//! These drive the router in-process with a lazy pool. Every scenario
//! here fails before any database or payment-provider call, which is
//! exactly the behavior under test: validation must short-circuit.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use mealkit_integration_tests::{body_json, test_app};

fn checkout_request(payload: &Value) -> Request<Body> {
    Request::post("/checkout/order")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

fn cart_item() -> Value {
    json!({
        "id": "6b4bb0f8-2c8e-4e6d-9f38-4a52a17c2b11",
        "name": "Veggie Box",
        "image": null,
        "price": { "amount": "449.00", "currency_code": "SEK" },
        "quantity": 1
    })
}

fn complete_customer() -> Value {
    json!({
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
async fn test_empty_cart_is_conflict() {
    let payload = json!({
        "items": [],
        "customer": complete_customer(),
        "paymentMethod": "klarna"
    });

    let response = test_app()
        .oneshot(checkout_request(&payload))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert!(body["error"].as_str().expect("error message").contains("empty"));
}

#[tokio::test]
async fn test_zero_quantity_lines_count_as_empty() {
    let mut item = cart_item();
    item["quantity"] = json!(0);
    let payload = json!({
        "items": [item],
        "customer": complete_customer(),
        "paymentMethod": "klarna"
    });

    let response = test_app()
        .oneshot(checkout_request(&payload))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_missing_fields_are_listed_by_wire_name() {
    let mut customer = complete_customer();
    customer["postalCode"] = json!("");
    customer["phone"] = json!("   ");
    let payload = json!({
        "items": [cart_item()],
        "customer": customer,
        "paymentMethod": "klarna"
    });

    let response = test_app()
        .oneshot(checkout_request(&payload))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["missing_fields"], json!(["postalCode", "phone"]));
}

#[tokio::test]
async fn test_empty_cart_reported_before_missing_fields() {
    // Both problems present: the cart check wins.
    let payload = json!({
        "items": [],
        "customer": { "firstName": "", "lastName": "", "email": "", "address": "",
                      "postalCode": "", "city": "", "country": "", "phone": "" },
        "paymentMethod": "klarna"
    });

    let response = test_app()
        .oneshot(checkout_request(&payload))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_paypal_is_not_implemented() {
    let payload = json!({
        "items": [cart_item()],
        "customer": complete_customer(),
        "paymentMethod": "paypal"
    });

    let response = test_app()
        .oneshot(checkout_request(&payload))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn test_dummy_payment_requires_authentication() {
    let payload = json!({
        "items": [cart_item()],
        "customer": complete_customer(),
        "paymentMethod": "dummy"
    });

    let response = test_app()
        .oneshot(checkout_request(&payload))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_payment_method_rejected() {
    let payload = json!({
        "items": [cart_item()],
        "customer": complete_customer(),
        "paymentMethod": "bitcoin"
    });

    let response = test_app()
        .oneshot(checkout_request(&payload))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
