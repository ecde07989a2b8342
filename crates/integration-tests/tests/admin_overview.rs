//! Admin surface authentication tests.
//!
//! All admin endpoints must reject anonymous callers before touching the
//! database, so these run against a lazy pool with no server.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use mealkit_integration_tests::test_app;

#[tokio::test]
async fn test_overview_requires_auth() {
    let response = test_app()
        .oneshot(
            Request::get("/admin/overview")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_overview_rejects_non_bearer_scheme() {
    let response = test_app()
        .oneshot(
            Request::get("/admin/overview?tab=orderTracking")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_catalog_mutations_require_auth() {
    for (method, uri) in [
        ("POST", "/meals"),
        ("PUT", "/meals/6b4bb0f8-2c8e-4e6d-9f38-4a52a17c2b11"),
        ("DELETE", "/meals/6b4bb0f8-2c8e-4e6d-9f38-4a52a17c2b11"),
        ("GET", "/orders"),
        ("GET", "/newsletter"),
    ] {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{method} {uri} should require auth"
        );
    }
}
