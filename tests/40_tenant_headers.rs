mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

#[tokio::test]
async fn forwarded_requests_carry_tenant_headers_on_the_response() {
    let app = common::test_app();

    let res = app
        .oneshot(common::get("shop.traderlaunchpad.com", "/dashboard-preview"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("x-pathname").unwrap().to_str().unwrap(),
        "/dashboard-preview"
    );
    assert_eq!(
        res.headers().get("x-tenant-slug").unwrap().to_str().unwrap(),
        "shop"
    );
    assert!(res.headers().get("x-tenant-id").is_some());

    let body = common::body_string(res).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["data"]["tenant"]["slug"], "shop");
    assert_eq!(json["data"]["pathname"], "/dashboard-preview");
}

// Scenario: unknown subdomain never yields an error page; the caller is
// bounced to the application root without confirming tenant existence.
#[tokio::test]
async fn unknown_subdomain_redirects_to_application_root() {
    let app = common::test_app();

    let res = app
        .oneshot(common::get("unknownsub.traderlaunchpad.com", "/anything"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&res), "/");
}

#[tokio::test]
async fn missing_host_header_degrades_without_tenant_headers() {
    let app = common::test_app();

    let req = Request::builder()
        .method("GET")
        .uri("/some-page")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("x-pathname").unwrap().to_str().unwrap(),
        "/some-page"
    );
    assert!(res.headers().get("x-tenant-slug").is_none());
    assert!(res.headers().get("x-tenant-id").is_none());
}

#[tokio::test]
async fn forwarded_host_header_takes_precedence() {
    let app = common::test_app();

    let req = Request::builder()
        .method("GET")
        .uri("/dashboard-preview")
        .header("host", "internal-lb:8080")
        .header("x-forwarded-host", "shop.traderlaunchpad.com")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("x-tenant-slug").unwrap().to_str().unwrap(),
        "shop"
    );
}

#[tokio::test]
async fn bypass_prefix_still_resolves_tenant_headers() {
    let app = common::test_app();

    let res = app
        .oneshot(common::get("shop.traderlaunchpad.com", "/api/og/card.png"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("x-tenant-slug").unwrap().to_str().unwrap(),
        "shop"
    );
}

#[tokio::test]
async fn health_reports_tenant_store_status() {
    let app = common::test_app();

    let res = app
        .oneshot(common::get("traderlaunchpad.com", "/health"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = common::body_string(res).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["data"]["tenant_store"], "ok");
}
