mod common;

use axum::http::StatusCode;
use tower::ServiceExt;
use url::Url;

#[tokio::test]
async fn sign_in_on_tenant_subdomain_redirects_to_auth_host() {
    let app = common::test_app();

    let res = app
        .oneshot(common::get("shop.traderlaunchpad.com", "/sign-in?foo=bar"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let target = Url::parse(&common::location(&res)).unwrap();
    assert_eq!(target.host_str(), Some("auth.traderlaunchpad.com"));
    assert_eq!(target.path(), "/sign-in");

    let pairs: Vec<(String, String)> = target
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert!(pairs.contains(&("foo".to_string(), "bar".to_string())));
    assert!(pairs
        .iter()
        .any(|(k, v)| k == "return_to" && v == "https://shop.traderlaunchpad.com"));
    assert!(pairs.iter().any(|(k, v)| k == "tenant" && v == "shop"));
}

// Scenario: verified custom domain hits the auth UI; the redirect binds
// the tenant slug so the auth host can bounce back afterward.
#[tokio::test]
async fn sign_in_on_custom_domain_redirects_with_tenant_binding() {
    let app = common::test_app();

    let res = app
        .oneshot(common::get("customclient.io", "/sign-in"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let target = Url::parse(&common::location(&res)).unwrap();
    assert_eq!(target.host_str(), Some("auth.traderlaunchpad.com"));
    assert_eq!(target.scheme(), "https");
    assert!(target
        .query_pairs()
        .any(|(k, v)| k == "tenant" && v == "customclient-slug"));

    let return_to: Vec<String> = target
        .query_pairs()
        .filter(|(k, _)| k == "return_to")
        .map(|(_, v)| v.into_owned())
        .collect();
    assert_eq!(return_to.len(), 1);
    assert!(!return_to[0].is_empty());
}

#[tokio::test]
async fn sign_in_on_auth_host_passes_through_unmodified() {
    let app = common::test_app();

    let res = app
        .oneshot(common::get("auth.traderlaunchpad.com", "/sign-in"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get("location").is_none());
}

#[tokio::test]
async fn auth_redirect_always_carries_non_empty_return_to() {
    let app = common::test_app();

    // An empty caller-supplied return_to does not count as present.
    let res = app
        .oneshot(common::get("shop.traderlaunchpad.com", "/sign-up?return_to="))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let target = Url::parse(&common::location(&res)).unwrap();
    assert!(target
        .query_pairs()
        .any(|(k, v)| k == "return_to" && !v.is_empty()));
}
