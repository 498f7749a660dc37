use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use uuid::Uuid;

use launchpad_gateway::auth::JwtAuthGate;
use launchpad_gateway::config::GatewayConfig;
use launchpad_gateway::middleware::GatewayState;
use launchpad_gateway::server;
use launchpad_gateway::tenant::{StaticTenantStore, Tenant};

pub const JWT_SECRET: &str = "integration-test-secret";
pub const ROOT: &str = "traderlaunchpad.com";

pub fn tenant(slug: &str, custom_domain: Option<&str>, verified: bool) -> Tenant {
    let now = Utc::now();
    Tenant {
        id: Uuid::new_v4(),
        slug: slug.to_string(),
        name: format!("{} org", slug),
        custom_domain: custom_domain.map(|d| d.to_string()),
        custom_domain_verified: verified,
        created_at: now,
        updated_at: now,
    }
}

/// Gateway wired to an in-memory registry: the platform tenant, two
/// subdomain tenants, and one verified custom domain.
pub fn test_app() -> Router {
    test_app_for_root(ROOT)
}

pub fn test_app_for_root(root_domain: &str) -> Router {
    let mut config = GatewayConfig::for_root_domain(root_domain);
    config.jwt_secret = JWT_SECRET.to_string();

    let store = StaticTenantStore::new(vec![
        tenant("platform", None, false),
        tenant("shop", None, false),
        tenant("tenant1", None, false),
        tenant("customclient-slug", Some("customclient.io"), true),
    ]);

    let state = Arc::new(GatewayState {
        config,
        store: Arc::new(store),
        auth: Arc::new(JwtAuthGate::new(JWT_SECRET.to_string())),
    });
    server::app(state)
}

pub fn get(host: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("host", host)
        .body(Body::empty())
        .expect("request")
}

pub async fn body_string(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    String::from_utf8_lossy(&bytes).into_owned()
}

pub fn location(response: &Response) -> String {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
