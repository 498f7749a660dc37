use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::Json,
    routing::get,
    Extension, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{tenant_gate, GatewayState, TenantContext};
use crate::tenant::TenantStore;

/// Build the gateway router. The tenant gate wraps every route,
/// including the fallback that stands in for downstream pages.
pub fn app(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .fallback(tenant_echo)
        .layer(from_fn_with_state(state.clone(), tenant_gate))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root(context: Option<Extension<TenantContext>>) -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Launchpad Gateway",
            "version": version,
            "description": "Multi-tenant host routing and session-binding gateway (Axum)",
            "tenant": tenant_json(context.as_ref().map(|c| &c.0)),
        }
    }))
}

async fn health(State(state): State<Arc<GatewayState>>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "tenant_store": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "tenant store unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "tenant_store_error": e.to_string()
                }
            })),
        ),
    }
}

/// Stand-in for downstream pages: echoes the tenant context the gate
/// resolved, demonstrating header/extension consumption.
async fn tenant_echo(context: Option<Extension<TenantContext>>) -> Json<Value> {
    let context = context.as_ref().map(|c| &c.0);
    Json(json!({
        "success": true,
        "data": {
            "pathname": context.map(|c| c.pathname.clone()),
            "tenant": tenant_json(context),
        }
    }))
}

fn tenant_json(context: Option<&TenantContext>) -> Value {
    match context.and_then(|c| c.tenant.as_ref()) {
        Some(tenant) => json!({
            "id": tenant.id,
            "slug": tenant.slug,
            "name": tenant.name,
            "custom_domain": tenant.custom_domain,
        }),
        None => Value::Null,
    }
}
