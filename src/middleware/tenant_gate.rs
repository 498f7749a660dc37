use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::COOKIE, HeaderMap, HeaderValue},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::auth::AuthGate;
use crate::config::GatewayConfig;
use crate::routing::decision::{client_redirect_html, decide, Decision};
use crate::routing::RequestContext;
use crate::tenant::{resolve_tenant, Tenant, TenantStore};

pub const HEADER_PATHNAME: &str = "x-pathname";
pub const HEADER_TENANT_ID: &str = "x-tenant-id";
pub const HEADER_TENANT_SLUG: &str = "x-tenant-slug";
pub const HEADER_TENANT_NAME: &str = "x-tenant-name";
pub const HEADER_TENANT_CUSTOM_DOMAIN: &str = "x-tenant-custom-domain";

/// Shared state for the gate: config plus the two external collaborators.
pub struct GatewayState {
    pub config: GatewayConfig,
    pub store: Arc<dyn TenantStore>,
    pub auth: Arc<dyn AuthGate>,
}

/// Resolved tenant context, injected as a request extension so
/// downstream handlers can read tenant scoping without re-resolving it.
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub pathname: String,
    pub tenant: Option<Tenant>,
}

/// The routing gate. Stateless per request: re-derives host class,
/// tenant and route class from the incoming request alone, then either
/// redirects or forwards with injected tenant headers.
pub async fn tenant_gate(
    State(state): State<Arc<GatewayState>>,
    request: Request,
    next: Next,
) -> Response {
    let headers = request.headers();
    let ctx = RequestContext::new(
        header_str(headers, "host"),
        header_str(headers, "x-forwarded-host"),
        header_str(headers, "x-forwarded-proto"),
        request.uri().path(),
        request.uri().query(),
        &state.config,
    );

    // Single awaited lookup per request; no caching by design.
    let tenant = resolve_tenant(state.store.as_ref(), &ctx).await;
    let has_session_cookie = cookie_value(headers, &state.config.session_cookie).is_some();

    match decide(&state.config, &ctx, tenant.as_ref(), has_session_cookie) {
        Decision::Redirect(target) => {
            tracing::debug!("Redirecting {} {} -> {}", ctx.raw_host, ctx.pathname, target);
            Redirect::to(&target).into_response()
        }
        Decision::ClientRedirect(target) => {
            tracing::debug!(
                "Client redirect for dev subdomain {} -> {}",
                ctx.raw_host,
                target
            );
            Html(client_redirect_html(&target)).into_response()
        }
        Decision::RedirectHome => {
            tracing::debug!(
                "No tenant for subdomain on {}; redirecting home",
                ctx.raw_host
            );
            Redirect::to("/").into_response()
        }
        Decision::Protect => {
            if let Err(response) = state.auth.protect(request.headers()).await {
                return response;
            }
            forward(ctx, tenant, request, next).await
        }
        Decision::Forward => forward(ctx, tenant, request, next).await,
    }
}

/// Inject resolved context into the forwarded request, run the inner
/// service, then mirror the tenant identity onto the response so it is
/// observable by diagnostics/caching layers.
async fn forward(
    ctx: RequestContext,
    tenant: Option<Tenant>,
    mut request: Request,
    next: Next,
) -> Response {
    set_header(request.headers_mut(), HEADER_PATHNAME, &ctx.pathname);
    if let Some(tenant) = &tenant {
        set_header(request.headers_mut(), HEADER_TENANT_ID, &tenant.id.to_string());
        set_header(request.headers_mut(), HEADER_TENANT_SLUG, &tenant.slug);
        set_header(request.headers_mut(), HEADER_TENANT_NAME, &tenant.name);
        if let Some(domain) = &tenant.custom_domain {
            set_header(request.headers_mut(), HEADER_TENANT_CUSTOM_DOMAIN, domain);
        }
    }

    let context = TenantContext {
        pathname: ctx.pathname.clone(),
        tenant: tenant.clone(),
    };
    request.extensions_mut().insert(context);

    let mut response = next.run(request).await;

    set_header(response.headers_mut(), HEADER_PATHNAME, &ctx.pathname);
    if let Some(tenant) = &tenant {
        set_header(response.headers_mut(), HEADER_TENANT_ID, &tenant.id.to_string());
        set_header(response.headers_mut(), HEADER_TENANT_SLUG, &tenant.slug);
    }

    response
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Header values come from tenant records; anything that is not a valid
/// header value is skipped rather than failing the request.
fn set_header(headers: &mut HeaderMap, name: &'static str, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(value) => {
            headers.insert(name, value);
        }
        Err(_) => {
            tracing::warn!("Skipping invalid header value for {}", name);
        }
    }
}

/// Read one cookie value from the `Cookie` header(s). Returns `None`
/// for missing or empty values.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(raw) = header.to_str() else { continue };
        for pair in raw.split(';') {
            let mut parts = pair.trim().splitn(2, '=');
            if parts.next() == Some(name) {
                if let Some(value) = parts.next().filter(|v| !v.is_empty()) {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}
