use url::Url;

use crate::config::GatewayConfig;
use crate::routing::host::{auth_host_for, root_host_for, RequestContext};
use crate::routing::routes::{classify_route, RouteClass};
use crate::tenant::Tenant;

/// Outcome of the routing gate for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Pass through with tenant headers injected.
    Forward,
    /// 303 to a fully reconstructed scheme://host/path?query target.
    Redirect(String),
    /// HTML micro-page forcing a client-side top-level navigation.
    /// Used only for cross-label redirects on `*.localhost` dev hosts,
    /// where the dev proxy rewrites Location headers into same-origin
    /// relative redirects and loops forever.
    ClientRedirect(String),
    /// Subdomain present but no matching tenant: bounce to `/` on the
    /// current origin, never a 404.
    RedirectHome,
    /// Delegate to the shared-auth protect call, then forward.
    Protect,
}

/// Decide how to route one request. Total function of the host class,
/// route class, resolved tenant and session-cookie presence; no I/O.
pub fn decide(
    config: &GatewayConfig,
    ctx: &RequestContext,
    tenant: Option<&Tenant>,
    has_session_cookie: bool,
) -> Decision {
    let route = classify_route(&ctx.pathname);
    let bypassed = config
        .bypass_prefixes
        .iter()
        .any(|p| ctx.pathname.starts_with(p.as_str()));

    // Rule 1: marketing routes only render on the root host.
    if !bypassed && route == RouteClass::Marketing && !ctx.is_auth_host() && !ctx.is_root_host() {
        let (root_host, _) = root_host_for(&ctx.raw_host, &config.root_domain);
        let target = match &ctx.query {
            Some(q) => format!("{}://{}{}?{}", ctx.scheme(), root_host, ctx.pathname, q),
            None => format!("{}://{}{}", ctx.scheme(), root_host, ctx.pathname),
        };
        if ctx.hostname.ends_with(".localhost") || ctx.hostname.ends_with(".127.0.0.1") {
            return Decision::ClientRedirect(target);
        }
        return Decision::Redirect(target);
    }

    // Subdomain exists but no tenant: redirect home.
    if ctx.subdomain.is_some() && tenant.is_none() {
        return Decision::RedirectHome;
    }

    // Bypassed paths still got tenant resolution; nothing else applies.
    if bypassed {
        return Decision::Forward;
    }

    // Rule 2: auth UI routes only render on the auth host, so the page
    // is always wrapped in its required provider context.
    if route == RouteClass::AuthUi && !ctx.is_auth_host() {
        return auth_ui_redirect(config, ctx, tenant);
    }

    // Rule 3: protected route gating.
    if route == RouteClass::Protected {
        // Platform mode (apex + first-party subdomains): shared session.
        if ctx.is_platform(&config.root_domain) {
            return Decision::Protect;
        }

        // Whitelabel mode (vanity domains): tenant session cookie plus
        // auth-host bounce. Session validity itself is not re-checked
        // here; downstream handlers own that trust boundary.
        if !ctx.is_auth_host() {
            if !has_session_cookie {
                return whitelabel_sign_in_redirect(config, ctx, tenant);
            }
            return Decision::Forward;
        }

        // On the auth host, enforce shared auth normally.
        return Decision::Protect;
    }

    Decision::Forward
}

/// Redirect to the same path on the auth host, forwarding all query
/// params and guaranteeing `return_to` and `tenant` are present.
fn auth_ui_redirect(
    config: &GatewayConfig,
    ctx: &RequestContext,
    tenant: Option<&Tenant>,
) -> Decision {
    let auth_host = auth_host_for(&ctx.raw_host, &config.root_domain);
    let base = format!("{}://{}{}", ctx.scheme(), auth_host, ctx.pathname);
    let mut url = match Url::parse(&base) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Unparseable auth redirect target '{}': {}", base, e);
            return Decision::Forward;
        }
    };

    // Forward existing query params with replace semantics: a repeated
    // key keeps its last value, matching URLSearchParams.set.
    let mut params: Vec<(String, String)> = Vec::new();
    if let Some(q) = &ctx.query {
        for (key, value) in url::form_urlencoded::parse(q.as_bytes()) {
            match params.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = value.into_owned(),
                None => params.push((key.into_owned(), value.into_owned())),
            }
        }
    }

    if !params.iter().any(|(k, v)| k == "return_to" && !v.is_empty()) {
        // Never default return_to to a path on the tenant host; the
        // bare origin cannot itself re-trigger an auth redirect.
        params.retain(|(k, _)| k != "return_to");
        params.push(("return_to".to_string(), ctx.origin()));
    }
    if !params.iter().any(|(k, v)| k == "tenant" && !v.is_empty()) {
        if let Some(tenant) = tenant {
            params.retain(|(k, _)| k != "tenant");
            params.push(("tenant".to_string(), tenant.slug.clone()));
        }
    }

    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        pairs.extend_pairs(params);
    }

    Decision::Redirect(url.into())
}

/// Whitelabel protected route without a session cookie: bounce to the
/// auth host sign-in with the full current URL as the return target.
fn whitelabel_sign_in_redirect(
    config: &GatewayConfig,
    ctx: &RequestContext,
    tenant: Option<&Tenant>,
) -> Decision {
    let auth_host = auth_host_for(&ctx.raw_host, &config.root_domain);
    let base = format!("{}://{}/sign-in", ctx.scheme(), auth_host);
    let mut url = match Url::parse(&base) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Unparseable sign-in redirect target '{}': {}", base, e);
            return Decision::Forward;
        }
    };

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("return_to", &ctx.full_url());
        if let Some(tenant) = tenant {
            pairs.append_pair("tenant", &tenant.slug);
        }
    }

    Decision::Redirect(url.into())
}

/// Minimal HTML document performing a client-side top-level navigation.
/// The script target is JSON-escaped so arbitrary URLs stay inert.
pub fn client_redirect_html(target: &str) -> String {
    let quoted =
        serde_json::to_string(target).unwrap_or_else(|_| "\"/\"".to_string());
    format!(
        r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8" />
    <meta http-equiv="refresh" content="0; url={target}" />
    <title>Redirecting…</title>
  </head>
  <body>
    <script>
      window.location.replace({quoted});
    </script>
    <noscript>
      <a href="{target}">Continue</a>
    </noscript>
  </body>
</html>"#
    )
}
