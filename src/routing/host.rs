use crate::config::GatewayConfig;

/// Sentinel used when the request carries no Host header at all.
/// It classifies as neither auth nor root and falls through to default
/// tenant resolution instead of erroring.
pub const UNKNOWN_HOST: &str = "unknown-host";

/// Mutually exclusive host classes. Every request is in exactly one of
/// these at any time; all routing decisions branch on this plus the
/// route class and session-cookie presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostClass {
    /// The apex root/platform host (e.g. `traderlaunchpad.com`).
    Root,
    /// `www.` prefix on the root host, treated as root for routing.
    WwwRoot,
    /// The shared auth host (`auth.{root}`, or `auth.localhost` in dev).
    Auth,
    /// A tenant subdomain under the root domain, a `*.localhost` dev
    /// subdomain, or a Vercel-style preview host. Carries the slug.
    TenantSubdomain(String),
    /// Anything else: a whitelabeled vanity domain (verified or not).
    CustomDomain,
    /// Bare `localhost` / `127.0.0.1` without a subdomain label.
    LocalDev,
}

/// Split a raw `Host` header value into a lowercased hostname and an
/// optional port. Malformed input degrades to an empty hostname rather
/// than an error.
pub fn split_host(raw: &str) -> (String, Option<String>) {
    let normalized = raw.trim().to_lowercase();
    let mut parts = normalized.splitn(2, ':');
    let hostname = parts.next().unwrap_or("").to_string();
    let port = parts.next().filter(|p| !p.is_empty()).map(|p| p.to_string());
    (hostname, port)
}

pub fn is_local_host(hostname: &str) -> bool {
    hostname == "localhost"
        || hostname == "127.0.0.1"
        || hostname.ends_with(".localhost")
        || hostname.ends_with(".127.0.0.1")
}

/// Compute the auth host for the current request. In dev the auth UI
/// lives on `auth.localhost` (or `auth.127.0.0.1`) with the same port;
/// everywhere else it is `auth.{root}`.
pub fn auth_host_for(host: &str, root_domain: &str) -> String {
    let (hostname, port) = split_host(host);

    if is_local_host(&hostname) {
        let base = if hostname == "127.0.0.1" || hostname.ends_with(".127.0.0.1") {
            "127.0.0.1"
        } else {
            "localhost"
        };
        return match port {
            Some(p) => format!("auth.{}:{}", base, p),
            None => format!("auth.{}", base),
        };
    }

    if root_domain.is_empty() {
        return format!("auth.{}", crate::config::DEFAULT_ROOT_DOMAIN);
    }
    format!("auth.{}", root_domain)
}

/// Compute the canonical root host plus its default scheme.
/// Dev: `tenant.localhost:3000` canonicalizes to `localhost:3000` over http.
pub fn root_host_for(host: &str, root_domain: &str) -> (String, &'static str) {
    let (hostname, port) = split_host(host);

    if is_local_host(&hostname) {
        let base = if hostname == "127.0.0.1" || hostname.ends_with(".127.0.0.1") {
            "127.0.0.1"
        } else {
            "localhost"
        };
        let host = match port {
            Some(p) => format!("{}:{}", base, p),
            None => base.to_string(),
        };
        return (host, "http");
    }

    if root_domain.is_empty() {
        return (crate::config::DEFAULT_ROOT_DOMAIN.to_string(), "https");
    }
    (root_domain.to_string(), "https")
}

/// Extract the tenant subdomain from a hostname, handling localhost dev
/// hosts, Vercel preview hosts (`slug---project.vercel.app`), and real
/// subdomains under the root domain.
pub fn extract_subdomain(hostname: &str, root_domain: &str) -> Option<String> {
    if is_local_host(hostname) {
        if hostname.contains(".localhost") || hostname.contains(".127.0.0.1") {
            let sub = hostname.split('.').next().unwrap_or("");
            return if sub.is_empty() { None } else { Some(sub.to_string()) };
        }
        return None;
    }

    // Vercel preview: slug---project.vercel.app
    if hostname.contains("---") && hostname.ends_with(".vercel.app") {
        let sub = hostname.split("---").next().unwrap_or("");
        return if sub.is_empty() { None } else { Some(sub.to_string()) };
    }

    if root_domain.is_empty() {
        return None;
    }

    let www = format!("www.{}", root_domain);
    let suffix = format!(".{}", root_domain);
    if hostname != root_domain && hostname != www && hostname.ends_with(&suffix) {
        return hostname
            .strip_suffix(&suffix)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());
    }

    None
}

/// Platform mode covers the apex plus first-party subdomains under the
/// shared auth domain; vanity (custom) domains are whitelabel mode.
pub fn is_platform_host(hostname: &str, root_domain: &str) -> bool {
    if is_local_host(hostname) {
        return true;
    }
    if root_domain.is_empty() {
        return false;
    }
    hostname == root_domain
        || hostname == format!("www.{}", root_domain)
        || hostname.ends_with(&format!(".{}", root_domain))
}

/// Classify a raw `Host` header value relative to the configured root
/// domain. Pure function of its inputs.
pub fn classify(raw_host: &str, root_domain: &str) -> HostClass {
    let (hostname, _) = split_host(raw_host);
    let (auth_hostname, _) = split_host(&auth_host_for(raw_host, root_domain));

    if hostname == auth_hostname {
        return HostClass::Auth;
    }

    let subdomain = extract_subdomain(&hostname, root_domain);

    // A literal `auth` label anywhere (e.g. a preview host) still binds
    // to the auth class, never to a tenant.
    if subdomain.as_deref() == Some("auth") {
        return HostClass::Auth;
    }

    if is_local_host(&hostname) {
        return match subdomain {
            Some(slug) => HostClass::TenantSubdomain(slug),
            None => HostClass::LocalDev,
        };
    }

    if !root_domain.is_empty() {
        if hostname == root_domain {
            return HostClass::Root;
        }
        if hostname == format!("www.{}", root_domain) {
            return HostClass::WwwRoot;
        }
    }

    match subdomain {
        Some(slug) => HostClass::TenantSubdomain(slug),
        None => HostClass::CustomDomain,
    }
}

/// Ephemeral, request-scoped routing context. Created at the start of
/// the gate, discarded once the response is produced.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Normalized `host[:port]` as received (x-forwarded-host wins).
    pub raw_host: String,
    pub hostname: String,
    pub port: Option<String>,
    pub host_class: HostClass,
    /// Tenant subdomain, if any. Always `None` on the auth host.
    pub subdomain: Option<String>,
    pub pathname: String,
    /// Raw query string without the leading `?`.
    pub query: Option<String>,
    /// First entry of `x-forwarded-proto`, lowercased.
    pub forwarded_proto: Option<String>,
}

impl RequestContext {
    pub fn new(
        host_header: Option<&str>,
        forwarded_host: Option<&str>,
        forwarded_proto: Option<&str>,
        pathname: &str,
        query: Option<&str>,
        config: &GatewayConfig,
    ) -> Self {
        let raw_host = forwarded_host
            .or(host_header)
            .map(|h| h.trim().to_lowercase())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| UNKNOWN_HOST.to_string());

        let (hostname, port) = split_host(&raw_host);
        let host_class = classify(&raw_host, &config.root_domain);
        let subdomain = match &host_class {
            HostClass::TenantSubdomain(slug) => Some(slug.clone()),
            _ => None,
        };
        let forwarded_proto = forwarded_proto
            .and_then(|p| p.split(',').next())
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty());

        Self {
            raw_host,
            hostname,
            port,
            host_class,
            subdomain,
            pathname: pathname.to_string(),
            query: query.map(|q| q.to_string()),
            forwarded_proto,
        }
    }

    pub fn is_auth_host(&self) -> bool {
        self.host_class == HostClass::Auth
    }

    /// Root-host check: apex or www on real domains, bare localhost in dev.
    pub fn is_root_host(&self) -> bool {
        matches!(
            self.host_class,
            HostClass::Root | HostClass::WwwRoot | HostClass::LocalDev
        )
    }

    pub fn is_platform(&self, root_domain: &str) -> bool {
        is_platform_host(&self.hostname, root_domain)
    }

    /// Scheme for reconstructed URLs: honor `x-forwarded-proto` when it
    /// says http, force http for local dev, https otherwise.
    pub fn scheme(&self) -> &'static str {
        if self.forwarded_proto.as_deref() == Some("http") || is_local_host(&self.hostname) {
            "http"
        } else {
            "https"
        }
    }

    pub fn origin(&self) -> String {
        format!("{}://{}", self.scheme(), self.raw_host)
    }

    /// Full current URL, used as the `return_to` target for sign-in bounces.
    pub fn full_url(&self) -> String {
        match &self.query {
            Some(q) => format!("{}{}?{}", self.origin(), self.pathname, q),
            None => format!("{}{}", self.origin(), self.pathname),
        }
    }
}
