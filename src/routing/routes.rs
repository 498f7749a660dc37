/// Route classes consumed by the canonicalization rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Public marketing pages; only reachable on the root host.
    Marketing,
    /// Auth UI pages; only reachable on the auth host.
    AuthUi,
    /// Requires an authenticated session.
    Protected,
    Other,
}

#[derive(Debug, Clone, Copy)]
pub enum Pattern {
    Exact(&'static str),
    Prefix(&'static str),
}

impl Pattern {
    fn matches(&self, pathname: &str) -> bool {
        match self {
            Pattern::Exact(p) => pathname == *p,
            Pattern::Prefix(p) => pathname.starts_with(p),
        }
    }
}

/// Ordered (pattern, class) table. First match wins; unmatched paths
/// are `Other`. Keep the marketing list intentionally small/explicit.
pub const ROUTE_TABLE: &[(Pattern, RouteClass)] = &[
    // Routes requiring authentication.
    (Pattern::Prefix("/admin"), RouteClass::Protected),
    (Pattern::Prefix("/platform"), RouteClass::Protected),
    (Pattern::Prefix("/journal"), RouteClass::Protected),
    // Auth UI routes, bound to the auth host.
    (Pattern::Prefix("/sign-in"), RouteClass::AuthUi),
    (Pattern::Prefix("/sign-up"), RouteClass::AuthUi),
    (Pattern::Prefix("/sso-callback"), RouteClass::AuthUi),
    (Pattern::Prefix("/sign-out"), RouteClass::AuthUi),
    // Marketing pages, bound to the root host.
    (Pattern::Exact("/brokers"), RouteClass::Marketing),
    (Pattern::Prefix("/broker/"), RouteClass::Marketing),
    (Pattern::Exact("/firms"), RouteClass::Marketing),
    (Pattern::Prefix("/firm/"), RouteClass::Marketing),
    (Pattern::Exact("/prop-firms"), RouteClass::Marketing),
    (Pattern::Exact("/orgs"), RouteClass::Marketing),
    (Pattern::Exact("/symbols"), RouteClass::Marketing),
    (Pattern::Prefix("/s/"), RouteClass::Marketing),
];

/// Classify a request path. A single trailing slash is normalized away
/// before matching so `/brokers/` and `/brokers` agree.
pub fn classify_route(pathname: &str) -> RouteClass {
    let normalized = if pathname.ends_with('/') && pathname.len() > 1 {
        &pathname[..pathname.len() - 1]
    } else {
        pathname
    };

    for (pattern, class) in ROUTE_TABLE {
        if pattern.matches(normalized) {
            return *class;
        }
    }
    RouteClass::Other
}
