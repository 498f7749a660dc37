use std::env;

/// Fallback root domain when none is configured.
pub const DEFAULT_ROOT_DOMAIN: &str = "traderlaunchpad.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Gateway configuration. Built once at process start and passed
/// explicitly into the router state; there is no global singleton.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub environment: Environment,
    /// The single required input: all host classification is derived
    /// relative to this domain. Stored without port, lowercased.
    pub root_domain: String,
    pub port: u16,
    /// Name of the whitelabel tenant-session cookie checked on
    /// custom-domain protected routes.
    pub session_cookie: String,
    /// Secret for the shared-auth JWT check on platform hosts.
    pub jwt_secret: String,
    /// Tenant registry connection string; when absent the gateway falls
    /// back to the static fixture store.
    pub database_url: Option<String>,
    /// Path to a JSON tenant fixture file for the static store.
    pub tenant_fixtures: Option<String>,
    /// Path prefixes that skip canonicalization and protected gating
    /// while still getting tenant resolution + header injection.
    pub bypass_prefixes: Vec<String>,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let root_domain = env::var("ROOT_DOMAIN")
            .ok()
            .map(|d| normalize_root_domain(&d))
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_ROOT_DOMAIN.to_string());

        // Allow tests or deployments to override port via env
        let port = env::var("GATEWAY_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(3000);

        let session_cookie =
            env::var("SESSION_COOKIE").unwrap_or_else(|_| "tenant_session".to_string());
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_default();
        let database_url = env::var("DATABASE_URL").ok().filter(|v| !v.is_empty());
        let tenant_fixtures = env::var("TENANT_FIXTURES").ok().filter(|v| !v.is_empty());

        let bypass_prefixes = match env::var("BYPASS_PREFIXES") {
            Ok(v) => v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => vec!["/api/og/".to_string()],
        };

        Self {
            environment,
            root_domain,
            port,
            session_cookie,
            jwt_secret,
            database_url,
            tenant_fixtures,
            bypass_prefixes,
        }
    }

    /// Construct a config with defaults for the given root domain.
    /// Used at test sites and anywhere env loading is not wanted.
    pub fn for_root_domain(root_domain: &str) -> Self {
        Self {
            environment: Environment::Development,
            root_domain: normalize_root_domain(root_domain),
            port: 3000,
            session_cookie: "tenant_session".to_string(),
            jwt_secret: String::new(),
            database_url: None,
            tenant_fixtures: None,
            bypass_prefixes: vec!["/api/og/".to_string()],
        }
    }
}

/// Root domain values may arrive as `host:port`; only the hostname part
/// participates in classification.
fn normalize_root_domain(raw: &str) -> String {
    raw.trim().split(':').next().unwrap_or("").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_domain_is_normalized() {
        let config = GatewayConfig::for_root_domain("Acme.COM:3000");
        assert_eq!(config.root_domain, "acme.com");
    }

    #[test]
    fn defaults_cover_dev_usage() {
        let config = GatewayConfig::for_root_domain(DEFAULT_ROOT_DOMAIN);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.port, 3000);
        assert_eq!(config.session_cookie, "tenant_session");
        assert_eq!(config.bypass_prefixes, vec!["/api/og/".to_string()]);
    }
}
