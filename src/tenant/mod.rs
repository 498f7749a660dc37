pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::routing::host::HostClass;
use crate::routing::RequestContext;

/// Slug of the default tenant resolved on the root/auth/bare-dev hosts.
pub const PLATFORM_SLUG: &str = "platform";

/// An organization/workspace, resolved once per request. The gateway
/// never mutates tenants; writes happen in unrelated admin code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    /// Subdomain-safe unique identifier.
    pub slug: String,
    pub name: String,
    pub custom_domain: Option<String>,
    #[serde(default)]
    pub custom_domain_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum TenantStoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Read-side tenant lookup collaborator. Resolution is recomputed per
/// request; implementations do not need to cache.
#[async_trait]
pub trait TenantStore: Send + Sync {
    /// Resolve a tenant by slug. `None` resolves the platform default.
    async fn by_slug(&self, slug: Option<&str>) -> Result<Option<Tenant>, TenantStoreError>;

    /// Resolve a tenant by custom domain. Only verified domains match.
    async fn by_custom_domain(&self, hostname: &str) -> Result<Option<Tenant>, TenantStoreError>;

    async fn health(&self) -> Result<(), TenantStoreError> {
        Ok(())
    }
}

/// Map a classified host to a concrete tenant.
///
/// A failed lookup degrades to `None` ("tenant not found") rather than
/// an error: for an explicit subdomain the caller redirects to the
/// application root and never confirms or denies tenant existence.
pub async fn resolve_tenant(store: &dyn TenantStore, ctx: &RequestContext) -> Option<Tenant> {
    let lookup = match &ctx.host_class {
        HostClass::TenantSubdomain(slug) => store.by_slug(Some(slug)).await,
        HostClass::CustomDomain => store.by_custom_domain(&ctx.hostname).await,
        HostClass::Root | HostClass::WwwRoot | HostClass::Auth | HostClass::LocalDev => {
            store.by_slug(None).await
        }
    };

    match lookup {
        Ok(tenant) => tenant,
        Err(e) => {
            tracing::warn!("Tenant lookup failed for host '{}': {}", ctx.raw_host, e);
            None
        }
    }
}

/// In-memory tenant store: dev fixture fallback and test double.
#[derive(Debug, Clone, Default)]
pub struct StaticTenantStore {
    tenants: Vec<Tenant>,
}

impl StaticTenantStore {
    pub fn new(tenants: Vec<Tenant>) -> Self {
        Self { tenants }
    }

    /// A store holding only the platform tenant, for dev startup with
    /// no registry configured.
    pub fn platform_only() -> Self {
        let now = Utc::now();
        Self::new(vec![Tenant {
            id: Uuid::new_v4(),
            slug: PLATFORM_SLUG.to_string(),
            name: "Platform".to_string(),
            custom_domain: None,
            custom_domain_verified: false,
            created_at: now,
            updated_at: now,
        }])
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let tenants: Vec<Tenant> = serde_json::from_slice(bytes)?;
        Ok(Self::new(tenants))
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_json(&bytes)?)
    }
}

#[async_trait]
impl TenantStore for StaticTenantStore {
    async fn by_slug(&self, slug: Option<&str>) -> Result<Option<Tenant>, TenantStoreError> {
        let slug = slug.unwrap_or(PLATFORM_SLUG);
        Ok(self.tenants.iter().find(|t| t.slug == slug).cloned())
    }

    async fn by_custom_domain(&self, hostname: &str) -> Result<Option<Tenant>, TenantStoreError> {
        Ok(self
            .tenants
            .iter()
            .find(|t| t.custom_domain_verified && t.custom_domain.as_deref() == Some(hostname))
            .cloned())
    }
}
