use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use super::{Tenant, TenantStore, TenantStoreError, PLATFORM_SLUG};

const TENANT_COLUMNS: &str =
    "id, slug, name, custom_domain, custom_domain_verified, created_at, updated_at";

/// Tenant registry backed by Postgres. One read per request; soft-deleted
/// rows never match.
pub struct PgTenantStore {
    pool: PgPool,
}

impl PgTenantStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, TenantStoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    fn tenant_from_row(row: &sqlx::postgres::PgRow) -> Tenant {
        Tenant {
            id: row.get("id"),
            slug: row.get("slug"),
            name: row.get("name"),
            custom_domain: row.get("custom_domain"),
            custom_domain_verified: row.get("custom_domain_verified"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}

#[async_trait]
impl TenantStore for PgTenantStore {
    async fn by_slug(&self, slug: Option<&str>) -> Result<Option<Tenant>, TenantStoreError> {
        let slug = slug.unwrap_or(PLATFORM_SLUG);

        let query = format!(
            "SELECT {TENANT_COLUMNS} FROM tenants WHERE slug = $1 AND deleted_at IS NULL"
        );
        let row = sqlx::query(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| Self::tenant_from_row(&r)))
    }

    async fn by_custom_domain(&self, hostname: &str) -> Result<Option<Tenant>, TenantStoreError> {
        let query = format!(
            "SELECT {TENANT_COLUMNS} FROM tenants \
             WHERE custom_domain = $1 AND custom_domain_verified = true AND deleted_at IS NULL"
        );
        let row = sqlx::query(&query)
            .bind(hostname)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| Self::tenant_from_row(&r)))
    }

    async fn health(&self) -> Result<(), TenantStoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
