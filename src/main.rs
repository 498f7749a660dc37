use std::sync::Arc;

use launchpad_gateway::auth::JwtAuthGate;
use launchpad_gateway::config::GatewayConfig;
use launchpad_gateway::middleware::GatewayState;
use launchpad_gateway::server;
use launchpad_gateway::tenant::postgres::PgTenantStore;
use launchpad_gateway::tenant::{StaticTenantStore, TenantStore};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up ROOT_DOMAIN, DATABASE_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = GatewayConfig::from_env();
    tracing::info!(
        "Starting launchpad-gateway in {:?} mode for root domain '{}'",
        config.environment,
        config.root_domain
    );

    let store: Arc<dyn TenantStore> = match &config.database_url {
        Some(url) => {
            let store = PgTenantStore::connect(url, 10)
                .await
                .unwrap_or_else(|e| panic!("failed to connect tenant registry: {}", e));
            Arc::new(store)
        }
        None => match &config.tenant_fixtures {
            Some(path) => {
                let store = StaticTenantStore::from_file(path)
                    .unwrap_or_else(|e| panic!("failed to load tenant fixtures {}: {}", path, e));
                Arc::new(store)
            }
            None => {
                tracing::warn!(
                    "No DATABASE_URL or TENANT_FIXTURES configured; serving the platform tenant only"
                );
                Arc::new(StaticTenantStore::platform_only())
            }
        },
    };

    let auth = Arc::new(JwtAuthGate::new(config.jwt_secret.clone()));
    let state = Arc::new(GatewayState {
        config: config.clone(),
        store,
        auth,
    });

    let app = server::app(state);

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 launchpad-gateway listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
