//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::{GraphQLExposure, RestExposure};
use super::host::ServerHost;
use crate::config::{FeedConfig, GraphQLConfig, StorageBackend};
use crate::core::auth::{AuthProvider, JwtAuthProvider, NoAuthProvider};
use crate::core::store::FeedStore;
use crate::links::FeedService;
use crate::storage::InMemoryStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the feed HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryStore::new())
///     .with_auth_provider(JwtAuthProvider::new("secret"))
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn FeedStore>>,
    auth_provider: Option<Arc<dyn AuthProvider>>,
    graphql: GraphQLConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            auth_provider: None,
            graphql: GraphQLConfig::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Create a builder from configuration
    ///
    /// Picks the store backend and the identity provider the configuration
    /// asks for. Connecting to PostgreSQL also applies its schema.
    pub async fn from_config(config: &FeedConfig) -> Result<Self> {
        let builder = Self::with_settings(config);

        match config.storage.backend {
            StorageBackend::InMemory => Ok(builder.with_store(InMemoryStore::new())),
            StorageBackend::Postgres => {
                let url = config.storage.database_url.as_deref().ok_or_else(|| {
                    anyhow::anyhow!("storage.database_url is required for the postgres backend")
                })?;
                builder.with_postgres(url).await
            }
        }
    }

    /// Create a builder with the GraphQL and identity settings of `config`
    ///
    /// The storage section is ignored; the store still has to be set.
    pub fn with_settings(config: &FeedConfig) -> Self {
        let builder = Self::new().with_graphql_config(config.graphql.clone());

        match &config.auth.jwt_secret {
            Some(secret) => builder.with_auth_provider(JwtAuthProvider::new(secret)),
            None => {
                tracing::warn!("no auth.jwt_secret configured, every request is anonymous");
                builder
            }
        }
    }

    #[cfg(feature = "postgres")]
    async fn with_postgres(self, url: &str) -> Result<Self> {
        let store = crate::storage::PostgresStore::connect(url).await?;
        Ok(self.with_store(store))
    }

    #[cfg(not(feature = "postgres"))]
    async fn with_postgres(self, _url: &str) -> Result<Self> {
        anyhow::bail!(
            "PostgreSQL support is not enabled. Enable the 'postgres' feature to use it."
        )
    }

    /// Set the store (required)
    pub fn with_store(self, store: impl FeedStore + 'static) -> Self {
        self.with_shared_store(Arc::new(store))
    }

    /// Set a store that is shared with other owners
    pub fn with_shared_store(mut self, store: Arc<dyn FeedStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the identity provider (defaults to [`NoAuthProvider`])
    pub fn with_auth_provider(mut self, provider: impl AuthProvider + 'static) -> Self {
        self.auth_provider = Some(Arc::new(provider));
        self
    }

    pub fn with_graphql_config(mut self, graphql: GraphQLConfig) -> Self {
        self.graphql = graphql;
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for endpoints outside the GraphQL surface, such as a login
    /// endpoint issuing bearer tokens.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(&mut self) -> Result<ServerHost> {
        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("FeedStore is required. Call .with_store()"))?;
        let auth_provider = self
            .auth_provider
            .take()
            .unwrap_or_else(|| Arc::new(NoAuthProvider));

        Ok(ServerHost::new(
            FeedService::new(store),
            auth_provider,
            self.graphql.clone(),
        ))
    }

    /// Build the final router
    ///
    /// This generates:
    /// - the GraphQL endpoint, playground and SDL export
    /// - the health route
    /// - any custom routes
    pub fn build(mut self) -> Result<Router> {
        let host = Arc::new(self.build_host()?);
        let custom_routes = std::mem::take(&mut self.custom_routes);

        let app = GraphQLExposure::build_router(host)?
            .merge(RestExposure::build_router(custom_routes)?)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());

        Ok(app)
    }

    /// Serve the application with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
