//! Server host for transport-agnostic API exposure
//!
//! `ServerHost` holds everything an exposure needs to serve the feed: the
//! service, the identity provider and the GraphQL settings. It knows nothing
//! about HTTP.

use crate::config::GraphQLConfig;
use crate::core::auth::AuthProvider;
use crate::links::FeedService;
use std::sync::Arc;

/// Host context containing all server state
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(ServerBuilder::new().with_store(InMemoryStore::new()).build_host()?);
/// let app = GraphQLExposure::build_router(host)?;
/// ```
pub struct ServerHost {
    /// Link query/mutation service
    pub service: FeedService,

    /// Resolves the caller identity of each request
    pub auth_provider: Arc<dyn AuthProvider>,

    /// GraphQL endpoint settings
    pub graphql: GraphQLConfig,
}

impl ServerHost {
    pub fn new(
        service: FeedService,
        auth_provider: Arc<dyn AuthProvider>,
        graphql: GraphQLConfig,
    ) -> Self {
        Self {
            service,
            auth_provider,
            graphql,
        }
    }
}
