//! GraphQL API exposure
//!
//! Routes:
//! - `POST /graphql`: execute a request
//! - `GET /graphql`: playground UI (when enabled)
//! - `GET /graphql/schema`: SDL export

mod schema;

pub use schema::{FeedSchema, LinkObject, MutationRoot, QueryRoot, UserObject, build_schema};

use crate::core::auth::AuthProvider;
use crate::server::host::ServerHost;
use anyhow::Result;
use async_graphql::http::{GraphQLPlaygroundConfig, playground_source};
use async_graphql::{ErrorExtensions, Pos};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::State,
    http::{HeaderMap, header},
    response::{Html, IntoResponse},
    routing::{get, post},
};
use std::sync::Arc;

#[derive(Clone)]
struct GraphQLState {
    schema: FeedSchema,
    auth_provider: Arc<dyn AuthProvider>,
}

/// GraphQL API exposure implementation
pub struct GraphQLExposure;

impl GraphQLExposure {
    /// Build the GraphQL router from a host
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let host = Arc::new(builder.build_host()?);
    /// let graphql_app = GraphQLExposure::build_router(host)?;
    /// ```
    pub fn build_router(host: Arc<ServerHost>) -> Result<Router> {
        let state = GraphQLState {
            schema: build_schema(host.service.clone(), &host.graphql),
            auth_provider: host.auth_provider.clone(),
        };

        let endpoint = if host.graphql.playground {
            get(graphql_playground).post(graphql_handler)
        } else {
            post(graphql_handler)
        };

        let router = Router::new()
            .route("/graphql", endpoint)
            .route("/graphql/schema", get(graphql_sdl))
            .with_state(state);

        Ok(router)
    }
}

/// Handler for GraphQL queries and mutations
///
/// The caller identity is resolved before execution and attached to the
/// request; a rejected identity fails the whole request.
async fn graphql_handler(
    State(state): State<GraphQLState>,
    headers: HeaderMap,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let auth = match state.auth_provider.extract_context(&headers).await {
        Ok(auth) => auth,
        Err(e) => {
            let error = e.extend().into_server_error(Pos::default());
            return async_graphql::Response::from_errors(vec![error]).into();
        }
    };

    tracing::debug!(
        authenticated = auth.is_authenticated(),
        user_id = ?auth.user_id(),
        "executing graphql request"
    );
    state.schema.execute(request.into_inner().data(auth)).await.into()
}

/// Handler for GraphQL playground UI
async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}

/// Handler for GraphQL schema SDL export
async fn graphql_sdl(State(state): State<GraphQLState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.schema.sdl(),
    )
}
