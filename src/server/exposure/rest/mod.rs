//! Plain HTTP routes that live next to the GraphQL endpoint
//!
//! Health checks and any custom routes registered on the builder.

use anyhow::Result;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

/// REST exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router
    ///
    /// # Arguments
    ///
    /// * `custom_routes` - Additional custom routes to merge
    pub fn build_router(custom_routes: Vec<Router>) -> Result<Router> {
        let mut app = Self::health_routes();

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app)
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "linkfeed"
        }))
    }
}
