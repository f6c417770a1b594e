//! # linkfeed
//!
//! A GraphQL API for a link-sharing feed.
//!
//! ## Features
//!
//! - **Feed query**: substring filter over url and description, skip/take
//!   pagination (a negative `take` counts from the end)
//! - **Posting**: links are tied to the authenticated caller
//! - **Update/delete**: by id against the same store, with typed not-found errors
//! - **Votes**: one vote per user and link, `voters` and `postedBy` relations
//! - **Pluggable storage**: in-memory by default, PostgreSQL behind the `postgres` feature
//! - **Caller identity**: HS256 bearer tokens or anonymous access
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use linkfeed::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new()
//!         .with_store(InMemoryStore::new())
//!         .with_auth_provider(JwtAuthProvider::new("GraphQL-is-aw3some"))
//!         .serve("127.0.0.1:4000")
//!         .await
//! }
//! ```
//!
//! ```graphql
//! query {
//!   feed(filter: "graphql", skip: 0, take: 10) {
//!     id
//!     url
//!     description
//!     postedBy { name }
//!     voters { id }
//!   }
//! }
//! ```

pub mod config;
pub mod core;
pub mod links;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        auth::{AuthContext, AuthProvider, JwtAuthProvider, NoAuthProvider},
        entity::{Link, LinkChanges, NewLink, NewUser, User},
        error::FeedError,
        query::{FeedQuery, LinkFilter, Pagination},
        store::FeedStore,
    };

    // === Service ===
    pub use crate::links::FeedService;

    // === Storage ===
    pub use crate::storage::InMemoryStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresStore;

    // === Config ===
    pub use crate::config::{FeedConfig, GraphQLConfig, StorageBackend};

    // === Server ===
    pub use crate::server::exposure::graphql::{FeedSchema, build_schema};
    pub use crate::server::{GraphQLExposure, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
}
