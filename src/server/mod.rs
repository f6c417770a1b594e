//! Server module for exposing the feed over HTTP
//!
//! `ServerBuilder` assembles a `ServerHost` and turns it into an axum
//! router serving:
//! - the GraphQL endpoint, playground and SDL export
//! - health checks

pub mod builder;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use exposure::{GraphQLExposure, RestExposure};
pub use host::ServerHost;
