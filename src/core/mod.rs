//! Core module containing the records, traits and query types of the feed

pub mod auth;
pub mod entity;
pub mod error;
pub mod query;
pub mod store;

pub use auth::{AuthContext, AuthProvider, JwtAuthProvider, NoAuthProvider};
pub use entity::{Link, LinkChanges, NewLink, NewUser, User};
pub use error::FeedError;
pub use query::{FeedQuery, LinkFilter, Pagination};
pub use store::FeedStore;
