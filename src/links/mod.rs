//! The link query/mutation service
//!
//! Translates feed requests into store operations and store results into
//! typed results or [`FeedError`](crate::core::FeedError)s.

pub mod service;

pub use service::FeedService;
