//! Persistence seam for links, users and votes
//!
//! The feed service never touches storage directly; every backend
//! (in-memory, PostgreSQL) implements [`FeedStore`].

use crate::core::entity::{Link, LinkChanges, NewLink, NewUser, User};
use crate::core::query::FeedQuery;
use anyhow::Result;
use async_trait::async_trait;

/// Store trait for the link feed
///
/// Store order is ascending id. Implementations assign ids and `created_at`
/// themselves and must make each call atomic.
#[async_trait]
pub trait FeedStore: Send + Sync {
    /// Get a link by id
    async fn find_link(&self, id: i32) -> Result<Option<Link>>;

    /// Links matching the query's filter, windowed by its pagination
    async fn find_links(&self, query: &FeedQuery) -> Result<Vec<Link>>;

    /// Create a link
    ///
    /// Fails if `posted_by_id` refers to a missing user.
    async fn create_link(&self, link: NewLink) -> Result<Link>;

    /// Merge `changes` into an existing link
    ///
    /// Returns `None` (and changes nothing) when the link does not exist.
    async fn update_link(&self, id: i32, changes: LinkChanges) -> Result<Option<Link>>;

    /// Remove a link together with its votes
    ///
    /// Returns the removed record, or `None` when the link does not exist.
    async fn delete_link(&self, id: i32) -> Result<Option<Link>>;

    /// The user a link was posted by
    async fn posted_by(&self, link_id: i32) -> Result<Option<User>>;

    /// Users who voted for a link, ascending user id
    async fn voters(&self, link_id: i32) -> Result<Vec<User>>;

    /// Links posted by a user, in store order
    async fn links_posted_by(&self, user_id: i32) -> Result<Vec<Link>>;

    /// Register a user; emails are unique
    async fn create_user(&self, user: NewUser) -> Result<User>;

    /// Get a user by id
    async fn find_user(&self, id: i32) -> Result<Option<User>>;

    /// Record a vote
    ///
    /// Returns `false` when the user already voted for the link.
    async fn add_vote(&self, link_id: i32, user_id: i32) -> Result<bool>;
}
