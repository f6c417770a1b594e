//! Feed operations over a [`FeedStore`]

use crate::core::auth::AuthContext;
use crate::core::entity::{Link, LinkChanges, NewLink, User};
use crate::core::error::FeedError;
use crate::core::query::FeedQuery;
use crate::core::store::FeedStore;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

pub type Result<T, E = FeedError> = std::result::Result<T, E>;

/// Link query/mutation service
///
/// Stateless apart from the store handle; cheap to clone and share across
/// requests. Every operation is a direct, independent call into the store.
#[derive(Clone)]
pub struct FeedService {
    store: Arc<dyn FeedStore>,
}

impl FeedService {
    pub fn new(store: Arc<dyn FeedStore>) -> Self {
        Self { store }
    }

    /// Filtered, paginated list of links in store order
    #[instrument(skip(self))]
    pub async fn feed(&self, query: FeedQuery) -> Result<Vec<Link>> {
        let links = self.store.find_links(&query).await?;
        tracing::debug!(count = links.len(), "feed resolved");
        Ok(links)
    }

    /// A single link, if it exists
    #[instrument(skip(self))]
    pub async fn link(&self, id: i32) -> Result<Option<Link>> {
        Ok(self.store.find_link(id).await?)
    }

    /// Create a link posted by the caller
    #[instrument(skip(self))]
    pub async fn post(&self, auth: &AuthContext, description: String, url: String) -> Result<Link> {
        let user_id = auth
            .user_id()
            .ok_or_else(|| FeedError::authentication("Cannot post without logging in"))?;

        let new_link = NewLink {
            description,
            url,
            posted_by_id: Some(user_id),
        };
        new_link.validate()?;

        if self.store.find_user(user_id).await?.is_none() {
            return Err(FeedError::user_not_found(user_id));
        }

        let link = self.store.create_link(new_link).await?;
        tracing::info!(link_id = link.id, user_id, "link posted");
        Ok(link)
    }

    /// Overwrite the provided fields of an existing link
    #[instrument(skip(self))]
    pub async fn update(&self, id: i32, changes: LinkChanges) -> Result<Link> {
        changes.validate()?;

        let link = if changes.is_empty() {
            self.store.find_link(id).await?
        } else {
            self.store.update_link(id, changes).await?
        };

        let link = link.ok_or_else(|| FeedError::link_not_found(id))?;
        tracing::info!(link_id = link.id, "link updated");
        Ok(link)
    }

    /// Remove a link, returning its prior value
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<Link> {
        let link = self
            .store
            .delete_link(id)
            .await?
            .ok_or_else(|| FeedError::link_not_found(id))?;
        tracing::info!(link_id = link.id, "link deleted");
        Ok(link)
    }

    /// Author of a link; `None` when unset or when the link is gone
    pub async fn posted_by(&self, link_id: i32) -> Result<Option<User>> {
        Ok(self.store.posted_by(link_id).await?)
    }

    /// Users who voted for a link
    pub async fn voters(&self, link_id: i32) -> Result<Vec<User>> {
        Ok(self.store.voters(link_id).await?)
    }

    /// Links posted by a user
    pub async fn links_posted_by(&self, user_id: i32) -> Result<Vec<Link>> {
        Ok(self.store.links_posted_by(user_id).await?)
    }

    /// Record the caller's vote for a link
    #[instrument(skip(self))]
    pub async fn vote(&self, auth: &AuthContext, link_id: i32) -> Result<(Link, User)> {
        let user_id = auth
            .user_id()
            .ok_or_else(|| FeedError::authentication("Cannot vote without logging in"))?;

        let link = self
            .store
            .find_link(link_id)
            .await?
            .ok_or_else(|| FeedError::link_not_found(link_id))?;
        let user = self
            .store
            .find_user(user_id)
            .await?
            .ok_or_else(|| FeedError::user_not_found(user_id))?;

        if !self.store.add_vote(link_id, user_id).await? {
            return Err(FeedError::conflict(format!(
                "Already voted for link: {}",
                link_id
            )));
        }

        tracing::info!(link_id, user_id, "vote recorded");
        Ok((link, user))
    }
}
