//! In-memory implementation of FeedStore for testing and development

use crate::core::entity::{Link, LinkChanges, NewLink, NewUser, User};
use crate::core::query::FeedQuery;
use crate::core::store::FeedStore;
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct State {
    links: BTreeMap<i32, Link>,
    users: BTreeMap<i32, User>,
    /// (link_id, user_id)
    votes: BTreeSet<(i32, i32)>,
    last_link_id: i32,
    last_user_id: i32,
}

/// In-memory feed store
///
/// Useful for testing and development. All records live behind one RwLock,
/// so every call is atomic. Ids are assigned from per-table counters that
/// never reuse a deleted id.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user with a fixed id (for seeding)
    ///
    /// Later generated ids continue after the highest id seen.
    pub fn insert_user(&self, user: User) -> Result<User> {
        let mut state = self.write()?;
        if state.users.contains_key(&user.id) {
            bail!("User with id {} already exists", user.id);
        }
        if state.users.values().any(|u| u.email == user.email) {
            bail!("User with email '{}' already exists", user.email);
        }
        state.last_user_id = state.last_user_id.max(user.id);
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))
    }
}

#[async_trait]
impl FeedStore for InMemoryStore {
    async fn find_link(&self, id: i32) -> Result<Option<Link>> {
        Ok(self.read()?.links.get(&id).cloned())
    }

    async fn find_links(&self, query: &FeedQuery) -> Result<Vec<Link>> {
        Ok(query.run(self.read()?.links.values()))
    }

    async fn create_link(&self, link: NewLink) -> Result<Link> {
        let mut state = self.write()?;

        if let Some(user_id) = link.posted_by_id {
            if !state.users.contains_key(&user_id) {
                bail!("No User record found for id {}", user_id);
            }
        }

        state.last_link_id += 1;
        let created = Link {
            id: state.last_link_id,
            description: link.description,
            url: link.url,
            created_at: Utc::now(),
            posted_by_id: link.posted_by_id,
        };
        state.links.insert(created.id, created.clone());

        Ok(created)
    }

    async fn update_link(&self, id: i32, changes: LinkChanges) -> Result<Option<Link>> {
        let mut state = self.write()?;

        Ok(state.links.get_mut(&id).map(|link| {
            link.apply(changes);
            link.clone()
        }))
    }

    async fn delete_link(&self, id: i32) -> Result<Option<Link>> {
        let mut state = self.write()?;

        let removed = state.links.remove(&id);
        if removed.is_some() {
            state.votes.retain(|(link_id, _)| *link_id != id);
        }

        Ok(removed)
    }

    async fn posted_by(&self, link_id: i32) -> Result<Option<User>> {
        let state = self.read()?;

        Ok(state
            .links
            .get(&link_id)
            .and_then(|link| link.posted_by_id)
            .and_then(|user_id| state.users.get(&user_id))
            .cloned())
    }

    async fn voters(&self, link_id: i32) -> Result<Vec<User>> {
        let state = self.read()?;

        Ok(state
            .votes
            .range((link_id, i32::MIN)..=(link_id, i32::MAX))
            .filter_map(|(_, user_id)| state.users.get(user_id))
            .cloned()
            .collect())
    }

    async fn links_posted_by(&self, user_id: i32) -> Result<Vec<Link>> {
        let state = self.read()?;

        Ok(state
            .links
            .values()
            .filter(|link| link.posted_by_id == Some(user_id))
            .cloned()
            .collect())
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let mut state = self.write()?;

        if state.users.values().any(|u| u.email == user.email) {
            bail!("User with email '{}' already exists", user.email);
        }

        state.last_user_id += 1;
        let created = User {
            id: state.last_user_id,
            name: user.name,
            email: user.email,
        };
        state.users.insert(created.id, created.clone());

        Ok(created)
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn add_vote(&self, link_id: i32, user_id: i32) -> Result<bool> {
        let mut state = self.write()?;

        if !state.links.contains_key(&link_id) {
            bail!("No Link record found for id {}", link_id);
        }
        if !state.users.contains_key(&user_id) {
            bail!("No User record found for id {}", user_id);
        }

        Ok(state.votes.insert((link_id, user_id)))
    }
}
