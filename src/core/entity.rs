//! Records held by the feed store
//!
//! All records are plain data. Identifiers and `created_at` are assigned by
//! the store; nothing outside a store implementation mints them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A shared link (URL + description) posted by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Link {
    /// Store-assigned identifier, stable once assigned
    pub id: i32,

    pub description: String,

    pub url: String,

    /// Set once at creation, never mutated
    pub created_at: DateTime<Utc>,

    /// The user who posted the link
    pub posted_by_id: Option<i32>,
}

impl Link {
    /// Apply a set of changes, leaving omitted fields untouched
    ///
    /// `id`, `created_at` and `posted_by_id` are not part of [`LinkChanges`]
    /// and can never be altered through an update.
    pub fn apply(&mut self, changes: LinkChanges) {
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(url) = changes.url {
            self.url = url;
        }
    }
}

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Input for creating a link
#[derive(Debug, Clone, Validate)]
pub struct NewLink {
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,

    #[validate(length(min = 1, message = "url must not be empty"))]
    pub url: String,

    pub posted_by_id: Option<i32>,
}

/// Partial update of a link
///
/// `None` means "keep the current value".
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct LinkChanges {
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "url must not be empty"))]
    pub url: Option<String>,
}

impl LinkChanges {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.url.is_none()
    }
}

/// Input for registering a user
#[derive(Debug, Clone, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,

    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
}
