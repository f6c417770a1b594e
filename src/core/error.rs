//! Typed error handling for the feed service
//!
//! Every operation of [`FeedService`](crate::links::FeedService) fails with a
//! [`FeedError`]. Callers match on the variant rather than on message text:
//!
//! ```rust,ignore
//! match service.update(42, changes).await {
//!     Ok(link) => println!("updated {}", link.id),
//!     Err(FeedError::NotFound { entity, id }) => println!("{entity} {id} is gone"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
//!
//! Over GraphQL the variant is reported as `extensions.code`; over plain
//! HTTP it maps to a status code.

use async_graphql::ErrorExtensions;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use validator::ValidationErrors;

/// The error type of the feed service
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The operation needs an authenticated caller
    #[error("{message}")]
    Authentication { message: String },

    /// The targeted record does not exist
    #[error("{entity} with id {id} does not exist")]
    NotFound { entity: &'static str, id: i32 },

    /// The input was rejected before reaching the store
    #[error("{message}")]
    Validation {
        message: String,
        fields: Vec<String>,
    },

    /// The operation collides with existing state
    #[error("{message}")]
    Conflict { message: String },

    /// The store failed
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl FeedError {
    pub fn authentication(message: impl Into<String>) -> Self {
        FeedError::Authentication {
            message: message.into(),
        }
    }

    pub fn link_not_found(id: i32) -> Self {
        FeedError::NotFound { entity: "Link", id }
    }

    pub fn user_not_found(id: i32) -> Self {
        FeedError::NotFound { entity: "User", id }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        FeedError::Conflict {
            message: message.into(),
        }
    }

    /// Machine-readable code, exposed as GraphQL `extensions.code`
    pub fn code(&self) -> &'static str {
        match self {
            FeedError::Authentication { .. } => "UNAUTHENTICATED",
            FeedError::NotFound { .. } => "NOT_FOUND",
            FeedError::Validation { .. } => "BAD_USER_INPUT",
            FeedError::Conflict { .. } => "CONFLICT",
            FeedError::Storage(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            FeedError::Authentication { .. } => StatusCode::UNAUTHORIZED,
            FeedError::NotFound { .. } => StatusCode::NOT_FOUND,
            FeedError::Validation { .. } => StatusCode::BAD_REQUEST,
            FeedError::Conflict { .. } => StatusCode::CONFLICT,
            FeedError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to callers
    ///
    /// Storage failures are reported generically; their detail only goes to
    /// the logs.
    pub fn public_message(&self) -> String {
        match self {
            FeedError::Storage(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code().to_string(),
            message: self.public_message(),
            fields: match self {
                FeedError::Validation { fields, .. } => Some(fields.clone()),
                _ => None,
            },
        }
    }
}

impl From<ValidationErrors> for FeedError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();

        let mut messages: Vec<String> = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .map(|err| match &err.message {
                Some(message) => message.to_string(),
                None => err.code.to_string(),
            })
            .collect();
        messages.sort();

        FeedError::Validation {
            message: messages.join("; "),
            fields,
        }
    }
}

/// Error body for plain HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

impl IntoResponse for FeedError {
    fn into_response(self) -> Response {
        if let FeedError::Storage(err) = &self {
            tracing::error!(error = %err, "storage failure");
        }
        (self.status_code(), Json(self.to_response())).into_response()
    }
}

impl ErrorExtensions for FeedError {
    fn extend(&self) -> async_graphql::Error {
        if let FeedError::Storage(err) = self {
            tracing::error!(error = %err, "storage failure");
        }
        async_graphql::Error::new(self.public_message()).extend_with(|_, ext| {
            ext.set("code", self.code());
            if let FeedError::Validation { fields, .. } = self {
                ext.set("fields", fields.clone());
            }
        })
    }
}
