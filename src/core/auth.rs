//! Caller identity
//!
//! An [`AuthProvider`] turns request headers into an [`AuthContext`]. The
//! feed service only ever asks one question of it: who is the caller, if
//! anyone.

use crate::core::error::FeedError;
use async_trait::async_trait;
use axum::http::{HeaderMap, header};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Identity of the caller for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthContext {
    /// Authenticated user
    User { user_id: i32 },

    /// No authentication
    #[default]
    Anonymous,
}

impl AuthContext {
    pub fn user(user_id: i32) -> Self {
        AuthContext::User { user_id }
    }

    /// Get user_id if available
    pub fn user_id(&self) -> Option<i32> {
        match self {
            AuthContext::User { user_id } => Some(*user_id),
            AuthContext::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthContext::User { .. })
    }
}

/// Extracts the caller identity from a request
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn extract_context(&self, headers: &HeaderMap) -> Result<AuthContext, FeedError>;
}

/// Treats every request as anonymous
pub struct NoAuthProvider;

#[async_trait]
impl AuthProvider for NoAuthProvider {
    async fn extract_context(&self, _headers: &HeaderMap) -> Result<AuthContext, FeedError> {
        Ok(AuthContext::Anonymous)
    }
}

/// Claims carried by a bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

/// Resolves `Authorization: Bearer <token>` headers signed with HS256
///
/// A request without the header is anonymous. A header that is present but
/// unusable fails the request.
pub struct JwtAuthProvider {
    key: DecodingKey,
    validation: Validation,
}

impl JwtAuthProvider {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens are not required to expire; `exp` is still checked when set.
        validation.required_spec_claims = HashSet::new();

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn decode_token(&self, token: &str) -> Result<Claims, FeedError> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "rejected bearer token");
                FeedError::authentication("Not authenticated")
            })
    }
}

#[async_trait]
impl AuthProvider for JwtAuthProvider {
    async fn extract_context(&self, headers: &HeaderMap) -> Result<AuthContext, FeedError> {
        let Some(value) = headers.get(header::AUTHORIZATION) else {
            return Ok(AuthContext::Anonymous);
        };

        // The auth scheme is case-insensitive
        let token = value
            .to_str()
            .ok()
            .and_then(|v| v.trim().split_once(' '))
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Bearer"))
            .map(|(_, token)| token.trim())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| FeedError::authentication("Not authenticated"))?;

        let claims = self.decode_token(token)?;
        Ok(AuthContext::user(claims.user_id))
    }
}
