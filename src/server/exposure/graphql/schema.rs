//! GraphQL schema: object types, query and mutation roots
//!
//! Resolvers are thin: they pull the [`FeedService`] and the caller's
//! [`AuthContext`] out of the request context and delegate.

use crate::config::GraphQLConfig;
use crate::core::auth::AuthContext;
use crate::core::entity::{Link, LinkChanges, User};
use crate::core::query::FeedQuery;
use crate::links::FeedService;
use async_graphql::{Context, EmptySubscription, Object, Result, ResultExt, Schema};
use chrono::{DateTime, Utc};

pub type FeedSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the executable schema around a service
pub fn build_schema(service: FeedService, config: &GraphQLConfig) -> FeedSchema {
    let mut builder = Schema::build(QueryRoot, MutationRoot, EmptySubscription).data(service);
    if let Some(depth) = config.depth_limit {
        builder = builder.limit_depth(depth);
    }
    builder.finish()
}

fn service<'a>(ctx: &Context<'a>) -> Result<&'a FeedService> {
    ctx.data::<FeedService>()
}

/// Requests executed without an identity are anonymous
fn caller(ctx: &Context<'_>) -> AuthContext {
    ctx.data_opt::<AuthContext>().copied().unwrap_or_default()
}

// =============================================================================
// Object types
// =============================================================================

/// A shared link
pub struct LinkObject(pub Link);

#[Object(name = "Link")]
impl LinkObject {
    async fn id(&self) -> i32 {
        self.0.id
    }

    async fn description(&self) -> &str {
        &self.0.description
    }

    async fn url(&self) -> &str {
        &self.0.url
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    /// The user who posted the link
    async fn posted_by(&self, ctx: &Context<'_>) -> Result<Option<UserObject>> {
        let user = service(ctx)?.posted_by(self.0.id).await.extend()?;
        Ok(user.map(UserObject))
    }

    /// Users who voted for the link
    async fn voters(&self, ctx: &Context<'_>) -> Result<Vec<UserObject>> {
        let users = service(ctx)?.voters(self.0.id).await.extend()?;
        Ok(users.into_iter().map(UserObject).collect())
    }
}

pub struct UserObject(pub User);

#[Object(name = "User")]
impl UserObject {
    async fn id(&self) -> i32 {
        self.0.id
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    /// Links posted by this user
    async fn links(&self, ctx: &Context<'_>) -> Result<Vec<LinkObject>> {
        let links = service(ctx)?.links_posted_by(self.0.id).await.extend()?;
        Ok(links.into_iter().map(LinkObject).collect())
    }
}

pub struct VoteObject {
    link: Link,
    user: User,
}

#[Object(name = "Vote")]
impl VoteObject {
    async fn link(&self) -> LinkObject {
        LinkObject(self.link.clone())
    }

    async fn user(&self) -> UserObject {
        UserObject(self.user.clone())
    }
}

// =============================================================================
// Roots
// =============================================================================

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Links whose url or description contains `filter`, windowed by
    /// `skip`/`take`. A negative `take` counts from the end.
    async fn feed(
        &self,
        ctx: &Context<'_>,
        filter: Option<String>,
        skip: Option<i32>,
        take: Option<i32>,
    ) -> Result<Vec<LinkObject>> {
        let links = service(ctx)?
            .feed(FeedQuery::new(filter, skip, take))
            .await
            .extend()?;
        Ok(links.into_iter().map(LinkObject).collect())
    }

    /// A single link by id
    async fn link(&self, ctx: &Context<'_>, id: i32) -> Result<Option<LinkObject>> {
        let link = service(ctx)?.link(id).await.extend()?;
        Ok(link.map(LinkObject))
    }
}

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Post a link as the authenticated caller
    async fn post(
        &self,
        ctx: &Context<'_>,
        description: String,
        url: String,
    ) -> Result<LinkObject> {
        let link = service(ctx)?
            .post(&caller(ctx), description, url)
            .await
            .extend()?;
        Ok(LinkObject(link))
    }

    /// Overwrite the given fields of a link; omitted fields are kept
    async fn update(
        &self,
        ctx: &Context<'_>,
        id: i32,
        description: Option<String>,
        url: Option<String>,
    ) -> Result<Option<LinkObject>> {
        let link = service(ctx)?
            .update(id, LinkChanges { description, url })
            .await
            .extend()?;
        Ok(Some(LinkObject(link)))
    }

    /// Delete a link, returning its last state
    async fn delete(&self, ctx: &Context<'_>, id: i32) -> Result<Option<LinkObject>> {
        let link = service(ctx)?.delete(id).await.extend()?;
        Ok(Some(LinkObject(link)))
    }

    /// Vote for a link as the authenticated caller
    async fn vote(&self, ctx: &Context<'_>, link_id: i32) -> Result<Option<VoteObject>> {
        let (link, user) = service(ctx)?
            .vote(&caller(ctx), link_id)
            .await
            .extend()?;
        Ok(Some(VoteObject { link, user }))
    }
}
