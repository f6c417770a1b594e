//! Feed server demonstrating the full GraphQL surface
//!
//! ```text
//! APP_SECRET=GraphQL-is-aw3some cargo run --example feed_server -- config.yaml
//! ```
//!
//! Without a config file the defaults apply (in-memory store on
//! 127.0.0.1:4000). The in-memory store is seeded with one user and two
//! links so the feed is not empty.

use linkfeed::prelude::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("linkfeed=info,tower_http=info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => FeedConfig::from_yaml_file(&path)?,
        None => FeedConfig::default(),
    }
    .with_env_overrides()?;

    let builder = match config.storage.backend {
        StorageBackend::InMemory => {
            let store = Arc::new(InMemoryStore::new());
            seed(store.as_ref()).await?;
            ServerBuilder::with_settings(&config).with_shared_store(store)
        }
        StorageBackend::Postgres => ServerBuilder::from_config(&config).await?,
    };

    tracing::info!(
        playground = config.graphql.playground,
        backend = ?config.storage.backend,
        "starting feed server"
    );

    builder.serve(&config.bind_address()).await
}

async fn seed(store: &InMemoryStore) -> Result<()> {
    let alice = store
        .create_user(NewUser {
            name: "Alice".to_string(),
            email: "alice@prisma.io".to_string(),
        })
        .await?;

    for (description, url) in [
        ("full stack tutorial for GraphQL", "www.howtographql.com"),
        ("GraphQL official website", "graphql.org"),
    ] {
        store
            .create_link(NewLink {
                description: description.to_string(),
                url: url.to_string(),
                posted_by_id: Some(alice.id),
            })
            .await?;
    }

    tracing::info!(user_id = alice.id, "seeded in-memory store");
    Ok(())
}
