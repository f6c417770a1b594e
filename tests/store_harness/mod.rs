//! Shared test harness for feed store backends
//!
//! `feed_store_tests!` generates a suite that validates any
//! [`FeedStore`](linkfeed::core::FeedStore) implementation against the store
//! contract: ordering, filtering, pagination, partial updates, deletes,
//! relations and votes.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//! use store_harness::*;
//!
//! feed_store_tests!(InMemoryStore::new());
//! ```
//!
//! The factory expression must produce an empty store with fresh id
//! sequences; it is evaluated inside an async test body, so `.await` is
//! allowed.

#![allow(dead_code)]

use linkfeed::core::{FeedStore, Link, NewLink, NewUser, User};

pub fn new_link(description: &str, url: &str, posted_by_id: Option<i32>) -> NewLink {
    NewLink {
        description: description.to_string(),
        url: url.to_string(),
        posted_by_id,
    }
}

pub fn new_user(name: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
    }
}

pub fn ids(links: &[Link]) -> Vec<i32> {
    links.iter().map(|l| l.id).collect()
}

/// Seed one user and two links:
/// 1. "full stack tutorial for GraphQL" / "www.howtographql.com"
/// 2. "GraphQL official website" / "graphql.org"
pub async fn seed_two_links(store: &dyn FeedStore) -> (User, Link, Link) {
    let user = store.create_user(new_user("Alice")).await.unwrap();
    let first = store
        .create_link(new_link(
            "full stack tutorial for GraphQL",
            "www.howtographql.com",
            Some(user.id),
        ))
        .await
        .unwrap();
    let second = store
        .create_link(new_link("GraphQL official website", "graphql.org", Some(user.id)))
        .await
        .unwrap();
    (user, first, second)
}

/// Seed five links without author, urls `site-1.com` .. `site-5.com`
pub async fn seed_five_links(store: &dyn FeedStore) -> Vec<Link> {
    let mut links = Vec::new();
    for i in 1..=5 {
        links.push(
            store
                .create_link(new_link(
                    &format!("link number {}", i),
                    &format!("site-{}.com", i),
                    None,
                ))
                .await
                .unwrap(),
        );
    }
    links
}

/// Generate the FeedStore contract suite for a backend.
///
/// `$store_factory` must produce an `impl FeedStore + 'static`.
#[macro_export]
macro_rules! feed_store_tests {
    ($store_factory:expr) => {
        mod feed_store_tests {
            use super::*;
            use linkfeed::core::{FeedQuery, FeedStore, LinkChanges};

            // ==============================================================
            // Feed ordering, filter and pagination
            // ==============================================================

            #[tokio::test]
            async fn test_feed_returns_all_in_store_order() {
                let store = $store_factory;
                let (_, first, second) = seed_two_links(&store).await;

                let links = store.find_links(&FeedQuery::all()).await.unwrap();
                assert_eq!(links, vec![first, second]);
            }

            #[tokio::test]
            async fn test_feed_filter_matches_url_or_description() {
                let store = $store_factory;
                let (user, first, _) = seed_two_links(&store).await;
                let third = store
                    .create_link(new_link("Rust language", "rust-lang.org", Some(user.id)))
                    .await
                    .unwrap();

                let by_url = store
                    .find_links(&FeedQuery::new(Some("howtographql".into()), None, None))
                    .await
                    .unwrap();
                assert_eq!(ids(&by_url), vec![first.id]);

                let by_description = store
                    .find_links(&FeedQuery::new(Some("language".into()), None, None))
                    .await
                    .unwrap();
                assert_eq!(ids(&by_description), vec![third.id]);

                let none = store
                    .find_links(&FeedQuery::new(Some("haskell".into()), None, None))
                    .await
                    .unwrap();
                assert!(none.is_empty());
            }

            #[tokio::test]
            async fn test_feed_filter_is_case_sensitive() {
                let store = $store_factory;
                let (_, first, _) = seed_two_links(&store).await;

                let links = store
                    .find_links(&FeedQuery::new(Some("GraphQL".into()), None, None))
                    .await
                    .unwrap();
                assert_eq!(links.len(), 2);

                let links = store
                    .find_links(&FeedQuery::new(Some("graphql".into()), None, None))
                    .await
                    .unwrap();
                // "graphql" appears in both urls, but only lowercase
                assert_eq!(links.len(), 2);
                assert_eq!(links[0], first);

                let links = store
                    .find_links(&FeedQuery::new(Some("TUTORIAL".into()), None, None))
                    .await
                    .unwrap();
                assert!(links.is_empty());
            }

            #[tokio::test]
            async fn test_feed_filter_has_no_wildcards() {
                let store = $store_factory;
                seed_two_links(&store).await;

                let links = store
                    .find_links(&FeedQuery::new(Some("%".into()), None, None))
                    .await
                    .unwrap();
                assert!(links.is_empty());
            }

            #[tokio::test]
            async fn test_feed_skip_take_returns_second_link() {
                let store = $store_factory;
                let (_, _, second) = seed_two_links(&store).await;

                let links = store
                    .find_links(&FeedQuery::new(None, Some(1), Some(1)))
                    .await
                    .unwrap();
                assert_eq!(links, vec![second]);
            }

            #[tokio::test]
            async fn test_feed_negative_take_counts_from_end() {
                let store = $store_factory;
                let links = seed_five_links(&store).await;

                let tail = store
                    .find_links(&FeedQuery::new(None, None, Some(-2)))
                    .await
                    .unwrap();
                assert_eq!(ids(&tail), vec![links[3].id, links[4].id]);

                let skipped = store
                    .find_links(&FeedQuery::new(None, Some(1), Some(-2)))
                    .await
                    .unwrap();
                assert_eq!(ids(&skipped), vec![links[2].id, links[3].id]);
            }

            #[tokio::test]
            async fn test_feed_out_of_range_is_empty() {
                let store = $store_factory;
                seed_five_links(&store).await;

                let links = store
                    .find_links(&FeedQuery::new(None, Some(50), Some(3)))
                    .await
                    .unwrap();
                assert!(links.is_empty());

                let links = store
                    .find_links(&FeedQuery::new(None, Some(50), Some(-3)))
                    .await
                    .unwrap();
                assert!(links.is_empty());

                let links = store
                    .find_links(&FeedQuery::new(None, None, Some(0)))
                    .await
                    .unwrap();
                assert!(links.is_empty());
            }

            #[tokio::test]
            async fn test_feed_filter_then_paginate() {
                let store = $store_factory;
                let links = seed_five_links(&store).await;

                let page = store
                    .find_links(&FeedQuery::new(Some("site-".into()), Some(2), Some(2)))
                    .await
                    .unwrap();
                assert_eq!(ids(&page), vec![links[2].id, links[3].id]);
            }

            // ==============================================================
            // Lifecycle
            // ==============================================================

            #[tokio::test]
            async fn test_create_assigns_id_and_timestamp() {
                let store = $store_factory;
                let (user, first, second) = seed_two_links(&store).await;

                assert!(second.id > first.id);
                assert_eq!(first.posted_by_id, Some(user.id));
                assert_eq!(store.find_link(first.id).await.unwrap(), Some(first));
                assert!(store.find_link(second.id + 100).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_create_with_unknown_author_fails() {
                let store = $store_factory;

                let result = store.create_link(new_link("d", "u", Some(4242))).await;
                assert!(result.is_err());
                assert!(store.find_links(&FeedQuery::all()).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_update_merges_and_keeps_created_at() {
                let store = $store_factory;
                let (_, first, _) = seed_two_links(&store).await;

                let updated = store
                    .update_link(
                        first.id,
                        LinkChanges {
                            description: Some("new description".into()),
                            url: None,
                        },
                    )
                    .await
                    .unwrap()
                    .expect("link should exist");

                assert_eq!(updated.id, first.id);
                assert_eq!(updated.description, "new description");
                assert_eq!(updated.url, first.url);
                assert_eq!(updated.created_at, first.created_at);
                assert_eq!(updated.posted_by_id, first.posted_by_id);
                assert_eq!(store.find_link(first.id).await.unwrap(), Some(updated));
            }

            #[tokio::test]
            async fn test_update_missing_returns_none() {
                let store = $store_factory;
                let (_, first, second) = seed_two_links(&store).await;

                let result = store
                    .update_link(
                        second.id + 1,
                        LinkChanges {
                            description: Some("x".into()),
                            url: Some("y".into()),
                        },
                    )
                    .await
                    .unwrap();
                assert!(result.is_none());

                let links = store.find_links(&FeedQuery::all()).await.unwrap();
                assert_eq!(links, vec![first, second]);
            }

            #[tokio::test]
            async fn test_delete_returns_prior_value() {
                let store = $store_factory;
                let (_, first, second) = seed_two_links(&store).await;

                let removed = store.delete_link(first.id).await.unwrap();
                assert_eq!(removed, Some(first.clone()));

                let links = store.find_links(&FeedQuery::all()).await.unwrap();
                assert_eq!(links, vec![second]);
                assert!(store.delete_link(first.id).await.unwrap().is_none());
            }

            // ==============================================================
            // Relations and votes
            // ==============================================================

            #[tokio::test]
            async fn test_posted_by() {
                let store = $store_factory;
                let (user, first, _) = seed_two_links(&store).await;
                let orphan = store.create_link(new_link("d", "u", None)).await.unwrap();

                assert_eq!(store.posted_by(first.id).await.unwrap(), Some(user));
                assert!(store.posted_by(orphan.id).await.unwrap().is_none());
                assert!(store.posted_by(orphan.id + 100).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_votes_and_voters() {
                let store = $store_factory;
                let (alice, first, second) = seed_two_links(&store).await;
                let bob = store.create_user(new_user("Bob")).await.unwrap();

                assert!(store.add_vote(first.id, bob.id).await.unwrap());
                assert!(store.add_vote(first.id, alice.id).await.unwrap());
                assert!(!store.add_vote(first.id, bob.id).await.unwrap());

                let voters = store.voters(first.id).await.unwrap();
                assert_eq!(voters, vec![alice, bob]);
                assert!(store.voters(second.id).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_delete_cascades_votes() {
                let store = $store_factory;
                let (alice, first, _) = seed_two_links(&store).await;
                store.add_vote(first.id, alice.id).await.unwrap();

                store.delete_link(first.id).await.unwrap();
                assert!(store.voters(first.id).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_links_posted_by() {
                let store = $store_factory;
                let (alice, first, second) = seed_two_links(&store).await;
                let bob = store.create_user(new_user("Bob")).await.unwrap();

                assert_eq!(
                    store.links_posted_by(alice.id).await.unwrap(),
                    vec![first, second]
                );
                assert!(store.links_posted_by(bob.id).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_users() {
                let store = $store_factory;
                let alice = store.create_user(new_user("Alice")).await.unwrap();

                assert_eq!(store.find_user(alice.id).await.unwrap(), Some(alice.clone()));
                assert!(store.find_user(alice.id + 1).await.unwrap().is_none());
                assert!(store.create_user(new_user("Alice")).await.is_err());
            }
        }
    };
}
