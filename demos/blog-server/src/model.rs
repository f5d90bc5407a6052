//! Post model and in-memory store.
//!
//! Stands in for the persistence engine behind the model contract:
//! `create(fields) -> Post` and `list(order, limit) -> Vec<Post>`. In
//! production this would be backed by an actual database (e.g. sqlx,
//! diesel, or sea-orm).

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Post entity. `created_at` is a storage-side column; it is not part of
/// the exposed schema.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
}

/// List ordering accepted by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostOrder {
    IdAsc,
    #[default]
    IdDesc,
}

impl PostOrder {
    /// Parses the schema's `PostOrder` enum value.
    pub fn from_graphql(value: &str) -> Option<Self> {
        match value {
            "ID_ASC" => Some(Self::IdAsc),
            "ID_DESC" => Some(Self::IdDesc),
            _ => None,
        }
    }
}

/// In-memory post store with sequential ids.
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    posts: Arc<RwLock<Vec<Post>>>,
    next_id: Arc<RwLock<u64>>,
}

impl PostStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store preloaded with sample posts.
    pub async fn with_sample_data() -> Self {
        let store = Self::new();
        store
            .create("Schema first, types everywhere", "Declare the model once and let the pipeline carry the types to the client.")
            .await;
        store
            .create("Publishing the artifact", "The SDL file is the only contract between server and client builds.")
            .await;
        store
            .create("Typed requests", "A selection shape is a compile-time projection, not a runtime guess.")
            .await;
        store
    }

    /// Creates a post and returns it in full.
    pub async fn create(&self, title: impl Into<String>, body: impl Into<String>) -> Post {
        let mut next_id = self.next_id.write().await;
        *next_id += 1;
        let post = Post {
            id: next_id.to_string(),
            title: title.into(),
            body: body.into(),
            created_at: Utc::now(),
        };
        self.posts.write().await.push(post.clone());
        post
    }

    /// Lists posts in the requested order, bounded by `limit`.
    pub async fn list(&self, order: PostOrder, limit: Option<usize>) -> Vec<Post> {
        let posts = self.posts.read().await;
        let mut out: Vec<Post> = posts.clone();
        out.sort_by_key(|p| p.id.parse::<u64>().unwrap_or(u64::MAX));
        if order == PostOrder::IdDesc {
            out.reverse();
        }
        if let Some(limit) = limit {
            out.truncate(limit);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let store = PostStore::new();
        let first = store.create("P1", "b").await;
        let second = store.create("P2", "b").await;
        assert_eq!(first.id, "1");
        assert_eq!(second.id, "2");
    }

    #[tokio::test]
    async fn list_orders_by_id_descending_with_limit() {
        let store = PostStore::new();
        store.create("P1", "b").await;
        store.create("P2", "b").await;
        store.create("P3", "b").await;

        let posts = store.list(PostOrder::IdDesc, Some(10)).await;
        let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["P3", "P2", "P1"]);

        let posts = store.list(PostOrder::IdAsc, Some(2)).await;
        let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["P1", "P2"]);
    }

    #[test]
    fn order_parses_graphql_values() {
        assert_eq!(PostOrder::from_graphql("ID_ASC"), Some(PostOrder::IdAsc));
        assert_eq!(PostOrder::from_graphql("ID_DESC"), Some(PostOrder::IdDesc));
        assert_eq!(PostOrder::from_graphql("TITLE"), None);
    }
}
