//! End-to-end pipeline tests: committed artifacts stay current, and typed
//! operations round-trip through the handler.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use blog_server::generated::{CreatePost, CreatePostVariables, HomePosts, HomePostsVariables,
    PostOrder};
use blog_server::handler::{handle_request, GraphQLRequest};
use blog_server::model::PostStore;
use blog_server::pages::home_page_data;
use blog_server::schema::build_schema;
use typeflow_codegen::{generate, CodegenOptions};
use typeflow_sdk::{Fetch, PageContext, SdkResult, TypedClient, TypedOperation};
use typeflow_syntax::render_schema;

const SCHEMA_SDL: &str = include_str!("../schema.graphql");
const OPERATIONS: &str = include_str!("../operations.graphql");

/// A fetch capability that short-circuits into the handler in-process.
#[derive(Clone)]
struct LocalFetch {
    store: PostStore,
}

#[async_trait]
impl Fetch for LocalFetch {
    async fn post_json(&self, _url: &str, body: &str) -> SdkResult<String> {
        let request: GraphQLRequest = serde_json::from_str(body).unwrap();
        let response = handle_request(&self.store, request).await;
        Ok(serde_json::to_string(&response).unwrap())
    }
}

#[test]
fn committed_artifact_matches_the_schema() {
    let schema = build_schema().unwrap();
    assert_eq!(render_schema(&schema), SCHEMA_SDL);
}

#[test]
fn committed_artifact_contains_no_internal_columns() {
    assert!(!SCHEMA_SDL.contains("createdAt"));
}

#[test]
fn committed_generated_module_matches_the_generator_output() {
    let code = generate(SCHEMA_SDL, &[OPERATIONS], &CodegenOptions::default()).unwrap();
    assert_eq!(code, include_str!("../src/generated.rs"));
}

#[tokio::test]
async fn typed_mutation_round_trips_through_the_handler() {
    let store = PostStore::new();
    let fetch = LocalFetch { store };
    let client = TypedClient::new("http://localhost:4000/graphql");

    let data = client
        .execute_with::<CreatePost>(
            &fetch,
            CreatePostVariables {
                title: "A".to_string(),
                body: "B".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(data.create_post.id, "1");
}

#[tokio::test]
async fn typed_query_returns_exactly_the_selected_fields() {
    let store = PostStore::new();
    store.create("P1", "body one").await;
    store.create("P2", "body two").await;
    store.create("P3", "body three").await;
    let fetch = LocalFetch { store };
    let client = TypedClient::new("http://localhost:4000/graphql");

    let data = client
        .execute_with::<HomePosts>(
            &fetch,
            HomePostsVariables {
                order_by: Some(PostOrder::IdDesc),
                limit: Some(10),
            },
        )
        .await
        .unwrap();

    let titles: Vec<&str> = data.posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["P3", "P2", "P1"]);

    // The wire payload carries only the projected fields.
    let body = serde_json::to_string(&serde_json::json!({
        "query": HomePosts::OPERATION,
        "variables": { "orderBy": "ID_DESC", "limit": 10 },
    }))
    .unwrap();
    let response = fetch.post_json("http://localhost:4000/graphql", &body).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(
        value["data"]["posts"][0],
        json!({ "id": "3", "title": "P3" })
    );
}

#[tokio::test]
async fn page_data_runs_through_the_injected_fetch() {
    let store = PostStore::with_sample_data().await;
    let ctx = PageContext::new(
        "http://localhost:4000/graphql",
        Arc::new(LocalFetch { store }),
    );

    let page = home_page_data(&ctx).await.unwrap();
    assert_eq!(page.posts.len(), 3);
    // Newest first.
    assert_eq!(page.posts[0].id, "3");
}

#[tokio::test]
async fn submitted_post_appears_in_the_next_page_load() {
    let store = PostStore::with_sample_data().await;
    let fetch = LocalFetch {
        store: store.clone(),
    };

    // Client-initiated mutation (here routed through the local fetch so the
    // test stays in-process).
    let client = TypedClient::new("http://localhost:4000/graphql");
    let id = {
        let data = client
            .execute_with::<CreatePost>(
                &fetch,
                CreatePostVariables {
                    title: "Fresh".to_string(),
                    body: "Just submitted".to_string(),
                },
            )
            .await
            .unwrap();
        data.create_post.id
    };
    assert_eq!(id, "4");

    let ctx = PageContext::new("http://localhost:4000/graphql", Arc::new(fetch));
    let page = home_page_data(&ctx).await.unwrap();
    assert_eq!(page.posts[0].id, "4");
    assert_eq!(page.posts[0].title, "Fresh");
}
