//! Demo binary: publish the schema artifact and run a request through the
//! handler.
//!
//! The publish step is the server-build half of the pipeline; the client
//! build consumes the artifact via `typeflow codegen` (see
//! `operations.graphql` and the committed `src/generated.rs`).

use std::path::Path;

use blog_server::handler::{handle_request, GraphQLRequest};
use blog_server::model::PostStore;
use blog_server::schema::build_schema;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Schema construction errors are configuration errors: fail startup.
    let schema = build_schema()?;

    let artifact = Path::new(env!("CARGO_MANIFEST_DIR")).join("schema.graphql");
    typeflow_publish::publish(&schema, &artifact)?;
    println!("published {}", artifact.display());

    let store = PostStore::with_sample_data().await;
    let response = handle_request(
        &store,
        GraphQLRequest {
            query: "query { posts(orderBy: ID_DESC, limit: 3) { id title } }".to_string(),
            variables: None,
        },
    )
    .await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
