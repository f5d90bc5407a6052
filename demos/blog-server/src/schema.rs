//! Schema assembly: the code-first declaration of the exposed API.

use typeflow_schema::{EntityDescriptor, ScalarKind, Schema, SchemaBuilder, SchemaError};

/// The Post entity as the schema sees it. `createdAt` stays internal.
pub fn post_descriptor() -> EntityDescriptor {
    EntityDescriptor::builder("Post")
        .id("id")
        .string("title")
        .text("body")
        .internal("createdAt", ScalarKind::Str)
        .build()
}

/// Builds the schema graph: the `Post` type, a `posts` list query, and a
/// `createPost` mutation. Fails fatally on configuration errors.
pub fn build_schema() -> Result<Schema, SchemaError> {
    let post = post_descriptor();
    SchemaBuilder::new()
        .entity(&post)
        .list_query("posts", &post)
        .create_mutation("createPost", &post)
        .build()
}
