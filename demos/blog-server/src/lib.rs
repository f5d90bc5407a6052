//! Blog demo: the typeflow pipeline end to end.
//!
//! Model declarations feed the schema builder; the published
//! `schema.graphql` artifact plus `operations.graphql` feed the generator;
//! `generated.rs` is the committed generator output; the handler is the
//! entry point the excluded HTTP layer would call.

pub mod generated;
pub mod handler;
pub mod model;
pub mod pages;
pub mod schema;
