//! Typeflow client SDK.
//!
//! The consuming side of the type-flow pipeline. Generated operation
//! modules implement [`TypedOperation`]; this crate executes them:
//!
//! ```ignore
//! use typeflow_sdk::TypedClient;
//!
//! // Ambient transport: client-initiated calls.
//! let client = TypedClient::new("http://localhost:4000/graphql");
//! let data = client.execute::<CreatePost>(CreatePostVariables {
//!     title: "A".into(),
//!     body: "B".into(),
//! }).await?;
//!
//! // Injected transport: server-rendering contexts pass the network
//! // capability explicitly instead of relying on an ambient one.
//! let data = client.execute_with::<HomePosts>(&fetch, variables).await?;
//! ```
//!
//! Each execution is one POST of `{"query": …, "variables": …}` and one
//! JSON response; there is no batching, caching, or retrying here. A
//! response carrying GraphQL errors is surfaced as
//! [`ErrorCode::ExecutionError`], never silently unwrapped.

pub mod client;
pub mod context;
pub mod error;
pub mod fetch;
pub mod typed;

// Re-exports for convenience and for generated code.
pub use client::{ClientConfig, Request, Response, TypedClient};
pub use context::PageContext;
pub use error::{ErrorCode, SdkError, SdkResult};
pub use fetch::{AmbientFetch, Fetch};
pub use typed::{GraphQLError, NoVariables, OperationKind, TypedOperation, TypedResponse};
