//! The typed client.
//!
//! Executes [`TypedOperation`]s over a [`Fetch`] capability. Two call
//! patterns cover the two execution environments:
//!
//! - [`TypedClient::execute_with`] takes the capability explicitly, for
//!   server-rendering contexts where ambient network access may be absent
//!   or must be intercepted;
//! - [`TypedClient::execute`] uses the client's own [`AmbientFetch`], for
//!   client-initiated calls that never run during server rendering.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ErrorCode, SdkError, SdkResult};
use crate::fetch::{AmbientFetch, Fetch};
use crate::typed::{GraphQLError, TypedOperation, TypedResponse};

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// The single POST endpoint.
    pub endpoint: String,
    /// Per-step transport timeout for the ambient fetch.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a new config with an endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the transport timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// The wire request body: `{"query": …, "variables": …}`.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    pub query: String,
    pub variables: serde_json::Value,
}

/// The wire response body: `{"data": …}` and/or `{"errors": […]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    pub data: Option<serde_json::Value>,
    pub errors: Option<Vec<GraphQLError>>,
}

/// Executes one typed operation over the given capability.
///
/// One POST, one response; no batching, no retries, no shared state
/// between calls.
pub async fn execute_operation<Op: TypedOperation>(
    fetch: &dyn Fetch,
    endpoint: &str,
    variables: Op::Variables,
) -> SdkResult<TypedResponse<Op::Response>> {
    let variables =
        serde_json::to_value(&variables).map_err(|e| SdkError::serialize(e.to_string()))?;
    let request = Request {
        query: Op::OPERATION.to_string(),
        variables,
    };
    let body = serde_json::to_string(&request).map_err(|e| SdkError::serialize(e.to_string()))?;

    debug!(operation = Op::OPERATION_NAME, "executing operation");
    let raw = fetch.post_json(endpoint, &body).await?;

    let response: Response = serde_json::from_str(&raw).map_err(|e| {
        SdkError::new(
            ErrorCode::InvalidResponse,
            format!("Failed to parse response: {e}"),
        )
    })?;

    TypedResponse::from_raw(response.data, response.errors.unwrap_or_default())
}

/// The typed client.
#[derive(Debug, Clone)]
pub struct TypedClient {
    config: ClientConfig,
    ambient: AmbientFetch,
}

impl TypedClient {
    /// Creates a client for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_config(ClientConfig::new(endpoint))
    }

    /// Creates a client from a full configuration.
    pub fn with_config(config: ClientConfig) -> Self {
        let ambient = AmbientFetch::new().timeout(config.timeout);
        Self { config, ambient }
    }

    /// The configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Executes an operation through an explicitly injected capability and
    /// returns the full typed response.
    pub async fn execute_typed_with<Op: TypedOperation>(
        &self,
        fetch: &dyn Fetch,
        variables: Op::Variables,
    ) -> SdkResult<TypedResponse<Op::Response>> {
        execute_operation::<Op>(fetch, &self.config.endpoint, variables).await
    }

    /// Executes an operation through an explicitly injected capability and
    /// unwraps the data, treating GraphQL errors as fatal.
    pub async fn execute_with<Op: TypedOperation>(
        &self,
        fetch: &dyn Fetch,
        variables: Op::Variables,
    ) -> SdkResult<Op::Response> {
        self.execute_typed_with::<Op>(fetch, variables)
            .await?
            .into_result()
    }

    /// Executes an operation through the ambient fetch.
    pub async fn execute<Op: TypedOperation>(
        &self,
        variables: Op::Variables,
    ) -> SdkResult<Op::Response> {
        self.execute_with::<Op>(&self.ambient, variables).await
    }
}
