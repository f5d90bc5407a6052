//! Execution context for page-data functions.
//!
//! A page-data function runs during server rendering, where ambient
//! network access is not assumed: the context carries the fetch capability
//! explicitly, alongside type-keyed request-scoped data.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::client::execute_operation;
use crate::error::SdkResult;
use crate::fetch::{AmbientFetch, Fetch};
use crate::typed::TypedOperation;

/// The execution context handed to page-data functions.
///
/// # Example
///
/// ```ignore
/// async fn home_page_data(ctx: &PageContext) -> SdkResult<HomePage> {
///     let data = ctx.execute::<HomePosts>(variables).await?;
///     Ok(HomePage { posts: data.posts })
/// }
/// ```
pub struct PageContext {
    endpoint: String,
    fetch: Arc<dyn Fetch>,
    data: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl PageContext {
    /// Creates a context with an explicitly injected fetch capability.
    pub fn new(endpoint: impl Into<String>, fetch: Arc<dyn Fetch>) -> Self {
        Self {
            endpoint: endpoint.into(),
            fetch,
            data: FxHashMap::default(),
        }
    }

    /// Creates a context bound to the ambient fetch. Only appropriate at
    /// the outermost call site of client-only contexts.
    pub fn ambient(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint, Arc::new(AmbientFetch::new()))
    }

    /// The endpoint typed requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The network capability carried by this context.
    pub fn fetch(&self) -> &dyn Fetch {
        self.fetch.as_ref()
    }

    /// Executes a typed operation through this context's capability and
    /// unwraps the data.
    pub async fn execute<Op: TypedOperation>(
        &self,
        variables: Op::Variables,
    ) -> SdkResult<Op::Response> {
        execute_operation::<Op>(self.fetch.as_ref(), &self.endpoint, variables)
            .await?
            .into_result()
    }

    /// Inserts a request-scoped value, replacing any existing value of the
    /// same type.
    pub fn insert<T: Send + Sync + 'static>(&mut self, value: T) {
        self.data.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Gets a request-scoped value by type.
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.data
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref())
    }
}

impl fmt::Debug for PageContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageContext")
            .field("endpoint", &self.endpoint)
            .field("data_count", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    struct RequestId(String);

    #[test]
    fn typed_data_is_keyed_by_type() {
        let mut ctx = PageContext::ambient("http://localhost:4000/graphql");
        ctx.insert(RequestId("r-1".to_string()));

        assert_eq!(ctx.get::<RequestId>(), Some(&RequestId("r-1".to_string())));
        assert_eq!(ctx.get::<u32>(), None);
    }

    #[test]
    fn context_reports_its_endpoint() {
        let ctx = PageContext::ambient("http://localhost:4000/graphql");
        assert_eq!(ctx.endpoint(), "http://localhost:4000/graphql");
    }
}
