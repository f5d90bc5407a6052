//! The typed operation contract implemented by generated code.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{ErrorCode, SdkError, SdkResult};

/// A strongly typed GraphQL operation.
///
/// Implementations are emitted by the generator, one per operation
/// document: the variables type mirrors the declared variables, and the
/// response type is the projection of the schema's result type onto the
/// operation's selection shape.
///
/// # Example
///
/// ```ignore
/// use typeflow_sdk::{NoVariables, OperationKind, TypedOperation};
///
/// struct PostIds;
///
/// impl TypedOperation for PostIds {
///     type Variables = NoVariables;
///     type Response = PostIdsData;
///
///     const OPERATION: &'static str = "query PostIds { posts { id } }";
///     const OPERATION_NAME: &'static str = "PostIds";
///     const KIND: OperationKind = OperationKind::Query;
/// }
/// ```
pub trait TypedOperation {
    /// The input variables type.
    type Variables: Serialize;

    /// The response data type.
    type Response: DeserializeOwned;

    /// The canonical operation text sent on the wire.
    const OPERATION: &'static str;

    /// The operation name.
    const OPERATION_NAME: &'static str;

    /// The kind of operation.
    const KIND: OperationKind;
}

/// The kind of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

/// Marker type for operations without variables.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoVariables;

/// A GraphQL error returned by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}

/// A typed response: data, errors, or both.
#[derive(Debug, Clone)]
pub struct TypedResponse<T> {
    pub data: Option<T>,
    pub errors: Vec<GraphQLError>,
}

impl<T> TypedResponse<T> {
    /// Returns true if the response has errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Unwraps the data, treating any error in the payload as fatal.
    pub fn into_result(self) -> SdkResult<T> {
        if !self.errors.is_empty() {
            return Err(SdkError::new(
                ErrorCode::ExecutionError,
                self.errors[0].message.clone(),
            ));
        }

        self.data
            .ok_or_else(|| SdkError::new(ErrorCode::NoData, "No data in response"))
    }
}

impl<T: DeserializeOwned> TypedResponse<T> {
    /// Parses a typed response from the raw wire payload.
    pub fn from_raw(data: Option<serde_json::Value>, errors: Vec<GraphQLError>) -> SdkResult<Self> {
        let typed_data = match data {
            Some(v) => Some(serde_json::from_value(v).map_err(|e| {
                SdkError::deserialize(format!("Failed to deserialize response: {e}"))
            })?),
            None => None,
        };

        Ok(Self {
            data: typed_data,
            errors,
        })
    }
}
