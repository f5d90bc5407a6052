//! The single "handle request" entry point.
//!
//! This is the seam the excluded HTTP layer plugs into: one function from
//! a GraphQL request payload to a response payload. It dispatches the two
//! demo root fields against the store; it is deliberately not a general
//! executor.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;
use typeflow_syntax::{parse_document, OperationKind, Selection};

use crate::model::{Post, PostOrder, PostStore};

/// The wire request: `{"query": …, "variables": …}`.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(default)]
    pub variables: Option<Value>,
}

/// The wire response: `{"data": …}` and/or `{"errors": […]}`.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQLResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<GraphQLError>>,
}

impl GraphQLResponse {
    fn error(message: impl Into<String>) -> Self {
        Self {
            data: None,
            errors: Some(vec![GraphQLError {
                message: message.into(),
            }]),
        }
    }
}

/// A GraphQL error payload.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQLError {
    pub message: String,
}

/// Handles one GraphQL request against the store.
pub async fn handle_request(store: &PostStore, request: GraphQLRequest) -> GraphQLResponse {
    let document = match parse_document(&request.query) {
        Ok(document) => document,
        Err(e) => return GraphQLResponse::error(format!("Invalid query: {e}")),
    };
    let Some(op) = document.operations.first() else {
        return GraphQLResponse::error("Request contains no operation");
    };

    let variables = match request.variables {
        Some(Value::Object(map)) => map,
        Some(Value::Null) | None => Map::new(),
        Some(_) => return GraphQLResponse::error("Variables must be an object"),
    };

    debug!(
        operation = op.name.as_deref().unwrap_or("<anonymous>"),
        "handling request"
    );

    let mut data = Map::new();
    for selection in &op.selection_set {
        let result = match (op.kind, selection.name.as_str()) {
            (OperationKind::Query, "posts") => query_posts(store, selection, &variables).await,
            (OperationKind::Mutation, "createPost") => {
                create_post(store, selection, &variables).await
            }
            (kind, name) => Err(format!(
                "Unknown {} field `{name}`",
                match kind {
                    OperationKind::Query => "Query",
                    OperationKind::Mutation => "Mutation",
                }
            )),
        };
        match result {
            Ok(value) => {
                data.insert(selection.name.clone(), value);
            }
            Err(message) => return GraphQLResponse::error(message),
        }
    }

    GraphQLResponse {
        data: Some(Value::Object(data)),
        errors: None,
    }
}

async fn query_posts(
    store: &PostStore,
    selection: &Selection,
    variables: &Map<String, Value>,
) -> Result<Value, String> {
    let mut order = PostOrder::default();
    let mut limit = None;

    for arg in &selection.arguments {
        let value = resolve_value(&arg.value, variables);
        match arg.name.as_str() {
            "orderBy" => {
                if let Some(name) = value.as_str() {
                    order = PostOrder::from_graphql(name)
                        .ok_or_else(|| format!("Invalid PostOrder value `{name}`"))?;
                } else if !value.is_null() {
                    return Err("`orderBy` must be a PostOrder value".to_string());
                }
            }
            "limit" => {
                if let Some(n) = value.as_u64() {
                    limit = Some(n as usize);
                } else if !value.is_null() {
                    return Err("`limit` must be a non-negative Int".to_string());
                }
            }
            other => return Err(format!("Unknown argument `{other}` on `posts`")),
        }
    }

    let posts = store.list(order, limit).await;
    let projected: Result<Vec<Value>, String> = posts
        .iter()
        .map(|post| project_post(post, &selection.selection_set))
        .collect();
    Ok(Value::Array(projected?))
}

async fn create_post(
    store: &PostStore,
    selection: &Selection,
    variables: &Map<String, Value>,
) -> Result<Value, String> {
    let mut title = None;
    let mut body = None;

    for arg in &selection.arguments {
        let value = resolve_value(&arg.value, variables);
        let text = value
            .as_str()
            .map(ToString::to_string)
            .ok_or_else(|| format!("`{}` must be a String", arg.name))?;
        match arg.name.as_str() {
            "title" => title = Some(text),
            "body" => body = Some(text),
            other => return Err(format!("Unknown argument `{other}` on `createPost`")),
        }
    }

    let title = title.ok_or_else(|| "`createPost` requires `title`".to_string())?;
    let body = body.ok_or_else(|| "`createPost` requires `body`".to_string())?;

    let post = store.create(title, body).await;
    project_post(&post, &selection.selection_set)
}

/// Projects a post onto the selected fields, returning exactly those.
fn project_post(post: &Post, selections: &[Selection]) -> Result<Value, String> {
    if selections.is_empty() {
        return Err("`Post` requires a selection of fields".to_string());
    }

    let mut out = Map::new();
    for selection in selections {
        if !selection.selection_set.is_empty() {
            return Err(format!(
                "Field `{}` is a scalar and takes no sub-selection",
                selection.name
            ));
        }
        let value = match selection.name.as_str() {
            "id" => json!(post.id),
            "title" => json!(post.title),
            "body" => json!(post.body),
            other => return Err(format!("Unknown field `{other}` on `Post`")),
        };
        out.insert(selection.name.clone(), value);
    }
    Ok(Value::Object(out))
}

fn resolve_value(value: &typeflow_syntax::Value, variables: &Map<String, Value>) -> Value {
    use typeflow_syntax::Value as V;
    match value {
        V::Variable(name) => variables.get(name).cloned().unwrap_or(Value::Null),
        V::Int(n) => json!(n),
        V::String(s) => json!(s),
        V::Boolean(b) => json!(b),
        V::Enum(name) => json!(name),
        V::Null => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn query_returns_only_selected_fields() {
        let store = PostStore::new();
        store.create("P1", "body one").await;

        let response = handle_request(
            &store,
            GraphQLRequest {
                query: "query Home { posts { id title } }".to_string(),
                variables: None,
            },
        )
        .await;

        assert!(response.errors.is_none());
        let data = response.data.unwrap();
        assert_eq!(data["posts"][0], json!({ "id": "1", "title": "P1" }));
    }

    #[tokio::test]
    async fn mutation_round_trip_with_variables() {
        let store = PostStore::new();
        let response = handle_request(
            &store,
            GraphQLRequest {
                query: "mutation CreatePost($title: String!, $body: String!) \
                        { createPost(title: $title, body: $body) { id } }"
                    .to_string(),
                variables: Some(json!({ "title": "A", "body": "B" })),
            },
        )
        .await;

        assert!(response.errors.is_none());
        assert_eq!(response.data.unwrap()["createPost"], json!({ "id": "1" }));

        let posts = store.list(PostOrder::IdAsc, None).await;
        assert_eq!(posts[0].title, "A");
        assert_eq!(posts[0].body, "B");
    }

    #[tokio::test]
    async fn list_arguments_are_honored() {
        let store = PostStore::new();
        store.create("P1", "b").await;
        store.create("P2", "b").await;
        store.create("P3", "b").await;

        let response = handle_request(
            &store,
            GraphQLRequest {
                query: "query { posts(orderBy: ID_DESC, limit: 2) { id } }".to_string(),
                variables: None,
            },
        )
        .await;

        let data = response.data.unwrap();
        assert_eq!(data["posts"], json!([{ "id": "3" }, { "id": "2" }]));
    }

    #[tokio::test]
    async fn unknown_root_field_is_an_error_payload() {
        let store = PostStore::new();
        let response = handle_request(
            &store,
            GraphQLRequest {
                query: "query { comments { id } }".to_string(),
                variables: None,
            },
        )
        .await;

        assert!(response.data.is_none());
        let errors = response.errors.unwrap();
        assert!(errors[0].message.contains("comments"));
    }

    #[tokio::test]
    async fn internal_columns_are_not_reachable() {
        let store = PostStore::new();
        store.create("P1", "b").await;

        let response = handle_request(
            &store,
            GraphQLRequest {
                query: "query { posts { id createdAt } }".to_string(),
                variables: None,
            },
        )
        .await;

        assert!(response.data.is_none());
        assert!(response.errors.unwrap()[0].message.contains("createdAt"));
    }
}
