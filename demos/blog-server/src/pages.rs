//! Page-data functions: the contract consumed by the rendering layer.
//!
//! `home_page_data` runs during server rendering, so it goes through the
//! context's injected fetch. `submit_post` is a client-initiated mutation
//! and uses the ambient transport.

use typeflow_sdk::{PageContext, SdkResult, TypedClient};

use crate::generated::{
    CreatePost, CreatePostVariables, HomePosts, HomePostsPosts, HomePostsVariables, PostOrder,
};

/// The plain data record the home page renders from.
#[derive(Debug, Clone)]
pub struct HomePage {
    pub posts: Vec<HomePostsPosts>,
}

/// Fetches the home page data: newest posts first, capped at ten.
pub async fn home_page_data(ctx: &PageContext) -> SdkResult<HomePage> {
    let data = ctx
        .execute::<HomePosts>(HomePostsVariables {
            order_by: Some(PostOrder::IdDesc),
            limit: Some(10),
        })
        .await?;
    Ok(HomePage { posts: data.posts })
}

/// Submits a new post and returns its id.
pub async fn submit_post(
    client: &TypedClient,
    title: impl Into<String>,
    body: impl Into<String>,
) -> SdkResult<String> {
    let data = client
        .execute::<CreatePost>(CreatePostVariables {
            title: title.into(),
            body: body.into(),
        })
        .await?;
    Ok(data.create_post.id)
}
