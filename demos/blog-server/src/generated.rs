// Generated by typeflow codegen. Do not edit by hand.

use serde::{Deserialize, Serialize};

use typeflow_sdk::{OperationKind, TypedOperation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostOrder {
    #[serde(rename = "ID_ASC")]
    IdAsc,
    #[serde(rename = "ID_DESC")]
    IdDesc,
}

pub struct HomePosts;

#[derive(Debug, Clone, Serialize)]
pub struct HomePostsVariables {
    #[serde(rename = "orderBy")]
    pub order_by: Option<PostOrder>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HomePostsData {
    pub posts: Vec<HomePostsPosts>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HomePostsPosts {
    pub id: String,
    pub title: String,
}

impl TypedOperation for HomePosts {
    type Variables = HomePostsVariables;
    type Response = HomePostsData;

    const OPERATION: &'static str = "query HomePosts($orderBy: PostOrder, $limit: Int) { posts(orderBy: $orderBy, limit: $limit) { id title } }";
    const OPERATION_NAME: &'static str = "HomePosts";
    const KIND: OperationKind = OperationKind::Query;
}

pub struct CreatePost;

#[derive(Debug, Clone, Serialize)]
pub struct CreatePostVariables {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostData {
    #[serde(rename = "createPost")]
    pub create_post: CreatePostCreatePost,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostCreatePost {
    pub id: String,
}

impl TypedOperation for CreatePost {
    type Variables = CreatePostVariables;
    type Response = CreatePostData;

    const OPERATION: &'static str = "mutation CreatePost($title: String!, $body: String!) { createPost(title: $title, body: $body) { id } }";
    const OPERATION_NAME: &'static str = "CreatePost";
    const KIND: OperationKind = OperationKind::Mutation;
}
