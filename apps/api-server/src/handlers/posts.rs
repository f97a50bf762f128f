//! Post handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::{
    Author, CreatePost, PageRequest, Post, PostChanges, PostFilter, PostWithAuthor,
};
use blog_shared::dto::{
    AuthorResponse, CreatePostRequest, ListPostsQuery, PaginationMeta, PostListResponse,
    PostResponse, UpdatePostRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn post_response(post: Post, author: Option<Author>) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        slug: post.slug,
        content: post.content,
        excerpt: post.excerpt,
        featured_image: post.featured_image,
        category: post.category,
        status: post.status.to_string(),
        published_at: post.published_at,
        author_id: post.author_id,
        created_at: post.created_at,
        updated_at: post.updated_at,
        author: author.map(|a| AuthorResponse {
            id: a.id,
            name: a.name,
            email: a.email,
        }),
    }
}

fn listed(item: PostWithAuthor) -> PostResponse {
    post_response(item.post, item.author)
}

/// POST /api/posts
pub async fn create_post(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let input = CreatePost {
        title: req.title,
        content: req.content,
        excerpt: req.excerpt,
        status: req.status,
        category: req.category,
        featured_image: req.featured_image,
    };

    let post = state
        .posts
        .create_post(identity.requester.user_id, input)
        .await?;

    Ok(HttpResponse::Created().json(post_response(post, None)))
}

/// GET /api/posts?page&limit&category&search
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let page = PageRequest::parse(query.page.as_deref(), query.limit.as_deref());
    let filter = PostFilter::new(query.category, query.search);

    let listing = state.posts.list_posts(page, filter).await?;

    Ok(HttpResponse::Ok().json(PostListResponse {
        posts: listing
            .posts
            .into_iter()
            .map(listed)
            .collect(),
        pagination: PaginationMeta {
            page: listing.pagination.page,
            limit: listing.pagination.limit,
            total: listing.pagination.total,
            pages: listing.pagination.pages,
        },
    }))
}

/// GET /api/posts/{slug}
pub async fn get_post_by_slug(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let found = state.posts.get_post_by_slug(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(listed(found)))
}

/// PUT/PATCH /api/posts/{id}
pub async fn update_post(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let changes = PostChanges {
        title: req.title,
        content: req.content,
        excerpt: req.excerpt,
        status: req.status,
        category: req.category,
        featured_image: req.featured_image,
    };

    let post = state
        .posts
        .update_post(path.into_inner(), &identity.requester, changes)
        .await?;

    Ok(HttpResponse::Ok().json(post_response(post, None)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    state
        .posts
        .delete_post(path.into_inner(), &identity.requester)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
