use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{DatabaseBackend, DbConn, MockDatabase, MockExecResult, QueryTrait, Value};
use uuid::Uuid;

use blog_core::domain::{CreatePost, NewPost, PageRequest, Post, PostFilter, PostStatus};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};

use crate::database::entity::{post, user};
use crate::database::ensure_schema;
use crate::database::postgres_repo::{PostgresPostRepository, listing_query};

fn post_model(id: i32, author_id: Uuid, title: &str, status: post::Status) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        author_id,
        title: title.to_owned(),
        slug: blog_core::domain::slugify(title),
        content: "Content".to_owned(),
        excerpt: None,
        featured_image: None,
        category: Some("rust".to_owned()),
        status,
        published_at: (status == post::Status::Published).then(|| now.into()),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn user_model(id: Uuid) -> user::Model {
    let now = Utc::now();
    user::Model {
        id,
        name: "Grace".to_owned(),
        email: "grace@example.com".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn mock() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
}

#[tokio::test]
async fn test_find_post_by_id() {
    let author_id = Uuid::new_v4();
    let db = mock()
        .append_query_results([[post_model(5, author_id, "Test Post", post::Status::Draft)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post = BaseRepository::<Post, i32>::find_by_id(&repo, 5)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(post.id, 5);
    assert_eq!(post.slug, "test-post");
    assert_eq!(post.status, PostStatus::Draft);
    assert_eq!(post.published_at, None);
}

#[tokio::test]
async fn test_find_published_by_slug_joins_author() {
    let author_id = Uuid::new_v4();
    let db = mock()
        .append_query_results([[(
            post_model(9, author_id, "Hello World", post::Status::Published),
            user_model(author_id),
        )]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let found = repo
        .find_published_by_slug("hello-world")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.post.id, 9);
    assert!(found.post.published_at.is_some());
    let author = found.author.unwrap();
    assert_eq!(author.id, author_id);
    assert_eq!(author.name, "Grace");
}

#[tokio::test]
async fn test_create_returns_stored_row() {
    let author_id = Uuid::new_v4();
    let stored = post_model(1, author_id, "Fresh Post", post::Status::Published);
    let db = mock()
        .append_query_results([[stored.clone()]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let input = CreatePost {
        title: "Fresh Post".to_owned(),
        content: "Content".to_owned(),
        status: Some("published".to_owned()),
        ..Default::default()
    };

    let post = repo
        .create(NewPost::from_input(author_id, input, Utc::now()))
        .await
        .unwrap();

    assert_eq!(post.id, 1);
    assert_eq!(post.slug, "fresh-post");
    assert_eq!(post.status, PostStatus::Published);
}

#[tokio::test]
async fn test_entity_rejects_short_title_before_writing() {
    let db: DbConn = mock().into_connection();
    let repo = PostgresPostRepository::new(db);
    let input = CreatePost {
        title: "No".to_owned(),
        content: "Content".to_owned(),
        ..Default::default()
    };

    let result = repo
        .create(NewPost::from_input(Uuid::new_v4(), input, Utc::now()))
        .await;

    assert!(matches!(result, Err(RepoError::Constraint(_))));
}

#[tokio::test]
async fn test_delete_reports_missing_row() {
    let db = mock()
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let first = BaseRepository::<Post, i32>::delete(&repo, 3).await;
    let second = BaseRepository::<Post, i32>::delete(&repo, 3).await;

    assert!(first.is_ok());
    assert!(matches!(second, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_ensure_schema_creates_users_then_posts() {
    let db = mock()
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();

    ensure_schema(&db).await.unwrap();

    let log = db.into_transaction_log();
    assert_eq!(log.len(), 2);
    let users_sql = format!("{:?}", log[0]);
    let posts_sql = format!("{:?}", log[1]);
    assert!(users_sql.contains("IF NOT EXISTS") && users_sql.contains("email"));
    assert!(!users_sql.contains("slug"));
    assert!(posts_sql.contains("IF NOT EXISTS") && posts_sql.contains("slug"));
}

#[test]
fn test_listing_query_filters_published_and_orders_newest_first() {
    let filter = PostFilter::new(Some("tech".to_owned()), Some("RuSt".to_owned()));

    let sql = listing_query(&filter)
        .build(DatabaseBackend::Postgres)
        .to_string();

    assert!(sql.contains(r#""posts"."status" = 'published'"#), "{sql}");
    assert!(sql.contains(r#""posts"."category" = 'tech'"#), "{sql}");
    assert!(
        sql.contains(
            r#"(LOWER("posts"."title") LIKE '%rust%' OR LOWER("posts"."content") LIKE '%rust%')"#
        ),
        "{sql}"
    );
    assert!(sql.ends_with(r#"ORDER BY "posts"."published_at" DESC"#), "{sql}");
}

#[test]
fn test_listing_query_without_filter_only_checks_status() {
    let sql = listing_query(&PostFilter::default())
        .build(DatabaseBackend::Postgres)
        .to_string();

    assert!(sql.contains(r#"WHERE "posts"."status" = 'published' ORDER BY"#), "{sql}");
    assert!(!sql.contains("LIKE"));
    assert!(!sql.contains(r#""posts"."category" ="#));
}

#[tokio::test]
async fn test_find_published_counts_then_pages() {
    let author_id = Uuid::new_v4();
    let count_row = BTreeMap::from([("num_items", Value::BigInt(Some(12)))]);
    let db = mock()
        .append_query_results([[count_row]])
        .append_query_results([[
            (
                post_model(12, author_id, "Newest Post", post::Status::Published),
                user_model(author_id),
            ),
            (
                post_model(11, author_id, "Older Post", post::Status::Published),
                user_model(author_id),
            ),
        ]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let (posts, total) = repo
        .find_published(&PostFilter::default(), PageRequest::new(2, 5))
        .await
        .unwrap();

    assert_eq!(total, 12);
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].post.slug, "newest-post");
    assert_eq!(posts[1].author.as_ref().map(|a| a.id), Some(author_id));

    let log = repo.db.into_transaction_log();
    assert_eq!(log.len(), 2);
    let count_sql = format!("{:?}", log[0]);
    let page_sql = format!("{:?}", log[1]);
    assert!(count_sql.contains("COUNT"));
    assert!(page_sql.contains("ORDER BY") && page_sql.contains("LIMIT") && page_sql.contains("OFFSET"));
}
