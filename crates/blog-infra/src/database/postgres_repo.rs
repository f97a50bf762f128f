//! PostgreSQL post repository.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};

use blog_core::domain::{NewPost, PageRequest, Post, PostFilter, PostWithAuthor};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::Entity as UserEntity;
use super::postgres_base::{PostgresBaseRepository, write_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// WHERE clause of the public listing.
pub(crate) fn published_condition(filter: &PostFilter) -> Condition {
    let mut condition = Condition::all().add(post::Column::Status.eq(post::Status::Published));

    if let Some(category) = filter.category() {
        condition = condition.add(post::Column::Category.eq(category));
    }

    if let Some(search) = filter.search() {
        let pattern = format!("%{}%", search.to_lowercase());
        condition = condition.add(
            Condition::any()
                .add(
                    Expr::expr(Func::lower(Expr::col((PostEntity, post::Column::Title))))
                        .like(pattern.clone()),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col((PostEntity, post::Column::Content))))
                        .like(pattern),
                ),
        );
    }

    condition
}

/// The public listing, newest publication first, before paging.
pub(crate) fn listing_query(filter: &PostFilter) -> Select<PostEntity> {
    PostEntity::find()
        .filter(published_condition(filter))
        .order_by_desc(post::Column::PublishedAt)
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(new_post)
            .insert(&self.db)
            .await
            .map_err(write_error)?;

        Ok(model.into())
    }

    async fn find_published(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<(Vec<PostWithAuthor>, u64), RepoError> {
        tracing::debug!(
            category = ?filter.category(),
            search = ?filter.search(),
            offset = page.offset(),
            limit = page.limit(),
            "Querying published posts"
        );

        let total = PostEntity::find()
            .filter(published_condition(filter))
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let rows = listing_query(filter)
            .find_also_related(UserEntity)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok((rows.into_iter().map(post::with_author).collect(), total))
    }

    async fn find_published_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<PostWithAuthor>, RepoError> {
        let row = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .filter(post::Column::Status.eq(post::Status::Published))
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(row.map(post::with_author))
    }
}
