//! Table bootstrap straight from the entity definitions.

use sea_orm::{ConnectionTrait, DbConn, DbErr, EntityTrait, Schema};

use super::entity::{post, user};

/// Create the `users` and `posts` tables if they are missing.
///
/// Column types, the unique slug and the author foreign key all come from
/// the entities. Existing tables are left untouched.
pub async fn ensure_schema(db: &DbConn) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());

    // users first: posts.author_id references it
    create_table(db, &schema, user::Entity).await?;
    create_table(db, &schema, post::Entity).await?;

    Ok(())
}

async fn create_table<E>(db: &DbConn, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    let backend = db.get_database_backend();
    db.execute(backend.build(&statement)).await?;
    tracing::debug!(table = entity.table_name(), "Table ensured");

    Ok(())
}
