use sea_orm::*;

use crate::entity::character;

pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<character::Model>, DbErr> {
    character::Entity::find_by_id(id).one(db).await
}

pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<character::Model>, DbErr> {
    character::Entity::find()
        .order_by_asc(character::Column::Id)
        .all(db)
        .await
}

pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, DbErr> {
    character::Entity::find().count(db).await
}

pub async fn insert<C: ConnectionTrait>(
    db: &C,
    active: character::ActiveModel,
) -> Result<character::Model, DbErr> {
    active.insert(db).await
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    active: character::ActiveModel,
) -> Result<character::Model, DbErr> {
    active.update(db).await
}

/// Delete a character row. Returns `false` when no row had that id.
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, DbErr> {
    let result = character::Entity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
