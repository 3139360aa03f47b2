use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PrimaryKeyTrait,
};
use uuid::Uuid;

/// Thin generic repository over a sea-orm entity with a UUID primary key.
///
/// Domain repositories embed this for the common insert/find/update/delete
/// plumbing and reach for `db()` when they need entity-specific queries.
pub struct BaseRepository<E: EntityTrait> {
    db: DatabaseConnection,
    _entity: std::marker::PhantomData<E>,
}

impl<E> BaseRepository<E>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
    E::Model: IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelBehavior + Send,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: std::marker::PhantomData,
        }
    }

    /// The underlying connection, for entity-specific queries.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn insert(&self, active_model: E::ActiveModel) -> Result<E::Model, DbErr> {
        active_model.insert(&self.db).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<E::Model>, DbErr> {
        E::find_by_id(id).one(&self.db).await
    }

    pub async fn update(&self, active_model: E::ActiveModel) -> Result<E::Model, DbErr> {
        active_model.update(&self.db).await
    }

    /// Delete a row by id, returning the number of rows affected.
    pub async fn delete_by_id(&self, id: Uuid) -> Result<u64, DbErr> {
        let result = E::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}
