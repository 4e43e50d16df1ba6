use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::entities::beer::{self, ActiveModel as BeerActiveModel, Column, Entity as BeerEntity};
use crate::errors::ServiceError;
use crate::models::{Beer, NewBeer};

use super::BeerRepository;

/// SeaORM-backed beer repository
#[derive(Debug, Clone)]
pub struct SeaOrmBeerRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmBeerRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[async_trait]
impl BeerRepository for SeaOrmBeerRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Beer>, ServiceError> {
        let found = BeerEntity::find()
            .filter(Column::Name.eq(name))
            .one(self.get_db())
            .await?;
        Ok(found.map(Beer::from))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Beer>, ServiceError> {
        let found = BeerEntity::find_by_id(id).one(self.get_db()).await?;
        Ok(found.map(Beer::from))
    }

    async fn insert(&self, beer: NewBeer) -> Result<Beer, ServiceError> {
        let name = beer.name.clone();
        let model = BeerActiveModel {
            name: Set(beer.name),
            brand: Set(beer.brand),
            max_capacity: Set(beer.max_capacity),
            quantity: Set(beer.quantity),
            category: Set(beer.category),
            version: Set(1),
            ..Default::default()
        };

        match model.insert(self.get_db()).await {
            Ok(inserted) => {
                debug!(id = inserted.id, name = %inserted.name, "beer row inserted");
                Ok(inserted.into())
            }
            Err(err) if is_unique_violation(&err) => {
                warn!(name = %name, "unique index rejected beer insert");
                Err(ServiceError::AlreadyRegistered(name))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn update(&self, beer: Beer) -> Result<Beer, ServiceError> {
        let next_version = beer.version + 1;
        let result = BeerEntity::update_many()
            .col_expr(Column::Brand, Expr::value(beer.brand.clone()))
            .col_expr(Column::MaxCapacity, Expr::value(beer.max_capacity))
            .col_expr(Column::Quantity, Expr::value(beer.quantity))
            .col_expr(Column::Category, Expr::value(beer.category.to_value()))
            .col_expr(Column::Version, Expr::value(next_version))
            .filter(Column::Id.eq(beer.id))
            .filter(Column::Version.eq(beer.version))
            .exec(self.get_db())
            .await?;

        if result.rows_affected == 0 {
            warn!(
                id = beer.id,
                version = beer.version,
                "stale beer update rejected"
            );
            return Err(ServiceError::ConcurrentModification(beer.id));
        }

        Ok(Beer {
            version: next_version,
            ..beer
        })
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        let result = BeerEntity::delete_by_id(id).exec(self.get_db()).await?;
        debug!(id, rows = result.rows_affected, "beer delete executed");
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Beer>, ServiceError> {
        let rows = BeerEntity::find()
            .order_by_asc(beer::Column::Id)
            .all(self.get_db())
            .await?;
        Ok(rows.into_iter().map(Beer::from).collect())
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        crate::db::check_connection(self.get_db()).await
    }
}
