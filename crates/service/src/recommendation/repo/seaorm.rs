use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use models::recommendation::{self, Column, Entity as RecommendationEntity};

use crate::errors::ServiceError;
use crate::recommendation::domain::{NewRecommendation, Recommendation, ScoreDelta};
use crate::recommendation::repository::RecommendationRepository;

const MAX_LIMIT: u64 = i64::MAX as u64;

/// SeaORM-backed repository. The connection pool is injected by the caller.
pub struct SeaOrmRecommendationRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmRecommendationRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl RecommendationRepository for SeaOrmRecommendationRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Recommendation>, ServiceError> {
        RecommendationEntity::find()
            .filter(Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find(&self, id: i32) -> Result<Option<Recommendation>, ServiceError> {
        RecommendationEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn create(&self, input: &NewRecommendation) -> Result<(), ServiceError> {
        recommendation::create(&self.db, &input.name, &input.youtube_link).await?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Recommendation>, ServiceError> {
        RecommendationEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn get_amount_by_score(&self, limit: u64) -> Result<Vec<Recommendation>, ServiceError> {
        // Postgres binds LIMIT as a signed bigint
        let limit = limit.min(MAX_LIMIT);
        RecommendationEntity::find()
            .order_by_desc(Column::Score)
            .order_by_asc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn update_score(&self, id: i32, delta: ScoreDelta) -> Result<i32, ServiceError> {
        // single UPDATE ... RETURNING so concurrent votes never lose an increment
        let updated = RecommendationEntity::update_many()
            .col_expr(Column::Score, Expr::col(Column::Score).add(delta.value()))
            .filter(Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        updated
            .into_iter()
            .next()
            .map(|m| m.score)
            .ok_or_else(|| ServiceError::not_found("recommendation"))
    }

    async fn remove(&self, id: i32) -> Result<(), ServiceError> {
        RecommendationEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(())
    }
}
