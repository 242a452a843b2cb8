use async_trait::async_trait;

use super::domain::{NewRecommendation, Recommendation, ScoreDelta};
use crate::errors::ServiceError;

/// Persistence seam for recommendations. No business rules live here.
#[async_trait]
pub trait RecommendationRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<Recommendation>, ServiceError>;
    async fn find(&self, id: i32) -> Result<Option<Recommendation>, ServiceError>;
    /// Fails with `Conflict` when the store's unique constraint on `name` trips.
    async fn create(&self, input: &NewRecommendation) -> Result<(), ServiceError>;
    /// Every row in insertion order; callers truncate.
    async fn find_all(&self) -> Result<Vec<Recommendation>, ServiceError>;
    /// At most `limit` rows, highest score first.
    async fn get_amount_by_score(&self, limit: u64) -> Result<Vec<Recommendation>, ServiceError>;
    /// Applies the delta in the store and returns the new score.
    async fn update_score(&self, id: i32, delta: ScoreDelta) -> Result<i32, ServiceError>;
    async fn remove(&self, id: i32) -> Result<(), ServiceError>;
}

/// In-memory repository for tests and local runs without Postgres.
pub mod memory {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct Table {
        next_id: i32,
        rows: Vec<Recommendation>, // insertion order
    }

    #[derive(Default)]
    pub struct InMemoryRecommendationRepository {
        table: Mutex<Table>,
    }

    impl InMemoryRecommendationRepository {
        pub fn new() -> Self { Self::default() }

        fn table(&self) -> MutexGuard<'_, Table> {
            self.table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }

        /// Insert a row with a chosen starting score, bypassing the name check.
        pub fn seed(&self, name: &str, youtube_link: &str, score: i32) -> Recommendation {
            let mut t = self.table();
            t.next_id += 1;
            let row = Recommendation {
                id: t.next_id,
                name: name.to_string(),
                youtube_link: youtube_link.to_string(),
                score,
            };
            t.rows.push(row.clone());
            row
        }

        pub fn len(&self) -> usize { self.table().rows.len() }

        pub fn is_empty(&self) -> bool { self.len() == 0 }
    }

    #[async_trait]
    impl RecommendationRepository for InMemoryRecommendationRepository {
        async fn find_by_name(&self, name: &str) -> Result<Option<Recommendation>, ServiceError> {
            Ok(self.table().rows.iter().find(|r| r.name == name).cloned())
        }

        async fn find(&self, id: i32) -> Result<Option<Recommendation>, ServiceError> {
            Ok(self.table().rows.iter().find(|r| r.id == id).cloned())
        }

        async fn create(&self, input: &NewRecommendation) -> Result<(), ServiceError> {
            let mut t = self.table();
            if t.rows.iter().any(|r| r.name == input.name) {
                return Err(ServiceError::conflict("recommendation"));
            }
            t.next_id += 1;
            let id = t.next_id;
            t.rows.push(Recommendation {
                id,
                name: input.name.clone(),
                youtube_link: input.youtube_link.clone(),
                score: 0,
            });
            Ok(())
        }

        async fn find_all(&self) -> Result<Vec<Recommendation>, ServiceError> {
            Ok(self.table().rows.clone())
        }

        async fn get_amount_by_score(&self, limit: u64) -> Result<Vec<Recommendation>, ServiceError> {
            let mut rows = self.table().rows.clone();
            rows.sort_by(|a, b| b.score.cmp(&a.score).then(a.id.cmp(&b.id)));
            rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
            Ok(rows)
        }

        async fn update_score(&self, id: i32, delta: ScoreDelta) -> Result<i32, ServiceError> {
            let mut t = self.table();
            let row = t
                .rows
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| ServiceError::not_found("recommendation"))?;
            row.score += delta.value();
            Ok(row.score)
        }

        async fn remove(&self, id: i32) -> Result<(), ServiceError> {
            self.table().rows.retain(|r| r.id != id);
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn input(name: &str) -> NewRecommendation {
            NewRecommendation { name: name.into(), youtube_link: "https://y/1".into() }
        }

        #[tokio::test]
        async fn create_assigns_increasing_ids_and_zero_score() {
            let repo = InMemoryRecommendationRepository::new();
            repo.create(&input("a")).await.unwrap();
            repo.create(&input("b")).await.unwrap();
            let all = repo.find_all().await.unwrap();
            assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
            assert!(all.iter().all(|r| r.score == 0));
        }

        #[tokio::test]
        async fn create_rejects_duplicate_name() {
            let repo = InMemoryRecommendationRepository::new();
            repo.create(&input("a")).await.unwrap();
            let err = repo.create(&input("a")).await.unwrap_err();
            assert!(matches!(err, ServiceError::Conflict(_)));
            assert_eq!(repo.len(), 1);
        }

        #[tokio::test]
        async fn amount_by_score_orders_desc_and_limits() {
            let repo = InMemoryRecommendationRepository::new();
            repo.seed("low", "l", -3);
            repo.seed("high", "l", 12);
            repo.seed("mid", "l", 4);
            let top = repo.get_amount_by_score(2).await.unwrap();
            assert_eq!(top.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(), vec!["high", "mid"]);
        }

        #[tokio::test]
        async fn update_score_on_missing_row_is_not_found() {
            let repo = InMemoryRecommendationRepository::new();
            let err = repo.update_score(99, ScoreDelta::Up).await.unwrap_err();
            assert!(matches!(err, ServiceError::NotFound(_)));
        }
    }
}
