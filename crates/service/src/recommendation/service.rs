use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{NewRecommendation, Recommendation, ScoreDelta, VoteOutcome};
use super::repository::RecommendationRepository;
use crate::errors::ServiceError;

/// Fixed page size of the plain listing.
pub const PAGE_SIZE: usize = 10;
/// A downvote that leaves the score strictly below this removes the record.
pub const REMOVAL_THRESHOLD: i32 = -5;
/// Scores at or above this count as the high tier in random-pick diagnostics.
pub const HIGH_SCORE_THRESHOLD: i32 = 10;

/// Source of uniform values in `[0, 1)`.
pub type RandomSource = Arc<dyn Fn() -> f64 + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    High,
    Regular,
}

impl ScoreTier {
    pub fn of(score: i32) -> Self {
        if score >= HIGH_SCORE_THRESHOLD { Self::High } else { Self::Regular }
    }
}

/// Index chosen by `floor(r * len)`, clamped into range.
pub fn pick_index(r: f64, len: usize) -> usize {
    let r = if r.is_finite() { r.clamp(0.0, 1.0) } else { 0.0 };
    ((r * len as f64).floor() as usize).min(len.saturating_sub(1))
}

/// Application service encapsulating recommendation business rules.
pub struct RecommendationService<R: RecommendationRepository + ?Sized> {
    repo: Arc<R>,
    random: RandomSource,
}

impl<R: RecommendationRepository + ?Sized> RecommendationService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo, random: Arc::new(rand::random::<f64>) }
    }

    /// Replace the random source, e.g. with a fixed value in tests.
    pub fn with_random(mut self, random: RandomSource) -> Self {
        self.random = random;
        self
    }

    /// Create a recommendation with score 0. Names are unique.
    ///
    /// # Examples
    /// ```
    /// use service::recommendation::{NewRecommendation, RecommendationService};
    /// use service::recommendation::repository::memory::InMemoryRecommendationRepository;
    /// use std::sync::Arc;
    /// let svc = RecommendationService::new(Arc::new(InMemoryRecommendationRepository::new()));
    /// let input = NewRecommendation { name: "Song A".into(), youtube_link: "https://y/1".into() };
    /// tokio_test::block_on(svc.insert(input.clone())).unwrap();
    /// assert!(tokio_test::block_on(svc.insert(input)).is_err());
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn insert(&self, input: NewRecommendation) -> Result<(), ServiceError> {
        if self.repo.find_by_name(&input.name).await?.is_some() {
            debug!("recommendation name taken");
            return Err(ServiceError::conflict("recommendation"));
        }
        self.repo.create(&input).await?;
        info!(name = %input.name, "recommendation_created");
        Ok(())
    }

    /// First page of recommendations in insertion order.
    pub async fn get(&self) -> Result<Vec<Recommendation>, ServiceError> {
        let mut all = self.repo.find_all().await?;
        all.truncate(PAGE_SIZE);
        Ok(all)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Recommendation, ServiceError> {
        self.repo.find(id).await?.ok_or_else(|| ServiceError::not_found("recommendation"))
    }

    /// Uniform pick over every recommendation.
    ///
    /// The high/regular tier split is only reported, it does not weight the
    /// choice.
    #[instrument(skip(self))]
    pub async fn get_random(&self) -> Result<Recommendation, ServiceError> {
        let mut all = self.repo.find_all().await?;
        if all.is_empty() {
            return Err(ServiceError::not_found("recommendation"));
        }
        let high = all.iter().filter(|r| ScoreTier::of(r.score) == ScoreTier::High).count();
        let idx = pick_index((self.random)(), all.len());
        let picked = all.swap_remove(idx);
        debug!(
            total = all.len() + 1,
            high_tier = high,
            index = idx,
            tier = ?ScoreTier::of(picked.score),
            "random recommendation picked"
        );
        Ok(picked)
    }

    /// Highest scores first, at most `limit` items.
    pub async fn get_top(&self, limit: u64) -> Result<Vec<Recommendation>, ServiceError> {
        self.repo.get_amount_by_score(limit).await
    }

    #[instrument(skip(self))]
    pub async fn upvote(&self, id: i32) -> Result<VoteOutcome, ServiceError> {
        self.get_by_id(id).await?;
        let score = self.repo.update_score(id, ScoreDelta::Up).await?;
        info!(recommendation_id = id, score, "recommendation_upvoted");
        Ok(VoteOutcome { score, removed: false })
    }

    /// Decrement, then delete in a separate step if the score fell below the
    /// removal threshold.
    #[instrument(skip(self))]
    pub async fn downvote(&self, id: i32) -> Result<VoteOutcome, ServiceError> {
        self.get_by_id(id).await?;
        let score = self.repo.update_score(id, ScoreDelta::Down).await?;
        info!(recommendation_id = id, score, "recommendation_downvoted");
        let removed = score < REMOVAL_THRESHOLD;
        if removed {
            self.repo.remove(id).await?;
            info!(recommendation_id = id, score, "recommendation_removed");
        }
        Ok(VoteOutcome { score, removed })
    }
}
