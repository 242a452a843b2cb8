//! Recommendations: domain input, repository seam, business service.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{NewRecommendation, Recommendation, ScoreDelta, VoteOutcome};
pub use service::RecommendationService;
