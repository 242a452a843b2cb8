use serde::{Deserialize, Serialize};

/// Stored recommendation, as returned to clients.
pub type Recommendation = models::recommendation::Model;

/// Creation input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecommendation {
    pub name: String,
    pub youtube_link: String,
}

/// Direction of a single vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreDelta {
    Up,
    Down,
}

impl ScoreDelta {
    pub fn value(self) -> i32 {
        match self {
            ScoreDelta::Up => 1,
            ScoreDelta::Down => -1,
        }
    }
}

/// Result of a vote: the score after it, and whether the record was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteOutcome {
    pub score: i32,
    pub removed: bool,
}
