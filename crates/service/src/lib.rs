//! Service layer for recommendations.
//! - `recommendation::repository` is the persistence seam (SeaORM or in-memory).
//! - `recommendation::service` holds the vote/removal and selection rules.

pub mod errors;
pub mod recommendation;
#[cfg(test)]
pub mod test_support;
