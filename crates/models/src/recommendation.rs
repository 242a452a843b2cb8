use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A named media item with a link and a vote tally.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recommendations")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub youtube_link: String,
    pub score: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.is_empty() {
        return Err(ModelError::Validation("name is required".into()));
    }
    Ok(())
}

pub fn validate_youtube_link(link: &str) -> Result<(), ModelError> {
    if link.is_empty() {
        return Err(ModelError::Validation("youtubeLink is required".into()));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, name: &str, youtube_link: &str) -> Result<Model, ModelError> {
    create_with_score(db, name, youtube_link, 0).await
}

/// Insert with an explicit starting score. Regular inserts start at zero;
/// other values are for seeding.
pub async fn create_with_score(
    db: &DatabaseConnection,
    name: &str,
    youtube_link: &str,
    score: i32,
) -> Result<Model, ModelError> {
    validate_name(name)?;
    validate_youtube_link(youtube_link)?;
    let am = ActiveModel {
        name: Set(name.to_string()),
        youtube_link: Set(youtube_link.to_string()),
        score: Set(score),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_youtube_link_camel_case() {
        let m = Model { id: 3, name: "Song A".into(), youtube_link: "https://y/1".into(), score: -2 };
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["youtubeLink"], "https://y/1");
        assert_eq!(v["score"], -2);
        assert!(v.get("youtube_link").is_none());
    }

    #[test]
    fn empty_fields_are_rejected() {
        assert!(validate_name("").is_err());
        assert!(validate_youtube_link("").is_err());
        assert!(validate_name("Song A").is_ok());
        assert!(validate_name("   ").is_ok());
        assert!(validate_youtube_link(" ").is_ok());
        // presence only; no URL format check
        assert!(validate_youtube_link("not a url").is_ok());
    }
}
