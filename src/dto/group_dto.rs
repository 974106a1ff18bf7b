use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::dto::{club_dto::Club, standings_dto::ClubRecord};

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum GroupStatus {
    #[default]
    Active,
    Completed,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: GroupStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Body of `POST /groups` and `PUT /groups/{id}`. A missing status means
/// `active` on create and "unchanged" on update.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GroupPayload {
    pub name: String,
    pub description: Option<String>,
    pub status: Option<GroupStatus>,
}

impl GroupPayload {
    pub fn validate(&self) -> Result<(), String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Group name is required.".to_string());
        }
        if name.chars().count() > 255 {
            return Err("Group name cannot be longer than 255 characters.".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AttachClub {
    pub club_id: i64,
}

/// A group together with its computed table.
#[derive(Debug, Serialize, Clone)]
pub struct GroupStandings {
    pub group: Group,
    pub standings: Vec<ClubRecord>,
    pub qualified: Vec<ClubRecord>,
}

#[derive(Debug, Serialize)]
pub struct GroupDetails {
    #[serde(flatten)]
    pub standings: GroupStandings,
    pub clubs: Vec<Club>,
}
