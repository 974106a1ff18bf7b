use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::dto::{group_dto::Group, match_dto::MatchResponse, player_dto::Player};

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Club {
    pub id: i64,
    pub name: String,
    pub short_name: String,
    pub logo: Option<String>,
    pub description: Option<String>,
    pub city: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Body of `POST /clubs` and `PUT /clubs/{id}`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClubPayload {
    pub name: String,
    pub short_name: String,
    pub logo: Option<String>,
    pub description: Option<String>,
    pub city: Option<String>,
}

impl ClubPayload {
    pub fn validate(&self) -> Result<(), String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Club name is required.".to_string());
        }
        if name.chars().count() > 255 {
            return Err("Club name cannot be longer than 255 characters.".to_string());
        }

        let short_name = self.short_name.trim();
        if short_name.is_empty() {
            return Err("Short name is required.".to_string());
        }
        if short_name.chars().count() > 5 {
            return Err("Short name cannot be longer than 5 characters.".to_string());
        }

        if let Some(city) = &self.city {
            if city.chars().count() > 255 {
                return Err("City cannot be longer than 255 characters.".to_string());
            }
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ClubListEntry {
    #[serde(flatten)]
    pub club: Club,
    pub groups: Vec<Group>,
    pub players: Vec<Player>,
}

#[derive(Debug, Serialize)]
pub struct ClubDetails {
    pub club: Club,
    pub groups: Vec<Group>,
    pub players: Vec<Player>,
    pub matches: Vec<MatchResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, short_name: &str) -> ClubPayload {
        ClubPayload {
            name: name.to_string(),
            short_name: short_name.to_string(),
            logo: None,
            description: None,
            city: Some("Madrid".to_string()),
        }
    }

    #[test]
    fn accepts_well_formed_club() {
        assert!(payload("Real Madrid", "RMA").validate().is_ok());
    }

    #[test]
    fn rejects_blank_name() {
        assert_eq!(
            payload("   ", "RMA").validate(),
            Err("Club name is required.".to_string())
        );
    }

    #[test]
    fn rejects_long_short_name() {
        assert_eq!(
            payload("Real Madrid", "REALMA").validate(),
            Err("Short name cannot be longer than 5 characters.".to_string())
        );
    }
}
