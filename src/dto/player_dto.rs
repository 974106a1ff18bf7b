use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const POSITIONS: [&str; 10] = ["GK", "CB", "LB", "RB", "CDM", "CM", "CAM", "LW", "RW", "ST"];

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Player {
    pub id: i64,
    pub club_id: i64,
    pub name: String,
    pub jersey_number: i64,
    pub position: String,
    pub birth_date: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlayerPayload {
    pub name: String,
    pub jersey_number: i64,
    pub position: String,
    pub birth_date: Option<NaiveDate>,
    pub nationality: Option<String>,
}

impl PlayerPayload {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Player name is required.".to_string());
        }
        if !(1..=99).contains(&self.jersey_number) {
            return Err("Jersey number must be between 1 and 99.".to_string());
        }
        if !POSITIONS.contains(&self.position.as_str()) {
            return Err(format!("Position must be one of {}.", POSITIONS.join(", ")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn striker(number: i64) -> PlayerPayload {
        PlayerPayload {
            name: "Ada Forward".to_string(),
            jersey_number: number,
            position: "ST".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2000, 2, 29),
            nationality: Some("Spain".to_string()),
        }
    }

    #[test]
    fn jersey_number_range() {
        assert!(striker(9).validate().is_ok());
        assert!(striker(0).validate().is_err());
        assert!(striker(100).validate().is_err());
    }

    #[test]
    fn unknown_position_is_rejected() {
        let mut player = striker(9);
        player.position = "Sweeper".to_string();
        assert!(player.validate().is_err());
    }
}
