pub mod club_dto;
pub mod group_dto;
pub mod league_dto;
pub mod match_dto;
pub mod player_dto;
pub mod standings_dto;
