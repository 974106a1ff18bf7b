pub mod clubs;
pub mod groups;
pub mod league;
pub mod matches;
pub mod players;
