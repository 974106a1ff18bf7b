pub mod league_queries;
pub mod match_rules;
pub mod playoffs;
pub mod seeder;
pub mod standings;
pub mod websocket;
