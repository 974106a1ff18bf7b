use std::env;
use std::str::FromStr;

use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: String,
    pub max_connections: u32,
    /// How many clubs advance from each group.
    pub qualifiers_per_group: usize,
    pub matches_per_page: u32,
    pub log_level: String,
    pub seed_demo: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://league.db?mode=rwc".to_string(),
            bind_address: "0.0.0.0:3000".to_string(),
            max_connections: 5,
            qualifiers_per_group: 2,
            matches_per_page: 20,
            log_level: "info".to_string(),
            seed_demo: false,
        }
    }
}

impl AppConfig {
    /// Reads the environment. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_address: lookup("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.max_connections),
            qualifiers_per_group: parse_or(&lookup, "QUALIFIERS_PER_GROUP", defaults.qualifiers_per_group),
            matches_per_page: parse_or(&lookup, "MATCHES_PER_PAGE", defaults.matches_per_page).max(1),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            seed_demo: lookup("SEED_DEMO")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.seed_demo),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid {} value '{}', using {}", key, raw, default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config(&[]);
        assert_eq!(cfg.qualifiers_per_group, 2);
        assert_eq!(cfg.matches_per_page, 20);
        assert_eq!(cfg.bind_address, "0.0.0.0:3000");
        assert!(!cfg.seed_demo);
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[("QUALIFIERS_PER_GROUP", "4"), ("SEED_DEMO", "true"), ("MATCHES_PER_PAGE", "0")]);
        assert_eq!(cfg.qualifiers_per_group, 4);
        assert!(cfg.seed_demo);
        assert_eq!(cfg.matches_per_page, 1);
    }

    #[test]
    fn malformed_number_falls_back() {
        let cfg = config(&[("QUALIFIERS_PER_GROUP", "two")]);
        assert_eq!(cfg.qualifiers_per_group, 2);
    }
}
