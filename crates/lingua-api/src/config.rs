//! Server configuration read from the environment.

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use lingua_content::{CyclePolicy, ValidationOptions};
use lingua_dialogue::{DEFAULT_BASE_XP, FlatXp, PerfectRunBonus, XpPolicy};

use crate::error::AppError;

/// Settings for one server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Interface to bind (`HOST`, default `0.0.0.0`).
    pub host: String,
    /// Port to bind (`PORT`, default `3000`).
    pub port: u16,
    /// `PostgreSQL` URL (`DATABASE_URL`). Progress stays in memory without it.
    pub database_url: Option<String>,
    /// Directory of scenario files (`SCENARIO_DIR`). Bundled content without it.
    pub scenario_dir: Option<PathBuf>,
    /// XP per completion (`XP_BASE`, default 10).
    pub xp_base: u32,
    /// Extra XP for runs without invalid attempts (`XP_PERFECT_BONUS`, default 0).
    pub xp_perfect_bonus: u32,
    /// What to do with cyclic scenarios (`CYCLE_POLICY`, default `allow`).
    pub cycle_policy: CyclePolicy,
}

impl AppConfig {
    /// Reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for unparsable values.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which returns the value of a variable
    /// if it is set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let cycle_policy = match non_empty("CYCLE_POLICY") {
            Some(name) => CyclePolicy::from_name(&name).ok_or_else(|| {
                AppError::Config(format!(
                    "CYCLE_POLICY must be `allow` or `reject`, got `{name}`"
                ))
            })?,
            None => CyclePolicy::default(),
        };

        Ok(Self {
            host: non_empty("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port: parse_or(non_empty("PORT"), "PORT", 3000)?,
            database_url: non_empty("DATABASE_URL"),
            scenario_dir: non_empty("SCENARIO_DIR").map(PathBuf::from),
            xp_base: parse_or(non_empty("XP_BASE"), "XP_BASE", DEFAULT_BASE_XP)?,
            xp_perfect_bonus: parse_or(non_empty("XP_PERFECT_BONUS"), "XP_PERFECT_BONUS", 0)?,
            cycle_policy,
        })
    }

    /// The address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST` is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }

    /// Options for loading scenario content.
    #[must_use]
    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            cycle_policy: self.cycle_policy,
        }
    }

    /// The XP policy: flat unless a perfect-run bonus is configured.
    #[must_use]
    pub fn xp_policy(&self) -> Arc<dyn XpPolicy> {
        if self.xp_perfect_bonus == 0 {
            Arc::new(FlatXp { base: self.xp_base })
        } else {
            Arc::new(PerfectRunBonus {
                base: self.xp_base,
                bonus: self.xp_perfect_bonus,
            })
        }
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} must be a valid number: {e}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use lingua_dialogue::SessionOutcome;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    fn outcome(invalid_attempts: u32) -> SessionOutcome {
        SessionOutcome {
            segments_visited: 3,
            score: 2,
            invalid_attempts,
            vocabulary_count: 2,
        }
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        // Act
        let config = config_from(&[]).unwrap();

        // Assert
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert!(config.database_url.is_none());
        assert!(config.scenario_dir.is_none());
        assert_eq!(config.xp_base, 10);
        assert_eq!(config.xp_perfect_bonus, 0);
        assert_eq!(config.cycle_policy, CyclePolicy::Allow);
        assert_eq!(config.socket_addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_values_are_read_from_lookup() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/lingua"),
            ("SCENARIO_DIR", "/srv/scenarios"),
            ("XP_BASE", "20"),
            ("XP_PERFECT_BONUS", "5"),
            ("CYCLE_POLICY", "Reject"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/lingua")
        );
        assert_eq!(config.scenario_dir, Some(PathBuf::from("/srv/scenarios")));
        assert_eq!(config.cycle_policy, CyclePolicy::Reject);
        assert_eq!(config.xp_policy().xp_for(&outcome(0)), 25);
        assert_eq!(config.xp_policy().xp_for(&outcome(2)), 20);
    }

    #[test]
    fn test_empty_database_url_means_in_memory() {
        let config = config_from(&[("DATABASE_URL", "  ")]).unwrap();

        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_flat_policy_without_bonus() {
        let config = config_from(&[("XP_BASE", "7")]).unwrap();

        assert_eq!(config.xp_policy().xp_for(&outcome(0)), 7);
        assert_eq!(config.xp_policy().xp_for(&outcome(3)), 7);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        for pairs in [
            [("PORT", "eighty")],
            [("XP_BASE", "-1")],
            [("CYCLE_POLICY", "sometimes")],
        ] {
            let result = config_from(&pairs);
            assert!(matches!(result, Err(AppError::Config(_))), "{pairs:?}");
        }
    }

    #[test]
    fn test_non_ip_host_fails_at_bind_time() {
        let config = config_from(&[("HOST", "not a host")]).unwrap();

        assert!(matches!(config.socket_addr(), Err(AppError::Config(_))));
    }
}
