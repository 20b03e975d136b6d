//! Runtime configuration read from the environment.
//!
//! - `FLASHCARDS_DB`: path of the SQLite file (default `db.sqlite3`)
//! - `FLASHCARDS_SEED`: optional u64 seed for every session's random source

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "FLASHCARDS_DB";
pub const SEED_VAR: &str = "FLASHCARDS_SEED";
pub const DEFAULT_DB_PATH: &str = "db.sqlite3";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub rng_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            rng_seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup(DB_PATH_VAR)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let rng_seed = lookup(SEED_VAR).and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(e) => {
                log::warn!("Ignoring {}={:?}: {}", SEED_VAR, raw, e);
                None
            }
        });

        Self { db_path, rng_seed }
    }

    /// Random source for one session: seeded when configured, OS entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(config.db_path, PathBuf::from("db.sqlite3"));
    }

    #[test]
    fn test_reads_path_and_seed() {
        let config = Config::from_lookup(lookup_from(&[
            (DB_PATH_VAR, "/tmp/cards.sqlite3"),
            (SEED_VAR, " 42 "),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/tmp/cards.sqlite3"));
        assert_eq!(config.rng_seed, Some(42));
    }

    #[test]
    fn test_bad_seed_is_ignored() {
        let config = Config::from_lookup(lookup_from(&[(SEED_VAR, "not-a-number")]));
        assert_eq!(config.rng_seed, None);
    }

    #[test]
    fn test_blank_path_falls_back() {
        let config = Config::from_lookup(lookup_from(&[(DB_PATH_VAR, "  ")]));
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_PATH));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = Config {
            rng_seed: Some(7),
            ..Config::default()
        };
        let mut first = config.rng();
        let mut second = config.rng();
        let a: Vec<u32> = (0..5).map(|_| first.random()).collect();
        let b: Vec<u32> = (0..5).map(|_| second.random()).collect();
        assert_eq!(a, b);
    }
}
