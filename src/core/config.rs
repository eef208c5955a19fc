//! Level configuration loaded from JSON
//!
//! ```json
//! { "root": "WARN", "loggers": { "db": "DEBUG", "http/access": "CLOSED" } }
//! ```
//!
//! Levels may be given by name (case-insensitive) or as raw integers.

use super::error::{LoggerError, Result};
use super::level::Level;
use super::level_store::{LevelStore, StdLevelStore, ROOT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LevelConfig {
    /// Root level; INFO when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<Level>,

    /// Per-logger levels keyed by hierarchical name
    pub loggers: BTreeMap<String, Level>,
}

impl LevelConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LevelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading level config",
                format!("cannot read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json(&json)
    }

    /// Capture the entries of an existing store.
    pub fn from_store(store: &dyn LevelStore) -> Self {
        let mut loggers: BTreeMap<String, Level> = store.levels().into_iter().collect();
        let root = loggers.remove(ROOT);
        Self { root, loggers }
    }

    /// Reject entries for the empty name; the root belongs in `root`.
    pub fn validate(&self) -> Result<()> {
        if self.loggers.contains_key(ROOT) {
            return Err(LoggerError::config(
                "LevelConfig",
                "logger name must not be empty, use `root` instead",
            ));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a store holding exactly these levels.
    #[must_use]
    pub fn build(&self) -> StdLevelStore {
        let mut builder = StdLevelStore::builder();
        if let Some(root) = self.root {
            builder = builder.root_level(root);
        }
        for (name, level) in &self.loggers {
            builder = builder.logger_level(name.clone(), *level);
        }
        builder.build()
    }

    /// Apply these levels on top of an existing store.
    pub fn apply(&self, store: &dyn LevelStore) {
        if let Some(root) = self.root {
            store.set(ROOT, root);
        }
        for (name, level) in &self.loggers {
            store.set(name, *level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::level::tests::NAMES_LOCK;

    #[test]
    fn test_from_json_and_build() {
        let _guard = NAMES_LOCK.lock();
        let config = LevelConfig::from_json(
            r#"{ "root": "warn", "loggers": { "db": "DEBUG", "http/access": "closed", "raw": 2 } }"#,
        )
        .unwrap();
        let store = config.build();
        assert_eq!(store.get("anything"), Level::WARN);
        assert_eq!(store.get("db/pool"), Level::DEBUG);
        assert_eq!(store.get("http/access"), Level::CLOSED);
        assert_eq!(store.get("raw"), Level::ERROR);
    }

    #[test]
    fn test_missing_root_defaults_to_info() {
        let config = LevelConfig::from_json("{}").unwrap();
        assert_eq!(config.build().get("x"), Level::INFO);
    }

    #[test]
    fn test_rejects_empty_logger_name() {
        let err = LevelConfig::from_json(r#"{ "loggers": { "": 1 } }"#).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_rejects_unknown_level() {
        let _guard = NAMES_LOCK.lock();
        let err = LevelConfig::from_json(r#"{ "root": "LOUD" }"#).unwrap_err();
        assert!(matches!(err, LoggerError::JsonError(_)));
    }

    #[test]
    fn test_from_store_round_trip() {
        let _guard = NAMES_LOCK.lock();
        let store = StdLevelStore::builder()
            .root_level(Level::ERROR)
            .logger_level("a.b", Level::DEBUG)
            .build();
        let config = LevelConfig::from_store(&store);
        assert_eq!(config.root, Some(Level::ERROR));
        let reparsed = LevelConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn test_apply_overrides() {
        let store = StdLevelStore::new();
        store.set("keep", Level::WARN);
        LevelConfig {
            root: Some(Level::ERROR),
            loggers: BTreeMap::from([("svc".to_string(), Level::DEBUG)]),
        }
        .apply(&store);
        assert_eq!(store.get("keep"), Level::WARN);
        assert_eq!(store.get("svc/x"), Level::DEBUG);
        assert_eq!(store.get("other"), Level::ERROR);
    }
}
