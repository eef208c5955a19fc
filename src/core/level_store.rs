//! Hierarchical logger-name to level configuration
//!
//! Logger names are paths whose segments are separated by `.` or `/`. A
//! lookup walks from the full name towards the root, returning the first
//! configured ancestor, so `a/b/c` tries `a/b/c`, `a/b`, `a`, then the root
//! entry stored under the empty name.

use super::level::Level;
use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::sync::Arc;

/// Name of the implicit root entry.
pub const ROOT: &str = "";

/// Storage of minimum levels per logger name.
pub trait LevelStore: Send + Sync {
    /// Effective level for `name` by longest-ancestor match.
    fn get(&self, name: &str) -> Level;

    /// Set the level of `name`. The last call for a name wins.
    fn set(&self, name: &str, level: Level) -> &dyn LevelStore;

    /// Remove the entry for `name` so it inherits again.
    fn unset(&self, name: &str) -> &dyn LevelStore;

    /// Replace every entry at once.
    fn restore(&self, levels: HashMap<String, Level>) -> &dyn LevelStore;

    /// Copy of the current entries.
    fn levels(&self) -> HashMap<String, Level>;
}

/// Builtin [`LevelStore`] backed by a copy-on-write map.
///
/// Reads are a single atomic pointer load. Writes copy the map, apply the
/// change and publish it with a compare-and-swap, retrying on conflict.
pub struct StdLevelStore {
    levels: ArcSwap<HashMap<String, Level>>,
}

impl StdLevelStore {
    /// Create a store whose root is [`Level::INFO`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            levels: ArcSwap::from_pointee(HashMap::from([(ROOT.to_string(), Level::INFO)])),
        }
    }

    /// Create a builder for configuring a store
    ///
    /// # Example
    ///
    /// ```
    /// use rust_log_facade::{Level, LevelStore, StdLevelStore};
    ///
    /// let store = StdLevelStore::builder()
    ///     .root_level(Level::WARN)
    ///     .logger_level("db", Level::DEBUG)
    ///     .build();
    ///
    /// assert_eq!(store.get("db/pool"), Level::DEBUG);
    /// assert_eq!(store.get("http"), Level::WARN);
    /// ```
    #[must_use]
    pub fn builder() -> StdLevelStoreBuilder {
        StdLevelStoreBuilder::new()
    }

    fn update<F>(&self, mutate: F)
    where
        F: Fn(&mut HashMap<String, Level>),
    {
        self.levels.rcu(|levels| {
            let mut levels = HashMap::clone(levels);
            mutate(&mut levels);
            levels
        });
    }
}

impl Default for StdLevelStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelStore for StdLevelStore {
    fn get(&self, name: &str) -> Level {
        let levels = self.levels.load();
        let mut name = name;
        while !name.is_empty() {
            if let Some(level) = levels.get(name) {
                return *level;
            }
            match name.rfind(['.', '/']) {
                Some(index) => name = &name[..index],
                None => break,
            }
        }
        levels.get(ROOT).copied().unwrap_or(Level::INFO)
    }

    fn set(&self, name: &str, level: Level) -> &dyn LevelStore {
        self.update(|levels| {
            levels.insert(name.to_string(), level);
        });
        self
    }

    fn unset(&self, name: &str) -> &dyn LevelStore {
        self.update(|levels| {
            levels.remove(name);
        });
        self
    }

    fn restore(&self, levels: HashMap<String, Level>) -> &dyn LevelStore {
        self.levels.store(Arc::new(levels));
        self
    }

    fn levels(&self) -> HashMap<String, Level> {
        HashMap::clone(&self.levels.load())
    }
}

/// Builder for [`StdLevelStore`]; options apply at construction time only.
#[derive(Debug, Default)]
pub struct StdLevelStoreBuilder {
    root: Option<Level>,
    loggers: Vec<(String, Level)>,
}

impl StdLevelStoreBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root level, used when no ancestor of a name is configured
    #[must_use]
    pub fn root_level(mut self, level: Level) -> Self {
        self.root = Some(level);
        self
    }

    /// Set the level of one logger name
    #[must_use]
    pub fn logger_level(mut self, name: impl Into<String>, level: Level) -> Self {
        self.loggers.push((name.into(), level));
        self
    }

    #[must_use]
    pub fn build(self) -> StdLevelStore {
        let mut levels = HashMap::from([(ROOT.to_string(), self.root.unwrap_or(Level::INFO))]);
        for (name, level) in self.loggers {
            levels.insert(name, level);
        }
        StdLevelStore {
            levels: ArcSwap::from_pointee(levels),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_root_is_info() {
        let store = StdLevelStore::new();
        assert_eq!(store.get(""), Level::INFO);
        assert_eq!(store.get("anything"), Level::INFO);
    }

    #[test]
    fn test_longest_ancestor_match() {
        let store = StdLevelStore::builder()
            .root_level(Level::ERROR)
            .logger_level("a", Level::DEBUG)
            .build();
        assert_eq!(store.get("a/b/c"), Level::DEBUG);
        assert_eq!(store.get("a.b.c"), Level::DEBUG);
        assert_eq!(store.get("a/b.c"), Level::DEBUG);
        assert_eq!(store.get("ab"), Level::ERROR);
    }

    #[test]
    fn test_nearest_ancestor_wins() {
        let store = StdLevelStore::new();
        store.set("a", Level::WARN).set("a/b", Level::DEBUG);
        assert_eq!(store.get("a/b/c"), Level::DEBUG);
        assert_eq!(store.get("a/x"), Level::WARN);
    }

    #[test]
    fn test_root_only() {
        let store = StdLevelStore::builder().root_level(Level::WARN).build();
        assert_eq!(store.get("anything"), Level::WARN);
        assert_eq!(store.get("deep/nested.name"), Level::WARN);
    }

    #[test]
    fn test_unset_restores_inheritance() {
        let store = StdLevelStore::new();
        store.set("svc", Level::CLOSED);
        assert_eq!(store.get("svc/api"), Level::CLOSED);
        store.unset("svc");
        assert_eq!(store.get("svc/api"), Level::INFO);
    }

    #[test]
    fn test_missing_root_falls_back_to_info() {
        let store = StdLevelStore::new();
        store.unset(ROOT);
        assert_eq!(store.get("x"), Level::INFO);
    }

    #[test]
    fn test_levels_is_a_snapshot() {
        let store = StdLevelStore::new();
        store.set("a", Level::WARN);
        let mut snapshot = store.levels();
        snapshot.insert("b".to_string(), Level::ERROR);
        assert_eq!(store.get("b"), Level::INFO);
        assert_eq!(store.levels().len(), 2);
    }

    #[test]
    fn test_restore_replaces_everything() {
        let store = StdLevelStore::new();
        store.set("a", Level::WARN);
        store.restore(HashMap::from([(ROOT.to_string(), Level::ERROR)]));
        assert_eq!(store.get("a"), Level::ERROR);
        assert_eq!(store.levels().len(), 1);
    }
}
