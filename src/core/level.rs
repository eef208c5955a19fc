//! Log level definitions and the process-wide level name table
//!
//! A [`Level`] is a plain signed priority: higher is more severe. Display
//! names live in a copy-on-write table that can be changed at runtime with
//! [`register_level_name`]; readers always see a complete snapshot.

use super::error::{LoggerError, Result};
use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

/// A logging priority. Comparison is purely numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "LevelRepr", into = "LevelRepr")]
pub struct Level(i8);

impl Level {
    /// Voluminous diagnostics, usually disabled in production.
    pub const DEBUG: Level = Level(-1);
    /// The default priority.
    pub const INFO: Level = Level(0);
    /// More important than info, no individual review needed.
    pub const WARN: Level = Level(1);
    /// High priority. A healthy application should not produce these.
    pub const ERROR: Level = Level(2);
    /// Sentinel above every real level: a logger at this level prints nothing.
    pub const CLOSED: Level = Level(i8::MAX);
    /// Sentinel below every real level: a logger at this level prints everything.
    pub const ALL: Level = Level(i8::MIN);

    #[must_use]
    pub const fn new(value: i8) -> Self {
        Level(value)
    }

    #[must_use]
    pub const fn value(self) -> i8 {
        self.0
    }

    /// Whether a logger whose effective level is `self` may emit at `candidate`.
    #[inline]
    #[must_use]
    pub fn permits(self, candidate: Level) -> bool {
        self != Level::CLOSED && self <= candidate
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::INFO
    }
}

impl From<i8> for Level {
    fn from(value: i8) -> Self {
        Level(value)
    }
}

fn builtin_names() -> HashMap<Level, String> {
    HashMap::from([
        (Level::DEBUG, "DEBUG".to_string()),
        (Level::INFO, "INFO".to_string()),
        (Level::WARN, "WARN".to_string()),
        (Level::ERROR, "ERROR".to_string()),
    ])
}

static LEVEL_NAMES: LazyLock<ArcSwap<HashMap<Level, String>>> =
    LazyLock::new(|| ArcSwap::from_pointee(builtin_names()));

/// Register the display name of `level`, overwriting any existing name.
///
/// An empty `name` deregisters the level, so it falls back to `Level(<n>)`.
/// The table is replaced as a whole with a compare-and-swap retry loop;
/// concurrent readers keep the snapshot they loaded.
pub fn register_level_name(level: Level, name: &str) {
    LEVEL_NAMES.rcu(|names| {
        let mut names = HashMap::clone(names);
        if name.is_empty() {
            names.remove(&level);
        } else {
            names.insert(level, name.to_string());
        }
        names
    });
}

/// Restore the built-in DEBUG/INFO/WARN/ERROR names, dropping everything else.
pub fn reset_level_names() {
    LEVEL_NAMES.store(Arc::new(builtin_names()));
}

/// Snapshot of the current name table.
#[must_use]
pub fn level_names() -> Arc<HashMap<Level, String>> {
    LEVEL_NAMES.load_full()
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = LEVEL_NAMES.load();
        match names.get(self) {
            Some(name) if !name.is_empty() => f.write_str(name),
            _ => write!(f, "Level({})", self.0),
        }
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    /// Accepts a registered name (case-insensitive), `WARNING`, `CLOSED`,
    /// `ALL`, the fallback form `Level(<n>)` or a bare integer.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let names = LEVEL_NAMES.load();
        if let Some((level, _)) = names
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(trimmed))
        {
            return Ok(*level);
        }

        match trimmed.to_uppercase().as_str() {
            "WARNING" => return Ok(Level::WARN),
            "CLOSED" | "OFF" => return Ok(Level::CLOSED),
            "ALL" => return Ok(Level::ALL),
            _ => {}
        }

        let number = trimmed
            .strip_prefix("Level(")
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(trimmed);
        number
            .parse::<i8>()
            .map(Level)
            .map_err(|_| LoggerError::invalid_level(s))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum LevelRepr {
    Number(i8),
    Name(String),
}

impl TryFrom<LevelRepr> for Level {
    type Error = LoggerError;

    fn try_from(repr: LevelRepr) -> Result<Self> {
        match repr {
            LevelRepr::Number(value) => Ok(Level(value)),
            LevelRepr::Name(name) => name.parse(),
        }
    }
}

impl From<Level> for LevelRepr {
    fn from(level: Level) -> Self {
        LevelRepr::Name(level.to_string())
    }
}
