//! Named loggers and the caching manager
//!
//! A logger has a name and an output, and nothing else: its level is looked
//! up in a [`LevelStore`] on every call, so level changes apply immediately
//! to loggers that were handed out earlier.

use super::level::Level;
use super::level_store::LevelStore;
use super::output::Output;
use super::printer::{NopPrinter, Printer, StdPrinter};
use super::registry;
use super::value::Context;
use crate::outputs::LineOutput;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A named source of printers.
pub trait Logger: Send + Sync {
    /// Name of the logger, immutable once created.
    fn name(&self) -> &str;

    /// Whether a printer at `level` would produce output right now.
    fn level_enabled(&self, level: Level) -> bool;

    /// Printer at the logger's current effective level.
    ///
    /// Nothing is printed if that level is [`Level::CLOSED`].
    fn printer(&self, ctx: Option<Context>) -> Box<dyn Printer>;

    /// Printer at `level`. When the level is not enabled the returned
    /// printer discards everything. A missing context becomes
    /// [`Context::background`].
    fn at_level(&self, ctx: Option<Context>, level: Level) -> Box<dyn Printer>;
}

#[derive(Clone)]
enum LevelSource {
    /// Whatever store is registered process-wide at call time
    Registered,
    Store(Arc<dyn LevelStore>),
}

/// The builtin logger, printing through an [`Output`].
#[derive(Clone)]
pub struct StdLogger {
    name: Arc<str>,
    output: Arc<dyn Output>,
    levels: LevelSource,
}

impl StdLogger {
    /// Create a logger that resolves its level through the registered store.
    pub fn new(name: &str, output: Arc<dyn Output>) -> Self {
        Self {
            name: Arc::from(name),
            output,
            levels: LevelSource::Registered,
        }
    }

    /// Create a logger writing lines to stderr.
    pub fn with_default_output(name: &str) -> Self {
        Self::new(name, Arc::new(LineOutput::stderr()))
    }

    /// Resolve levels through `store` instead of the registered one.
    #[must_use]
    pub fn with_level_store(mut self, store: Arc<dyn LevelStore>) -> Self {
        self.levels = LevelSource::Store(store);
        self
    }

    /// Current effective level of this logger.
    pub fn effective_level(&self) -> Level {
        match &self.levels {
            LevelSource::Registered => registry::level_store().get(&self.name),
            LevelSource::Store(store) => store.get(&self.name),
        }
    }

    pub fn output(&self) -> &Arc<dyn Output> {
        &self.output
    }
}

impl Logger for StdLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn level_enabled(&self, level: Level) -> bool {
        self.effective_level().permits(level)
    }

    fn printer(&self, ctx: Option<Context>) -> Box<dyn Printer> {
        self.at_level(ctx, self.effective_level())
    }

    fn at_level(&self, ctx: Option<Context>, level: Level) -> Box<dyn Printer> {
        if !self.level_enabled(level) {
            return Box::new(NopPrinter);
        }
        Box::new(StdPrinter::new(
            self.output.clone(),
            self.name.clone(),
            level,
            ctx.unwrap_or_default(),
        ))
    }
}

impl fmt::Debug for StdLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdLogger").field("name", &self.name).finish()
    }
}

/// Hands out one cached logger per name, all sharing one output and one
/// level store.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use rust_log_facade::{Level, LineOutput, Logger, Manager, StdLevelStore};
///
/// let manager = Manager::new(Arc::new(LineOutput::stderr()), Arc::new(StdLevelStore::new()));
/// let logger = manager.get("db/pool");
///
/// manager.level("db", Level::WARN);
/// assert!(!logger.level_enabled(Level::INFO));
/// ```
pub struct Manager {
    output: Arc<dyn Output>,
    store: Arc<dyn LevelStore>,
    loggers: RwLock<HashMap<String, Arc<dyn Logger>>>,
}

impl Manager {
    pub fn new(output: Arc<dyn Output>, store: Arc<dyn LevelStore>) -> Self {
        Self {
            output,
            store,
            loggers: RwLock::new(HashMap::new()),
        }
    }

    /// Logger for `name`, created on first request and cached afterwards.
    pub fn get(&self, name: &str) -> Arc<dyn Logger> {
        if let Some(logger) = self.loggers.read().get(name) {
            return logger.clone();
        }
        self.loggers
            .write()
            .entry(name.to_string())
            .or_insert_with(|| {
                let logger: Arc<dyn Logger> = Arc::new(
                    StdLogger::new(name, self.output.clone()).with_level_store(self.store.clone()),
                );
                logger
            })
            .clone()
    }

    /// Set the level for `name`. The last call for a name wins.
    pub fn level(&self, name: &str, level: Level) {
        self.store.set(name, level);
    }

    pub fn level_store(&self) -> Arc<dyn LevelStore> {
        self.store.clone()
    }

    pub fn output(&self) -> Arc<dyn Output> {
        self.output.clone()
    }

    /// Number of cached loggers.
    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }
}

impl fmt::Debug for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("levels", &self.store.levels())
            .field("loggers", &self.len())
            .finish()
    }
}
