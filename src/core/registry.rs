//! Process-wide registration points
//!
//! Three handles live here: the logger provider used by [`get`], the level
//! store consulted by loggers that have none of their own, and an optional
//! [`Manager`]. Each is an atomically swappable snapshot; replacing one
//! never blocks callers that are logging at the same time.
//!
//! Before any setup, [`get`] serves [`StdLogger`]s writing to stderr at a
//! root level of INFO, so logging calls never find a missing logger.

use super::error::{LoggerError, Result};
use super::level_store::{LevelStore, StdLevelStore};
use super::logger::{Logger, Manager, StdLogger};
use super::output::Output;
use crate::outputs::LineOutput;
use arc_swap::{ArcSwap, ArcSwapOption};
use std::sync::{Arc, LazyLock};

/// Produces loggers by name.
pub trait LoggerProvider: Send + Sync {
    fn logger(&self, name: &str) -> Arc<dyn Logger>;
}

impl<F> LoggerProvider for F
where
    F: Fn(&str) -> Arc<dyn Logger> + Send + Sync,
{
    fn logger(&self, name: &str) -> Arc<dyn Logger> {
        self(name)
    }
}

/// Stateless provider building a fresh [`StdLogger`] per request. The
/// loggers resolve their level through the registered level store.
#[derive(Clone)]
pub struct StdLoggerProvider {
    output: Arc<dyn Output>,
}

impl StdLoggerProvider {
    pub fn new(output: Arc<dyn Output>) -> Self {
        Self { output }
    }
}

impl LoggerProvider for StdLoggerProvider {
    fn logger(&self, name: &str) -> Arc<dyn Logger> {
        Arc::new(StdLogger::new(name, self.output.clone()))
    }
}

struct ManagerProvider(Arc<Manager>);

impl LoggerProvider for ManagerProvider {
    fn logger(&self, name: &str) -> Arc<dyn Logger> {
        self.0.get(name)
    }
}

fn default_provider() -> Box<dyn LoggerProvider> {
    Box::new(StdLoggerProvider::new(Arc::new(LineOutput::stderr())))
}

fn default_level_store() -> Arc<dyn LevelStore> {
    Arc::new(StdLevelStore::new())
}

static PROVIDER: LazyLock<ArcSwap<Box<dyn LoggerProvider>>> =
    LazyLock::new(|| ArcSwap::from_pointee(default_provider()));

static LEVEL_STORE: LazyLock<ArcSwap<Arc<dyn LevelStore>>> =
    LazyLock::new(|| ArcSwap::from_pointee(default_level_store()));

static MANAGER: LazyLock<ArcSwapOption<Manager>> = LazyLock::new(ArcSwapOption::empty);

/// Register the provider used by [`get`]. The last call wins.
pub fn use_provider<P>(provider: P)
where
    P: LoggerProvider + 'static,
{
    let provider: Box<dyn LoggerProvider> = Box::new(provider);
    PROVIDER.store(Arc::new(provider));
}

/// Register the level store consulted by loggers without a store of their own.
pub fn use_level_store(store: Arc<dyn LevelStore>) {
    LEVEL_STORE.store(Arc::new(store));
}

/// The currently registered level store.
pub fn level_store() -> Arc<dyn LevelStore> {
    Arc::clone(&**LEVEL_STORE.load())
}

/// Register `manager`, making its store the process-wide level store and its
/// cached loggers what [`get`] returns.
///
/// Passing `None` unregisters the manager and restores the default provider.
/// Loggers obtained earlier stay bound to whatever produced them.
pub fn use_manager(manager: Option<Arc<Manager>>) {
    match manager {
        Some(manager) => {
            use_level_store(manager.level_store());
            use_provider(ManagerProvider(manager.clone()));
            MANAGER.store(Some(manager));
        }
        None => {
            MANAGER.store(None);
            PROVIDER.store(Arc::new(default_provider()));
        }
    }
}

/// The registered manager, or [`LoggerError::NoManager`].
pub fn manager() -> Result<Arc<Manager>> {
    MANAGER.load_full().ok_or(LoggerError::NoManager)
}

/// Logger for `name` from the registered provider.
pub fn get(name: &str) -> Arc<dyn Logger> {
    PROVIDER.load().logger(name)
}

/// Restore the startup state: default provider, a fresh INFO-rooted level
/// store and no manager.
pub fn reset() {
    MANAGER.store(None);
    PROVIDER.store(Arc::new(default_provider()));
    LEVEL_STORE.store(Arc::new(default_level_store()));
}
