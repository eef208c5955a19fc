//! # Rust Log Facade
//!
//! A pluggable logging facade: obtain named loggers, emit leveled messages
//! with key/value fields, and change minimum levels per logger name while
//! the program runs. Formatting and writing are delegated to a swappable
//! [`Output`].
//!
//! ## Features
//!
//! - **Hierarchical Levels**: `a/b/c` inherits from `a/b`, `a`, then the root
//! - **Lock-Free Updates**: level tables are copy-on-write snapshots
//! - **Deferred Fields**: values computed at emission time from a [`Context`]
//! - **Filters**: veto calls or redact fields before they reach a sink
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use rust_log_facade::prelude::*;
//! use rust_log_facade::values;
//!
//! let buffer = SharedBuffer::new();
//! let store = Arc::new(StdLevelStore::builder().root_level(Level::INFO).build());
//! let logger = StdLogger::new("pkg", Arc::new(LineOutput::new(buffer.clone())))
//!     .with_level_store(store.clone());
//!
//! logger
//!     .at_level(None, Level::INFO)
//!     .with("module", "test".into())
//!     .print(values!["hello", " ", "world"]);
//! assert_eq!(buffer.contents(), "level=INFO logger=pkg module=test hello world\n");
//!
//! store.set("pkg", Level::CLOSED);
//! logger.at_level(None, Level::ERROR).print(values!["dropped"]);
//! assert_eq!(buffer.contents().lines().count(), 1);
//! ```

pub mod core;
pub mod macros;
pub mod outputs;

pub mod prelude {
    pub use crate::core::{
        Context, Field, Level, LevelConfig, LevelStore, Logger, LoggerError, Manager, Output,
        OutputFilter, Printer, Result, StdLevelStore, StdLogger, Value,
    };
    pub use crate::outputs::{JsonOutput, LineOutput, SharedBuffer, SourceLocation};
}

pub use crate::core::{
    compose_line, filter_cover_field, filter_enable, filter_remove_field, get, level_names,
    level_store, manager, register_level_name, reset, reset_level_names, resolve,
    use_level_store, use_manager, use_provider, Context, Field, Level, LevelConfig, LevelStore,
    Logger, LoggerError, LoggerProvider, Manager, NopPrinter, Output, OutputFilter,
    OutputMetrics, Printer, Result, StdLevelStore, StdLevelStoreBuilder, StdLogger,
    StdLoggerProvider, StdPrinter, TimestampFormat, Value, Valuer, LEVEL_KEY, LOGGER_KEY, ROOT,
};
pub use outputs::{JsonOutput, LineOutput, SharedBuffer, SourceLocation};
