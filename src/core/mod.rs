//! Core facade types and traits

pub mod buffer_pool;
pub mod config;
pub mod error;
pub mod level;
pub mod level_store;
pub mod logger;
pub mod metrics;
pub mod output;
pub mod printer;
pub mod registry;
pub mod timestamp;
pub mod value;

pub use config::LevelConfig;
pub use error::{LoggerError, Result};
pub use level::{level_names, register_level_name, reset_level_names, Level};
pub use level_store::{LevelStore, StdLevelStore, StdLevelStoreBuilder, ROOT};
pub use logger::{Logger, Manager, StdLogger};
pub use metrics::OutputMetrics;
pub use output::{
    compose_line, filter_cover_field, filter_enable, filter_remove_field, Field, Output,
    OutputFilter, LEVEL_KEY, LOGGER_KEY,
};
pub use printer::{NopPrinter, Printer, StdPrinter};
pub use registry::{
    get, level_store, manager, reset, use_level_store, use_manager, use_provider,
    LoggerProvider, StdLoggerProvider,
};
pub use timestamp::TimestampFormat;
pub use value::{resolve, Context, Value, Valuer};
