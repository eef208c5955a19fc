//! Plain-text line output
//!
//! Renders every call as one line: an optional header (prefix, timestamp,
//! source location), then `key=value` for each field in order, then the
//! message:
//!
//! ```text
//! 2025/01/08 10:30:45 level=INFO logger=pkg module=test hello world
//! ```

use super::LockedWriter;
use crate::core::buffer_pool;
use crate::core::error::{LoggerError, Result};
use crate::core::metrics::OutputMetrics;
use crate::core::output::{compose_line, Field, Output};
use crate::core::timestamp::TimestampFormat;
use crate::core::{Context, Level};
use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write;
use std::panic::Location;
use std::path::Path;

/// How much of the caller location goes into the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceLocation {
    #[default]
    None,
    /// `file.rs:12: `
    Short,
    /// `src/module/file.rs:12: `
    Long,
}

pub struct LineOutput {
    writer: LockedWriter,
    prefix: String,
    timestamp: Option<TimestampFormat>,
    utc: bool,
    location: SourceLocation,
    metrics: OutputMetrics,
}

impl LineOutput {
    /// Write bare lines to `writer`, with no header.
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: LockedWriter::new(writer),
            prefix: String::new(),
            timestamp: None,
            utc: false,
            location: SourceLocation::None,
            metrics: OutputMetrics::new(),
        }
    }

    /// Lines on stderr, headed by the local date and time.
    pub fn stderr() -> Self {
        Self::new(std::io::stderr()).with_timestamp(TimestampFormat::Std)
    }

    /// Lines on stdout, headed by the local date and time.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout()).with_timestamp(TimestampFormat::Std)
    }

    /// Append lines to the file at `path`, creating it if needed.
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}'", path.display()),
                    e,
                )
            })?;
        Ok(Self::new(file))
    }

    /// Text written at the very start of every line
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, format: TimestampFormat) -> Self {
        self.timestamp = Some(format);
        self
    }

    #[must_use]
    pub fn without_timestamp(mut self) -> Self {
        self.timestamp = None;
        self
    }

    /// Render timestamps in UTC instead of the local zone
    #[must_use]
    pub fn with_utc(mut self, utc: bool) -> Self {
        self.utc = utc;
        self
    }

    #[must_use]
    pub fn with_source_location(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    pub fn metrics(&self) -> &OutputMetrics {
        &self.metrics
    }

    fn write_header(&self, buf: &mut String, caller: &'static Location<'static>) {
        buf.push_str(&self.prefix);
        if let Some(format) = &self.timestamp {
            buf.push_str(&format.format_now(self.utc));
            buf.push(' ');
        }
        let file = match self.location {
            SourceLocation::None => return,
            SourceLocation::Short => caller
                .file()
                .rsplit(['/', '\\'])
                .next()
                .unwrap_or(caller.file()),
            SourceLocation::Long => caller.file(),
        };
        let _ = write!(buf, "{}:{}: ", file, caller.line());
    }
}

impl Output for LineOutput {
    fn output(
        &self,
        ctx: &Context,
        _name: &str,
        _level: Level,
        msg: &str,
        fields: &[Field],
        caller: &'static Location<'static>,
    ) {
        let mut buf = buffer_pool::shared().get();
        self.write_header(&mut buf, caller);
        if compose_line(&mut buf, ctx, fields, msg).is_err() {
            return;
        }
        if !buf.ends_with('\n') {
            buf.push('\n');
        }
        self.writer.write_record(buf.as_bytes(), &self.metrics, "line");
    }
}
