//! Output implementations

pub mod json;
pub mod line;

pub use json::JsonOutput;
pub use line::{LineOutput, SourceLocation};

use crate::core::metrics::{report_write_failure, OutputMetrics};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

// Re-export the trait for convenience
pub use crate::core::Output;

/// Writer shared behind a lock; one record is written with a single call.
pub(crate) struct LockedWriter {
    inner: Mutex<Box<dyn Write + Send>>,
}

impl LockedWriter {
    pub(crate) fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Mutex::new(Box::new(writer)),
        }
    }

    /// Write `record`, absorbing failures into `metrics`.
    pub(crate) fn write_record(&self, record: &[u8], metrics: &OutputMetrics, sink: &str) {
        let result = {
            let mut writer = self.inner.lock();
            writer.write_all(record).and_then(|()| writer.flush())
        };
        match result {
            Ok(()) => {
                metrics.record_written();
            }
            Err(e) => report_write_failure(metrics, sink, &e),
        }
    }
}

/// In-memory writer whose clones share one buffer. Handy for capturing
/// output in tests.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use rust_log_facade::{Level, LineOutput, Logger, SharedBuffer, StdLevelStore, StdLogger};
///
/// let buffer = SharedBuffer::new();
/// let logger = StdLogger::new("app", Arc::new(LineOutput::new(buffer.clone())))
///     .with_level_store(Arc::new(StdLevelStore::new()));
///
/// logger.at_level(None, Level::INFO).printf(format_args!("ready"));
/// assert_eq!(buffer.contents(), "level=INFO logger=app ready\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    pub fn len(&self) -> usize {
        self.bytes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_empty()
    }

    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
