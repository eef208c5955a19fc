//! Reusable message buffers
//!
//! Composing a line needs a scratch `String`. Buffers are taken from a shared
//! pool and handed back, cleared, when the [`PooledBuffer`] guard drops.

use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};
use std::sync::LazyLock;

/// Buffers grown beyond this are dropped instead of pooled.
const MAX_POOLED_CAPACITY: usize = 64 * 1024;
/// Upper bound on idle buffers kept around.
const MAX_IDLE_BUFFERS: usize = 64;

static SHARED: LazyLock<BufferPool> = LazyLock::new(BufferPool::new);

/// Pool used by the builtin printers and outputs.
pub fn shared() -> &'static BufferPool {
    &SHARED
}

#[derive(Debug, Default)]
pub struct BufferPool {
    idle: Mutex<Vec<String>>,
}

impl BufferPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take an empty buffer, reusing an idle one when available.
    pub fn get(&self) -> PooledBuffer<'_> {
        let buf = self.idle.lock().pop().unwrap_or_default();
        PooledBuffer { pool: self, buf }
    }

    pub fn idle_count(&self) -> usize {
        self.idle.lock().len()
    }

    fn put(&self, mut buf: String) {
        if buf.capacity() > MAX_POOLED_CAPACITY {
            return;
        }
        buf.clear();
        let mut idle = self.idle.lock();
        if idle.len() < MAX_IDLE_BUFFERS {
            idle.push(buf);
        }
    }
}

/// RAII guard returning its buffer to the pool on drop.
pub struct PooledBuffer<'a> {
    pool: &'a BufferPool,
    buf: String,
}

impl Deref for PooledBuffer<'_> {
    type Target = String;

    fn deref(&self) -> &String {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut String {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.put(std::mem::take(&mut self.buf));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write;

    #[test]
    fn test_buffer_returned_cleared() {
        let pool = BufferPool::new();
        {
            let mut buf = pool.get();
            write!(buf, "level={} ", "INFO").unwrap();
            assert_eq!(buf.as_str(), "level=INFO ");
        }
        assert_eq!(pool.idle_count(), 1);
        let buf = pool.get();
        assert!(buf.is_empty());
        assert!(buf.capacity() > 0);
    }

    #[test]
    fn test_oversized_buffer_not_pooled() {
        let pool = BufferPool::new();
        {
            let mut buf = pool.get();
            buf.reserve(MAX_POOLED_CAPACITY + 1);
        }
        assert_eq!(pool.idle_count(), 0);
    }
}
