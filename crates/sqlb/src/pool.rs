//! Process-wide pool of scratch render buffers.
//!
//! A [`Scratch`] is always empty when handed out. Dropping it clears the
//! buffer and returns it to the pool, whatever path the render took.

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Buffers kept around between renders.
const MAX_POOLED: usize = 16;
/// Buffers that grew beyond this are dropped instead of pooled.
const MAX_RETAINED_CAPACITY: usize = 64 * 1024;

static POOL: Mutex<Vec<String>> = Mutex::new(Vec::new());

fn pool() -> MutexGuard<'static, Vec<String>> {
    // A panic while holding the lock cannot leave a buffer half-written in the
    // pool: buffers are cleared before they are pushed.
    POOL.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A render buffer, pooled or owned.
#[derive(Debug)]
pub(crate) struct Scratch {
    buf: String,
    pooled: bool,
}

impl Scratch {
    /// Take a buffer from the pool, or allocate one if the pool is empty.
    pub(crate) fn acquire() -> Self {
        let buf = pool().pop().unwrap_or_default();
        debug_assert!(buf.is_empty());
        Self { buf, pooled: true }
    }

    /// A private buffer that bypasses the pool.
    pub(crate) fn unpooled(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
            pooled: false,
        }
    }
}

impl Deref for Scratch {
    type Target = String;

    fn deref(&self) -> &String {
        &self.buf
    }
}

impl DerefMut for Scratch {
    fn deref_mut(&mut self) -> &mut String {
        &mut self.buf
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        if !self.pooled {
            return;
        }
        let mut buf = std::mem::take(&mut self.buf);
        if buf.capacity() > MAX_RETAINED_CAPACITY {
            return;
        }
        buf.clear();
        let mut pool = pool();
        if pool.len() < MAX_POOLED {
            pool.push(buf);
        }
    }
}
