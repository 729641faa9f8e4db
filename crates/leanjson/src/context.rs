//! Reusable per-call scratch space.
//!
//! Every encode or decode call checks an [`OperationContext`] out of a
//! [`ContextPool`] and has exclusive use of it until the returned
//! [`PooledContext`] guard is dropped. Buffers keep their capacity between
//! checkouts, so steady-state calls do not allocate scratch space.

use std::{
    mem,
    ops::{Deref, DerefMut},
};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::{options::DEFAULT_SEPARATOR, splitter::Member};

/// Most idle contexts a pool holds on to.
pub const MAX_IDLE: usize = 64;

/// Buffers that grew beyond this many bytes are shrunk before pooling.
pub const MAX_RETAINED_CAPACITY: usize = 64 * 1024;

/// Scratch buffers for one in-flight call.
#[derive(Debug)]
pub struct OperationContext {
    /// Text scratch, used to render field names for non-default separators.
    pub(crate) text: String,
    /// Stack of split members shared by every nesting level of one decode.
    pub(crate) members: Vec<Member>,
    /// Unescaped string bytes during decode; staged output during
    /// [`encode_to`](crate::Codec::encode_to).
    pub(crate) escape: Vec<u8>,
    pub(crate) separator: char,
}

impl Default for OperationContext {
    fn default() -> Self {
        Self {
            text: String::new(),
            members: Vec::new(),
            escape: Vec::new(),
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl OperationContext {
    fn new() -> Self {
        Self {
            text: String::with_capacity(64),
            members: Vec::with_capacity(16),
            escape: Vec::with_capacity(256),
            separator: DEFAULT_SEPARATOR,
        }
    }

    /// Separator bound for the current call.
    #[must_use]
    pub fn separator(&self) -> char {
        self.separator
    }

    fn reset(&mut self, separator: char) {
        self.text.clear();
        self.members.clear();
        self.escape.clear();
        self.separator = separator;
    }

    /// Clears content before the context goes back to the pool.
    fn scrub(&mut self) {
        self.reset(DEFAULT_SEPARATOR);
        if self.text.capacity() > MAX_RETAINED_CAPACITY {
            self.text.shrink_to(MAX_RETAINED_CAPACITY);
        }
        if self.escape.capacity() > MAX_RETAINED_CAPACITY {
            self.escape.shrink_to(MAX_RETAINED_CAPACITY);
        }
        let member_limit = MAX_RETAINED_CAPACITY / mem::size_of::<Member>();
        if self.members.capacity() > member_limit {
            self.members.shrink_to(member_limit);
        }
    }

    fn is_allocated(&self) -> bool {
        self.text.capacity() != 0 || self.members.capacity() != 0 || self.escape.capacity() != 0
    }
}

/// A checkout/return pool of [`OperationContext`]s.
#[derive(Debug)]
pub struct ContextPool {
    idle: Mutex<Vec<OperationContext>>,
    max_idle: usize,
}

impl Default for ContextPool {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextPool {
    /// An empty pool holding at most [`MAX_IDLE`] idle contexts.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_max_idle(MAX_IDLE)
    }

    /// An empty pool holding at most `max_idle` idle contexts.
    #[must_use]
    pub const fn with_max_idle(max_idle: usize) -> Self {
        Self {
            idle: parking_lot::const_mutex(Vec::new()),
            max_idle,
        }
    }

    /// Checks out a context with empty buffers and `separator` bound.
    pub fn acquire(&self, separator: char) -> PooledContext<'_> {
        let recycled = self.idle.lock().pop();
        let mut ctx = recycled.unwrap_or_else(|| {
            trace!("allocating operation context");
            OperationContext::new()
        });
        ctx.reset(separator);
        PooledContext { pool: self, ctx }
    }

    /// Returns a context to the pool. Contexts beyond the idle limit are
    /// dropped.
    pub fn release(&self, mut ctx: OperationContext) {
        if !ctx.is_allocated() {
            return;
        }
        ctx.scrub();
        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(ctx);
        } else {
            drop(idle);
            debug!(max_idle = self.max_idle, "discarding operation context over idle limit");
        }
    }

    /// Number of contexts waiting for reuse.
    #[must_use]
    pub fn idle_count(&self) -> usize {
        self.idle.lock().len()
    }
}

/// Exclusive access to a checked-out context; returns it to its pool on drop,
/// including when the call fails or unwinds.
#[derive(Debug)]
pub struct PooledContext<'p> {
    pool: &'p ContextPool,
    ctx: OperationContext,
}

impl Deref for PooledContext<'_> {
    type Target = OperationContext;

    fn deref(&self) -> &Self::Target {
        &self.ctx
    }
}

impl DerefMut for PooledContext<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.ctx
    }
}

impl Drop for PooledContext<'_> {
    fn drop(&mut self) {
        self.pool.release(mem::take(&mut self.ctx));
    }
}

/// Pool behind the crate-level entry points.
pub(crate) static POOL: ContextPool = ContextPool::new();
