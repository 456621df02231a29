//! Request Context
//!
//! Carried explicitly through every Core call. Holds the request id used in
//! log lines, an optional deadline, and a cancellation flag the caller may
//! raise from another thread.
//!
//! Core operations check the context before and after each persistence call
//! and abort when it is cancelled or expired.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::repository::{RepositoryError, RepositoryResult};

/// Per-call context
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Request ID for log correlation
    pub request_id: Uuid,

    /// Point after which the call must abort
    deadline: Option<Instant>,

    /// Shared cancellation flag
    cancelled: Arc<AtomicBool>,

    started_at: Instant,
}

impl RequestContext {
    /// Creates a context with no deadline.
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            deadline: None,
            cancelled: Arc::new(AtomicBool::new(false)),
            started_at: Instant::now(),
        }
    }

    /// Creates a context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new().deadline_in(timeout)
    }

    /// Sets the deadline to `timeout` from now.
    pub fn deadline_in(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    /// Applies an optional timeout.
    pub fn with_optional_timeout(timeout: Option<Duration>) -> Self {
        match timeout {
            Some(t) => Self::with_timeout(t),
            None => Self::new(),
        }
    }

    /// Returns a handle that cancels this context (and all its clones).
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            cancelled: Arc::clone(&self.cancelled),
        }
    }

    /// Returns true once cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Returns true once the deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Fails when the call must stop.
    pub fn check(&self) -> RepositoryResult<()> {
        if self.is_cancelled() {
            return Err(RepositoryError::Cancelled);
        }
        if self.is_expired() {
            return Err(RepositoryError::DeadlineExceeded);
        }
        Ok(())
    }

    /// Elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.started_at.elapsed().as_millis()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancels the context it was taken from.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}
