//! Cooperative cancellation.

use crate::error::Error;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// A shared flag threaded through every handler, middleware and strategy call.
///
/// Clones observe the same flag. Cancellation is cooperative: nothing is
/// interrupted, callers check the token at their own suspension points.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation to every clone of this token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Check whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Return [`Error::Cancelled`] if cancellation was requested.
    pub fn error_if_cancelled(&self) -> Result<(), Error> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}
