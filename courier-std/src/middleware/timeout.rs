//! Time-limited execution.

use courier_core::{
    CancellationToken, Error, Event, EventMiddleware, EventNext, Next, Request, RequestMiddleware,
};
use std::time::Duration;
use tokio::time::timeout;

/// A middleware that fails with [`Error::Timeout`] when the rest of the
/// pipeline takes longer than the configured duration.
///
/// The inner future is dropped on timeout. Requires a tokio runtime with the
/// time driver enabled.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutMiddleware {
    duration: Duration,
}

impl TimeoutMiddleware {
    /// Create a new timeout middleware.
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// The configured limit.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl<R: Request> RequestMiddleware<R> for TimeoutMiddleware {
    async fn handle(
        &self,
        _request: &R,
        next: Next<'_, R>,
        _cancel: &CancellationToken,
    ) -> Result<R::Response, Error> {
        timeout(self.duration, next.run())
            .await
            .unwrap_or(Err(Error::Timeout(self.duration)))
    }
}

impl<E: Event> EventMiddleware<E> for TimeoutMiddleware {
    async fn handle(
        &self,
        _event: &E,
        next: EventNext<'_, E>,
        _cancel: &CancellationToken,
    ) -> Result<(), Error> {
        timeout(self.duration, next.run())
            .await
            .unwrap_or(Err(Error::Timeout(self.duration)))
    }
}
