//! Failure logging.

use courier_core::{
    CancellationToken, Error, Event, EventMiddleware, EventNext, Next, Request, RequestMiddleware,
};
use std::any::type_name;

/// A middleware that logs failures of the rest of the pipeline.
///
/// The failure is returned unchanged after logging.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingMiddleware;

impl<R: Request> RequestMiddleware<R> for LoggingMiddleware {
    async fn handle(
        &self,
        _request: &R,
        next: Next<'_, R>,
        _cancel: &CancellationToken,
    ) -> Result<R::Response, Error> {
        next.run().await.inspect_err(|error| {
            tracing::error!(request = type_name::<R>(), %error, "request failed");
        })
    }
}

impl<E: Event> EventMiddleware<E> for LoggingMiddleware {
    async fn handle(
        &self,
        _event: &E,
        next: EventNext<'_, E>,
        _cancel: &CancellationToken,
    ) -> Result<(), Error> {
        next.run().await.inspect_err(|error| {
            tracing::error!(event = type_name::<E>(), %error, "event failed");
        })
    }
}
