//! Elapsed-time logging.

use courier_core::{
    CancellationToken, Error, Event, EventMiddleware, EventNext, Next, Request, RequestMiddleware,
};
use std::{any::type_name, time::Instant};

/// A middleware that logs how long the rest of the pipeline took.
///
/// Success is logged at `info`, failure at `error`; both include the elapsed
/// time in milliseconds.
#[derive(Debug, Default, Clone, Copy)]
pub struct PerformanceMiddleware;

fn report<T>(kind: &'static str, name: &'static str, start: Instant, result: &Result<T, Error>) {
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    match result {
        Ok(_) => tracing::info!(kind, name, elapsed_ms, "completed"),
        Err(error) => tracing::error!(kind, name, elapsed_ms, %error, "failed"),
    }
}

impl<R: Request> RequestMiddleware<R> for PerformanceMiddleware {
    async fn handle(
        &self,
        _request: &R,
        next: Next<'_, R>,
        _cancel: &CancellationToken,
    ) -> Result<R::Response, Error> {
        let start = Instant::now();
        let result = next.run().await;
        report("request", type_name::<R>(), start, &result);
        result
    }
}

impl<E: Event> EventMiddleware<E> for PerformanceMiddleware {
    async fn handle(
        &self,
        _event: &E,
        next: EventNext<'_, E>,
        _cancel: &CancellationToken,
    ) -> Result<(), Error> {
        let start = Instant::now();
        let result = next.run().await;
        report("event", type_name::<E>(), start, &result);
        result
    }
}
