//! Testing utilities for Courier.
//!
//! Fakes for asserting on pipeline behavior: what ran, in which order, and
//! how often.
//!
//! - [`CallLog`]: a shared, ordered record of calls
//! - [`RecordingMiddleware`]: logs `name.before` and `name.after` around the rest of the pipeline
//! - [`ShortCircuitMiddleware`]: answers without running the rest of the pipeline
//! - [`CountingEventHandler`]: counts the events it receives
//! - [`FailingEventHandler`]: always fails with a [`TestFailure`]
//! - [`DisposeProbe`]: counts disposals

use courier_core::{
    BoxError, CancellationToken, Disposable, Error, Event, EventHandler, EventMiddleware,
    EventNext, Next, Request, RequestMiddleware,
};
use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Call Log
// ============================================================================

/// A shared, ordered record of calls.
///
/// Clones append to the same log.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&self, entry: impl Into<String>) {
        self.lock().push(entry.into());
    }

    /// Copy of every entry, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Number of entries equal to `entry`.
    pub fn count(&self, entry: &str) -> usize {
        self.lock().iter().filter(|e| *e == entry).count()
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if nothing was logged.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// Failures
// ============================================================================

/// The failure raised by the fakes in this module.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TestFailure(pub &'static str);

// ============================================================================
// Middleware
// ============================================================================

/// A middleware that logs `"{name}.before"` and `"{name}.after"` around the
/// rest of the pipeline.
///
/// `after` is logged whether the inner pipeline succeeded or not.
#[derive(Debug, Clone)]
pub struct RecordingMiddleware {
    name: &'static str,
    log: CallLog,
}

impl RecordingMiddleware {
    /// Create a middleware logging into `log`.
    pub fn new(name: &'static str, log: CallLog) -> Self {
        Self { name, log }
    }
}

impl<R: Request> RequestMiddleware<R> for RecordingMiddleware {
    async fn handle(
        &self,
        _request: &R,
        next: Next<'_, R>,
        _cancel: &CancellationToken,
    ) -> Result<R::Response, Error> {
        self.log.push(format!("{}.before", self.name));
        let result = next.run().await;
        self.log.push(format!("{}.after", self.name));
        result
    }
}

impl<E: Event> EventMiddleware<E> for RecordingMiddleware {
    async fn handle(
        &self,
        _event: &E,
        next: EventNext<'_, E>,
        _cancel: &CancellationToken,
    ) -> Result<(), Error> {
        self.log.push(format!("{}.before", self.name));
        let result = next.run().await;
        self.log.push(format!("{}.after", self.name));
        result
    }
}

/// A middleware that never runs the rest of the pipeline.
///
/// Requests get a clone of the configured response; events complete with
/// `Ok(())`. Each call logs `name`.
#[derive(Debug, Clone)]
pub struct ShortCircuitMiddleware<T> {
    name: &'static str,
    log: CallLog,
    response: T,
}

impl<T> ShortCircuitMiddleware<T> {
    /// Create a middleware answering with `response`.
    pub fn new(name: &'static str, log: CallLog, response: T) -> Self {
        Self {
            name,
            log,
            response,
        }
    }
}

impl<R, T> RequestMiddleware<R> for ShortCircuitMiddleware<T>
where
    R: Request<Response = T>,
    T: Clone + Send + Sync + 'static,
{
    async fn handle(
        &self,
        _request: &R,
        _next: Next<'_, R>,
        _cancel: &CancellationToken,
    ) -> Result<T, Error> {
        self.log.push(self.name);
        Ok(self.response.clone())
    }
}

impl<E, T> EventMiddleware<E> for ShortCircuitMiddleware<T>
where
    E: Event,
    T: Send + Sync + 'static,
{
    async fn handle(
        &self,
        _event: &E,
        _next: EventNext<'_, E>,
        _cancel: &CancellationToken,
    ) -> Result<(), Error> {
        self.log.push(self.name);
        Ok(())
    }
}

// ============================================================================
// Event Handlers
// ============================================================================

/// An event handler that counts calls and logs its name.
#[derive(Debug)]
pub struct CountingEventHandler {
    name: &'static str,
    log: CallLog,
    calls: AtomicUsize,
}

impl CountingEventHandler {
    /// Create a handler logging into `log`.
    pub fn new(name: &'static str, log: CallLog) -> Self {
        Self {
            name,
            log,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of events handled.
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<E: Event> EventHandler<E> for CountingEventHandler {
    async fn handle(&self, _event: &E, _cancel: &CancellationToken) -> Result<(), Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.push(self.name);
        Ok(())
    }
}

/// An event handler that logs its name and fails with [`TestFailure`].
#[derive(Debug)]
pub struct FailingEventHandler {
    name: &'static str,
    log: CallLog,
    calls: AtomicUsize,
}

impl FailingEventHandler {
    /// Create a failing handler logging into `log`. The failure message is
    /// the handler name.
    pub fn new(name: &'static str, log: CallLog) -> Self {
        Self {
            name,
            log,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of events handled.
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<E: Event> EventHandler<E> for FailingEventHandler {
    async fn handle(&self, _event: &E, _cancel: &CancellationToken) -> Result<(), Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.push(self.name);
        Err(Error::handler(TestFailure(self.name)))
    }
}

// ============================================================================
// Dispose Probe
// ============================================================================

/// A [`Disposable`] that counts how often it was disposed.
///
/// Clones share the counter.
#[derive(Debug, Clone, Default)]
pub struct DisposeProbe {
    calls: Arc<AtomicUsize>,
    failure: Option<&'static str>,
}

impl DisposeProbe {
    /// Create a probe that disposes successfully.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a probe whose disposal fails with `message`.
    pub fn failing(message: &'static str) -> Self {
        Self {
            calls: Arc::default(),
            failure: Some(message),
        }
    }

    /// Number of disposals so far.
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Disposable for DisposeProbe {
    fn dispose(&self) -> Result<(), BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure {
            Some(message) => Err(Box::new(TestFailure(message))),
            None => Ok(()),
        }
    }
}
