use super::Mediator;
use courier_core::{CancellationToken, Command, Error, Event, Query, Request};
use std::future::Future;

/// Sends requests to their single handler.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot send requests",
    label = "missing `Sender` implementation"
)]
pub trait Sender: Send + Sync {
    /// Send `request` and return its handler's response.
    ///
    /// Fails with [`Error::NotFound`] when no handler is registered for `R`
    /// and with [`Error::Ambiguous`] when several are.
    fn send<R: Request>(
        &self,
        request: &R,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<R::Response, Error>> + Send;

    /// Send a command, a request without a response.
    fn send_command<C: Command>(
        &self,
        command: &C,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<(), Error>> + Send;
}

/// Runs queries.
pub trait Getter: Send + Sync {
    /// Run `query` and return its handler's response.
    fn get<Q: Query>(
        &self,
        query: &Q,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Q::Response, Error>> + Send;
}

/// Publishes events to every handler of their type.
pub trait Publisher: Send + Sync {
    /// Publish `event`. Succeeds without doing anything when the event has no
    /// handlers.
    ///
    /// The event's declared strategy is used if it has one, the mediator's
    /// default otherwise. An unknown strategy name fails with
    /// [`Error::KeyedNotFound`].
    fn publish<E: Event>(
        &self,
        event: &E,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<(), Error>> + Send;
}

impl Sender for Mediator {
    async fn send<R: Request>(
        &self,
        request: &R,
        cancel: &CancellationToken,
    ) -> Result<R::Response, Error> {
        self.dispatch_request(request, cancel).await
    }

    async fn send_command<C: Command>(
        &self,
        command: &C,
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        self.dispatch_request(command, cancel).await
    }
}

impl Getter for Mediator {
    async fn get<Q: Query>(
        &self,
        query: &Q,
        cancel: &CancellationToken,
    ) -> Result<Q::Response, Error> {
        self.dispatch_request(query, cancel).await
    }
}

impl Publisher for Mediator {
    async fn publish<E: Event>(&self, event: &E, cancel: &CancellationToken) -> Result<(), Error> {
        self.dispatch_event(event, cancel).await
    }
}
