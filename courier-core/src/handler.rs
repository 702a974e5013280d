//! # Handlers
//!
//! The terminal point of a pipeline, where business logic executes.
//!
//! - [`RequestHandler`]: exactly one per request type, produces the response.
//! - [`EventHandler`]: zero or more per event type, produce nothing.
//!
//! Both traits use native `async fn` for static dispatch. Their object-safe
//! twins ([`DynRequestHandler`], [`DynEventHandler`]) are what resolvers and
//! registries store; every handler gets them through blanket implementations.

use crate::{
    BoxFuture,
    cancel::CancellationToken,
    error::Error,
    message::{Event, Request},
};
use std::future::Future;

/// Handles one request type and produces its response.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle requests of type `{R}`",
    label = "missing `RequestHandler<{R}>` implementation",
    note = "Request handlers must implement `handle` for the request type `{R}`."
)]
pub trait RequestHandler<R: Request>: Send + Sync + 'static {
    /// Handle the request.
    fn handle(
        &self,
        request: &R,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<R::Response, Error>> + Send;
}

/// Object-safe version of [`RequestHandler`].
pub trait DynRequestHandler<R: Request>: Send + Sync + 'static {
    /// Handle the request (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        request: &'a R,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<R::Response, Error>>;
}

impl<R: Request, T: RequestHandler<R>> DynRequestHandler<R> for T {
    fn handle_dyn<'a>(
        &'a self,
        request: &'a R,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<R::Response, Error>> {
        Box::pin(self.handle(request, cancel))
    }
}

/// Reacts to one event type.
///
/// A single type may implement `EventHandler` for several events; see the
/// registrar in `courier-std` for subscribing all of them at once.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle events of type `{E}`",
    label = "missing `EventHandler<{E}>` implementation",
    note = "Event handlers must implement `handle` for the event type `{E}`."
)]
pub trait EventHandler<E: Event>: Send + Sync + 'static {
    /// Handle the event.
    fn handle(
        &self,
        event: &E,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<(), Error>> + Send;
}

/// Object-safe version of [`EventHandler`].
pub trait DynEventHandler<E: Event>: Send + Sync + 'static {
    /// Handle the event (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        event: &'a E,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), Error>>;

    /// Type name of the concrete handler, for diagnostics.
    fn type_name(&self) -> &'static str;
}

impl<E: Event, T: EventHandler<E>> DynEventHandler<E> for T {
    fn handle_dyn<'a>(
        &'a self,
        event: &'a E,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), Error>> {
        Box::pin(self.handle(event, cancel))
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}
