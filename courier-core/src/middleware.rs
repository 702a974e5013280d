//! # Middleware
//!
//! Cross-cutting behavior wrapped around a handler (requests) or around the
//! fan-out of an event.
//!
//! A middleware receives a continuation, [`Next`] for requests and
//! [`EventNext`] for events, standing for "the rest of the pipeline". It may
//! run code before and after running it, replace its result, or never run it
//! at all, which short-circuits everything inward. Continuations are consumed
//! by [`Next::run`], so the downstream pipeline runs at most once.
//!
//! # Ordering
//!
//! Middleware is kept as an ordered slice. Running a continuation invokes the
//! first middleware of its slice with a continuation over the rest, and the
//! terminal step once the slice is empty. For middleware `[A, B, C]` and
//! handler `H` the execution order is
//! `A.before, B.before, C.before, H, C.after, B.after, A.after`.

use crate::{
    BoxFuture,
    cancel::CancellationToken,
    delivery::{Delivery, DynDeliveryStrategy},
    error::Error,
    handler::{DynEventHandler, DynRequestHandler},
    message::{Event, Request},
};
use std::{future::Future, sync::Arc};

/// Middleware around the handler of one request type.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a middleware for requests of type `{R}`",
    label = "missing `RequestMiddleware<{R}>` implementation",
    note = "Implement `handle` and call `next.run()` to continue the pipeline."
)]
pub trait RequestMiddleware<R: Request>: Send + Sync + 'static {
    /// Handle the request, optionally running the rest of the pipeline.
    fn handle(
        &self,
        request: &R,
        next: Next<'_, R>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<R::Response, Error>> + Send;
}

/// Object-safe version of [`RequestMiddleware`].
pub trait DynRequestMiddleware<R: Request>: Send + Sync + 'static {
    /// Handle the request (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        request: &'a R,
        next: Next<'a, R>,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<R::Response, Error>>;
}

impl<R: Request, T: RequestMiddleware<R>> DynRequestMiddleware<R> for T {
    fn handle_dyn<'a>(
        &'a self,
        request: &'a R,
        next: Next<'a, R>,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<R::Response, Error>> {
        Box::pin(self.handle(request, next, cancel))
    }
}

/// Middleware around the fan-out of one event type.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a middleware for events of type `{E}`",
    label = "missing `EventMiddleware<{E}>` implementation",
    note = "Implement `handle` and call `next.run()` to continue the pipeline."
)]
pub trait EventMiddleware<E: Event>: Send + Sync + 'static {
    /// Handle the event, optionally running the rest of the pipeline.
    fn handle(
        &self,
        event: &E,
        next: EventNext<'_, E>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<(), Error>> + Send;
}

/// Object-safe version of [`EventMiddleware`].
pub trait DynEventMiddleware<E: Event>: Send + Sync + 'static {
    /// Handle the event (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        event: &'a E,
        next: EventNext<'a, E>,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), Error>>;
}

impl<E: Event, T: EventMiddleware<E>> DynEventMiddleware<E> for T {
    fn handle_dyn<'a>(
        &'a self,
        event: &'a E,
        next: EventNext<'a, E>,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), Error>> {
        Box::pin(self.handle(event, next, cancel))
    }
}

/// The rest of a request pipeline.
pub struct Next<'a, R: Request> {
    request: &'a R,
    cancel: &'a CancellationToken,
    middleware: &'a [Arc<dyn DynRequestMiddleware<R>>],
    handler: &'a dyn DynRequestHandler<R>,
}

impl<'a, R: Request> Next<'a, R> {
    /// Create a continuation running `middleware` in order, then `handler`.
    pub fn new(
        request: &'a R,
        cancel: &'a CancellationToken,
        middleware: &'a [Arc<dyn DynRequestMiddleware<R>>],
        handler: &'a dyn DynRequestHandler<R>,
    ) -> Self {
        Self {
            request,
            cancel,
            middleware,
            handler,
        }
    }

    /// Number of middleware still ahead of the handler.
    pub fn remaining(&self) -> usize {
        self.middleware.len()
    }

    /// Run the rest of the pipeline.
    pub fn run(self) -> BoxFuture<'a, Result<R::Response, Error>> {
        let Self {
            request,
            cancel,
            middleware,
            handler,
        } = self;

        match middleware.split_first() {
            Some((outer, inner)) => outer.handle_dyn(
                request,
                Next::new(request, cancel, inner, handler),
                cancel,
            ),
            None => handler.handle_dyn(request, cancel),
        }
    }
}

/// The terminal step of an event pipeline: a strategy and the handlers it
/// delivers to.
pub struct Fanout<'a, E: Event> {
    strategy: &'a dyn DynDeliveryStrategy,
    handlers: &'a [Arc<dyn DynEventHandler<E>>],
}

impl<'a, E: Event> Fanout<'a, E> {
    /// Create a fan-out over `handlers`, in the order given.
    pub fn new(
        strategy: &'a dyn DynDeliveryStrategy,
        handlers: &'a [Arc<dyn DynEventHandler<E>>],
    ) -> Self {
        Self { strategy, handlers }
    }

    fn deliver(
        self,
        event: &'a E,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), Error>> {
        let deliveries = self
            .handlers
            .iter()
            .map(|handler| {
                Delivery::new(handler.type_name(), move || {
                    handler.handle_dyn(event, cancel)
                })
            })
            .collect();

        self.strategy.deliver_dyn(deliveries, cancel)
    }
}

/// The rest of an event pipeline.
pub struct EventNext<'a, E: Event> {
    event: &'a E,
    cancel: &'a CancellationToken,
    middleware: &'a [Arc<dyn DynEventMiddleware<E>>],
    fanout: Fanout<'a, E>,
}

impl<'a, E: Event> EventNext<'a, E> {
    /// Create a continuation running `middleware` in order, then `fanout`.
    pub fn new(
        event: &'a E,
        cancel: &'a CancellationToken,
        middleware: &'a [Arc<dyn DynEventMiddleware<E>>],
        fanout: Fanout<'a, E>,
    ) -> Self {
        Self {
            event,
            cancel,
            middleware,
            fanout,
        }
    }

    /// Number of middleware still ahead of the fan-out.
    pub fn remaining(&self) -> usize {
        self.middleware.len()
    }

    /// Run the rest of the pipeline.
    pub fn run(self) -> BoxFuture<'a, Result<(), Error>> {
        let Self {
            event,
            cancel,
            middleware,
            fanout,
        } = self;

        match middleware.split_first() {
            Some((outer, inner)) => {
                outer.handle_dyn(event, EventNext::new(event, cancel, inner, fanout), cancel)
            }
            None => fanout.deliver(event, cancel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{handler::RequestHandler, message::Message};
    use futures::executor::block_on;
    use std::sync::Mutex;

    struct Ping;
    impl Message for Ping {}
    impl Request for Ping {
        type Response = Vec<&'static str>;
    }

    struct Pong {
        calls: Arc<Mutex<Vec<&'static str>>>,
    }

    impl RequestHandler<Ping> for Pong {
        async fn handle(
            &self,
            _request: &Ping,
            _cancel: &CancellationToken,
        ) -> Result<Vec<&'static str>, Error> {
            self.calls.lock().unwrap().push("handler");
            Ok(vec!["handler"])
        }
    }

    struct Tag(&'static str);

    impl RequestMiddleware<Ping> for Tag {
        async fn handle(
            &self,
            _request: &Ping,
            next: Next<'_, Ping>,
            _cancel: &CancellationToken,
        ) -> Result<Vec<&'static str>, Error> {
            let mut seen = next.run().await?;
            seen.push(self.0);
            Ok(seen)
        }
    }

    struct Halt;

    impl RequestMiddleware<Ping> for Halt {
        async fn handle(
            &self,
            _request: &Ping,
            _next: Next<'_, Ping>,
            _cancel: &CancellationToken,
        ) -> Result<Vec<&'static str>, Error> {
            Ok(vec!["halted"])
        }
    }

    #[test]
    fn first_middleware_is_outermost() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let handler = Pong {
            calls: calls.clone(),
        };
        let middleware: Vec<Arc<dyn DynRequestMiddleware<Ping>>> =
            vec![Arc::new(Tag("a")), Arc::new(Tag("b"))];
        let cancel = CancellationToken::new();

        let next = Next::new(&Ping, &cancel, &middleware, &handler);
        assert_eq!(next.remaining(), 2);

        // Post-logic unwinds inside-out, so the outermost tag lands last.
        let seen = block_on(next.run()).unwrap();
        assert_eq!(seen, vec!["handler", "b", "a"]);
    }

    #[test]
    fn skipping_next_short_circuits() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let handler = Pong {
            calls: calls.clone(),
        };
        let middleware: Vec<Arc<dyn DynRequestMiddleware<Ping>>> =
            vec![Arc::new(Halt), Arc::new(Tag("inner"))];
        let cancel = CancellationToken::new();

        let seen = block_on(Next::new(&Ping, &cancel, &middleware, &handler).run()).unwrap();
        assert_eq!(seen, vec!["halted"]);
        assert!(calls.lock().unwrap().is_empty());
    }
}
