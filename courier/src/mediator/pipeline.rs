//! Composed pipelines for one message type.

use courier_core::{
    BoxFuture, CancellationToken, DynDeliveryStrategy, DynEventHandler, DynEventMiddleware,
    DynRequestHandler, DynRequestMiddleware, Error, Event, EventNext, Fanout, Next, Request,
    ResolverExt, ServiceResolver,
};
use std::{any::type_name, fmt, sync::Arc};

/// The middleware and handler for one request type.
///
/// Middleware runs in the order given, the first one outermost.
pub struct RequestPipeline<R: Request> {
    middleware: Vec<Arc<dyn DynRequestMiddleware<R>>>,
    handler: Arc<dyn DynRequestHandler<R>>,
}

impl<R: Request> RequestPipeline<R> {
    /// Create a pipeline from explicit parts.
    pub fn new(
        handler: Arc<dyn DynRequestHandler<R>>,
        middleware: Vec<Arc<dyn DynRequestMiddleware<R>>>,
    ) -> Self {
        Self {
            middleware,
            handler,
        }
    }

    /// Build the pipeline from the services registered in `resolver`.
    ///
    /// Exactly one handler must be registered for `R`.
    pub fn resolve(resolver: &dyn ServiceResolver) -> Result<Self, Error> {
        let handler = resolver.resolve_required::<dyn DynRequestHandler<R>>()?;
        let middleware = resolver.resolve_all::<dyn DynRequestMiddleware<R>>();
        tracing::debug!(
            request = type_name::<R>(),
            middleware = middleware.len(),
            "request pipeline built"
        );
        Ok(Self::new(handler, middleware))
    }

    /// Number of middleware around the handler.
    pub fn middleware_len(&self) -> usize {
        self.middleware.len()
    }

    /// Run `request` through the middleware and the handler.
    pub fn run<'a>(
        &'a self,
        request: &'a R,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<R::Response, Error>> {
        Next::new(request, cancel, &self.middleware, self.handler.as_ref()).run()
    }
}

impl<R: Request> fmt::Debug for RequestPipeline<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestPipeline")
            .field("request", &type_name::<R>())
            .field("middleware", &self.middleware.len())
            .finish_non_exhaustive()
    }
}

/// The middleware and resolver-provided handlers for one event type.
///
/// The delivery strategy and runtime subscriptions are supplied per publish.
pub struct EventPipeline<E: Event> {
    middleware: Vec<Arc<dyn DynEventMiddleware<E>>>,
    handlers: Vec<Arc<dyn DynEventHandler<E>>>,
}

impl<E: Event> EventPipeline<E> {
    /// Create a pipeline from explicit parts.
    pub fn new(
        handlers: Vec<Arc<dyn DynEventHandler<E>>>,
        middleware: Vec<Arc<dyn DynEventMiddleware<E>>>,
    ) -> Self {
        Self {
            middleware,
            handlers,
        }
    }

    /// Build the pipeline from the services registered in `resolver`.
    ///
    /// Zero handlers is valid.
    pub fn resolve(resolver: &dyn ServiceResolver) -> Result<Self, Error> {
        let handlers = resolver.resolve_all::<dyn DynEventHandler<E>>();
        let middleware = resolver.resolve_all::<dyn DynEventMiddleware<E>>();
        tracing::debug!(
            event = type_name::<E>(),
            handlers = handlers.len(),
            middleware = middleware.len(),
            "event pipeline built"
        );
        Ok(Self::new(handlers, middleware))
    }

    /// Number of resolver-provided handlers.
    pub fn handler_len(&self) -> usize {
        self.handlers.len()
    }

    /// Number of middleware around the fan-out.
    pub fn middleware_len(&self) -> usize {
        self.middleware.len()
    }

    /// Run `event` through the middleware, then deliver it with `strategy`.
    ///
    /// `subscribed` handlers are delivered to after the resolver-provided ones.
    /// A subscribed instance that is also resolver-provided is delivered to
    /// once, in its resolver position.
    pub async fn run(
        &self,
        event: &E,
        strategy: &dyn DynDeliveryStrategy,
        subscribed: Vec<Arc<dyn DynEventHandler<E>>>,
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        let mut handlers = self.handlers.clone();
        for handler in subscribed {
            if !handlers.iter().any(|known| same_instance(known, &handler)) {
                handlers.push(handler);
            }
        }
        let fanout = Fanout::new(strategy, &handlers);
        EventNext::new(event, cancel, &self.middleware, fanout)
            .run()
            .await
    }
}

fn same_instance<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
}

impl<E: Event> fmt::Debug for EventPipeline<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventPipeline")
            .field("event", &type_name::<E>())
            .field("handlers", &self.handlers.len())
            .field("middleware", &self.middleware.len())
            .finish()
    }
}
