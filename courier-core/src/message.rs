//! Message traits for requests, commands, queries and events.

/// A marker trait for everything that travels through the dispatcher.
///
/// Messages must be `Send + Sync + 'static` to be safe for async use. The
/// concrete type of a message is its identity: pipelines are built and cached
/// per type.
///
/// # Example
///
/// ```rust,ignore
/// struct UserCreated { id: u64 }
///
/// impl Message for UserCreated {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Send + Sync + 'static`",
    note = "All messages in Courier must be thread-safe and static."
)]
pub trait Message: Send + Sync + 'static {}

/// A message handled by exactly one handler that produces a response.
///
/// Commands are requests whose response is `()`; see [`Command`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a Request",
    label = "missing `Request` implementation",
    note = "Implement `Request` and name its `Response` type, or derive it with `#[derive(Request)]`."
)]
pub trait Request: Message {
    /// The value produced by the request's handler.
    type Response: Send + 'static;
}

/// A request that expresses an action and returns nothing.
///
/// Any request with `Response = ()` is a command. The unit response lets
/// commands share the request pipeline machinery unchanged.
pub trait Command: Request<Response = ()> {}

impl<T: Request<Response = ()>> Command for T {}

/// A request that expresses a read.
///
/// Queries are dispatched through the facade's `get` entry point; the marker
/// only documents intent and restricts that entry point.
pub trait Query: Request {}

/// A message broadcast to zero or more independent handlers.
pub trait Event: Message {
    /// Name of the delivery strategy this event asks for.
    ///
    /// `None` selects the dispatcher's default strategy.
    fn strategy(&self) -> Option<&str> {
        None
    }
}
