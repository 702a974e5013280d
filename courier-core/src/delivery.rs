//! Delivery strategy contract.
//!
//! A strategy decides how one event reaches its handlers: in order, all at
//! once, or anything else a custom implementation wants. Strategies never see
//! handlers directly; they get one [`Delivery`] per handler, a pending call
//! that does nothing until it is invoked.

use crate::{BoxFuture, cancel::CancellationToken, error::Error};
use std::{fmt, future::Future};

/// A pending invocation of one event handler.
pub struct Delivery<'a> {
    handler: &'static str,
    invoke: Box<dyn FnOnce() -> BoxFuture<'a, Result<(), Error>> + Send + 'a>,
}

impl<'a> Delivery<'a> {
    /// Create a delivery from the handler name and the call that starts it.
    pub fn new<F>(handler: &'static str, invoke: F) -> Self
    where
        F: FnOnce() -> BoxFuture<'a, Result<(), Error>> + Send + 'a,
    {
        Self {
            handler,
            invoke: Box::new(invoke),
        }
    }

    /// Type name of the handler this delivery targets.
    pub fn handler(&self) -> &'static str {
        self.handler
    }

    /// Start the handler.
    pub fn invoke(self) -> BoxFuture<'a, Result<(), Error>> {
        (self.invoke)()
    }
}

impl fmt::Debug for Delivery<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delivery")
            .field("handler", &self.handler)
            .finish_non_exhaustive()
    }
}

/// Strategy for delivering an event to a resolved set of handlers.
///
/// This abstraction allows different execution models (sequential, concurrent,
/// etc.) to be plugged into the dispatcher and selected by name.
pub trait DeliveryStrategy: Send + Sync + 'static {
    /// Deliver the event by invoking the pending handler calls.
    fn deliver<'a>(
        &'a self,
        deliveries: Vec<Delivery<'a>>,
        cancel: &'a CancellationToken,
    ) -> impl Future<Output = Result<(), Error>> + Send + 'a;
}

/// Object-safe version of [`DeliveryStrategy`].
pub trait DynDeliveryStrategy: Send + Sync + 'static {
    /// Deliver the event (dynamic dispatch version).
    fn deliver_dyn<'a>(
        &'a self,
        deliveries: Vec<Delivery<'a>>,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), Error>>;
}

impl<T: DeliveryStrategy> DynDeliveryStrategy for T {
    fn deliver_dyn<'a>(
        &'a self,
        deliveries: Vec<Delivery<'a>>,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), Error>> {
        Box::pin(self.deliver(deliveries, cancel))
    }
}
