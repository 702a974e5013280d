use super::Mediator;
use courier_core::{BoxFuture, CancellationToken, Error, Event};

/// An event whose concrete type is erased.
///
/// Implemented for every [`Event`], so heterogeneous events can be collected
/// as `Box<dyn AnyEvent>` and handed to [`Mediator::publish_dyn`].
pub trait AnyEvent: Send + Sync + 'static {
    /// Publish `self` through `mediator` as its concrete type.
    fn publish_to<'a>(
        &'a self,
        mediator: &'a Mediator,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), Error>>;

    /// Type name of the concrete event.
    fn event_type(&self) -> &'static str;
}

impl<E: Event> AnyEvent for E {
    fn publish_to<'a>(
        &'a self,
        mediator: &'a Mediator,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), Error>> {
        Box::pin(mediator.dispatch_event(self, cancel))
    }

    fn event_type(&self) -> &'static str {
        std::any::type_name::<E>()
    }
}
