//! In-memory service container.
//!
//! A minimal [`ServiceResolver`] for applications that don't bring their own
//! dependency injection. Services are registered by role through
//! [`ContainerBuilder`] and frozen into an immutable [`Container`].

use crate::delivery::{ConcurrentDelivery, SequentialDelivery};
use courier_core::{
    DeliveryStrategy, DynDeliveryStrategy, DynEventHandler, DynEventMiddleware,
    DynRequestHandler, DynRequestMiddleware, Event, EventHandler, EventMiddleware, Request,
    RequestHandler, RequestMiddleware, Service, ServiceResolver,
};
use std::{any::TypeId, collections::HashMap, sync::Arc};

/// Builder for constructing a [`Container`].
///
/// Registration order is kept per role; it decides middleware nesting and
/// sequential delivery order.
///
/// Middleware is registered per message type. Generic middleware such as
/// `LoggingMiddleware` wraps every type it is registered for, so register
/// it once for each request or event type it should cover.
///
/// # Example
/// ```ignore
/// let container = ContainerBuilder::new()
///     .with_default_strategies()
///     .add_request_handler::<GetUserName, _>(GetUserNameHandler)
///     .add_request_middleware::<GetUserName, _>(LoggingMiddleware)
///     .add_event_handler::<UserCreated, _>(SendWelcomeEmail)
///     .build();
/// ```
#[derive(Default)]
pub struct ContainerBuilder {
    services: HashMap<TypeId, Vec<Service>>,
    keyed: HashMap<(TypeId, String), Service>,
}

impl ContainerBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an instance of role `T`.
    pub fn add<T>(mut self, service: Arc<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.add_mut(service);
        self
    }

    /// Register an instance of role `T` (mutable version).
    pub fn add_mut<T>(&mut self, service: Arc<T>)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.services
            .entry(TypeId::of::<T>())
            .or_default()
            .push(Arc::new(service));
    }

    /// Register an instance of role `T` under `key`, replacing any previous
    /// registration for the same key.
    pub fn add_keyed<T>(mut self, key: impl Into<String>, service: Arc<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.keyed
            .insert((TypeId::of::<T>(), key.into()), Arc::new(service));
        self
    }

    /// Register the handler for request type `R`.
    pub fn add_request_handler<R, H>(self, handler: H) -> Self
    where
        R: Request,
        H: RequestHandler<R>,
    {
        self.add::<dyn DynRequestHandler<R>>(Arc::new(handler))
    }

    /// Register a middleware for request type `R`.
    pub fn add_request_middleware<R, M>(self, middleware: M) -> Self
    where
        R: Request,
        M: RequestMiddleware<R>,
    {
        self.add::<dyn DynRequestMiddleware<R>>(Arc::new(middleware))
    }

    /// Register a handler for event type `E`.
    pub fn add_event_handler<E, H>(self, handler: H) -> Self
    where
        E: Event,
        H: EventHandler<E>,
    {
        self.add::<dyn DynEventHandler<E>>(Arc::new(handler))
    }

    /// Register an already shared handler for event type `E`.
    pub fn add_shared_event_handler<E, H>(self, handler: Arc<H>) -> Self
    where
        E: Event,
        H: EventHandler<E>,
    {
        self.add::<dyn DynEventHandler<E>>(handler)
    }

    /// Register a middleware for event type `E`.
    pub fn add_event_middleware<E, M>(self, middleware: M) -> Self
    where
        E: Event,
        M: EventMiddleware<E>,
    {
        self.add::<dyn DynEventMiddleware<E>>(Arc::new(middleware))
    }

    /// Register a delivery strategy under `name`.
    pub fn add_strategy<S>(self, name: impl Into<String>, strategy: S) -> Self
    where
        S: DeliveryStrategy,
    {
        self.add_keyed::<dyn DynDeliveryStrategy>(name, Arc::new(strategy))
    }

    /// Register the built-in strategies under their names.
    pub fn with_default_strategies(self) -> Self {
        self.add_strategy(SequentialDelivery::NAME, SequentialDelivery)
            .add_strategy(ConcurrentDelivery::NAME, ConcurrentDelivery)
    }

    /// Build the immutable container.
    pub fn build(self) -> Container {
        Container {
            services: self.services,
            keyed: self.keyed,
        }
    }
}

/// An immutable, thread-safe service container.
///
/// Created by calling [`ContainerBuilder::build`].
pub struct Container {
    services: HashMap<TypeId, Vec<Service>>,
    keyed: HashMap<(TypeId, String), Service>,
}

impl Container {
    /// Start building a container.
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// Number of registrations across all roles, keyed ones included.
    pub fn len(&self) -> usize {
        self.services.values().map(Vec::len).sum::<usize>() + self.keyed.len()
    }

    /// Check if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ServiceResolver for Container {
    fn services(&self, role: TypeId) -> Vec<Service> {
        self.services.get(&role).cloned().unwrap_or_default()
    }

    fn keyed_service(&self, role: TypeId, key: &str) -> Option<Service> {
        self.keyed.get(&(role, key.to_owned())).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::{Error, ResolverExt};

    trait Greeter: Send + Sync {
        fn greet(&self) -> &'static str;
    }

    struct Hello;
    impl Greeter for Hello {
        fn greet(&self) -> &'static str {
            "hello"
        }
    }

    struct Hi;
    impl Greeter for Hi {
        fn greet(&self) -> &'static str {
            "hi"
        }
    }

    #[test]
    fn resolves_in_registration_order() {
        let container = ContainerBuilder::new()
            .add::<dyn Greeter>(Arc::new(Hello))
            .add::<dyn Greeter>(Arc::new(Hi))
            .build();

        let greetings: Vec<_> = container
            .resolve_all::<dyn Greeter>()
            .iter()
            .map(|g| g.greet())
            .collect();
        assert_eq!(greetings, vec!["hello", "hi"]);
        assert_eq!(container.len(), 2);
    }

    #[test]
    fn required_rejects_missing_and_ambiguous() {
        let empty = ContainerBuilder::new().build();
        assert!(matches!(
            empty.resolve_required::<dyn Greeter>(),
            Err(Error::NotFound(_))
        ));

        let two = ContainerBuilder::new()
            .add::<dyn Greeter>(Arc::new(Hello))
            .add::<dyn Greeter>(Arc::new(Hi))
            .build();
        assert!(matches!(
            two.resolve_required::<dyn Greeter>(),
            Err(Error::Ambiguous { count: 2, .. })
        ));
    }

    #[test]
    fn keyed_lookup_is_per_key() {
        let container = ContainerBuilder::new()
            .add_keyed::<dyn Greeter>("formal", Arc::new(Hello))
            .add_keyed::<dyn Greeter>("casual", Arc::new(Hi))
            .build();

        let casual = container.resolve_keyed::<dyn Greeter>("casual").unwrap();
        assert_eq!(casual.greet(), "hi");
        assert!(matches!(
            container.resolve_keyed::<dyn Greeter>("rude"),
            Err(Error::KeyedNotFound { .. })
        ));
        // Keyed registrations are not part of the unkeyed role list.
        assert!(container.resolve_all::<dyn Greeter>().is_empty());
    }
}
