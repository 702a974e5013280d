use super::{EventRoles, RoleSet, table::{EventRegistry, Subscription}};
use crate::composite::CompositeDisposer;
use courier_core::{DynEventHandler, Error, Event, EventHandler};
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

/// Every event table, keyed by event type.
///
/// Tables are created on first use. A `Mediator` owns one of these (or shares
/// one handed to its builder) and merges the matching table into each
/// publish.
#[derive(Default)]
pub struct EventRegistries {
    tables: RwLock<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl EventRegistries {
    /// Create an empty set of tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// The table for event type `E`, created if missing.
    pub fn table<E: Event>(&self) -> EventRegistry<E> {
        if let Some(table) = self.existing::<E>() {
            return table;
        }

        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        tables
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(EventRegistry::<E>::new()))
            .downcast_ref::<EventRegistry<E>>()
            .cloned()
            .unwrap_or_default()
    }

    /// Handlers currently subscribed to `E`, without creating its table.
    pub fn snapshot<E: Event>(&self) -> Vec<Arc<dyn DynEventHandler<E>>> {
        self.existing::<E>()
            .map(|table| table.snapshot())
            .unwrap_or_default()
    }

    /// Subscribe a single handler to event type `E`.
    pub fn register_handler<E, H>(&self, handler: Arc<H>) -> Result<Subscription, Error>
    where
        E: Event,
        H: EventHandler<E>,
    {
        self.table::<E>().register(handler)
    }

    pub(super) fn subscribe<E, H>(&self, handler: Arc<H>) -> Result<(Subscription, bool), Error>
    where
        E: Event,
        H: EventHandler<E>,
    {
        self.table::<E>().subscribe(handler)
    }

    /// Subscribe `target` to every event type it declares through
    /// [`EventRoles`].
    ///
    /// The returned disposer unsubscribes all of them at once. If any role
    /// fails to register, the roles this call added for `target` are
    /// unsubscribed again and the failure is returned; roles after the failing
    /// one are not attempted. Subscriptions `target` already had before the
    /// call are left in place.
    pub fn register<T: EventRoles>(&self, target: Arc<T>) -> Result<CompositeDisposer, Error> {
        let mut roles = RoleSet::new(self);
        target.roles(&mut roles);
        roles.finish().inspect_err(|error| {
            tracing::error!(
                target_type = std::any::type_name::<T>(),
                %error,
                "event role registration failed, rolled back"
            );
        })
    }

    fn existing<E: Event>(&self) -> Option<EventRegistry<E>> {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<E>())
            .and_then(|table| table.downcast_ref::<EventRegistry<E>>())
            .cloned()
    }
}

impl std::fmt::Debug for EventRegistries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("EventRegistries")
            .field("tables", &tables.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CallLog, CountingEventHandler};

    struct Opened;
    impl courier_core::Message for Opened {}
    impl Event for Opened {}

    #[test]
    fn tables_are_shared_per_event_type() {
        let registries = EventRegistries::new();
        let handler = Arc::new(CountingEventHandler::new("h", CallLog::new()));

        let _sub = registries
            .register_handler::<Opened, _>(handler.clone())
            .unwrap();

        assert!(registries.table::<Opened>().contains(&handler));
        assert_eq!(registries.snapshot::<Opened>().len(), 1);
    }
}
