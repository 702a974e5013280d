use super::{registries::EventRegistries, table::Subscription};
use crate::composite::CompositeDisposer;
use courier_core::{Error, Event, EventHandler};
use std::sync::Arc;

/// Declares which event types an object handles.
///
/// Implement this (usually through the `event_roles!` macro) to let
/// [`EventRegistries::register`] subscribe the object to all of them at once.
///
/// # Example
/// ```ignore
/// impl EventRoles for AuditLog {
///     fn roles(self: Arc<Self>, roles: &mut RoleSet<'_>) {
///         roles.handles::<UserCreated, _>(self.clone());
///         roles.handles::<UserDeleted, _>(self);
///     }
/// }
/// ```
pub trait EventRoles: Send + Sync + 'static {
    /// List every event role of `self` into `roles`.
    fn roles(self: Arc<Self>, roles: &mut RoleSet<'_>);
}

/// Collects the subscriptions of one [`EventRegistries::register`] call.
///
/// Roles are registered as they are declared. After the first failure the
/// remaining declarations are ignored.
pub struct RoleSet<'a> {
    registries: &'a EventRegistries,
    subscriptions: Vec<Role>,
    failure: Option<Error>,
}

struct Role {
    subscription: Subscription,
    created: bool,
}

impl<'a> RoleSet<'a> {
    pub(super) fn new(registries: &'a EventRegistries) -> Self {
        Self {
            registries,
            subscriptions: Vec::new(),
            failure: None,
        }
    }

    /// Declare that `handler` handles event type `E`.
    pub fn handles<E, H>(&mut self, handler: Arc<H>) -> &mut Self
    where
        E: Event,
        H: EventHandler<E>,
    {
        if self.failure.is_none() {
            match self.registries.subscribe::<E, H>(handler) {
                Ok((subscription, created)) => self.subscriptions.push(Role {
                    subscription,
                    created,
                }),
                Err(error) => self.failure = Some(error),
            }
        }
        self
    }

    /// Number of roles registered so far.
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Check if no role has been registered.
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub(super) fn finish(self) -> Result<CompositeDisposer, Error> {
        let Some(error) = self.failure else {
            let composite = CompositeDisposer::new();
            composite.add_range(self.subscriptions.into_iter().map(|role| role.subscription));
            return Ok(composite);
        };

        // Entries that predate this call belong to earlier subscriptions.
        let rollback = CompositeDisposer::new();
        rollback.add_range(
            self.subscriptions
                .into_iter()
                .filter(|role| role.created)
                .map(|role| role.subscription),
        );
        rollback.dispose();
        Err(error)
    }
}
