/// Implements [`EventRoles`](crate::registry::EventRoles) for a type that
/// handles several events.
///
/// Roles are registered in the order listed.
///
/// # Example
/// ```rust,ignore
/// struct AuditLog;
/// impl EventHandler<UserCreated> for AuditLog { ... }
/// impl EventHandler<UserDeleted> for AuditLog { ... }
///
/// courier::event_roles!(AuditLog => UserCreated, UserDeleted);
///
/// let subscriptions = mediator.registries().register(Arc::new(AuditLog))?;
/// ```
#[macro_export]
macro_rules! event_roles {
    ($target:ty => $($event:ty),* $(,)?) => {
        impl $crate::registry::EventRoles for $target {
            #[allow(unused_variables)]
            fn roles(
                self: ::std::sync::Arc<Self>,
                roles: &mut $crate::registry::RoleSet<'_>,
            ) {
                $(
                    roles.handles::<$event, Self>(::std::sync::Arc::clone(&self));
                )*
            }
        }
    };
}
