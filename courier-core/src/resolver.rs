//! Boundary with the service resolver.
//!
//! The dispatcher does not construct handlers, middleware or strategies. It
//! asks a [`ServiceResolver`] for them by *role*, where a role is a trait
//! object type such as `dyn DynRequestHandler<MyQuery>`. Resolvers store each
//! service as an `Arc<T>` behind an [`Service`] and hand back every
//! registration for a role in registration order.

use crate::error::Error;
use std::{
    any::{Any, TypeId, type_name},
    sync::Arc,
};

/// A type-erased service: an `Arc<T>` for some role `T`, boxed as `Any`.
pub type Service = Arc<dyn Any + Send + Sync>;

/// Source of handler, middleware and strategy instances.
pub trait ServiceResolver: Send + Sync {
    /// Every registration for `role`, in registration order.
    fn services(&self, role: TypeId) -> Vec<Service>;

    /// The registration for `role` under `key`, if any.
    fn keyed_service(&self, role: TypeId, key: &str) -> Option<Service>;
}

/// Typed lookups on top of [`ServiceResolver`].
///
/// Implemented for every resolver, including `dyn ServiceResolver`.
pub trait ResolverExt: ServiceResolver {
    /// Resolve zero or more instances of role `T`, in registration order.
    fn resolve_all<T>(&self) -> Vec<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.services(TypeId::of::<T>())
            .iter()
            .filter_map(|service| service.downcast_ref::<Arc<T>>().cloned())
            .collect()
    }

    /// Resolve exactly one instance of role `T`.
    ///
    /// Fails with [`Error::NotFound`] when nothing is registered and with
    /// [`Error::Ambiguous`] when more than one instance is.
    fn resolve_required<T>(&self) -> Result<Arc<T>, Error>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let mut services = self.resolve_all::<T>();
        match services.len() {
            0 => Err(Error::NotFound(type_name::<T>())),
            1 => services.pop().ok_or(Error::NotFound(type_name::<T>())),
            count => Err(Error::Ambiguous {
                role: type_name::<T>(),
                count,
            }),
        }
    }

    /// Resolve the instance of role `T` registered under `key`.
    fn resolve_keyed<T>(&self, key: &str) -> Result<Arc<T>, Error>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.keyed_service(TypeId::of::<T>(), key)
            .and_then(|service| service.downcast_ref::<Arc<T>>().cloned())
            .ok_or_else(|| Error::KeyedNotFound {
                role: type_name::<T>(),
                key: key.to_owned(),
            })
    }
}

impl<R: ServiceResolver + ?Sized> ResolverExt for R {}
