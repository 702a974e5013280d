use courier_core::Error;
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

/// Built pipelines, keyed by pipeline type.
///
/// Two callers racing on a cold entry may both build; the first insert wins
/// and the other build is discarded. Failed builds are not stored.
#[derive(Default)]
pub(crate) struct ChainCache {
    chains: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl ChainCache {
    pub(crate) fn get_or_build<T, F>(&self, build: F) -> Result<Arc<T>, Error>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Result<T, Error>,
    {
        if let Some(chain) = self.get::<T>() {
            return Ok(chain);
        }

        let built = Arc::new(build()?);
        let mut chains = self.chains.write().unwrap_or_else(PoisonError::into_inner);
        let chain = chains
            .entry(TypeId::of::<T>())
            .or_insert_with(|| built.clone() as Arc<dyn Any + Send + Sync>)
            .clone();

        Ok(chain.downcast::<T>().unwrap_or(built))
    }

    pub(crate) fn len(&self) -> usize {
        self.chains
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn get<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.chains
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|chain| chain.downcast::<T>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn builds_once_per_type() {
        let cache = ChainCache::default();
        let builds = AtomicUsize::new(0);
        let build = || {
            builds.fetch_add(1, Ordering::SeqCst);
            Ok(7_u32)
        };

        assert_eq!(*cache.get_or_build(build).unwrap(), 7);
        assert_eq!(*cache.get_or_build(build).unwrap(), 7);
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn failed_build_is_retried() {
        let cache = ChainCache::default();
        let failed = cache.get_or_build::<u32, _>(|| Err(Error::NotFound("handler")));
        assert!(failed.is_err());
        assert_eq!(cache.len(), 0);

        assert_eq!(*cache.get_or_build(|| Ok(1_u32)).unwrap(), 1);
    }
}
