//! The dispatch facade.
//!
//! [`Mediator`] is the single entry point for sending requests and publishing
//! events. It resolves the pipeline for each message type from its
//! [`ServiceResolver`] on first use, caches it for the lifetime of the
//! mediator, and runs it on every later dispatch. Registrations made in the
//! resolver after a pipeline was built are not observed.

mod cache;
mod erased;
mod pipeline;
mod traits;

pub use erased::AnyEvent;
pub use pipeline::{EventPipeline, RequestPipeline};
pub use traits::{Getter, Publisher, Sender};

use cache::ChainCache;
use courier_core::{
    CancellationToken, DynDeliveryStrategy, Error, Event, Request, ResolverExt, ServiceResolver,
};
use courier_std::{SequentialDelivery, registry::EventRegistries};
use std::{fmt, sync::Arc};

/// Builder for constructing a [`Mediator`].
///
/// # Example
/// ```ignore
/// let mediator = Mediator::builder(Arc::new(container))
///     .default_strategy(ConcurrentDelivery::NAME)
///     .build()?;
/// ```
pub struct MediatorBuilder {
    resolver: Arc<dyn ServiceResolver>,
    registries: Option<Arc<EventRegistries>>,
    default_strategy: String,
}

impl MediatorBuilder {
    /// Name of the strategy used for events that do not declare one.
    ///
    /// Defaults to [`SequentialDelivery::NAME`].
    pub fn default_strategy(mut self, name: impl Into<String>) -> Self {
        self.default_strategy = name.into();
        self
    }

    /// Share an existing set of subscription tables instead of creating one.
    pub fn registries(mut self, registries: Arc<EventRegistries>) -> Self {
        self.registries = Some(registries);
        self
    }

    /// Build the mediator.
    ///
    /// Fails with [`Error::InvalidArgument`] if the default strategy name is
    /// empty. Whether the name is registered is only checked when an event is
    /// published.
    pub fn build(self) -> Result<Mediator, Error> {
        if self.default_strategy.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "default strategy name must not be empty".into(),
            ));
        }

        Ok(Mediator {
            resolver: self.resolver,
            registries: self.registries.unwrap_or_default(),
            default_strategy: self.default_strategy,
            cache: ChainCache::default(),
        })
    }
}

/// Dispatches requests to their handler and events to their handlers.
///
/// Cheap to share behind an `Arc`; every operation takes `&self`.
pub struct Mediator {
    resolver: Arc<dyn ServiceResolver>,
    registries: Arc<EventRegistries>,
    default_strategy: String,
    cache: ChainCache,
}

impl Mediator {
    /// Start building a mediator over `resolver`.
    pub fn builder(resolver: Arc<dyn ServiceResolver>) -> MediatorBuilder {
        MediatorBuilder {
            resolver,
            registries: None,
            default_strategy: SequentialDelivery::NAME.to_owned(),
        }
    }

    /// Create a mediator over `resolver` with the default configuration.
    pub fn new(resolver: Arc<dyn ServiceResolver>) -> Self {
        Self {
            resolver,
            registries: Arc::default(),
            default_strategy: SequentialDelivery::NAME.to_owned(),
            cache: ChainCache::default(),
        }
    }

    /// The runtime subscription tables merged into every publish.
    pub fn registries(&self) -> &Arc<EventRegistries> {
        &self.registries
    }

    /// The resolver pipelines are built from.
    pub fn resolver(&self) -> &Arc<dyn ServiceResolver> {
        &self.resolver
    }

    /// Name of the strategy used for events that do not declare one.
    pub fn default_strategy(&self) -> &str {
        &self.default_strategy
    }

    /// Number of pipelines built so far.
    pub fn cached_pipelines(&self) -> usize {
        self.cache.len()
    }

    /// Publish an event whose concrete type is only known at runtime.
    ///
    /// The event goes through the same pipeline as if it had been published
    /// with its concrete type.
    pub async fn publish_dyn(
        &self,
        event: &dyn AnyEvent,
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        event.publish_to(self, cancel).await
    }

    pub(crate) async fn dispatch_request<R: Request>(
        &self,
        request: &R,
        cancel: &CancellationToken,
    ) -> Result<R::Response, Error> {
        let pipeline = self
            .cache
            .get_or_build(|| RequestPipeline::<R>::resolve(self.resolver.as_ref()))?;
        pipeline.run(request, cancel).await
    }

    pub(crate) async fn dispatch_event<E: Event>(
        &self,
        event: &E,
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        let pipeline = self
            .cache
            .get_or_build(|| EventPipeline::<E>::resolve(self.resolver.as_ref()))?;

        let name = event.strategy().unwrap_or(&self.default_strategy);
        let strategy = self.resolver.resolve_keyed::<dyn DynDeliveryStrategy>(name)?;
        let subscribed = self.registries.snapshot::<E>();

        pipeline
            .run(event, strategy.as_ref(), subscribed, cancel)
            .await
    }
}

impl fmt::Debug for Mediator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mediator")
            .field("default_strategy", &self.default_strategy)
            .field("cached_pipelines", &self.cache.len())
            .field("registries", &self.registries)
            .finish_non_exhaustive()
    }
}
