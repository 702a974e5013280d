//! # courier - In-Process Dispatcher
//!
//! `courier` routes typed requests to their single handler and typed events
//! to any number of handlers, each through an ordered chain of middleware.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courier::prelude::*;
//!
//! struct GetUserName { id: u64 }
//! impl Message for GetUserName {}
//! impl Request for GetUserName { type Response = String; }
//!
//! struct GetUserNameHandler;
//! impl RequestHandler<GetUserName> for GetUserNameHandler {
//!     async fn handle(&self, q: &GetUserName, _: &CancellationToken) -> Result<String, Error> {
//!         Ok(format!("user-{}", q.id))
//!     }
//! }
//!
//! let container = ContainerBuilder::new()
//!     .with_default_strategies()
//!     .add_request_handler::<GetUserName, _>(GetUserNameHandler)
//!     .build();
//! let mediator = Mediator::new(Arc::new(container));
//!
//! let name = mediator.send(&GetUserName { id: 7 }, &CancellationToken::new()).await?;
//! ```
//!
//! ## Crates
//!
//! - `courier-core`: the traits, usable on their own by handler libraries
//! - `courier-std`: container, strategies, registry, stock middleware
//! - `courier-macros`: derives for the message traits (feature `macros`)

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod macros;
mod mediator;
mod results;

pub use courier_core::{
    // Errors
    BoxError,
    BoxFuture,
    // Cancellation
    CancellationToken,
    // Messages
    Command,
    // Delivery
    Delivery,
    DeliveryStrategy,
    // Disposal
    Disposable,
    DynDeliveryStrategy,
    DynEventHandler,
    DynEventMiddleware,
    // Handlers
    DynRequestHandler,
    DynRequestMiddleware,
    Error,
    Event,
    EventHandler,
    // Middleware
    EventMiddleware,
    EventNext,
    Fanout,
    Message,
    Next,
    Query,
    Request,
    RequestHandler,
    RequestMiddleware,
    // Resolution
    ResolverExt,
    Service,
    ServiceResolver,
};

pub use courier_std::{
    CompositeDisposer, ConcurrentDelivery, Container, ContainerBuilder, SequentialDelivery,
};

pub use mediator::{
    AnyEvent, EventPipeline, Getter, Mediator, MediatorBuilder, Publisher, RequestPipeline,
    Sender,
};
pub use results::{MissingValue, RequestResult, TryDispatch};

/// Runtime subscription of event handlers.
pub mod registry {
    pub use courier_std::registry::{
        EventRegistries, EventRegistry, EventRoles, RoleSet, Subscription,
    };
}

/// Standard middleware implementations.
pub mod middleware {
    pub use courier_std::middleware::{LoggingMiddleware, PerformanceMiddleware};

    #[cfg(feature = "timeout")]
    pub use courier_std::middleware::TimeoutMiddleware;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use courier_std::testing::*;
}

/// Prelude module - common imports for Courier.
///
/// # Usage
///
/// ```rust,ignore
/// use courier::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        CancellationToken, Command, ContainerBuilder, Error, Event, EventHandler,
        EventMiddleware, EventNext, Getter, Mediator, Message, Next, Publisher, Query, Request,
        RequestHandler, RequestMiddleware, RequestResult, Sender, TryDispatch,
    };
    pub use std::sync::Arc;
}

#[cfg(feature = "macros")]
pub use courier_macros::{Command, Event, Message, Query, Request};
