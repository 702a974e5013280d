//! # courier-core
//!
//! Core traits for the Courier in-process dispatcher.
//!
//! This crate has minimal dependencies and is meant to be imported by
//! handler libraries and extensions that don't need the standard
//! implementations in `courier-std` or the facade in `courier`.
//!
//! # Building Blocks
//!
//! ## Messages ([`Message`], [`Request`], [`Command`], [`Query`], [`Event`])
//!
//! The values callers submit. A message's concrete type is its identity.
//!
//! ## Handlers ([`RequestHandler`], [`EventHandler`])
//!
//! The terminal step of a pipeline. One handler per request type, zero or
//! more per event type.
//!
//! ## Middleware ([`RequestMiddleware`], [`EventMiddleware`])
//!
//! Wrappers around the rest of the pipeline, handed to them as a
//! continuation ([`Next`], [`EventNext`]) they may run or skip.
//!
//! ## Delivery ([`DeliveryStrategy`])
//!
//! How one event reaches many handlers.
//!
//! ## Resolution ([`ServiceResolver`])
//!
//! Where handler, middleware and strategy instances come from.
//!
//! # Error Types
//!
//! - [`Error`] - every failure the dispatcher reports
//! - [`BoxError`] - opaque failures raised by user code

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod cancel;
mod delivery;
mod disposable;
mod error;
mod handler;
mod message;
mod middleware;
mod resolver;

// Re-exports
pub use futures::future::BoxFuture;
pub use cancel::CancellationToken;
pub use delivery::{Delivery, DeliveryStrategy, DynDeliveryStrategy};
pub use disposable::Disposable;
pub use error::{BoxError, Error};
pub use handler::{DynEventHandler, DynRequestHandler, EventHandler, RequestHandler};
pub use message::{Command, Event, Message, Query, Request};
pub use middleware::{
    DynEventMiddleware, DynRequestMiddleware, EventMiddleware, EventNext, Fanout, Next,
    RequestMiddleware,
};
pub use resolver::{ResolverExt, Service, ServiceResolver};
