//! # courier-std
//!
//! Standard implementations for the Courier in-process dispatcher.
//!
//! This crate provides:
//! - **Service container**: [`Container`], [`ContainerBuilder`]
//! - **Delivery strategies**: [`SequentialDelivery`], [`ConcurrentDelivery`]
//! - **Dynamic subscriptions**: [`registry::EventRegistries`], [`registry::EventRoles`]
//! - **Grouped disposal**: [`CompositeDisposer`]
//! - **Standard middleware**: Logging, Performance, Timeout (feature `timeout`)
//! - **Test fakes**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use courier_core;

// Modules
pub mod composite;
pub mod container;
pub mod delivery;
pub mod middleware;
pub mod registry;
pub mod testing;

pub use composite::CompositeDisposer;
pub use container::{Container, ContainerBuilder};
pub use delivery::{ConcurrentDelivery, SequentialDelivery};
