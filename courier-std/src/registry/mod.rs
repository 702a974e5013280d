//! Runtime subscription of event handlers.
//!
//! Handlers supplied by the resolver are fixed at startup. The registry lets
//! long-lived objects subscribe and unsubscribe while the application runs.
//!
//! - [`EventRegistry`]: the subscription table of one event type.
//! - [`EventRegistries`]: every table, keyed by event type, created lazily.
//! - [`EventRoles`]: lets one object subscribe to every event it handles in a
//!   single call, with all-or-nothing semantics.

mod registries;
mod roles;
mod table;

pub use registries::EventRegistries;
pub use roles::{EventRoles, RoleSet};
pub use table::{EventRegistry, Subscription};
