//! Built-in delivery strategies.
//!
//! - [`SequentialDelivery`]: one handler at a time, in registration order.
//! - [`ConcurrentDelivery`]: every handler started at once.

mod concurrent;
mod sequential;

pub use concurrent::ConcurrentDelivery;
pub use sequential::SequentialDelivery;
