//! Stock middleware.
//!
//! Every middleware here works for any request type and any event type, so a
//! single instance can be registered around several pipelines.

mod logging;
mod performance;
#[cfg(feature = "timeout")]
mod timeout;

pub use logging::LoggingMiddleware;
pub use performance::PerformanceMiddleware;
#[cfg(feature = "timeout")]
pub use timeout::TimeoutMiddleware;
