//! Error types for Courier.
//!
//! Every fallible operation in the dispatcher returns [`Error`]. Failures
//! raised by user handlers and middleware travel as [`Error::Handler`] and are
//! passed through the pipeline untouched.

use std::time::Duration;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced while dispatching a message.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// An argument was rejected before any handler ran.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The resolver has no registration for a required role.
    #[error("no service registered for `{0}`")]
    NotFound(&'static str),

    /// The resolver has no registration for a role under the given key.
    #[error("no service registered for `{role}` under key `{key}`")]
    KeyedNotFound {
        /// Name of the requested role.
        role: &'static str,
        /// The key that was looked up.
        key: String,
    },

    /// A role that must be unique has several registrations.
    #[error("expected exactly one `{role}` but {count} are registered")]
    Ambiguous {
        /// Name of the requested role.
        role: &'static str,
        /// Number of registrations found.
        count: usize,
    },

    /// The operation observed a cancellation signal.
    #[error("operation was cancelled")]
    Cancelled,

    /// The operation did not finish in time.
    #[error("operation timed out after {0:?}")]
    Timeout(Duration),

    /// The target was disposed before the operation.
    #[error("{0} has been disposed")]
    Disposed(&'static str),

    /// A handler or middleware failed.
    #[error(transparent)]
    Handler(BoxError),
}

impl Error {
    /// Wrap a handler failure.
    pub fn handler(error: impl Into<BoxError>) -> Self {
        Error::Handler(error.into())
    }

    /// Returns `true` if this error reports a cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// Downcast the payload of a [`Error::Handler`] failure.
    pub fn downcast_handler_ref<T: std::error::Error + 'static>(&self) -> Option<&T> {
        match self {
            Error::Handler(inner) => inner.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl From<BoxError> for Error {
    fn from(err: BoxError) -> Self {
        Error::Handler(err)
    }
}
