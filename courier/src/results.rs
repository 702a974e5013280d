//! Non-failing dispatch.
//!
//! [`RequestResult`] holds either a response or the error that prevented it.
//! The [`TryDispatch`] methods return one instead of a `Result`, for callers
//! that prefer to branch on the outcome.

use crate::mediator::{Getter, Sender};
use courier_core::{CancellationToken, Command, Error, Query, Request};
use std::{fmt, future::Future, sync::Arc};

/// The outcome of a request: its response, or the error it failed with.
#[derive(Debug)]
pub enum RequestResult<T> {
    /// The request produced a response.
    Success(T),
    /// The request failed.
    Failure(Arc<Error>),
}

/// Returned when reading the value of a failed [`RequestResult`].
///
/// Its [`source`](std::error::Error::source) is the original failure.
#[derive(Debug, Clone)]
pub struct MissingValue {
    cause: Arc<Error>,
}

impl fmt::Display for MissingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("result does not have a value")
    }
}

impl std::error::Error for MissingValue {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.cause.as_ref())
    }
}

impl MissingValue {
    /// The failure that left the result without a value.
    pub fn cause(&self) -> &Arc<Error> {
        &self.cause
    }
}

impl<T> RequestResult<T> {
    /// Create a successful result.
    pub fn successful(value: T) -> Self {
        Self::Success(value)
    }

    /// Create a failed result.
    pub fn failure(error: impl Into<Arc<Error>>) -> Self {
        Self::Failure(error.into())
    }

    /// Returns `true` for [`Success`](Self::Success).
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` for [`Failure`](Self::Failure).
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The response, or [`MissingValue`] wrapping the failure.
    pub fn value(&self) -> Result<&T, MissingValue> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(cause) => Err(MissingValue {
                cause: cause.clone(),
            }),
        }
    }

    /// Owned version of [`value`](Self::value).
    pub fn into_value(self) -> Result<T, MissingValue> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(cause) => Err(MissingValue { cause }),
        }
    }

    /// The response, if there is one.
    pub fn try_get_value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// The failure, if there is one.
    pub fn error(&self) -> Option<&Arc<Error>> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Split into `(is_success, value, error)`.
    pub fn into_parts(self) -> (bool, Option<T>, Option<Arc<Error>>) {
        match self {
            Self::Success(value) => (true, Some(value), None),
            Self::Failure(error) => (false, None, Some(error)),
        }
    }
}

impl<T> From<Result<T, Error>> for RequestResult<T> {
    fn from(result: Result<T, Error>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::failure(error),
        }
    }
}

impl<T: fmt::Display> fmt::Display for RequestResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(value) => write!(f, "Result: {value}"),
            Self::Failure(error) => write!(f, "Exception: {error}"),
        }
    }
}

/// Dispatch methods that report failure as a [`RequestResult`].
///
/// Implemented for everything that is both a [`Sender`] and a [`Getter`].
pub trait TryDispatch: Sender + Getter {
    /// Like [`Sender::send`], capturing any failure.
    fn try_send<R: Request>(
        &self,
        request: &R,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RequestResult<R::Response>> + Send {
        async move { RequestResult::from(self.send(request, cancel).await) }
    }

    /// Like [`Sender::send_command`], reporting success as `true`.
    fn try_send_command<C: Command>(
        &self,
        command: &C,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RequestResult<bool>> + Send {
        async move {
            let sent = self.send_command(command, cancel).await;
            RequestResult::from(sent.map(|()| true))
        }
    }

    /// Like [`Getter::get`], capturing any failure.
    fn try_get<Q: Query>(
        &self,
        query: &Q,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RequestResult<Q::Response>> + Send {
        async move { RequestResult::from(self.get(query, cancel).await) }
    }
}

impl<T: Sender + Getter> TryDispatch for T {}
