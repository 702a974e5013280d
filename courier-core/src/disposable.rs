//! Release handles for subscriptions and other registrations.

use crate::error::BoxError;
use std::sync::Arc;

/// Something that can be released, such as a handler subscription.
///
/// Disposal should be idempotent: releasing twice has the same effect as
/// releasing once.
pub trait Disposable: Send + Sync {
    /// Release the underlying resource.
    fn dispose(&self) -> Result<(), BoxError>;
}

impl<T: Disposable + ?Sized> Disposable for Box<T> {
    fn dispose(&self) -> Result<(), BoxError> {
        (**self).dispose()
    }
}

impl<T: Disposable + ?Sized> Disposable for Arc<T> {
    fn dispose(&self) -> Result<(), BoxError> {
        (**self).dispose()
    }
}
