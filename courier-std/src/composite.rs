//! Grouped disposal.

use courier_core::{BoxError, Disposable};
use std::sync::{Mutex, PoisonError};

/// Owns several [`Disposable`]s and releases them together.
///
/// Children are disposed in the order they were added. Disposing is
/// idempotent, and anything added after disposal is released immediately
/// instead of being stored. A child that fails to dispose is logged and
/// does not stop the others.
pub struct CompositeDisposer {
    children: Mutex<Option<Vec<Box<dyn Disposable>>>>,
}

impl CompositeDisposer {
    /// Create an empty disposer.
    pub fn new() -> Self {
        Self {
            children: Mutex::new(Some(Vec::new())),
        }
    }

    /// Take ownership of `child`.
    ///
    /// If this disposer was already disposed, `child` is disposed right away.
    pub fn add(&self, child: impl Disposable + 'static) {
        let mut guard = self.children.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_mut() {
            Some(children) => children.push(Box::new(child)),
            None => {
                drop(guard);
                release(&child);
            }
        }
    }

    /// Take ownership of every item in `children`.
    pub fn add_range<I, D>(&self, children: I)
    where
        I: IntoIterator<Item = D>,
        D: Disposable + 'static,
    {
        for child in children {
            self.add(child);
        }
    }

    /// Number of children still held.
    pub fn len(&self) -> usize {
        self.children
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(0, Vec::len)
    }

    /// Check if no children are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.children
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// Dispose every child. Only the first call has an effect.
    pub fn dispose(&self) {
        let children = self
            .children
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        for child in children.into_iter().flatten() {
            release(&child);
        }
    }
}

fn release(child: &dyn Disposable) {
    if let Err(error) = child.dispose() {
        tracing::warn!(%error, "failed to dispose child");
    }
}

impl Default for CompositeDisposer {
    fn default() -> Self {
        Self::new()
    }
}

impl Disposable for CompositeDisposer {
    fn dispose(&self) -> Result<(), BoxError> {
        CompositeDisposer::dispose(self);
        Ok(())
    }
}

impl std::fmt::Debug for CompositeDisposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeDisposer")
            .field("len", &self.len())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
