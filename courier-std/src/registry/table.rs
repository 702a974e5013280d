use courier_core::{BoxError, Disposable, DynEventHandler, Error, Event};
use std::{
    fmt,
    sync::{
        Arc, PoisonError, RwLock, Weak,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

/// Subscription table for one event type.
///
/// Clones share the same table. Handlers are kept in subscription order,
/// and each handler instance appears at most once.
pub struct EventRegistry<E: Event> {
    inner: Arc<Table<E>>,
}

struct Table<E: Event> {
    state: RwLock<State<E>>,
    next_id: AtomicU64,
}

struct State<E: Event> {
    entries: Vec<Entry<E>>,
    closed: bool,
}

struct Entry<E: Event> {
    id: u64,
    handler: Arc<dyn DynEventHandler<E>>,
}

/// Identity of a handler instance, independent of the pointer's metadata.
fn address<T: ?Sized>(handler: &Arc<T>) -> *const () {
    Arc::as_ptr(handler).cast::<()>()
}

impl<E: Event> EventRegistry<E> {
    /// Create an empty, open table.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Table {
                state: RwLock::new(State {
                    entries: Vec::new(),
                    closed: false,
                }),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Subscribe `handler`.
    ///
    /// Subscribing an instance that is already present does not add a second
    /// entry; the returned subscription refers to the existing one. Fails with
    /// [`Error::Disposed`] once the table has been disposed.
    pub fn register(&self, handler: Arc<dyn DynEventHandler<E>>) -> Result<Subscription, Error> {
        self.subscribe(handler).map(|(subscription, _)| subscription)
    }

    /// Like [`register`](Self::register), also reporting whether a new entry
    /// was added.
    pub(crate) fn subscribe(
        &self,
        handler: Arc<dyn DynEventHandler<E>>,
    ) -> Result<(Subscription, bool), Error> {
        let mut state = self
            .inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if state.closed {
            return Err(Error::Disposed("event registry"));
        }

        let existing = state
            .entries
            .iter()
            .find(|entry| address(&entry.handler) == address(&handler))
            .map(|entry| entry.id);

        let (id, created) = match existing {
            Some(id) => (id, false),
            None => {
                let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(handler = handler.type_name(), id, "handler subscribed");
                state.entries.push(Entry { id, handler });
                (id, true)
            }
        };

        let table = Arc::downgrade(&self.inner) as Weak<dyn Unsubscribe>;
        let subscription = Subscription {
            table,
            id,
            disposed: AtomicBool::new(false),
        };
        Ok((subscription, created))
    }

    /// Check whether this exact handler instance is subscribed.
    pub fn contains<H: ?Sized>(&self, handler: &Arc<H>) -> bool {
        self.read(|state| {
            state
                .entries
                .iter()
                .any(|entry| address(&entry.handler) == address(handler))
        })
    }

    /// Ordered copy of the currently subscribed handlers.
    ///
    /// Later subscriptions are not observed by a snapshot already taken.
    pub fn snapshot(&self) -> Vec<Arc<dyn DynEventHandler<E>>> {
        self.read(|state| {
            state
                .entries
                .iter()
                .map(|entry| entry.handler.clone())
                .collect()
        })
    }

    /// Number of subscribed handlers.
    pub fn len(&self) -> usize {
        self.read(|state| state.entries.len())
    }

    /// Check if no handler is subscribed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether the table has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.read(|state| state.closed)
    }

    /// Remove every subscription and close the table.
    pub fn dispose(&self) {
        let mut state = self
            .inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        state.closed = true;
        state.entries.clear();
    }

    fn read<T>(&self, f: impl FnOnce(&State<E>) -> T) -> T {
        f(&self.inner.state.read().unwrap_or_else(PoisonError::into_inner))
    }
}

impl<E: Event> Default for EventRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> Clone for EventRegistry<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<E: Event> fmt::Debug for EventRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRegistry")
            .field("event", &std::any::type_name::<E>())
            .field("len", &self.len())
            .finish()
    }
}

trait Unsubscribe: Send + Sync {
    fn remove(&self, id: u64);
}

impl<E: Event> Unsubscribe for Table<E> {
    fn remove(&self, id: u64) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .retain(|entry| entry.id != id);
    }
}

/// Handle for one subscription in an [`EventRegistry`].
///
/// Disposing removes exactly that handler from exactly that table. Dropping
/// the handle without disposing leaves the handler subscribed.
#[must_use = "dropping a subscription does not unsubscribe; keep it to dispose later"]
pub struct Subscription {
    table: Weak<dyn Unsubscribe>,
    id: u64,
    disposed: AtomicBool,
}

impl Subscription {
    /// Check whether this subscription has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

impl Disposable for Subscription {
    fn dispose(&self) -> Result<(), BoxError> {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        if let Some(table) = self.table.upgrade() {
            table.remove(self.id);
        }
        Ok(())
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
