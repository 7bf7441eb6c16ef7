//! Change notification bus.
//!
//! Listeners are plain callbacks receiving the name of the modal whose state
//! changed. Delivery is synchronous: `notify` returns after every listener
//! has run.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::ListenerPanicPolicy;
use crate::error::{NotifyError, extract_panic_message};

/// A change listener.
pub type Listener<N> = Arc<dyn Fn(&N) + Send + Sync>;

/// Handle identifying a subscribed listener.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

struct Listeners<N> {
    next_id: u64,
    entries: Vec<(ListenerId, Listener<N>)>,
}

/// Publish/subscribe primitive keyed by modal name.
///
/// Listeners are invoked in subscription order. The listener list is
/// snapshotted at the start of `notify`, so a listener may subscribe or
/// unsubscribe (itself included) while being notified. Listeners subscribed
/// during delivery first hear the next notification; listeners unsubscribed
/// during delivery are not called again, even later in the same one.
pub struct NotificationBus<N> {
    listeners: Mutex<Listeners<N>>,
    policy: ListenerPanicPolicy,
}

impl<N: fmt::Debug> NotificationBus<N> {
    /// Create a bus that isolates panicking listeners.
    pub fn new() -> Self {
        Self::with_policy(ListenerPanicPolicy::default())
    }

    /// Create a bus with the given listener panic policy.
    pub fn with_policy(policy: ListenerPanicPolicy) -> Self {
        Self {
            listeners: Mutex::new(Listeners {
                next_id: 0,
                entries: Vec::new(),
            }),
            policy,
        }
    }

    fn listeners(&self) -> MutexGuard<'_, Listeners<N>> {
        self.listeners.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Subscribe a listener. It stays subscribed until `unsubscribe` is called
    /// with the returned id.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&N) + Send + Sync + 'static,
    {
        let mut listeners = self.listeners();
        let id = ListenerId(listeners.next_id);
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(listener)));
        log::trace!("Subscribed {}", id);
        id
    }

    /// Remove a listener.
    ///
    /// Returns false if the id was not subscribed; that is not an error.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners();
        let before = listeners.entries.len();
        listeners.entries.retain(|(entry, _)| *entry != id);
        let removed = listeners.entries.len() != before;
        if removed {
            log::trace!("Unsubscribed {}", id);
        }
        removed
    }

    pub fn is_subscribed(&self, id: ListenerId) -> bool {
        self.listeners().entries.iter().any(|(entry, _)| *entry == id)
    }

    /// Number of subscribed listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners().entries.len()
    }

    /// Deliver `name` to every subscribed listener.
    ///
    /// Under [`ListenerPanicPolicy::Isolate`] a panicking listener is logged
    /// and skipped, and the panics are summarised in the returned error.
    /// Under [`ListenerPanicPolicy::Propagate`] the panic unwinds out of this
    /// call.
    pub fn notify(&self, name: &N) -> Result<(), NotifyError> {
        let snapshot: Vec<(ListenerId, Listener<N>)> = self
            .listeners()
            .entries
            .iter()
            .map(|(id, listener)| (*id, Arc::clone(listener)))
            .collect();
        let mut total = 0;
        let mut failures: Vec<String> = Vec::new();

        for (id, listener) in snapshot {
            if !self.is_subscribed(id) {
                log::trace!("Skipping {}, unsubscribed during delivery", id);
                continue;
            }
            total += 1;
            log::trace!("Delivering {:?} to {}", name, id);
            match self.policy {
                ListenerPanicPolicy::Propagate => listener(name),
                ListenerPanicPolicy::Isolate => {
                    if let Err(panic) = panic::catch_unwind(AssertUnwindSafe(|| listener(name))) {
                        let message = extract_panic_message(&panic);
                        log::error!("{} panicked handling {:?}: {}", id, name, message);
                        failures.push(message);
                    }
                }
            }
        }

        match failures.first() {
            None => Ok(()),
            Some(first) => Err(NotifyError::ListenerPanicked {
                name: format!("{:?}", name),
                failed: failures.len(),
                total,
                message: first.clone(),
            }),
        }
    }
}

impl<N: fmt::Debug> Default for NotificationBus<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> fmt::Debug for NotificationBus<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self
            .listeners
            .lock()
            .map(|l| l.entries.len())
            .unwrap_or_else(|e| e.into_inner().entries.len());
        f.debug_struct("NotificationBus")
            .field("listeners", &count)
            .field("policy", &self.policy)
            .finish()
    }
}
