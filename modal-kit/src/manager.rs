//! Modal state manager.
//!
//! The manager owns the authoritative map of open instances and the
//! standalone registration counters. Every state change is followed by
//! exactly one notification on the manager's bus, carrying the affected
//! modal name. The state lock is released before listeners run, so
//! listeners see the updated state and may call back into the manager.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use crate::bus::{ListenerId, NotificationBus};
use crate::config::{ManagerConfig, UnderflowPolicy};
use crate::modal::{Modal, ModalId, ModalInstance, OnClose, OpenModals};

struct ManagerState<M: Modal> {
    /// Ids are allocated in increasing order, so key order is open order.
    open: BTreeMap<ModalId, Arc<ModalInstance<M>>>,
    next_id: u64,
    standalone: HashMap<M::Name, i64>,
}

impl<M: Modal> ManagerState<M> {
    fn allocate_id(&mut self) -> ModalId {
        let id = ModalId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

struct ManagerInner<M: Modal> {
    config: ManagerConfig,
    state: Mutex<ManagerState<M>>,
    bus: NotificationBus<M::Name>,
}

impl<M: Modal> ManagerInner<M> {
    fn state(&self) -> MutexGuard<'_, ManagerState<M>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn emit(&self, name: &M::Name) {
        if let Err(e) = self.bus.notify(name) {
            log::error!("[{}] {}", self.config.label, e);
        }
    }
}

/// Registry of open modal instances.
///
/// Cheap to clone; clones share the same state.
pub struct ModalManager<M: Modal> {
    inner: Arc<ManagerInner<M>>,
}

impl<M: Modal> ModalManager<M> {
    /// Create a manager with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ManagerConfig::default())
    }

    pub fn with_config(config: ManagerConfig) -> Self {
        let bus = NotificationBus::with_policy(config.listener_panics);
        Self {
            inner: Arc::new(ManagerInner {
                config,
                state: Mutex::new(ManagerState {
                    open: BTreeMap::new(),
                    next_id: 0,
                    standalone: HashMap::new(),
                }),
                bus,
            }),
        }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.inner.config
    }

    /// The bus change notifications are published on.
    pub fn bus(&self) -> &NotificationBus<M::Name> {
        &self.inner.bus
    }

    /// Subscribe to change notifications.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&M::Name) + Send + Sync + 'static,
    {
        self.inner.bus.subscribe(listener)
    }

    /// Unsubscribe a listener. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.inner.bus.unsubscribe(id)
    }

    /// Create a weak reference that does not keep the manager alive.
    pub fn downgrade(&self) -> WeakModalManager<M> {
        WeakModalManager {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Open a new instance of `modal`.
    ///
    /// The instance is standalone if at least one standalone host is
    /// registered for its name right now. Returns the handle that closes
    /// exactly this instance.
    pub fn open(&self, modal: M) -> CloseHandle<M> {
        let name = modal.name();
        let handle = {
            let mut state = self.inner.state();
            let id = state.allocate_id();
            let is_standalone = state
                .standalone
                .get(&name)
                .is_some_and(|count| *count > 0);

            let handle = CloseHandle {
                id,
                name: name.clone(),
                on_close: modal.on_close(),
                invoked: Arc::new(AtomicBool::new(false)),
                manager: Arc::downgrade(&self.inner),
            };
            let instance = ModalInstance {
                id,
                name: name.clone(),
                props: modal,
                close_handle: handle.clone(),
                is_standalone,
            };
            state.open.insert(id, Arc::new(instance));

            log::debug!(
                "[{}] Opened {:?} {} (standalone: {})",
                self.inner.config.label,
                name,
                id,
                is_standalone
            );
            handle
        };

        self.inner.emit(&name);
        handle
    }

    /// Close every open instance named `name`.
    ///
    /// Emits a single notification however many instances matched, including
    /// none. `on_close` callbacks are not run. Returns the number of closed
    /// instances.
    pub fn close_all(&self, name: &M::Name) -> usize {
        let removed: BTreeMap<ModalId, Arc<ModalInstance<M>>> = {
            let mut state = self.inner.state();
            let (removed, kept) = std::mem::take(&mut state.open)
                .into_iter()
                .partition(|(_, instance)| &instance.name == name);
            state.open = kept;
            removed
        };

        log::debug!(
            "[{}] Closed {} instance(s) of {:?}",
            self.inner.config.label,
            removed.len(),
            name
        );

        self.inner.emit(name);
        removed.len()
    }

    /// Snapshot of the open instances, in open order.
    pub fn state(&self) -> OpenModals<M> {
        OpenModals {
            entries: self.inner.state().open.values().cloned().collect(),
        }
    }

    /// Names of the open instances in open order, one entry per instance.
    pub fn open_modal_names(&self) -> Vec<M::Name> {
        self.inner
            .state()
            .open
            .values()
            .map(|instance| instance.name.clone())
            .collect()
    }

    /// Whether any instance named `name` is open.
    pub fn is_open(&self, name: &M::Name) -> bool {
        self.inner
            .state()
            .open
            .values()
            .any(|instance| &instance.name == name)
    }

    pub fn get(&self, id: ModalId) -> Option<Arc<ModalInstance<M>>> {
        self.inner.state().open.get(&id).cloned()
    }

    /// Number of open instances.
    pub fn len(&self) -> usize {
        self.inner.state().open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.state().open.is_empty()
    }

    /// Register one standalone host for `name`. Returns the new count.
    pub fn mark_as_standalone(&self, name: &M::Name) -> i64 {
        let mut state = self.inner.state();
        let count = state.standalone.entry(name.clone()).or_insert(0);
        *count += 1;
        log::trace!(
            "[{}] Standalone hosts for {:?}: {}",
            self.inner.config.label,
            name,
            count
        );
        *count
    }

    /// Unregister one standalone host for `name`. Returns the new count.
    ///
    /// An unmatched call is handled according to the configured
    /// [`UnderflowPolicy`].
    pub fn unmark_as_standalone(&self, name: &M::Name) -> i64 {
        let mut state = self.inner.state();
        let count = state.standalone.entry(name.clone()).or_insert(0);
        if *count <= 0 && self.inner.config.standalone_underflow == UnderflowPolicy::Clamp {
            log::warn!(
                "[{}] Unmatched unmark_as_standalone for {:?}, count stays at 0",
                self.inner.config.label,
                name
            );
            *count = 0;
        } else {
            *count -= 1;
        }
        log::trace!(
            "[{}] Standalone hosts for {:?}: {}",
            self.inner.config.label,
            name,
            count
        );
        *count
    }

    /// Current standalone registration count for `name`.
    pub fn standalone_count(&self, name: &M::Name) -> i64 {
        self.inner
            .state()
            .standalone
            .get(name)
            .copied()
            .unwrap_or(0)
    }
}

impl<M: Modal> Default for ModalManager<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Modal> Clone for ModalManager<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<M: Modal> fmt::Debug for ModalManager<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalManager")
            .field("label", &self.inner.config.label)
            .field("open", &self.len())
            .finish()
    }
}

/// Weak counterpart of [`ModalManager`].
pub struct WeakModalManager<M: Modal> {
    inner: Weak<ManagerInner<M>>,
}

impl<M: Modal> WeakModalManager<M> {
    /// Get the manager back if it is still alive.
    pub fn upgrade(&self) -> Option<ModalManager<M>> {
        self.inner.upgrade().map(|inner| ModalManager { inner })
    }
}

impl<M: Modal> Clone for WeakModalManager<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

/// Capability closing one specific instance.
///
/// Holds only a weak reference to the manager; closing after the manager is
/// gone does nothing. Clones share whether the handle has been invoked.
pub struct CloseHandle<M: Modal> {
    id: ModalId,
    name: M::Name,
    on_close: Option<OnClose>,
    invoked: Arc<AtomicBool>,
    manager: Weak<ManagerInner<M>>,
}

impl<M: Modal> CloseHandle<M> {
    /// Id of the instance this handle closes.
    pub fn id(&self) -> ModalId {
        self.id
    }

    pub fn name(&self) -> &M::Name {
        &self.name
    }

    /// Close the instance without running `on_close`.
    pub fn close(&self) {
        self.invoke(false);
    }

    /// Close the instance.
    ///
    /// Removes the instance and emits one notification. If `run_on_close` is
    /// set and the payload supplied an `on_close` callback, the callback runs
    /// afterwards, but only on the first invocation of this handle (or any
    /// clone of it). An instance already removed by
    /// [`ModalManager::close_all`] still gets its callback here. Later
    /// invocations notify but change nothing.
    ///
    /// Returns true if this call removed the instance.
    pub fn invoke(&self, run_on_close: bool) -> bool {
        let Some(inner) = self.manager.upgrade() else {
            log::debug!("Close of {} {:?} after manager drop", self.id, self.name);
            return false;
        };

        let first = !self.invoked.swap(true, Ordering::SeqCst);
        let removed = inner.state().open.remove(&self.id);
        let was_open = removed.is_some();
        drop(removed);

        if was_open {
            log::debug!("[{}] Closed {:?} {}", inner.config.label, self.name, self.id);
        } else {
            log::trace!(
                "[{}] {:?} {} already closed",
                inner.config.label,
                self.name,
                self.id
            );
        }

        inner.emit(&self.name);

        if let Some(on_close) = self.on_close.as_ref().filter(|_| run_on_close && first) {
            on_close();
        }
        was_open
    }
}

impl<M: Modal> Clone for CloseHandle<M> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            on_close: self.on_close.clone(),
            invoked: Arc::clone(&self.invoked),
            manager: Weak::clone(&self.manager),
        }
    }
}

impl<M: Modal> fmt::Debug for CloseHandle<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloseHandle")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("has_on_close", &self.on_close.is_some())
            .finish()
    }
}
