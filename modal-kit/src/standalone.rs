//! Standalone hosts and their arbitration.
//!
//! A standalone modal is drawn in place by a host bound to one modal name
//! instead of by the generic host. The same standalone host may be mounted
//! several times at once (the same screen shown twice, say); only one of the
//! mounted hosts may draw, or the modal would show up twice.
//!
//! Every [`StandaloneModal`] factory keeps the ids of its mounted hosts in
//! mount order. The first id in that list is the active host. When it
//! unmounts, the next one takes over.
//!
//! While at least one host is mounted, the manager's registration counter
//! for the name is positive, so newly opened instances are created as
//! standalone and the generic host skips them. Instances opened before any
//! host mounted stay non-standalone.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::bus::ListenerId;
use crate::manager::ModalManager;
use crate::modal::Modal;
use crate::registry::{ModalComponent, SharedComponent};
use crate::wakeup::{WakeupHandle, WakeupSender};

/// Identifier of a mounted standalone host, unique within its factory.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct HostId(u64);

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "host-{}", self.0)
    }
}

#[derive(Debug)]
struct HostTracking {
    next_id: u64,
    /// Mounted hosts, in mount order.
    mounted: Vec<HostId>,
}

/// Factory for standalone hosts of one modal name.
///
/// Cheap to clone; clones share the mounted-host list.
pub struct StandaloneModal<M: Modal, O> {
    name: M::Name,
    label: String,
    component: SharedComponent<M, O>,
    tracking: Arc<Mutex<HostTracking>>,
}

impl<M: Modal, O> StandaloneModal<M, O> {
    pub fn new<C>(name: M::Name, component: C) -> Self
    where
        C: ModalComponent<M, O> + 'static,
    {
        let label = format!("{:?}", name);
        Self {
            name,
            label,
            component: Arc::new(component),
            tracking: Arc::new(Mutex::new(HostTracking {
                next_id: 1,
                mounted: Vec::new(),
            })),
        }
    }

    /// Use `label` instead of the modal name in the display name.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn name(&self) -> &M::Name {
        &self.name
    }

    /// Name used for this factory in logs, e.g. `StandaloneModal(Confirm)`.
    pub fn display_name(&self) -> String {
        format!("StandaloneModal({})", self.label)
    }

    fn tracking(&self) -> MutexGuard<'_, HostTracking> {
        self.tracking.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The host currently allowed to draw, if any is mounted.
    pub fn active_host(&self) -> Option<HostId> {
        self.tracking().mounted.first().copied()
    }

    /// Mounted hosts, in mount order.
    pub fn mounted_hosts(&self) -> Vec<HostId> {
        self.tracking().mounted.clone()
    }

    /// Mount a new host.
    ///
    /// The host goes to the back of the mounted list, registers itself as a
    /// standalone renderer for the name and subscribes to change
    /// notifications. It starts dirty.
    pub fn mount(&self, manager: &ModalManager<M>) -> StandaloneHost<M, O> {
        let id = {
            let mut tracking = self.tracking();
            let id = HostId(tracking.next_id);
            tracking.next_id += 1;
            tracking.mounted.push(id);
            id
        };

        manager.mark_as_standalone(&self.name);

        let dirty = Arc::new(AtomicBool::new(true));
        let wakeup = WakeupHandle::default();
        let listener = {
            let dirty = Arc::clone(&dirty);
            let wakeup = wakeup.clone();
            // Re-evaluated on every change, whichever name it carries.
            manager.subscribe(move |_| {
                dirty.store(true, Ordering::SeqCst);
                wakeup.send();
            })
        };

        log::debug!("{} mounted {}", self.display_name(), id);

        StandaloneHost {
            id,
            factory: self.clone(),
            manager: manager.clone(),
            listener,
            dirty,
            wakeup,
        }
    }
}

impl<M: Modal, O> Clone for StandaloneModal<M, O> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            label: self.label.clone(),
            component: Arc::clone(&self.component),
            tracking: Arc::clone(&self.tracking),
        }
    }
}

impl<M: Modal, O> fmt::Debug for StandaloneModal<M, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandaloneModal")
            .field("name", &self.name)
            .field("mounted", &self.tracking().mounted)
            .finish()
    }
}

/// A mounted standalone host. Unmounts on drop.
pub struct StandaloneHost<M: Modal, O> {
    id: HostId,
    factory: StandaloneModal<M, O>,
    manager: ModalManager<M>,
    listener: ListenerId,
    dirty: Arc<AtomicBool>,
    wakeup: WakeupHandle,
}

impl<M: Modal, O> StandaloneHost<M, O> {
    pub fn id(&self) -> HostId {
        self.id
    }

    pub fn name(&self) -> &M::Name {
        &self.factory.name
    }

    /// Wake `sender` whenever the host becomes dirty.
    pub fn with_wakeup(self, sender: WakeupSender) -> Self {
        self.wakeup.install(sender);
        self
    }

    /// Whether this host is the first mounted one for its name.
    pub fn is_active(&self) -> bool {
        self.factory.active_host() == Some(self.id)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Read and clear the dirty flag.
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }

    /// Render every open instance of this host's name, in open order.
    ///
    /// Inactive hosts render nothing.
    pub fn render(&self) -> Vec<O> {
        if !self.is_active() {
            return Vec::new();
        }

        self.manager
            .state()
            .named(&self.factory.name)
            .map(|instance| self.factory.component.render(instance))
            .collect()
    }

    /// Unmount the host. Same as dropping it.
    pub fn unmount(self) {
        drop(self);
    }
}

impl<M: Modal, O> Drop for StandaloneHost<M, O> {
    fn drop(&mut self) {
        self.factory.tracking().mounted.retain(|id| *id != self.id);
        self.manager.unsubscribe(self.listener);
        self.manager.unmark_as_standalone(&self.factory.name);
        log::debug!("{} unmounted {}", self.factory.display_name(), self.id);
    }
}

impl<M: Modal, O> fmt::Debug for StandaloneHost<M, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandaloneHost")
            .field("id", &self.id)
            .field("name", &self.factory.name)
            .field("active", &self.is_active())
            .finish()
    }
}
