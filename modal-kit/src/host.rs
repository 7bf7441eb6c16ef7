//! Generic modal host.
//!
//! Renders every open, non-standalone instance that has a registered
//! component. Standalone instances are left to their
//! [`StandaloneHost`](crate::standalone::StandaloneHost).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::bus::ListenerId;
use crate::manager::ModalManager;
use crate::modal::Modal;
use crate::registry::{ModalMap, Registration, RendererRegistry};
use crate::wakeup::{WakeupHandle, WakeupSender};

/// A mounted generic host.
///
/// Subscribed to the manager for as long as it lives. Dropping it
/// unsubscribes and removes any components it registered itself.
pub struct ModalsHost<M: Modal, O> {
    manager: ModalManager<M>,
    registry: RendererRegistry<M, O>,
    listener: ListenerId,
    dirty: Arc<AtomicBool>,
    wakeup: WakeupHandle,
    registration: Option<Registration<M, O>>,
}

impl<M: Modal, O> ModalsHost<M, O> {
    /// Mount a host rendering from `registry`.
    ///
    /// A freshly mounted host starts dirty so the first frame draws it.
    pub fn mount(manager: &ModalManager<M>, registry: &RendererRegistry<M, O>) -> Self {
        let dirty = Arc::new(AtomicBool::new(true));
        let wakeup = WakeupHandle::default();

        let listener = {
            let dirty = Arc::clone(&dirty);
            let wakeup = wakeup.clone();
            manager.subscribe(move |_| {
                dirty.store(true, Ordering::SeqCst);
                wakeup.send();
            })
        };
        log::debug!("[{}] Mounted modals host", manager.config().label);

        Self {
            manager: manager.clone(),
            registry: registry.clone(),
            listener,
            dirty,
            wakeup,
            registration: None,
        }
    }

    /// Register `map` for as long as this host is mounted.
    ///
    /// Replaces a map registered by an earlier call.
    pub fn with_registry(mut self, map: ModalMap<M, O>) -> Self {
        if let Some(previous) = self.registration.take() {
            previous.unregister();
        }
        self.registration = Some(self.registry.register_modals(map));
        self.dirty.store(true, Ordering::SeqCst);
        self
    }

    /// Wake `sender` whenever the host becomes dirty.
    pub fn with_wakeup(self, sender: WakeupSender) -> Self {
        self.wakeup.install(sender);
        self
    }

    pub fn registry(&self) -> &RendererRegistry<M, O> {
        &self.registry
    }

    /// Whether a notification arrived since the last `take_dirty`.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Read and clear the dirty flag.
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }

    /// Render the current frame, in open order.
    pub fn render(&self) -> Vec<O> {
        let state = self.manager.state();
        let mut nodes = Vec::with_capacity(state.len());

        for instance in state.iter() {
            if instance.is_standalone() {
                continue;
            }
            match self.registry.render(instance) {
                Ok(node) => nodes.push(node),
                Err(e) => log::trace!("Skipping {}: {}", instance.id(), e),
            }
        }

        nodes
    }
}

impl<M: Modal, O> Drop for ModalsHost<M, O> {
    fn drop(&mut self) {
        self.manager.unsubscribe(self.listener);
        if let Some(registration) = self.registration.take() {
            registration.unregister();
        }
        log::debug!("[{}] Unmounted modals host", self.manager.config().label);
    }
}
