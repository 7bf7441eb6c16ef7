//! Open-state watcher.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::bus::ListenerId;
use crate::manager::ModalManager;
use crate::modal::Modal;

/// Tracks whether any instance of one modal name is open.
///
/// The value is taken from the manager on creation and refreshed only by
/// notifications carrying the watched name. Dropping the watcher
/// unsubscribes it.
pub struct OpenStateWatcher<M: Modal> {
    name: M::Name,
    manager: ModalManager<M>,
    listener: ListenerId,
    open: Arc<AtomicBool>,
}

impl<M: Modal> OpenStateWatcher<M> {
    pub fn watch(manager: &ModalManager<M>, name: M::Name) -> Self {
        let open = Arc::new(AtomicBool::new(manager.is_open(&name)));

        let listener = {
            let open = Arc::clone(&open);
            let weak = manager.downgrade();
            let watched = name.clone();
            manager.subscribe(move |changed| {
                if *changed != watched {
                    return;
                }
                if let Some(manager) = weak.upgrade() {
                    open.store(manager.is_open(&watched), Ordering::SeqCst);
                }
            })
        };

        Self {
            name,
            manager: manager.clone(),
            listener,
            open,
        }
    }

    pub fn name(&self) -> &M::Name {
        &self.name
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

impl<M: Modal> Drop for OpenStateWatcher<M> {
    fn drop(&mut self) {
        self.manager.unsubscribe(self.listener);
    }
}
