//! Redraw wakeups for hosts.
//!
//! Hosts do not draw on their own. When a change notification reaches a host
//! it marks itself dirty and, if a sender is installed, wakes the
//! application's render loop through this channel.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Buffered wakeups beyond this are dropped; one pending wakeup is enough to
/// trigger a redraw.
const WAKEUP_CAPACITY: usize = 16;

/// Sending half of a wakeup channel.
#[derive(Clone, Debug)]
pub struct WakeupSender {
    tx: mpsc::Sender<()>,
}

impl WakeupSender {
    /// Request a redraw. Never blocks.
    ///
    /// Returns false if the receiver is gone.
    pub fn send(&self) -> bool {
        match self.tx.try_send(()) {
            Ok(()) | Err(TrySendError::Full(())) => true,
            Err(TrySendError::Closed(())) => false,
        }
    }
}

/// Receiving half of a wakeup channel.
#[derive(Debug)]
pub struct WakeupReceiver {
    rx: mpsc::Receiver<()>,
}

impl WakeupReceiver {
    /// Wait for the next wakeup. Returns `None` once every sender is dropped.
    pub async fn recv(&mut self) -> Option<()> {
        self.rx.recv().await
    }

    /// Take one pending wakeup without waiting.
    pub fn try_recv(&mut self) -> bool {
        self.rx.try_recv().is_ok()
    }

    /// Discard all pending wakeups and return how many there were.
    pub fn drain(&mut self) -> usize {
        let mut count = 0;
        while self.rx.try_recv().is_ok() {
            count += 1;
        }
        count
    }
}

/// Create a connected sender/receiver pair.
pub fn channel() -> (WakeupSender, WakeupReceiver) {
    let (tx, rx) = mpsc::channel(WAKEUP_CAPACITY);
    (WakeupSender { tx }, WakeupReceiver { rx })
}

/// Slot for a sender that is installed after the host is mounted.
#[derive(Debug, Default, Clone)]
pub(crate) struct WakeupHandle {
    inner: Arc<Mutex<Option<WakeupSender>>>,
}

impl WakeupHandle {
    pub(crate) fn install(&self, sender: WakeupSender) {
        let mut slot = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(sender);
    }

    pub(crate) fn send(&self) {
        let slot = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if !slot.as_ref().is_none_or(WakeupSender::send) {
            log::trace!("Wakeup receiver dropped");
        }
    }
}
