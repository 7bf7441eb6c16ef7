//! Lifecycle coordination for modal overlays.
//!
//! A [`ModalManager`] keeps the instances that are currently open. Any part
//! of an application may open a modal and gets back a [`CloseHandle`] for
//! exactly that instance; several instances may share a name and close
//! independently. Every change is announced on the manager's
//! [`NotificationBus`](bus::NotificationBus).
//!
//! Drawing is left to hosts, which turn the open instances into whatever
//! output type the application renders:
//!
//! - [`ModalsHost`] renders everything that has a component in a
//!   [`RendererRegistry`].
//! - [`StandaloneHost`]s, created from a [`StandaloneModal`] factory, draw one
//!   modal name in place. When several are mounted only the first draws.
//! - [`OpenStateWatcher`] only tracks whether a name is open.

pub mod bus;
pub mod config;
pub mod error;
pub mod host;
pub mod manager;
pub mod modal;
pub mod registry;
pub mod standalone;
pub mod wakeup;
pub mod watch;

pub use config::{ListenerPanicPolicy, ManagerConfig, UnderflowPolicy};
pub use error::{NotifyError, RenderError};
pub use host::ModalsHost;
pub use manager::{CloseHandle, ModalManager, WeakModalManager};
pub use modal::{Modal, ModalId, ModalInstance, OnClose, OpenModals};
pub use registry::{ModalComponent, ModalMap, Registration, RendererRegistry};
pub use standalone::{HostId, StandaloneHost, StandaloneModal};
pub use watch::OpenStateWatcher;

pub mod prelude {
    pub use crate::bus::{ListenerId, NotificationBus};
    pub use crate::config::{ListenerPanicPolicy, ManagerConfig, UnderflowPolicy};
    pub use crate::host::ModalsHost;
    pub use crate::manager::{CloseHandle, ModalManager};
    pub use crate::modal::{Modal, ModalId, ModalInstance, OnClose, OpenModals};
    pub use crate::registry::{ModalComponent, ModalMap, RendererRegistry};
    pub use crate::standalone::{StandaloneHost, StandaloneModal};
    pub use crate::watch::OpenStateWatcher;
}
