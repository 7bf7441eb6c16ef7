//! Modal payloads and open instances.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::manager::CloseHandle;

/// Callback run when an instance is closed with `run_on_close` set.
pub type OnClose = Arc<dyn Fn() + Send + Sync>;

/// The payload of an open request.
///
/// Usually implemented by an application-wide enum with one variant per
/// modal, each variant carrying that modal's props:
///
/// ```ignore
/// enum AppModal {
///     Confirm(ConfirmProps),
///     Help,
/// }
///
/// impl Modal for AppModal {
///     type Name = AppModalName;
///
///     fn name(&self) -> AppModalName {
///         match self {
///             AppModal::Confirm(_) => AppModalName::Confirm,
///             AppModal::Help => AppModalName::Help,
///         }
///     }
/// }
/// ```
pub trait Modal: Send + Sync + 'static {
    /// Logical modal identity. Several instances may share a name.
    type Name: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static;

    /// The name this payload opens under.
    fn name(&self) -> Self::Name;

    /// Callback to run when the instance is closed with `run_on_close`.
    fn on_close(&self) -> Option<OnClose> {
        None
    }
}

/// Identifier of an open instance, unique for the lifetime of its manager.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ModalId(u64);

impl ModalId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw id.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One open occurrence of a modal.
///
/// Immutable once created; it only ever leaves the manager's state.
pub struct ModalInstance<M: Modal> {
    pub(crate) id: ModalId,
    pub(crate) name: M::Name,
    pub(crate) props: M,
    pub(crate) close_handle: CloseHandle<M>,
    pub(crate) is_standalone: bool,
}

impl<M: Modal> ModalInstance<M> {
    pub fn id(&self) -> ModalId {
        self.id
    }

    pub fn name(&self) -> &M::Name {
        &self.name
    }

    /// The payload passed to `open`.
    pub fn props(&self) -> &M {
        &self.props
    }

    /// Handle closing exactly this instance.
    pub fn close_handle(&self) -> &CloseHandle<M> {
        &self.close_handle
    }

    /// Whether a standalone host was registered for the name when this
    /// instance was opened.
    pub fn is_standalone(&self) -> bool {
        self.is_standalone
    }

    /// Close this instance without running its `on_close` callback.
    pub fn close(&self) {
        self.close_handle.close();
    }
}

impl<M: Modal> fmt::Debug for ModalInstance<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalInstance")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("is_standalone", &self.is_standalone)
            .finish()
    }
}

/// Read-only snapshot of the open instances, in open order.
pub struct OpenModals<M: Modal> {
    pub(crate) entries: Vec<Arc<ModalInstance<M>>>,
}

impl<M: Modal> OpenModals<M> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the instances, first opened first.
    pub fn iter(&self) -> impl Iterator<Item = &ModalInstance<M>> {
        self.entries.iter().map(|entry| entry.as_ref())
    }

    /// Look up an instance by id.
    pub fn get(&self, id: ModalId) -> Option<&ModalInstance<M>> {
        self.iter().find(|instance| instance.id == id)
    }

    /// Iterate over the instances opened under `name`.
    pub fn named<'a>(&'a self, name: &'a M::Name) -> impl Iterator<Item = &'a ModalInstance<M>> {
        self.iter().filter(move |instance| &instance.name == name)
    }

    /// Ids in open order.
    pub fn ids(&self) -> Vec<ModalId> {
        self.iter().map(|instance| instance.id).collect()
    }
}

impl<M: Modal> Clone for OpenModals<M> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<M: Modal> fmt::Debug for OpenModals<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
