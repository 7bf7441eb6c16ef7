//! Renderer registry for the generic host.
//!
//! Maps modal names to the components that draw them. The manager never
//! reads this table; only [`ModalsHost`](crate::host::ModalsHost) does.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use crate::error::RenderError;
use crate::modal::{Modal, ModalInstance};

/// Something that can draw an open modal into an `O`.
///
/// Implemented for every `Fn(&ModalInstance<M>) -> O`.
pub trait ModalComponent<M: Modal, O>: Send + Sync {
    fn render(&self, instance: &ModalInstance<M>) -> O;
}

impl<M, O, F> ModalComponent<M, O> for F
where
    M: Modal,
    F: Fn(&ModalInstance<M>) -> O + Send + Sync,
{
    fn render(&self, instance: &ModalInstance<M>) -> O {
        self(instance)
    }
}

/// Shared, type-erased component.
pub type SharedComponent<M, O> = Arc<dyn ModalComponent<M, O>>;

/// A batch of name/component pairs to register together.
pub struct ModalMap<M: Modal, O> {
    entries: Vec<(M::Name, SharedComponent<M, O>)>,
}

impl<M: Modal, O> ModalMap<M, O> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a component, builder style.
    pub fn with<C>(mut self, name: M::Name, component: C) -> Self
    where
        C: ModalComponent<M, O> + 'static,
    {
        self.insert(name, component);
        self
    }

    pub fn insert<C>(&mut self, name: M::Name, component: C)
    where
        C: ModalComponent<M, O> + 'static,
    {
        self.entries.push((name, Arc::new(component)));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<M: Modal, O> Default for ModalMap<M, O> {
    fn default() -> Self {
        Self::new()
    }
}

type Table<M, O> = HashMap<<M as Modal>::Name, SharedComponent<M, O>>;

/// Name to component lookup table.
///
/// Cheap to clone; clones share the same table.
pub struct RendererRegistry<M: Modal, O> {
    table: Arc<RwLock<Table<M, O>>>,
}

impl<M: Modal, O> RendererRegistry<M, O> {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Table<M, O>> {
        self.table.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Table<M, O>> {
        self.table.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a single component. Replaces any existing entry for `name`.
    pub fn register<C>(&self, name: M::Name, component: C) -> Registration<M, O>
    where
        C: ModalComponent<M, O> + 'static,
    {
        self.register_modals(ModalMap::new().with(name, component))
    }

    /// Register every component in `map`, replacing existing entries.
    ///
    /// The returned [`Registration`] removes the same names again.
    pub fn register_modals(&self, map: ModalMap<M, O>) -> Registration<M, O> {
        let mut table = self.write();
        let mut names = Vec::with_capacity(map.entries.len());
        for (name, component) in map.entries {
            log::debug!("Registered renderer for {:?}", name);
            names.push(name.clone());
            table.insert(name, component);
        }
        Registration {
            table: Arc::downgrade(&self.table),
            names,
        }
    }

    pub fn get(&self, name: &M::Name) -> Option<SharedComponent<M, O>> {
        self.read().get(name).cloned()
    }

    pub fn contains(&self, name: &M::Name) -> bool {
        self.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Render `instance` with the component registered under its name.
    ///
    /// The table lock is not held while the component runs.
    pub fn render(&self, instance: &ModalInstance<M>) -> Result<O, RenderError> {
        let component = self
            .get(instance.name())
            .ok_or_else(|| RenderError::NotRegistered {
                name: format!("{:?}", instance.name()),
            })?;
        Ok(component.render(instance))
    }
}

impl<M: Modal, O> Default for RendererRegistry<M, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Modal, O> Clone for RendererRegistry<M, O> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

impl<M: Modal, O> fmt::Debug for RendererRegistry<M, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.read().keys()).finish()
    }
}

/// Capability reversing a `register_modals` call.
///
/// Unregistering removes the names it registered, even if they were
/// re-registered by someone else in the meantime. Dropping a registration
/// without calling [`unregister`](Registration::unregister) keeps the
/// components registered.
pub struct Registration<M: Modal, O> {
    table: Weak<RwLock<Table<M, O>>>,
    names: Vec<M::Name>,
}

impl<M: Modal, O> Registration<M, O> {
    /// Names covered by this registration.
    pub fn names(&self) -> &[M::Name] {
        &self.names
    }

    /// Remove the registered components.
    pub fn unregister(self) {
        let Some(table) = self.table.upgrade() else {
            return;
        };
        let mut table = table.write().unwrap_or_else(|e| e.into_inner());
        for name in &self.names {
            if table.remove(name).is_some() {
                log::debug!("Unregistered renderer for {:?}", name);
            }
        }
    }
}

impl<M: Modal, O> fmt::Debug for Registration<M, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("names", &self.names)
            .finish()
    }
}
