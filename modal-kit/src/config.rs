//! Manager configuration types.

/// Configuration for a [`ModalManager`](crate::ModalManager).
///
/// Defaults are what most applications want; use the builder methods to
/// change individual settings.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Label used as a prefix in log lines.
    pub label: &'static str,

    /// What happens when a change listener panics.
    pub listener_panics: ListenerPanicPolicy,

    /// What happens when a standalone host unregisters more often than it
    /// registered.
    pub standalone_underflow: UnderflowPolicy,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            label: "modals",
            listener_panics: ListenerPanicPolicy::default(),
            standalone_underflow: UnderflowPolicy::default(),
        }
    }
}

impl ManagerConfig {
    /// Create a new config with the given log label.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            ..Default::default()
        }
    }

    /// Set the listener panic policy.
    pub fn listener_panics(mut self, policy: ListenerPanicPolicy) -> Self {
        self.listener_panics = policy;
        self
    }

    /// Set the standalone counter underflow policy.
    pub fn standalone_underflow(mut self, policy: UnderflowPolicy) -> Self {
        self.standalone_underflow = policy;
        self
    }
}

/// Behavior when a listener panics during notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListenerPanicPolicy {
    /// Catch the panic, log it and keep delivering to the remaining listeners.
    #[default]
    Isolate,

    /// Let the panic unwind out of the notifying call.
    /// Listeners after the panicking one are not invoked.
    Propagate,
}

/// Behavior of `unmark_as_standalone` when the counter is already at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnderflowPolicy {
    /// Log a warning and keep the counter at zero.
    #[default]
    Clamp,

    /// Decrement anyway; the counter may go negative.
    Allow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ManagerConfig::default();
        assert_eq!(config.label, "modals");
        assert_eq!(config.listener_panics, ListenerPanicPolicy::Isolate);
        assert_eq!(config.standalone_underflow, UnderflowPolicy::Clamp);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ManagerConfig::new("dialogs")
            .listener_panics(ListenerPanicPolicy::Propagate)
            .standalone_underflow(UnderflowPolicy::Allow);
        assert_eq!(config.label, "dialogs");
        assert_eq!(config.listener_panics, ListenerPanicPolicy::Propagate);
        assert_eq!(config.standalone_underflow, UnderflowPolicy::Allow);
    }
}
