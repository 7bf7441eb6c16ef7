//! Error types.

use std::any::Any;

use thiserror::Error;

/// Errors reported by [`NotificationBus::notify`](crate::bus::NotificationBus::notify).
#[derive(Debug, Clone, Error)]
pub enum NotifyError {
    /// One or more listeners panicked. The remaining listeners still ran.
    #[error("{failed} of {total} listeners panicked on change to {name}: {message}")]
    ListenerPanicked {
        /// Debug rendering of the notified modal name.
        name: String,
        /// Number of listeners that panicked.
        failed: usize,
        /// Number of listeners the notification was delivered to.
        total: usize,
        /// Message of the first panic.
        message: String,
    },
}

/// Errors from resolving a renderer for an open modal.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// No renderer is registered under the instance's name.
    #[error("No renderer registered for modal {name}")]
    NotRegistered {
        /// Debug rendering of the modal name.
        name: String,
    },
}

/// Readable message for a panic payload caught while delivering a
/// notification.
///
/// The bus logs it and carries the first one in
/// [`NotifyError::ListenerPanicked`]. `panic!` payloads are either `&str` or
/// `String`; anything else gets a placeholder.
pub fn extract_panic_message(panic: &Box<dyn Any + Send>) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "Unknown panic".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_panic_message() {
        let from_str: Box<dyn Any + Send> = Box::new("boom");
        let from_string: Box<dyn Any + Send> = Box::new(String::from("bang"));
        let other: Box<dyn Any + Send> = Box::new(7u8);

        assert_eq!(extract_panic_message(&from_str), "boom");
        assert_eq!(extract_panic_message(&from_string), "bang");
        assert_eq!(extract_panic_message(&other), "Unknown panic");
    }

    #[test]
    fn test_notify_error_display() {
        let err = NotifyError::ListenerPanicked {
            name: "Confirm".to_string(),
            failed: 1,
            total: 3,
            message: "oops".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "1 of 3 listeners panicked on change to Confirm: oops"
        );
    }
}
