#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use modal_kit::{Modal, ModalManager, OnClose};
use simplelog::{Config, LevelFilter, TestLogger};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Name {
    Confirm,
    Help,
    Rename,
}

pub enum TestModal {
    Confirm {
        message: String,
        on_close: Option<OnClose>,
    },
    Help,
    Rename {
        from: String,
    },
}

impl Modal for TestModal {
    type Name = Name;

    fn name(&self) -> Name {
        match self {
            TestModal::Confirm { .. } => Name::Confirm,
            TestModal::Help => Name::Help,
            TestModal::Rename { .. } => Name::Rename,
        }
    }

    fn on_close(&self) -> Option<OnClose> {
        match self {
            TestModal::Confirm { on_close, .. } => on_close.clone(),
            _ => None,
        }
    }
}

pub fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

pub fn confirm(message: &str) -> TestModal {
    TestModal::Confirm {
        message: message.to_string(),
        on_close: None,
    }
}

pub fn confirm_with(message: &str, on_close: OnClose) -> TestModal {
    TestModal::Confirm {
        message: message.to_string(),
        on_close: Some(on_close),
    }
}

pub fn rename(from: &str) -> TestModal {
    TestModal::Rename {
        from: from.to_string(),
    }
}

/// Short text describing an instance, used as render output in tests.
pub fn describe(modal: &TestModal) -> String {
    match modal {
        TestModal::Confirm { message, .. } => format!("confirm:{}", message),
        TestModal::Help => "help".to_string(),
        TestModal::Rename { from } => format!("rename:{}", from),
    }
}

/// Subscribe a listener that records every notified name.
pub fn record(manager: &ModalManager<TestModal>) -> Arc<Mutex<Vec<Name>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    manager.subscribe(move |name| sink.lock().unwrap().push(*name));
    seen
}
