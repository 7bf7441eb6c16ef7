mod common;

use common::{Name, TestModal, confirm, rename};
use modal_kit::{ModalManager, OpenStateWatcher};

#[test]
fn test_initial_state_from_manager() {
    let manager = ModalManager::new();
    manager.open(TestModal::Help);

    let help = OpenStateWatcher::watch(&manager, Name::Help);
    let other = OpenStateWatcher::watch(&manager, Name::Confirm);

    assert!(help.is_open());
    assert!(!other.is_open());
}

#[test]
fn test_follows_open_and_close() {
    let manager = ModalManager::new();
    let watcher = OpenStateWatcher::watch(&manager, Name::Rename);

    let first = manager.open(rename("a"));
    let second = manager.open(rename("b"));
    assert!(watcher.is_open());

    first.close();
    assert!(watcher.is_open());

    second.close();
    assert!(!watcher.is_open());

    manager.open(rename("c"));
    manager.close_all(&Name::Rename);
    assert!(!watcher.is_open());
}

#[test]
fn test_ignores_other_names() {
    let manager = ModalManager::new();
    let watcher = OpenStateWatcher::watch(&manager, Name::Help);

    manager.open(confirm("a"));
    manager.close_all(&Name::Confirm);

    assert!(!watcher.is_open());
    assert_eq!(watcher.name(), &Name::Help);
}

#[test]
fn test_drop_unsubscribes() {
    let manager: ModalManager<TestModal> = ModalManager::new();
    let watcher = OpenStateWatcher::watch(&manager, Name::Help);
    assert_eq!(manager.bus().listener_count(), 1);

    drop(watcher);

    assert_eq!(manager.bus().listener_count(), 0);
}
