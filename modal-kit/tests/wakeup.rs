mod common;

use common::{Name, TestModal, rename};
use modal_kit::wakeup;
use modal_kit::{ModalInstance, ModalManager, ModalsHost, RendererRegistry, StandaloneModal};

#[tokio::test]
async fn test_host_wakes_render_loop() {
    let manager = ModalManager::new();
    let registry: RendererRegistry<TestModal, String> = RendererRegistry::new();
    let (tx, mut rx) = wakeup::channel();
    let _host = ModalsHost::mount(&manager, &registry).with_wakeup(tx);

    manager.open(TestModal::Help);

    assert_eq!(rx.recv().await, Some(()));
}

#[tokio::test]
async fn test_standalone_host_wakes_render_loop() {
    let manager = ModalManager::new();
    let factory: StandaloneModal<TestModal, ()> =
        StandaloneModal::new(Name::Rename, |_: &ModalInstance<TestModal>| ());
    let (tx, mut rx) = wakeup::channel();
    let _host = factory.mount(&manager).with_wakeup(tx);

    manager.open(rename("a"));
    manager.close_all(&Name::Rename);

    assert_eq!(rx.recv().await, Some(()));
    assert!(rx.try_recv());
    assert!(!rx.try_recv());
}

#[test]
fn test_drain_collapses_wakeups() {
    let (tx, mut rx) = wakeup::channel();
    for _ in 0..40 {
        assert!(tx.send());
    }

    assert_eq!(rx.drain(), 16);
    assert_eq!(rx.drain(), 0);
}

#[test]
fn test_send_after_receiver_dropped() {
    let (tx, rx) = wakeup::channel();
    drop(rx);

    assert!(!tx.send());
}

#[tokio::test]
async fn test_recv_ends_when_senders_dropped() {
    let (tx, mut rx) = wakeup::channel();
    let manager = ModalManager::new();
    let registry: RendererRegistry<TestModal, String> = RendererRegistry::new();
    let host = ModalsHost::mount(&manager, &registry).with_wakeup(tx);

    drop(host);

    assert_eq!(rx.recv().await, None);
}
