mod common;

use common::{Name, TestModal, confirm, describe, rename};
use modal_kit::{
    ModalInstance, ModalManager, ModalMap, ModalsHost, RendererRegistry, StandaloneModal,
};

fn describe_component(instance: &ModalInstance<TestModal>) -> String {
    describe(instance.props())
}

fn registry() -> RendererRegistry<TestModal, String> {
    RendererRegistry::new()
}

#[test]
fn test_renders_registered_modals_in_open_order() {
    let manager = ModalManager::new();
    let registry = registry();
    let _registration = registry.register_modals(
        ModalMap::new()
            .with(Name::Confirm, describe_component)
            .with(Name::Rename, describe_component),
    );
    let host = ModalsHost::mount(&manager, &registry);

    manager.open(rename("a"));
    manager.open(confirm("b"));
    manager.open(rename("c"));

    assert_eq!(host.render(), vec!["rename:a", "confirm:b", "rename:c"]);
}

#[test]
fn test_skips_unregistered_names() {
    let manager = ModalManager::new();
    let registry = registry();
    let _registration = registry.register(Name::Confirm, describe_component);
    let host = ModalsHost::mount(&manager, &registry);

    manager.open(TestModal::Help);
    manager.open(confirm("b"));

    assert_eq!(host.render(), vec!["confirm:b"]);
}

#[test]
fn test_skips_standalone_instances() {
    let manager = ModalManager::new();
    let registry = registry();
    let _registration = registry.register(Name::Rename, describe_component);
    let host = ModalsHost::mount(&manager, &registry);

    manager.open(rename("before"));
    let factory: StandaloneModal<TestModal, String> =
        StandaloneModal::new(Name::Rename, describe_component);
    let standalone = factory.mount(&manager);
    manager.open(rename("during"));

    assert_eq!(host.render(), vec!["rename:before"]);
    assert_eq!(standalone.render(), vec!["rename:before", "rename:during"]);
}

#[test]
fn test_with_registry_lasts_for_mount() {
    let manager: ModalManager<TestModal> = ModalManager::new();
    let registry = registry();

    let host = ModalsHost::mount(&manager, &registry)
        .with_registry(ModalMap::new().with(Name::Help, describe_component));
    assert!(registry.contains(&Name::Help));
    manager.open(TestModal::Help);
    assert_eq!(host.render(), vec!["help"]);

    drop(host);

    assert!(!registry.contains(&Name::Help));
    assert_eq!(manager.bus().listener_count(), 0);
}

#[test]
fn test_registration_unregister_removes_names() {
    let registry = registry();
    let keep = registry.register(Name::Help, describe_component);
    let registration = registry.register_modals(
        ModalMap::new()
            .with(Name::Confirm, describe_component)
            .with(Name::Rename, describe_component),
    );
    assert_eq!(registry.len(), 3);
    assert_eq!(registration.names(), &[Name::Confirm, Name::Rename]);

    registration.unregister();

    assert_eq!(registry.len(), 1);
    assert!(registry.contains(&Name::Help));
    keep.unregister();
    assert!(registry.is_empty());
}

#[test]
fn test_render_error_for_missing_component() {
    let manager = ModalManager::new();
    let registry = registry();
    let handle = manager.open(TestModal::Help);
    let instance = manager.get(handle.id()).unwrap();

    let err = registry.render(&instance).unwrap_err();

    assert_eq!(err.to_string(), "No renderer registered for modal Help");
}

#[test]
fn test_dirty_tracking() {
    let manager = ModalManager::new();
    let registry = registry();
    let host = ModalsHost::mount(&manager, &registry);

    assert!(host.take_dirty());
    assert!(!host.take_dirty());

    let handle = manager.open(TestModal::Help);
    assert!(host.take_dirty());

    handle.close();
    assert!(host.is_dirty());
}
