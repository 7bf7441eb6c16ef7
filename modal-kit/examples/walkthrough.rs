//! Scripted session showing generic and standalone hosts side by side.
//!
//! Run with `cargo run -p modal-kit --example walkthrough`.

use std::sync::Arc;

use modal_kit::prelude::*;
use simplelog::{Config, LevelFilter, SimpleLogger};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum DialogName {
    Confirm,
    About,
    Rename,
}

enum Dialog {
    Confirm {
        question: String,
        on_close: Option<OnClose>,
    },
    About,
    Rename {
        path: String,
    },
}

impl Modal for Dialog {
    type Name = DialogName;

    fn name(&self) -> DialogName {
        match self {
            Dialog::Confirm { .. } => DialogName::Confirm,
            Dialog::About => DialogName::About,
            Dialog::Rename { .. } => DialogName::Rename,
        }
    }

    fn on_close(&self) -> Option<OnClose> {
        match self {
            Dialog::Confirm { on_close, .. } => on_close.clone(),
            _ => None,
        }
    }
}

fn draw(instance: &ModalInstance<Dialog>) -> String {
    let body = match instance.props() {
        Dialog::Confirm { question, .. } => format!("[?] {}", question),
        Dialog::About => "[i] modal-kit".to_string(),
        Dialog::Rename { path } => format!("[r] rename {}", path),
    };
    format!("{} {}", instance.id(), body)
}

fn frame(
    label: &str,
    generic: &ModalsHost<Dialog, String>,
    panes: &[&StandaloneHost<Dialog, String>],
) {
    println!("-- {}", label);
    for line in generic.render() {
        println!("   overlay   {}", line);
    }
    for pane in panes {
        for line in pane.render() {
            println!("   pane {}    {}", pane.id(), line);
        }
    }
}

fn main() {
    let _ = SimpleLogger::init(LevelFilter::Debug, Config::default());

    let manager: ModalManager<Dialog> = ModalManager::with_config(ManagerConfig::new("demo"));
    let registry: RendererRegistry<Dialog, String> = RendererRegistry::new();
    let overlay = ModalsHost::mount(&manager, &registry).with_registry(
        ModalMap::new()
            .with(DialogName::Confirm, draw)
            .with(DialogName::About, draw),
    );
    let about_open = OpenStateWatcher::watch(&manager, DialogName::About);

    let confirm = manager.open(Dialog::Confirm {
        question: "Discard changes?".to_string(),
        on_close: Some(Arc::new(|| println!("   (confirm dismissed)"))),
    });
    manager.open(Dialog::About);
    frame("two overlays", &overlay, &[]);
    println!("   about open: {}", about_open.is_open());

    let renamer: StandaloneModal<Dialog, String> =
        StandaloneModal::new(DialogName::Rename, draw).with_label("RenamePane");
    let left = renamer.mount(&manager);
    let right = renamer.mount(&manager);
    manager.open(Dialog::Rename {
        path: "notes.txt".to_string(),
    });
    frame("rename drawn by the first pane only", &overlay, &[&left, &right]);

    left.unmount();
    frame("right pane took over", &overlay, &[&right]);

    confirm.invoke(true);
    manager.close_all(&DialogName::About);
    frame("after closing", &overlay, &[&right]);
    println!("   about open: {}", about_open.is_open());
    println!("   still open: {:?}", manager.open_modal_names());
}
