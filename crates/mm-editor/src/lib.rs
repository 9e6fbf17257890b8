pub mod commands;
pub mod editor;
pub mod input;
pub mod shortcuts;
pub mod store;

pub use commands::{Action, ActionStack};
pub use editor::{DragState, Editor};
pub use input::{InputEvent, Modifiers};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use store::{GraphRecord, GraphStore, MemoryStore, StoreError};
