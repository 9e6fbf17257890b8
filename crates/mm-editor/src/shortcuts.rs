//! Keyboard shortcut mapping.
//!
//! Platform-aware: ⌘ on macOS and Ctrl elsewhere serve the same role, so
//! either modifier resolves. The editor currently binds a single action
//! (undo), but resolution is kept in one place so frontends share it.

use crate::input::Modifiers;

/// Actions keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Undo,
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action. `key` is the
    /// `KeyboardEvent.key` value (e.g. `"z"`).
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let cmd = modifiers.ctrl || modifiers.meta;
        if cmd {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                _ => None,
            };
        }
        None
    }
}
