//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crate::model::route::Route;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings for scrolling the simulated page,
/// plus menu, page-jump and viewport keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }

    /// Bind `code` with `modifiers` to `action`, replacing any previous binding.
    pub fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True when no key is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;

        // Vim-style scrolling
        keys.bind(KeyCode::Char('j'), none, KeyAction::ScrollDown);
        keys.bind(KeyCode::Char('k'), none, KeyAction::ScrollUp);
        keys.bind(KeyCode::Char('g'), none, KeyAction::ScrollToTop);
        keys.bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::ScrollToBottom);

        // Arrow and paging keys
        keys.bind(KeyCode::Down, none, KeyAction::ScrollDown);
        keys.bind(KeyCode::Up, none, KeyAction::ScrollUp);
        keys.bind(KeyCode::Home, none, KeyAction::ScrollToTop);
        keys.bind(KeyCode::End, none, KeyAction::ScrollToBottom);
        keys.bind(KeyCode::PageDown, none, KeyAction::PageDown);
        keys.bind(KeyCode::PageUp, none, KeyAction::PageUp);
        keys.bind(KeyCode::Char('d'), KeyModifiers::CONTROL, KeyAction::PageDown);
        keys.bind(KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::PageUp);

        // Navigation menu
        keys.bind(KeyCode::Char('m'), none, KeyAction::ToggleMenu);
        keys.bind(KeyCode::Esc, none, KeyAction::CloseMenu);
        keys.bind(KeyCode::Char('s'), none, KeyAction::ToggleSubmenu);
        keys.bind(KeyCode::Tab, none, KeyAction::NextMenuEntry);
        keys.bind(KeyCode::BackTab, KeyModifiers::SHIFT, KeyAction::PrevMenuEntry);
        keys.bind(KeyCode::Enter, none, KeyAction::ActivateMenuEntry);

        // Direct page jumps, in menu order
        for (digit, route) in ('1'..='4').zip(Route::ALL) {
            keys.bind(KeyCode::Char(digit), none, KeyAction::GoTo(route));
        }

        // Simulated viewport width
        keys.bind(KeyCode::Char('['), none, KeyAction::NarrowViewport);
        keys.bind(KeyCode::Char(']'), none, KeyAction::WidenViewport);

        // Application controls
        keys.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn default_bindings_map_vim_and_arrow_scrolling() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.get(key(KeyCode::Char('j'))), Some(KeyAction::ScrollDown));
        assert_eq!(bindings.get(key(KeyCode::Down)), Some(KeyAction::ScrollDown));
        assert_eq!(bindings.get(key(KeyCode::Up)), Some(KeyAction::ScrollUp));
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(KeyAction::ScrollToBottom)
        );
    }

    #[test]
    fn digits_jump_to_pages_in_menu_order() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.get(key(KeyCode::Char('1'))), Some(KeyAction::GoTo(Route::Home)));
        assert_eq!(
            bindings.get(key(KeyCode::Char('3'))),
            Some(KeyAction::GoTo(Route::Location))
        );
        assert_eq!(
            bindings.get(key(KeyCode::Char('4'))),
            Some(KeyAction::GoTo(Route::Services))
        );
        assert_eq!(bindings.get(key(KeyCode::Char('5'))), None);
    }

    #[test]
    fn ctrl_c_quits_but_plain_c_is_unbound() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        assert_eq!(bindings.get(key(KeyCode::Char('c'))), None);
    }

    #[test]
    fn bind_replaces_existing_binding() {
        let mut bindings = KeyBindings::default();
        let before = bindings.len();
        bindings.bind(KeyCode::Char('m'), KeyModifiers::NONE, KeyAction::Quit);
        assert_eq!(bindings.len(), before);
        assert_eq!(bindings.get(key(KeyCode::Char('m'))), Some(KeyAction::Quit));
    }
}
