//! Domain-level keyboard actions independent of key bindings.

use super::route::Route;

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Page scrolling
    /// Scroll the page down by one step. Default: j/↓
    ScrollDown,
    /// Scroll the page up by one step. Default: k/↑
    ScrollUp,
    /// Scroll down by one viewport height. Default: Ctrl+d/Page Down
    PageDown,
    /// Scroll up by one viewport height. Default: Ctrl+u/Page Up
    PageUp,
    /// Jump to the top of the page. Default: g/Home
    ScrollToTop,
    /// Jump to the bottom of the page. Default: G/End
    ScrollToBottom,

    // Navigation menu
    /// Open the drawer (mobile) or the dropdown (desktop); closes it when open. Default: m
    ToggleMenu,
    /// Close the drawer or dropdown. Default: Esc
    CloseMenu,
    /// Expand or collapse the drawer's submenu. Default: s
    ToggleSubmenu,
    /// Move menu focus to the next entry. Default: Tab
    NextMenuEntry,
    /// Move menu focus to the previous entry. Default: Shift+Tab
    PrevMenuEntry,
    /// Activate the focused menu entry. Default: Enter
    ActivateMenuEntry,

    // Direct page jumps
    /// Navigate straight to a page. Default: 1-4
    GoTo(Route),

    // Simulated viewport
    /// Shrink the simulated viewport by one step. Default: [
    NarrowViewport,
    /// Grow the simulated viewport by one step. Default: ]
    WidenViewport,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// True for actions that only move the scroll position.
    pub fn is_scroll(&self) -> bool {
        matches!(
            self,
            Self::ScrollDown
                | Self::ScrollUp
                | Self::PageDown
                | Self::PageUp
                | Self::ScrollToTop
                | Self::ScrollToBottom
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_actions_are_classified() {
        assert!(KeyAction::ScrollDown.is_scroll());
        assert!(KeyAction::ScrollToBottom.is_scroll());
        assert!(!KeyAction::ToggleMenu.is_scroll());
        assert!(!KeyAction::GoTo(Route::Services).is_scroll());
    }

    #[test]
    fn goto_carries_its_route() {
        match KeyAction::GoTo(Route::About) {
            KeyAction::GoTo(route) => assert_eq!(route, Route::About),
            other => panic!("unexpected action {other:?}"),
        }
    }
}
