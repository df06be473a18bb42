//! Mobile slide-in navigation drawer.

use super::scroll_lock::{DocumentScrollLock, ScrollLockError, ScrollLockGuard};
use crate::model::{NavLink, NavigationIntent};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Delay between consecutive drawer entries sliding in.
pub const STAGGER_STEP: Duration = Duration::from_millis(50);

/// Slide-in delay of the drawer entry at `index`.
///
/// The CTA sits after the last menu item, so its delay is `items.len()` steps.
pub fn stagger_delay(index: usize) -> Duration {
    STAGGER_STEP.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
}

/// Observable drawer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawerPhase {
    /// Drawer hidden.
    Closed,
    /// Drawer showing with the submenu folded.
    OpenSubmenuCollapsed,
    /// Drawer showing with the submenu children listed.
    OpenSubmenuExpanded,
}

/// Open/closed drawer with an exclusive document scroll lock.
///
/// "Open" means "holding the lock guard": there is no separate flag that
/// could drift from the lock. Closing, navigating, clicking the overlay,
/// `teardown` and dropping the controller all drop the guard.
///
/// The submenu flag is independent of open/closed and survives `close`.
#[derive(Debug)]
pub struct DrawerController {
    lock: DocumentScrollLock,
    held: Option<ScrollLockGuard>,
    submenu_expanded: bool,
}

impl DrawerController {
    /// A closed drawer that will take `lock` when opened.
    pub fn new(lock: DocumentScrollLock) -> Self {
        Self {
            lock,
            held: None,
            submenu_expanded: false,
        }
    }

    /// Open the drawer and lock background scrolling. No-op when already open.
    ///
    /// Fails only if some other holder has the lock.
    pub fn open(&mut self) -> Result<(), ScrollLockError> {
        if self.held.is_some() {
            return Ok(());
        }
        self.held = Some(self.lock.acquire()?);
        info!("drawer opened");
        Ok(())
    }

    /// Close the drawer and release the lock. No-op when already closed.
    pub fn close(&mut self) {
        if self.held.take().is_some() {
            info!("drawer closed");
        }
    }

    /// Hamburger button: open when closed, close when open.
    pub fn toggle(&mut self) -> Result<(), ScrollLockError> {
        if self.is_open() {
            self.close();
            Ok(())
        } else {
            self.open()
        }
    }

    /// Fold or unfold the submenu. Works while closed too.
    pub fn toggle_submenu(&mut self) {
        self.submenu_expanded = !self.submenu_expanded;
        debug!(expanded = self.submenu_expanded, "drawer submenu toggled");
    }

    /// Follow a drawer link. Closes the drawer.
    pub fn navigate(&mut self, link: &NavLink) -> NavigationIntent {
        self.close();
        link.intent()
    }

    /// Click on the dimmed backdrop. Closes the drawer.
    pub fn click_overlay(&mut self) {
        self.close();
    }

    /// Whether the drawer holds the scroll lock.
    pub fn is_open(&self) -> bool {
        self.held.is_some()
    }

    /// Whether the submenu children are listed.
    pub fn is_submenu_expanded(&self) -> bool {
        self.submenu_expanded
    }

    /// Current phase.
    pub fn phase(&self) -> DrawerPhase {
        match (self.is_open(), self.submenu_expanded) {
            (false, _) => DrawerPhase::Closed,
            (true, false) => DrawerPhase::OpenSubmenuCollapsed,
            (true, true) => DrawerPhase::OpenSubmenuExpanded,
        }
    }

    /// Release the lock if held. Idempotent.
    pub fn teardown(&mut self) {
        self.close();
    }
}
