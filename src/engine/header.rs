//! Header controllers.
//!
//! Exactly one header variant is mounted at a time. Switching variants drops
//! the old one, which is how the mobile drawer gives back the scroll lock and
//! the desktop dropdown forgets it was open.

use super::drawer::DrawerController;
use super::listeners::{EventHost, EventKind, ListenerGuard};
use super::scroll_lock::DocumentScrollLock;
use serde::Serialize;
use tracing::debug;

/// Scroll distance after which the mobile header gains its elevated style.
pub const SCROLLED_THRESHOLD_PX: u32 = 20;

/// Inline desktop navigation with a hover/click dropdown for the submenu.
#[derive(Debug, Default)]
pub struct DesktopNav {
    dropdown_open: bool,
}

impl DesktopNav {
    /// A nav with the dropdown closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide the submenu dropdown.
    pub fn close_dropdown(&mut self) {
        self.dropdown_open = false;
    }

    /// Flip the dropdown (click on the submenu label).
    pub fn toggle_dropdown(&mut self) {
        self.dropdown_open = !self.dropdown_open;
        debug!(open = self.dropdown_open, "desktop dropdown toggled");
    }

    /// Whether the submenu dropdown is showing.
    pub fn is_dropdown_open(&self) -> bool {
        self.dropdown_open
    }
}

/// Sticky mobile header: hamburger drawer plus the "scrolled" flag.
#[derive(Debug)]
pub struct MobileHeader {
    drawer: DrawerController,
    scrolled: bool,
    scroll_listener: Option<ListenerGuard>,
}

impl MobileHeader {
    /// Mount against `host`, subscribing to scroll events.
    pub fn mount(host: &EventHost, lock: DocumentScrollLock) -> Self {
        Self {
            drawer: DrawerController::new(lock),
            scrolled: false,
            scroll_listener: host.listen(EventKind::Scroll),
        }
    }

    /// Update the elevation flag. Returns true when it changed.
    pub fn on_scroll(&mut self, scroll_y: u32) -> bool {
        if self.scroll_listener.is_none() {
            return false;
        }
        let scrolled = scroll_y > SCROLLED_THRESHOLD_PX;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }

    /// True once the page is scrolled past [`SCROLLED_THRESHOLD_PX`].
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// The hamburger drawer.
    pub fn drawer(&self) -> &DrawerController {
        &self.drawer
    }

    /// Mutable access to the hamburger drawer.
    pub fn drawer_mut(&mut self) -> &mut DrawerController {
        &mut self.drawer
    }

    /// Close the drawer and stop listening. Idempotent.
    pub fn teardown(&mut self) {
        self.drawer.teardown();
        self.scroll_listener = None;
    }
}

/// The mounted header controller.
#[derive(Debug)]
pub enum HeaderState {
    /// Inline links and a dropdown.
    Desktop(DesktopNav),
    /// Hamburger button and drawer.
    Mobile(MobileHeader),
}

/// Serializable summary of the header for snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum HeaderSummary {
    /// Desktop nav.
    Desktop {
        /// Submenu dropdown showing.
        dropdown_open: bool,
    },
    /// Mobile header.
    Mobile {
        /// Elevated style applied.
        scrolled: bool,
        /// Drawer open or closed.
        drawer: super::drawer::DrawerPhase,
    },
}

impl HeaderState {
    /// Snapshot of the mounted variant.
    pub fn summary(&self) -> HeaderSummary {
        match self {
            Self::Desktop(nav) => HeaderSummary::Desktop {
                dropdown_open: nav.is_dropdown_open(),
            },
            Self::Mobile(header) => HeaderSummary::Mobile {
                scrolled: header.is_scrolled(),
                drawer: header.drawer().phase(),
            },
        }
    }

    /// The mobile header, if that variant is mounted.
    pub fn as_mobile(&self) -> Option<&MobileHeader> {
        match self {
            Self::Mobile(header) => Some(header),
            Self::Desktop(_) => None,
        }
    }

    /// Mutable counterpart of [`HeaderState::as_mobile`].
    pub fn as_mobile_mut(&mut self) -> Option<&mut MobileHeader> {
        match self {
            Self::Mobile(header) => Some(header),
            Self::Desktop(_) => None,
        }
    }

    /// Close whatever menu is open (drawer or dropdown).
    pub fn close_menu(&mut self) {
        match self {
            Self::Desktop(nav) => nav.close_dropdown(),
            Self::Mobile(header) => header.drawer_mut().close(),
        }
    }

    /// Whether a menu (drawer or dropdown) is showing.
    pub fn is_menu_open(&self) -> bool {
        match self {
            Self::Desktop(nav) => nav.is_dropdown_open(),
            Self::Mobile(header) => header.drawer().is_open(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolled_flag_flips_past_twenty_pixels() {
        let host = EventHost::default();
        let mut header = MobileHeader::mount(&host, DocumentScrollLock::new());
        assert!(!header.on_scroll(20));
        assert!(header.on_scroll(21));
        assert!(header.is_scrolled());
        assert!(!header.on_scroll(400));
        assert!(header.on_scroll(0));
        assert!(!header.is_scrolled());
    }

    #[test]
    fn teardown_releases_scroll_listener_and_lock() {
        let host = EventHost::default();
        let lock = DocumentScrollLock::new();
        let mut header = MobileHeader::mount(&host, lock.clone());
        header.drawer_mut().open().unwrap();
        assert_eq!(host.registry().active(EventKind::Scroll), 1);

        header.teardown();
        assert_eq!(host.registry().active(EventKind::Scroll), 0);
        assert!(!lock.is_locked());
        assert!(!header.on_scroll(100));
    }

    #[test]
    fn replacing_mobile_header_with_desktop_drops_the_drawer() {
        let host = EventHost::default();
        let lock = DocumentScrollLock::new();
        let mut state = HeaderState::Mobile(MobileHeader::mount(&host, lock.clone()));
        if let Some(header) = state.as_mobile_mut() {
            header.drawer_mut().open().unwrap();
        }
        assert!(state.is_menu_open());

        state = HeaderState::Desktop(DesktopNav::new());
        assert!(!state.is_menu_open());
        assert!(!lock.is_locked());
        assert_eq!(host.registry().total_active(), 0);
    }

    #[test]
    fn close_menu_closes_dropdown() {
        let mut state = HeaderState::Desktop(DesktopNav::new());
        if let HeaderState::Desktop(nav) = &mut state {
            nav.toggle_dropdown();
        }
        assert_eq!(state.summary(), HeaderSummary::Desktop { dropdown_open: true });
        state.close_menu();
        assert_eq!(state.summary(), HeaderSummary::Desktop { dropdown_open: false });
    }
}
