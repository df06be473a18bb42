//! Site session: the composition root.
//!
//! Owns the event host, the document scroll lock, the layout selector, the
//! mounted header controller and the current page's controllers. Host events
//! come in through the methods here and are routed to the components.
//!
//! # Layout switches
//!
//! When the render decision changes the previous header controller is dropped
//! before the new one mounts. Dropping a mobile header releases its drawer's
//! scroll lock; dropping the desktop navigation discards dropdown state.
//! Page controllers are rebuilt only when the page's regions differ between
//! variants (the landing page). Elsewhere reveal latches and the scroll spy
//! survive the switch.

use super::page::{PageState, RegionSnapshot};
use crate::engine::{
    DesktopNav, DocumentScrollLock, EventHost, EventKind, HeaderState, HeaderSummary,
    HeaderVariant, HostCapabilities, LayoutSelector, RenderDecision, ScrollLockStats, SectionId,
    SectionLayout, DEFAULT_SPY_OFFSET_PX, MobileHeader,
};
use crate::model::{
    DeviceClass, Destination, MenuEntry, MountState, NavLink, NavigationIntent, RegionId, Route,
    SiteContent,
};
use crate::view_state::{intersection_ratio, DocumentLayout};
use serde::Serialize;
use tracing::{debug, info, warn};

/// How to mount a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// What the host can deliver.
    pub capabilities: HostCapabilities,
    /// First viewport measurement, if the host has one yet.
    pub initial_width_px: Option<u32>,
    /// Page to open.
    pub route: Route,
    /// Scroll-spy reading line below the viewport top.
    pub spy_offset_px: u32,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            capabilities: HostCapabilities::FULL,
            initial_width_px: None,
            route: Route::Home,
            spy_offset_px: DEFAULT_SPY_OFFSET_PX,
        }
    }
}

/// Something the user clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// Mobile hamburger button.
    Hamburger,
    /// Dimmed backdrop behind the open drawer.
    Overlay,
    /// Drawer submenu header (mobile) or dropdown trigger (desktop).
    SubmenuToggle,
    /// A navigation link anywhere in the header or drawer.
    Link(NavLink),
}

/// Where a followed intent led.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// An internal page; the session is now on it.
    Internal(Route),
    /// An external URL; the session did not move.
    External(Destination),
}

/// The live UI state of one mounted site.
#[derive(Debug)]
pub struct SiteSession {
    host: EventHost,
    lock: DocumentScrollLock,
    selector: LayoutSelector,
    header: Option<HeaderState>,
    page: PageState,
    content: SiteContent,
    spy_offset_px: u32,
    scroll_y: u32,
    menu_focus: Option<usize>,
}

impl SiteSession {
    /// Mount a session. With a measured initial width the layout commits
    /// immediately; otherwise it stays on the loading placeholder.
    pub fn mount(options: SessionOptions, content: SiteContent) -> Self {
        let host = EventHost::new(options.capabilities);
        let selector = LayoutSelector::mount(&host, options.initial_width_px);
        let mut session = Self {
            host,
            lock: DocumentScrollLock::new(),
            selector,
            header: None,
            page: PageState::unmounted(options.route),
            content,
            spy_offset_px: options.spy_offset_px,
            scroll_y: 0,
            menu_focus: None,
        };
        session.apply_decision(session.selector.decision());
        info!(route = %options.route, decision = ?session.decision(), "session mounted");
        session
    }

    // ===== Accessors =====

    /// The event host components subscribe through.
    pub fn host(&self) -> &EventHost {
        &self.host
    }

    /// Lock held while the mobile drawer is open.
    pub fn scroll_lock(&self) -> &DocumentScrollLock {
        &self.lock
    }

    /// Current render decision.
    pub fn decision(&self) -> RenderDecision {
        self.selector.decision()
    }

    /// Device class of the last measurement; desktop before any.
    pub fn device_class(&self) -> DeviceClass {
        self.selector.classifier().device_class()
    }

    /// Whether the viewport has been measured.
    pub fn mount_state(&self) -> MountState {
        self.selector.classifier().mount_state()
    }

    /// Last measured viewport width.
    pub fn width(&self) -> Option<u32> {
        self.selector.classifier().width()
    }

    /// Current page.
    pub fn route(&self) -> Route {
        self.page.route()
    }

    /// State of the current page.
    pub fn page(&self) -> &PageState {
        &self.page
    }

    /// Mounted header, `None` while loading.
    pub fn header(&self) -> Option<&HeaderState> {
        self.header.as_ref()
    }

    /// Site content being rendered.
    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    /// Document scroll offset.
    pub fn scroll_y(&self) -> u32 {
        self.scroll_y
    }

    /// Services section currently highlighted.
    pub fn active_section(&self) -> Option<&SectionId> {
        self.page.active_section()
    }

    /// Index into [`Self::menu_entries`] with keyboard focus.
    pub fn menu_focus(&self) -> Option<usize> {
        self.menu_focus
    }

    // ===== Host events =====

    /// Viewport resized. Returns the new decision when the layout switched.
    pub fn resize(&mut self, width_px: u32) -> Option<RenderDecision> {
        let decision = self.selector.on_resize(width_px)?;
        self.apply_decision(decision);
        Some(decision)
    }

    /// Document scrolled to `scroll_y`. Returns false when background
    /// scrolling is locked and the tick was dropped.
    pub fn scroll_to(&mut self, scroll_y: u32, layout: &dyn SectionLayout) -> bool {
        if self.lock.is_locked() {
            debug!(scroll_y, "scroll suppressed while drawer is open");
            return false;
        }
        self.scroll_y = scroll_y;
        if let Some(header) = self.header.as_mut().and_then(HeaderState::as_mobile_mut) {
            header.on_scroll(scroll_y);
        }
        self.page.on_scroll(scroll_y, layout);
        true
    }

    /// Deliver one intersection ratio. Returns true when the region's latch changed.
    pub fn intersect(&mut self, region: &RegionId, ratio: f64) -> bool {
        let changed = self.page.intersect(region, ratio);
        if changed {
            debug!(%region, ratio, "region visibility changed");
        }
        changed
    }

    /// Recompute every region's intersection against the current viewport.
    ///
    /// Returns how many latches changed.
    pub fn refresh_visibility(&mut self, layout: &DocumentLayout, viewport_height_px: u32) -> usize {
        if !self.host.capabilities().supports(EventKind::Intersection) {
            return 0;
        }
        let ids: Vec<RegionId> = self.page.regions().iter().map(|r| r.id.clone()).collect();
        let mut changed = 0;
        for id in ids {
            let Some(extent) = layout.region_extent(&id) else {
                continue;
            };
            let ratio = intersection_ratio(extent, self.scroll_y, viewport_height_px);
            if self.intersect(&id, ratio) {
                changed += 1;
            }
        }
        changed
    }

    /// A click on some interactive element.
    pub fn click(&mut self, target: ClickTarget) -> Option<NavigationIntent> {
        match (target, self.header.as_mut()) {
            (ClickTarget::Link(link), Some(HeaderState::Mobile(header))) => {
                Some(header.drawer_mut().navigate(&link))
            }
            (ClickTarget::Link(link), Some(HeaderState::Desktop(nav))) => {
                nav.close_dropdown();
                Some(link.intent())
            }
            (ClickTarget::Link(link), None) => Some(link.intent()),
            (ClickTarget::Hamburger, Some(HeaderState::Mobile(header))) => {
                if let Err(e) = header.drawer_mut().toggle() {
                    warn!("Cannot open drawer: {}", e);
                }
                self.menu_focus = None;
                None
            }
            (ClickTarget::Overlay, Some(HeaderState::Mobile(header))) => {
                header.drawer_mut().click_overlay();
                None
            }
            (ClickTarget::SubmenuToggle, Some(HeaderState::Mobile(header))) => {
                header.drawer_mut().toggle_submenu();
                None
            }
            (ClickTarget::SubmenuToggle, Some(HeaderState::Desktop(nav))) => {
                nav.toggle_dropdown();
                None
            }
            (target, _) => {
                debug!(?target, "click ignored in current layout");
                None
            }
        }
    }

    /// Open or close whichever menu the current header has.
    pub fn toggle_menu(&mut self) {
        match self.header {
            Some(HeaderState::Mobile(_)) => {
                self.click(ClickTarget::Hamburger);
            }
            Some(HeaderState::Desktop(_)) => {
                self.click(ClickTarget::SubmenuToggle);
            }
            None => {}
        }
    }

    /// Close the drawer or dropdown if open.
    pub fn close_menu(&mut self) {
        if let Some(header) = self.header.as_mut() {
            header.close_menu();
        }
        self.menu_focus = None;
    }

    /// Navigate to an internal page: scroll to top and remount page controllers.
    pub fn navigate(&mut self, route: Route) {
        info!(from = %self.page.route(), to = %route, "navigating");
        if let Some(header) = self.header.as_mut() {
            header.close_menu();
            if let Some(mobile) = header.as_mobile_mut() {
                mobile.on_scroll(0);
            }
        }
        self.scroll_y = 0;
        self.menu_focus = None;
        self.page = PageState::unmounted(route);
        self.remount_page();
    }

    /// Resolve an intent: internal destinations navigate, external ones are reported back.
    pub fn follow(&mut self, intent: &NavigationIntent) -> NavigationOutcome {
        match intent.destination.route() {
            Some(route) => {
                self.navigate(route);
                NavigationOutcome::Internal(route)
            }
            None => {
                info!(destination = %intent.destination, "external link");
                NavigationOutcome::External(intent.destination.clone())
            }
        }
    }

    // ===== Menu focus =====

    /// Entries of the menu currently on screen, in focus order.
    ///
    /// Desktop shows the inline menu (with dropdown children while open);
    /// mobile shows the drawer's entries only while it is open.
    pub fn menu_entries(&self) -> Vec<MenuEntry<'_>> {
        match &self.header {
            Some(HeaderState::Desktop(nav)) => {
                self.content.menu.visible_entries(nav.is_dropdown_open())
            }
            Some(HeaderState::Mobile(header)) if header.drawer().is_open() => self
                .content
                .menu
                .visible_entries(header.drawer().is_submenu_expanded()),
            _ => Vec::new(),
        }
    }

    /// Move keyboard focus down the open menu, wrapping.
    pub fn focus_next(&mut self) {
        let len = self.menu_entries().len();
        self.menu_focus = match (self.menu_focus, len) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), len) => Some((i + 1) % len),
        };
    }

    /// Move keyboard focus up the open menu, wrapping.
    pub fn focus_prev(&mut self) {
        let len = self.menu_entries().len();
        self.menu_focus = match (self.menu_focus, len) {
            (_, 0) => None,
            (None, len) => Some(len - 1),
            (Some(i), len) => Some((i + len - 1) % len),
        };
    }

    /// Activate the focused entry as if clicked.
    pub fn activate_focus(&mut self) -> Option<NavigationIntent> {
        self.click_entry(self.menu_focus?)
    }

    /// Click the `index`th entry of [`Self::menu_entries`].
    ///
    /// Links clear the menu focus; a submenu header toggles its group.
    pub fn click_entry(&mut self, index: usize) -> Option<NavigationIntent> {
        let target = match self.menu_entries().get(index)? {
            MenuEntry::Link { link, .. } | MenuEntry::Cta(link) => ClickTarget::Link((*link).clone()),
            MenuEntry::SubmenuHeader { .. } => ClickTarget::SubmenuToggle,
        };
        if matches!(target, ClickTarget::Link(_)) {
            self.menu_focus = None;
        }
        self.click(target)
    }

    // ===== Snapshot / teardown =====

    /// Serializable copy of the engine state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let registry = self.host.registry();
        SessionSnapshot {
            route: self.route(),
            path: self.route().path(),
            width_px: self.width(),
            mount_state: self.mount_state(),
            device_class: self.device_class(),
            decision: self.decision(),
            header: self.header.as_ref().map(HeaderState::summary),
            scroll_y: self.scroll_y,
            scroll_lock: self.lock.stats(),
            regions: self.page.regions().iter().map(RegionSnapshot::from).collect(),
            active_section: self.active_section().cloned(),
            listeners: ListenerCounts {
                resize: registry.active(EventKind::Resize),
                scroll: registry.active(EventKind::Scroll),
                intersection: registry.active(EventKind::Intersection),
            },
        }
    }

    /// Release every listener and the scroll lock. Idempotent.
    pub fn teardown(&mut self) {
        if let Some(HeaderState::Mobile(header)) = self.header.as_mut() {
            header.teardown();
        }
        self.header = None;
        self.page.teardown();
        self.selector.teardown();
        info!("session torn down");
    }

    fn apply_decision(&mut self, decision: RenderDecision) {
        self.header = None;
        self.menu_focus = None;
        self.header = match decision.header() {
            None => None,
            Some(HeaderVariant::Desktop) => Some(HeaderState::Desktop(DesktopNav::new())),
            Some(HeaderVariant::Mobile) => {
                let mut header = MobileHeader::mount(&self.host, self.lock.clone());
                header.on_scroll(self.scroll_y);
                Some(HeaderState::Mobile(header))
            }
        };
        match decision.layout() {
            Some(variant) if self.page.survives_switch(variant, &self.content) => {
                self.page.carry_over(variant);
            }
            _ => {
                self.page = PageState::unmounted(self.page.route());
                self.remount_page();
            }
        }
    }

    fn remount_page(&mut self) {
        let Some(variant) = self.decision().layout() else {
            return;
        };
        let route = self.page.route();
        match PageState::mount(&self.host, route, variant, &self.content, self.spy_offset_px) {
            Ok(page) => self.page = page,
            Err(e) => {
                warn!("Page controllers for {} not mounted: {}", route, e);
            }
        }
    }
}

/// Live listener counts by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListenerCounts {
    /// Resize listeners.
    pub resize: usize,
    /// Scroll listeners.
    pub scroll: usize,
    /// Intersection listeners.
    pub intersection: usize,
}

/// Serializable engine state, printed by `--dump`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Current page.
    pub route: Route,
    /// Its path.
    pub path: &'static str,
    /// Viewport width, if measured.
    pub width_px: Option<u32>,
    /// Mounted or not.
    pub mount_state: MountState,
    /// Classified device.
    pub device_class: DeviceClass,
    /// Layout decision.
    pub decision: RenderDecision,
    /// Header state, absent while loading.
    pub header: Option<HeaderSummary>,
    /// Scroll offset.
    pub scroll_y: u32,
    /// Lock counters.
    pub scroll_lock: ScrollLockStats,
    /// Reveal regions of the page.
    pub regions: Vec<RegionSnapshot>,
    /// Highlighted services section.
    pub active_section: Option<SectionId>,
    /// Live listeners.
    pub listeners: ListenerCounts,
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
