//! Keyboard action handler.
//!
//! Translates a [`KeyAction`] into session events. Scroll actions are
//! clamped to the document; viewport actions resize the simulated viewport.

use super::session::{ClickTarget, NavigationOutcome, SiteSession};
use crate::model::KeyAction;
use crate::view_state::{max_scroll, DocumentLayout};

/// Width change applied by one narrow/widen key press.
pub const VIEWPORT_STEP_PX: u32 = 64;

/// Geometry the handler needs from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollContext {
    /// Height of the page viewport (below the header).
    pub viewport_height_px: u32,
    /// Distance of one line scroll.
    pub step_px: u32,
    /// Widest simulated viewport the host can show.
    pub max_width_px: u32,
}

/// What the host should do after a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Redraw and keep going.
    Continue,
    /// A link was followed.
    Navigated(NavigationOutcome),
    /// Exit the event loop.
    Quit,
}

/// Apply `action` to `session`.
pub fn handle_key_action(
    session: &mut SiteSession,
    action: KeyAction,
    document: &DocumentLayout,
    ctx: ScrollContext,
) -> KeyOutcome {
    let max_y = max_scroll(document.height_px(), ctx.viewport_height_px);
    let y = session.scroll_y();
    let target = match action {
        KeyAction::ScrollDown => Some(y.saturating_add(ctx.step_px)),
        KeyAction::ScrollUp => Some(y.saturating_sub(ctx.step_px)),
        KeyAction::PageDown => Some(y.saturating_add(ctx.viewport_height_px)),
        KeyAction::PageUp => Some(y.saturating_sub(ctx.viewport_height_px)),
        KeyAction::ScrollToTop => Some(0),
        KeyAction::ScrollToBottom => Some(max_y),
        _ => None,
    };
    if let Some(target) = target {
        session.scroll_to(target.min(max_y), document);
        return KeyOutcome::Continue;
    }

    match action {
        KeyAction::ToggleMenu => session.toggle_menu(),
        KeyAction::CloseMenu => session.close_menu(),
        KeyAction::ToggleSubmenu => {
            session.click(ClickTarget::SubmenuToggle);
        }
        KeyAction::NextMenuEntry => session.focus_next(),
        KeyAction::PrevMenuEntry => session.focus_prev(),
        KeyAction::ActivateMenuEntry => {
            if let Some(intent) = session.activate_focus() {
                return KeyOutcome::Navigated(session.follow(&intent));
            }
        }
        KeyAction::GoTo(route) => session.navigate(route),
        KeyAction::NarrowViewport => {
            if let Some(width) = session.width() {
                session.resize(width.saturating_sub(VIEWPORT_STEP_PX).max(VIEWPORT_STEP_PX));
            }
        }
        KeyAction::WidenViewport => {
            if let Some(width) = session.width() {
                let widened = width.saturating_add(VIEWPORT_STEP_PX).min(ctx.max_width_px);
                session.resize(widened.max(width));
            }
        }
        KeyAction::Quit => return KeyOutcome::Quit,
        KeyAction::ScrollDown
        | KeyAction::ScrollUp
        | KeyAction::PageDown
        | KeyAction::PageUp
        | KeyAction::ScrollToTop
        | KeyAction::ScrollToBottom => {}
    }
    KeyOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{HeaderState, LayoutVariant};
    use crate::model::{Route, SiteContent};
    use crate::state::session::SessionOptions;
    use crate::view_state::PxScale;

    const CTX: ScrollContext = ScrollContext {
        viewport_height_px: 320,
        step_px: 48,
        max_width_px: 1280,
    };

    fn setup(width: u32, route: Route) -> (SiteSession, DocumentLayout) {
        let session = SiteSession::mount(
            SessionOptions {
                initial_width_px: Some(width),
                route,
                ..SessionOptions::default()
            },
            SiteContent::default(),
        );
        let variant = session.decision().layout().unwrap_or(LayoutVariant::Desktop);
        let doc = DocumentLayout::build(
            route,
            variant,
            session.content(),
            PxScale::default().columns(width),
            PxScale::default(),
        );
        (session, doc)
    }

    #[test]
    fn scroll_steps_and_clamps() {
        let (mut session, doc) = setup(1024, Route::Services);
        handle_key_action(&mut session, KeyAction::ScrollDown, &doc, CTX);
        assert_eq!(session.scroll_y(), 48);
        handle_key_action(&mut session, KeyAction::ScrollUp, &doc, CTX);
        handle_key_action(&mut session, KeyAction::ScrollUp, &doc, CTX);
        assert_eq!(session.scroll_y(), 0);

        handle_key_action(&mut session, KeyAction::ScrollToBottom, &doc, CTX);
        assert_eq!(session.scroll_y(), doc.height_px() - 320);
        handle_key_action(&mut session, KeyAction::PageDown, &doc, CTX);
        assert_eq!(session.scroll_y(), doc.height_px() - 320);
        handle_key_action(&mut session, KeyAction::ScrollToTop, &doc, CTX);
        assert_eq!(session.scroll_y(), 0);
    }

    #[test]
    fn bottom_of_services_activates_a_section() {
        let (mut session, doc) = setup(1024, Route::Services);
        handle_key_action(&mut session, KeyAction::ScrollToBottom, &doc, CTX);
        assert!(session.active_section().is_some());
    }

    #[test]
    fn toggle_menu_opens_drawer_on_mobile() {
        let (mut session, doc) = setup(500, Route::Home);
        handle_key_action(&mut session, KeyAction::ToggleMenu, &doc, CTX);
        assert!(session.header().is_some_and(HeaderState::is_menu_open));
        handle_key_action(&mut session, KeyAction::CloseMenu, &doc, CTX);
        assert!(!session.scroll_lock().is_locked());
    }

    #[test]
    fn activating_a_link_navigates() {
        let (mut session, doc) = setup(1024, Route::Home);
        handle_key_action(&mut session, KeyAction::PrevMenuEntry, &doc, CTX);
        handle_key_action(&mut session, KeyAction::PrevMenuEntry, &doc, CTX);
        handle_key_action(&mut session, KeyAction::PrevMenuEntry, &doc, CTX);
        // HOME, submenu, services, blog, CTA: three back from the start lands on services.
        let outcome = handle_key_action(&mut session, KeyAction::ActivateMenuEntry, &doc, CTX);
        assert_eq!(outcome, KeyOutcome::Navigated(NavigationOutcome::Internal(Route::Services)));
        assert_eq!(session.route(), Route::Services);
    }

    #[test]
    fn goto_jumps_directly() {
        let (mut session, doc) = setup(1024, Route::Home);
        handle_key_action(&mut session, KeyAction::GoTo(Route::Location), &doc, CTX);
        assert_eq!(session.route(), Route::Location);
    }

    #[test]
    fn narrowing_crosses_the_breakpoint() {
        let (mut session, doc) = setup(800, Route::Home);
        handle_key_action(&mut session, KeyAction::NarrowViewport, &doc, CTX);
        assert_eq!(session.width(), Some(736));
        assert_eq!(session.decision().layout(), Some(LayoutVariant::Mobile));
        handle_key_action(&mut session, KeyAction::WidenViewport, &doc, CTX);
        assert_eq!(session.decision().layout(), Some(LayoutVariant::Desktop));
    }

    #[test]
    fn widening_stops_at_the_host_width() {
        let (mut session, doc) = setup(1260, Route::Home);
        handle_key_action(&mut session, KeyAction::WidenViewport, &doc, CTX);
        assert_eq!(session.width(), Some(1280));
        handle_key_action(&mut session, KeyAction::WidenViewport, &doc, CTX);
        assert_eq!(session.width(), Some(1280));
    }

    #[test]
    fn quit_is_reported() {
        let (mut session, doc) = setup(1024, Route::Home);
        assert_eq!(
            handle_key_action(&mut session, KeyAction::Quit, &doc, CTX),
            KeyOutcome::Quit
        );
    }
}
