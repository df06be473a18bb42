//! Terminal host (impure shell).
//!
//! Drives a [`SiteSession`] from crossterm events. Terminal columns become
//! logical pixels through the [`PxScale`], keys go through the key bindings,
//! and every frame rebuilds the document layout and feeds intersection ratios
//! back to the engine before drawing.

pub mod constants;
mod layout;
mod styles;

pub use layout::{
    calculate_areas, drawer_area, drawer_entry_at, hamburger_area, nav_entry_at, render_layout,
    FrameAreas, SiteView,
};
pub use styles::{ColorConfig, SiteStyles};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::engine::{HeaderState, HostCapabilities, SectionId, SectionLayout};
use crate::model::{AppError, KeyAction, SiteContent};
use crate::state::{
    handle_key_action, ClickTarget, KeyOutcome, NavigationOutcome, ScrollContext, SessionOptions,
    SiteSession,
};
use crate::view_state::{max_scroll, DocumentLayout, PxScale};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Position, Rect},
    Terminal,
};
use std::io::{self, Stdout};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    session: SiteSession,
    key_bindings: KeyBindings,
    scale: PxScale,
    scroll_step_px: u32,
    styles: SiteStyles,
    /// Transient status bar message (external links).
    status: Option<String>,
    /// Areas of the last drawn frame, for mouse hit testing.
    last_areas: Option<FrameAreas>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    pub fn new(
        config: &ResolvedConfig,
        content: SiteContent,
        colors: ColorConfig,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let terminal = undo_on_error(
            || {
                let mut stdout = io::stdout();
                stdout.execute(EnterAlternateScreen)?;
                stdout.execute(EnableMouseCapture)?;
                Ok(Terminal::new(CrosstermBackend::new(stdout))?)
            },
            || {
                if let Err(e) = restore_terminal() {
                    debug!(error = %e, "terminal restore after failed setup");
                }
            },
        )?;
        Ok(Self::with_terminal(terminal, config, content, colors))
    }

    /// Run the main event loop
    ///
    /// The first frame is the loading placeholder; the terminal is measured
    /// right after it. Returns when the user quits.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;
        self.measure_viewport()?;
        self.draw()?;

        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(width, height) => self.handle_resize(width, height),
                _ => continue,
            }
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build the app around an existing terminal. The session starts
    /// unmeasured, so the first frame is the loading placeholder.
    pub fn with_terminal(
        terminal: Terminal<B>,
        config: &ResolvedConfig,
        content: SiteContent,
        colors: ColorConfig,
    ) -> Self {
        let capabilities = if config.animations {
            HostCapabilities::FULL
        } else {
            HostCapabilities::FULL.without_intersection()
        };
        let session = SiteSession::mount(
            SessionOptions {
                capabilities,
                initial_width_px: None,
                route: config.start_page,
                spy_offset_px: config.spy_offset_px,
            },
            content,
        );
        Self {
            terminal,
            session,
            key_bindings: KeyBindings::default(),
            scale: config.scale(),
            scroll_step_px: config.scroll_step_px,
            styles: SiteStyles::new(colors),
            status: None,
            last_areas: None,
        }
    }

    /// The session being previewed.
    pub fn session(&self) -> &SiteSession {
        &self.session
    }

    /// The underlying terminal (tests read its buffer).
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Message currently shown in the status bar, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Take the first viewport measurement from the terminal size.
    pub fn measure_viewport(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        info!(columns = size.width, rows = size.height, "measured terminal");
        self.handle_resize(size.width, size.height);
        Ok(())
    }

    /// Handle a terminal resize event
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "terminal resized");
        self.session.resize(self.scale.width_px(width));
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(action) = self.key_bindings.get(key) else {
            debug!(?key, "unbound key");
            return false;
        };
        self.apply_action(action)
    }

    /// Handle a single mouse event
    ///
    /// The wheel scrolls; left clicks hit the hamburger, the drawer and
    /// its overlay, or the desktop services navigation.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => {
                self.apply_action(KeyAction::ScrollDown);
            }
            MouseEventKind::ScrollUp => {
                self.apply_action(KeyAction::ScrollUp);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_click(Position::new(mouse.column, mouse.row));
            }
            _ => {}
        }
    }

    /// Render the current frame
    ///
    /// Clamps the scroll position to the document and refreshes region
    /// visibility for the current viewport before drawing.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let areas = self.frame_areas();
        let document = self.document(&areas);
        if let Some(document) = &document {
            let viewport_px = areas.viewport_height_px(self.scale);
            let max_y = max_scroll(document.height_px(), viewport_px);
            if self.session.scroll_y() > max_y {
                self.session.scroll_to(max_y, document);
            }
            let changed = self.session.refresh_visibility(document, viewport_px);
            if changed > 0 {
                debug!(changed, "region visibility changed");
            }
        }
        self.last_areas = Some(areas);

        let view = SiteView {
            session: &self.session,
            document: document.as_ref(),
            areas,
            styles: &self.styles,
            status: self.status.as_deref(),
        };
        self.terminal.draw(|frame| render_layout(frame, &view))?;
        Ok(())
    }

    /// Release every listener held by the session.
    pub fn teardown(&mut self) {
        self.session.teardown();
    }

    fn frame_areas(&self) -> FrameAreas {
        let area = self
            .terminal
            .size()
            .map(|size| Rect::new(0, 0, size.width, size.height))
            .unwrap_or_default();
        calculate_areas(area, &self.session, self.scale)
    }

    /// Layout of the current page, or `None` while loading.
    fn document(&self, areas: &FrameAreas) -> Option<DocumentLayout> {
        let variant = self.session.decision().layout()?;
        Some(DocumentLayout::build(
            self.session.route(),
            variant,
            self.session.content(),
            areas.page.width,
            self.scale,
        ))
    }

    fn apply_action(&mut self, action: KeyAction) -> bool {
        let areas = self.frame_areas();
        let Some(document) = self.document(&areas) else {
            // Nothing to scroll or navigate before the first measurement.
            return action == KeyAction::Quit;
        };
        let ctx = ScrollContext {
            viewport_height_px: areas.viewport_height_px(self.scale),
            step_px: self.scroll_step_px,
            max_width_px: self.scale.width_px(areas.status.width),
        };
        match handle_key_action(&mut self.session, action, &document, ctx) {
            KeyOutcome::Quit => return true,
            KeyOutcome::Navigated(outcome) => self.report(outcome),
            KeyOutcome::Continue => {}
        }
        false
    }

    fn report(&mut self, outcome: NavigationOutcome) {
        self.status = match outcome {
            NavigationOutcome::Internal(_) => None,
            NavigationOutcome::External(destination) => {
                Some(format!("external link: {destination}"))
            }
        };
    }

    fn handle_click(&mut self, position: Position) {
        let Some(areas) = self.last_areas else {
            return;
        };
        let Some(header) = self.session.header() else {
            return;
        };
        let drawer_open = header
            .as_mobile()
            .is_some_and(|mobile| mobile.drawer().is_open());

        if matches!(header, HeaderState::Mobile(_)) && hamburger_area(areas.header).contains(position)
        {
            self.session.click(ClickTarget::Hamburger);
            return;
        }

        if drawer_open {
            let panel = drawer_area(areas.body);
            if let Some(index) = drawer_entry_at(panel, position) {
                if let Some(intent) = self.session.click_entry(index) {
                    let outcome = self.session.follow(&intent);
                    self.report(outcome);
                }
            } else if areas.body.contains(position) && !panel.contains(position) {
                self.session.click(ClickTarget::Overlay);
            }
            return;
        }

        if let Some(index) = areas.nav.and_then(|nav| nav_entry_at(nav, position)) {
            self.scroll_to_service(index, &areas);
        }
    }

    /// Scroll so the `index`th service section starts at the viewport top.
    fn scroll_to_service(&mut self, index: usize, areas: &FrameAreas) {
        let Some(document) = self.document(areas) else {
            return;
        };
        let Some(extent) = self
            .session
            .content()
            .services
            .get(index)
            .and_then(|service| SectionId::new(service.id.as_str()).ok())
            .and_then(|id| document.extent(&id))
        else {
            return;
        };
        let max_y = max_scroll(document.height_px(), areas.viewport_height_px(self.scale));
        self.session.scroll_to(extent.top.min(max_y), &document);
    }
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// even when the loop fails. Logging must be initialized by the caller.
pub fn run_site(
    config: &ResolvedConfig,
    content: SiteContent,
    colors: ColorConfig,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(config, content, colors)?;
    let result = app.run();
    app.teardown();
    restore_terminal()?;
    result
}

/// Run `setup`; if it fails, run `undo` before handing back the error.
///
/// Raw mode is already on when terminal setup starts, so a failure part way
/// through has to put the terminal back itself.
fn undo_on_error<T>(
    setup: impl FnOnce() -> Result<T, TuiError>,
    undo: impl FnOnce(),
) -> Result<T, TuiError> {
    setup().inspect_err(|_| undo())
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EventKind, RenderDecision};
    use crate::model::{DeviceClass, Route};
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;

    fn create_test_app(columns: u16, route: Route) -> TuiApp<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(columns, 30)).unwrap();
        let config = ResolvedConfig {
            start_page: route,
            ..ResolvedConfig::default()
        };
        let mut app = TuiApp::with_terminal(
            terminal,
            &config,
            SiteContent::default(),
            ColorConfig::with_colors(false),
        );
        app.measure_viewport().unwrap();
        app.draw().unwrap();
        app
    }

    fn press(app: &mut TuiApp<TestBackend>, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(app: &mut TuiApp<TestBackend>, column: u16, row: u16) {
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
        app.draw().unwrap();
    }

    #[test]
    fn tui_error_from_io_error() {
        let io_err = io::Error::other("test error");
        let tui_err: TuiError = io_err.into();
        assert!(matches!(tui_err, TuiError::Io(_)));
    }

    #[test]
    fn failed_setup_runs_the_undo() {
        let mut undone = false;
        let result: Result<(), TuiError> = undo_on_error(
            || Err(io::Error::other("alternate screen refused").into()),
            || undone = true,
        );
        assert!(matches!(result, Err(TuiError::Io(_))));
        assert!(undone);
    }

    #[test]
    fn successful_setup_skips_the_undo() {
        let mut undone = false;
        let result = undo_on_error(|| Ok(7), || undone = true);
        assert_eq!(result.unwrap(), 7);
        assert!(!undone);
    }

    #[test]
    fn session_is_loading_until_measured() {
        let terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let mut app = TuiApp::with_terminal(
            terminal,
            &ResolvedConfig::default(),
            SiteContent::default(),
            ColorConfig::with_colors(false),
        );
        app.draw().unwrap();
        assert_eq!(app.session().decision(), RenderDecision::Loading);
        assert!(!press(&mut app, KeyCode::Char('j')));
        assert!(press(&mut app, KeyCode::Char('q')));

        app.measure_viewport().unwrap();
        assert_eq!(app.session().width(), Some(960));
        assert_eq!(app.session().device_class(), DeviceClass::Desktop);
    }

    #[test]
    fn quit_keys_return_true() {
        let mut app = create_test_app(120, Route::Home);
        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!press(&mut app, KeyCode::Char('x')));
    }

    #[test]
    fn scroll_keys_move_by_configured_step() {
        let mut app = create_test_app(120, Route::Home);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.session().scroll_y(), ResolvedConfig::DEFAULT_SCROLL_STEP_PX);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.session().scroll_y(), 0);
    }

    #[test]
    fn narrowing_past_the_breakpoint_switches_to_mobile() {
        let mut app = create_test_app(120, Route::Home);
        // 960 -> 896 -> 832 -> 768 (still desktop) -> 704
        for _ in 0..3 {
            press(&mut app, KeyCode::Char('['));
        }
        assert_eq!(app.session().device_class(), DeviceClass::Desktop);
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.session().width(), Some(704));
        assert_eq!(app.session().device_class(), DeviceClass::Mobile);

        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.session().device_class(), DeviceClass::Desktop);
    }

    #[test]
    fn terminal_resize_reclassifies() {
        let mut app = create_test_app(120, Route::Home);
        app.handle_resize(60, 30);
        assert_eq!(app.session().width(), Some(480));
        assert_eq!(app.session().device_class(), DeviceClass::Mobile);
    }

    #[test]
    fn hamburger_and_overlay_clicks_drive_the_drawer() {
        let mut app = create_test_app(60, Route::Home);
        let lock = app.session().scroll_lock().clone();

        // Hamburger is the last three columns of the first row.
        click(&mut app, 58, 0);
        assert!(lock.is_locked());

        // Left edge of the body is overlay, outside the drawer panel.
        click(&mut app, 2, 10);
        assert!(!lock.is_locked());
    }

    #[test]
    fn clicking_a_drawer_link_navigates() {
        let mut app = create_test_app(60, Route::Home);
        click(&mut app, 58, 0);

        let panel = drawer_area(app.last_areas.unwrap().body);
        // Third row inside the border: "업무영역" after HOME and the submenu header.
        click(&mut app, panel.x + 2, panel.y + 3);
        assert_eq!(app.session().route(), Route::Services);
        assert!(!app.session().scroll_lock().is_locked());
    }

    #[test]
    fn external_link_is_reported_in_status() {
        let mut app = create_test_app(60, Route::Home);
        press(&mut app, KeyCode::Char('m'));
        app.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.session().route(), Route::Home);
        assert!(app
            .status()
            .is_some_and(|s| s.starts_with("external link: https://")));

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.session().route(), Route::About);
        assert_eq!(app.status(), Some("external link: https://open.kakao.com/o/sfMApAbi"));
    }

    #[test]
    fn draw_reveals_regions_in_view() {
        let app = create_test_app(120, Route::Home);
        let hero = crate::model::RegionId::from(crate::model::region::names::HERO);
        assert!(app.session().page().region(&hero).unwrap().is_visible());
    }

    #[test]
    fn no_animations_reveals_everything_without_observers() {
        let terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let config = ResolvedConfig {
            animations: false,
            ..ResolvedConfig::default()
        };
        let mut app = TuiApp::with_terminal(
            terminal,
            &config,
            SiteContent::default(),
            ColorConfig::with_colors(false),
        );
        app.measure_viewport().unwrap();
        app.draw().unwrap();
        assert!(app.session().page().regions().iter().all(|r| r.is_visible()));
        assert_eq!(
            app.session().host().registry().active(EventKind::Intersection),
            0
        );
    }

    #[test]
    fn teardown_releases_listeners() {
        let mut app = create_test_app(60, Route::Services);
        app.teardown();
        assert_eq!(app.session().host().registry().total_active(), 0);
    }
}
