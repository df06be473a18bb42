//! Snapshot tests for terminal frames
//!
//! Uses insta + ratatui TestBackend to drive the terminal host through the
//! loading, desktop and mobile layouts.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pros_site::config::ResolvedConfig;
use pros_site::model::{Route, SiteContent};
use pros_site::view::{ColorConfig, TuiApp};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

// ===== Test Helpers =====

/// Convert a ratatui buffer to a string, one trimmed line per non-empty row.
///
/// The last row (status bar) is left out; it is checked separately.
fn frame_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom().saturating_sub(1) {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

fn status_line(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let y = area.bottom() - 1;
    (area.left()..area.right())
        .map(|x| buffer[(x, y)].symbol())
        .collect()
}

fn create_app(width: u16, height: u16, route: Route) -> TuiApp<TestBackend> {
    let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    let config = ResolvedConfig {
        start_page: route,
        ..ResolvedConfig::default()
    };
    TuiApp::with_terminal(
        terminal,
        &config,
        SiteContent::default(),
        ColorConfig::with_colors(false),
    )
}

fn buffer(app: &TuiApp<TestBackend>) -> &ratatui::buffer::Buffer {
    app.terminal().backend().buffer()
}

// ===== Snapshots =====

#[test]
fn loading_frame_before_measurement() {
    let mut app = create_app(40, 6, Route::Home);
    app.draw().unwrap();

    insta::assert_snapshot!(frame_to_string(buffer(&app)), @"Loading…");
    let status = status_line(buffer(&app));
    assert!(status.contains("loading unmeasured"), "status: {status}");
}

#[test]
fn desktop_home_frame() {
    let mut app = create_app(120, 30, Route::Home);
    app.measure_viewport().unwrap();
    app.draw().unwrap();

    let frame = frame_to_string(buffer(&app));
    let first = frame.lines().next().unwrap_or_default();
    assert!(first.starts_with("PROS"), "header: {first}");
    assert!(first.contains("HOME"));
    assert!(!first.contains('☰'));
    assert!(status_line(buffer(&app)).contains("desktop 960px"));
}

#[test]
fn mobile_home_frame_with_open_drawer() {
    let mut app = create_app(60, 30, Route::Home);
    app.measure_viewport().unwrap();
    app.draw().unwrap();
    assert!(frame_to_string(buffer(&app)).contains('☰'));

    app.handle_key(KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE));
    app.draw().unwrap();

    let frame = frame_to_string(buffer(&app));
    assert!(frame.contains('✕'));
    assert!(frame.contains("HOME"));
    assert!(status_line(buffer(&app)).contains("mobile 480px"));
}

#[test]
fn narrowing_the_viewport_switches_frames() {
    let mut app = create_app(120, 30, Route::Services);
    app.measure_viewport().unwrap();
    app.draw().unwrap();
    let frame = frame_to_string(buffer(&app));
    assert!(frame.contains('┌'), "services nav column should be boxed");
    assert!(!frame.contains('☰'));

    for _ in 0..4 {
        app.handle_key(KeyEvent::new(KeyCode::Char('['), KeyModifiers::NONE));
    }
    app.draw().unwrap();

    let frame = frame_to_string(buffer(&app));
    assert!(frame.contains('☰'));
    assert!(status_line(buffer(&app)).contains("mobile 704px"));
}
