//! Frame layout and rendering.
//!
//! [`calculate_areas`] splits the terminal into the simulated viewport and
//! the status bar; [`render_layout`] draws one frame. Mouse hit testing uses
//! the same area helpers, so clicks land where things were drawn.

use super::constants::{
    DRAWER_WIDTH_PERCENT, HAMBURGER_WIDTH, HEADER_HEIGHT, HIDDEN_OPACITY,
    MOBILE_SERVICES_NAV_HEIGHT, SERVICES_NAV_WIDTH, STATUS_BAR_HEIGHT,
};
use super::styles::SiteStyles;
use crate::engine::{HeaderState, LayoutVariant, MobileHeader, RenderDecision};
use crate::model::{MenuEntry, NavLink, Route};
use crate::state::SiteSession;
use crate::view_state::{Block as DocBlock, DocumentLayout, PxScale, Tone, VisibleRow};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Margin, Position, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Screen areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameAreas {
    /// The simulated viewport (header and body), centered in the terminal.
    pub site: Rect,
    /// Header rows; zero height while loading.
    pub header: Rect,
    /// Everything below the header.
    pub body: Rect,
    /// Services navigation, on pages that have one.
    pub nav: Option<Rect>,
    /// Where the document scrolls.
    pub page: Rect,
    /// Bottom status bar.
    pub status: Rect,
}

impl FrameAreas {
    /// Height of the page viewport in logical pixels.
    pub fn viewport_height_px(&self, scale: PxScale) -> u32 {
        scale.height_px(self.page.height)
    }
}

/// Split `frame` for the session's current decision and simulated width.
///
/// The site is as wide as the session's viewport width allows (never wider
/// than the terminal). While loading there is no header or navigation.
pub fn calculate_areas(frame: Rect, session: &SiteSession, scale: PxScale) -> FrameAreas {
    let [main, status] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_BAR_HEIGHT)]).areas(frame);

    let columns = session
        .width()
        .map_or(main.width, |w| scale.columns(w))
        .min(main.width);
    let site = Rect {
        x: main.x + (main.width - columns) / 2,
        width: columns,
        ..main
    };

    let Some(layout) = session.decision().layout() else {
        return FrameAreas {
            site,
            header: Rect { height: 0, ..site },
            body: site,
            nav: None,
            page: site,
            status,
        };
    };

    let [header, body] =
        Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)]).areas(site);

    let (nav, page) = match (session.route(), layout) {
        (Route::Services, LayoutVariant::Desktop) if body.width > SERVICES_NAV_WIDTH * 2 => {
            let [nav, page] =
                Layout::horizontal([Constraint::Length(SERVICES_NAV_WIDTH), Constraint::Min(0)])
                    .areas(body);
            (Some(nav), page)
        }
        (Route::Services, _) => {
            let [nav, page] = Layout::vertical([
                Constraint::Length(MOBILE_SERVICES_NAV_HEIGHT),
                Constraint::Min(0),
            ])
            .areas(body);
            (Some(nav), page)
        }
        _ => (None, body),
    };

    FrameAreas {
        site,
        header,
        body,
        nav,
        page,
        status,
    }
}

// ===== Hit testing =====

/// The hamburger button: the right edge of the header's first row.
pub fn hamburger_area(header: Rect) -> Rect {
    let width = HAMBURGER_WIDTH.min(header.width);
    Rect::new(header.right() - width, header.y, width, header.height.min(1))
}

/// The open drawer panel, anchored to the right of the body.
pub fn drawer_area(body: Rect) -> Rect {
    let width = u16::try_from(u32::from(body.width) * u32::from(DRAWER_WIDTH_PERCENT) / 100)
        .unwrap_or(body.width);
    Rect::new(body.right() - width, body.y, width, body.height)
}

/// Index of the drawer entry under `position`.
pub fn drawer_entry_at(drawer: Rect, position: Position) -> Option<usize> {
    let inner = drawer.inner(Margin::new(1, 1));
    inner
        .contains(position)
        .then(|| usize::from(position.y - inner.y))
}

/// Index of the service under `position` in the desktop navigation column.
/// The one-row mobile strip is not clickable.
pub fn nav_entry_at(nav: Rect, position: Position) -> Option<usize> {
    if nav.height <= MOBILE_SERVICES_NAV_HEIGHT {
        return None;
    }
    let inner = nav.inner(Margin::new(1, 1));
    inner
        .contains(position)
        .then(|| usize::from(position.y - inner.y))
}

// ===== Rendering =====

/// Everything one frame needs.
pub struct SiteView<'a> {
    /// Session to draw.
    pub session: &'a SiteSession,
    /// `None` while loading.
    pub document: Option<&'a DocumentLayout>,
    /// Where each part goes.
    pub areas: FrameAreas,
    /// Colors and modifiers.
    pub styles: &'a SiteStyles,
    /// Transient message for the status bar.
    pub status: Option<&'a str>,
}

/// Draw one frame.
pub fn render_layout(frame: &mut Frame, view: &SiteView<'_>) {
    let session = view.session;
    let document = match (session.decision(), view.document) {
        (RenderDecision::Layout { .. }, Some(document)) => document,
        _ => {
            render_loading(frame, view.areas.site);
            render_status_bar(frame, view);
            return;
        }
    };

    match session.header() {
        Some(HeaderState::Desktop(_)) => render_desktop_header(frame, view),
        Some(HeaderState::Mobile(header)) => render_mobile_header(frame, view, header),
        None => {}
    }
    render_page(frame, view, document);
    if let Some(nav) = view.areas.nav {
        render_services_nav(frame, nav, view);
    }

    // Menus draw over the page.
    match session.header() {
        Some(HeaderState::Desktop(nav)) if nav.is_dropdown_open() => render_dropdown(frame, view),
        Some(HeaderState::Mobile(header)) if header.drawer().is_open() => {
            render_drawer(frame, view);
        }
        _ => {}
    }
    render_status_bar(frame, view);
}

fn render_loading(frame: &mut Frame, site: Rect) {
    let middle = Rect {
        y: site.y + site.height / 2,
        height: site.height.min(1),
        ..site
    };
    frame.render_widget(
        Paragraph::new("Loading…").alignment(Alignment::Center),
        middle,
    );
}

fn brand_line<'a>(view: &SiteView<'a>) -> Line<'a> {
    let brand = &view.session.content().brand;
    Line::from(vec![
        Span::styled(brand.name.as_str(), view.styles.brand()),
        Span::raw(" "),
        Span::styled(brand.caption.as_str(), view.styles.tone(Tone::Muted)),
    ])
}

/// One header menu label. The submenu trigger anchors the dropdown.
struct MenuLabel<'a> {
    is_submenu: bool,
    span: Span<'a>,
}

/// Top-level labels of the desktop menu. Dropdown children are skipped.
fn desktop_labels<'a>(view: &SiteView<'a>) -> Vec<MenuLabel<'a>> {
    let styles = view.styles;
    let focus = view.session.menu_focus();
    view.session
        .menu_entries()
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let (text, style) = match entry {
                MenuEntry::Link { depth: 0, link } => (format!(" {} ", link.label), styles.menu_item()),
                MenuEntry::Link { .. } => return None,
                MenuEntry::SubmenuHeader { label, expanded } => {
                    let arrow = if expanded { "▴" } else { "▾" };
                    (format!(" {label} {arrow} "), styles.menu_item())
                }
                MenuEntry::Cta(link) => (format!(" [{}] ", link.label), styles.cta()),
            };
            let style = if focus == Some(index) {
                style.patch(styles.focused())
            } else {
                style
            };
            Some(MenuLabel {
                is_submenu: matches!(entry, MenuEntry::SubmenuHeader { .. }),
                span: Span::styled(text, style),
            })
        })
        .collect()
}

fn render_desktop_header(frame: &mut Frame, view: &SiteView<'_>) {
    let area = view.areas.header;
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(view.styles.header_border(false));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(Paragraph::new(brand_line(view)), inner);
    let spans: Vec<Span> = desktop_labels(view).into_iter().map(|l| l.span).collect();
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
        inner,
    );
}

/// Dropdown box under the submenu label of the desktop header.
fn render_dropdown(frame: &mut Frame, view: &SiteView<'_>) {
    let header = view.areas.header;
    let labels = desktop_labels(view);
    let menu_width: usize = labels.iter().map(|l| l.span.width()).sum();
    let mut x = usize::from(header.right()).saturating_sub(menu_width);
    let mut anchor = None;
    for label in &labels {
        if label.is_submenu {
            anchor = Some(x);
        }
        x += label.span.width();
    }
    let Some(anchor) = anchor.and_then(|x| u16::try_from(x).ok()) else {
        return;
    };

    let entries = view.session.menu_entries();
    let children: Vec<(usize, &NavLink)> = entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| match entry {
            MenuEntry::Link { link, depth: 1 } => Some((i, *link)),
            _ => None,
        })
        .collect();
    let widest = children
        .iter()
        .map(|(_, link)| link.label.width())
        .max()
        .unwrap_or(0);
    let area = Rect::new(
        anchor,
        header.y + 1,
        u16::try_from(widest + 4).unwrap_or(u16::MAX),
        u16::try_from(children.len() + 2).unwrap_or(u16::MAX),
    )
    .intersection(view.areas.site);

    let focus = view.session.menu_focus();
    let lines: Vec<Line> = children
        .iter()
        .map(|(index, link)| {
            let style = if focus == Some(*index) {
                view.styles.menu_item().patch(view.styles.focused())
            } else {
                view.styles.menu_item()
            };
            Line::from(Span::styled(format!(" {}", link.label), style))
        })
        .collect();
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(Block::bordered()), area);
}

fn render_mobile_header(frame: &mut Frame, view: &SiteView<'_>, header: &MobileHeader) {
    let area = view.areas.header;
    let scrolled = header.is_scrolled();
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_type(if scrolled {
            BorderType::Thick
        } else {
            BorderType::Plain
        })
        .border_style(view.styles.header_border(scrolled));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(Paragraph::new(brand_line(view)), inner);
    let icon = if header.drawer().is_open() { "✕" } else { "☰" };
    frame.render_widget(
        Paragraph::new(Span::styled(icon, view.styles.brand())).alignment(Alignment::Center),
        hamburger_area(area),
    );
}

fn is_hidden(block: &DocBlock, session: &SiteSession) -> bool {
    block
        .region
        .as_ref()
        .and_then(|id| session.page().region(id))
        .is_some_and(|region| region.style().opacity < HIDDEN_OPACITY)
}

fn page_line<'a>(row: VisibleRow<'a>, view: &SiteView<'_>) -> Line<'a> {
    let Some(line) = row.line else {
        return Line::default();
    };
    if is_hidden(row.block, view.session) {
        return Line::default();
    }
    Line::from(vec![
        Span::raw(" ".repeat(usize::from(line.indent))),
        Span::styled(line.text.as_str(), view.styles.tone(line.tone)),
    ])
}

fn render_page(frame: &mut Frame, view: &SiteView<'_>, document: &DocumentLayout) {
    let page = view.areas.page;
    let first_row = document.scale().row_of(view.session.scroll_y());
    let lines: Vec<Line> = document
        .rows(first_row, usize::from(page.height))
        .into_iter()
        .map(|row| page_line(row, view))
        .collect();
    frame.render_widget(Paragraph::new(lines), page);
}

fn render_services_nav(frame: &mut Frame, area: Rect, view: &SiteView<'_>) {
    let styles = view.styles;
    let services = &view.session.content().services;
    let active = view.session.active_section().map(|id| id.as_str());
    let style_for = |id: &str| {
        if active == Some(id) {
            styles.active_section()
        } else {
            styles.menu_item()
        }
    };

    if area.height <= MOBILE_SERVICES_NAV_HEIGHT {
        let mut spans = Vec::new();
        for (i, service) in services.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" · ", styles.tone(Tone::Muted)));
            }
            spans.push(Span::styled(service.title.as_str(), style_for(&service.id)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
        return;
    }

    let lines: Vec<Line> = services
        .iter()
        .map(|service| {
            let marker = if active == Some(service.id.as_str()) {
                "▶ "
            } else {
                "  "
            };
            Line::from(Span::styled(
                format!("{marker}{}", service.title),
                style_for(&service.id),
            ))
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(Route::Services.title())),
        area,
    );
}

fn entry_line(entry: MenuEntry<'_>, focused: bool, styles: &SiteStyles) -> Line<'static> {
    let (text, style) = match entry {
        MenuEntry::Link { link, depth } => (
            format!("{}{}", "  ".repeat(usize::from(depth)), link.label),
            styles.menu_item(),
        ),
        MenuEntry::SubmenuHeader { label, expanded } => {
            let arrow = if expanded { "▾" } else { "▸" };
            (format!("{label} {arrow}"), styles.menu_item())
        }
        MenuEntry::Cta(link) => (format!("[ {} ]", link.label), styles.cta()),
    };
    let style = if focused {
        style.patch(styles.focused())
    } else {
        style
    };
    Line::from(Span::styled(text, style))
}

/// Dimmed overlay over the body plus the drawer panel.
fn render_drawer(frame: &mut Frame, view: &SiteView<'_>) {
    let body = view.areas.body;
    frame.render_widget(Clear, body);
    frame.render_widget(Block::default().style(view.styles.overlay()), body);

    let panel = drawer_area(body);
    let focus = view.session.menu_focus();
    let lines: Vec<Line> = view
        .session
        .menu_entries()
        .into_iter()
        .enumerate()
        .map(|(i, entry)| entry_line(entry, focus == Some(i), view.styles))
        .collect();
    frame.render_widget(Clear, panel);
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(brand_line(view))),
        panel,
    );
}

fn render_status_bar(frame: &mut Frame, view: &SiteView<'_>) {
    let session = view.session;
    let device = match session.decision() {
        RenderDecision::Loading => "loading",
        RenderDecision::Layout { .. } => session.device_class().label(),
    };
    let width = session
        .width()
        .map_or_else(|| "unmeasured".to_string(), |w| format!("{w}px"));
    let detail = view
        .status
        .unwrap_or("m menu · Tab/Enter select · 1-4 pages · [ ] width · q quit");
    let text = format!(
        " {} {} · {} {} · {}",
        session.route().path(),
        session.route().title(),
        device,
        width,
        detail
    );
    frame.render_widget(
        Paragraph::new(text).style(view.styles.status()),
        view.areas.status,
    );
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
