//! Scroll-spy: which section is under the reading line.
//!
//! The reading line sits `offset` pixels below the top of the viewport
//! (under the sticky header). The first section, in input order, whose
//! extent contains the reading line is active.

use super::listeners::{EventHost, EventKind, ListenerGuard};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Default distance from the viewport top to the reading line.
pub const DEFAULT_SPY_OFFSET_PX: u32 = 150;

/// Section anchor id. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    /// Smart constructor: rejects empty and whitespace-only ids.
    pub fn new(raw: impl Into<String>) -> Result<Self, ScrollSpyError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ScrollSpyError::EmptyId);
        }
        Ok(Self(raw))
    }

    /// The anchor id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Vertical extent of a section in document coordinates (logical pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SectionExtent {
    /// Top edge.
    pub top: u32,
    /// Height in logical pixels.
    pub height: u32,
}

impl SectionExtent {
    /// Extent starting at `top`, `height` tall.
    pub fn new(top: u32, height: u32) -> Self {
        Self { top, height }
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }

    /// Half-open containment: `top <= y < top + height`.
    pub fn contains(&self, y: u32) -> bool {
        y >= self.top && y < self.bottom()
    }
}

/// Live layout measurements. Implemented by whatever owns the document.
///
/// `None` means the section is not attached or cannot be measured right now.
pub trait SectionLayout {
    /// Extent of section `id`, or `None` when it is not laid out.
    fn extent(&self, id: &SectionId) -> Option<SectionExtent>;
}

impl<F> SectionLayout for F
where
    F: Fn(&SectionId) -> Option<SectionExtent>,
{
    fn extent(&self, id: &SectionId) -> Option<SectionExtent> {
        self(id)
    }
}

/// Errors constructing a scroll-spy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScrollSpyError {
    /// A section id is empty.
    #[error("section id must not be empty")]
    EmptyId,
    /// The same section id was given twice.
    #[error("duplicate section id: {0}")]
    DuplicateSection(String),
}

/// Pure active-section computation for one tick.
///
/// Returns the first id whose extent contains `scroll_y + offset`. Sections
/// the layout cannot measure are skipped.
pub fn compute_active<'a, L>(
    ids: &'a [SectionId],
    offset_px: u32,
    scroll_y: u32,
    layout: &L,
) -> Option<&'a SectionId>
where
    L: SectionLayout + ?Sized,
{
    let reading_line = scroll_y.saturating_add(offset_px);
    ids.iter().find(|id| {
        layout
            .extent(id)
            .is_some_and(|extent| extent.contains(reading_line))
    })
}

/// Stateful scroll-spy for one page.
///
/// The active id starts empty and only changes when some section matches;
/// a tick with no match keeps the previous value.
#[derive(Debug)]
pub struct ScrollSpy {
    ids: Vec<SectionId>,
    offset_px: u32,
    active: Option<SectionId>,
    scroll_listener: Option<ListenerGuard>,
}

impl ScrollSpy {
    /// Create a spy over `ids` (page order). Ids must be unique.
    pub fn new<I, S>(ids: I, offset_px: u32) -> Result<Self, ScrollSpyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut section_ids = Vec::new();
        for raw in ids {
            let id = SectionId::new(raw)?;
            if !seen.insert(id.clone()) {
                return Err(ScrollSpyError::DuplicateSection(id.0));
            }
            section_ids.push(id);
        }
        Ok(Self {
            ids: section_ids,
            offset_px,
            active: None,
            scroll_listener: None,
        })
    }

    /// Subscribe to scroll events. Attaching twice is a no-op.
    pub fn attach(&mut self, host: &EventHost) {
        if self.scroll_listener.is_none() {
            self.scroll_listener = host.listen(EventKind::Scroll);
        }
    }

    /// Handle one scroll tick. Ignored unless attached.
    pub fn on_scroll<L>(&mut self, scroll_y: u32, layout: &L) -> Option<&SectionId>
    where
        L: SectionLayout + ?Sized,
    {
        if self.scroll_listener.is_some() {
            if let Some(hit) = compute_active(&self.ids, self.offset_px, scroll_y, layout) {
                if self.active.as_ref() != Some(hit) {
                    debug!(section = %hit, scroll_y, "active section changed");
                    self.active = Some(hit.clone());
                }
            }
        }
        self.active.as_ref()
    }

    /// Last matched section, retained past the ends of the list.
    pub fn active(&self) -> Option<&SectionId> {
        self.active.as_ref()
    }

    /// Observed sections in page order.
    pub fn ids(&self) -> &[SectionId] {
        &self.ids
    }

    /// Reading line distance below the viewport top.
    pub fn offset(&self) -> u32 {
        self.offset_px
    }

    /// Whether scroll events are being received.
    pub fn is_attached(&self) -> bool {
        self.scroll_listener.is_some()
    }

    /// Stop listening. The last active id is kept. Idempotent.
    pub fn teardown(&mut self) {
        self.scroll_listener = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Sections(HashMap<String, SectionExtent>);

    impl SectionLayout for Sections {
        fn extent(&self, id: &SectionId) -> Option<SectionExtent> {
            self.0.get(id.as_str()).copied()
        }
    }

    fn layout(sections: &[(&str, u32, u32)]) -> Sections {
        Sections(
            sections
                .iter()
                .map(|(id, top, height)| (id.to_string(), SectionExtent::new(*top, *height)))
                .collect(),
        )
    }

    fn attached_spy(ids: &[&str], offset: u32) -> (EventHost, ScrollSpy) {
        let host = EventHost::default();
        let mut spy = ScrollSpy::new(ids.iter().copied(), offset).unwrap();
        spy.attach(&host);
        (host, spy)
    }

    #[test]
    fn picks_section_under_reading_line() {
        let sections = layout(&[("a", 0, 100), ("b", 100, 100)]);
        let (_host, mut spy) = attached_spy(&["a", "b"], 0);

        assert_eq!(spy.on_scroll(50, &sections).map(SectionId::as_str), Some("a"));
        assert_eq!(spy.on_scroll(150, &sections).map(SectionId::as_str), Some("b"));
    }

    #[test]
    fn no_match_retains_previous_active() {
        let sections = layout(&[("a", 0, 100), ("b", 100, 100)]);
        let (_host, mut spy) = attached_spy(&["a", "b"], 0);

        spy.on_scroll(150, &sections);
        assert_eq!(spy.on_scroll(1000, &sections).map(SectionId::as_str), Some("b"));
    }

    #[test]
    fn starts_empty_until_a_boundary_is_crossed() {
        let sections = layout(&[("a", 500, 100)]);
        let (_host, mut spy) = attached_spy(&["a"], 0);
        assert_eq!(spy.active(), None);
        assert_eq!(spy.on_scroll(10, &sections), None);
    }

    #[test]
    fn offset_moves_the_reading_line() {
        let sections = layout(&[("a", 0, 200), ("b", 200, 200)]);
        let (_host, mut spy) = attached_spy(&["a", "b"], DEFAULT_SPY_OFFSET_PX);
        // 60 + 150 = 210 lands in b.
        assert_eq!(spy.on_scroll(60, &sections).map(SectionId::as_str), Some("b"));
    }

    #[test]
    fn bottom_edge_is_exclusive() {
        let sections = layout(&[("a", 0, 100), ("b", 100, 100)]);
        let (_host, mut spy) = attached_spy(&["a", "b"], 0);
        assert_eq!(spy.on_scroll(99, &sections).map(SectionId::as_str), Some("a"));
        assert_eq!(spy.on_scroll(100, &sections).map(SectionId::as_str), Some("b"));
    }

    #[test]
    fn overlapping_sections_prefer_input_order() {
        let sections = layout(&[("late", 0, 300), ("early", 50, 100)]);
        let (_host, mut spy) = attached_spy(&["early", "late"], 0);
        assert_eq!(spy.on_scroll(60, &sections).map(SectionId::as_str), Some("early"));
    }

    #[test]
    fn unmeasurable_sections_are_skipped() {
        let sections = layout(&[("b", 0, 100)]);
        let (_host, mut spy) = attached_spy(&["a", "b"], 0);
        assert_eq!(spy.on_scroll(10, &sections).map(SectionId::as_str), Some("b"));
    }

    #[test]
    fn closures_work_as_layouts() {
        let (_host, mut spy) = attached_spy(&["only"], 0);
        let lookup = |_: &SectionId| Some(SectionExtent::new(0, 10));
        assert_eq!(spy.on_scroll(5, &lookup).map(SectionId::as_str), Some("only"));
    }

    #[test]
    fn duplicate_and_empty_ids_are_rejected() {
        assert_eq!(
            ScrollSpy::new(["a", "b", "a"], 0).unwrap_err(),
            ScrollSpyError::DuplicateSection("a".to_string())
        );
        assert_eq!(ScrollSpy::new(["a", ""], 0).unwrap_err(), ScrollSpyError::EmptyId);
    }

    #[test]
    fn detached_spy_ignores_ticks_and_releases_listener() {
        let sections = layout(&[("a", 0, 100)]);
        let (host, mut spy) = attached_spy(&["a"], 0);
        assert_eq!(host.registry().active(EventKind::Scroll), 1);
        spy.teardown();
        assert_eq!(host.registry().active(EventKind::Scroll), 0);
        assert_eq!(spy.on_scroll(10, &sections), None);
    }

    #[test]
    fn scroll_near_u32_max_does_not_overflow() {
        let sections = layout(&[("a", u32::MAX - 10, 10)]);
        let (_host, mut spy) = attached_spy(&["a"], DEFAULT_SPY_OFFSET_PX);
        assert_eq!(spy.on_scroll(u32::MAX, &sections), None);
    }
}
