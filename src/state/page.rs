//! Per-page controllers.
//!
//! A page mounts one [`VisibilityObserver`] per animated region and, on the
//! services page, a [`ScrollSpy`]. Navigating rebuilds everything. A layout
//! switch rebuilds only pages whose regions differ between variants (the
//! landing page); other pages keep their latches and spy.

use crate::engine::{
    EventHost, LayoutVariant, ObserverPhase, RevealMotion, RevealStyle, ScrollSpy,
    ScrollSpyError, SectionId, SectionLayout, Threshold, VisibilityObserver, VisibilityOptions,
};
use crate::model::region::names;
use crate::model::{RegionId, Route, SiteContent};
use serde::Serialize;
use tracing::debug;

/// Static description of one reveal region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSpec {
    /// Region name.
    pub id: RegionId,
    /// Threshold and latch mode.
    pub options: VisibilityOptions,
    /// Hidden-state offset.
    pub motion: RevealMotion,
}

impl RegionSpec {
    fn new(name: &str, options: VisibilityOptions, motion: RevealMotion) -> Self {
        Self {
            id: RegionId::new(name),
            options,
            motion,
        }
    }
}

const FADE_UP: RevealMotion = RevealMotion::FadeUp { distance_px: 30.0 };

/// Reveal regions of `route` in `variant`, in page order.
///
/// The landing hero follows the viewport continuously so it replays when
/// scrolled back to; every other region reveals once.
pub fn region_specs(route: Route, variant: LayoutVariant, content: &SiteContent) -> Vec<RegionSpec> {
    let once = VisibilityOptions::once(Threshold::DEFAULT);
    let hero = VisibilityOptions::continuous(Threshold::DEFAULT);
    match (route, variant) {
        (Route::Home, LayoutVariant::Desktop) => vec![
            RegionSpec::new(names::HERO, hero, FADE_UP),
            RegionSpec::new(names::SERVICES, once, FADE_UP),
            RegionSpec::new(names::PROCESS, once, FADE_UP),
        ],
        (Route::Home, LayoutVariant::Mobile) => vec![
            RegionSpec::new(names::HERO, hero, FADE_UP),
            RegionSpec::new(
                names::SERVICES,
                once,
                RevealMotion::SlideIn { distance_px: -20.0 },
            ),
            RegionSpec::new(names::ABOUT, once, FADE_UP),
            RegionSpec::new(names::PROCESS, once, FADE_UP),
            RegionSpec::new(names::CTA, once, RevealMotion::Grow { from: 0.9 }),
        ],
        (Route::About, _) => {
            let loose = VisibilityOptions::once(Threshold::LOOSE);
            vec![
                RegionSpec::new(names::HERO, loose, RevealMotion::FadeUp { distance_px: 40.0 }),
                RegionSpec::new(names::CARD, loose, RevealMotion::FadeUp { distance_px: 60.0 }),
            ]
        }
        (Route::Services, _) => content
            .services
            .iter()
            .map(|service| RegionSpec {
                id: RegionId::service(&service.id),
                options: once,
                motion: FADE_UP,
            })
            .collect(),
        (Route::Location, _) => Vec::new(),
    }
}

/// A mounted reveal region.
#[derive(Debug)]
pub struct RevealRegion {
    /// Region name.
    pub id: RegionId,
    /// Hidden-state offset.
    pub motion: RevealMotion,
    observer: VisibilityObserver,
}

impl RevealRegion {
    /// Whether the region has been revealed.
    pub fn is_visible(&self) -> bool {
        self.observer.is_visible()
    }

    /// Observer lifecycle phase.
    pub fn phase(&self) -> ObserverPhase {
        self.observer.phase()
    }

    /// Style at the current latch value.
    pub fn style(&self) -> RevealStyle {
        self.observer.reveal_style(self.motion)
    }

    /// The observer driving this region.
    pub fn observer(&self) -> &VisibilityObserver {
        &self.observer
    }
}

/// Controllers mounted for the current page.
#[derive(Debug)]
pub struct PageState {
    route: Route,
    /// Variant the regions were built for; `None` while unmounted.
    variant: Option<LayoutVariant>,
    regions: Vec<RevealRegion>,
    spy: Option<ScrollSpy>,
}

impl PageState {
    /// Page with nothing mounted (while the layout is still loading).
    pub fn unmounted(route: Route) -> Self {
        Self {
            route,
            variant: None,
            regions: Vec::new(),
            spy: None,
        }
    }

    /// Mount `route` in `variant` against `host`.
    pub fn mount(
        host: &EventHost,
        route: Route,
        variant: LayoutVariant,
        content: &SiteContent,
        spy_offset_px: u32,
    ) -> Result<Self, ScrollSpyError> {
        let regions = region_specs(route, variant, content)
            .into_iter()
            .map(|spec| {
                let mut observer = VisibilityObserver::new(spec.options);
                observer.attach(host);
                RevealRegion {
                    id: spec.id,
                    motion: spec.motion,
                    observer,
                }
            })
            .collect::<Vec<_>>();

        let spy = match route {
            Route::Services => {
                let mut spy = ScrollSpy::new(content.service_ids(), spy_offset_px)?;
                spy.attach(host);
                Some(spy)
            }
            _ => None,
        };

        debug!(%route, ?variant, regions = regions.len(), spy = spy.is_some(), "page mounted");
        Ok(Self {
            route,
            variant: Some(variant),
            regions,
            spy,
        })
    }

    /// Current route.
    pub fn route(&self) -> Route {
        self.route
    }

    /// Layout variant the page was mounted for.
    pub fn variant(&self) -> Option<LayoutVariant> {
        self.variant
    }

    /// Whether this page can stay mounted across a switch to `variant`.
    ///
    /// True when the page is mounted and its regions are the same in both
    /// variants. The spy depends only on the route.
    pub fn survives_switch(&self, variant: LayoutVariant, content: &SiteContent) -> bool {
        match self.variant {
            Some(current) if current == variant => true,
            Some(current) => {
                region_specs(self.route, current, content)
                    == region_specs(self.route, variant, content)
            }
            None => false,
        }
    }

    /// Record that the mounted controllers now serve `variant`.
    pub(crate) fn carry_over(&mut self, variant: LayoutVariant) {
        debug!(route = %self.route, ?variant, "page kept across layout switch");
        self.variant = Some(variant);
    }

    /// Regions in page order.
    pub fn regions(&self) -> &[RevealRegion] {
        &self.regions
    }

    /// Region named `id`.
    pub fn region(&self, id: &RegionId) -> Option<&RevealRegion> {
        self.regions.iter().find(|r| &r.id == id)
    }

    /// Deliver an intersection ratio to one region. Returns true when its latch changed.
    pub fn intersect(&mut self, id: &RegionId, ratio: f64) -> bool {
        self.regions
            .iter_mut()
            .find(|r| &r.id == id)
            .is_some_and(|r| r.observer.on_intersection(ratio))
    }

    /// Deliver a scroll tick to the spy, if this page has one.
    pub fn on_scroll(&mut self, scroll_y: u32, layout: &dyn SectionLayout) {
        if let Some(spy) = self.spy.as_mut() {
            spy.on_scroll(scroll_y, layout);
        }
    }

    /// Services scroll spy; only the services page has one.
    pub fn spy(&self) -> Option<&ScrollSpy> {
        self.spy.as_ref()
    }

    /// Section the spy currently highlights.
    pub fn active_section(&self) -> Option<&SectionId> {
        self.spy.as_ref().and_then(ScrollSpy::active)
    }

    /// Stop every observer and the spy. Latches keep their values.
    pub fn teardown(&mut self) {
        for region in &mut self.regions {
            region.observer.teardown();
        }
        if let Some(spy) = self.spy.as_mut() {
            spy.teardown();
        }
    }
}

/// Serializable view of one region for snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSnapshot {
    /// Region name.
    pub id: RegionId,
    /// Latch value.
    pub visible: bool,
    /// Observer phase.
    pub phase: ObserverPhase,
    /// Resolved style.
    pub style: RevealStyle,
}

impl From<&RevealRegion> for RegionSnapshot {
    fn from(region: &RevealRegion) -> Self {
        Self {
            id: region.id.clone(),
            visible: region.is_visible(),
            phase: region.phase(),
            style: region.style(),
        }
    }
}
