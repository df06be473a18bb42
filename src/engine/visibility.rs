//! Reveal-on-scroll visibility tracking.
//!
//! One reusable observer per animated region, parameterized by a threshold
//! and a reveal mode. The observer only produces a boolean latch; turning it
//! into opacity and offsets is [`RevealMotion::style`]'s job.

use super::listeners::{EventHost, EventKind, ListenerGuard};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Fraction of a region's area that must be inside the viewport to count as seen.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Threshold(f64);

/// Error returned for thresholds outside `[0.0, 1.0]` or not finite.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("visibility threshold must be a finite fraction in [0, 1] (got {0})")]
pub struct InvalidThreshold(pub f64);

impl Threshold {
    /// Threshold used by most content regions.
    pub const DEFAULT: Self = Self(0.2);

    /// Looser threshold used on the about page, whose regions are tall.
    pub const LOOSE: Self = Self(0.1);

    /// Threshold at `fraction` of the element visible. Must lie in `0.0..=1.0`.
    pub fn new(fraction: f64) -> Result<Self, InvalidThreshold> {
        if fraction.is_finite() && (0.0..=1.0).contains(&fraction) {
            Ok(Self(fraction))
        } else {
            Err(InvalidThreshold(fraction))
        }
    }

    /// The fraction.
    pub fn get(&self) -> f64 {
        self.0
    }

    /// Whether an intersection ratio counts as "in view".
    ///
    /// A ratio of zero never counts, even for a zero threshold: the region
    /// must actually overlap the viewport.
    pub fn is_met_by(&self, ratio: f64) -> bool {
        ratio > 0.0 && ratio >= self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// How the latch behaves after the first reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealMode {
    /// Latch once, then stop observing. Content reveals once per mount.
    #[default]
    Once,
    /// Keep observing; the latch follows the current intersection state so
    /// the animation replays when the region comes back.
    Continuous,
}

/// Per-instance observer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct VisibilityOptions {
    /// Minimum visible ratio that counts as visible.
    pub threshold: Threshold,
    /// Latch once or follow every change.
    pub mode: RevealMode,
}

impl VisibilityOptions {
    /// Latch visible the first time the threshold is met.
    pub fn once(threshold: Threshold) -> Self {
        Self {
            threshold,
            mode: RevealMode::Once,
        }
    }

    /// Follow the threshold both ways, replaying on re-entry.
    pub fn continuous(threshold: Threshold) -> Self {
        Self {
            threshold,
            mode: RevealMode::Continuous,
        }
    }
}

/// Where an observer is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObserverPhase {
    /// Target not attached yet; events are ignored.
    Detached,
    /// Receiving intersection events.
    Observing,
    /// One-shot latch fired; no longer observing.
    Latched,
    /// Host has no intersection capability; latch forced visible.
    Static,
    /// Torn down; events are ignored.
    Stopped,
}

/// Visibility latch for one region.
#[derive(Debug)]
pub struct VisibilityObserver {
    options: VisibilityOptions,
    visible: bool,
    phase: ObserverPhase,
    listener: Option<ListenerGuard>,
}

impl VisibilityObserver {
    /// A detached, hidden observer.
    pub fn new(options: VisibilityOptions) -> Self {
        Self {
            options,
            visible: false,
            phase: ObserverPhase::Detached,
            listener: None,
        }
    }

    /// Start observing now that the target region exists.
    ///
    /// On a host without intersection support the latch is set immediately
    /// and never changes. Attaching twice is a no-op.
    pub fn attach(&mut self, host: &EventHost) {
        if self.phase != ObserverPhase::Detached {
            return;
        }
        match host.listen(EventKind::Intersection) {
            Some(guard) => {
                self.listener = Some(guard);
                self.phase = ObserverPhase::Observing;
            }
            None => {
                warn!("No intersection support; revealing region statically");
                self.visible = true;
                self.phase = ObserverPhase::Static;
            }
        }
    }

    /// Feed one intersection ratio. Returns true when the latch changed.
    pub fn on_intersection(&mut self, ratio: f64) -> bool {
        if self.phase != ObserverPhase::Observing {
            return false;
        }
        let in_view = self.options.threshold.is_met_by(ratio);
        match self.options.mode {
            RevealMode::Once => {
                if !in_view {
                    return false;
                }
                self.visible = true;
                self.listener = None;
                self.phase = ObserverPhase::Latched;
                debug!(ratio, "one-shot region revealed");
                true
            }
            RevealMode::Continuous => {
                let changed = in_view != self.visible;
                self.visible = in_view;
                changed
            }
        }
    }

    /// Current latch value.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> ObserverPhase {
        self.phase
    }

    /// Style for `motion` at the current latch value.
    pub fn reveal_style(&self, motion: RevealMotion) -> RevealStyle {
        motion.style(self.visible)
    }

    /// Options the observer was built with.
    pub fn options(&self) -> VisibilityOptions {
        self.options
    }

    /// Stop observing. The latch keeps its value. Idempotent.
    pub fn teardown(&mut self) {
        self.listener = None;
        if matches!(self.phase, ObserverPhase::Detached | ObserverPhase::Observing) {
            self.phase = ObserverPhase::Stopped;
        }
    }
}

/// Plain style values handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevealStyle {
    /// 0.0 hidden, 1.0 fully shown.
    pub opacity: f32,
    /// Horizontal offset.
    pub translate_x_px: f32,
    /// Vertical offset.
    pub translate_y_px: f32,
    /// Scale factor, 1.0 at rest.
    pub scale: f32,
}

impl RevealStyle {
    /// Fully revealed, untransformed.
    pub const SHOWN: Self = Self {
        opacity: 1.0,
        translate_x_px: 0.0,
        translate_y_px: 0.0,
        scale: 1.0,
    };
}

/// The hidden pose a region animates from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RevealMotion {
    /// Fade in while rising by `distance_px`.
    FadeUp {
        /// Rise distance in pixels.
        distance_px: f32,
    },
    /// Fade in while sliding left by `distance_px`.
    SlideIn {
        /// Slide distance in pixels.
        distance_px: f32,
    },
    /// Fade in while growing from `from` to full size.
    Grow {
        /// Starting scale factor.
        from: f32,
    },
}

impl RevealMotion {
    /// Style for the given latch value.
    pub fn style(&self, visible: bool) -> RevealStyle {
        if visible {
            return RevealStyle::SHOWN;
        }
        let hidden = RevealStyle {
            opacity: 0.0,
            ..RevealStyle::SHOWN
        };
        match *self {
            Self::FadeUp { distance_px } => RevealStyle {
                translate_y_px: distance_px,
                ..hidden
            },
            Self::SlideIn { distance_px } => RevealStyle {
                translate_x_px: distance_px,
                ..hidden
            },
            Self::Grow { from } => RevealStyle {
                scale: from,
                ..hidden
            },
        }
    }
}

impl Default for RevealMotion {
    fn default() -> Self {
        Self::FadeUp { distance_px: 40.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::listeners::HostCapabilities;

    fn attached(options: VisibilityOptions) -> (EventHost, VisibilityObserver) {
        let host = EventHost::default();
        let mut observer = VisibilityObserver::new(options);
        observer.attach(&host);
        (host, observer)
    }

    #[test]
    fn threshold_rejects_out_of_range_values() {
        assert!(Threshold::new(-0.1).is_err());
        assert!(Threshold::new(1.01).is_err());
        assert!(Threshold::new(f64::NAN).is_err());
        assert_eq!(Threshold::new(0.0).map(|t| t.get()), Ok(0.0));
        assert_eq!(Threshold::new(1.0).map(|t| t.get()), Ok(1.0));
    }

    #[test]
    fn zero_ratio_never_meets_a_threshold() {
        let zero = Threshold::new(0.0).unwrap();
        assert!(!zero.is_met_by(0.0));
        assert!(zero.is_met_by(0.01));
    }

    #[test]
    fn events_before_attach_are_ignored() {
        let mut observer = VisibilityObserver::new(VisibilityOptions::default());
        assert!(!observer.on_intersection(1.0));
        assert!(!observer.is_visible());
        assert_eq!(observer.phase(), ObserverPhase::Detached);
    }

    #[test]
    fn once_latches_at_threshold_and_stops_observing() {
        let (host, mut observer) = attached(VisibilityOptions::once(Threshold::DEFAULT));
        assert_eq!(host.registry().active(EventKind::Intersection), 1);

        assert!(!observer.on_intersection(0.19));
        assert!(observer.on_intersection(0.2));
        assert!(observer.is_visible());
        assert_eq!(observer.phase(), ObserverPhase::Latched);
        assert_eq!(host.registry().active(EventKind::Intersection), 0);

        assert!(!observer.on_intersection(0.0));
        assert!(!observer.on_intersection(0.9));
        assert!(observer.is_visible());
    }

    #[test]
    fn continuous_follows_current_state() {
        let (_host, mut observer) = attached(VisibilityOptions::continuous(Threshold::DEFAULT));
        assert!(observer.on_intersection(0.5));
        assert!(!observer.on_intersection(0.6));
        assert!(observer.on_intersection(0.05));
        assert!(!observer.is_visible());
        assert!(!observer.on_intersection(0.0));
        assert_eq!(observer.phase(), ObserverPhase::Observing);
    }

    #[test]
    fn missing_intersection_capability_reveals_statically() {
        let host = EventHost::new(HostCapabilities::FULL.without_intersection());
        let mut observer = VisibilityObserver::new(VisibilityOptions::default());
        observer.attach(&host);
        assert!(observer.is_visible());
        assert_eq!(observer.phase(), ObserverPhase::Static);
        assert!(!observer.on_intersection(0.0));
        assert!(observer.is_visible());
    }

    #[test]
    fn teardown_stops_observing_and_keeps_latch() {
        let (host, mut observer) = attached(VisibilityOptions::continuous(Threshold::DEFAULT));
        observer.on_intersection(1.0);
        observer.teardown();
        assert_eq!(host.registry().active(EventKind::Intersection), 0);
        assert_eq!(observer.phase(), ObserverPhase::Stopped);
        assert!(!observer.on_intersection(0.0));
        assert!(observer.is_visible());
    }

    #[test]
    fn attach_twice_registers_once() {
        let (host, mut observer) = attached(VisibilityOptions::default());
        observer.attach(&host);
        assert_eq!(host.registry().active(EventKind::Intersection), 1);
    }

    #[test]
    fn motion_styles_hidden_and_shown_poses() {
        let fade = RevealMotion::FadeUp { distance_px: 30.0 };
        assert_eq!(fade.style(true), RevealStyle::SHOWN);
        let hidden = fade.style(false);
        assert_eq!(hidden.opacity, 0.0);
        assert_eq!(hidden.translate_y_px, 30.0);
        assert_eq!(hidden.translate_x_px, 0.0);

        let slide = RevealMotion::SlideIn { distance_px: 20.0 }.style(false);
        assert_eq!(slide.translate_x_px, 20.0);

        let grow = RevealMotion::Grow { from: 0.95 }.style(false);
        assert_eq!(grow.scale, 0.95);
    }
}
