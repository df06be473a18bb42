//! Layout selection.
//!
//! Maps (mount state, device class) to what the site renders. The selection
//! itself is a pure function; [`LayoutSelector`] only pairs it with the
//! classifier that feeds it.

use super::listeners::EventHost;
use super::viewport::ViewportClassifier;
use crate::model::{DeviceClass, MountState};
use serde::Serialize;
use tracing::info;

/// Page body variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutVariant {
    /// Single column, stacked cards.
    Mobile,
    /// Multi-column body.
    Desktop,
}

/// Header variant rendered above the page body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderVariant {
    /// Hamburger header with drawer.
    Mobile,
    /// Inline nav with dropdown.
    Desktop,
}

/// What to draw for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderDecision {
    /// Neutral placeholder while the viewport is unmeasured.
    Loading,
    /// A measured viewport.
    Layout {
        /// Body variant.
        layout: LayoutVariant,
        /// Header variant.
        header: HeaderVariant,
    },
}

impl RenderDecision {
    /// Body variant, or `None` while loading.
    pub fn layout(&self) -> Option<LayoutVariant> {
        match self {
            Self::Loading => None,
            Self::Layout { layout, .. } => Some(*layout),
        }
    }

    /// Header variant, or `None` while loading.
    pub fn header(&self) -> Option<HeaderVariant> {
        match self {
            Self::Loading => None,
            Self::Layout { header, .. } => Some(*header),
        }
    }
}

/// Pure layout decision. No hysteresis: only the inputs matter.
pub fn select_layout(mount: MountState, device: DeviceClass) -> RenderDecision {
    match (mount, device) {
        (MountState::Unmounted, _) => RenderDecision::Loading,
        (MountState::Mounted, DeviceClass::Mobile) => RenderDecision::Layout {
            layout: LayoutVariant::Mobile,
            header: HeaderVariant::Mobile,
        },
        (MountState::Mounted, DeviceClass::Desktop) => RenderDecision::Layout {
            layout: LayoutVariant::Desktop,
            header: HeaderVariant::Desktop,
        },
    }
}

/// Classifier plus the decision derived from it.
#[derive(Debug)]
pub struct LayoutSelector {
    classifier: ViewportClassifier,
}

impl LayoutSelector {
    /// Mount a classifier on `host`, measured when `initial_width` is known.
    pub fn mount(host: &EventHost, initial_width: Option<u32>) -> Self {
        let selector = Self {
            classifier: ViewportClassifier::mount(host, initial_width),
        };
        info!(decision = ?selector.decision(), "layout selector mounted");
        selector
    }

    /// Feed a resize. Returns the new decision when it changed.
    pub fn on_resize(&mut self, width_px: u32) -> Option<RenderDecision> {
        let before = self.decision();
        self.classifier.on_resize(width_px);
        let after = self.decision();
        if before == after {
            return None;
        }
        info!(?before, ?after, width_px, "layout switched");
        Some(after)
    }

    /// Decision for the latest measurement.
    pub fn decision(&self) -> RenderDecision {
        select_layout(self.classifier.mount_state(), self.classifier.device_class())
    }

    /// The underlying viewport classifier.
    pub fn classifier(&self) -> &ViewportClassifier {
        &self.classifier
    }

    /// Stop listening for resizes. Idempotent.
    pub fn teardown(&mut self) {
        self.classifier.teardown();
    }
}
