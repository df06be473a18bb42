//! Viewport classification.
//!
//! Turns viewport widths into a [`DeviceClass`] and tracks whether the first
//! measurement has happened.

use super::listeners::{EventHost, EventKind, ListenerGuard};
use crate::model::{DeviceClass, MountState, MOBILE_BREAKPOINT_PX};
use tracing::{debug, warn};

/// Classifies the viewport on mount and on every resize.
///
/// # Lifecycle
///
/// - `mount` takes the initial measurement (if the host can measure) and
///   subscribes to resize events (if the host delivers them).
/// - `on_resize` reclassifies synchronously. On an unmeasured classifier the
///   first resize doubles as the first measurement.
/// - `teardown` (or drop) releases the resize listener.
///
/// A host that cannot measure leaves the classifier `Unmounted` for good;
/// `device_class` then reports the desktop default so callers never block.
#[derive(Debug)]
pub struct ViewportClassifier {
    breakpoint_px: u32,
    width_px: Option<u32>,
    resize_listener: Option<ListenerGuard>,
}

impl ViewportClassifier {
    /// Mount against `host`. `initial_width` is the first measurement, if any.
    pub fn mount(host: &EventHost, initial_width: Option<u32>) -> Self {
        Self::mount_with_breakpoint(host, initial_width, MOBILE_BREAKPOINT_PX)
    }

    /// Mount with a non-standard breakpoint.
    pub fn mount_with_breakpoint(
        host: &EventHost,
        initial_width: Option<u32>,
        breakpoint_px: u32,
    ) -> Self {
        let caps = host.capabilities();
        let width_px = if caps.measure_viewport {
            initial_width
        } else {
            if initial_width.is_some() {
                warn!("Host cannot measure the viewport; ignoring initial width");
            }
            None
        };
        let resize_listener = host.listen(EventKind::Resize);
        if resize_listener.is_none() {
            warn!("Host delivers no resize events; device class is fixed at mount");
        }
        debug!(?width_px, breakpoint_px, "viewport classifier mounted");
        Self {
            breakpoint_px,
            width_px,
            resize_listener,
        }
    }

    /// Handle a resize. Returns the new class when it changed.
    ///
    /// The first measurement on an unmounted classifier always reports a change.
    /// Ignored after teardown.
    pub fn on_resize(&mut self, width_px: u32) -> Option<DeviceClass> {
        self.resize_listener.as_ref()?;
        let before = self.width_px.map(|w| self.classify(w));
        self.width_px = Some(width_px);
        let after = self.classify(width_px);
        (before != Some(after)).then_some(after)
    }

    /// Current class; the desktop default while unmounted.
    pub fn device_class(&self) -> DeviceClass {
        self.width_px
            .map(|w| self.classify(w))
            .unwrap_or_default()
    }

    /// Mounted once any width has been measured.
    pub fn mount_state(&self) -> MountState {
        if self.width_px.is_some() {
            MountState::Mounted
        } else {
            MountState::Unmounted
        }
    }

    /// Last measured width.
    pub fn width(&self) -> Option<u32> {
        self.width_px
    }

    /// Width at which the class flips to desktop.
    pub fn breakpoint(&self) -> u32 {
        self.breakpoint_px
    }

    /// Whether resize events are still being received.
    pub fn is_listening(&self) -> bool {
        self.resize_listener.is_some()
    }

    /// Stop listening for resizes. Idempotent.
    pub fn teardown(&mut self) {
        self.resize_listener = None;
    }

    fn classify(&self, width_px: u32) -> DeviceClass {
        DeviceClass::classify_with(width_px, self.breakpoint_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::listeners::HostCapabilities;

    #[test]
    fn mount_with_width_is_mounted_and_classified() {
        let host = EventHost::default();
        let classifier = ViewportClassifier::mount(&host, Some(1024));
        assert_eq!(classifier.mount_state(), MountState::Mounted);
        assert_eq!(classifier.device_class(), DeviceClass::Desktop);
        assert_eq!(host.registry().active(EventKind::Resize), 1);
    }

    #[test]
    fn mount_without_width_stays_unmounted_until_first_resize() {
        let host = EventHost::default();
        let mut classifier = ViewportClassifier::mount(&host, None);
        assert_eq!(classifier.mount_state(), MountState::Unmounted);

        assert_eq!(classifier.on_resize(500), Some(DeviceClass::Mobile));
        assert_eq!(classifier.mount_state(), MountState::Mounted);
    }

    #[test]
    fn resize_reports_only_class_changes() {
        let host = EventHost::default();
        let mut classifier = ViewportClassifier::mount(&host, Some(1024));
        assert_eq!(classifier.on_resize(900), None);
        assert_eq!(classifier.on_resize(767), Some(DeviceClass::Mobile));
        assert_eq!(classifier.on_resize(700), None);
        assert_eq!(classifier.on_resize(768), Some(DeviceClass::Desktop));
        assert_eq!(classifier.width(), Some(768));
    }

    #[test]
    fn unmeasurable_host_defers_classification_indefinitely() {
        let host = EventHost::new(HostCapabilities::NONE);
        let mut classifier = ViewportClassifier::mount(&host, Some(500));
        assert_eq!(classifier.mount_state(), MountState::Unmounted);
        assert_eq!(classifier.device_class(), DeviceClass::Desktop);
        // No resize listener, so resizes cannot mount it either.
        assert_eq!(classifier.on_resize(500), None);
        assert_eq!(classifier.mount_state(), MountState::Unmounted);
    }

    #[test]
    fn measurable_host_without_resize_events_keeps_initial_class() {
        let caps = HostCapabilities {
            resize_events: false,
            ..HostCapabilities::FULL
        };
        let host = EventHost::new(caps);
        let mut classifier = ViewportClassifier::mount(&host, Some(500));
        assert_eq!(classifier.device_class(), DeviceClass::Mobile);
        assert_eq!(classifier.on_resize(1200), None);
        assert_eq!(classifier.device_class(), DeviceClass::Mobile);
    }

    #[test]
    fn teardown_releases_listener_and_ignores_later_resizes() {
        let host = EventHost::default();
        let mut classifier = ViewportClassifier::mount(&host, Some(1024));
        classifier.teardown();
        classifier.teardown();
        assert_eq!(host.registry().active(EventKind::Resize), 0);
        assert_eq!(classifier.on_resize(300), None);
        assert_eq!(classifier.device_class(), DeviceClass::Desktop);
    }

    #[test]
    fn drop_releases_listener() {
        let host = EventHost::default();
        {
            let _classifier = ViewportClassifier::mount(&host, Some(1024));
            assert_eq!(host.registry().active(EventKind::Resize), 1);
        }
        assert_eq!(host.registry().active(EventKind::Resize), 0);
    }
}
