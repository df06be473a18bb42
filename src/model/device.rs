//! Device class and mount state.
//!
//! Both are derived values: nothing here is stored across reloads.

use serde::Serialize;

/// Width (in logical pixels) at which the layout switches from mobile to desktop.
///
/// Widths strictly below the breakpoint are mobile; the breakpoint itself is desktop.
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

/// Coarse responsive-layout bucket derived from viewport width.
///
/// Exactly one value holds at any instant. Recomputed on every resize
/// and once at mount, never cached across mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    /// Narrow viewport: mobile landing layout, hamburger header, drawer menu.
    Mobile,
    /// Wide viewport: desktop landing layout, inline navigation with dropdown.
    ///
    /// Also the fallback when the viewport cannot be measured.
    #[default]
    Desktop,
}

impl DeviceClass {
    /// Classify a viewport width against the standard 768px breakpoint.
    pub fn classify(width_px: u32) -> Self {
        Self::classify_with(width_px, MOBILE_BREAKPOINT_PX)
    }

    /// Classify a viewport width against an explicit breakpoint.
    pub fn classify_with(width_px: u32, breakpoint_px: u32) -> Self {
        if width_px < breakpoint_px {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    /// Short lowercase label for status bars and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
        }
    }
}

/// Whether the first viewport measurement has happened.
///
/// While `Unmounted` the device class is unknown and no device-specific
/// layout may be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MountState {
    /// No measurement yet (pre-measurement or unmeasurable host).
    #[default]
    Unmounted,
    /// At least one measurement has been taken.
    Mounted,
}

impl MountState {
    /// True after the first measurement.
    pub fn is_mounted(&self) -> bool {
        matches!(self, Self::Mounted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_below_breakpoint_is_mobile() {
        assert_eq!(DeviceClass::classify(0), DeviceClass::Mobile);
        assert_eq!(DeviceClass::classify(500), DeviceClass::Mobile);
        assert_eq!(DeviceClass::classify(767), DeviceClass::Mobile);
    }

    #[test]
    fn breakpoint_itself_is_desktop() {
        assert_eq!(DeviceClass::classify(768), DeviceClass::Desktop);
    }

    #[test]
    fn wide_widths_are_desktop() {
        assert_eq!(DeviceClass::classify(1024), DeviceClass::Desktop);
        assert_eq!(DeviceClass::classify(u32::MAX), DeviceClass::Desktop);
    }

    #[test]
    fn custom_breakpoint_is_respected() {
        assert_eq!(DeviceClass::classify_with(900, 1000), DeviceClass::Mobile);
        assert_eq!(DeviceClass::classify_with(1000, 1000), DeviceClass::Desktop);
    }

    #[test]
    fn defaults_are_desktop_and_unmounted() {
        assert_eq!(DeviceClass::default(), DeviceClass::Desktop);
        assert_eq!(MountState::default(), MountState::Unmounted);
        assert!(!MountState::default().is_mounted());
    }
}
