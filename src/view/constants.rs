//! Layout dimension constants for terminal rendering.
//!
//! Centralized location for layout-related numeric values.

/// Height of the site header in rows (content row + bottom border).
pub const HEADER_HEIGHT: u16 = 2;

/// Height of the status bar in rows.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width of the services navigation column on desktop (borders included).
pub const SERVICES_NAV_WIDTH: u16 = 24;

/// Height of the services navigation strip on mobile.
pub const MOBILE_SERVICES_NAV_HEIGHT: u16 = 1;

/// Percentage of the site width taken by the open drawer panel.
pub const DRAWER_WIDTH_PERCENT: u16 = 80;

/// Columns of the hamburger button at the right edge of the mobile header.
pub const HAMBURGER_WIDTH: u16 = 3;

/// Regions below this opacity are drawn blank.
pub const HIDDEN_OPACITY: f32 = 0.5;
