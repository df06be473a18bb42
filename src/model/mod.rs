//! Domain model types (pure).
//!
//! Routes, menu, device classification and static content. Nothing here
//! touches the terminal or holds per-session state.

pub mod content;
pub mod device;
pub mod error;
pub mod key_action;
pub mod menu;
pub mod region;
pub mod route;

// Re-export for convenience
pub use content::{
    AboutCopy, Brand, Card, CopyBlock, FooterInfo, LandingCopy, LocationInfo, ServiceEntry,
    SiteContent,
};
pub use device::{DeviceClass, MountState, MOBILE_BREAKPOINT_PX};
pub use error::{AppError, ContentError};
pub use key_action::KeyAction;
pub use menu::{Menu, MenuEntry, MenuItem, NavLink};
pub use region::RegionId;
pub use route::{Destination, NavigationIntent, Route, UnknownRoute};
