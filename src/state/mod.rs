//! UI state (pure).
//!
//! The session composes the engine components for one mounted site; the key
//! handler maps user intent onto it. Nothing here touches the terminal.

pub mod key_handler;
pub mod page;
pub mod session;

// Re-export for convenience
pub use key_handler::{handle_key_action, KeyOutcome, ScrollContext, VIEWPORT_STEP_PX};
pub use page::{region_specs, PageState, RegionSnapshot, RegionSpec, RevealRegion};
pub use session::{
    ClickTarget, ListenerCounts, NavigationOutcome, SessionOptions, SessionSnapshot, SiteSession,
};
