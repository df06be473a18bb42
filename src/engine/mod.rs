//! Host-agnostic UI state engine.
//!
//! Every component here is a synchronous state machine driven by host
//! events. Subscriptions and the scroll lock are guard objects, so dropping a
//! component is always a complete teardown.

pub mod drawer;
pub mod header;
pub mod layout_selector;
pub mod listeners;
pub mod scroll_lock;
pub mod scroll_spy;
pub mod viewport;
pub mod visibility;

pub use drawer::{stagger_delay, DrawerController, DrawerPhase};
pub use header::{DesktopNav, HeaderState, HeaderSummary, MobileHeader};
pub use layout_selector::{select_layout, HeaderVariant, LayoutSelector, LayoutVariant, RenderDecision};
pub use listeners::{EventHost, EventKind, HostCapabilities, ListenerGuard, ListenerRegistry};
pub use scroll_lock::{DocumentScrollLock, ScrollLockError, ScrollLockStats};
pub use scroll_spy::{
    compute_active, ScrollSpy, ScrollSpyError, SectionExtent, SectionId, SectionLayout,
    DEFAULT_SPY_OFFSET_PX,
};
pub use viewport::ViewportClassifier;
pub use visibility::{
    InvalidThreshold, ObserverPhase, RevealMode, RevealMotion, RevealStyle, Threshold,
    VisibilityObserver, VisibilityOptions,
};
