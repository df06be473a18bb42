//! Property-based tests for engine invariants.
//!
//! Tests validate:
//! 1. Device classification flips exactly at the breakpoint
//! 2. Once latches fire once; continuous latches track the latest ratio
//! 3. Scroll-spy matches the containing section and retains on no match
//! 4. Drawer open/close keeps the scroll lock balanced
//! 5. Layout decisions depend only on the latest width

use pros_site::engine::{
    compute_active, select_layout, DocumentScrollLock, DrawerController, EventHost,
    LayoutSelector, ScrollSpy, SectionExtent, SectionId, Threshold, VisibilityObserver,
    VisibilityOptions,
};
use pros_site::model::{DeviceClass, MountState, MOBILE_BREAKPOINT_PX};
use proptest::prelude::*;

fn two_sections(id: &SectionId) -> Option<SectionExtent> {
    match id.as_str() {
        "a" => Some(SectionExtent::new(0, 100)),
        "b" => Some(SectionExtent::new(100, 100)),
        _ => None,
    }
}

// ===== Property 1: Classification =====

proptest! {
    #[test]
    fn classify_is_mobile_iff_below_breakpoint(width in 0u32..4000) {
        let class = DeviceClass::classify(width);
        prop_assert_eq!(class == DeviceClass::Mobile, width < MOBILE_BREAKPOINT_PX);
    }
}

#[test]
fn breakpoint_itself_is_desktop() {
    assert_eq!(DeviceClass::classify(767), DeviceClass::Mobile);
    assert_eq!(DeviceClass::classify(768), DeviceClass::Desktop);
}

// ===== Property 2: Visibility latches =====

proptest! {
    #[test]
    fn once_latch_fires_at_most_once(ratios in prop::collection::vec(0.0f64..=1.0, 1..50)) {
        let host = EventHost::default();
        let mut observer = VisibilityObserver::new(VisibilityOptions::once(Threshold::DEFAULT));
        observer.attach(&host);

        let changes = ratios.iter().filter(|&&r| observer.on_intersection(r)).count();
        let ever_met = ratios.iter().any(|&r| Threshold::DEFAULT.is_met_by(r));

        prop_assert_eq!(changes, usize::from(ever_met));
        prop_assert_eq!(observer.is_visible(), ever_met);
    }

    #[test]
    fn continuous_latch_tracks_latest_ratio(ratios in prop::collection::vec(0.0f64..=1.0, 1..50)) {
        let host = EventHost::default();
        let mut observer =
            VisibilityObserver::new(VisibilityOptions::continuous(Threshold::DEFAULT));
        observer.attach(&host);

        let mut previous = false;
        for &ratio in &ratios {
            let changed = observer.on_intersection(ratio);
            let now = Threshold::DEFAULT.is_met_by(ratio);
            prop_assert_eq!(observer.is_visible(), now);
            prop_assert_eq!(changed, now != previous);
            previous = now;
        }
    }
}

// ===== Property 3: Scroll-spy =====

proptest! {
    #[test]
    fn active_section_contains_reading_line(y in 0u32..200) {
        let ids = vec![SectionId::new("a").unwrap(), SectionId::new("b").unwrap()];
        let active = compute_active(&ids, 0, y, &two_sections).map(SectionId::as_str);
        let expected = if y < 100 { "a" } else { "b" };
        prop_assert_eq!(active, Some(expected));
    }

    #[test]
    fn spy_retains_last_match_past_the_end(ticks in prop::collection::vec(0u32..1000, 1..30)) {
        let host = EventHost::default();
        let mut spy = ScrollSpy::new(["a", "b"], 0).unwrap();
        spy.attach(&host);

        let mut expected: Option<&str> = None;
        for &y in &ticks {
            if y < 100 {
                expected = Some("a");
            } else if y < 200 {
                expected = Some("b");
            }
            let active = spy.on_scroll(y, &two_sections).map(SectionId::as_str);
            prop_assert_eq!(active, expected);
        }
    }
}

#[test]
fn spy_examples() {
    let host = EventHost::default();
    let mut spy = ScrollSpy::new(["a", "b"], 0).unwrap();
    spy.attach(&host);
    assert_eq!(spy.on_scroll(50, &two_sections).map(SectionId::as_str), Some("a"));
    assert_eq!(spy.on_scroll(150, &two_sections).map(SectionId::as_str), Some("b"));
    assert_eq!(spy.on_scroll(1000, &two_sections).map(SectionId::as_str), Some("b"));
}

// ===== Property 4: Drawer lock balance =====

#[derive(Debug, Clone, Copy)]
enum DrawerOp {
    Open,
    Close,
    Toggle,
    Overlay,
    Submenu,
}

fn drawer_op() -> impl Strategy<Value = DrawerOp> {
    prop_oneof![
        Just(DrawerOp::Open),
        Just(DrawerOp::Close),
        Just(DrawerOp::Toggle),
        Just(DrawerOp::Overlay),
        Just(DrawerOp::Submenu),
    ]
}

proptest! {
    #[test]
    fn drawer_lock_matches_open_state(ops in prop::collection::vec(drawer_op(), 0..40)) {
        let lock = DocumentScrollLock::new();
        let mut drawer = DrawerController::new(lock.clone());
        let mut submenu = false;

        for op in ops {
            match op {
                DrawerOp::Open => drawer.open().unwrap(),
                DrawerOp::Close => drawer.close(),
                DrawerOp::Toggle => drawer.toggle().unwrap(),
                DrawerOp::Overlay => drawer.click_overlay(),
                DrawerOp::Submenu => {
                    drawer.toggle_submenu();
                    submenu = !submenu;
                }
            }
            let stats = lock.stats();
            prop_assert_eq!(lock.is_locked(), drawer.is_open());
            prop_assert_eq!(
                stats.acquisitions - stats.releases,
                u64::from(drawer.is_open())
            );
            prop_assert_eq!(drawer.is_submenu_expanded(), submenu);
        }

        drop(drawer);
        let stats = lock.stats();
        prop_assert!(!lock.is_locked());
        prop_assert_eq!(stats.acquisitions, stats.releases);
    }
}

// ===== Property 5: Layout selection =====

proptest! {
    #[test]
    fn decision_depends_only_on_latest_width(widths in prop::collection::vec(1u32..3000, 1..20)) {
        let host = EventHost::default();
        let mut selector = LayoutSelector::mount(&host, None);
        for &width in &widths {
            selector.on_resize(width);
        }
        let last = *widths.last().unwrap();
        prop_assert_eq!(
            selector.decision(),
            select_layout(MountState::Mounted, DeviceClass::classify(last))
        );
    }

    #[test]
    fn loading_before_mount_regardless_of_class(width in 0u32..3000) {
        prop_assert_eq!(
            select_layout(MountState::Unmounted, DeviceClass::classify(width)),
            select_layout(MountState::Unmounted, DeviceClass::Desktop)
        );
    }
}
