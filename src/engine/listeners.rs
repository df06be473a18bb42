//! Host event subscriptions.
//!
//! Every resize, scroll and intersection subscription is a [`ListenerGuard`].
//! Dropping the guard deregisters the listener, so teardown happens on every
//! exit path. The registry counts live listeners per kind so leaks show up as
//! non-zero counts in tests.
//!
//! Everything here is single-threaded: handles are `Rc`, not `Arc`.

use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use tracing::trace;

/// Kind of host event a component subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Viewport width changed.
    Resize,
    /// Document scroll offset changed.
    Scroll,
    /// An observed element's visible ratio changed.
    Intersection,
}

/// What the hosting environment can do.
///
/// Missing capabilities never produce errors. Components fall back to a
/// static behavior instead (see each component for its fallback).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HostCapabilities {
    /// The viewport width can be read at all.
    pub measure_viewport: bool,
    /// Resize events are delivered.
    pub resize_events: bool,
    /// Intersection ratios are delivered.
    pub intersection: bool,
}

impl HostCapabilities {
    /// A fully interactive host.
    pub const FULL: Self = Self {
        measure_viewport: true,
        resize_events: true,
        intersection: true,
    };

    /// A pre-measurement or non-interactive context (server render, pipe).
    pub const NONE: Self = Self {
        measure_viewport: false,
        resize_events: false,
        intersection: false,
    };

    /// Same host, but intersection ratios are never delivered.
    pub fn without_intersection(self) -> Self {
        Self {
            intersection: false,
            ..self
        }
    }

    /// Whether events of `kind` can be delivered at all.
    pub fn supports(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::Resize => self.resize_events,
            EventKind::Scroll => true,
            EventKind::Intersection => self.intersection,
        }
    }
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self::FULL
    }
}

/// Opaque listener id. Ids increase in subscription order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Debug, Default)]
struct RegistryInner {
    next_id: u64,
    active: BTreeMap<ListenerId, EventKind>,
}

/// Shared listener table. Cloning yields another handle to the same table.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl ListenerRegistry {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener and return the guard that owns it.
    pub fn register(&self, kind: EventKind) -> ListenerGuard {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.active.insert(id, kind);
        trace!(?kind, id = id.0, "listener registered");
        ListenerGuard {
            registry: Rc::downgrade(&self.inner),
            id,
            kind,
        }
    }

    /// Number of live listeners of `kind`.
    pub fn active(&self, kind: EventKind) -> usize {
        self.inner
            .borrow()
            .active
            .values()
            .filter(|k| **k == kind)
            .count()
    }

    /// Number of live listeners of any kind.
    pub fn total_active(&self) -> usize {
        self.inner.borrow().active.len()
    }

    fn deregister(inner: &Rc<RefCell<RegistryInner>>, id: ListenerId) {
        if let Some(kind) = inner.borrow_mut().active.remove(&id) {
            trace!(?kind, id = id.0, "listener deregistered");
        }
    }
}

/// Ownership of one live listener. Deregisters on drop.
///
/// Holds a weak handle: a guard outliving its registry is harmless.
#[derive(Debug)]
pub struct ListenerGuard {
    registry: Weak<RefCell<RegistryInner>>,
    id: ListenerId,
    kind: EventKind,
}

impl ListenerGuard {
    /// Id assigned at registration.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Event kind this listener receives.
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(inner) = self.registry.upgrade() {
            ListenerRegistry::deregister(&inner, self.id);
        }
    }
}

/// The hosting environment as components see it: capabilities plus the
/// listener table.
#[derive(Debug, Clone, Default)]
pub struct EventHost {
    capabilities: HostCapabilities,
    registry: ListenerRegistry,
}

impl EventHost {
    /// A host with `capabilities` and a fresh listener table.
    pub fn new(capabilities: HostCapabilities) -> Self {
        Self {
            capabilities,
            registry: ListenerRegistry::new(),
        }
    }

    /// What this host can deliver.
    pub fn capabilities(&self) -> HostCapabilities {
        self.capabilities
    }

    /// The shared listener table.
    pub fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }

    /// Subscribe to `kind`, or `None` when the host cannot deliver it.
    pub fn listen(&self, kind: EventKind) -> Option<ListenerGuard> {
        self.capabilities
            .supports(kind)
            .then(|| self.registry.register(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_guard_deregisters() {
        let registry = ListenerRegistry::new();
        let guard = registry.register(EventKind::Scroll);
        assert_eq!(registry.active(EventKind::Scroll), 1);
        drop(guard);
        assert_eq!(registry.active(EventKind::Scroll), 0);
    }

    #[test]
    fn counts_are_per_kind() {
        let registry = ListenerRegistry::new();
        let _a = registry.register(EventKind::Resize);
        let _b = registry.register(EventKind::Scroll);
        let _c = registry.register(EventKind::Scroll);
        assert_eq!(registry.active(EventKind::Resize), 1);
        assert_eq!(registry.active(EventKind::Scroll), 2);
        assert_eq!(registry.active(EventKind::Intersection), 0);
        assert_eq!(registry.total_active(), 3);
    }

    #[test]
    fn ids_increase_in_subscription_order() {
        let registry = ListenerRegistry::new();
        let first = registry.register(EventKind::Scroll);
        let other = registry.register(EventKind::Resize);
        let second = registry.register(EventKind::Scroll);
        assert!(first.id() < other.id());
        assert!(other.id() < second.id());
        assert_eq!(second.kind(), EventKind::Scroll);
    }

    #[test]
    fn guard_outliving_registry_is_harmless() {
        let registry = ListenerRegistry::new();
        let guard = registry.register(EventKind::Resize);
        drop(registry);
        drop(guard);
    }

    #[test]
    fn host_refuses_unsupported_kinds() {
        let host = EventHost::new(HostCapabilities::NONE);
        assert!(host.listen(EventKind::Resize).is_none());
        assert!(host.listen(EventKind::Intersection).is_none());
        // Scroll is always deliverable.
        assert!(host.listen(EventKind::Scroll).is_some());
    }

    #[test]
    fn clones_share_one_table() {
        let host = EventHost::default();
        let clone = host.clone();
        let _guard = clone.listen(EventKind::Intersection);
        assert_eq!(host.registry().active(EventKind::Intersection), 1);
    }
}
