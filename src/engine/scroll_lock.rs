//! Document-level scroll lock.
//!
//! The one piece of mutable state shared across components: "background
//! scrolling is suppressed". It is a single exclusive flag. Acquiring yields
//! a [`ScrollLockGuard`]; dropping the guard releases the lock, so a holder
//! that goes away for any reason releases it.
//!
//! Only the drawer acquires it (`acquire` is crate-private). Everyone else
//! may only ask whether the document is locked.

use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;
use tracing::debug;

/// Acquiring a lock that is already held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScrollLockError {
    /// Another holder has the lock.
    #[error("document scroll lock is already held")]
    AlreadyHeld,
}

#[derive(Debug, Default)]
struct LockInner {
    held: bool,
    acquisitions: u64,
    releases: u64,
}

/// Shared handle to the document scroll lock.
#[derive(Debug, Clone, Default)]
pub struct DocumentScrollLock {
    inner: Rc<RefCell<LockInner>>,
}

/// Counters for tests and the headless snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScrollLockStats {
    /// Lock currently held.
    pub locked: bool,
    /// Guards handed out so far.
    pub acquisitions: u64,
    /// Guards dropped so far.
    pub releases: u64,
}

impl DocumentScrollLock {
    /// An unlocked document.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn acquire(&self) -> Result<ScrollLockGuard, ScrollLockError> {
        let mut inner = self.inner.borrow_mut();
        if inner.held {
            return Err(ScrollLockError::AlreadyHeld);
        }
        inner.held = true;
        inner.acquisitions += 1;
        debug!("document scroll locked");
        Ok(ScrollLockGuard {
            inner: Rc::clone(&self.inner),
        })
    }

    /// Whether background scrolling is currently suppressed.
    pub fn is_locked(&self) -> bool {
        self.inner.borrow().held
    }

    /// Current counters.
    pub fn stats(&self) -> ScrollLockStats {
        let inner = self.inner.borrow();
        ScrollLockStats {
            locked: inner.held,
            acquisitions: inner.acquisitions,
            releases: inner.releases,
        }
    }
}

/// Proof of holding the scroll lock. Releases on drop.
#[derive(Debug)]
pub struct ScrollLockGuard {
    inner: Rc<RefCell<LockInner>>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.held = false;
        inner.releases += 1;
        debug!("document scroll unlocked");
    }
}
