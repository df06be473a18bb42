//! Identifiers for animated page regions.

use serde::Serialize;
use std::fmt;

/// Region names shared by page composition and document layout.
pub mod names {
    /// Landing or about hero.
    pub const HERO: &str = "hero";
    /// Services teaser on the landing page.
    pub const SERVICES: &str = "services";
    /// About teaser on the landing page.
    pub const ABOUT: &str = "about";
    /// Process steps.
    pub const PROCESS: &str = "process";
    /// Closing call to action.
    pub const CTA: &str = "cta";
    /// Greeting card on the about page.
    pub const CARD: &str = "card";
}

/// Name of one reveal region on a page (`hero`, `process`, `service:fta`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    /// Region called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Region wrapping one card on the services page.
    pub fn service(service_id: &str) -> Self {
        Self(format!("service:{service_id}"))
    }

    /// The region name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
