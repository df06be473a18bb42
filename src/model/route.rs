//! Page routes and navigation destinations.
//!
//! The engine treats destinations as opaque strings. Only the host resolves
//! them to a [`Route`]; anything that does not resolve is external.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Pages of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Landing page (`/`).
    #[default]
    Home,
    /// Company introduction (`/about`).
    About,
    /// Directions and map (`/about/location`).
    Location,
    /// Practice areas with scroll-spy navigation (`/services`).
    Services,
}

impl Route {
    /// All routes in menu order.
    pub const ALL: [Route; 4] = [Route::Home, Route::About, Route::Location, Route::Services];

    /// Canonical path of this route.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::About => "/about",
            Self::Location => "/about/location",
            Self::Services => "/services",
        }
    }

    /// Resolve a path to a route.
    ///
    /// Trailing slashes are ignored (`/about/` resolves to `About`).
    /// Returns `None` for unknown paths and external URLs.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" if trimmed.starts_with('/') => "/",
            other => other,
        };
        Route::ALL.into_iter().find(|r| r.path() == normalized)
    }

    /// Human-readable page title for status bars.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "HOME",
            Self::About => "회사소개",
            Self::Location => "오시는 길",
            Self::Services => "업무영역",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Error returned when a path names no page of the site.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown page '{0}' (expected one of /, /about, /about/location, /services)")]
pub struct UnknownRoute(pub String);

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        Self::from_path(path).ok_or_else(|| UnknownRoute(path.to_string()))
    }
}

/// Opaque navigation target: an internal path or an external URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Destination(String);

impl Destination {
    /// Wrap a raw path or URL without checking it.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw path or URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve against the known routes. External URLs resolve to `None`.
    pub fn route(&self) -> Option<Route> {
        Route::from_path(&self.0)
    }

    /// True when the destination is an absolute `http(s)` URL.
    pub fn is_external(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }
}

impl From<Route> for Destination {
    fn from(route: Route) -> Self {
        Self(route.path().to_string())
    }
}

impl From<&str> for Destination {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The only output of a navigation click: "the user wants to go here".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationIntent {
    /// Requested target.
    pub destination: Destination,
}

impl NavigationIntent {
    /// Intent to go to `destination`.
    pub fn new(destination: Destination) -> Self {
        Self { destination }
    }
}
