//! Intersection geometry.
//!
//! The host computes what a browser's intersection observer would report:
//! the fraction of a region's height that lies inside the viewport.

use crate::engine::SectionExtent;

/// Fraction of `extent` visible in the viewport `[viewport_top, viewport_top + viewport_height)`.
///
/// Zero-height regions report `0.0`. The result is always in `[0.0, 1.0]`.
pub fn intersection_ratio(extent: SectionExtent, viewport_top: u32, viewport_height: u32) -> f64 {
    if extent.height == 0 {
        return 0.0;
    }
    let viewport_bottom = viewport_top.saturating_add(viewport_height);
    let overlap_top = extent.top.max(viewport_top);
    let overlap_bottom = extent.bottom().min(viewport_bottom);
    let overlap = overlap_bottom.saturating_sub(overlap_top);
    f64::from(overlap) / f64::from(extent.height)
}

/// Largest scroll offset that still fills the viewport.
pub fn max_scroll(document_height: u32, viewport_height: u32) -> u32 {
    document_height.saturating_sub(viewport_height)
}
