//! View-state layer - page layout and viewport geometry
//!
//! Turns routes and content into a document with pixel extents, and answers
//! the geometric questions a browser would: how much of a region is in view,
//! how far the page can scroll.
//!
//! # Module Structure
//!
//! - `types`: PxScale (cells to logical pixels)
//! - `text`: display-width aware wrapping
//! - `document`: DocumentLayout - blocks, regions and sections of one page
//! - `geometry`: intersection ratio and scroll bounds

pub mod document;
pub mod geometry;
pub mod text;
pub mod types;

pub use document::{Block, DocLine, DocumentLayout, Tone, VisibleRow};
pub use geometry::{intersection_ratio, max_scroll};
pub use types::{InvalidScale, PxScale};
