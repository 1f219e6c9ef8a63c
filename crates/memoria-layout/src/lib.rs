//! Memoria Layout - Target layouts from rasterized text
//!
//! The formed arrangement is a point cloud sampled from the pixel coverage of
//! rasterized text; the chaos arrangement is a uniform-by-volume sphere
//! scatter. Both are computed once at scene construction and stay immutable
//! for the scene lifetime.
//!
//! Text rasterization sits behind the [`TextRasterizer`] capability trait so
//! a platform text backend and the built-in headless dot-matrix rasterizer
//! are interchangeable.

pub mod raster;
pub mod scatter;
pub mod text;

pub use raster::*;
pub use scatter::*;
pub use text::*;
