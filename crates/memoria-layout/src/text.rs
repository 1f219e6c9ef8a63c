//! Layout generation from rasterized text
//!
//! Scans the coverage bitmap on a fixed stride, maps hits into the design
//! footprint, shuffles for spatial variety, and serves exactly the requested
//! number of points with wraparound. Jitter is applied per emitted point so
//! wraparound repeats never coincide.

use glam::Vec3;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::raster::TextRasterizer;

/// Layout generation parameters
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Design footprint width in world units
    pub footprint_width: f32,
    /// Design footprint height in world units
    pub footprint_height: f32,
    /// Per-axis jitter applied to every emitted point
    pub jitter: f32,
    /// Pixel stride for the coverage scan
    pub scan_stride: usize,
    /// Minimum coverage for a pixel to become a point
    pub threshold: u8,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            footprint_width: 75.0,
            footprint_height: 35.0,
            jitter: 0.1,
            scan_stride: 4,
            threshold: 128,
        }
    }
}

/// Generator for text-shaped point clouds
pub struct TextLayout;

impl TextLayout {
    /// Produce exactly `n` points approximating the glyph shapes of `text`.
    ///
    /// The xy-projection lies within the configured footprint (plus jitter);
    /// z stays within jitter of the text plane. If rasterization yields no
    /// coverage the layout collapses to the origin - callers must tolerate
    /// that without crashing.
    pub fn generate<R: Rng + ?Sized>(
        rasterizer: &dyn TextRasterizer,
        text: &str,
        n: usize,
        config: &LayoutConfig,
        rng: &mut R,
    ) -> Vec<Vec3> {
        let bitmap = rasterizer.rasterize(text);
        let stride = config.scan_stride.max(1);

        let mut collected = Vec::new();
        let mut y = 0;
        while y < bitmap.height {
            let mut x = 0;
            while x < bitmap.width {
                if bitmap.coverage(x, y) > config.threshold {
                    // Linear map into the footprint, raster y flipped into world y
                    let fx = x as f32 / bitmap.width.max(1) as f32;
                    let fy = y as f32 / bitmap.height.max(1) as f32;
                    collected.push(Vec3::new(
                        (fx - 0.5) * config.footprint_width,
                        (0.5 - fy) * config.footprint_height,
                        0.0,
                    ));
                }
                x += stride;
            }
            y += stride;
        }

        if collected.is_empty() {
            tracing::warn!(text, "text rasterization yielded no points, collapsing to origin");
            return vec![Vec3::ZERO; n];
        }

        collected.shuffle(rng);

        (0..n)
            .map(|i| {
                let base = collected[i % collected.len()];
                let j = config.jitter;
                base + Vec3::new(
                    rng.gen_range(-j..=j),
                    rng.gen_range(-j..=j),
                    rng.gen_range(-j..=j),
                )
            })
            .collect()
    }
}
