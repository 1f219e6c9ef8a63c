//! Photo ingest and card compositing
//!
//! Every decodable source image becomes exactly one card texture; a corrupt
//! file produces no card and no crash. The card template is fixed-size so the
//! renderer can treat all photo quads identically.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use memoria_core::{MemoriaError, MemoriaResult, Month};
use memoria_layout::{DotMatrixRasterizer, TextRasterizer};

/// Card texture width in pixels
pub const CARD_WIDTH: u32 = 512;
/// Card texture height in pixels
pub const CARD_HEIGHT: u32 = 640;
/// Border around the photo window
const CARD_BORDER: u32 = 24;
/// Label band height at the bottom of the card
const LABEL_BAND: u32 = 96;
/// Corner rounding radius
const CORNER_RADIUS: u32 = 20;

const CARD_BACKGROUND: Rgba<u8> = Rgba([245, 242, 235, 255]);
const LABEL_INK: Rgba<u8> = Rgba([70, 62, 55, 255]);

/// One user-supplied image plus its category tag
#[derive(Debug, Clone)]
pub struct PhotoSource {
    pub bytes: Vec<u8>,
    pub month: Month,
}

/// A composited, renderable photo card
#[derive(Debug, Clone)]
pub struct PhotoCard {
    pub month: Month,
    pub texture: RgbaImage,
}

/// Outcome of one ingest batch
#[derive(Debug, Default)]
pub struct IngestReport {
    pub cards: Vec<PhotoCard>,
    /// Sources dropped because they failed to decode
    pub skipped: usize,
}

/// Decode and composite one source image
pub fn decode_photo(index: usize, source: &PhotoSource) -> MemoriaResult<PhotoCard> {
    let decoded = image::load_from_memory(&source.bytes).map_err(|err| {
        MemoriaError::PhotoDecode {
            index,
            reason: err.to_string(),
        }
    })?;

    Ok(PhotoCard {
        month: source.month,
        texture: compose_card(&decoded, source.month),
    })
}

/// Decode and composite a batch of user images.
///
/// Decode failures are logged and counted, and the batch continues; cards
/// that already composited are never discarded because a later source is
/// corrupt.
pub fn ingest_photos(sources: &[PhotoSource]) -> IngestReport {
    let mut report = IngestReport::default();

    for (index, source) in sources.iter().enumerate() {
        match decode_photo(index, source) {
            Ok(card) => report.cards.push(card),
            Err(err) => {
                tracing::warn!(error = %err, "skipping undecodable photo");
                report.skipped += 1;
            }
        }
    }

    report
}

/// Composite one image onto the card template
pub fn compose_card(photo: &DynamicImage, month: Month) -> RgbaImage {
    let mut card = RgbaImage::from_pixel(CARD_WIDTH, CARD_HEIGHT, CARD_BACKGROUND);

    // Photo window: full width minus border, leaving room for the label band
    let window_w = CARD_WIDTH - 2 * CARD_BORDER;
    let window_h = CARD_HEIGHT - 2 * CARD_BORDER - LABEL_BAND;
    let fitted = imageops::resize(&photo.to_rgba8(), window_w, window_h, FilterType::Triangle);
    imageops::overlay(&mut card, &fitted, CARD_BORDER as i64, CARD_BORDER as i64);

    stamp_label(&mut card, month);
    round_corners(&mut card);

    card
}

/// Stamp the month's short name into the label band
fn stamp_label(card: &mut RgbaImage, month: Month) {
    let raster = DotMatrixRasterizer::new(8);
    let bitmap = raster.rasterize(label_digits(month));

    let band_top = CARD_HEIGHT - CARD_BORDER - LABEL_BAND;
    let origin_x = (CARD_WIDTH as i64 - bitmap.width as i64) / 2;
    let origin_y = band_top as i64 + (LABEL_BAND as i64 - bitmap.height as i64) / 2;

    for y in 0..bitmap.height {
        for x in 0..bitmap.width {
            if bitmap.coverage(x, y) > 128 {
                let px = origin_x + x as i64;
                let py = origin_y + y as i64;
                if px >= 0 && py >= 0 && (px as u32) < CARD_WIDTH && (py as u32) < CARD_HEIGHT {
                    card.put_pixel(px as u32, py as u32, LABEL_INK);
                }
            }
        }
    }
}

/// Month as a zero-padded numeric stamp (the dot-matrix face is digits only)
fn label_digits(month: Month) -> &'static str {
    const STAMPS: [&str; 12] = [
        "01", "02", "03", "04", "05", "06", "07", "08", "09", "10", "11", "12",
    ];
    STAMPS[month.as_index()]
}

/// Clear the corner pixels outside the rounding radius
fn round_corners(card: &mut RgbaImage) {
    let r = CORNER_RADIUS as i64;
    let (w, h) = (CARD_WIDTH as i64, CARD_HEIGHT as i64);
    let centers = [
        (r, r),
        (w - 1 - r, r),
        (r, h - 1 - r),
        (w - 1 - r, h - 1 - r),
    ];

    for y in 0..h {
        for x in 0..w {
            let corner = (x < r || x >= w - r) && (y < r || y >= h - r);
            if !corner {
                continue;
            }
            let inside = centers
                .iter()
                .any(|(cx, cy)| (x - cx).pow(2) + (y - cy).pow(2) <= r * r);
            if !inside {
                card.put_pixel(x as u32, y as u32, Rgba([0, 0, 0, 0]));
            }
        }
    }
}
