//! Pure calculation functions for center-crop geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// An exact (sub-pixel) crop rectangle inside the source image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A crop rectangle snapped to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelCrop {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Calculate the centered crop of `source` that matches the aspect ratio of `target`.
///
/// - Source relatively wider: full height is kept, width is cut to
///   `src_h * target_aspect` and centered horizontally.
/// - Source relatively taller: full width is kept, height is cut to
///   `src_w / target_aspect` and centered vertically.
/// - Equal aspect ratios: the whole source is used.
///
/// Equality is decided with integer cross-multiplication, so a 1920x1080
/// source against a 1280x720 target is never cropped by float noise.
///
/// # Examples
/// ```
/// # use social_gen::imaging::calculate_crop_region;
/// // 4000x2000 (2:1) into 1080x1920 (9:16)
/// let crop = calculate_crop_region((4000, 2000), (1080, 1920));
/// assert_eq!(crop.width, 1125.0);
/// assert_eq!(crop.x, 1437.5);
/// assert_eq!(crop.y, 0.0);
/// ```
pub fn calculate_crop_region(source: (u32, u32), target: (u32, u32)) -> CropRegion {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let full = CropRegion {
        x: 0.0,
        y: 0.0,
        width: src_w as f64,
        height: src_h as f64,
    };

    let lhs = src_w as u64 * tgt_h as u64;
    let rhs = tgt_w as u64 * src_h as u64;
    if lhs == rhs {
        return full;
    }

    let target_aspect = tgt_w as f64 / tgt_h as f64;

    if lhs > rhs {
        // Source is wider: keep full height
        let width = src_h as f64 * target_aspect;
        CropRegion {
            x: (src_w as f64 - width) / 2.0,
            width,
            ..full
        }
    } else {
        // Source is taller: keep full width
        let height = src_w as f64 / target_aspect;
        CropRegion {
            y: (src_h as f64 - height) / 2.0,
            height,
            ..full
        }
    }
}

/// Snap an exact crop region to whole pixels inside a `source`-sized image.
///
/// Extents are rounded to the nearest pixel and clamped to `1..=source`;
/// offsets re-center the rounded extent with integer division, so they stay
/// within one pixel of the exact offset and the crop never leaves the image.
pub fn snap_to_pixels(region: CropRegion, source: (u32, u32)) -> PixelCrop {
    let (src_w, src_h) = source;
    let width = (region.width.round() as u32).clamp(1, src_w.max(1));
    let height = (region.height.round() as u32).clamp(1, src_h.max(1));
    PixelCrop {
        x: (src_w - width) / 2,
        y: (src_h - height) / 2,
        width,
        height,
    }
}

/// Whether a `width x height` canvas fits within `max_pixels`.
///
/// Zero-sized canvases never fit.
pub fn canvas_fits(width: u32, height: u32, max_pixels: u64) -> bool {
    width > 0 && height > 0 && (width as u64) * (height as u64) <= max_pixels
}
