//! Pure Rust image adaptation backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG, WebP) | `image::load_from_memory_with_format` |
//! | Center crop | [`calculate_crop_region`] + `DynamicImage::crop_imm` |
//! | Scale | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (RGB8, configurable quality) |
//! | Encode → PNG | `image::codecs::png::PngEncoder` |
//! | Encode → WebP | `image::codecs::webp::WebPEncoder` (lossless, RGBA8) |

use super::backend::{AdaptError, ImageBackend};
use super::calculations::{calculate_crop_region, canvas_fits, snap_to_pixels};
use super::params::{AdaptParams, AdaptedImage, MediaType, Quality, SourceImage};
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Source pixels plus the media type every output is re-encoded in.
pub struct DecodedImage {
    pub image: DynamicImage,
    pub media_type: MediaType,
}

/// Decode the source bytes as their declared media type.
fn load_image(source: &SourceImage) -> Result<DynamicImage, AdaptError> {
    let img = image::load_from_memory_with_format(&source.bytes, source.media_type.image_format())
        .map_err(|e| AdaptError::Decode(format!("{} ({})", e, source.media_type)))?;
    if img.width() == 0 || img.height() == 0 {
        return Err(AdaptError::Decode("image has zero width or height".into()));
    }
    Ok(img)
}

/// Encode a DynamicImage in the given media type.
fn encode_image(
    img: &DynamicImage,
    media_type: MediaType,
    quality: Quality,
) -> Result<Vec<u8>, AdaptError> {
    let mut buf = Vec::new();
    let result = match media_type {
        // JPEG has no alpha channel
        MediaType::Jpeg => DynamicImage::from(img.to_rgb8())
            .write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality.value() as u8)),
        MediaType::Png => img.write_with_encoder(PngEncoder::new(&mut buf)),
        // The WebP encoder only accepts 8-bit channels
        MediaType::WebP => DynamicImage::from(img.to_rgba8())
            .write_with_encoder(WebPEncoder::new_lossless(&mut buf)),
    };
    result.map_err(|e| AdaptError::Render(format!("{} encode failed: {}", media_type, e)))?;
    Ok(buf)
}

impl ImageBackend for RustBackend {
    type Decoded = DecodedImage;

    fn decode(&self, source: &SourceImage) -> Result<DecodedImage, AdaptError> {
        Ok(DecodedImage {
            image: load_image(source)?,
            media_type: source.media_type,
        })
    }

    fn adapt(
        &self,
        decoded: &DecodedImage,
        params: &AdaptParams,
    ) -> Result<AdaptedImage, AdaptError> {
        if !canvas_fits(params.width, params.height, params.max_canvas_pixels) {
            return Err(AdaptError::Render(format!(
                "cannot allocate a {}x{} canvas (limit {} pixels)",
                params.width, params.height, params.max_canvas_pixels
            )));
        }

        let img = &decoded.image;
        let src = (img.width(), img.height());

        let region = calculate_crop_region(src, (params.width, params.height));
        let crop = snap_to_pixels(region, src);

        let scaled = if (crop.width, crop.height) == src {
            img.resize_exact(params.width, params.height, FilterType::Lanczos3)
        } else {
            img.crop_imm(crop.x, crop.y, crop.width, crop.height)
                .resize_exact(params.width, params.height, FilterType::Lanczos3)
        };

        let bytes = encode_image(&scaled, decoded.media_type, params.quality)?;
        Ok(AdaptedImage {
            width: scaled.width(),
            height: scaled.height(),
            media_type: decoded.media_type,
            bytes,
        })
    }
}
