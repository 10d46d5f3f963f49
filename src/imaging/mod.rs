//! Image adaptation: pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** (once per run) | `image::load_from_memory_with_format` |
//! | **Crop geometry** | [`calculate_crop_region`] (pure) |
//! | **Crop + scale** | `crop_imm` + `resize_exact` (Lanczos3) |
//! | **Re-encode** | JPEG / PNG / lossless WebP, matching the source |
//! | **Fan-out** | rayon `par_iter` over [`Platform::ALL`](crate::platform::Platform::ALL) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for crop geometry (unit testable)
//! - **Parameters**: Media types and data structures describing an adaptation
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: Per-platform adaptation combining the dimension table + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{AdaptError, ImageBackend};
pub use calculations::{CropRegion, PixelCrop, calculate_crop_region, snap_to_pixels};
pub use operations::{
    AdaptConfig, AdaptRunError, PlatformAdaptError, adapt_all, adapt_for_platform, adapt_platforms,
};
pub use params::{
    AdaptParams, AdaptedImage, DEFAULT_MAX_CANVAS_PIXELS, MediaType, Quality, SourceImage,
    UnsupportedMediaType,
};
pub use rust_backend::{DecodedImage, RustBackend};

/// Center-crop and scale one source image to `width x height` with default settings.
///
/// Convenience wrapper over [`RustBackend`]'s decode and adapt.
pub fn adapt(source: &SourceImage, width: u32, height: u32) -> Result<AdaptedImage, AdaptError> {
    let backend = RustBackend::new();
    backend.adapt(&backend.decode(source)?, &AdaptParams::new(width, height))
}
