//! High-level image operations.
//!
//! These functions combine the platform dimension table with backend
//! execution: they decode the source once, compute per-platform parameters
//! and call the backend for each platform against the shared decode.

use super::backend::{AdaptError, ImageBackend};
use super::params::{AdaptParams, AdaptedImage, Quality, SourceImage, DEFAULT_MAX_CANVAS_PIXELS};
use crate::platform::{Platform, dimensions_for};
use rayon::prelude::*;
use std::collections::BTreeMap;
use thiserror::Error;

/// An adaptation failure tagged with the platform it happened for.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{platform}: {source}")]
pub struct PlatformAdaptError {
    pub platform: Platform,
    #[source]
    pub source: AdaptError,
}

/// Failure of a multi-platform run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdaptRunError {
    /// The source could not be decoded; no platform was attempted.
    #[error("source image: {0}")]
    Source(AdaptError),
    #[error(transparent)]
    Platform(#[from] PlatformAdaptError),
}

/// Encoding settings shared by every platform in one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdaptConfig {
    pub quality: Quality,
    pub max_canvas_pixels: u64,
}

impl Default for AdaptConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            max_canvas_pixels: DEFAULT_MAX_CANVAS_PIXELS,
        }
    }
}

/// Adapt an already decoded source to one platform's canvas.
pub fn adapt_for_platform<B: ImageBackend>(
    backend: &B,
    decoded: &B::Decoded,
    platform: Platform,
    config: &AdaptConfig,
) -> Result<AdaptedImage, PlatformAdaptError> {
    let dims = dimensions_for(platform);
    let params = AdaptParams {
        width: dims.width,
        height: dims.height,
        quality: config.quality,
        max_canvas_pixels: config.max_canvas_pixels,
    };
    tracing::debug!(%platform, width = dims.width, height = dims.height, "adapting image");
    backend
        .adapt(decoded, &params)
        .map_err(|source| PlatformAdaptError { platform, source })
}

/// Adapt the source for each of `platforms` in parallel.
///
/// The source is decoded once, before the fan-out; a decode failure stops
/// the run before any platform starts. Every adaptation then reads the same
/// immutable decode and writes its own output. The first failure observed
/// is returned and the remaining results are discarded.
pub fn adapt_platforms<B: ImageBackend>(
    backend: &B,
    source: &SourceImage,
    platforms: &[Platform],
    config: &AdaptConfig,
) -> Result<BTreeMap<Platform, AdaptedImage>, AdaptRunError> {
    let decoded = backend.decode(source).map_err(AdaptRunError::Source)?;
    let images = platforms
        .par_iter()
        .map(|&platform| {
            adapt_for_platform(backend, &decoded, platform, config).map(|img| (platform, img))
        })
        .collect::<Result<_, _>>()?;
    Ok(images)
}

/// Adapt the source for every supported platform.
pub fn adapt_all<B: ImageBackend>(
    backend: &B,
    source: &SourceImage,
    config: &AdaptConfig,
) -> Result<BTreeMap<Platform, AdaptedImage>, AdaptRunError> {
    adapt_platforms(backend, source, &Platform::ALL, config)
}
