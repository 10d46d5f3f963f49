//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides which platform canvases to produce) and the
//! [`backend`](super::backend) (which does the actual pixel work).
//!
//! ## Types
//!
//! - [`MediaType`]: One of the three accepted encodings (PNG, JPEG, WebP).
//! - [`SourceImage`]: The uploaded bytes plus their declared media type.
//! - [`Quality`]: Lossy encoding quality (1–100, default 90). Clamped on construction.
//! - [`AdaptParams`]: Full specification for one adaptation: target size, quality, canvas budget.
//! - [`AdaptedImage`]: The re-encoded output for one platform.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unsupported media type: {0} (expected image/png, image/jpeg or image/webp)")]
pub struct UnsupportedMediaType(pub String);

/// Accepted image encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/webp")]
    WebP,
}

impl MediaType {
    pub fn mime(self) -> &'static str {
        match self {
            MediaType::Png => "image/png",
            MediaType::Jpeg => "image/jpeg",
            MediaType::WebP => "image/webp",
        }
    }

    /// File extension for outputs: the MIME subtype (`image/jpeg` → `jpeg`).
    pub fn extension(self) -> &'static str {
        match self.mime().split_once('/') {
            Some((_, subtype)) => subtype,
            None => self.mime(),
        }
    }

    /// Infer the media type from a file extension (`jpg` and `jpeg` both map to JPEG).
    pub fn from_path(path: &Path) -> Result<Self, UnsupportedMediaType> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "png" => Ok(MediaType::Png),
            "jpg" | "jpeg" => Ok(MediaType::Jpeg),
            "webp" => Ok(MediaType::WebP),
            _ => Err(UnsupportedMediaType(path.display().to_string())),
        }
    }

    pub(crate) fn image_format(self) -> image::ImageFormat {
        match self {
            MediaType::Png => image::ImageFormat::Png,
            MediaType::Jpeg => image::ImageFormat::Jpeg,
            MediaType::WebP => image::ImageFormat::WebP,
        }
    }
}

impl FromStr for MediaType {
    type Err = UnsupportedMediaType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Ignore MIME parameters such as `; charset=binary`
        let essence = s.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        match essence.as_str() {
            "image/png" => Ok(MediaType::Png),
            "image/jpeg" | "image/jpg" => Ok(MediaType::Jpeg),
            "image/webp" => Ok(MediaType::WebP),
            _ => Err(UnsupportedMediaType(s.to_string())),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// The uploaded image: raw bytes and the media type they were declared as.
///
/// Bytes are shared, so handing the same source to every platform's
/// adaptation does not copy the upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub bytes: Arc<[u8]>,
    pub media_type: MediaType,
}

impl SourceImage {
    pub fn new(bytes: impl Into<Arc<[u8]>>, media_type: MediaType) -> Self {
        Self {
            bytes: bytes.into(),
            media_type,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Default upper bound on target canvas size (40 megapixels).
pub const DEFAULT_MAX_CANVAS_PIXELS: u64 = 40_000_000;

/// Parameters for one adaptation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdaptParams {
    pub width: u32,
    pub height: u32,
    /// JPEG quality; ignored for PNG and (lossless) WebP.
    pub quality: Quality,
    /// Largest target canvas, in pixels, the backend may allocate.
    pub max_canvas_pixels: u64,
}

impl AdaptParams {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            quality: Quality::default(),
            max_canvas_pixels: DEFAULT_MAX_CANVAS_PIXELS,
        }
    }
}

/// A re-encoded image whose pixel size equals the requested target.
#[derive(Clone, PartialEq, Eq)]
pub struct AdaptedImage {
    pub width: u32,
    pub height: u32,
    pub media_type: MediaType,
    pub bytes: Vec<u8>,
}

// Bytes are elided so debug output of a whole submission stays readable.
impl fmt::Debug for AdaptedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdaptedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("media_type", &self.media_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}
