//! Shared test utilities for the social-gen test suite.
//!
//! Provides synthetic images, a canned model response and a scripted
//! [`ContentGenerator`] so tests never touch the network.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let source = encode_test_image(400, 200, MediaType::Png);
//! let generator = MockGenerator::replying(sample_response_json());
//! ```

use crate::content::{ContentError, ContentGenerator, ContentRequest};
use crate::imaging::{MediaType, SourceImage};
use crate::input::UserInput;
use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::json;
use std::io::Cursor;
use std::sync::Mutex;
use std::time::Duration;

// =========================================================================
// Images
// =========================================================================

fn encode(img: RgbImage, media_type: MediaType) -> SourceImage {
    let dynamic = DynamicImage::from(img);
    let mut buf = Cursor::new(Vec::new());
    let format = match media_type {
        MediaType::Png => ImageFormat::Png,
        MediaType::Jpeg => ImageFormat::Jpeg,
        MediaType::WebP => ImageFormat::WebP,
    };
    // The WebP encoder wants RGBA
    let dynamic = match media_type {
        MediaType::WebP => DynamicImage::from(dynamic.to_rgba8()),
        _ => dynamic,
    };
    dynamic.write_to(&mut buf, format).unwrap();
    SourceImage::new(buf.into_inner(), media_type)
}

/// A `width x height` gradient image encoded as `media_type`.
pub fn encode_test_image(width: u32, height: u32, media_type: MediaType) -> SourceImage {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ])
    });
    encode(img, media_type)
}

/// A PNG split into three vertical bands: red, green, blue (left to right).
pub fn split_color_image(width: u32, height: u32) -> SourceImage {
    let img = RgbImage::from_fn(width, height, |x, _| {
        if x < width / 3 {
            Rgb([255, 0, 0])
        } else if x < 2 * width / 3 {
            Rgb([0, 255, 0])
        } else {
            Rgb([0, 0, 255])
        }
    });
    encode(img, MediaType::Png)
}

// =========================================================================
// Input and content
// =========================================================================

/// A complete, valid submission with a small PNG.
pub fn valid_input() -> UserInput {
    UserInput {
        description: "Hand-thrown stoneware coffee mug, 350 ml, dishwasher safe".into(),
        product_url: "https://shop.example/stoneware-mug".into(),
        keyword: "Stoneware Mug".into(),
        image: Some(encode_test_image(64, 32, MediaType::Png)),
    }
}

/// A model response that satisfies the schema for every platform.
pub fn sample_response_json() -> String {
    json!({
        "facebook": "☕ Meet your new favorite stoneware mug! Shop now: https://shop.example/stoneware-mug #StonewareMug",
        "instagram": "Slow mornings, handmade mug ☕✨ Link in Bio! #stonewaremug #coffee #handmade",
        "twitter": "Your coffee deserves better ☕ https://shop.example/stoneware-mug #StonewareMug",
        "linkedin": "Craftsmanship you can hold. https://shop.example/stoneware-mug #Ceramics #Design #Handmade",
        "vk": "Новая кружка! ☕ https://shop.example/stoneware-mug #кружка",
        "pinterest": {
            "title": "Handmade Stoneware Mug for Cozy Mornings",
            "description": "A dishwasher-safe stoneware mug. #stonewaremug"
        },
        "youtube": {
            "title": "Stoneware Mug Unboxing ☕",
            "description": "See the mug up close: https://shop.example/stoneware-mug\n\n#mug #coffee #handmade"
        },
        "tiktok": "POV: the perfect mug ☕ Link in Bio #stonewaremug #coffeetok #handmade"
    })
    .to_string()
}

// =========================================================================
// Scripted generator
// =========================================================================

/// A [`ContentGenerator`] that returns a fixed reply, optionally after a delay,
/// and records every request it receives.
pub struct MockGenerator {
    reply: Result<String, ContentError>,
    delay: Option<Duration>,
    requests: Mutex<Vec<ContentRequest>>,
}

impl MockGenerator {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ContentError) -> Self {
        Self {
            reply: Err(error),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<ContentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentGenerator for MockGenerator {
    async fn generate(&self, request: &ContentRequest) -> Result<String, ContentError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.reply.clone()
    }
}
