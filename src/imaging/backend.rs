//! Image adaptation backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two steps every backend must
//! support: decode (once per run) and adapt (center-crop, scale, re-encode,
//! once per platform). Every platform reads the same decoded pixels.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use a recording mock so orchestration logic can be checked
//! without decoding pixels.

use super::params::{AdaptParams, AdaptedImage, SourceImage};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdaptError {
    /// The source bytes are not a decodable image of the declared type.
    #[error("Failed to decode source image: {0}")]
    Decode(String),
    /// The target surface could not be allocated or encoded.
    #[error("Failed to render adapted image: {0}")]
    Render(String),
}

/// Trait for image adaptation backends.
///
/// `Sync` so one backend can serve every platform from rayon workers.
pub trait ImageBackend: Sync {
    /// Decoded source, shared read-only by every platform in one run.
    type Decoded: Sync;

    /// Decode the source bytes as their declared media type.
    fn decode(&self, source: &SourceImage) -> Result<Self::Decoded, AdaptError>;

    /// Center-crop the decoded source to the target aspect ratio, scale it to
    /// exactly `params.width x params.height`, and re-encode it in the
    /// source's media type.
    fn adapt(
        &self,
        decoded: &Self::Decoded,
        params: &AdaptParams,
    ) -> Result<AdaptedImage, AdaptError>;
}
