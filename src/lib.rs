//! # Social Gen
//!
//! Turns one product (a description, a link, a focus keyword and a photo)
//! into ready-to-post copy and correctly sized images for eight social
//! platforms.
//!
//! # Architecture: Fan-Out / Join
//!
//! A submission is validated once, then split into two independent branches
//! that run concurrently and are joined at the end:
//!
//! ```text
//!                  ┌─► content  UserInput → ContentRequest → LLM → GeneratedContent
//! validate input ──┤
//!                  └─► images   SourceImage → 8 × center-crop + resize → AdaptedImage
//! ```
//!
//! Neither branch sees the other's output. If either fails, the whole
//! submission fails and nothing partial is shown.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`platform`] | The eight platforms, their canonical order, output sizes and content shape |
//! | [`input`] | Submission input, required-field validation, source image loading |
//! | [`imaging`] | Center-crop + Lanczos resize behind a swappable backend |
//! | [`content`] | Request builder, response schema, Gemini client, response parser |
//! | [`generate`] | The orchestrator: validation, concurrent branches, error mapping |
//! | [`config`] | `social-gen.toml` loading, validation, merging, and CSS generation |
//! | [`state`] | Persisted theme/language preferences and the current result slot |
//! | [`messages`] | Localized (English/Arabic) user-facing text |
//! | [`naming`] | Product slugs and `<product>-<platform>-image.<ext>` download names |
//! | [`report`] | Static HTML report of a result, rendered with Maud |
//! | [`export`] | Writes images, `posts.json` and the report to disk |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Structured Output Over Free Text
//!
//! The content request carries a JSON response schema with one required key
//! per platform. The model is asked for JSON only, and the parser checks
//! every key and shape before anything reaches the user. A response that
//! drifts from the schema is an error, never a half-filled result.
//!
//! ## Center Crop, Never Letterbox
//!
//! Every platform image is filled edge to edge: the source is scaled to cover
//! the target and the overflow is cropped evenly from both sides of the long
//! axis. The source format is kept; only dimensions change.
//!
//! ## Blocking Work Off the Async Runtime
//!
//! Decoding and resampling are CPU-bound. The image branch runs on tokio's
//! blocking pool and fans out across platforms with rayon, so the content
//! request is in flight while images are being cut.

pub mod config;
pub mod content;
pub mod export;
pub mod generate;
pub mod imaging;
pub mod input;
pub mod messages;
pub mod naming;
pub mod output;
pub mod platform;
pub mod report;
pub mod state;

#[cfg(test)]
pub(crate) mod test_helpers;
