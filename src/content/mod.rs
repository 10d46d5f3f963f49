//! Per-platform copy generation through an external LLM.
//!
//! ```text
//! UserInput ─► request::build_request ─► ContentRequest
//!                                           │
//!                       client::ContentGenerator::generate (HTTP)
//!                                           │
//!                         raw JSON text ─► response::parse_generated_content
//!                                           │
//!                                   GeneratedContent
//! ```
//!
//! The request side is pure data assembly; only [`client`] touches the
//! network. The response schema and the parser are both driven by
//! [`Platform::ALL`] and [`schema_field_for`](crate::platform::schema_field_for),
//! so they cannot disagree about which fields exist.

pub mod client;
pub mod request;
pub mod response;
pub mod schema;

pub use client::{ContentGenerator, GeminiClient};
pub use request::{ContentRequest, build_request, build_request_for_today};
pub use response::parse_generated_content;
pub use schema::response_schema;

use crate::platform::Platform;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("API key is missing: set {0}")]
    MissingCredential(String),
    /// Transport, authentication, rate-limit or timeout failure.
    #[error("Generation API error: {0}")]
    Api(String),
    /// The response does not match the declared schema, or is empty.
    #[error("Generated content has an unexpected format: {0}")]
    Format(String),
}

/// A `{title, description}` pair, used for pins and videos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitledPost {
    pub title: String,
    pub description: String,
}

/// Generated copy for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlatformContent {
    Text(String),
    Titled(TitledPost),
}

impl PlatformContent {
    /// The text a user would copy to the clipboard.
    ///
    /// Titled content is joined as `title`, a blank line, then `description`.
    pub fn text_to_copy(&self) -> String {
        match self {
            PlatformContent::Text(text) => text.clone(),
            PlatformContent::Titled(post) => format!("{}\n\n{}", post.title, post.description),
        }
    }

    pub fn stats(&self) -> PostStats {
        PostStats::of(&self.text_to_copy())
    }
}

/// Word and character counts shown under each post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PostStats {
    pub words: usize,
    pub characters: usize,
}

impl PostStats {
    pub fn of(text: &str) -> Self {
        Self {
            words: text.split_whitespace().count(),
            characters: text.chars().count(),
        }
    }
}

/// Generated copy for every platform.
pub type GeneratedContent = BTreeMap<Platform, PlatformContent>;
