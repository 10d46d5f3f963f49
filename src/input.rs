//! User-supplied submission input and its validation.
//!
//! A submission needs all four fields: description, product URL, focus
//! keyword and an image. Text fields that are empty or whitespace-only count
//! as missing, as does an image with no bytes.

use crate::imaging::{MediaType, SourceImage, UnsupportedMediaType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Output and interface language. Arabic until the user picks otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ar,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::En => "en",
        }
    }

    /// English name, used inside the generation instructions.
    pub fn english_name(self) -> &'static str {
        match self {
            Language::Ar => "Arabic",
            Language::En => "English",
        }
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Language::Ar)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" | "arabic" => Ok(Language::Ar),
            "en" | "english" => Ok(Language::En),
            other => Err(format!("unknown language '{other}' (expected ar or en)")),
        }
    }
}

/// Names of the four required fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Description,
    ProductUrl,
    Keyword,
    Image,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Description => "description",
            Field::ProductUrl => "product URL",
            Field::Keyword => "keyword",
            Field::Image => "image",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing required fields: {}", join_fields(.missing))]
pub struct ValidationError {
    pub missing: Vec<Field>,
}

fn join_fields(fields: &[Field]) -> String {
    let names: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
    names.join(", ")
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    UnsupportedMediaType(#[from] UnsupportedMediaType),
}

/// One submission's input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInput {
    pub description: String,
    pub product_url: String,
    pub keyword: String,
    pub image: Option<SourceImage>,
}

impl UserInput {
    /// Check that every required field is present.
    ///
    /// Returns all missing fields at once rather than stopping at the first.
    pub fn validate(&self) -> Result<&SourceImage, ValidationError> {
        let mut missing = Vec::new();
        if self.description.trim().is_empty() {
            missing.push(Field::Description);
        }
        if self.product_url.trim().is_empty() {
            missing.push(Field::ProductUrl);
        }
        if self.keyword.trim().is_empty() {
            missing.push(Field::Keyword);
        }
        let image = self.image.as_ref().filter(|img| !img.is_empty());
        if image.is_none() {
            missing.push(Field::Image);
        }
        match image {
            Some(img) if missing.is_empty() => Ok(img),
            _ => Err(ValidationError { missing }),
        }
    }
}

/// Read an image file, inferring its media type from the extension.
///
/// Only PNG, JPEG and WebP are accepted.
pub fn load_source_image(path: &Path) -> Result<SourceImage, InputError> {
    let media_type = MediaType::from_path(path)?;
    let bytes = std::fs::read(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(SourceImage::new(bytes, media_type))
}
