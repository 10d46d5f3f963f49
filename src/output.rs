//! CLI output formatting for every command.
//!
//! # Output Format
//!
//! ## Generate
//!
//! ```text
//! 001 Facebook
//!     Image: stoneware-mug-facebook-image.jpeg (1080×1080)
//!     ☕ Meet your new favorite mug!
//!     Shop now: https://shop.example/mug
//!     12 Words · 64 Characters
//! 006 Pinterest
//!     Image: stoneware-mug-pinterest-image.jpeg (1000×1500)
//!     📌 Pin Title
//!         Handmade Stoneware Mug
//!     📄 Pin Description
//!         A dishwasher-safe stoneware mug.
//!     8 Words · 57 Characters
//!
//! Wrote 8 images, posts.json, index.html → social-posts/
//! ```
//!
//! ## Platforms
//!
//! ```text
//! 001 facebook     1080×1080   1:1    text
//! 006 pinterest    1000×1500   2:3    title + description
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects. Diagnostics go through
//! `tracing` to stderr, never through here.

use crate::content::{GeneratedContent, PlatformContent};
use crate::export::ExportSummary;
use crate::generate::SubmissionResult;
use crate::imaging::AdaptedImage;
use crate::input::{Language, ValidationError};
use crate::messages::{titled_labels, ui_text};
use crate::naming::image_filename;
use crate::platform::{Platform, SchemaField, dimensions_for, schema_field_for};
use crate::state::Preferences;
use std::collections::BTreeMap;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// 1-based position of `platform` in [`Platform::ALL`].
fn platform_index(platform: Platform) -> usize {
    Platform::ALL
        .iter()
        .position(|&p| p == platform)
        .map_or(0, |i| i + 1)
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// Reduced aspect ratio, e.g. `16:9`.
fn aspect_label(width: u32, height: u32) -> String {
    let g = gcd(width, height).max(1);
    format!("{}:{}", width / g, height / g)
}

/// Push every line of `text` at `depth`, keeping blank lines blank.
fn push_block(lines: &mut Vec<String>, text: &str, depth: usize) {
    for line in text.lines() {
        if line.trim().is_empty() {
            lines.push(String::new());
        } else {
            lines.push(format!("{}{}", indent(depth), line));
        }
    }
}

fn image_line(product: &str, platform: Platform, img: &AdaptedImage) -> String {
    format!(
        "{}Image: {} ({}×{})",
        indent(1),
        image_filename(product, platform, img.media_type),
        img.width,
        img.height
    )
}

// ============================================================================
// Generate
// ============================================================================

/// Format one card per platform, in [`Platform::ALL`] order.
pub fn format_post_cards(
    posts: &GeneratedContent,
    images: &BTreeMap<Platform, AdaptedImage>,
    product: &str,
    language: Language,
) -> Vec<String> {
    let t = ui_text(language);
    let mut lines = Vec::new();

    for platform in Platform::ALL {
        let Some(content) = posts.get(&platform) else {
            continue;
        };
        lines.push(format!(
            "{} {}",
            format_index(platform_index(platform)),
            platform.display_name()
        ));
        if let Some(img) = images.get(&platform) {
            lines.push(image_line(product, platform, img));
        }
        match content {
            PlatformContent::Text(text) => push_block(&mut lines, text, 1),
            PlatformContent::Titled(post) => {
                let (title_label, desc_label) = titled_labels(platform, language);
                lines.push(format!("{}{}", indent(1), title_label));
                push_block(&mut lines, &post.title, 2);
                lines.push(format!("{}{}", indent(1), desc_label));
                push_block(&mut lines, &post.description, 2);
            }
        }
        let stats = content.stats();
        lines.push(format!(
            "{}{} {} · {} {}",
            indent(1),
            stats.words,
            t.words,
            stats.characters,
            t.characters
        ));
    }

    lines
}

/// Format the "what was written" line of an export.
pub fn format_export_summary(summary: &ExportSummary) -> Vec<String> {
    let mut written = vec![format!(
        "{} image{}",
        summary.images.len(),
        if summary.images.len() == 1 { "" } else { "s" }
    )];
    for path in [&summary.posts, &summary.report].into_iter().flatten() {
        if let Some(name) = path.file_name() {
            written.push(name.to_string_lossy().into_owned());
        }
    }
    vec![format!(
        "Wrote {} → {}/",
        written.join(", "),
        summary.dir.display()
    )]
}

/// Format a full submission: cards followed by the export summary.
pub fn format_generate_output(
    result: &SubmissionResult,
    summary: &ExportSummary,
    product: &str,
    language: Language,
) -> Vec<String> {
    let mut lines = format_post_cards(&result.posts, &result.images, product, language);
    lines.push(String::new());
    lines.extend(format_export_summary(summary));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(
    result: &SubmissionResult,
    summary: &ExportSummary,
    product: &str,
    language: Language,
) {
    for line in format_generate_output(result, summary, product, language) {
        println!("{}", line);
    }
}

// ============================================================================
// Adapt
// ============================================================================

/// Format the images written by the `adapt` command.
pub fn format_adapt_output(summary: &ExportSummary) -> Vec<String> {
    let mut lines: Vec<String> = summary
        .images
        .iter()
        .map(|(platform, path)| {
            let d = dimensions_for(*platform);
            format!(
                "{} {:<12}{:>4}×{:<6} → {}",
                format_index(platform_index(*platform)),
                platform.key(),
                d.width,
                d.height,
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            )
        })
        .collect();
    lines.extend(format_export_summary(summary));
    lines
}

/// Print adapt output to stdout.
pub fn print_adapt_output(summary: &ExportSummary) {
    for line in format_adapt_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Platforms
// ============================================================================

/// Format the platform dimension table.
pub fn format_platforms() -> Vec<String> {
    Platform::ALL
        .iter()
        .enumerate()
        .map(|(i, &platform)| {
            let d = dimensions_for(platform);
            let schema = match schema_field_for(platform) {
                SchemaField::Text => "text",
                SchemaField::TitleDescription => "title + description",
            };
            format!(
                "{} {:<12}{:>4}×{:<7} {:<6} {}",
                format_index(i + 1),
                platform.key(),
                d.width,
                d.height,
                aspect_label(d.width, d.height),
                schema
            )
        })
        .collect()
}

/// Print the platform dimension table to stdout.
pub fn print_platforms() {
    for line in format_platforms() {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the outcome of input validation.
pub fn format_check_output(
    outcome: Result<(), &ValidationError>,
    image: Option<&Path>,
    language: Language,
) -> Vec<String> {
    match outcome {
        Ok(()) => {
            let mut lines = vec!["Input OK".to_string()];
            if let Some(path) = image {
                lines.push(format!("{}Image: {}", indent(1), path.display()));
            }
            lines
        }
        Err(err) => {
            let mut lines = vec![ui_text(language).fill_all.to_string()];
            for field in &err.missing {
                lines.push(format!("{}Missing: {}", indent(1), field));
            }
            lines
        }
    }
}

/// Print validation outcome to stdout.
pub fn print_check_output(
    outcome: Result<(), &ValidationError>,
    image: Option<&Path>,
    language: Language,
) {
    for line in format_check_output(outcome, image, language) {
        println!("{}", line);
    }
}

// ============================================================================
// Preferences
// ============================================================================

/// Format stored preferences.
pub fn format_preferences(prefs: &Preferences, path: &Path) -> Vec<String> {
    vec![
        format!("Theme: {}", prefs.theme),
        format!(
            "Language: {} ({})",
            prefs.language.code(),
            prefs.language.english_name()
        ),
        format!("{}Source: {}", indent(1), path.display()),
    ]
}

/// Print stored preferences to stdout.
pub fn print_preferences(prefs: &Preferences, path: &Path) {
    for line in format_preferences(prefs, path) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
