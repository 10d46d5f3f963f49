//! Writes a submission to disk.
//!
//! ## Output Structure
//!
//! ```text
//! social-posts/
//! ├── index.html                        # HTML report (see crate::report)
//! ├── posts.json                        # Generated copy + image index
//! ├── stoneware-mug-facebook-image.jpeg
//! ├── stoneware-mug-instagram-image.jpeg
//! └── ...                               # One image per platform
//! ```
//!
//! Image names follow [`image_filename`]. Existing files with the same names
//! are overwritten; nothing else in the directory is touched.

use crate::content::GeneratedContent;
use crate::generate::SubmissionResult;
use crate::imaging::{AdaptedImage, MediaType};
use crate::input::Language;
use crate::naming::image_filename;
use crate::platform::Platform;
use crate::report::{ReportContext, render_report};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const POSTS_FILE: &str = "posts.json";
pub const REPORT_FILE: &str = "index.html";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Paths of everything one export wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub dir: PathBuf,
    pub images: Vec<(Platform, PathBuf)>,
    pub posts: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

/// `posts.json` document.
#[derive(Debug, Serialize)]
pub struct PostsDocument<'a> {
    pub keyword: &'a str,
    pub language: Language,
    pub generated_at: String,
    pub posts: &'a GeneratedContent,
    pub images: BTreeMap<Platform, ImageEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageEntry {
    pub file: String,
    pub width: u32,
    pub height: u32,
    pub media_type: MediaType,
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    fs::write(path, bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_dir(dir: &Path) -> Result<(), ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write each adapted image as `<product>-<platform>-image.<ext>` under `dir`.
pub fn export_images(
    images: &BTreeMap<Platform, AdaptedImage>,
    product: &str,
    dir: &Path,
) -> Result<Vec<(Platform, PathBuf)>, ExportError> {
    ensure_dir(dir)?;
    images
        .iter()
        .map(|(&platform, img)| {
            let path = dir.join(image_filename(product, platform, img.media_type));
            write_file(&path, &img.bytes)?;
            tracing::debug!(%platform, path = %path.display(), "wrote image");
            Ok((platform, path))
        })
        .collect()
}

/// Build the `posts.json` document for `result`.
pub fn posts_document<'a>(
    result: &'a SubmissionResult,
    ctx: &ReportContext<'a>,
) -> PostsDocument<'a> {
    let images = result
        .images
        .iter()
        .map(|(&platform, img)| {
            (
                platform,
                ImageEntry {
                    file: image_filename(ctx.product, platform, img.media_type),
                    width: img.width,
                    height: img.height,
                    media_type: img.media_type,
                },
            )
        })
        .collect();
    PostsDocument {
        keyword: ctx.keyword,
        language: ctx.language,
        generated_at: chrono::Local::now().to_rfc3339(),
        posts: &result.posts,
        images,
    }
}

/// Write images, `posts.json` and the HTML report for `result` into `dir`.
pub fn export_submission(
    result: &SubmissionResult,
    ctx: &ReportContext,
    dir: &Path,
) -> Result<ExportSummary, ExportError> {
    let images = export_images(&result.images, ctx.product, dir)?;

    let posts_path = dir.join(POSTS_FILE);
    let json = serde_json::to_string_pretty(&posts_document(result, ctx))?;
    write_file(&posts_path, json.as_bytes())?;

    let report_path = dir.join(REPORT_FILE);
    let html = render_report(result, ctx).into_string();
    write_file(&report_path, html.as_bytes())?;

    tracing::info!(dir = %dir.display(), images = images.len(), "export complete");
    Ok(ExportSummary {
        dir: dir.to_path_buf(),
        images,
        posts: Some(posts_path),
        report: Some(report_path),
    })
}
