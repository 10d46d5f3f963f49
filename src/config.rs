//! Application configuration.
//!
//! Handles loading, validating, and merging `social-gen.toml`. Stock defaults
//! are serialized to a TOML table and the user file is merged on top, so a
//! config file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [api]
//! endpoint = "https://generativelanguage.googleapis.com/v1beta"
//! model = "gemini-2.5-flash"
//! temperature = 0.7
//! timeout_secs = 90
//!
//! [images]
//! jpeg_quality = 90              # 1-100
//! max_canvas_pixels = 40000000   # Largest output canvas the adapter will allocate
//!
//! [output]
//! dir = "social-posts"
//!
//! [colors.light]
//! background = "#f9fafb"
//! surface = "#ffffff"
//! text = "#374151"
//! text_muted = "#6b7280"
//! border = "#e5e7eb"
//! hashtag = "#2563eb"
//! keyword = "#ea580c"
//! keyword_background = "#ffedd5"
//!
//! [colors.dark]
//! # same keys, dark palette
//!
//! [processing]
//! max_processes = 4              # Omit for auto = CPU cores
//! ```
//!
//! The API key is never read from this file; see
//! [`CREDENTIAL_VARS`](crate::content::client::CREDENTIAL_VARS).
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "social-gen.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Application configuration loaded from `social-gen.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Generation API settings.
    pub api: ApiConfig,
    /// Image adaptation settings.
    pub images: ImagesConfig,
    /// Where exported artifacts go.
    pub output: OutputConfig,
    /// Report color schemes for light and dark themes.
    pub colors: ColorConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl AppConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.endpoint.trim().is_empty() {
            return Err(ConfigError::Validation("api.endpoint must not be empty".into()));
        }
        if self.api.model.trim().is_empty() {
            return Err(ConfigError::Validation("api.model must not be empty".into()));
        }
        if !(0.0..=2.0).contains(&self.api.temperature) {
            return Err(ConfigError::Validation(
                "api.temperature must be 0.0-2.0".into(),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be non-zero".into(),
            ));
        }
        if !(1..=100).contains(&self.images.jpeg_quality) {
            return Err(ConfigError::Validation(
                "images.jpeg_quality must be 1-100".into(),
            ));
        }
        if self.images.max_canvas_pixels == 0 {
            return Err(ConfigError::Validation(
                "images.max_canvas_pixels must be non-zero".into(),
            ));
        }
        if self.output.dir.trim().is_empty() {
            return Err(ConfigError::Validation("output.dir must not be empty".into()));
        }
        Ok(())
    }
}

/// Generation API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL; the request goes to `{endpoint}/models/{model}:generateContent`.
    pub endpoint: String,
    pub model: String,
    /// Sampling temperature sent with every request.
    pub temperature: f32,
    /// Upper bound on the content call, in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            temperature: crate::content::request::DEFAULT_TEMPERATURE,
            timeout_secs: 90,
        }
    }
}

/// Image adaptation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// JPEG encoding quality (1 = worst, 100 = best). PNG and WebP are lossless.
    pub jpeg_quality: u32,
    /// Largest output canvas, in pixels, the adapter will allocate.
    pub max_canvas_pixels: u64,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 90,
            max_canvas_pixels: crate::imaging::DEFAULT_MAX_CANVAS_PIXELS,
        }
    }
}

impl ImagesConfig {
    pub fn adapt_config(&self) -> crate::imaging::AdaptConfig {
        crate::imaging::AdaptConfig {
            quality: crate::imaging::Quality::new(self.jpeg_quality),
            max_canvas_pixels: self.max_canvas_pixels,
        }
    }
}

/// Export destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory that receives images, `posts.json` and `index.html`.
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "social-posts".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image adaptation workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Color configuration for light and dark themes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Card background.
    pub surface: String,
    pub text: String,
    /// Labels and the word/character footer.
    pub text_muted: String,
    pub border: String,
    /// Hashtag highlight.
    pub hashtag: String,
    /// Focus keyword highlight.
    pub keyword: String,
    pub keyword_background: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f9fafb".to_string(),
            surface: "#ffffff".to_string(),
            text: "#374151".to_string(),
            text_muted: "#6b7280".to_string(),
            border: "#e5e7eb".to_string(),
            hashtag: "#2563eb".to_string(),
            keyword: "#ea580c".to_string(),
            keyword_background: "#ffedd5".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0f172a".to_string(),
            surface: "#1e293b".to_string(),
            text: "#d1d5db".to_string(),
            text_muted: "#9ca3af".to_string(),
            border: "#334155".to_string(),
            hashtag: "#60a5fa".to_string(),
            keyword: "#fb923c".to_string(),
            keyword_background: "#431407".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

/// Generate CSS custom properties for one color scheme under `selector`.
fn scheme_css(selector: &str, scheme: &ColorScheme) -> String {
    format!(
        r#"{selector} {{
    --color-bg: {bg};
    --color-surface: {surface};
    --color-text: {text};
    --color-text-muted: {muted};
    --color-border: {border};
    --color-hashtag: {hashtag};
    --color-keyword: {keyword};
    --color-keyword-bg: {keyword_bg};
}}"#,
        bg = scheme.background,
        surface = scheme.surface,
        text = scheme.text,
        muted = scheme.text_muted,
        border = scheme.border,
        hashtag = scheme.hashtag,
        keyword = scheme.keyword,
        keyword_bg = scheme.keyword_background,
    )
}

/// Generate CSS custom properties from color config.
///
/// The light scheme applies to `:root`; the dark scheme applies when the
/// document element carries `data-theme="dark"`.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        "{}\n\n{}",
        scheme_css(":root", &colors.light),
        scheme_css(":root[data-theme=\"dark\"]", &colors.dark)
    )
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(AppConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AppConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AppConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the file at `path`.
///
/// A missing file yields the stock defaults. Otherwise user values are
/// merged on top of stock defaults, unknown keys are rejected, and the
/// result is validated.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    if overlay.is_some() {
        tracing::debug!(path = %path.display(), "loaded config file");
    }
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `social-gen.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# social-gen Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# The file is read from ./social-gen.toml, or from the path given with
# --config. Unknown keys will cause an error.
#
# The API key is NOT configured here. Set API_KEY (or GEMINI_API_KEY) in the
# environment or in a .env file.

# ---------------------------------------------------------------------------
# Generation API
# ---------------------------------------------------------------------------
[api]
# Base URL of the generateContent REST API.
endpoint = "https://generativelanguage.googleapis.com/v1beta"

# Model used for copy generation.
model = "gemini-2.5-flash"

# Sampling temperature (0.0 - 2.0).
temperature = 0.7

# Give up on the content call after this many seconds.
timeout_secs = 90

# ---------------------------------------------------------------------------
# Image adaptation
# ---------------------------------------------------------------------------
[images]
# JPEG encoding quality (1 = worst, 100 = best). PNG and WebP are lossless.
jpeg_quality = 90

# Largest output canvas (width x height) the adapter will allocate.
max_canvas_pixels = 40000000

# ---------------------------------------------------------------------------
# Export
# ---------------------------------------------------------------------------
[output]
# Directory for adapted images, posts.json and index.html.
dir = "social-posts"

# ---------------------------------------------------------------------------
# Report colors - light theme
# ---------------------------------------------------------------------------
[colors.light]
background = "#f9fafb"
surface = "#ffffff"           # Card background
text = "#374151"
text_muted = "#6b7280"        # Labels, word/character counts
border = "#e5e7eb"
hashtag = "#2563eb"
keyword = "#ea580c"
keyword_background = "#ffedd5"

# ---------------------------------------------------------------------------
# Report colors - dark theme
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0f172a"
surface = "#1e293b"
text = "#d1d5db"
text_muted = "#9ca3af"
border = "#334155"
hashtag = "#60a5fa"
keyword = "#fb923c"
keyword_background = "#431407"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel image adaptation workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_api_settings() {
        let config = AppConfig::default();
        assert_eq!(config.api.model, "gemini-2.5-flash");
        assert_eq!(config.api.temperature, 0.7);
        assert_eq!(config.api.timeout_secs, 90);
    }

    #[test]
    fn default_config_has_image_settings() {
        let config = AppConfig::default();
        assert_eq!(config.images.jpeg_quality, 90);
        assert_eq!(config.images.max_canvas_pixels, 40_000_000);
        assert_eq!(config.output.dir, "social-posts");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[api]
model = "gemini-2.5-pro"
"##;
        let config: AppConfig = toml::from_str(toml).unwrap();
        // Overridden value
        assert_eq!(config.api.model, "gemini-2.5-pro");
        // Default values preserved
        assert_eq!(config.api.timeout_secs, 90);
        assert_eq!(config.images.jpeg_quality, 90);
        assert_eq!(config.colors.dark.background, "#0f172a");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml = r##"
[images]
quality = 80
"##;
        let result: Result<AppConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn adapt_config_carries_quality_and_budget() {
        let images = ImagesConfig {
            jpeg_quality: 75,
            max_canvas_pixels: 1_000,
        };
        let adapt = images.adapt_config();
        assert_eq!(adapt.quality.value(), 75);
        assert_eq!(adapt.max_canvas_pixels, 1_000);
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.light.hashtag = "#0000ff".to_string();
        colors.dark.background = "#1a1a1a".to_string();

        let css = generate_color_css(&colors);
        assert!(css.contains("--color-hashtag: #0000ff"));
        assert!(css.contains("--color-bg: #1a1a1a"));
        assert!(css.contains(":root[data-theme=\"dark\"]"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(DEFAULT_CONFIG_FILE);

        fs::write(
            &config_path,
            r##"
[api]
timeout_secs = 30

[output]
dir = "out"
"##,
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.output.dir, "out");
        // Unspecified values should be defaults
        assert_eq!(config.api.model, "gemini-2.5-flash");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&config_path, "this is not valid toml [[[").unwrap();

        let result = load_config(&config_path);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&config_path, "[images]\njpeg_quality = 0\n").unwrap();

        let result = load_config(&config_path);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r##"
[colors.light]
text = "#111"
border = "#ccc"
"##,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r##"
[colors.light]
text = "#000"
"##,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["colors"]["light"]["text"].as_str(), Some("#000"));
        assert_eq!(merged["colors"]["light"]["border"].as_str(), Some("#ccc"));
    }

    #[test]
    fn merge_toml_overlay_adds_keys() {
        let base: toml::Value = toml::from_str("[processing]").unwrap();
        let overlay: toml::Value = toml::from_str("[processing]\nmax_processes = 2").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["processing"]["max_processes"].as_integer(), Some(2));
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_quality_boundaries() {
        let mut config = AppConfig::default();
        config.images.jpeg_quality = 100;
        assert!(config.validate().is_ok());
        config.images.jpeg_quality = 101;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_zero_timeout() {
        let mut config = AppConfig::default();
        config.api.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_temperature_range() {
        let mut config = AppConfig::default();
        config.api.temperature = 2.5;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_empty_model() {
        let mut config = AppConfig::default();
        config.api.model = " ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // effective_threads tests
    // =========================================================================

    #[test]
    fn effective_threads_auto() {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&ProcessingConfig::default()), cores);
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_zero_means_one() {
        let config = ProcessingConfig {
            max_processes: Some(0),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let content = stock_config_toml();
        let _: toml::Value = toml::from_str(content).expect("stock config must be valid TOML");
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: AppConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        for section in [
            "[api]",
            "[images]",
            "[output]",
            "[colors.light]",
            "[colors.dark]",
            "[processing]",
        ] {
            assert!(content.contains(section), "{section}");
        }
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value().unwrap();
        assert!(val.is_table());
        for key in ["api", "images", "output", "colors", "processing"] {
            assert!(val.get(key).is_some(), "{key}");
        }
    }
}
