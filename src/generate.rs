//! Submission orchestration.
//!
//! One submission runs two independent branches concurrently and joins them:
//!
//! ```text
//!                  ┌─► content: build request ─► generator ─► parse ─┐
//! validate input ──┤                                                 ├─► SubmissionResult
//!                  └─► images:  adapt_all (blocking pool + rayon) ───┘
//! ```
//!
//! The join is all-or-nothing: the first failure observed fails the whole
//! submission and the other branch's result is discarded. Validation runs
//! before either branch starts, so an incomplete input never reaches the
//! generator or the image backend.

use crate::config::AppConfig;
use crate::content::{
    ContentError, ContentGenerator, GeneratedContent, build_request_for_today,
    parse_generated_content,
};
use crate::imaging::{
    AdaptConfig, AdaptError, AdaptRunError, AdaptedImage, ImageBackend, PlatformAdaptError,
    adapt_all,
};
use crate::input::{Language, UserInput, ValidationError};
use crate::messages::ui_text;
use crate::platform::Platform;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("API key is missing: set {0}")]
    MissingCredential(String),
    #[error("Generation API error: {0}")]
    Api(String),
    #[error("Generated content has an unexpected format: {0}")]
    ContentFormat(String),
    #[error("Could not decode the source image: {0}")]
    Decode(String),
    #[error("Could not render the image for {platform}: {message}")]
    Render { platform: Platform, message: String },
    /// A worker panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(String),
}

/// Flat classification of [`GenerateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    MissingCredential,
    Api,
    ContentFormat,
    Decode,
    Render,
    Task,
}

impl GenerateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerateError::Validation(_) => ErrorKind::Validation,
            GenerateError::MissingCredential(_) => ErrorKind::MissingCredential,
            GenerateError::Api(_) => ErrorKind::Api,
            GenerateError::ContentFormat(_) => ErrorKind::ContentFormat,
            GenerateError::Decode(_) => ErrorKind::Decode,
            GenerateError::Render { .. } => ErrorKind::Render,
            GenerateError::Task(_) => ErrorKind::Task,
        }
    }

    /// The message shown to the user.
    ///
    /// Validation failures ask the user to complete the form; every other
    /// failure collapses to one generic "try again" message. The detailed
    /// error is for logs.
    pub fn user_message(&self, language: Language) -> &'static str {
        let text = ui_text(language);
        match self.kind() {
            ErrorKind::Validation => text.fill_all,
            _ => text.error,
        }
    }
}

impl From<ContentError> for GenerateError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::MissingCredential(vars) => GenerateError::MissingCredential(vars),
            ContentError::Api(msg) => GenerateError::Api(msg),
            ContentError::Format(msg) => GenerateError::ContentFormat(msg),
        }
    }
}

impl From<AdaptRunError> for GenerateError {
    fn from(err: AdaptRunError) -> Self {
        match err {
            AdaptRunError::Source(AdaptError::Decode(message) | AdaptError::Render(message)) => {
                GenerateError::Decode(message)
            }
            AdaptRunError::Platform(PlatformAdaptError { platform, source }) => match source {
                AdaptError::Decode(message) => GenerateError::Decode(message),
                AdaptError::Render(message) => GenerateError::Render { platform, message },
            },
        }
    }
}

/// Knobs for one submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerateOptions {
    /// Upper bound on the content branch, from request to parsed result.
    pub timeout: Duration,
    pub temperature: f32,
    pub adapt: AdaptConfig,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl GenerateOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.api.timeout_secs),
            temperature: config.api.temperature,
            adapt: config.images.adapt_config(),
        }
    }
}

/// Everything one successful submission produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionResult {
    pub posts: GeneratedContent,
    pub images: BTreeMap<Platform, AdaptedImage>,
}

/// Run one submission: validate, then generate copy and adapt the image
/// concurrently, and join both into a [`SubmissionResult`].
///
/// Image work runs on tokio's blocking pool and fans out over rayon. If the
/// content branch fails first, the image task is left to finish on its own
/// and its output is dropped.
pub async fn generate<G, B>(
    input: &UserInput,
    language: Language,
    generator: &G,
    backend: Arc<B>,
    options: &GenerateOptions,
) -> Result<SubmissionResult, GenerateError>
where
    G: ContentGenerator + ?Sized,
    B: ImageBackend + Send + 'static,
{
    let source = input.validate()?.clone();

    let mut request = build_request_for_today(input, language);
    request.temperature = options.temperature;

    tracing::info!(
        %language,
        media_type = %source.media_type,
        bytes = source.bytes.len(),
        "starting submission"
    );

    let timeout = options.timeout;
    let content = async {
        let text = tokio::time::timeout(timeout, generator.generate(&request))
            .await
            .map_err(|_| {
                GenerateError::Api(format!("no response within {}s", timeout.as_secs_f32()))
            })??;
        let posts = parse_generated_content(&text)?;
        tracing::debug!(platforms = posts.len(), "content parsed");
        Ok::<_, GenerateError>(posts)
    };

    let adapt_config = options.adapt;
    let images = async move {
        let images = tokio::task::spawn_blocking(move || {
            adapt_all(&*backend, &source, &adapt_config)
        })
        .await
        .map_err(|e| GenerateError::Task(e.to_string()))??;
        tracing::debug!(platforms = images.len(), "images adapted");
        Ok::<_, GenerateError>(images)
    };

    let (posts, images) = tokio::try_join!(content, images).inspect_err(|e| {
        tracing::warn!(kind = ?e.kind(), error = %e, "submission failed");
    })?;

    tracing::info!("submission complete");
    Ok(SubmissionResult { posts, images })
}

/// Adapt the source image only, with no content generation.
///
/// Used by the `adapt` command, which needs no credential.
pub async fn adapt_only<B>(
    input: &crate::imaging::SourceImage,
    platforms: Vec<Platform>,
    backend: Arc<B>,
    config: AdaptConfig,
) -> Result<BTreeMap<Platform, AdaptedImage>, GenerateError>
where
    B: ImageBackend + Send + 'static,
{
    let source = input.clone();
    let images = tokio::task::spawn_blocking(move || {
        crate::imaging::adapt_platforms(&*backend, &source, &platforms, &config)
    })
    .await
    .map_err(|e| GenerateError::Task(e.to_string()))??;
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;
    use crate::imaging::{MediaType, RustBackend};
    use crate::input::Field;
    use crate::platform::dimensions_for;
    use crate::test_helpers::{MockGenerator, sample_response_json, valid_input};

    fn options() -> GenerateOptions {
        GenerateOptions {
            timeout: Duration::from_secs(10),
            ..GenerateOptions::default()
        }
    }

    // =========================================================================
    // Success path
    // =========================================================================

    #[tokio::test]
    async fn successful_submission_has_every_platform() {
        let generator = MockGenerator::replying(sample_response_json());
        let backend = Arc::new(MockBackend::new());

        let result = generate(
            &valid_input(),
            Language::En,
            &generator,
            Arc::clone(&backend),
            &options(),
        )
        .await
        .unwrap();

        assert_eq!(result.posts.len(), Platform::ALL.len());
        assert_eq!(result.images.len(), Platform::ALL.len());
        for platform in Platform::ALL {
            let img = &result.images[&platform];
            let d = dimensions_for(platform);
            assert_eq!((img.width, img.height), (d.width, d.height));
        }
        assert_eq!(generator.requests().len(), 1);
        assert_eq!(backend.adapt_count(), Platform::ALL.len());
        assert_eq!(backend.decode_count(), 1);
    }

    #[tokio::test]
    async fn request_uses_language_and_temperature() {
        let generator = MockGenerator::replying(sample_response_json());
        let opts = GenerateOptions {
            temperature: 0.3,
            ..options()
        };
        generate(
            &valid_input(),
            Language::Ar,
            &generator,
            Arc::new(MockBackend::new()),
            &opts,
        )
        .await
        .unwrap();

        let requests = generator.requests();
        assert_eq!(requests[0].temperature, 0.3);
        assert_eq!(requests[0].language, Language::Ar);
        assert!(requests[0].prompt.contains("Stoneware Mug"));
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[tokio::test]
    async fn empty_description_fails_before_any_work() {
        let generator = MockGenerator::replying(sample_response_json());
        let backend = Arc::new(MockBackend::new());
        let input = UserInput {
            description: String::new(),
            ..valid_input()
        };

        let err = generate(&input, Language::En, &generator, Arc::clone(&backend), &options())
            .await
            .unwrap_err();

        match &err {
            GenerateError::Validation(v) => assert_eq!(v.missing, vec![Field::Description]),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(generator.requests().is_empty());
        assert!(backend.get_operations().is_empty());
        assert_eq!(
            err.user_message(Language::En),
            "Please fill in all fields, including the image."
        );
    }

    // =========================================================================
    // All-or-nothing failures
    // =========================================================================

    #[tokio::test]
    async fn missing_youtube_is_content_format_error() {
        let mut payload: serde_json::Value =
            serde_json::from_str(&sample_response_json()).unwrap();
        payload.as_object_mut().unwrap().remove("youtube");
        let generator = MockGenerator::replying(payload.to_string());

        let err = generate(
            &valid_input(),
            Language::En,
            &generator,
            Arc::new(MockBackend::new()),
            &options(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ContentFormat);
        assert!(err.to_string().contains("youtube"));
    }

    #[tokio::test]
    async fn one_failed_adaptation_fails_the_submission() {
        let generator = MockGenerator::replying(sample_response_json());
        // 1000x1500 is pinterest only
        let backend = Arc::new(MockBackend::failing_on(
            1000,
            1500,
            AdaptError::Render("out of memory".into()),
        ));

        let err = generate(&valid_input(), Language::En, &generator, backend, &options())
            .await
            .unwrap_err();

        match err {
            GenerateError::Render { platform, message } => {
                assert_eq!(platform, Platform::Pinterest);
                assert_eq!(message, "out of memory");
            }
            other => panic!("expected render error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecodable_image_is_decode_error() {
        let generator = MockGenerator::replying(sample_response_json());
        let input = UserInput {
            image: Some(crate::imaging::SourceImage::new(
                b"not an image".to_vec(),
                MediaType::Jpeg,
            )),
            ..valid_input()
        };

        let err = generate(
            &input,
            Language::En,
            &generator,
            Arc::new(RustBackend::new()),
            &options(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn decode_failure_skips_every_platform() {
        let generator = MockGenerator::replying(sample_response_json());
        let backend = Arc::new(MockBackend::undecodable("corrupt scan"));

        let err = generate(
            &valid_input(),
            Language::En,
            &generator,
            Arc::clone(&backend),
            &options(),
        )
        .await
        .unwrap_err();

        assert!(matches!(&err, GenerateError::Decode(m) if m == "corrupt scan"), "{err:?}");
        assert_eq!(backend.decode_count(), 1);
        assert_eq!(backend.adapt_count(), 0);
    }

    #[tokio::test]
    async fn api_failure_fails_the_submission() {
        let generator = MockGenerator::failing(ContentError::Api("HTTP 500: boom".into()));
        let err = generate(
            &valid_input(),
            Language::En,
            &generator,
            Arc::new(MockBackend::new()),
            &options(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(
            err.user_message(Language::En),
            "Something went wrong. Please try again."
        );
    }

    #[tokio::test]
    async fn slow_generator_times_out_as_api_error() {
        let generator =
            MockGenerator::replying(sample_response_json()).with_delay(Duration::from_secs(30));
        let opts = GenerateOptions {
            timeout: Duration::from_millis(50),
            ..options()
        };

        let err = generate(
            &valid_input(),
            Language::En,
            &generator,
            Arc::new(MockBackend::new()),
            &opts,
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Api);
        assert!(err.to_string().contains("no response within"));
    }

    // =========================================================================
    // Error flattening
    // =========================================================================

    #[test]
    fn content_errors_map_to_kinds() {
        let cases = [
            (ContentError::MissingCredential("API_KEY".into()), ErrorKind::MissingCredential),
            (ContentError::Api("x".into()), ErrorKind::Api),
            (ContentError::Format("x".into()), ErrorKind::ContentFormat),
        ];
        for (err, kind) in cases {
            assert_eq!(GenerateError::from(err).kind(), kind);
        }
    }

    #[test]
    fn non_validation_errors_share_one_localized_message() {
        let errors = [
            GenerateError::MissingCredential("API_KEY".into()),
            GenerateError::Task("panicked".into()),
            GenerateError::Decode("bad".into()),
        ];
        for err in &errors {
            assert_eq!(err.user_message(Language::Ar), "حدث خطأ ما. يرجى المحاولة مرة أخرى.");
        }
    }

    #[tokio::test]
    async fn adapt_only_handles_a_subset() {
        let backend = Arc::new(MockBackend::new());
        let source = crate::imaging::SourceImage::new(vec![1u8], MediaType::WebP);
        let images = adapt_only(
            &source,
            vec![Platform::Youtube],
            Arc::clone(&backend),
            AdaptConfig::default(),
        )
        .await
        .unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[&Platform::Youtube].media_type, MediaType::WebP);
    }
}
