use clap::{Parser, Subcommand};
use social_gen::config::{self, AppConfig};
use social_gen::content::GeminiClient;
use social_gen::export::{self, ExportSummary};
use social_gen::generate::{self, GenerateError, GenerateOptions};
use social_gen::imaging::RustBackend;
use social_gen::input::{Language, UserInput, load_source_image};
use social_gen::naming::product_slug;
use social_gen::output;
use social_gen::platform::Platform;
use social_gen::report::ReportContext;
use social_gen::state::{AppState, Preferences, Theme};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "social-gen")]
#[command(about = "Generate social media posts and platform-sized images for a product")]
#[command(long_about = "\
Generate social media posts and platform-sized images for a product

One submission takes a product description, a product URL, a focus keyword
and a photo. It produces:

  social-posts/
  ├── index.html                       # Report with copy buttons and downloads
  ├── posts.json                       # Generated copy for all platforms
  ├── <product>-facebook-image.jpeg    # 1080×1080
  ├── <product>-twitter-image.jpeg     # 1600×900
  ├── <product>-pinterest-image.jpeg   # 1000×1500
  ├── <product>-youtube-image.jpeg     # 1280×720
  ├── <product>-tiktok-image.jpeg      # 1080×1920
  └── ...

The API key is read from API_KEY or GEMINI_API_KEY (a .env file in the
working directory is loaded first).

Run 'social-gen gen-config' to generate a documented social-gen.toml.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Directory for persisted preferences
    #[arg(long, default_value = ".social-gen", global = true)]
    state_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// The four submission fields.
#[derive(clap::Args, Clone)]
struct InputArgs {
    /// Product description
    #[arg(long, default_value = "")]
    description: String,

    /// Product page URL
    #[arg(long, default_value = "")]
    url: String,

    /// Focus keyword for SEO
    #[arg(long, default_value = "")]
    keyword: String,

    /// Product image (PNG, JPEG or WebP)
    #[arg(long)]
    image: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate copy and images for every platform
    Generate {
        #[command(flatten)]
        input: InputArgs,

        /// Output language (defaults to the saved preference)
        #[arg(long)]
        language: Option<Language>,

        /// Report theme (defaults to the saved preference)
        #[arg(long)]
        theme: Option<Theme>,

        /// Output directory (defaults to output.dir from the config)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Adapt an image to platform sizes without generating copy
    Adapt {
        /// Product image (PNG, JPEG or WebP)
        image: PathBuf,

        /// Limit to these platforms (repeatable; default: all)
        #[arg(long = "platform")]
        platforms: Vec<Platform>,

        /// Product name used in filenames (defaults to the image file name)
        #[arg(long)]
        product: Option<String>,

        /// Output directory (defaults to output.dir from the config)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Validate submission fields without calling the API
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
    /// List platforms with their image sizes and content shape
    Platforms,
    /// Show or change saved preferences
    Prefs {
        #[arg(long)]
        theme: Option<Theme>,

        /// Switch between light and dark
        #[arg(long, conflicts_with = "theme")]
        toggle_theme: bool,

        #[arg(long)]
        language: Option<Language>,
    },
    /// Print a stock social-gen.toml with all options documented
    GenConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv = dotenv::dotenv();
    init_tracing();
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(_) => tracing::debug!("no .env file, using process environment"),
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            input,
            language,
            theme,
            output: out_dir,
        } => {
            let config = config::load_config(&cli.config)?;
            init_thread_pool(&config.processing);
            let prefs = Preferences::load(&cli.state_dir)?;
            let language = language.unwrap_or(prefs.language);
            let theme = theme.unwrap_or(prefs.theme);

            let user_input = read_input(&input)?;
            let mut state = AppState::new(prefs);
            let result = match run_submission(&user_input, language, &config).await {
                Ok(result) => result,
                Err(err) => {
                    tracing::error!(kind = ?err.kind(), error = %err, "generation failed");
                    eprintln!("{}", err.user_message(language));
                    std::process::exit(1);
                }
            };
            state.replace_result(result);

            let Some(result) = state.result() else {
                return Ok(());
            };
            let product = product_slug(&input.keyword);
            let ctx = ReportContext {
                keyword: &input.keyword,
                product: &product,
                language,
                theme,
                colors: &config.colors,
            };
            let dir = out_dir.unwrap_or_else(|| PathBuf::from(&config.output.dir));
            let summary = export::export_submission(result, &ctx, &dir)?;
            output::print_generate_output(result, &summary, &product, language);
        }
        Command::Adapt {
            image,
            platforms,
            product,
            output: out_dir,
        } => {
            let config = config::load_config(&cli.config)?;
            init_thread_pool(&config.processing);
            let source = load_source_image(&image)?;
            let platforms = if platforms.is_empty() {
                Platform::ALL.to_vec()
            } else {
                platforms
            };
            let product = product_slug(&product.unwrap_or_else(|| file_stem(&image)));
            let images = generate::adapt_only(
                &source,
                platforms,
                Arc::new(RustBackend::new()),
                config.images.adapt_config(),
            )
            .await?;
            let dir = out_dir.unwrap_or_else(|| PathBuf::from(&config.output.dir));
            let written = export::export_images(&images, &product, &dir)?;
            output::print_adapt_output(&ExportSummary {
                dir,
                images: written,
                posts: None,
                report: None,
            });
        }
        Command::Check { input } => {
            let prefs = Preferences::load(&cli.state_dir)?;
            let user_input = read_input(&input)?;
            let outcome = user_input.validate().map(|_| ());
            output::print_check_output(
                outcome.as_ref().map(|_| ()),
                input.image.as_deref(),
                prefs.language,
            );
            if outcome.is_err() {
                std::process::exit(1);
            }
        }
        Command::Platforms => {
            output::print_platforms();
        }
        Command::Prefs {
            theme,
            toggle_theme,
            language,
        } => {
            let mut prefs = Preferences::load(&cli.state_dir)?;
            let before = prefs;
            if toggle_theme {
                prefs.theme = prefs.theme.toggled();
            }
            if let Some(theme) = theme {
                prefs.theme = theme;
            }
            if let Some(language) = language {
                prefs.language = language;
            }
            let path = if prefs != before {
                prefs.save(&cli.state_dir)?
            } else {
                cli.state_dir.join(social_gen::state::PREFERENCES_FILE)
            };
            output::print_preferences(&prefs, &path);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Create the client and run one submission.
///
/// Validation runs before the credential lookup so an incomplete form is
/// reported as such even when no key is configured.
async fn run_submission(
    input: &UserInput,
    language: Language,
    config: &AppConfig,
) -> Result<generate::SubmissionResult, GenerateError> {
    input.validate()?;
    let client = GeminiClient::from_env(&config.api)?;
    generate::generate(
        input,
        language,
        &client,
        Arc::new(RustBackend::new()),
        &GenerateOptions::from_config(config),
    )
    .await
}

fn read_input(args: &InputArgs) -> Result<UserInput, social_gen::input::InputError> {
    let image = args.image.as_deref().map(load_source_image).transpose()?;
    Ok(UserInput {
        description: args.description.clone(),
        product_url: args.url.clone(),
        keyword: args.keyword.clone(),
        image,
    })
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Log to stderr; `RUST_LOG` overrides the default `social_gen=info`.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("social_gen=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
