use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use inkdigit::api;
use inkdigit::assets::{AssetLoader, ConfigSource};
use inkdigit::models::{format_outcome, AppConfig, DrawingSummary, StrokeEvent};
use inkdigit::rendering::preview_png;
use inkdigit::server;
use inkdigit::services::{load_classifier, MlpClassifier, Recognizer};

#[derive(Parser)]
#[command(name = "inkdigit")]
#[command(about = "Handwritten digit recognizer - draw a digit, get a prediction")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server with the drawing page
    Serve,
    /// Classify a drawing stored as JSON strokes
    Classify {
        /// JSON file with strokes as `[[[x, y], ...], ...]`
        #[arg(short, long)]
        strokes: PathBuf,

        /// Model file (overrides config and MODEL_PATH)
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Write the 28x28 classifier input to this PNG file
        #[arg(short, long)]
        preview: Option<PathBuf>,
    },
    /// Extract the embedded config.yaml for customization
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "inkdigit API",
        description = "Handwritten digit recognition from canvas strokes",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_model_status,
        api::handle_classify,
        api::handle_create_session,
        api::handle_session_events,
        api::handle_clear_session,
        api::handle_classify_session,
        api::handle_delete_session,
    ),
    components(schemas(
        api::ClassifyRequest,
        api::ClassifyResponse,
        api::ErrorResponse,
        api::ModelStatusResponse,
        api::SessionCreated,
        api::EventsRequest,
        StrokeEvent,
        DrawingSummary,
    )),
    tags(
        (name = "Classification", description = "Digit recognition"),
        (name = "Sessions", description = "Incremental drawing sessions")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Classify {
            strokes,
            model,
            preview,
        }) => run_classify_command(&strokes, model, preview.as_deref()),
        Some(Commands::Init { force }) => run_init_command(force),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn asset_loader_from_env() -> AssetLoader {
    let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
    AssetLoader::new(config_file)
}

fn model_path_from_env() -> Option<PathBuf> {
    std::env::var("MODEL_PATH").ok().map(PathBuf::from)
}

/// Classify a stroke file once (no server needed)
fn run_classify_command(
    strokes_path: &Path,
    model: Option<PathBuf>,
    preview: Option<&Path>,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkdigit=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let loader = asset_loader_from_env();
    let config = AppConfig::load_from_assets(&loader)
        .with_model_path(model_path_from_env())
        .with_model_path(model);

    let content = std::fs::read_to_string(strokes_path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", strokes_path.display()))?;
    let request = api::ClassifyRequest {
        strokes: serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid stroke file: {e}"))?,
    };

    let classifier = load_classifier(config.model.path.as_deref());
    let recognizer = Recognizer::new(config.pipeline(), classifier);
    let outcome = recognizer.recognize(&request.to_stroke_set());

    println!("{}", format_outcome(&outcome));

    if let (Some(path), Ok(recognition)) = (preview, &outcome) {
        let png = preview_png(&recognition.preview, config.preview.scale)?;
        std::fs::write(path, &png)?;
        println!("Wrote preview {} ({} bytes)", path.display(), png.len());
    }

    if outcome.is_err() {
        std::process::exit(1);
    }
    Ok(())
}

/// Extract the embedded config to the filesystem
fn run_init_command(force: bool) -> anyhow::Result<()> {
    let loader = asset_loader_from_env();
    let report = loader.init(force)?;

    for f in &report.written {
        println!("  + {f}");
    }
    for f in &report.skipped {
        println!("  - {f} exists (use --force to overwrite)");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let model_path = std::env::var("MODEL_PATH").ok();

    println!("inkdigit v{VERSION}");
    println!("Handwritten digit recognizer\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  MODEL_PATH  = {}",
        model_path.as_deref().unwrap_or("(not set)")
    );

    let loader = asset_loader_from_env();
    let config_source = match (loader.config_source(), config_file) {
        (ConfigSource::File(path), _) => path.display().to_string(),
        (ConfigSource::Embedded, Some(_)) => "embedded (file not found)".to_string(),
        (ConfigSource::Embedded, None) => "embedded".to_string(),
    };

    let config = AppConfig::load_from_assets(&loader).with_model_path(model_path_from_env());
    let model_state = match config.model.path {
        Some(ref path) if path.exists() => match MlpClassifier::load(path) {
            Ok(classifier) => format!(
                "{} (loaded, {} layers)",
                path.display(),
                classifier.layer_count()
            ),
            Err(e) => format!("{} (invalid: {e})", path.display()),
        },
        Some(ref path) => format!(
            "{} (not found, create it with tools/export_model.py)",
            path.display()
        ),
        None => "(disabled)".to_string(),
    };

    println!("\nSources:");
    println!("  Config: {config_source}");
    println!("  Model:  {model_state}");
    println!(
        "  Canvas: {0}x{0}, stroke width {1}",
        config.canvas.size, config.canvas.stroke_width
    );

    println!("\nCommands:");
    println!("  inkdigit serve      Start the HTTP server");
    println!("  inkdigit classify   Classify a stroke file");
    println!("  inkdigit init       Extract config.yaml");
    println!("\nRun 'inkdigit --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkdigit=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let loader = Arc::new(asset_loader_from_env());

    tracing::info!(source = ?loader.config_source(), "Config source");

    let config = AppConfig::load_from_assets(&loader).with_model_path(model_path_from_env());
    let state = server::create_app_state(loader, config);

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "inkdigit server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
