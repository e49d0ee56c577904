//! flixx - render TMDB movie and TV pages as static HTML.

/// Application configuration (TOML).
mod config;

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use flixx_api::tmdb::TmdbClient;
use flixx_web::{Location, SearchCommand, Spinner, StaticPage, dispatch};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, TOKEN_ENV, resolve_config_path};

/// Pages written by `flixx site`, as `(path, file name)`.
const SITE_PAGES: [(&str, &str); 2] = [("/", "index.html"), ("/shows.html", "shows.html")];

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Render one page load to HTML.
    Render(RenderArgs),
    /// Render the home and TV shows pages into a directory.
    Site(SiteArgs),
    /// Write a default config file.
    Init(InitArgs),
}

/// Arguments for the `render` subcommand.
#[derive(clap::Args)]
struct RenderArgs {
    /// Page path (e.g. "/", "/movie-details.html?id=603").
    #[arg(long, default_value = "/")]
    path: String,

    /// Query string, appended to the path (e.g. "search-term=batman&type=movie").
    #[arg(long)]
    query: Option<String>,

    /// Pagination buttons to click after a search, in order.
    #[arg(long, value_delimiter = ',')]
    click: Vec<SearchCommand>,

    /// Output file (default: stdout).
    #[arg(long)]
    out: Option<PathBuf>,
}

/// Arguments for the `site` subcommand.
#[derive(clap::Args)]
struct SiteArgs {
    /// Directory to write the pages into.
    #[arg(long, required = true)]
    out_dir: PathBuf,
}

/// Arguments for the `init` subcommand.
#[derive(clap::Args)]
struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    force: bool,
}

/// Builds a `TmdbClient` from the config file and `TMDB_API_TOKEN`.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, no token is configured,
/// the base URL is invalid, or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(dir: Option<&Path>, spinner: &Arc<Spinner>) -> Result<TmdbClient> {
    let config_path = resolve_config_path(dir)?;
    let config = AppConfig::load(&config_path)?;
    let api_token = config
        .tmdb
        .resolve_api_token(std::env::var(TOKEN_ENV).ok())?;

    let indicator: Arc<Spinner> = Arc::clone(spinner);
    let mut builder = TmdbClient::builder()
        .api_token(api_token)
        .language(config.tmdb.language)
        .loading_indicator(indicator)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
    if let Some(raw) = config.tmdb.base_url.as_deref() {
        let url = Url::parse(raw).with_context(|| format!("invalid tmdb.base_url: {raw}"))?;
        builder = builder.base_url(url);
    }
    builder.build().context("failed to build TMDB client")
}

/// Writes `html` to `out`, or to stdout when `out` is `None`.
///
/// # Errors
///
/// Returns an error if the file or stdout cannot be written.
fn write_output(out: Option<&Path>, html: &str) -> Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }
            std::fs::write(path, html)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(html.as_bytes())
                .context("failed to write to stdout")?;
            stdout.flush().context("failed to flush stdout")?;
        }
    }
    Ok(())
}

/// Runs the `render` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the output cannot be
/// written. Failed TMDB requests are rendered into the page instead.
#[instrument(skip_all, fields(path = %args.path))]
async fn run_render(args: &RenderArgs, dir: Option<&Path>) -> Result<()> {
    let spinner = Arc::new(Spinner::default());
    let client = build_tmdb_client(dir, &spinner)?;

    let location = match args.query.as_deref() {
        Some(query) => Location::new(Location::parse(&args.path).path, query),
        None => Location::parse(&args.path),
    };
    let mut page = StaticPage::with_spinner(Arc::clone(&spinner));
    let load = dispatch(&client, &mut page, &location).await;

    if !args.click.is_empty() {
        match load.search {
            Some(mut controller) => {
                for &command in &args.click {
                    if !controller.handle(&client, &mut page, command).await {
                        tracing::info!(?command, "button disabled, nothing to load");
                    }
                }
            }
            None => tracing::warn!("--click ignored: {} is not the search page", location.path),
        }
    }

    write_output(args.out.as_deref(), &page.to_document(load.route))
}

/// Runs the `site` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or a page cannot be written.
#[instrument(skip_all)]
async fn run_site(args: &SiteArgs, dir: Option<&Path>) -> Result<()> {
    let spinner = Arc::new(Spinner::default());
    let client = build_tmdb_client(dir, &spinner)?;

    for (path, file) in SITE_PAGES {
        let mut page = StaticPage::with_spinner(Arc::clone(&spinner));
        let load = dispatch(&client, &mut page, &Location::parse(path)).await;
        write_output(
            Some(&args.out_dir.join(file)),
            &page.to_document(load.route),
        )?;
    }
    tracing::info!("Total: {} pages", SITE_PAGES.len());
    Ok(())
}

/// Runs the `init` subcommand.
///
/// # Errors
///
/// Returns an error if the config exists without `--force` or cannot be written.
#[instrument(skip_all)]
fn run_init(args: &InitArgs, dir: Option<&Path>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    if path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    AppConfig::default().save(&path)?;
    tracing::info!(
        "Wrote {}; set {TOKEN_ENV} or tmdb.api_token to render pages",
        path.display()
    );
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the rendered document.
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_deref();
    match cli.command {
        Commands::Render(args) => run_render(&args, dir).await,
        Commands::Site(args) => run_site(&args, dir).await,
        Commands::Init(args) => run_init(&args, dir),
    }
}
