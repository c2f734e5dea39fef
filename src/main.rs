use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use chartshot::api;
use chartshot::models::options::ChartQuery;
use chartshot::models::{ChartOptions, RenderConfig, Table};
use chartshot::server;
use chartshot::services::ChartRenderer;

#[derive(Parser)]
#[command(name = "chartshot")]
#[command(about = "Render tabular data to chart images via headless Chrome")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Render a chart directly to an image file
    Render {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Chart type: "pie", "bar" or "line"
        #[arg(short = 't', long, default_value = "pie")]
        chart_type: String,

        /// Chart title
        #[arg(long)]
        title: Option<String>,

        /// Viewport width in pixels
        #[arg(short, long)]
        width: Option<String>,

        /// Viewport height in pixels
        #[arg(long)]
        height: Option<String>,

        /// Background CSS color
        #[arg(short, long)]
        background: Option<String>,

        /// Table as a JSON array of rows, header row first
        #[arg(short, long)]
        data: Option<String>,

        /// Image format: "png" or "jpeg"
        #[arg(short, long)]
        format: Option<String>,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chartshot API",
        description = "Renders tabular data to chart images via headless Chrome",
        version = "0.3.0",
        license(name = "MIT")
    ),
    paths(api::handle_chart_page, api::handle_chart_image, api::handle_diag),
    components(schemas(api::DiagResponse)),
    tags(
        (name = "Chart", description = "Chart preview and image rendering"),
        (name = "Diagnostics", description = "Runtime and browser diagnostics")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Render {
            output,
            chart_type,
            title,
            width,
            height,
            background,
            data,
            format,
        }) => {
            run_render_command(
                &output, chart_type, title, width, height, background, data, format,
            )
            .await
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chartshot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RenderConfig::from_env();
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    tracing::info!(
        executable = ?config.executable_path,
        env_override = config.has_env_override(),
        sandbox_disabled = config.disable_sandbox,
        "Browser configuration"
    );

    let state = server::create_app_state(config);

    let app = server::build_router(state)
        // OpenAPI documentation (server mode only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Chartshot server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Render one chart to a file (no server needed)
#[allow(clippy::too_many_arguments)]
async fn run_render_command(
    output: &PathBuf,
    chart_type: String,
    title: Option<String>,
    width: Option<String>,
    height: Option<String>,
    background: Option<String>,
    data: Option<String>,
    format: Option<String>,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chartshot=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let query = ChartQuery {
        w: width,
        h: height,
        chart_type: Some(chart_type),
        title,
        format,
        background,
        data,
    };

    let options = ChartOptions::from_query(&query);
    let table = Table::normalize(query.data.as_deref(), options.chart_type)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let renderer = ChartRenderer::new(RenderConfig::from_env());
    let bytes = renderer.render(&table, &options).await?;

    std::fs::write(output, &bytes)?;
    println!("Rendered {} ({} bytes)", output.display(), bytes.len());

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    use chartshot::models::config::CHROME_PATH_ENV;
    use chartshot::services::session::resolve_executable;

    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let chrome_path = std::env::var(CHROME_PATH_ENV).ok();

    println!("Chartshot v{VERSION}");
    println!("Chart-to-image rendering service\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CHROME_PATH = {}",
        chrome_path.as_deref().unwrap_or("(not set)")
    );

    println!("\nBrowser:");
    match resolve_executable(&RenderConfig::from_env()) {
        Ok(path) => println!("  Executable: {}", path.display()),
        Err(e) => println!("  Executable: not found ({e})"),
    }

    println!("\nCommands:");
    println!("  chartshot serve     Start the HTTP server");
    println!("  chartshot render    Render a chart to an image file");
    println!("\nRun 'chartshot --help' for more details.");
}
