use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;

use docscan::api::{create_router, ApiDoc, AppState};
use docscan::config::{Config, LogFormat, LoggingConfig};
use docscan::mrz::MrzScanner;
use docscan::ocr::OcrEngine;
use docscan::services::ScanService;

#[derive(Parser)]
#[command(name = "docscan")]
#[command(about = "Self-hostable OCR and passport MRZ reading over HTTP")]
struct Args {
    /// Print the OpenAPI document as JSON and exit
    #[arg(long)]
    print_openapi: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_openapi {
        println!("{}", ApiDoc::openapi().to_pretty_json()?);
        return Ok(());
    }

    dotenvy::dotenv().ok();

    // Subscriber goes up before Config so bad env values get logged
    init_tracing(&LoggingConfig::from_env());

    let config = Config::from_env();

    tracing::info!("Initializing OCR engine ({})...", config.ocr.languages);
    let ocr = OcrEngine::new(&config.ocr)?;

    let mrz = MrzScanner::new(&config.mrz);
    if let Some(reason) = mrz.unavailable_reason() {
        tracing::warn!("MRZ unavailable - passport zones will not be read: {}", reason);
    }

    let addr = config.bind_address();
    let state = AppState::new(config, ScanService::new(ocr, mrz));
    let app = create_router(state);

    tracing::info!("Docscan starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/health", addr);
    tracing::info!("  OCR endpoint: http://{}/ocr", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "docscan=info,tower_http=debug".into());
    let json = logging.format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining in-flight requests...");
}
