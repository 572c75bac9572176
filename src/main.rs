//! Application entry point for the `sapm-alerts` service.
//!
//! This binary orchestrates the startup sequence for the alerting API:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Checking that the reading source loads, without making it fatal
//! - Mounting all API routes via the `routes` gateway
//! - Binding the Axum HTTP server and serving requests
//!
//! # Environment Variables
//! - `SAPM_DATA_PATH` (**required**) – CSV file holding sensor readings
//! - `SAPM_LOG_LEVEL` (optional) – log verbosity (default: `debug`)
//! - `SAPM_SPAN_EVENTS` (optional) – span event mode for tracing
//!
//! See `config.rs` for the remaining options.
use std::env;

use anyhow::Result;
use axum::Router;
use dotenvy::dotenv;
use is_terminal::IsTerminal;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use sapm_alerts::{config, routes, ReadingStore};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    // .env first so it can set the tracing variables
    dotenv().ok();
    init_tracing();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let store = ReadingStore::new(&cfg.data_path, cfg.timestamp_policy);

    // Every request re-reads the source; this only reports its state at startup.
    match store.load() {
        Ok(readings) => tracing::info!(
            "Reading source {} holds {} readings",
            store.path().display(),
            readings.len()
        ),
        Err(e) => tracing::warn!("Reading source not loadable at startup: {}", e),
    }

    let addr = cfg.listen_addr;
    let app: Router = routes::router(store, cfg);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ---

/// Initialize the global tracing subscriber for structured logging.
///
/// This function configures the [`tracing_subscriber`] with:
/// - Log target, file, and line number output enabled
/// - Color output controlled by TTY detection and `FORCE_COLOR` env var:
///   - `FORCE_COLOR=1|true|yes`: force colors on
///   - `FORCE_COLOR=0|false|no`: force colors off
///   - unset or other values: auto-detect TTY
/// - Span event emission mode controlled by the `SAPM_SPAN_EVENTS` env var:
///   - `"full"`       : emit ENTER, EXIT, and CLOSE events with timing
///   - `"enter_exit"` : emit ENTER and EXIT only
///   - unset or other values: emit CLOSE events only (default)
/// - Log level controlled by `RUST_LOG`, else the `SAPM_LOG_LEVEL` env var
///
/// Must be called once, before any logging macros are invoked.
fn init_tracing() {
    // ---
    let span_events = match env::var("SAPM_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stdout().is_terminal(),
    };

    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match env::var("SAPM_LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("info") => "info",
            Some("warn") => "warn",
            Some("error") => "error",
            _ => "debug",
        };
        EnvFilter::new(format!("{level},hyper=info"))
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
