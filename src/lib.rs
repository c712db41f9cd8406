pub mod api;
pub mod config;
pub mod models;
pub mod pipeline;

use tracing_subscriber::EnvFilter;

use crate::api::{start_server, ApiContext, ServerError};
use crate::config::{ConfigError, ServiceConfig};
use crate::pipeline::extraction::{default_ocr_engine, DocumentTextExtractor};

pub use models::{Classification, HealthParameter};
pub use pipeline::parameters::{extract, extract_from_bytes, ParameterError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Server(#[from] ServerError),
    #[error("Failed to listen for shutdown signal: {0}")]
    Signal(std::io::Error),
}

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Run the HTTP service until Ctrl-C.
pub async fn run() -> Result<(), AppError> {
    let config = ServiceConfig::from_env()?;

    tracing::info!(
        "{} starting v{} on {}",
        config::APP_NAME,
        config::APP_VERSION,
        config.bind_addr()
    );

    let extractor = DocumentTextExtractor::with_ocr(default_ocr_engine(
        config.tessdata_dir.as_deref(),
    ));
    if !extractor.ocr_available() {
        tracing::warn!("OCR engine unavailable; image uploads will report failure");
    }
    let ctx = ApiContext::new(extractor);

    let mut server = start_server(ctx, &config).await?;
    tracing::info!(
        session_id = %server.session.session_id,
        addr = %server.session.server_addr,
        "Listening"
    );

    let signal = tokio::signal::ctrl_c().await;
    server.shutdown();
    server.wait().await?;
    signal.map_err(AppError::Signal)
}
