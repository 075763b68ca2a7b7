use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::api::build_router;
use crate::config::ServiceConfig;
use crate::dataset::DatasetSource;

/// Nutritional Insights HTTP server
pub struct NutritionApiServer {
    config: ServiceConfig,
    source: Arc<DatasetSource>,
}

impl NutritionApiServer {
    pub fn new(config: ServiceConfig) -> Self {
        let source = Arc::new(DatasetSource::new(config.dataset_path.clone(), config.reload));
        Self { config, source }
    }

    pub fn router(&self) -> Router {
        build_router(Arc::clone(&self.source))
    }

    /// Bind and serve until ctrl-c.
    pub async fn start(self) -> Result<()> {
        let addr = self.config.socket_addr()?;
        let app = self.router();

        info!("Starting Nutritional Insights API on {}", addr);
        info!(
            "Dataset path: {} (reload: {:?})",
            self.source.path().display(),
            self.source.policy()
        );
        if !self.source.path().exists() {
            warn!(
                "Dataset file {} does not exist yet; data endpoints will fail until it does",
                self.source.path().display()
            );
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error")?;

        info!("Nutritional Insights API stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
