//! HTTP server lifecycle
//!
//! State initialization, router construction, background task startup
//! and graceful shutdown on ctrl-c.

use crate::core::{BackgroundTasks, Config, ServerState};
use crate::utils::AppError;

pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> Result<(), AppError> {
        let state = ServerState::initialize(&self.config).await?;

        let mut tasks = BackgroundTasks::new();
        state.start_background_tasks(&mut tasks);

        let router = crate::api::create_router(state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

        tracing::info!(%addr, "Inventory server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutdown signal received");
            })
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

        tasks.shutdown().await;
        Ok(())
    }
}
