use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::router::Router;

/// Binds `cfg.listen_addr` and serves until the task is dropped.
pub async fn run(cfg: Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
    info!("Listening on {}", cfg.listen_addr);

    match &cfg.directory {
        Some(dir) => info!("Serving files from {}", dir.display()),
        None => info!("No directory configured, /files/ routes disabled"),
    }

    serve(listener, cfg).await
}

/// Accept loop. Each connection gets its own task; a failing connection
/// never stops the loop.
pub async fn serve(listener: TcpListener, cfg: Config) -> anyhow::Result<()> {
    let router = Arc::new(Router::new(Arc::new(cfg)));

    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!("Failed to accept connection: {}", e);
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let router = router.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, router);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
