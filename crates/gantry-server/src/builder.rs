use std::future::Future;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use log::debug;
use tokio::net::TcpListener;

/// Builds an HTTP server that always exposes a `/health` endpoint.
/// The health endpoint answers as soon as the listener accepts connections,
/// so a successful probe means the server is ready to receive requests.
pub struct ServerBuilder {
    name: &'static str,
    router: Router,
}

impl ServerBuilder {
    pub fn new(name: &'static str) -> Self {
        let router = Router::new().route("/health", get(health));
        Self { name, router }
    }

    pub fn merge(mut self, router: Router) -> Self {
        self.router = self.router.merge(router);
        self
    }

    pub fn into_router(self) -> Router {
        self.router
    }

    pub async fn serve<F>(
        self,
        // We must use the TCP listener from tokio for graceful shutdown.
        listener: TcpListener,
        signal: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        debug!("{} server listening on {}", self.name, listener.local_addr()?);
        axum::serve(listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;
        debug!("{} server stopped", self.name);
        Ok(())
    }
}

async fn health() -> StatusCode {
    StatusCode::OK
}
