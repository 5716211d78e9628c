use tokio::sync::watch;

/// Completes when shutdown is requested.
/// Pends forever if the shutdown signal can no longer be sent.
pub async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    if shutdown.wait_for(|x| *x).await.is_err() {
        std::future::pending::<()>().await;
    }
}
