use gantry_common::config::AppConfig;
use gantry_common::runtime::RuntimeManager;
use gantry_framework::entrypoint::run_framework;
use gantry_telemetry::telemetry::{init_telemetry, shutdown_telemetry, ResourceOptions};
use log::info;
use tokio::sync::watch;

/// Requests shutdown once `SIGINT` is received.
async fn shutdown(signal: watch::Sender<bool>) {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutting down the framework...");
    let _ = signal.send(true);
}

pub(crate) fn run_framework_service(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = RuntimeManager::try_new(&config.runtime)?;

    runtime
        .handle()
        .primary()
        .block_on(async { init_telemetry(ResourceOptions { kind: "framework" }) })?;

    runtime.handle().primary().block_on(async {
        let (tx, rx) = watch::channel(false);
        tokio::spawn(shutdown(tx));
        info!(
            "Starting framework {} with master {}:{}...",
            config.framework.name, config.master.host, config.master.port
        );
        run_framework(config, rx).await?;
        info!("The framework has stopped.");
        <Result<(), Box<dyn std::error::Error>>>::Ok(())
    })?;

    shutdown_telemetry();

    Ok(())
}
