use std::sync::Arc;
use std::time::Duration;

use gantry_common::config::AppConfig;
use gantry_server::{ServerBuilder, ServerMonitor};
use log::{error, info};
use tokio::net::TcpListener;
use tokio::sync::{oneshot, watch, Notify};

use crate::ack::Acknowledger;
use crate::api;
use crate::driver::{Driver, DriverChannels, DriverOptions};
use crate::error::SchedulerResult;
use crate::scheduling::SchedulingLoop;
use crate::task::{MemoryTaskStore, TaskSubmitter};
use crate::transport::{HttpTransport, HttpTransportOptions, Transport};

/// Runs the framework against the configured master until shutdown is requested
/// or the driver stops.
pub async fn run_framework(
    config: AppConfig,
    shutdown: watch::Receiver<bool>,
) -> SchedulerResult<()> {
    let transport = HttpTransport::try_new(HttpTransportOptions::new(&config))?;
    let api_listener =
        TcpListener::bind((config.api.listen_host.as_str(), config.api.listen_port)).await?;
    run_framework_with_transport(&config, Box::new(transport), api_listener, shutdown).await
}

/// Runs the framework with the given connection to the master,
/// serving the task API on the given listener.
pub async fn run_framework_with_transport(
    config: &AppConfig,
    transport: Box<dyn Transport>,
    api_listener: TcpListener,
    shutdown: watch::Receiver<bool>,
) -> SchedulerResult<()> {
    let store = Arc::new(MemoryTaskStore::new());
    let notify = Arc::new(Notify::new());
    let submitter = Arc::new(TaskSubmitter::new(store.clone(), notify.clone()));

    let (driver, channels) = Driver::new(DriverOptions::new(config), transport, shutdown);
    // The scheduling loop may be idle when the driver stops, so it is stopped explicitly.
    let (stop_scheduling, scheduling_stopped) = watch::channel(false);
    let DriverChannels {
        handle,
        offers,
        updates,
    } = channels;
    let scheduling = tokio::spawn(
        SchedulingLoop::new(
            store.clone(),
            handle.clone(),
            offers,
            notify,
            Duration::from_secs(config.scheduler.poll_interval_secs),
            scheduling_stopped,
        )
        .run(),
    );
    let acknowledger = tokio::spawn(Acknowledger::new(store, handle, updates).run());

    let api_port = api_listener.local_addr()?.port();
    let (tx, rx) = oneshot::channel();
    let api_server = ServerMonitor::new()
        .start(async move {
            let result = ServerBuilder::new("api")
                .merge(api::router(submitter))
                .serve(api_listener, async move {
                    let _ = rx.await;
                })
                .await;
            if let Err(e) = result {
                error!("api server failed: {e}");
            }
        })
        .await
        .ready(tx, api_port)?;
    info!("task API listening on port {api_port}");

    let result = driver.run().await;
    let _ = stop_scheduling.send(true);
    api_server.stop().await;
    for (name, worker) in [("scheduler", scheduling), ("acknowledger", acknowledger)] {
        match worker.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!("{name} failed: {e}"),
            Err(e) => error!("{name} panicked: {e}"),
        }
    }
    result
}
