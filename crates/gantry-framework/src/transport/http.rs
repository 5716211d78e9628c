use std::mem;
use std::time::Duration;

use async_trait::async_trait;
use gantry_common::config::AppConfig;
use gantry_server::{ServerBuilder, ServerMonitor};
use log::{debug, error, info};
use reqwest::header::CONTENT_TYPE;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};

use crate::codec;
use crate::error::{SchedulerError, SchedulerResult};
use crate::proto::scheduler;
use crate::transport::{EventServer, InboundEvent, Transport};

#[readonly::make]
pub struct HttpTransportOptions {
    /// The libprocess name of the framework, which is also the path prefix
    /// of inbound messages.
    pub process_name: String,
    pub listen_host: String,
    pub listen_port: u16,
    pub external_host: String,
    pub external_port: Option<u16>,
    pub master_host: String,
    pub master_port: u16,
    pub request_timeout: Duration,
}

impl HttpTransportOptions {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            process_name: config.framework.name.clone(),
            listen_host: config.transport.listen_host.clone(),
            listen_port: config.transport.listen_port,
            external_host: config.transport.external_host.clone(),
            external_port: config.transport.external_port,
            master_host: config.master.host.clone(),
            master_port: config.master.port,
            request_timeout: Duration::from_secs(config.transport.request_timeout_secs),
        }
    }
}

/// Talks to the master over libprocess-style HTTP messages.
pub struct HttpTransport {
    options: HttpTransportOptions,
    client: reqwest::Client,
    server: ServerMonitor,
}

impl HttpTransport {
    pub fn try_new(options: HttpTransportOptions) -> SchedulerResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(options.request_timeout)
            .build()?;
        Ok(Self {
            options,
            client,
            server: ServerMonitor::new(),
        })
    }

    pub fn local_port(&self) -> Option<u16> {
        self.server.port()
    }

    fn health_url(&self) -> SchedulerResult<String> {
        let port = self
            .local_port()
            .ok_or_else(|| SchedulerError::transport("the event listener is not running"))?;
        let host = match self.options.listen_host.as_str() {
            "0.0.0.0" | "::" | "[::]" => "127.0.0.1",
            x => x,
        };
        Ok(format!("http://{host}:{port}/health"))
    }

    fn sender(&self) -> String {
        let port = self
            .options
            .external_port
            .or(self.local_port())
            .unwrap_or(self.options.listen_port);
        codec::libprocess_from(&self.options.process_name, &self.options.external_host, port)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn listen(&mut self, events: mpsc::Sender<InboundEvent>) -> SchedulerResult<()> {
        let listener = TcpListener::bind((
            self.options.listen_host.as_str(),
            self.options.listen_port,
        ))
        .await?;
        let port = listener.local_addr()?.port();
        let router = EventServer::new(self.options.process_name.clone(), events).into_router();
        let (tx, rx) = oneshot::channel();
        let server = mem::take(&mut self.server)
            .start(async move {
                let result = ServerBuilder::new("event")
                    .merge(router)
                    .serve(listener, async move {
                        let _ = rx.await;
                    })
                    .await;
                if let Err(e) = result {
                    error!("event server failed: {e}");
                }
            })
            .await;
        self.server = server.ready(tx, port)?;
        info!("listening for master events on port {port}");
        Ok(())
    }

    async fn check_health(&self) -> SchedulerResult<()> {
        let response = self.client.get(self.health_url()?).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SchedulerError::transport(format!(
                "health check failed with status {status}"
            )));
        }
        Ok(())
    }

    async fn send(&self, call: scheduler::Call) -> SchedulerResult<()> {
        let call_type = scheduler::call::Type::try_from(call.r#type)
            .map(|x| x.as_str_name())
            .unwrap_or("UNKNOWN");
        debug!("sending {call_type} call to the master");
        let response = self
            .client
            .post(codec::call_url(
                &self.options.master_host,
                self.options.master_port,
            ))
            .header(codec::LIBPROCESS_FROM_HEADER, self.sender())
            .header(CONTENT_TYPE, codec::PROTOBUF_CONTENT_TYPE)
            .body(codec::encode_call(&call))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SchedulerError::transport(format!(
                "master rejected {call_type} call with status {status}"
            )));
        }
        Ok(())
    }

    async fn shutdown(&mut self) -> SchedulerResult<()> {
        mem::take(&mut self.server).stop().await;
        Ok(())
    }
}
