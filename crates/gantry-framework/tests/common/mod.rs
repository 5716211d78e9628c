#![allow(dead_code)]

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use gantry_common::config::AppConfig;
use gantry_framework::error::{SchedulerError, SchedulerResult};
use gantry_framework::proto::{mesos, scheduler};
use gantry_framework::transport::{InboundEvent, Transport};
use tokio::sync::mpsc;

#[derive(Default)]
struct FakeMasterState {
    calls: Vec<scheduler::Call>,
    events: Option<mpsc::Sender<InboundEvent>>,
    failed_sends: usize,
    framework_id: Option<String>,
    stopped: bool,
}

/// A transport that plays the master in memory.
/// It records every call, and answers registration with the configured framework ID.
#[derive(Clone, Default)]
pub struct FakeMaster {
    state: Arc<Mutex<FakeMasterState>>,
}

impl FakeMaster {
    pub fn registering_as(framework_id: &str) -> Self {
        let master = Self::default();
        master.state.lock().unwrap().framework_id = Some(framework_id.to_string());
        master
    }

    pub fn failing_sends(count: usize) -> Self {
        let master = Self::default();
        master.state.lock().unwrap().failed_sends = count;
        master
    }

    pub fn calls(&self) -> Vec<scheduler::Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn calls_of_type(&self, call_type: scheduler::call::Type) -> Vec<scheduler::Call> {
        self.calls()
            .into_iter()
            .filter(|x| x.r#type == call_type as i32)
            .collect()
    }

    pub fn is_stopped(&self) -> bool {
        self.state.lock().unwrap().stopped
    }

    pub async fn deliver(&self, event: scheduler::Event) {
        let events = self.state.lock().unwrap().events.clone();
        events
            .expect("the framework is not listening")
            .send(Ok(event))
            .await
            .unwrap();
    }
}

#[async_trait]
impl Transport for FakeMaster {
    async fn listen(&mut self, events: mpsc::Sender<InboundEvent>) -> SchedulerResult<()> {
        self.state.lock().unwrap().events = Some(events);
        Ok(())
    }

    async fn check_health(&self) -> SchedulerResult<()> {
        Ok(())
    }

    async fn send(&self, call: scheduler::Call) -> SchedulerResult<()> {
        let mut state = self.state.lock().unwrap();
        let is_register = call.r#type == scheduler::call::Type::Register as i32;
        state.calls.push(call);
        if state.failed_sends > 0 {
            state.failed_sends -= 1;
            return Err(SchedulerError::transport("connection refused"));
        }
        if is_register {
            if let (Some(events), Some(framework_id)) = (&state.events, &state.framework_id) {
                let _ = events.try_send(Ok(registered(framework_id)));
            }
        }
        Ok(())
    }

    async fn shutdown(&mut self) -> SchedulerResult<()> {
        self.state.lock().unwrap().stopped = true;
        Ok(())
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::load().unwrap();
    config.framework.name = "gantry".to_string();
    config.framework.user = Some("alice".to_string());
    config.api.listen_host = "127.0.0.1".to_string();
    config.api.listen_port = 0;
    config.transport.listen_host = "127.0.0.1".to_string();
    config.transport.listen_port = 0;
    config.transport.external_host = "127.0.0.1".to_string();
    config.transport.external_port = None;
    config
}

pub fn registered(framework_id: &str) -> scheduler::Event {
    scheduler::Event {
        r#type: scheduler::event::Type::Registered as i32,
        registered: Some(scheduler::event::Registered {
            framework_id: mesos::FrameworkId {
                value: framework_id.to_string(),
            },
            master_info: None,
        }),
        ..Default::default()
    }
}

pub fn offer(framework_id: &str, offer_id: &str, slave_id: &str) -> mesos::Offer {
    mesos::Offer {
        id: mesos::OfferId {
            value: offer_id.to_string(),
        },
        framework_id: mesos::FrameworkId {
            value: framework_id.to_string(),
        },
        slave_id: mesos::SlaveId {
            value: slave_id.to_string(),
        },
        hostname: format!("{slave_id}.example.com"),
        resources: vec![mesos::Resource {
            name: "cpus".to_string(),
            r#type: mesos::value::Type::Scalar as i32,
            scalar: Some(mesos::value::Scalar { value: 1.0 }),
            ..Default::default()
        }],
        ..Default::default()
    }
}

pub fn offers(offers: Vec<mesos::Offer>) -> scheduler::Event {
    scheduler::Event {
        r#type: scheduler::event::Type::Offers as i32,
        offers: Some(scheduler::event::Offers { offers }),
        ..Default::default()
    }
}

pub fn update(
    task_id: &str,
    slave_id: &str,
    state: mesos::TaskState,
    token: &str,
) -> scheduler::Event {
    scheduler::Event {
        r#type: scheduler::event::Type::Update as i32,
        update: Some(scheduler::event::Update {
            uuid: token.as_bytes().to_vec(),
            status: mesos::TaskStatus {
                task_id: mesos::TaskId {
                    value: task_id.to_string(),
                },
                state: state as i32,
                slave_id: Some(mesos::SlaveId {
                    value: slave_id.to_string(),
                }),
                ..Default::default()
            },
        }),
        ..Default::default()
    }
}

/// Polls the condition until it holds, failing the test after a few seconds.
pub async fn eventually<F, Fut>(description: &str, mut condition: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let poll = async {
        while !condition().await {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    };
    if tokio::time::timeout(Duration::from_secs(10), poll)
        .await
        .is_err()
    {
        panic!("timed out waiting for {description}");
    }
}
