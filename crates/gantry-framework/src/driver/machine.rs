use log::{debug, error, info, warn};
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use crate::driver::call;
use crate::driver::{DriverCommand, DriverHandle, DriverOptions, DriverState, EventDispatcher};
use crate::error::{SchedulerError, SchedulerResult};
use crate::event::{MasterEvent, Offer, StatusUpdate};
use crate::id::FrameworkId;
use crate::proto::{mesos, scheduler};
use crate::shutdown::wait_for_shutdown;
use crate::transport::{InboundEvent, Transport};

/// The channels that connect the driver with the workers around it.
pub struct DriverChannels {
    pub handle: DriverHandle,
    pub offers: mpsc::Receiver<Offer>,
    pub updates: mpsc::Receiver<StatusUpdate>,
}

/// The framework's connection to the master.
///
/// The driver is a state machine that runs one [`DriverState`] at a time.
/// It is the only component that sends calls to the master, so there is never
/// more than one request in flight. Other workers reach the driver through the
/// [`DriverHandle`], and receive offers and status updates from the channels
/// returned by [`Driver::new`].
pub struct Driver {
    options: DriverOptions,
    transport: Box<dyn Transport>,
    /// The identity assigned by the master, which never changes once set.
    framework_id: Option<FrameworkId>,
    event_sender: mpsc::Sender<InboundEvent>,
    events: mpsc::Receiver<InboundEvent>,
    commands: mpsc::Receiver<DriverCommand>,
    dispatcher: EventDispatcher,
    heartbeat: Option<Interval>,
    shutdown: watch::Receiver<bool>,
    failure: Option<SchedulerError>,
}

impl Driver {
    pub fn new(
        options: DriverOptions,
        transport: Box<dyn Transport>,
        shutdown: watch::Receiver<bool>,
    ) -> (Self, DriverChannels) {
        let (event_sender, events) = mpsc::channel(options.event_buffer);
        let (command_sender, commands) = mpsc::channel(options.command_buffer);
        let (offer_sender, offers) = mpsc::channel(options.offer_buffer);
        let (update_sender, updates) = mpsc::channel(options.update_buffer);
        let driver = Self {
            options,
            transport,
            framework_id: None,
            event_sender,
            events,
            commands,
            dispatcher: EventDispatcher::new(offer_sender, update_sender),
            heartbeat: None,
            shutdown,
            failure: None,
        };
        let channels = DriverChannels {
            handle: DriverHandle::new(command_sender),
            offers,
            updates,
        };
        (driver, channels)
    }

    pub fn framework_id(&self) -> Option<&FrameworkId> {
        self.framework_id.as_ref()
    }

    /// Runs the driver until it stops.
    /// Returns the error that stopped the driver, if any.
    pub async fn run(mut self) -> SchedulerResult<()> {
        let mut state = DriverState::Init;
        loop {
            debug!("driver: entering {} state", state.name());
            match self.step(state).await {
                Some(next) => state = next,
                None => break,
            }
        }
        match self.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Performs the work of a single state and returns the next state,
    /// or `None` if the driver has stopped.
    pub async fn step(&mut self, state: DriverState) -> Option<DriverState> {
        let next = match state {
            DriverState::Init => self.init().await,
            DriverState::Register => self.register().await,
            DriverState::Ready => self.ready().await,
            DriverState::Heartbeat => self.heartbeat(),
            DriverState::Command(command) => self.run_command(command).await,
            DriverState::Dispatch(event) => self.dispatch(event),
            DriverState::Error(e) => self.fail(e),
            DriverState::Stop => {
                self.stop().await;
                return None;
            }
        };
        Some(next)
    }

    async fn init(&mut self) -> DriverState {
        if let Err(e) = self.transport.listen(self.event_sender.clone()).await {
            return DriverState::Error(e);
        }
        let mut shutdown = self.shutdown.clone();
        let transport = &self.transport;
        let check = self
            .options
            .health_check_retry_strategy
            .run(|| transport.check_health());
        tokio::select! {
            result = check => match result {
                Ok(()) => {
                    info!("driver: event listener is healthy");
                    DriverState::Register
                }
                Err(e) => DriverState::Error(e),
            },
            _ = wait_for_shutdown(&mut shutdown) => DriverState::Stop,
        }
    }

    async fn register(&mut self) -> DriverState {
        let mut shutdown = self.shutdown.clone();
        let call = call::register(self.framework_info());
        let transport = &self.transport;
        let send = self
            .options
            .register_retry_strategy
            .run(|| transport.send(call.clone()));
        tokio::select! {
            result = send => {
                if let Err(e) = result {
                    return DriverState::Error(e);
                }
            }
            _ = wait_for_shutdown(&mut shutdown) => return DriverState::Stop,
        }

        info!(
            "driver: registering {}:{}",
            self.options.user, self.options.framework_name
        );
        let register_timeout = self.options.register_timeout;
        tokio::select! {
            result = time::timeout(register_timeout, self.wait_for_registered()) => match result {
                Ok(Ok(framework_id)) => {
                    info!(
                        "driver: registered {}:{} with ID {framework_id}",
                        self.options.user, self.options.framework_name
                    );
                    self.framework_id = Some(framework_id);
                    DriverState::Ready
                }
                Ok(Err(e)) => DriverState::Error(e),
                Err(_) => DriverState::Error(SchedulerError::protocol(format!(
                    "no registration received within {register_timeout:?}"
                ))),
            },
            _ = wait_for_shutdown(&mut shutdown) => DriverState::Stop,
        }
    }

    async fn wait_for_registered(&mut self) -> SchedulerResult<FrameworkId> {
        loop {
            let Some(event) = self.events.recv().await else {
                return Err(SchedulerError::ChannelClosed(
                    "event channel closed".to_string(),
                ));
            };
            match MasterEvent::try_from(event?) {
                Ok(MasterEvent::Registered { framework_id }) => return Ok(framework_id),
                Ok(event) => warn!("driver: discarding {event} event while waiting for registration"),
                Err(e) => warn!("driver: discarding invalid event while waiting for registration: {e}"),
            }
        }
    }

    async fn ready(&mut self) -> DriverState {
        debug!("driver: framework is registered and waiting");
        let period = self.options.heartbeat_interval;
        let heartbeat = self.heartbeat.get_or_insert_with(|| {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        let mut shutdown = self.shutdown.clone();
        tokio::select! {
            _ = heartbeat.tick() => DriverState::Heartbeat,
            Some(command) = self.commands.recv() => DriverState::Command(command),
            event = self.events.recv() => match event {
                Some(Ok(event)) => DriverState::Dispatch(event),
                Some(Err(e)) => DriverState::Error(e),
                None => DriverState::Error(SchedulerError::ChannelClosed(
                    "event channel closed".to_string(),
                )),
            },
            _ = wait_for_shutdown(&mut shutdown) => DriverState::Stop,
        }
    }

    fn heartbeat(&self) -> DriverState {
        debug!("driver: heartbeat");
        DriverState::Ready
    }

    async fn run_command(&mut self, command: DriverCommand) -> DriverState {
        match command {
            DriverCommand::Launch {
                task_id,
                command,
                offer,
                result,
            } => {
                let call = call::launch(self.framework_info(), &task_id, command, &offer);
                let out = self.transport.send(call).await;
                match &out {
                    Ok(()) => info!(
                        "driver: launched task {task_id} on agent {} with offer {}",
                        offer.slave_id, offer.id
                    ),
                    Err(e) => warn!("driver: failed to launch task {task_id}: {e}"),
                }
                let _ = result.send(out);
                DriverState::Ready
            }
            DriverCommand::Acknowledge { update, result } => {
                let call = call::acknowledge(self.framework_info(), &update);
                match self.transport.send(call).await {
                    Ok(()) => {
                        debug!(
                            "driver: acknowledged {} for task {}",
                            update.state.as_str_name(),
                            update.task_id
                        );
                        let _ = result.send(Ok(()));
                        DriverState::Ready
                    }
                    Err(e) => {
                        let _ = result.send(Err(SchedulerError::transport(e.to_string())));
                        DriverState::Error(e)
                    }
                }
            }
        }
    }

    fn dispatch(&mut self, event: scheduler::Event) -> DriverState {
        let result = MasterEvent::try_from(event)
            .and_then(|event| self.dispatcher.dispatch(event, self.framework_id.as_ref()));
        match result {
            Ok(()) => DriverState::Ready,
            Err(e) => {
                error!("driver: failed to dispatch event: {e}");
                DriverState::Error(e)
            }
        }
    }

    fn fail(&mut self, e: SchedulerError) -> DriverState {
        error!("driver: {e}");
        self.failure = Some(e);
        DriverState::Stop
    }

    async fn stop(&mut self) {
        if let Err(e) = self.transport.shutdown().await {
            warn!("driver: failed to shut down the transport: {e}");
        }
        info!("driver: stopped");
    }

    fn framework_info(&self) -> mesos::FrameworkInfo {
        call::framework_info(
            &self.options.user,
            &self.options.framework_name,
            self.framework_id.as_ref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use gantry_common::config::AppConfig;

    use super::*;
    use crate::codec;
    use crate::id::{OfferId, SlaveId, TaskId};

    #[derive(Default)]
    struct FakeTransportState {
        calls: Vec<scheduler::Call>,
        events: Option<mpsc::Sender<InboundEvent>>,
        /// The number of upcoming health checks that fail.
        unhealthy_checks: usize,
        /// The number of upcoming sends that fail.
        failed_sends: usize,
        /// The events queued after a registration call is received.
        register_replies: Vec<scheduler::Event>,
        stopped: bool,
    }

    #[derive(Clone, Default)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    impl FakeTransport {
        fn calls(&self) -> Vec<scheduler::Call> {
            self.state.lock().unwrap().calls.clone()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn listen(&mut self, events: mpsc::Sender<InboundEvent>) -> SchedulerResult<()> {
            self.state.lock().unwrap().events = Some(events);
            Ok(())
        }

        async fn check_health(&self) -> SchedulerResult<()> {
            let mut state = self.state.lock().unwrap();
            if state.unhealthy_checks > 0 {
                state.unhealthy_checks -= 1;
                return Err(SchedulerError::transport("connection refused"));
            }
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
                let replies = std::mem::take(&mut state.register_replies);
                if let Some(events) = &state.events {
                    for event in replies {
                        let _ = events.try_send(Ok(event));
                    }
                }
            }
            Ok(())
        }

        async fn shutdown(&mut self) -> SchedulerResult<()> {
            self.state.lock().unwrap().stopped = true;
            Ok(())
        }
    }

    fn create_driver(transport: &FakeTransport) -> (Driver, DriverChannels, watch::Sender<bool>) {
        let mut config = AppConfig::load().unwrap();
        config.framework.user = Some("alice".to_string());
        config.framework.name = "gantry".to_string();
        let (tx, rx) = watch::channel(false);
        let (driver, channels) = Driver::new(
            DriverOptions::new(&config),
            Box::new(transport.clone()),
            rx,
        );
        transport.state.lock().unwrap().events = Some(driver.event_sender.clone());
        (driver, channels, tx)
    }

    fn registered(framework_id: &str) -> scheduler::Event {
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

    fn offers(framework_id: &str, ids: &[&str]) -> scheduler::Event {
        scheduler::Event {
            r#type: scheduler::event::Type::Offers as i32,
            offers: Some(scheduler::event::Offers {
                offers: ids
                    .iter()
                    .map(|id| mesos::Offer {
                        id: mesos::OfferId {
                            value: id.to_string(),
                        },
                        framework_id: mesos::FrameworkId {
                            value: framework_id.to_string(),
                        },
                        slave_id: mesos::SlaveId {
                            value: "S1".to_string(),
                        },
                        hostname: "agent-1".to_string(),
                        ..Default::default()
                    })
                    .collect(),
            }),
            ..Default::default()
        }
    }

    fn offer() -> Offer {
        Offer {
            id: OfferId::from("O1"),
            framework_id: FrameworkId::from("F1"),
            slave_id: SlaveId::from("S1"),
            hostname: "agent-1".to_string(),
            resources: vec![],
        }
    }

    fn status_update() -> StatusUpdate {
        StatusUpdate {
            task_id: TaskId::from("task-1"),
            slave_id: SlaveId::from("S1"),
            state: mesos::TaskState::TaskFinished,
            message: None,
            ack_token: b"t1".to_vec(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_init_waits_for_healthy_listener() {
        let transport = FakeTransport::default();
        transport.state.lock().unwrap().unhealthy_checks = 3;
        let (mut driver, _channels, _shutdown) = create_driver(&transport);
        let start = Instant::now();
        let state = driver.step(DriverState::Init).await.unwrap();
        assert!(matches!(state, DriverState::Register));
        // The health check backs off for 1s, 2s, and 4s.
        assert_eq!(start.elapsed().as_secs(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_init_cancelled_by_shutdown() {
        let transport = FakeTransport::default();
        transport.state.lock().unwrap().unhealthy_checks = usize::MAX;
        let (mut driver, _channels, shutdown) = create_driver(&transport);
        tokio::spawn(async move {
            time::sleep(Duration::from_secs(600)).await;
            let _ = shutdown.send(true);
        });
        let state = driver.step(DriverState::Init).await.unwrap();
        assert!(matches!(state, DriverState::Stop));
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_exhausts_attempts() {
        let transport = FakeTransport::default();
        transport.state.lock().unwrap().failed_sends = 5;
        let (mut driver, _channels, _shutdown) = create_driver(&transport);
        let start = Instant::now();

        let state = driver.step(DriverState::Register).await.unwrap();
        assert!(matches!(state, DriverState::Error(_)));
        // The attempts are separated by delays of 1s, 2s, 4s, and 8s.
        assert_eq!(start.elapsed().as_secs(), 15);
        let calls = transport.calls();
        assert_eq!(calls.len(), 5);
        assert!(calls
            .iter()
            .all(|x| x.r#type == scheduler::call::Type::Register as i32));

        let state = driver.step(state).await.unwrap();
        assert!(matches!(state, DriverState::Stop));
        assert!(driver.step(state).await.is_none());
        assert!(transport.state.lock().unwrap().stopped);
        assert!(driver.failure.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_after_retry() {
        let transport = FakeTransport::default();
        {
            let mut state = transport.state.lock().unwrap();
            state.failed_sends = 2;
            state.register_replies = vec![offers("F1", &["O1"]), registered("F1")];
        }
        let (mut driver, _channels, _shutdown) = create_driver(&transport);

        let state = driver.step(DriverState::Register).await.unwrap();
        assert!(matches!(state, DriverState::Ready));
        assert_eq!(driver.framework_id(), Some(&FrameworkId::from("F1")));
        assert_eq!(transport.calls().len(), 3);
        assert!(transport.calls()[0].framework_info.id.is_none());
        assert_eq!(transport.calls()[0].framework_info.user, "alice");
        assert_eq!(transport.calls()[0].framework_info.name, "gantry");
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_timeout() {
        let transport = FakeTransport::default();
        let (mut driver, _channels, _shutdown) = create_driver(&transport);
        let start = Instant::now();
        let state = driver.step(DriverState::Register).await.unwrap();
        assert!(matches!(state, DriverState::Error(SchedulerError::ProtocolError(_))));
        assert_eq!(start.elapsed().as_secs(), 10);
        assert!(driver.framework_id().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_cancelled_by_shutdown() {
        let transport = FakeTransport::default();
        let (mut driver, _channels, shutdown) = create_driver(&transport);
        shutdown.send(true).unwrap();
        let state = driver.step(DriverState::Register).await.unwrap();
        assert!(matches!(state, DriverState::Stop));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_heartbeat() {
        let transport = FakeTransport::default();
        let (mut driver, _channels, _shutdown) = create_driver(&transport);
        let start = Instant::now();
        let state = driver.step(DriverState::Ready).await.unwrap();
        assert!(matches!(state, DriverState::Heartbeat));
        assert_eq!(start.elapsed().as_secs(), 60);
        let state = driver.step(state).await.unwrap();
        assert!(matches!(state, DriverState::Ready));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_ready_dispatches_events() {
        let transport = FakeTransport::default();
        let (mut driver, mut channels, _shutdown) = create_driver(&transport);
        driver.framework_id = Some(FrameworkId::from("F1"));
        driver
            .event_sender
            .send(Ok(offers("F1", &["O1"])))
            .await
            .unwrap();

        let state = driver.step(DriverState::Ready).await.unwrap();
        assert!(matches!(state, DriverState::Dispatch(_)));
        let state = driver.step(state).await.unwrap();
        assert!(matches!(state, DriverState::Ready));
        assert_eq!(channels.offers.recv().await.unwrap().id, OfferId::from("O1"));
    }

    #[tokio::test]
    async fn test_ready_fails_on_unknown_event() {
        let transport = FakeTransport::default();
        let (mut driver, _channels, _shutdown) = create_driver(&transport);
        driver.framework_id = Some(FrameworkId::from("F1"));
        let event = scheduler::Event {
            r#type: 42,
            ..Default::default()
        };
        driver.event_sender.send(Ok(event)).await.unwrap();

        let state = driver.step(DriverState::Ready).await.unwrap();
        let state = driver.step(state).await.unwrap();
        assert!(matches!(state, DriverState::Error(SchedulerError::ProtocolError(_))));
    }

    #[tokio::test]
    async fn test_ready_stops_on_malformed_message() {
        let transport = FakeTransport::default();
        let (mut driver, _channels, _shutdown) = create_driver(&transport);
        driver.framework_id = Some(FrameworkId::from("F1"));
        let malformed = codec::decode_event(codec::EVENT_MESSAGE_NAME, &[0xff, 0xff, 0xff]);
        assert!(malformed.is_err());
        driver.event_sender.send(malformed).await.unwrap();

        let state = driver.step(DriverState::Ready).await.unwrap();
        assert!(matches!(state, DriverState::Error(SchedulerError::DecodeError(_))));
        let state = driver.step(state).await.unwrap();
        assert!(matches!(state, DriverState::Stop));
        assert!(driver.step(state).await.is_none());
        assert!(transport.state.lock().unwrap().stopped);
        assert!(matches!(driver.failure, Some(SchedulerError::DecodeError(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_fails_on_malformed_message() {
        let transport = FakeTransport::default();
        let (mut driver, _channels, _shutdown) = create_driver(&transport);
        let malformed = codec::decode_event(codec::EVENT_MESSAGE_NAME, &[0xff, 0xff, 0xff]);
        driver.event_sender.send(malformed).await.unwrap();

        let state = driver.step(DriverState::Register).await.unwrap();
        assert!(matches!(state, DriverState::Error(SchedulerError::DecodeError(_))));
        assert!(driver.framework_id().is_none());
    }

    #[tokio::test]
    async fn test_launch_failure_is_not_fatal() {
        let transport = FakeTransport::default();
        transport.state.lock().unwrap().failed_sends = 1;
        let (mut driver, channels, _shutdown) = create_driver(&transport);
        driver.framework_id = Some(FrameworkId::from("F1"));
        let handle = channels.handle.clone();
        let launch = tokio::spawn(async move {
            handle
                .launch(TaskId::from("task-1"), "echo hi".to_string(), offer())
                .await
        });

        let state = driver.step(DriverState::Ready).await.unwrap();
        assert!(matches!(state, DriverState::Command(_)));
        let state = driver.step(state).await.unwrap();
        assert!(matches!(state, DriverState::Ready));
        assert!(launch.await.unwrap().is_err());

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].r#type, scheduler::call::Type::Launch as i32);
        assert_eq!(calls[0].framework_info.id.as_ref().unwrap().value, "F1");
    }

    #[tokio::test]
    async fn test_acknowledge() {
        let transport = FakeTransport::default();
        let (mut driver, channels, _shutdown) = create_driver(&transport);
        driver.framework_id = Some(FrameworkId::from("F1"));
        let handle = channels.handle.clone();
        let ack = tokio::spawn(async move { handle.acknowledge(status_update()).await });

        let state = driver.step(DriverState::Ready).await.unwrap();
        let state = driver.step(state).await.unwrap();
        assert!(matches!(state, DriverState::Ready));
        ack.await.unwrap().unwrap();

        let calls = transport.calls();
        let acknowledge = calls[0].acknowledge.as_ref().unwrap();
        assert_eq!(acknowledge.uuid, b"t1".to_vec());
        assert_eq!(acknowledge.task_id.value, "task-1");
        assert_eq!(acknowledge.slave_id.value, "S1");
    }

    #[tokio::test]
    async fn test_acknowledge_failure_is_fatal() {
        let transport = FakeTransport::default();
        transport.state.lock().unwrap().failed_sends = 1;
        let (mut driver, channels, _shutdown) = create_driver(&transport);
        driver.framework_id = Some(FrameworkId::from("F1"));
        let handle = channels.handle.clone();
        let ack = tokio::spawn(async move { handle.acknowledge(status_update()).await });

        let state = driver.step(DriverState::Ready).await.unwrap();
        let state = driver.step(state).await.unwrap();
        assert!(matches!(state, DriverState::Error(_)));
        assert!(ack.await.unwrap().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_until_shutdown() {
        let transport = FakeTransport::default();
        transport.state.lock().unwrap().register_replies =
            vec![registered("F1"), offers("F1", &["O1", "O2"])];
        let (driver, mut channels, shutdown) = create_driver(&transport);
        let handle = tokio::spawn(driver.run());

        assert_eq!(channels.offers.recv().await.unwrap().id, OfferId::from("O1"));
        assert_eq!(channels.offers.recv().await.unwrap().id, OfferId::from("O2"));
        shutdown.send(true).unwrap();
        handle.await.unwrap().unwrap();
        assert!(transport.state.lock().unwrap().stopped);
    }
}
