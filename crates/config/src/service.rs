// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Dynamic Configuration Service: polls the collector, diffs the
//! response against registered watchers, and notifies them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use corvid_channel::{ChannelManager, ChannelState, HeaderDecorator};
use corvid_core::guard::guarded_tick;
use corvid_core::service::{CommandExecutor, Service, ServiceError, ServiceKind};
use corvid_proto::pb;
use corvid_scheduler::Scheduler;
use parking_lot::Mutex;
use tonic::service::interceptor::InterceptedService;
use tonic::transport::Channel;
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::registry::WatcherRegistry;
use crate::watcher::ChangeKind;

pub const KIND: ServiceKind = "config-discovery";
pub const COMMAND_KIND: ServiceKind = "ConfigurationDiscoveryCommand";

type DiscoveryClient = pb::ConfigurationDiscoveryServiceClient<InterceptedService<Channel, HeaderDecorator>>;

#[derive(Debug, Clone)]
pub struct ConfigServiceConfig {
    pub service_name: String,
    pub poll_interval: Duration,
    pub rpc_timeout: Duration,
}

impl ConfigServiceConfig {
    pub fn from_env() -> Self {
        Self {
            service_name: corvid_core::env::service_name(),
            poll_interval: corvid_core::env::get_agent_dynamic_config_interval(),
            rpc_timeout: corvid_core::env::grpc_upstream_timeout(),
        }
    }
}

pub struct ConfigDiscoveryService {
    config: ConfigServiceConfig,
    channel_manager: Arc<ChannelManager>,
    scheduler: Arc<Scheduler>,
    decorator: HeaderDecorator,
    registry: WatcherRegistry,
    cursor: Mutex<Option<String>>,
    last_registered: AtomicUsize,
}

impl ConfigDiscoveryService {
    pub fn new(
        config: ConfigServiceConfig,
        channel_manager: Arc<ChannelManager>,
        scheduler: Arc<Scheduler>,
        decorator: HeaderDecorator,
    ) -> Self {
        Self {
            config,
            channel_manager,
            scheduler,
            decorator,
            registry: WatcherRegistry::new(),
            cursor: Mutex::new(None),
            last_registered: AtomicUsize::new(0),
        }
    }

    pub fn register_watcher(&self, watcher: Arc<dyn crate::watcher::ConfigWatcher>) -> Result<(), ConfigError> {
        self.registry.register(watcher)
    }

    /// One poll tick: fetches the current configuration set and hands any
    /// returned commands to the scheduler. The
    /// `ConfigurationDiscoveryCommand` half lives in [`Self::apply_discovery_command`].
    async fn tick(&self) -> Result<(), ConfigError> {
        if self.channel_manager.state() != ChannelState::Connected {
            return Ok(());
        }

        let n = self.registry.len();
        let prev = self.last_registered.swap(n, Ordering::SeqCst);
        if n != prev {
            *self.cursor.lock() = None;
        }

        let Some(managed) = self.channel_manager.channel() else {
            return Ok(());
        };
        let mut client: DiscoveryClient =
            pb::ConfigurationDiscoveryServiceClient::with_interceptor(managed.channel(), self.decorator.clone());

        let uuid = self.cursor.lock().clone();
        let mut request = tonic::Request::new(pb::ConfigurationSyncRequest { service: self.config.service_name.clone(), uuid });
        request.set_timeout(self.config.rpc_timeout);

        match client.fetch_configurations(request).await {
            Ok(response) => {
                let commands = response.into_inner().commands;
                self.scheduler.receive(commands);
                Ok(())
            }
            Err(status) => {
                self.channel_manager.report_error(&status);
                Err(ConfigError::from(status))
            }
        }
    }

    /// Handles a dispatched `ConfigurationDiscoveryCommand`: diffs its
    /// key/value pairs against the registry and notifies each affected
    /// watcher of an add, modify, or delete.
    fn apply_discovery_command(&self, args: &[(String, String)]) {
        let incoming_uuid = args.iter().find(|(k, _)| k == corvid_proto::UUID_KEY).map(|(_, v)| v.clone());
        {
            let cursor = self.cursor.lock();
            if incoming_uuid == *cursor {
                return;
            }
        }

        let registered = self.registry.snapshot();
        for (key, watcher) in registered {
            let incoming = args.iter().find(|(k, _)| k == &key).map(|(_, v)| v.as_str());
            let current = watcher.current_value();
            if let Some((new_value, kind)) = crate::watcher::decide(incoming, current.as_deref()) {
                watcher.notify(new_value, kind);
            }
        }

        *self.cursor.lock() = incoming_uuid;
    }

    async fn run(self: Arc<Self>) {
        let mut ticker = tokio::time::interval(self.config.poll_interval);
        loop {
            ticker.tick().await;
            let this = self.clone();
            guarded_tick("config-poll", || async move { this.tick().await }).await;
        }
    }
}

#[async_trait]
impl Service for ConfigDiscoveryService {
    fn kind(&self) -> ServiceKind {
        KIND
    }

    async fn start(&self) -> Result<(), ServiceError> {
        info!("config discovery service starting poll worker");
        Ok(())
    }
}

#[async_trait]
impl CommandExecutor for ConfigDiscoveryService {
    fn kind(&self) -> ServiceKind {
        COMMAND_KIND
    }

    async fn execute(&self, args: &[(String, String)]) -> Result<(), ServiceError> {
        self.apply_discovery_command(args);
        Ok(())
    }
}

/// Spawns the poll worker for `service`. Kept as a free function for the
/// same reason as [`corvid_channel::manager::spawn_health_worker`]: boot
/// wiring needs the fully-registered `Arc` before the worker starts reading
/// from it.
pub fn spawn_poll_worker(service: Arc<ConfigDiscoveryService>) {
    tokio::spawn(ConfigDiscoveryService::run(service));
}
