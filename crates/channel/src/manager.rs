// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Channel Manager service: a single logical gRPC channel to the
//! collector, reselected and rebuilt by a dedicated health-check worker.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use corvid_core::guard::guarded_tick;
use corvid_core::service::{Service, ServiceError, ServiceKind};
use parking_lot::Mutex;
use tonic::Status;
use tracing::info;

use crate::error::{is_network_error, ChannelError};
use crate::listener::{ChannelListener, ListenerList};
use crate::managed_channel::ManagedChannel;
use crate::server_list::ServerList;
use crate::state::ChannelState;

pub const KIND: ServiceKind = "channel-manager";

#[derive(Debug, Clone)]
pub struct ChannelManagerConfig {
    pub backend_service: Vec<String>,
    pub resolve_dns_periodically: bool,
    pub check_interval: Duration,
    pub force_reconnection_period: u32,
    pub use_tls: bool,
    pub instance_name: String,
    pub auth_token: Option<String>,
}

impl ChannelManagerConfig {
    /// Reads every field from `corvid_core::env`'s configuration surface.
    pub fn from_env(instance_name: String) -> Self {
        Self {
            backend_service: corvid_core::env::backend_service(),
            resolve_dns_periodically: corvid_core::env::is_resolve_dns_periodically(),
            check_interval: corvid_core::env::grpc_channel_check_interval(),
            force_reconnection_period: corvid_core::env::force_reconnection_period(),
            use_tls: corvid_core::env::use_tls(),
            instance_name,
            auth_token: corvid_core::env::auth_token(),
        }
    }
}

pub struct ChannelManager {
    config: ChannelManagerConfig,
    active: ArcSwapOption<ManagedChannel>,
    state: Mutex<ChannelState>,
    listeners: ListenerList,
    server_list: Mutex<ServerList>,
    reconnect_needed: AtomicBool,
    same_index_ticks: AtomicU32,
}

impl ChannelManager {
    pub fn new(config: ChannelManagerConfig) -> Self {
        let server_list = ServerList::new(config.backend_service.clone());
        Self {
            config,
            active: ArcSwapOption::empty(),
            state: Mutex::new(ChannelState::Disconnect),
            listeners: ListenerList::new(),
            server_list: Mutex::new(server_list),
            reconnect_needed: AtomicBool::new(true),
            same_index_ticks: AtomicU32::new(0),
        }
    }

    pub fn register_listener(&self, listener: Arc<dyn ChannelListener>) {
        self.listeners.register(listener);
    }

    pub fn state(&self) -> ChannelState {
        *self.state.lock()
    }

    /// A lock-free snapshot of the active channel, if any: readers obtain
    /// it via an atomic reference swap rather than a lock.
    pub fn channel(&self) -> Option<Arc<ManagedChannel>> {
        self.active.load_full()
    }

    /// Classifies `status` and, if network-class, flips state to
    /// `DISCONNECT` and notifies listeners exactly once per genuine
    /// transition. Non-network errors never flip channel state.
    pub fn report_error(&self, status: &Status) {
        if !is_network_error(status) {
            return;
        }
        self.reconnect_needed.store(true, Ordering::SeqCst);
        let mut state = self.state.lock();
        if *state != ChannelState::Disconnect {
            *state = ChannelState::Disconnect;
            drop(state);
            info!(state = %ChannelState::Disconnect, "channel manager state transition");
            self.listeners.notify(ChannelState::Disconnect);
        }
    }

    fn emit_connected(&self) {
        *self.state.lock() = ChannelState::Connected;
        self.listeners.notify(ChannelState::Connected);
    }

    /// One iteration of the health-check worker's periodic tick.
    async fn tick(&self) -> Result<(), ChannelError> {
        if self.config.resolve_dns_periodically && self.reconnect_needed.load(Ordering::SeqCst) {
            self.refresh_dns().await?;
        }

        let (prior_selected, index, endpoint) = {
            let mut list = self.server_list.lock();
            let prior = list.last_selected();
            let Some(index) = list.pick_index(&mut rand::thread_rng()) else {
                return Err(ChannelError::NoEndpointsConfigured);
            };
            let Some(endpoint) = list.endpoint_at(index) else {
                return Err(ChannelError::NoEndpointsConfigured);
            };
            (prior, index, endpoint.to_string())
        };

        let reselected_same_server = Some(index) == prior_selected && self.active.load().is_some();

        if !reselected_same_server {
            self.active.store(None);
            let managed = ManagedChannel::connect(&endpoint, self.config.use_tls)?;
            self.active.store(Some(Arc::new(managed)));
            info!(endpoint = %endpoint, "channel manager connected");
            self.emit_connected();
            self.reconnect_needed.store(false, Ordering::SeqCst);
            self.same_index_ticks.store(0, Ordering::SeqCst);
            return Ok(());
        }

        if !self.reconnect_needed.load(Ordering::SeqCst) {
            let ticks = self.same_index_ticks.fetch_add(1, Ordering::SeqCst) + 1;
            if ticks >= self.config.force_reconnection_period {
                info!(endpoint = %endpoint, ticks, "forcing reconnection re-notification");
                self.emit_connected();
                self.same_index_ticks.store(0, Ordering::SeqCst);
            }
        } else {
            // same endpoint reselected while reconnecting and the existing
            // channel is still considered ready: treat it as reconnected.
            self.emit_connected();
            self.reconnect_needed.store(false, Ordering::SeqCst);
            self.same_index_ticks.store(0, Ordering::SeqCst);
        }
        Ok(())
    }

    async fn refresh_dns(&self) -> Result<(), ChannelError> {
        let first = {
            let list = self.server_list.lock();
            list.first().map(str::to_string)
        };
        let Some(first) = first else {
            return Ok(());
        };
        let Some((host, port)) = first.rsplit_once(':') else {
            return Ok(());
        };
        let lookup_target = format!("{host}:{port}");
        let addrs = tokio::net::lookup_host(&lookup_target)
            .await
            .map_err(|e| ChannelError::DnsResolutionFailed(lookup_target.clone(), e))?;
        let expanded: Vec<String> = addrs.map(|addr| format!("{}:{}", addr.ip(), port)).collect();
        if !expanded.is_empty() {
            self.server_list.lock().replace(expanded);
        }
        Ok(())
    }

    async fn run(self: Arc<Self>) {
        let mut ticker = tokio::time::interval(self.config.check_interval);
        loop {
            ticker.tick().await;
            let this = self.clone();
            guarded_tick("channel-health", || async move { this.tick().await }).await;
        }
    }
}

#[async_trait]
impl Service for ChannelManager {
    fn kind(&self) -> ServiceKind {
        KIND
    }

    fn priority(&self) -> i32 {
        -50
    }
}

/// Spawns the health-check worker for `manager`. Kept as a free function
/// (rather than inside `Service::start`) so `corvidd` can hand the manager
/// to other services before the worker starts mutating it.
pub fn spawn_health_worker(manager: Arc<ChannelManager>) -> Result<(), ServiceError> {
    tokio::spawn(ChannelManager::run(manager));
    Ok(())
}
