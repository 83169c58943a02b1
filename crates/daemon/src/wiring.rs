// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service construction and registration.
//!
//! Other implementations of this core drive registration dynamically, e.g.
//! by reflecting over discovered plugin jars. This one has no such
//! constraint, so wiring is direct static registration: one function that
//! constructs the instance-name, channel, scheduler, and config services and
//! hands them to the [`corvid_core::ServiceManager`].

use std::sync::Arc;

use corvid_channel::{ChannelManager, ChannelManagerConfig, HeaderDecorator};
use corvid_config::{ConfigDiscoveryService, ConfigServiceConfig};
use corvid_core::{ServiceManager, ServiceRole};
use corvid_scheduler::Scheduler;

/// Handles `main` needs after `boot()` to spawn the long-lived workers that
/// aren't started as part of a `Service`'s lifecycle phases (see
/// `corvid_channel::manager::spawn_health_worker` for why).
pub struct Runtime {
    pub manager: Arc<ServiceManager>,
    pub channel_manager: Arc<ChannelManager>,
    pub config_service: Arc<ConfigDiscoveryService>,
}

/// Builds and registers the channel manager, command scheduler, and config
/// discovery service. Registration order here has no bearing on boot order
/// (`ServiceManager::boot` resolves that from each service's `priority`).
pub fn wire() -> Runtime {
    let manager = Arc::new(ServiceManager::new());

    // Registers with ServiceRole::Sole and i32::MIN priority, so its
    // prepare() (which logs the resolved name) runs ahead of every other
    // service's. The name itself is already resolved by the time this
    // returns, since the channel manager's decorator needs it right away.
    let instance_name_service = corvid_core::instance_name_service::register(&manager);
    let instance_name = instance_name_service.name().to_string();

    let channel_manager =
        Arc::new(ChannelManager::new(ChannelManagerConfig::from_env(instance_name.clone())));
    manager.register(channel_manager.clone(), ServiceRole::Sole);

    let scheduler = Arc::new(Scheduler::new(Arc::downgrade(&manager)));
    manager.register(scheduler.clone(), ServiceRole::Sole);

    let decorator = HeaderDecorator::new(instance_name, corvid_core::env::auth_token());
    let config_service = Arc::new(ConfigDiscoveryService::new(
        ConfigServiceConfig::from_env(),
        channel_manager.clone(),
        scheduler,
        decorator,
    ));
    manager.register(config_service.clone(), ServiceRole::Sole);
    manager.register_executor(config_service.clone());

    Runtime { manager, channel_manager, config_service }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn wire_registers_all_four_services() {
        std::env::remove_var("CORVID_INSTANCE_NAME");
        let runtime = wire();
        assert!(runtime.manager.find(corvid_core::instance_name_service::KIND).is_some());
        assert!(runtime.manager.find(corvid_channel::manager::KIND).is_some());
        assert!(runtime.manager.find_as::<Scheduler>(corvid_scheduler::scheduler::KIND).is_some());
        assert!(runtime.manager.find(corvid_config::service::KIND).is_some());
    }

    #[test]
    #[serial]
    fn wire_picks_up_a_preset_instance_name() {
        std::env::set_var("CORVID_INSTANCE_NAME", "wired@10.0.0.9");
        let runtime = wire();
        let instance_name_service =
            runtime.manager.find_as::<corvid_core::InstanceNameService>(corvid_core::instance_name_service::KIND).unwrap();
        assert_eq!(instance_name_service.name(), "wired@10.0.0.9");
        std::env::remove_var("CORVID_INSTANCE_NAME");
    }
}
