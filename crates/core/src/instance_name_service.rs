// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The instance-name generator service: resolves `CORVID_INSTANCE_NAME` at
//! construction time, synthesizing one if absent, and boots ahead of every
//! other service so they can depend on a resolved identity being available.

use crate::instance_name::synthesize_instance_name;
use crate::service::{Service, ServiceKind, ServiceRole};

pub const KIND: ServiceKind = "instance-name";

/// Resolves and holds the agent's per-process instance name.
///
/// Resolution happens eagerly in [`InstanceNameService::new`] rather than in
/// a lifecycle phase: other services (the channel manager's decorator, most
/// notably) need the resolved name to build their own configuration before
/// `boot()` runs, not merely before their own `start()`. Registering this as
/// a `Service` with the lowest possible priority still gives it a
/// resolved-before-anything-else boot position, and a place
/// in the active set that other services can look up via
/// `ServiceManager::find_as` rather than threading the string through every
/// constructor.
pub struct InstanceNameService {
    name: String,
}

impl InstanceNameService {
    /// Reads `CORVID_INSTANCE_NAME` via `crate::env`, synthesizing
    /// `<uuid-without-dashes>@<ipv4>` if it's absent.
    pub fn new() -> Self {
        let name = crate::env::instance_name().unwrap_or_else(synthesize_instance_name);
        Self { name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for InstanceNameService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Service for InstanceNameService {
    fn kind(&self) -> ServiceKind {
        KIND
    }

    /// Lowest priority: boots ahead of every other service in this workspace.
    fn priority(&self) -> i32 {
        i32::MIN
    }

    async fn prepare(&self) -> Result<(), crate::service::ServiceError> {
        tracing::info!(instance_name = %self.name, "resolved instance name");
        Ok(())
    }
}

/// Registers an [`InstanceNameService`] under [`ServiceRole::Sole`] and
/// returns it so callers can read its resolved name before `boot()` runs.
pub fn register(manager: &crate::manager::ServiceManager) -> std::sync::Arc<InstanceNameService> {
    let service = std::sync::Arc::new(InstanceNameService::new());
    manager.register(service.clone(), ServiceRole::Sole);
    service
}
