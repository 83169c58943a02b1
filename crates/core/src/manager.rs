// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The service registry: discovery, resolution, and ordered boot/shutdown.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use thiserror::Error;

use crate::guard::guarded_tick;
use crate::service::{CommandExecutor, Service, ServiceKind, ServiceRole};

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("duplicate service for kind {0:?}: a sole/override service is already active")]
    DuplicateService(ServiceKind),
    #[error("override target {0:?} is already occupied by a non-default service")]
    OverrideTargetNotDefault(ServiceKind),
    #[error("boot() called more than once")]
    AlreadyBooted,
}

/// How an active entry was installed; governs whether a later `Default` or
/// `Overrides` may touch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InstallTag {
    Default,
    Sole,
    Override,
}

struct Registration {
    service: Arc<dyn Service>,
    any: Arc<dyn Any + Send + Sync>,
    role: ServiceRole,
}

struct ActiveEntry {
    registration_index: usize,
    installed_as: InstallTag,
}

/// Process-wide registry of boot-participating services.
///
/// Usage: construct, call [`ServiceManager::register`] for every discovered
/// service (in discovery order), then [`ServiceManager::boot`] once. After
/// boot, [`ServiceManager::find`]/[`ServiceManager::find_as`] return the
/// resolved active service for a kind.
pub struct ServiceManager {
    discovered: Mutex<Vec<Registration>>,
    active: RwLock<HashMap<ServiceKind, ActiveEntry>>,
    executors: RwLock<HashMap<ServiceKind, Arc<dyn CommandExecutor>>>,
    booted: std::sync::atomic::AtomicBool,
}

impl Default for ServiceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceManager {
    pub fn new() -> Self {
        Self {
            discovered: Mutex::new(Vec::new()),
            active: RwLock::new(HashMap::new()),
            executors: RwLock::new(HashMap::new()),
            booted: std::sync::atomic::AtomicBool::new(false),
        }
    }

    /// Register a discovered service under the given role. Call order is
    /// discovery order and determines resolution and `on_complete` order.
    pub fn register<T>(&self, service: Arc<T>, role: ServiceRole)
    where
        T: Service + Send + Sync + 'static,
    {
        let any: Arc<dyn Any + Send + Sync> = service.clone();
        let service: Arc<dyn Service> = service;
        self.discovered.lock().push(Registration { service, any, role });
    }

    /// Register a handler for one command kind. Independent of service
    /// resolution: a service can be both boot-managed (via `register`) and a
    /// command executor (via this call) using the same shared `Arc`.
    pub fn register_executor(&self, executor: Arc<dyn CommandExecutor>) {
        let kind = executor.kind();
        self.executors.write().insert(kind, executor);
    }

    /// Look up the handler registered for a command kind. Accepts a borrowed
    /// `&str` rather than `ServiceKind` since callers dispatching wire
    /// commands only have a runtime-owned kind string, not a `'static` one.
    pub fn find_executor(&self, kind: &str) -> Option<Arc<dyn CommandExecutor>> {
        self.executors.read().get(kind).cloned()
    }

    /// Resolve the active set, then run `prepare`, `start`, `on_complete` on
    /// every active service. Resolution failures (duplicate/override
    /// conflicts) are fatal and abort boot; lifecycle-phase failures — a
    /// returned `Err` or a panic — are caught by [`guarded_tick`], logged
    /// per-service, and do not abort the others.
    pub async fn boot(&self) -> Result<(), ManagerError> {
        if self.booted.swap(true, std::sync::atomic::Ordering::SeqCst) {
            return Err(ManagerError::AlreadyBooted);
        }
        self.resolve()?;

        let active = self.active.read();
        let discovered = self.discovered.lock();

        let mut ordered_by_priority: Vec<&Registration> =
            active.values().map(|e| &discovered[e.registration_index]).collect();
        ordered_by_priority.sort_by_key(|r| r.service.priority());

        for reg in &ordered_by_priority {
            let kind = reg.service.kind();
            guarded_tick(&format!("service-prepare:{kind}"), || reg.service.prepare()).await;
        }
        for reg in &ordered_by_priority {
            let kind = reg.service.kind();
            guarded_tick(&format!("service-start:{kind}"), || reg.service.start()).await;
        }

        // on_complete runs in discovery order, not priority order.
        let mut active_indices: Vec<usize> = active.values().map(|e| e.registration_index).collect();
        active_indices.sort_unstable();
        for idx in active_indices {
            let reg = &discovered[idx];
            let kind = reg.service.kind();
            guarded_tick(&format!("service-on-complete:{kind}"), || reg.service.on_complete()).await;
        }

        Ok(())
    }

    /// Run `shutdown` on every active service, descending priority.
    pub async fn shutdown(&self) {
        let active = self.active.read();
        let discovered = self.discovered.lock();

        let mut ordered: Vec<&Registration> =
            active.values().map(|e| &discovered[e.registration_index]).collect();
        ordered.sort_by_key(|r| std::cmp::Reverse(r.service.priority()));

        for reg in ordered {
            let kind = reg.service.kind();
            guarded_tick(&format!("service-shutdown:{kind}"), || reg.service.shutdown()).await;
        }
    }

    /// Look up the active service for `kind` as a trait object.
    pub fn find(&self, kind: ServiceKind) -> Option<Arc<dyn Service>> {
        let active = self.active.read();
        let discovered = self.discovered.lock();
        active.get(kind).map(|e| discovered[e.registration_index].service.clone())
    }

    /// Look up the active service for `kind`, downcast to its concrete type.
    pub fn find_as<T>(&self, kind: ServiceKind) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let active = self.active.read();
        let discovered = self.discovered.lock();
        let any = active.get(kind).map(|e| discovered[e.registration_index].any.clone())?;
        any.downcast::<T>().ok()
    }

    fn resolve(&self) -> Result<(), ManagerError> {
        let discovered = self.discovered.lock();
        let mut active: HashMap<ServiceKind, ActiveEntry> = HashMap::new();

        for (index, reg) in discovered.iter().enumerate() {
            match reg.role {
                ServiceRole::Default => {
                    let kind = reg.service.kind();
                    active.entry(kind).or_insert(ActiveEntry {
                        registration_index: index,
                        installed_as: InstallTag::Default,
                    });
                }
                ServiceRole::Sole => {
                    let kind = reg.service.kind();
                    if active.contains_key(kind) {
                        return Err(ManagerError::DuplicateService(kind));
                    }
                    active.insert(
                        kind,
                        ActiveEntry { registration_index: index, installed_as: InstallTag::Sole },
                    );
                }
                ServiceRole::Overrides(target) => match active.get(target) {
                    Some(existing) if existing.installed_as == InstallTag::Default => {
                        active.insert(
                            target,
                            ActiveEntry { registration_index: index, installed_as: InstallTag::Override },
                        );
                    }
                    Some(_) => {
                        return Err(ManagerError::OverrideTargetNotDefault(target));
                    }
                    None => {
                        active.insert(
                            target,
                            ActiveEntry { registration_index: index, installed_as: InstallTag::Override },
                        );
                    }
                },
            }
        }

        drop(discovered);
        *self.active.write() = active;
        Ok(())
    }
}
