// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The [`Service`] capability set and the three roles a service can play in
//! resolution ([`ServiceRole`]).

use std::fmt;

/// Identity used for service lookup. Interned `&'static str`s (e.g.
/// `"channel-manager"`, `"instance-name"`) rather than an enum, so that
/// crates above `corvid-core` can introduce new service kinds without
/// editing a shared enum.
pub type ServiceKind = &'static str;

/// Error type returned from any lifecycle phase. Boxed so individual
/// services can report whatever error type is natural to them without this
/// crate needing to know about it.
pub type ServiceError = Box<dyn std::error::Error + Send + Sync>;

/// The role a discovered service plays during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceRole {
    /// Becomes the active entry for its own kind if nothing is present yet;
    /// otherwise ignored.
    Default,
    /// Becomes the active entry for its own kind if none is present;
    /// otherwise resolution fails with a duplicate-service error. This is
    /// the role an untagged service plays.
    Sole,
    /// Replaces the active entry for `kind` if that entry is itself a
    /// `Default`; installs directly if no entry exists yet (pre-empting any
    /// later `Default` for the same kind).
    Overrides(ServiceKind),
}

/// A boot-participating, long-lived in-process service.
///
/// Lifecycle methods default to no-ops so a service only needs to override
/// the phases it cares about. All phases are fallible but failures are
/// caught and logged per-service by the [`crate::manager::ServiceManager`]
/// rather than aborting the others.
#[async_trait::async_trait]
pub trait Service: Send + Sync {
    /// Static identity used for lookup and resolution.
    fn kind(&self) -> ServiceKind;

    /// Boot ordering key: ascending for `prepare`/`start`, descending for
    /// `shutdown`. Lower values start earlier and shut down later.
    fn priority(&self) -> i32 {
        0
    }

    /// First boot phase, ascending priority.
    async fn prepare(&self) -> Result<(), ServiceError> {
        Ok(())
    }

    /// Second boot phase, ascending priority.
    async fn start(&self) -> Result<(), ServiceError> {
        Ok(())
    }

    /// Final boot phase, discovery order (no sort).
    async fn on_complete(&self) -> Result<(), ServiceError> {
        Ok(())
    }

    /// Teardown phase, descending priority.
    async fn shutdown(&self) -> Result<(), ServiceError> {
        Ok(())
    }
}

impl fmt::Debug for dyn Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service").field("kind", &self.kind()).field("priority", &self.priority()).finish()
    }
}

/// A handler for one command kind, resolved by the Service Manager at
/// dispatch time: executor dispatch is a mapping from kind to a handler
/// value.
///
/// `args` carries the command's kind-specific key/value payload, already
/// stripped of the reserved `SerialNumber` key by the scheduler.
#[async_trait::async_trait]
pub trait CommandExecutor: Send + Sync {
    /// The command kind this executor handles, e.g. `"ConfigurationDiscoveryCommand"`.
    fn kind(&self) -> ServiceKind;

    async fn execute(&self, args: &[(String, String)]) -> Result<(), ServiceError>;
}
