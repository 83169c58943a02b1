// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! corvid-config: the Dynamic Configuration Service.
//!
//! [`ConfigDiscoveryService`] polls the collector for a versioned
//! configuration set on a dedicated worker, diffs the response against a
//! [`WatcherRegistry`] of in-process subscribers, and notifies each watcher
//! of the `ADD`/`MODIFY`/`DELETE` transition it observed. It
//! also implements [`corvid_core::service::CommandExecutor`] so the Command
//! Scheduler can dispatch `ConfigurationDiscoveryCommand`s back into it.

pub mod error;
pub mod registry;
pub mod service;
pub mod watcher;

pub use error::ConfigError;
pub use registry::WatcherRegistry;
pub use service::{spawn_poll_worker, ConfigDiscoveryService, ConfigServiceConfig};
pub use watcher::{ChangeKind, ConfigWatcher};
