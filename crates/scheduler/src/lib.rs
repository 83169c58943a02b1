// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! corvid-scheduler: de-duplicating, at-most-once dispatch of collector commands.
//!
//! A batch pulled off the wire by the Config Discovery Service is handed to
//! [`Scheduler::receive`], which deserializes each wire command, drops
//! already-seen serial numbers, and enqueues the rest. A single dedicated
//! worker dequeues commands and dispatches them to the executor registered
//! for the command's kind via `corvid_core::ServiceManager`.

pub mod command;
pub mod error;
pub mod queue;
pub mod scheduler;
pub mod serial_cache;

pub use command::Command;
pub use error::SchedulerError;
pub use scheduler::Scheduler;
pub use serial_cache::SerialCache;
