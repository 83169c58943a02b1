// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors surfaced by the scheduler crate.
///
/// None of these are fatal to the host process; every call site that can
/// produce one logs it and continues. Executor errors are logged and
/// absorbed rather than propagated — the scheduler keeps running.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// A wire command carried no `SerialNumber` reserved key. Structurally
    /// malformed; the offending command is logged and skipped.
    #[error("command {0:?} is missing the reserved SerialNumber key")]
    MissingSerialNumber(String),
}
