// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Guarded execution for long-lived worker loops.
//!
//! Every long-lived worker in the core (channel health, config poll, command
//! dispatch) runs a tick body through [`guarded_tick`] so that a panic or
//! error from a single tick is logged and absorbed rather than killing the
//! worker task. This is the mechanism behind the "a single tick's failure
//! never kills the worker" guarantee.

use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;

/// Run one tick of a worker loop, catching both panics and returned errors.
///
/// `worker` is the worker's name for logging (e.g. `"channel-health"`).
/// Neither a panic nor an `Err` propagates past this call.
pub async fn guarded_tick<F, Fut, E>(worker: &str, tick: F)
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: std::fmt::Display,
{
    match AssertUnwindSafe(tick()).catch_unwind().await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            tracing::warn!(worker, error = %e, "worker tick failed");
        }
        Err(panic) => {
            let msg = panic_message(&panic);
            tracing::error!(worker, panic = %msg, "worker tick panicked");
        }
    }
}

fn panic_message(panic: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
