// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Command Scheduler service: at-most-once dispatch of collector
//! commands to per-kind executors.

use std::sync::{Arc, Weak};

use async_trait::async_trait;
use corvid_core::guard::guarded_tick;
use corvid_core::manager::ServiceManager;
use corvid_core::service::{Service, ServiceError, ServiceKind};
use corvid_proto::pb;
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::command::Command;
use crate::error::SchedulerError;
use crate::queue::{self, CommandReceiver, CommandSender};
use crate::serial_cache::SerialCache;

pub const KIND: ServiceKind = "command-scheduler";

/// Receives wire command batches, suppresses duplicates by serial number,
/// and dispatches the rest from a single dedicated worker.
pub struct Scheduler {
    manager: Weak<ServiceManager>,
    serial_cache: Arc<Mutex<SerialCache>>,
    tx: CommandSender,
    rx: Mutex<Option<CommandReceiver>>,
}

impl Scheduler {
    pub fn new(manager: Weak<ServiceManager>) -> Self {
        let (tx, rx) = queue::channel();
        Self { manager, serial_cache: Arc::new(Mutex::new(SerialCache::new())), tx, rx: Mutex::new(Some(rx)) }
    }

    /// Deserializes and enqueues a batch of wire commands. Malformed
    /// commands, already-seen serials, and overflow are all logged and
    /// dropped rather than failing the call.
    pub fn receive(&self, batch: Vec<pb::Command>) {
        for wire in batch {
            let cmd = match Command::try_from(wire) {
                Ok(cmd) => cmd,
                Err(e) => {
                    warn!(error = %e, "dropping malformed command");
                    continue;
                }
            };
            if self.serial_cache.lock().contains(&cmd.serial) {
                info!(serial = %cmd.serial, kind = %cmd.kind, "dropping duplicate command at receive gate");
                continue;
            }
            if let Err(e) = self.tx.try_send(cmd) {
                warn!(error = %e, "command queue full, dropping command");
            }
        }
    }

    async fn dispatch_one(
        manager: &Weak<ServiceManager>,
        serial_cache: &Mutex<SerialCache>,
        cmd: Command,
    ) -> Result<(), SchedulerError> {
        if serial_cache.lock().contains(&cmd.serial) {
            info!(serial = %cmd.serial, kind = %cmd.kind, "dropping duplicate command at dispatch gate");
            return Ok(());
        }
        let Some(manager) = manager.upgrade() else {
            warn!("service manager is gone, dropping command");
            return Ok(());
        };
        let Some(executor) = manager.find_executor(&cmd.kind) else {
            warn!(kind = %cmd.kind, "no executor registered for command kind");
            return Ok(());
        };
        if let Err(e) = executor.execute(&cmd.args).await {
            warn!(kind = %cmd.kind, serial = %cmd.serial, error = %e, "executor failed");
        }
        serial_cache.lock().insert(cmd.serial);
        Ok(())
    }

    async fn run(manager: Weak<ServiceManager>, serial_cache: Arc<Mutex<SerialCache>>, mut rx: CommandReceiver) {
        while let Some(cmd) = rx.recv().await {
            let manager = manager.clone();
            let serial_cache = serial_cache.clone();
            guarded_tick("command-dispatch", || async move { Self::dispatch_one(&manager, &serial_cache, cmd).await })
                .await;
        }
    }
}

#[async_trait]
impl Service for Scheduler {
    fn kind(&self) -> ServiceKind {
        KIND
    }

    async fn start(&self) -> Result<(), ServiceError> {
        let rx = self.rx.lock().take().ok_or("command-scheduler started twice")?;
        tokio::spawn(Self::run(self.manager.clone(), self.serial_cache.clone(), rx));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corvid_core::service::CommandExecutor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn pair(k: &str, v: &str) -> pb::KeyStringValuePair {
        pb::KeyStringValuePair { key: k.to_string(), value: v.to_string() }
    }

    fn wire(kind: &str, serial: &str) -> pb::Command {
        pb::Command { command: kind.to_string(), args: vec![pair("SerialNumber", serial)] }
    }

    struct CountingExecutor {
        kind: &'static str,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl CommandExecutor for CountingExecutor {
        fn kind(&self) -> ServiceKind {
            self.kind
        }
        async fn execute(&self, _args: &[(String, String)]) -> Result<(), ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn duplicate_serials_in_one_batch_are_dispatched_only_once() {
        let manager = Arc::new(ServiceManager::new());
        let calls = Arc::new(AtomicUsize::new(0));
        manager.register_executor(Arc::new(CountingExecutor { kind: "demo", calls: calls.clone() }));
        manager.boot().await.unwrap();

        let scheduler = Arc::new(Scheduler::new(Arc::downgrade(&manager)));
        scheduler.start().await.unwrap();

        scheduler.receive(vec![wire("demo", "sX"), wire("demo", "sX")]);

        // give the dispatch worker a chance to drain the queue
        for _ in 0..50 {
            if calls.load(Ordering::SeqCst) == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn malformed_commands_are_dropped_without_affecting_the_rest() {
        let manager = Arc::new(ServiceManager::new());
        let calls = Arc::new(AtomicUsize::new(0));
        manager.register_executor(Arc::new(CountingExecutor { kind: "demo", calls: calls.clone() }));
        manager.boot().await.unwrap();

        let scheduler = Arc::new(Scheduler::new(Arc::downgrade(&manager)));
        scheduler.start().await.unwrap();

        let malformed = pb::Command { command: "demo".to_string(), args: vec![] };
        scheduler.receive(vec![malformed, wire("demo", "sY")]);

        for _ in 0..50 {
            if calls.load(Ordering::SeqCst) == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_executor_kind_is_skipped() {
        let manager = Arc::new(ServiceManager::new());
        manager.boot().await.unwrap();
        let scheduler = Arc::new(Scheduler::new(Arc::downgrade(&manager)));
        scheduler.start().await.unwrap();
        scheduler.receive(vec![wire("no-such-kind", "sZ")]);
        // no panic, no executor to assert on; this exercises the none-branch.
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
