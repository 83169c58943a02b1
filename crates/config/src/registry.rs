// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key-to-watcher map with exclusive-write / shared-read discipline.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::ConfigError;
use crate::watcher::ConfigWatcher;

#[derive(Default)]
pub struct WatcherRegistry {
    watchers: RwLock<HashMap<String, Arc<dyn ConfigWatcher>>>,
}

impl WatcherRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `watcher` under its own key. Duplicate keys are rejected
    /// rather than silently replacing: registering the same key twice is a
    /// programming error, not a runtime condition to paper over.
    pub fn register(&self, watcher: Arc<dyn ConfigWatcher>) -> Result<(), ConfigError> {
        let key = watcher.key().to_string();
        let mut watchers = self.watchers.write();
        if watchers.contains_key(&key) {
            return Err(ConfigError::DuplicateWatcherKey(key));
        }
        watchers.insert(key, watcher);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.watchers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.watchers.read().is_empty()
    }

    /// A point-in-time copy of the registered (key, watcher) pairs, used by
    /// the diff pass so it does not hold the registry lock while invoking
    /// watcher callbacks.
    pub fn snapshot(&self) -> Vec<(String, Arc<dyn ConfigWatcher>)> {
        self.watchers.read().iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}
