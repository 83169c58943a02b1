// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Duplicate registration of the same property key: a caller bug, fatal
    /// at registration time.
    #[error("watcher already registered for key {0:?}")]
    DuplicateWatcherKey(String),

    #[error("sync RPC failed: {0}")]
    Rpc(#[from] tonic::Status),
}
