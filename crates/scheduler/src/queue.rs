// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded, multi-producer/single-consumer command queue with non-blocking
//! offer semantics: a full queue drops the command rather than blocking
//! the caller.

use crate::command::Command;

pub const DEFAULT_CAPACITY: usize = 64;

pub type CommandSender = tokio::sync::mpsc::Sender<Command>;
pub type CommandReceiver = tokio::sync::mpsc::Receiver<Command>;

/// Builds a bounded command channel at the default capacity (64).
pub fn channel() -> (CommandSender, CommandReceiver) {
    tokio::sync::mpsc::channel(DEFAULT_CAPACITY)
}
