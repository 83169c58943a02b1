// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process configuration subscribers (the watcher registry).

/// The kind of transition a watcher is notified about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Add,
    Modify,
    Delete,
}

/// A single configuration key's subscriber.
///
/// `current_value` reflects the watcher's own notion of its last-observed
/// value; implementations are responsible for updating whatever state backs
/// it inside `notify` so subsequent diff passes see the new value.
pub trait ConfigWatcher: Send + Sync {
    fn key(&self) -> &str;
    fn current_value(&self) -> Option<String>;
    fn notify(&self, new_value: Option<String>, kind: ChangeKind);
}

/// The per-key diff decision, factored out as a pure function of
/// `(incoming, current)` so it can be tested without a live watcher or
/// registry: absent/blank incoming values reify a deletion only
/// if the watcher held a value before; a non-blank value that differs from
/// the watcher's current value is a modify; anything else is a no-op.
pub fn decide(incoming: Option<&str>, current: Option<&str>) -> Option<(Option<String>, ChangeKind)> {
    match incoming {
        None | Some("") => current.is_some().then_some((None, ChangeKind::Delete)),
        Some(v) if current != Some(v) => Some((Some(v.to_string()), ChangeKind::Modify)),
        Some(_) => None,
    }
}
