// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Channel-state listener fan-out: listeners are notified in registration
//! order within one transition, and in transition order across time.

use crate::state::ChannelState;

/// A subscriber notified on every channel-state transition.
///
/// Kept synchronous: notification is a simple state-mirroring callback, not
/// an I/O-bound operation, so no callback chaining is needed beyond plain
/// listener notification.
pub trait ChannelListener: Send + Sync {
    fn on_channel_state(&self, state: ChannelState);
}

/// Registration-ordered, mutation-safe listener list.
#[derive(Default)]
pub struct ListenerList {
    listeners: parking_lot::RwLock<Vec<std::sync::Arc<dyn ChannelListener>>>,
}

impl ListenerList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, listener: std::sync::Arc<dyn ChannelListener>) {
        self.listeners.write().push(listener);
    }

    /// Walks listeners in registration order. A panicking listener is caught,
    /// logged, and skipped so the remaining listeners still run.
    pub fn notify(&self, state: ChannelState) {
        let snapshot = self.listeners.read().clone();
        for listener in snapshot {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| listener.on_channel_state(state)));
            if result.is_err() {
                tracing::error!("channel listener panicked during notification");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Recording {
        order: Arc<parking_lot::Mutex<Vec<usize>>>,
        id: usize,
    }
    impl ChannelListener for Recording {
        fn on_channel_state(&self, _state: ChannelState) {
            self.order.lock().push(self.id);
        }
    }

    struct Panicking;
    impl ChannelListener for Panicking {
        fn on_channel_state(&self, _state: ChannelState) {
            panic!("boom");
        }
    }

    #[test]
    fn notifies_in_registration_order() {
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let list = ListenerList::new();
        list.register(Arc::new(Recording { order: order.clone(), id: 1 }));
        list.register(Arc::new(Recording { order: order.clone(), id: 2 }));
        list.notify(ChannelState::Connected);
        assert_eq!(*order.lock(), vec![1, 2]);
    }

    #[test]
    fn a_panicking_listener_does_not_stop_the_others() {
        let calls = Arc::new(AtomicUsize::new(0));
        struct Counting(Arc<AtomicUsize>);
        impl ChannelListener for Counting {
            fn on_channel_state(&self, _state: ChannelState) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
        let list = ListenerList::new();
        list.register(Arc::new(Panicking));
        list.register(Arc::new(Counting(calls.clone())));
        list.notify(ChannelState::Connected);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
