//! Change notification for the interest map.
//!
//! An explicit pub/sub channel scoped to interest-tracker keys, so other
//! open views re-read without a blanket "storage changed" signal. Delivery
//! is best-effort: a failing listener does not block the others.

use std::sync::Arc;
use std::sync::Mutex;

use crate::types::InterestKey;

/// One tracker mutation, delivered to every listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterestChange {
    pub seq: u64,
    pub key: InterestKey,
}

/// Listener for interest-map changes.
pub trait ChangeListener: Send {
    fn notify(&mut self, change: &InterestChange) -> anyhow::Result<()>;
}

/// Dispatcher fanning one change out to all listeners in order.
pub struct ChangeHub {
    listeners: Vec<Box<dyn ChangeListener>>,
    seq: u64,
}

impl ChangeHub {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            seq: 0,
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn ChangeListener>) {
        self.listeners.push(listener);
    }

    /// Deliver a change for `key` with the next sequence number. A listener
    /// failure logs a warning and delivery continues.
    pub fn publish(&mut self, key: InterestKey) {
        self.seq += 1;
        let change = InterestChange { seq: self.seq, key };
        for (i, listener) in self.listeners.iter_mut().enumerate() {
            if let Err(e) = listener.notify(&change) {
                tracing::warn!("change hub: listener #{i} failed: {e}");
            }
        }
    }
}

impl Default for ChangeHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable handle shared by the tracker and every open view.
#[derive(Clone)]
pub struct ChangeHubHandle(Arc<Mutex<ChangeHub>>);

impl ChangeHubHandle {
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(ChangeHub::new())))
    }

    pub fn subscribe(&self, listener: Box<dyn ChangeListener>) {
        match self.0.lock() {
            Ok(mut hub) => hub.subscribe(listener),
            Err(_) => tracing::warn!("change hub: lock poisoned"),
        }
    }

    pub fn publish(&self, key: InterestKey) {
        match self.0.lock() {
            Ok(mut hub) => hub.publish(key),
            Err(_) => tracing::warn!("change hub: lock poisoned"),
        }
    }
}

impl Default for ChangeHubHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ListingKind;

    /// Test listener accumulating received changes behind a shared handle.
    struct CollectListener(Arc<Mutex<Vec<InterestChange>>>);

    impl ChangeListener for CollectListener {
        fn notify(&mut self, change: &InterestChange) -> anyhow::Result<()> {
            self.0.lock().unwrap().push(*change);
            Ok(())
        }
    }

    struct FailingListener;

    impl ChangeListener for FailingListener {
        fn notify(&mut self, _change: &InterestChange) -> anyhow::Result<()> {
            anyhow::bail!("listener down")
        }
    }

    #[test]
    fn seq_increments_per_publish() {
        let out = Arc::new(Mutex::new(Vec::new()));
        let mut hub = ChangeHub::new();
        hub.subscribe(Box::new(CollectListener(Arc::clone(&out))));

        hub.publish(InterestKey::new(ListingKind::Job, 1));
        hub.publish(InterestKey::new(ListingKind::Job, 2));

        let changes = out.lock().unwrap();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].seq, 1);
        assert_eq!(changes[1].seq, 2);
        assert_eq!(changes[1].key, InterestKey::new(ListingKind::Job, 2));
    }

    #[test]
    fn failing_listener_does_not_block_others() {
        let out = Arc::new(Mutex::new(Vec::new()));
        let mut hub = ChangeHub::new();
        hub.subscribe(Box::new(FailingListener));
        hub.subscribe(Box::new(CollectListener(Arc::clone(&out))));

        hub.publish(InterestKey::new(ListingKind::Training, 3));

        assert_eq!(out.lock().unwrap().len(), 1);
    }

    #[test]
    fn handle_clones_share_one_hub() {
        let out = Arc::new(Mutex::new(Vec::new()));
        let handle = ChangeHubHandle::new();
        handle.subscribe(Box::new(CollectListener(Arc::clone(&out))));

        let other = handle.clone();
        other.publish(InterestKey::new(ListingKind::Scholarship, 7));

        assert_eq!(out.lock().unwrap().len(), 1);
    }
}
