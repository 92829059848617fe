use std::sync::Arc;

use crate::clock::Clock;
use crate::clock::StdClock;
use crate::error::StorageError;
use crate::hub::ChangeHubHandle;
use crate::store::InterestMap;
use crate::store::InterestStore;
use crate::types::InterestKey;
use crate::types::InterestRecord;
use crate::types::ListingKind;
use crate::window;
use crate::window::WindowStatus;

/// Outcome of toggling the saved flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Unsaved,
}

/// Outcome of an apply action. A duplicate apply is a business-level no-op
/// surfaced to the caller, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied { applied_at_ms: i64 },
    AlreadyApplied { applied_at_ms: i64 },
}

/// Outcome of a withdraw action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WithdrawOutcome {
    Withdrawn,
    /// The 24-hour grace period has lapsed; nothing was mutated.
    WindowClosed { applied_at_ms: i64 },
    NotApplied,
}

/// Durable saved/applied bookkeeping shared by every list and detail
/// screen.
///
/// Mutations are synchronous with the persistence write and publish a
/// change for the touched key once the write has succeeded. On a storage
/// error nothing is published and the persisted map is unchanged.
pub struct InterestTracker {
    store: Box<dyn InterestStore>,
    hub: ChangeHubHandle,
    clock: Arc<dyn Clock>,
}

impl InterestTracker {
    pub fn new(store: Box<dyn InterestStore>, hub: ChangeHubHandle) -> Self {
        Self::with_clock(store, hub, Arc::new(StdClock))
    }

    pub fn with_clock(
        store: Box<dyn InterestStore>,
        hub: ChangeHubHandle,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { store, hub, clock }
    }

    pub fn hub(&self) -> &ChangeHubHandle {
        &self.hub
    }

    /// Direct store access for export/import/stats passthrough.
    pub fn store(&self) -> &dyn InterestStore {
        self.store.as_ref()
    }

    /// Flip the saved flag. Toggling off a record that was never applied
    /// removes it entirely.
    pub fn toggle_saved(
        &self,
        kind: ListingKind,
        id: u64,
    ) -> Result<SaveOutcome, StorageError> {
        let key = InterestKey::new(kind, id);
        let mut record = self.store.get(&key)?.unwrap_or_default();
        record.saved = !record.saved;
        let outcome = if record.saved {
            SaveOutcome::Saved
        } else {
            SaveOutcome::Unsaved
        };
        self.persist(&key, record)?;
        Ok(outcome)
    }

    /// Record an application at the current wall-clock time. Applying to a
    /// listing that already has an application on record changes nothing
    /// and reports the existing timestamp.
    pub fn mark_applied(
        &self,
        kind: ListingKind,
        id: u64,
    ) -> Result<ApplyOutcome, StorageError> {
        let key = InterestKey::new(kind, id);
        let mut record = self.store.get(&key)?.unwrap_or_default();
        if record.applied
            && let Some(applied_at_ms) = record.applied_at_ms
        {
            return Ok(ApplyOutcome::AlreadyApplied { applied_at_ms });
        }
        let applied_at_ms = self.clock.now_ms();
        record.applied = true;
        record.applied_at_ms = Some(applied_at_ms);
        self.persist(&key, record)?;
        Ok(ApplyOutcome::Applied { applied_at_ms })
    }

    /// Withdraw an application. The tracker enforces the grace period
    /// itself: once the 24-hour window has lapsed the record is left
    /// untouched and the refusal is reported to the caller.
    pub fn withdraw(
        &self,
        kind: ListingKind,
        id: u64,
    ) -> Result<WithdrawOutcome, StorageError> {
        let key = InterestKey::new(kind, id);
        let Some(mut record) = self.store.get(&key)? else {
            return Ok(WithdrawOutcome::NotApplied);
        };
        let Some(applied_at_ms) = record.applied_at_ms else {
            return Ok(WithdrawOutcome::NotApplied);
        };
        if let WindowStatus::Closed = window::evaluate(Some(applied_at_ms), self.clock.now_ms()) {
            return Ok(WithdrawOutcome::WindowClosed { applied_at_ms });
        }
        record.applied = false;
        record.applied_at_ms = None;
        self.persist(&key, record)?;
        Ok(WithdrawOutcome::Withdrawn)
    }

    /// Clear the saved flag; removes the record entirely if there is no
    /// application on it either.
    pub fn unsave(&self, kind: ListingKind, id: u64) -> Result<(), StorageError> {
        let key = InterestKey::new(kind, id);
        let Some(mut record) = self.store.get(&key)? else {
            return Ok(());
        };
        if !record.saved {
            return Ok(());
        }
        record.saved = false;
        self.persist(&key, record)
    }

    pub fn record(
        &self,
        kind: ListingKind,
        id: u64,
    ) -> Result<Option<InterestRecord>, StorageError> {
        self.store.get(&InterestKey::new(kind, id))
    }

    /// The full persisted map.
    pub fn snapshot(&self) -> Result<InterestMap, StorageError> {
        self.store.list(None)
    }

    pub fn saved(&self, kind: ListingKind) -> Result<Vec<InterestKey>, StorageError> {
        let map = self.store.list(Some(kind))?;
        Ok(map
            .into_iter()
            .filter(|(_, r)| r.saved)
            .map(|(k, _)| k)
            .collect())
    }

    pub fn applied(&self, kind: ListingKind) -> Result<Vec<InterestKey>, StorageError> {
        let map = self.store.list(Some(kind))?;
        Ok(map
            .into_iter()
            .filter(|(_, r)| r.applied)
            .map(|(k, _)| k)
            .collect())
    }

    /// Evaluate the withdrawal window for one listing against the
    /// tracker's clock.
    pub fn window_status(
        &self,
        kind: ListingKind,
        id: u64,
    ) -> Result<WindowStatus, StorageError> {
        let record = self.store.get(&InterestKey::new(kind, id))?;
        Ok(window::evaluate(
            record.and_then(|r| r.applied_at_ms),
            self.clock.now_ms(),
        ))
    }

    fn persist(&self, key: &InterestKey, record: InterestRecord) -> Result<(), StorageError> {
        if record.is_empty() {
            self.store.remove(key)?;
        } else {
            self.store.put(key, &record)?;
        }
        self.hub.publish(*key);
        Ok(())
    }
}
