//! Holder of the one current assignment.
//!
//! Callers fall in exactly two classes. Anything answering on behalf of a
//! single participant may only use [`AssignmentStore::lookup`]. The full
//! mapping from [`AssignmentStore::get`] and [`AssignmentStore::pairs`] is for
//! server side dispatch and must never flow into such a response.

use std::sync::{Mutex, MutexGuard, PoisonError};

use gift_exchange_optimizer::{Assignment, ParticipantId};
use tracing::debug;

#[derive(Debug, Default)]
pub struct AssignmentStore {
    slot: Mutex<Option<Assignment>>,
}

impl AssignmentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // the slot is only ever replaced as a whole, so a panic while holding the
    // lock cannot leave a half written assignment behind
    fn slot(&self) -> MutexGuard<'_, Option<Assignment>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces whatever is stored. No validation happens here.
    pub fn set(&self, assignment: Assignment) {
        debug!(pairs = assignment.len(), "storing assignment");
        *self.slot() = Some(assignment);
    }

    /// The full mapping. Dispatch only.
    #[must_use]
    pub fn get(&self) -> Option<Assignment> {
        self.slot().clone()
    }

    #[must_use]
    pub fn has(&self) -> bool {
        self.slot().is_some()
    }

    /// Drops the current assignment. Returns whether there was one.
    pub fn clear(&self) -> bool {
        let had_assignment = self.slot().take().is_some();
        debug!(had_assignment, "cleared assignment");
        had_assignment
    }

    /// The receiver of a single giver, the only read that may back a response
    /// to a participant.
    #[must_use]
    pub fn lookup(&self, giver: &str) -> Option<ParticipantId> {
        self.slot()
            .as_ref()
            .and_then(|assignment| assignment.receiver_of(giver))
            .cloned()
    }

    /// Every `(giver, receiver)` pair ordered by giver. Dispatch only.
    #[must_use]
    pub fn pairs(&self) -> Vec<(ParticipantId, ParticipantId)> {
        self.slot()
            .as_ref()
            .map(|assignment| {
                assignment
                    .iter()
                    .map(|(giver, receiver)| (giver.clone(), receiver.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Stores the result of `init` unless an assignment is already present.
    ///
    /// The lock is held while `init` runs, so concurrent callers generate at
    /// most once per empty slot. Returns whether `init` was called.
    pub fn get_or_try_init<E>(
        &self,
        init: impl FnOnce() -> Result<Assignment, E>,
    ) -> Result<bool, E> {
        let mut slot = self.slot();
        if slot.is_some() {
            return Ok(false);
        }
        let assignment = init()?;
        debug!(pairs = assignment.len(), "storing generated assignment");
        *slot = Some(assignment);
        Ok(true)
    }
}
