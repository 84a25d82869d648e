use std::sync::{Mutex, PoisonError};

use gift_exchange_config::Config;
use gift_exchange_optimizer::{generate, Assignment, ForbiddenPairs};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng as _};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::directory::ParticipantDirectory;
use crate::error::ExchangeError;
use crate::notification::{Destination, Message, Notifier};
use crate::store::AssignmentStore;

pub struct ExchangeSettings {
    pub budget: String,
    pub max_attempts: usize,
    pub forbidden_pairs: ForbiddenPairs,
}

impl From<&Config> for ExchangeSettings {
    fn from(config: &Config) -> Self {
        Self {
            budget: config.budget.clone(),
            max_attempts: config.max_attempts,
            forbidden_pairs: config.forbidden_pairs.iter().collect(),
        }
    }
}

/// What a single participant gets to see.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reveal {
    pub giver_name: String,
    pub receiver_name: String,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastSummary {
    pub sent_count: usize,
    pub failed_count: usize,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResetOutcome {
    pub had_assignment: bool,
}

/// Entry point for everything a request layer may ask of the exchange.
///
/// Only [`Exchange::request_reveal`] answers on behalf of one participant and it
/// goes through [`AssignmentStore::lookup`] exclusively.
pub struct Exchange<D, N, R = StdRng> {
    directory: D,
    notifier: N,
    settings: ExchangeSettings,
    store: AssignmentStore,
    rng: Mutex<R>,
}

impl<D: ParticipantDirectory, N: Notifier> Exchange<D, N> {
    pub fn new(directory: D, notifier: N, settings: ExchangeSettings) -> Self {
        Self::with_rng(directory, notifier, settings, StdRng::from_entropy())
    }
}

impl<D: ParticipantDirectory, N: Notifier, R: Rng> Exchange<D, N, R> {
    pub fn with_rng(directory: D, notifier: N, settings: ExchangeSettings, rng: R) -> Self {
        Self {
            directory,
            notifier,
            settings,
            store: AssignmentStore::new(),
            rng: Mutex::new(rng),
        }
    }

    #[cfg(test)]
    pub(crate) const fn store(&self) -> &AssignmentStore {
        &self.store
    }

    #[must_use]
    pub fn has_assignment(&self) -> bool {
        self.store.has()
    }

    /// Overwrites the stored assignment, for example with one drawn offline.
    /// Write only, nothing of the previous assignment is returned.
    pub fn replace_assignment(&self, assignment: Assignment) {
        self.store.set(assignment);
        info!("assignment replaced");
    }

    /// Generates and stores an assignment if there is none yet. Returns whether
    /// a new one was generated.
    pub fn ensure_assignment(&self) -> Result<bool, ExchangeError> {
        let generated = self.store.get_or_try_init(|| {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            generate(
                self.directory.list_all(),
                &self.settings.forbidden_pairs,
                self.settings.max_attempts,
                &mut *rng,
            )
        })?;
        if generated {
            info!("generated new assignment");
        }
        Ok(generated)
    }

    #[instrument(skip(self))]
    pub fn request_reveal(&self, giver_id: &str) -> Result<Reveal, ExchangeError> {
        let giver = self
            .directory
            .lookup_by_id(giver_id)
            .ok_or_else(|| ExchangeError::UnknownParticipant(giver_id.to_owned()))?;

        self.ensure_assignment()?;

        let receiver_id = self
            .store
            .lookup(giver.id.as_str())
            .ok_or_else(|| ExchangeError::NoAssignmentForGiver(giver.id.clone()))?;
        let receiver = self
            .directory
            .lookup_by_id(receiver_id.as_str())
            .ok_or(ExchangeError::DanglingReceiver)?;

        info!("revealed assignment");
        Ok(Reveal {
            giver_name: giver.name.clone(),
            receiver_name: receiver.name.clone(),
        })
    }

    /// Sends every giver their receiver. A giver counts as sent when at least
    /// one channel succeeded.
    #[instrument(skip(self))]
    pub async fn request_broadcast(&self) -> Result<BroadcastSummary, ExchangeError> {
        self.ensure_assignment()?;

        let mut summary = BroadcastSummary {
            sent_count: 0,
            failed_count: 0,
        };
        for (giver_id, receiver_id) in self.store.pairs() {
            let (Some(giver), Some(receiver)) = (
                self.directory.lookup_by_id(giver_id.as_str()),
                self.directory.lookup_by_id(receiver_id.as_str()),
            ) else {
                error!(giver = %giver_id, "pair references a participant missing from the directory");
                summary.failed_count += 1;
                continue;
            };

            let message = Message {
                giver_name: &giver.name,
                receiver_name: &receiver.name,
                budget: &self.settings.budget,
            }
            .to_string();
            let report = self
                .notifier
                .deliver(&Destination::from(&giver.contact), &message)
                .await;

            if report.delivered() {
                summary.sent_count += 1;
            } else {
                warn!(giver = %giver.id, "no channel delivered");
                summary.failed_count += 1;
            }
        }

        info!(
            sent = summary.sent_count,
            failed = summary.failed_count,
            "broadcast finished"
        );
        Ok(summary)
    }

    pub fn request_reset(&self) -> ResetOutcome {
        let had_assignment = self.store.clear();
        info!(
            had_assignment,
            "assignment cleared, the next reveal or broadcast generates a new one"
        );
        ResetOutcome { had_assignment }
    }
}
