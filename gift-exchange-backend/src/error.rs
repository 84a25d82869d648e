use gift_exchange_optimizer::{GenerationError, ParticipantId};

/// Failures of the request facade.
///
/// None of the messages may mention a receiver, so these are safe to show to
/// the participant who made the request.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("failed to generate assignment: {0}")]
    Generation(#[from] GenerationError),
    #[error("invalid participant id {0}")]
    UnknownParticipant(String),
    #[error("no assignment found for participant {0}")]
    NoAssignmentForGiver(ParticipantId),
    #[error("the assignment references a participant missing from the directory")]
    DanglingReceiver,
}

impl ExchangeError {
    /// Whether the caller asked for something that does not exist, as opposed
    /// to the exchange being misconfigured or internally inconsistent.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownParticipant(_))
    }
}
