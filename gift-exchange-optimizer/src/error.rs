use crate::participant::ParticipantId;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error(
        "unable to generate a valid assignment after {attempts} attempts, the constraints are \
         probably too restrictive"
    )]
    Exhausted { attempts: usize },
    #[error("participant id {0} is used more than once")]
    DuplicateParticipant(ParticipantId),
}
