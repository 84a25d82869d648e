use std::collections::HashMap;

use gift_exchange_optimizer::{Participant, ParticipantId};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("participant id {0} is listed more than once")]
    DuplicateParticipant(ParticipantId),
}

/// Read only view of everyone taking part.
pub trait ParticipantDirectory {
    fn lookup_by_id(&self, id: &str) -> Option<&Participant>;

    fn list_all(&self) -> &[Participant];
}

/// The roster loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    participants: Vec<Participant>,
    index: HashMap<ParticipantId, usize>,
}

impl StaticDirectory {
    pub fn new(participants: Vec<Participant>) -> Result<Self, DirectoryError> {
        let mut index = HashMap::with_capacity(participants.len());
        for (position, participant) in participants.iter().enumerate() {
            if index.insert(participant.id.clone(), position).is_some() {
                return Err(DirectoryError::DuplicateParticipant(participant.id.clone()));
            }
        }
        Ok(Self {
            participants,
            index,
        })
    }
}

impl ParticipantDirectory for StaticDirectory {
    fn lookup_by_id(&self, id: &str) -> Option<&Participant> {
        self.index
            .get(id)
            .and_then(|&position| self.participants.get(position))
    }

    fn list_all(&self) -> &[Participant] {
        &self.participants
    }
}
