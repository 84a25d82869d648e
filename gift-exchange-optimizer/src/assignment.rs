use alloc::collections::BTreeMap;
use core::fmt::{self, Debug};

use crate::participant::ParticipantId;

/// The complete giver to receiver mapping of one exchange run.
///
/// Deliberately not `Serialize`, and its `Debug` output only shows the size,
/// so the mapping cannot end up in a response body or a log line by accident.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    pairs: BTreeMap<ParticipantId, ParticipantId>,
}

impl Assignment {
    #[must_use]
    pub fn receiver_of(&self, giver: &str) -> Option<&ParticipantId> {
        self.pairs.get(giver)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Ordered by giver id.
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &ParticipantId)> {
        self.pairs.iter()
    }

    pub(crate) fn insert(&mut self, giver: ParticipantId, receiver: ParticipantId) {
        self.pairs.insert(giver, receiver);
    }
}

impl Debug for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assignment")
            .field("len", &self.pairs.len())
            .finish_non_exhaustive()
    }
}

impl FromIterator<(ParticipantId, ParticipantId)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (ParticipantId, ParticipantId)>>(iter: T) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(giver, receiver)| (ParticipantId::new(giver), ParticipantId::new(receiver)))
            .collect()
    }
}
