use alloc::borrow::Borrow;
use core::fmt::{self, Display};
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ParticipantId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Partition tag. Givers must always pick a receiver from another group.
///
/// Only used for exclusion, never shown to anyone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Group(String);

impl Group {
    #[must_use]
    pub fn new(group: impl Into<String>) -> Self {
        Self(group.into())
    }
}

/// Ways to reach a participant. Opaque to the matching, only handed through to
/// whoever delivers notifications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub carrier: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub group: Group,
    #[serde(flatten)]
    pub contact: Contact,
}

impl Participant {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            id: ParticipantId::new(id),
            name: name.into(),
            group: Group::new(group),
            contact: Contact::default(),
        }
    }

    #[must_use]
    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contact = contact;
        self
    }
}

/// One disallowed direction: `giver` may never draw `receiver`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForbiddenPair {
    pub giver: ParticipantId,
    pub receiver: ParticipantId,
}

impl ForbiddenPair {
    #[must_use]
    pub fn new(giver: impl Into<String>, receiver: impl Into<String>) -> Self {
        Self {
            giver: ParticipantId::new(giver),
            receiver: ParticipantId::new(receiver),
        }
    }
}

/// Forbidden pairs indexed by giver.
#[derive(Debug, Clone, Default)]
pub struct ForbiddenPairs {
    by_giver: HashMap<ParticipantId, HashSet<ParticipantId>>,
}

impl ForbiddenPairs {
    #[must_use]
    pub fn contains(&self, giver: &str, receiver: &str) -> bool {
        self.by_giver
            .get(giver)
            .is_some_and(|receivers| receivers.contains(receiver))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_giver.values().map(HashSet::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_giver.is_empty()
    }
}

impl FromIterator<ForbiddenPair> for ForbiddenPairs {
    fn from_iter<T: IntoIterator<Item = ForbiddenPair>>(iter: T) -> Self {
        let mut by_giver: HashMap<ParticipantId, HashSet<ParticipantId>> = HashMap::new();
        for ForbiddenPair { giver, receiver } in iter {
            by_giver.entry(giver).or_default().insert(receiver);
        }
        Self { by_giver }
    }
}

impl<'a> FromIterator<&'a ForbiddenPair> for ForbiddenPairs {
    fn from_iter<T: IntoIterator<Item = &'a ForbiddenPair>>(iter: T) -> Self {
        iter.into_iter().cloned().collect()
    }
}

/// Whether `giver` may be assigned `receiver`.
#[must_use]
pub fn is_valid(giver: &Participant, receiver: &Participant, forbidden: &ForbiddenPairs) -> bool {
    giver.id != receiver.id
        && giver.group != receiver.group
        && !forbidden.contains(giver.id.as_str(), receiver.id.as_str())
}
