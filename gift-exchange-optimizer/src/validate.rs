use core::fmt::{self, Display};
use std::collections::HashMap;

use itertools::Itertools;

use crate::assignment::Assignment;
use crate::participant::{ForbiddenPairs, Participant, ParticipantId};

/// A broken constraint, naming participants by display name where known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    DuplicateParticipant(ParticipantId),
    UnknownGiver(ParticipantId),
    UnknownReceiver(ParticipantId),
    DuplicateReceiver(String),
    SelfAssigned(String),
    SameGroup { giver: String, receiver: String },
    Forbidden { giver: String, receiver: String },
    MissingGiver(String),
    MissingReceiver(String),
}

impl Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateParticipant(id) => write!(f, "duplicate participant id: {id}"),
            Self::UnknownGiver(id) => write!(f, "unknown giver id: {id}"),
            Self::UnknownReceiver(id) => write!(f, "unknown receiver id: {id}"),
            Self::DuplicateReceiver(name) => write!(f, "{name} is assigned to multiple givers"),
            Self::SelfAssigned(name) => write!(f, "{name} is assigned to themselves"),
            Self::SameGroup { giver, receiver } => {
                write!(f, "{giver} and {receiver} are in the same group")
            }
            Self::Forbidden { giver, receiver } => {
                write!(f, "{giver} -> {receiver} is a forbidden pair")
            }
            Self::MissingGiver(name) => write!(f, "{name} is not assigned a receiver"),
            Self::MissingReceiver(name) => {
                write!(f, "{name} is not assigned as anyone's receiver")
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Validation {
    violations: Vec<Violation>,
}

impl Validation {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

/// Checks an assignment against every constraint the generator enforces.
///
/// Meant for tests and offline verification, the generator never calls it.
#[must_use]
pub fn validate(
    assignment: &Assignment,
    participants: &[Participant],
    forbidden: &ForbiddenPairs,
) -> Validation {
    let mut violations: Vec<Violation> = participants
        .iter()
        .map(|p| &p.id)
        .duplicates()
        .cloned()
        .map(Violation::DuplicateParticipant)
        .collect();

    // first entry wins for duplicated ids
    let participants: Vec<&Participant> = participants.iter().unique_by(|p| &p.id).collect();
    let by_id: HashMap<&str, &Participant> =
        participants.iter().map(|p| (p.id.as_str(), *p)).collect();
    let receiver_counts = assignment.iter().map(|(_, receiver)| receiver).counts();

    for (giver_id, receiver_id) in assignment.iter() {
        let Some(giver) = by_id.get(giver_id.as_str()) else {
            violations.push(Violation::UnknownGiver(giver_id.clone()));
            continue;
        };
        let Some(receiver) = by_id.get(receiver_id.as_str()) else {
            violations.push(Violation::UnknownReceiver(receiver_id.clone()));
            continue;
        };

        if giver.id == receiver.id {
            violations.push(Violation::SelfAssigned(giver.name.clone()));
        } else if giver.group == receiver.group {
            violations.push(Violation::SameGroup {
                giver: giver.name.clone(),
                receiver: receiver.name.clone(),
            });
        } else if forbidden.contains(giver.id.as_str(), receiver.id.as_str()) {
            violations.push(Violation::Forbidden {
                giver: giver.name.clone(),
                receiver: receiver.name.clone(),
            });
        }
    }

    for participant in &participants {
        if assignment.receiver_of(participant.id.as_str()).is_none() {
            violations.push(Violation::MissingGiver(participant.name.clone()));
        }
        match receiver_counts.get(&participant.id) {
            None => violations.push(Violation::MissingReceiver(participant.name.clone())),
            Some(1) => {}
            Some(_) => violations.push(Violation::DuplicateReceiver(participant.name.clone())),
        }
    }

    Validation { violations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::ForbiddenPair;

    fn four() -> Vec<Participant> {
        vec![
            Participant::new("augustus", "Augustus", "Rollin"),
            Participant::new("genevieve", "Genevieve", "Rollin"),
            Participant::new("ethan", "Ethan", "Cousins"),
            Participant::new("lucas", "Lucas", "Cousins"),
        ]
    }

    #[test]
    fn accepts_valid_assignment() {
        let assignment: Assignment = [
            ("augustus", "ethan"),
            ("genevieve", "lucas"),
            ("ethan", "genevieve"),
            ("lucas", "augustus"),
        ]
        .into_iter()
        .collect();
        let validation = validate(&assignment, &four(), &ForbiddenPairs::default());
        assert!(validation.is_valid());
        assert!(validation.messages().is_empty());
    }

    #[test]
    fn reports_each_broken_constraint() {
        let assignment: Assignment = [
            ("augustus", "augustus"),
            ("genevieve", "augustus"),
            ("ethan", "lucas"),
            ("lucas", "genevieve"),
        ]
        .into_iter()
        .collect();
        let validation = validate(&assignment, &four(), &ForbiddenPairs::default());

        assert!(!validation.is_valid());
        assert_eq!(
            validation.messages(),
            [
                "Augustus is assigned to themselves",
                "Ethan and Lucas are in the same group",
                "Genevieve and Augustus are in the same group",
                "Augustus is assigned to multiple givers",
                "Ethan is not assigned as anyone's receiver",
            ]
        );
    }

    #[test]
    fn reports_forbidden_pair() {
        let assignment: Assignment = [
            ("augustus", "ethan"),
            ("genevieve", "lucas"),
            ("ethan", "genevieve"),
            ("lucas", "augustus"),
        ]
        .into_iter()
        .collect();
        let forbidden: ForbiddenPairs = [ForbiddenPair::new("lucas", "augustus")]
            .into_iter()
            .collect();
        let validation = validate(&assignment, &four(), &forbidden);
        assert_eq!(
            validation.violations(),
            [Violation::Forbidden {
                giver: "Lucas".to_owned(),
                receiver: "Augustus".to_owned(),
            }]
        );
    }

    #[test]
    fn reports_missing_and_unknown_ids() {
        let assignment: Assignment = [
            ("augustus", "ethan"),
            ("genevieve", "lucas"),
            ("ethan", "nobody"),
            ("rudolph", "augustus"),
        ]
        .into_iter()
        .collect();
        let validation = validate(&assignment, &four(), &ForbiddenPairs::default());
        assert_eq!(
            validation.messages(),
            [
                "unknown receiver id: nobody",
                "unknown giver id: rudolph",
                "Genevieve is not assigned as anyone's receiver",
                "Lucas is not assigned a receiver",
            ]
        );
        assert!(validation
            .violations()
            .contains(&Violation::UnknownGiver(ParticipantId::new("rudolph"))));
    }

    #[test]
    fn reports_duplicate_participants() {
        let assignment: Assignment = [
            ("augustus", "ethan"),
            ("genevieve", "lucas"),
            ("ethan", "genevieve"),
            ("lucas", "augustus"),
        ]
        .into_iter()
        .collect();
        let mut participants = four();
        participants.push(Participant::new("ethan", "Ethan Again", "Rollin"));

        let validation = validate(&assignment, &participants, &ForbiddenPairs::default());
        assert!(!validation.is_valid());
        assert_eq!(
            validation.violations(),
            [Violation::DuplicateParticipant(ParticipantId::new("ethan"))]
        );
        assert_eq!(validation.messages(), ["duplicate participant id: ethan"]);
    }
}
