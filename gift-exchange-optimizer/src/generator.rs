use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace, warn};

use crate::assignment::Assignment;
use crate::error::GenerationError;
use crate::participant::{is_valid, ForbiddenPairs, Participant};

pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Draws a random assignment that satisfies every constraint.
///
/// Each attempt shuffles the givers and hands each of them a random valid
/// receiver that is still unclaimed. An attempt that runs into a giver without
/// any valid receiver left is thrown away as a whole and the next attempt starts
/// from scratch, there is no backtracking to the previous decision. This is
/// fine for a few dozen participants with sparse constraints.
pub fn generate<R: Rng + ?Sized>(
    participants: &[Participant],
    forbidden: &ForbiddenPairs,
    max_attempts: usize,
    rng: &mut R,
) -> Result<Assignment, GenerationError> {
    if let Some(duplicate) = participants.iter().map(|p| &p.id).duplicates().next() {
        return Err(GenerationError::DuplicateParticipant(duplicate.clone()));
    }

    for attempt in 1..=max_attempts {
        if let Some(assignment) = try_generate(participants, forbidden, rng) {
            debug!(
                attempt,
                participants = participants.len(),
                "generated assignment"
            );
            return Ok(assignment);
        }
        trace!(attempt, "dead end");
    }

    warn!(
        attempts = max_attempts,
        participants = participants.len(),
        forbidden_pairs = forbidden.len(),
        "no valid assignment found"
    );
    Err(GenerationError::Exhausted {
        attempts: max_attempts,
    })
}

fn try_generate<R: Rng + ?Sized>(
    participants: &[Participant],
    forbidden: &ForbiddenPairs,
    rng: &mut R,
) -> Option<Assignment> {
    let mut givers: Vec<&Participant> = participants.iter().collect();
    givers.shuffle(rng);
    let mut unclaimed: Vec<&Participant> = participants.iter().collect();

    let mut assignment = Assignment::default();
    for giver in givers {
        let candidates: Vec<usize> = unclaimed
            .iter()
            .positions(|receiver| is_valid(giver, receiver, forbidden))
            .collect();
        let &index = candidates.choose(rng)?;
        let receiver = unclaimed.swap_remove(index);
        assignment.insert(giver.id.clone(), receiver.id.clone());
    }
    Some(assignment)
}
