//! Random gift exchange assignments under exclusion constraints.
//!
//! Every participant gives exactly one gift and receives exactly one, never to
//! themselves, never within their own group and never along a forbidden pair.

extern crate alloc;

pub mod assignment;
pub mod error;
pub mod generator;
pub mod participant;
pub mod validate;

pub use assignment::Assignment;
pub use error::GenerationError;
pub use generator::{generate, DEFAULT_MAX_ATTEMPTS};
pub use participant::{
    is_valid, Contact, ForbiddenPair, ForbiddenPairs, Group, Participant, ParticipantId,
};
pub use validate::{validate, Validation, Violation};
