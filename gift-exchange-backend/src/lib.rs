//! The stateful side of the gift exchange: the store holding the current
//! assignment, the participant directory, notification delivery and the request
//! facade tying them together.

pub mod directory;
pub mod error;
pub mod exchange;
pub mod notification;
pub mod store;
pub mod telemetry;

pub use directory::{DirectoryError, ParticipantDirectory, StaticDirectory};
pub use error::ExchangeError;
pub use exchange::{BroadcastSummary, Exchange, ExchangeSettings, ResetOutcome, Reveal};
pub use notification::{DeliveryReport, Destination, LogNotifier, Message, Notifier};
pub use store::AssignmentStore;
