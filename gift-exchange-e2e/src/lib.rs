//! Fixtures shared by the end to end tests.

use async_trait::async_trait;
use gift_exchange_backend::{DeliveryReport, Destination, Notifier};
use gift_exchange_optimizer::{Contact, Participant};
use tracing::debug;

/// Two families of three, everyone reachable by email.
#[must_use]
pub fn family() -> Vec<Participant> {
    [
        ("augustus", "Augustus", "Rollin"),
        ("genevieve", "Genevieve", "Rollin"),
        ("portia", "Portia", "Rollin"),
        ("ethan", "Ethan", "Cousins"),
        ("lucas", "Lucas", "Cousins"),
        ("blake", "Blake", "Cousins"),
    ]
    .into_iter()
    .map(|(id, name, group)| {
        Participant::new(id, name, group).with_contact(Contact {
            email: Some(format!("{id}@example.com")),
            ..Contact::default()
        })
    })
    .collect()
}

/// Delivers everything except email to one address.
pub struct FailingNotifier {
    failing_email: String,
}

impl FailingNotifier {
    #[must_use]
    pub fn new(failing_email: impl Into<String>) -> Self {
        Self {
            failing_email: failing_email.into(),
        }
    }
}

#[async_trait]
impl Notifier for FailingNotifier {
    async fn deliver(&self, destination: &Destination, _message: &str) -> DeliveryReport {
        let Some(email) = &destination.email else {
            return DeliveryReport::default();
        };
        if *email == self.failing_email {
            debug!(%email, "simulated delivery failure");
            return DeliveryReport::default();
        }
        DeliveryReport {
            sms: false,
            email: true,
        }
    }
}

/// Sends log output to the test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
