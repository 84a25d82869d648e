use core::fmt::{self, Display};
use core::str::FromStr;

use async_trait::async_trait;
use gift_exchange_optimizer::Contact;
use tracing::{info, warn};

pub const EMAIL_SUBJECT: &str = "Your gift exchange assignment";
pub const SMS_MAX_CHARS: usize = 160;

/// Mobile carriers with a free email to SMS gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Carrier {
    Verizon,
    Att,
    TMobile,
    Sprint,
    UsCellular,
    Boost,
    Cricket,
    MetroPcs,
}

impl Carrier {
    #[must_use]
    pub const fn gateway_domain(self) -> &'static str {
        match self {
            Self::Verizon => "vtext.com",
            Self::Att => "txt.att.net",
            Self::TMobile => "tmomail.net",
            Self::Sprint => "messaging.sprintpcs.com",
            Self::UsCellular => "email.uscc.net",
            Self::Boost => "sms.myboostmobile.com",
            Self::Cricket => "sms.cricketwireless.net",
            Self::MetroPcs => "mymetropcs.com",
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown carrier {0}")]
pub struct UnknownCarrier(String);

impl FromStr for Carrier {
    type Err = UnknownCarrier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "verizon" => Self::Verizon,
            "att" => Self::Att,
            "tmobile" => Self::TMobile,
            "sprint" => Self::Sprint,
            "us-cellular" => Self::UsCellular,
            "boost" => Self::Boost,
            "cricket" => Self::Cricket,
            "metropcs" => Self::MetroPcs,
            other => return Err(UnknownCarrier(other.to_owned())),
        })
    }
}

/// Address of the email to SMS gateway for a phone number.
#[must_use]
pub fn sms_gateway_address(phone: &str, carrier: Carrier) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    format!("{digits}@{}", carrier.gateway_domain())
}

/// Where a notification should go. Built from a participant's contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Destination {
    pub phone: Option<String>,
    pub carrier: Option<Carrier>,
    pub email: Option<String>,
}

impl From<&Contact> for Destination {
    fn from(contact: &Contact) -> Self {
        let carrier = contact
            .carrier
            .as_deref()
            .and_then(|carrier| match carrier.parse() {
                Ok(carrier) => Some(carrier),
                Err(error) => {
                    warn!(%error, "ignoring carrier");
                    None
                }
            });
        Self {
            phone: contact.phone.clone(),
            carrier,
            email: contact.email.clone(),
        }
    }
}

/// Per channel outcome of one delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub sms: bool,
    pub email: bool,
}

impl DeliveryReport {
    #[must_use]
    pub const fn delivered(self) -> bool {
        self.sms || self.email
    }
}

pub struct Message<'a> {
    pub giver_name: &'a str,
    pub receiver_name: &'a str,
    pub budget: &'a str,
}

impl Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hi {}! Your gift exchange recipient is {}. Budget is {}.",
            self.giver_name, self.receiver_name, self.budget
        )
    }
}

#[async_trait]
pub trait Notifier {
    async fn deliver(&self, destination: &Destination, message: &str) -> DeliveryReport;
}

/// Records deliveries in the log instead of sending them.
///
/// A channel counts as delivered whenever the destination has an address for
/// it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn deliver(&self, destination: &Destination, message: &str) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        // bodies name the receiver, only their length is logged
        if let Some(phone) = &destination.phone {
            let chars = message.chars().take(SMS_MAX_CHARS).count();
            match destination.carrier {
                Some(carrier) => {
                    let address = sms_gateway_address(phone, carrier);
                    info!(to = %address, chars, "sms sent via email gateway");
                }
                None => info!(to = %phone, chars, "sms sent"),
            }
            report.sms = true;
        }

        if let Some(email) = &destination.email {
            info!(
                to = %email,
                subject = EMAIL_SUBJECT,
                chars = message.chars().count(),
                "email sent"
            );
            report.email = true;
        }

        report
    }
}
